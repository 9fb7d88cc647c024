// storefront/src/storage/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};

use super::{quantity_limit_exceeded, Storage};
use crate::errors::Result;
use crate::models::cart_item::merged_quantity;
use crate::models::{CartItem, CartLine, Category, NewCartItem, NewCategory, NewProduct, Product, ProductFilter};

// `price` is NUMERIC in the schema and text on the wire.
const PRODUCT_COLUMNS: &str = "p.id, p.name, p.description, p.price::text AS price, p.category_id, p.image_url, \
   p.unit, p.stock, p.is_available, p.is_featured, p.tags, p.created_at";

const CATEGORY_COLUMNS: &str = "id, name, slug, description, image_url";

const CART_ITEM_COLUMNS: &str = "id, session_id, product_id, quantity, created_at";

#[derive(FromRow)]
struct CartLineRow {
  item_id: i32,
  session_id: String,
  product_id: i32,
  quantity: i32,
  item_created_at: DateTime<Utc>,
  #[sqlx(flatten)]
  product: Product,
}

impl From<CartLineRow> for CartLine {
  fn from(row: CartLineRow) -> Self {
    CartLine {
      item: CartItem {
        id: row.item_id,
        session_id: row.session_id,
        product_id: row.product_id,
        quantity: row.quantity,
        created_at: row.item_created_at,
      },
      product: row.product,
    }
  }
}

/// Escapes LIKE metacharacters and wraps the term for a substring match.
fn contains_pattern(term: &str) -> String {
  let mut escaped = String::with_capacity(term.len() + 2);
  escaped.push('%');
  for ch in term.chars() {
    if matches!(ch, '\\' | '%' | '_') {
      escaped.push('\\');
    }
    escaped.push(ch);
  }
  escaped.push('%');
  escaped
}

#[derive(Clone)]
pub struct PgStorage {
  pool: PgPool,
}

impl PgStorage {
  pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await?;
    info!("Successfully connected to the database.");
    Ok(Self { pool })
  }

  pub fn from_pool(pool: PgPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }

  /// Applies the embedded schema migrations.
  pub async fn migrate(&self) -> Result<()> {
    sqlx::migrate!("./migrations").run(&self.pool).await?;
    info!("Database migrations applied.");
    Ok(())
  }
}

#[async_trait]
impl Storage for PgStorage {
  async fn get_categories(&self) -> Result<Vec<Category>> {
    let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY id");
    Ok(sqlx::query_as(&sql).fetch_all(&self.pool).await?)
  }

  async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
    let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE slug = $1");
    Ok(sqlx::query_as(&sql).bind(slug).fetch_optional(&self.pool).await?)
  }

  async fn create_category(&self, category: NewCategory) -> Result<Category> {
    let sql = format!(
      "INSERT INTO categories (name, slug, description, image_url) VALUES ($1, $2, $3, $4) RETURNING {CATEGORY_COLUMNS}"
    );
    Ok(
      sqlx::query_as(&sql)
        .bind(category.name)
        .bind(category.slug)
        .bind(category.description)
        .bind(category.image_url)
        .fetch_one(&self.pool)
        .await?,
    )
  }

  #[instrument(name = "storage::get_products", skip(self))]
  async fn get_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
    let category_id = match filter.category_slug.as_deref() {
      Some(slug) => self.get_category_by_slug(slug).await?.map(|c| c.id),
      None => None,
    };

    let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
    qb.push(PRODUCT_COLUMNS).push(" FROM products p WHERE TRUE");
    if let Some(id) = category_id {
      qb.push(" AND p.category_id = ").push_bind(id);
    }
    if let Some(search) = filter.search.as_deref() {
      let pattern = contains_pattern(search);
      qb.push(" AND (p.name ILIKE ")
        .push_bind(pattern.clone())
        .push(" OR p.description ILIKE ")
        .push_bind(pattern.clone())
        .push(" OR EXISTS (SELECT 1 FROM unnest(p.tags) AS tag WHERE tag ILIKE ")
        .push_bind(pattern)
        .push("))");
    }
    qb.push(" ORDER BY p.is_featured DESC, p.id ASC");
    debug!(sql = qb.sql(), "Built product listing query");

    Ok(qb.build_query_as::<Product>().fetch_all(&self.pool).await?)
  }

  async fn get_product(&self, id: i32) -> Result<Option<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = $1");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?)
  }

  async fn get_featured_products(&self) -> Result<Vec<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.is_featured ORDER BY p.id");
    Ok(sqlx::query_as(&sql).fetch_all(&self.pool).await?)
  }

  async fn create_product(&self, product: NewProduct) -> Result<Product> {
    let sql = format!(
      "INSERT INTO products AS p \
       (name, description, price, category_id, image_url, unit, stock, is_available, is_featured, tags) \
       VALUES ($1, $2, $3::numeric, $4, $5, $6, $7, $8, $9, $10) RETURNING {PRODUCT_COLUMNS}"
    );
    Ok(
      sqlx::query_as(&sql)
        .bind(product.name)
        .bind(product.description)
        .bind(product.price)
        .bind(product.category_id)
        .bind(product.image_url)
        .bind(product.unit)
        .bind(product.stock)
        .bind(product.is_available)
        .bind(product.is_featured)
        .bind(product.tags)
        .fetch_one(&self.pool)
        .await?,
    )
  }

  async fn get_cart_items(&self, session_id: &str) -> Result<Vec<CartLine>> {
    let sql = format!(
      "SELECT ci.id AS item_id, ci.session_id, ci.product_id, ci.quantity, ci.created_at AS item_created_at, \
       {PRODUCT_COLUMNS} \
       FROM cart_items ci INNER JOIN products p ON p.id = ci.product_id \
       WHERE ci.session_id = $1 ORDER BY ci.id"
    );
    let rows: Vec<CartLineRow> = sqlx::query_as(&sql).bind(session_id).fetch_all(&self.pool).await?;
    Ok(rows.into_iter().map(CartLine::from).collect())
  }

  #[instrument(name = "storage::add_to_cart", skip(self, item), fields(session_id = %item.session_id, product_id = item.product_id))]
  async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem> {
    let mut tx = self.pool.begin().await?;

    // Row locks cannot cover a line that does not exist yet, so concurrent
    // first adds for the same (session, product) serialize on this key.
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1), $2)")
      .bind(&item.session_id)
      .bind(item.product_id)
      .execute(&mut *tx)
      .await?;

    let existing: Option<(i32, i32)> =
      sqlx::query_as("SELECT id, quantity FROM cart_items WHERE session_id = $1 AND product_id = $2 FOR UPDATE")
        .bind(&item.session_id)
        .bind(item.product_id)
        .fetch_optional(&mut *tx)
        .await?;

    let row: CartItem = match existing {
      Some((id, current)) => {
        let quantity = merged_quantity(current, item.quantity).ok_or_else(quantity_limit_exceeded)?;
        let sql = format!("UPDATE cart_items SET quantity = $1 WHERE id = $2 RETURNING {CART_ITEM_COLUMNS}");
        sqlx::query_as(&sql)
          .bind(quantity)
          .bind(id)
          .fetch_one(&mut *tx)
          .await?
      }
      None => {
        let sql = format!(
          "INSERT INTO cart_items (session_id, product_id, quantity) VALUES ($1, $2, $3) RETURNING {CART_ITEM_COLUMNS}"
        );
        sqlx::query_as(&sql)
          .bind(&item.session_id)
          .bind(item.product_id)
          .bind(item.quantity)
          .fetch_one(&mut *tx)
          .await?
      }
    };

    tx.commit().await?;
    Ok(row)
  }

  async fn update_cart_item_quantity(&self, session_id: &str, product_id: i32, quantity: i32) -> Result<()> {
    if quantity <= 0 {
      return self.remove_from_cart(session_id, product_id).await;
    }
    sqlx::query("UPDATE cart_items SET quantity = $1 WHERE session_id = $2 AND product_id = $3")
      .bind(quantity)
      .bind(session_id)
      .bind(product_id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn remove_from_cart(&self, session_id: &str, product_id: i32) -> Result<()> {
    sqlx::query("DELETE FROM cart_items WHERE session_id = $1 AND product_id = $2")
      .bind(session_id)
      .bind(product_id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn clear_cart(&self, session_id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM cart_items WHERE session_id = $1")
      .bind(session_id)
      .execute(&self.pool)
      .await?;
    debug!(session_id, removed = result.rows_affected(), "Cleared cart");
    Ok(())
  }
}
