// storefront/src/web/session.rs

use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use std::fmt;
use tracing::warn;

use crate::errors::AppError;

pub const SESSION_HEADER: &str = "X-Session-Id";
pub const MAX_SESSION_ID_LEN: usize = 128;

/// Opaque, client-generated cart owner. Read from the `X-Session-Id` header;
/// there is no authentication behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
  pub fn parse(raw: &str) -> Result<Self, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(AppError::Validation(format!("{} header must not be empty.", SESSION_HEADER)));
    }
    if trimmed.len() > MAX_SESSION_ID_LEN {
      return Err(AppError::Validation(format!(
        "{} header must be at most {} characters.",
        SESSION_HEADER, MAX_SESSION_ID_LEN
      )));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for SessionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromRequest for SessionId {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let result = match req.headers().get(SESSION_HEADER) {
      Some(value) => value
        .to_str()
        .map_err(|_| AppError::Validation(format!("{} header must be visible ASCII.", SESSION_HEADER)))
        .and_then(SessionId::parse),
      None => Err(AppError::Validation(format!("Missing {} header.", SESSION_HEADER))),
    };
    if let Err(e) = &result {
      warn!("SessionId extractor: {}", e);
    }
    ready(result)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_trims_and_bounds() {
    assert_eq!(SessionId::parse("  session_abc  ").unwrap().as_str(), "session_abc");
    assert!(SessionId::parse("   ").is_err());
    assert!(SessionId::parse(&"x".repeat(MAX_SESSION_ID_LEN)).is_ok());
    assert!(SessionId::parse(&"x".repeat(MAX_SESSION_ID_LEN + 1)).is_err());
  }
}
