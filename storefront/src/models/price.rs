// storefront/src/models/price.rs

//! Prices travel as decimal strings (`"45.00"`) on the wire and in the
//! schema; arithmetic happens in integer cents.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid price '{0}': expected a non-negative amount with at most two decimals")]
pub struct InvalidPrice(pub String);

pub fn parse_cents(raw: &str) -> Result<i64, InvalidPrice> {
  let invalid = || InvalidPrice(raw.to_string());
  let trimmed = raw.trim();
  let (whole, frac) = match trimmed.split_once('.') {
    Some((whole, frac)) => (whole, frac),
    None => (trimmed, ""),
  };
  if whole.is_empty() || frac.len() > 2 {
    return Err(invalid());
  }
  if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
    return Err(invalid());
  }

  let whole: i64 = whole.parse().map_err(|_| invalid())?;
  let frac: i64 = match frac.len() {
    0 => 0,
    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
    _ => frac.parse().map_err(|_| invalid())?,
  };
  whole.checked_mul(100).and_then(|c| c.checked_add(frac)).ok_or_else(invalid)
}

pub fn format_cents(cents: i64) -> String {
  let sign = if cents < 0 { "-" } else { "" };
  let abs = cents.unsigned_abs();
  format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_seed_style_prices() {
    assert_eq!(parse_cents("45.00"), Ok(4500));
    assert_eq!(parse_cents("450.00"), Ok(45000));
    assert_eq!(parse_cents("25"), Ok(2500));
    assert_eq!(parse_cents("0.5"), Ok(50));
    assert_eq!(parse_cents(" 12.34 "), Ok(1234));
  }

  #[test]
  fn rejects_malformed_prices() {
    for raw in ["", ".50", "1.234", "-4.00", "abc", "4,00", "1.2.3", "+5"] {
      assert!(parse_cents(raw).is_err(), "{raw:?} should be rejected");
    }
  }

  #[test]
  fn formats_two_decimals() {
    assert_eq!(format_cents(0), "0.00");
    assert_eq!(format_cents(2500), "25.00");
    assert_eq!(format_cents(12345), "123.45");
    assert_eq!(format_cents(7), "0.07");
  }
}
