//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  As doubles:                                                            │
//! │    999.99 + 0.01 might print as 999.9999999999999  ❌                   │
//! │    Two "equal" prices can compare unequal                               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    99999 cents + 1 cent = 100000 cents                                 │
//! │    Equality and ordering are exact, so "cheapest store" is exact       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use beiyetu_core::money::Money;
//!
//! let list_price = Money::from_cents(5_999_999);
//! let store_price = Money::from_cents(5_799_900);
//!
//! assert!(store_price < list_price);
//! assert_eq!(list_price.to_string(), "KSh 59,999.99");
//! assert_eq!(store_price.format_with_symbol("USh"), "USh 57,999.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a price in the smallest currency unit (cents of a Kenyan shilling).
///
/// ## Design Decisions
/// - **i64 (signed)**: Matches SQLite INTEGER; the schema keeps stored prices >= 0
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Ord**: Listings are ranked by price, so ordering must be total
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price_cents ────► reference price on the product card          │
/// │                                                                         │
/// │  Listing.price_cents ────► per-store price ──► best price (minimum)     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use beiyetu_core::money::Money;
    ///
    /// let price = Money::from_cents(9999); // KSh 99.99
    /// assert_eq!(price.cents(), 9999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Formats the value with thousands separators and a currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use beiyetu_core::money::Money;
    ///
    /// let price = Money::from_cents(5_999_999);
    /// assert_eq!(price.format_with_symbol("KSh"), "KSh 59,999.99");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{} {}.{:02}", sign, symbol, group_thousands(abs / 100), abs % 100)
    }
}

/// Inserts a comma between every group of three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the price with the Kenyan shilling symbol.
///
/// ## Note
/// Callers with a configured currency should use
/// [`Money::format_with_symbol`] instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("KSh"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(19_999).cents(), 19_999);
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(100_000).format_with_symbol("USh"), "USh 1,000.00");
        assert_eq!(Money::from_cents(5).format_with_symbol("$"), "$ 0.05");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(5_999_999).to_string(), "KSh 59,999.99");
        assert_eq!(Money::from_cents(4_000).to_string(), "KSh 40.00");
        assert_eq!(Money::from_cents(0).to_string(), "KSh 0.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-KSh 5.50");
        assert_eq!(Money::from_cents(10_099_900).to_string(), "KSh 100,999.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_ordering() {
        let mut prices = vec![
            Money::from_cents(6_099_900),
            Money::from_cents(5_799_900),
            Money::from_cents(5_850_000),
        ];
        prices.sort();
        assert_eq!(prices[0].cents(), 5_799_900);
        assert_eq!(prices.iter().max().map(Money::cents), Some(6_099_900));
    }
}
