//! # Configuration State
//!
//! Display settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BEIYETU_*`)
//! 2. Defaults (this file)
//!
//! The database location is resolved separately in `lib.rs`
//! (`--db`, then `BEIYETU_DB_PATH`, then the platform data directory).
//!
//! ## Thread Safety
//! Read-only after initialization, so no mutex.

use serde::{Deserialize, Serialize};

use beiyetu_core::{Money, ANONYMOUS_AUTHOR};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Symbol on every price label
    pub currency_symbol: String,

    /// Author used for comments when nobody is signed in
    pub default_author: String,
}

impl Default for ConfigState {
    /// Kenyan shillings, anonymous comments.
    fn default() -> Self {
        ConfigState {
            currency_symbol: "KSh".to_string(),
            default_author: ANONYMOUS_AUTHOR.to_string(),
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BEIYETU_CURRENCY_SYMBOL`: Override currency symbol
    /// - `BEIYETU_DEFAULT_AUTHOR`: Override the anonymous comment author
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(symbol) = non_blank("BEIYETU_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol.trim().to_string();
        }

        if let Some(author) = non_blank("BEIYETU_DEFAULT_AUTHOR") {
            config.default_author = author.trim().to_string();
        }

        config
    }

    /// Formats a price with the configured symbol. Used for every
    /// `price_display` label.
    ///
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(5_799_900)), "KSh 57,999.00");
    /// ```
    pub fn format_currency(&self, price: Money) -> String {
        price.format_with_symbol(&self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn format(config: &ConfigState, cents: i64) -> String {
        config.format_currency(Money::from_cents(cents))
    }

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(format(&config, 5_799_900), "KSh 57,999.00");
        assert_eq!(format(&config, 9_999), "KSh 99.99");
        assert_eq!(format(&config, 1), "KSh 0.01");
        assert_eq!(format(&config, 0), "KSh 0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(format(&config, -550), "-KSh 5.50");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BEIYETU_CURRENCY_SYMBOL", " USh "),
            ("BEIYETU_DEFAULT_AUTHOR", "   "),
        ]
        .into_iter()
        .collect();

        let config = ConfigState::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.currency_symbol, "USh");
        assert_eq!(config.default_author, "Anonymous");
        assert_eq!(format(&config, 100_000), "USh 1,000.00");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(ConfigState::default()).unwrap();
        assert_eq!(json["currencySymbol"], "KSh");
        assert_eq!(json["defaultAuthor"], "Anonymous");
    }
}
