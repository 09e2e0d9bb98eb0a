//! # Validation Module
//!
//! Input validation utilities for Bei Yetu.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command (apps/beiyetu)                                       │
//! │  └── THIS MODULE: comment text, product id, email                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Seeder (beiyetu-db)                                          │
//! │  └── THIS MODULE: names, prices, store URLs of default data            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use beiyetu_core::validation::{parse_product_id, validate_comment_text};
//!
//! assert!(validate_comment_text("Great deal").is_ok());
//! assert_eq!(parse_product_id(" 3 ").unwrap(), 3);
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (category, subcategory, store, product).
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates the body of a comment.
///
/// Blank text is the only thing rejected. The text is stored exactly as
/// given; it is not trimmed and has no length limit.
pub fn validate_comment_text(text: &str) -> ValidationResult<()> {
    if text.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "comment".to_string(),
        });
    }

    Ok(())
}

/// Validates an email for the stub sign-in.
///
/// ## Rules
/// - Must not be blank
/// - Exactly one `@`, with text on both sides
/// - Domain part contains a dot that is neither first nor last
///
/// ## Example
/// ```rust
/// use beiyetu_core::validation::validate_email;
///
/// assert!(validate_email("wanjiru@example.co.ke").is_ok());
/// assert!(validate_email("wanjiru@localhost").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return Err(invalid("must contain '@'")),
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain"));
    }

    if domain.starts_with('.') || domain.ends_with('.') || !domain.contains('.') {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

/// Validates a store website URL.
///
/// ## Rules
/// - Must start with `http://` or `https://`
/// - Must have something after the scheme
pub fn validate_website_url(url: &str) -> ValidationResult<()> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "website_url".to_string(),
            reason: "must be an http(s) URL".to_string(),
        }),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
///
/// ## Example
/// ```rust
/// use beiyetu_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(5_799_900).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Parses a product id as typed by a user or carried by a comment key.
///
/// ## Rules
/// - Must be a positive integer (SQLite rowids start at 1)
pub fn parse_product_id(raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(_) => Err(ValidationError::OutOfRange {
            field: "product id".to_string(),
            min: 1,
            max: i64::MAX,
        }),
        Err(_) => Err(ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: "must be a number".to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
