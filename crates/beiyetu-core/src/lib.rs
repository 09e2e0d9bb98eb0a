//! # beiyetu-core: Pure Catalog Logic for Bei Yetu
//!
//! This crate is the **heart** of Bei Yetu. It holds the catalog types and
//! every piece of logic that does not need a database: search filtering,
//! grouping by category and best-price selection.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bei Yetu Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Screens (out of scope)                       │   │
//! │  │    Home ──► Categories ──► Search ──► Product Details           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/beiyetu (commands + state)                 │   │
//! │  │    search_products, get_best_price, add_comment, etc.           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ beiyetu-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  filter   │  │   rules   │  │   │
//! │  │   │  Listing  │  │           │  │  group    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  beiyetu-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, seeder                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Category, Product, Listing, ...) and projections
//! - [`money`] - Integer-cents Money type and price formatting
//! - [`catalog`] - Search filter, category grouping, best-price pick
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use beiyetu_core::money::Money;
//!
//! // Prices are stored in cents (never as floats!)
//! let price = Money::from_cents(5_799_900);
//! assert_eq!(price.format_with_symbol("KSh"), "KSh 57,999.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use beiyetu_core::Money` instead of
// `use beiyetu_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Author recorded on a comment when nobody is signed in.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";
