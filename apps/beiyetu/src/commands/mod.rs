//! # Commands Module
//!
//! The functions a front end calls. Each takes only the state it needs and
//! returns `Result<_, ApiError>` with serializable DTOs.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Product list, search, best price, details, categories
//! ├── comment.rs  ◄─── Post and list comments
//! ├── session.rs  ◄─── Stub login / logout / current user
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! ```rust,ignore
//! // Only needs the catalog
//! search_products(&state.catalog, query).await?;
//!
//! // Needs comments and the session (for the default author)
//! add_comment(&state.comments, &state.session, product_id, None, text)?;
//! ```

pub mod comment;
pub mod config;
pub mod product;
pub mod session;

pub use comment::{add_comment, add_comment_with_default, list_comments, CommentDto};
pub use config::get_config;
pub use product::{
    get_best_price, list_categories, load_all_products, load_product_details, search_products,
    CategoryGroupDto, ListingDto, ProductDetailsDto, ProductDto,
};
pub use session::{current_user, login, logout};
