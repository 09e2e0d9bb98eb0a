//! # State Module
//!
//! Application state, one focused type per concern. Commands take only the
//! state they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppState (built once in run())                                        │
//! │          │                                                              │
//! │   ┌──────┴─────────┬─────────────────┬──────────────────┐              │
//! │   ▼                ▼                 ▼                  ▼              │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐  │
//! │  │ CatalogState │ │ CommentState │ │ SessionState │ │ ConfigState  │  │
//! │  │              │ │              │ │              │ │              │  │
//! │  │ Database     │ │ Arc<Mutex<   │ │ Arc<Mutex<   │ │ currency     │  │
//! │  │ watch::Sender│ │  HashMap>>   │ │  Option>>    │ │ author       │  │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: pool is thread-safe, snapshots behind watch channels  │
//! │  • CommentState / SessionState: Arc<Mutex<T>>                          │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod comments;
mod config;
mod session;

pub use catalog::{CatalogState, DetailsSnapshot, ProductsSnapshot};
pub use comments::CommentState;
pub use config::ConfigState;
pub use session::SessionState;

use beiyetu_db::Database;

/// Every piece of state the commands need, built together.
#[derive(Debug)]
pub struct AppState {
    pub catalog: CatalogState,
    pub comments: CommentState,
    pub session: SessionState,
    pub config: ConfigState,
}

impl AppState {
    pub fn new(db: Database, config: ConfigState) -> Self {
        AppState {
            catalog: CatalogState::new(db),
            comments: CommentState::new(),
            session: SessionState::new(),
            config,
        }
    }
}
