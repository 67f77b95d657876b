//! stash - personal attribute/note store core.
//!
//! This library provides the core functionality for stash:
//! - Data model (Attr records with a tagged Value payload)
//! - SQLite record store (insert, edit, alias, mark, soft delete)
//! - Identifier resolution (tiered alias/id fallback matching)
//! - Filtered, ranked listing
//! - Match highlighting for display
//! - External editor round trip and configuration
//!
//! The CLI binary is a thin layer over these modules; the core never
//! touches the terminal.

pub mod config;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod listing;
pub mod models;
pub mod resolve;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{StashError, StashResult};
pub use highlight::{HighlightOptions, HighlightStyle};
pub use listing::{ListOptions, OrderPolicy, NO_LIMIT};
pub use models::{Attr, Value};
pub use resolve::{resolve, ResolveMode};
pub use store::Store;
