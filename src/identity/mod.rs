//! Player identity classification.
//!
//! # Data Flow
//! ```text
//! server_admins / server_janitors  → IdentitySets (lowercased)
//! devteam roster                    ┐
//! title roster + title_names        ┴→ IdentityResolver
//!
//! classify(username):
//!     admin → devteam → title → normal   (first match wins)
//! ```
//!
//! # Design Decisions
//! - All matching is case-insensitive
//! - `classify` never reports janitors; authorization checks use
//!   `is_server_admin` / `is_server_janitor` directly

pub mod resolver;

pub use resolver::{Identity, IdentityKind, IdentityResolver, IdentitySets, Nerd};
