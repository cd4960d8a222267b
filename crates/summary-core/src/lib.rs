//! # summary-core: Pure State Logic for a Product Summary
//!
//! A product summary card tracks which variant of a product is selected,
//! how many units, whether the card is hovered or loading, and a query
//! string built from the customer's selected properties. This crate holds
//! that state and the pure function that moves it forward.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   consumers ──dispatch(Intent)──► summary-provider ──► product group    │
//! │       ▲                                 │                               │
//! │       │                                 ▼                               │
//! │       │            ┌─────────────────────────────────────────┐          │
//! │       │            │       ★ summary-core (THIS CRATE) ★     │          │
//! │       │            │                                         │          │
//! │       │            │   types    intent    reducer    query   │          │
//! │       │            │                                         │          │
//! │       │            │   NO I/O • NO SHARED STATE • PURE       │          │
//! │       │            └────────────────────┬────────────────────┘          │
//! │       └────────── Arc<Snapshot> ◄───────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Sku, Snapshot, provider props
//! - [`intent`] - The closed set of state changes
//! - [`reducer`] - The transition function and its options
//! - [`query`] - Selected-properties query derivation
//! - [`error`] - Error types

pub mod error;
pub mod intent;
pub mod query;
pub mod reducer;
pub mod types;

pub use error::{ConfigError, ConfigResult, ContextMissingError};
pub use intent::Intent;
pub use query::build_product_query;
pub use reducer::{reduce, reduce_with, TransitionOptions};
pub use types::*;

/// Quantity a new summary starts with.
pub const DEFAULT_QUANTITY: i64 = 1;
