//! # summary-provider: The Product Summary Container
//!
//! Wraps the pure state of `summary-core` in a container with a lifetime:
//! it holds the current snapshot, hands out dispatchers and read access,
//! and keeps the surrounding product group in sync with the selection.
//!
//! ## Pieces
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ProductSummaryProvider ── owns ──► Mutex<Arc<Snapshot>>                │
//! │          │                                                              │
//! │          ├── dispatcher() ──► Dispatch      (weak, cloneable)           │
//! │          ├── handle()     ──► SummaryHandle (weak, cloneable)           │
//! │          ├── provide(f)   ──► use_product_summary()                     │
//! │          │                    use_product_summary_dispatch()            │
//! │          └── owns ──► GroupSynchronizer ──► dyn ProductGroup            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`provider`] - The container and its handles
//! - [`context`] - Thread-scoped accessors
//! - [`group`] - Product group interface and registration
//! - [`config`] - Provider configuration

pub mod config;
pub mod context;
pub mod group;
pub mod provider;

#[cfg(test)]
mod testing;

pub use config::{props_from_json, SummaryConfig};
pub use context::{use_product_summary, use_product_summary_dispatch};
pub use group::{GroupRegistration, ProductGroup};
pub use provider::{Dispatch, ProductSummaryProvider, SummaryHandle};
