//! # Error Types
//!
//! Error types for the product summary.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ContextMissingError  - accessor used outside an active provider        │
//! │  ConfigError          - props/config could not be parsed                │
//! │                                                                         │
//! │  The transition function and query derivation are total: they have      │
//! │  no error type at all.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ContextMissingError` is an integration bug (a consumer mounted outside
//! its provider). It is surfaced as a typed error so the caller decides
//! whether to panic, but nothing here tries to recover from it.

use thiserror::Error;

// =============================================================================
// Context Missing
// =============================================================================

/// An accessor was called with no enclosing provider.
///
/// ## When This Occurs
/// - `use_product_summary()` called outside `ProductSummaryProvider::provide`
/// - `use_product_summary_dispatch()` called outside a provider scope
/// - A `SummaryHandle` used after its provider was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{accessor} must be used within a ProductSummaryProvider")]
pub struct ContextMissingError {
    /// Name of the accessor that failed.
    pub accessor: &'static str,
}

impl ContextMissingError {
    /// Creates the error for the named accessor.
    pub const fn new(accessor: &'static str) -> Self {
        ContextMissingError { accessor }
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Provider props or configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document was malformed or had the wrong shape.
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
