//! # Transition Function
//!
//! `(snapshot, intent) -> snapshot`. Pure, total, and never fails.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Intent              Field(s) replaced                                  │
//! │  ──────────────────  ─────────────────────────────────────────────────  │
//! │  SetProduct          product, selected_item (legacy sku fallback)       │
//! │                      query only if refresh_query_on_set_product         │
//! │  SetHover            is_hovering                                        │
//! │  SetLoading          is_loading                                         │
//! │  SetQuantity         selected_quantity (no clamping)                    │
//! │  SetProductQuery     query (bypasses derivation)                        │
//! │  Unknown             nothing: the snapshot comes back unchanged         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Inconsistencies
//! Two behaviors are kept on purpose and switchable through
//! [`TransitionOptions`]:
//! - `SetProduct` without a variant falls back to the deprecated
//!   `product.sku` field
//! - `SetProduct` does not re-derive `query`; the query of the first product
//!   sticks until a `SetProductQuery` arrives

use serde::{Deserialize, Serialize};

use crate::intent::Intent;
use crate::query::build_product_query;
use crate::types::{Product, Sku, Snapshot};

// =============================================================================
// Transition Options
// =============================================================================

/// Switches for the two legacy behaviors of the transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionOptions {
    /// Use `product.sku` when no variant is given.
    pub legacy_sku_fallback: bool,

    /// Re-derive `query` from the new product on `SetProduct`.
    pub refresh_query_on_set_product: bool,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        TransitionOptions {
            legacy_sku_fallback: true,
            refresh_query_on_set_product: false,
        }
    }
}

impl TransitionOptions {
    /// Variant used when the caller did not pick one.
    pub(crate) fn fallback_item(&self, product: &Product) -> Option<Sku> {
        if self.legacy_sku_fallback {
            product.sku.clone()
        } else {
            None
        }
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// Applies an intent with the default options.
///
/// ## Example
/// ```rust
/// use summary_core::{reduce, Intent, Product, ProviderProps, Snapshot};
///
/// let product = Product {
///     product_id: "1".to_string(),
///     product_name: "Mug".to_string(),
///     link_text: None,
///     brand: None,
///     items: vec![],
///     sku: None,
///     selected_properties: None,
/// };
/// let state = Snapshot::initial(ProviderProps::new(product));
/// let next = reduce(&state, Intent::SetQuantity { quantity: 3 });
///
/// assert_eq!(next.selected_quantity, 3);
/// assert_eq!(state.selected_quantity, 1);
/// ```
pub fn reduce(state: &Snapshot, intent: Intent) -> Snapshot {
    reduce_with(state, intent, &TransitionOptions::default())
}

/// Applies an intent, returning the next snapshot.
pub fn reduce_with(state: &Snapshot, intent: Intent, options: &TransitionOptions) -> Snapshot {
    match intent {
        Intent::SetProduct {
            product,
            selected_item,
        } => {
            let selected_item = selected_item.or_else(|| options.fallback_item(&product));
            let query = if options.refresh_query_on_set_product {
                build_product_query(product.selected_properties.as_deref())
            } else {
                state.query.clone()
            };

            Snapshot {
                product,
                selected_item,
                query,
                ..state.clone()
            }
        }
        Intent::SetHover { is_hovering } => Snapshot {
            is_hovering,
            ..state.clone()
        },
        Intent::SetLoading { is_loading } => Snapshot {
            is_loading,
            ..state.clone()
        },
        Intent::SetQuantity { quantity } => Snapshot {
            selected_quantity: quantity,
            ..state.clone()
        },
        Intent::SetProductQuery { query } => Snapshot {
            query: Some(query),
            ..state.clone()
        },
        Intent::Unknown => state.clone(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
