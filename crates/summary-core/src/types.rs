//! # Domain Types
//!
//! Product data and the snapshot held by a product summary.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │       Product        │   │       Sku       │   │ SelectedProperty│   │
//! │  │  ──────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  product_id          │   │  item_id        │   │  key            │   │
//! │  │  items: Vec<Sku>  ───┼──►│  name           │   │  value          │   │
//! │  │  sku (legacy)        │   │  ean            │   └─────────────────┘   │
//! │  │  selected_properties │   └─────────────────┘                         │
//! │  └──────────────────────┘                                               │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐  │
//! │  │  Snapshot (immutable, replaced wholesale on every transition)     │  │
//! │  │  product · selected_item · selected_quantity · is_hovering ·      │  │
//! │  │  is_loading · query                                               │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize in camelCase, the shape the storefront frontend
//! already uses.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::query::build_product_query;
use crate::reducer::TransitionOptions;
use crate::DEFAULT_QUANTITY;

// =============================================================================
// Sku
// =============================================================================

/// One purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    /// Variant identifier.
    pub item_id: String,

    /// Display name of the variant (e.g. "Blue / M").
    pub name: String,

    /// Barcode, when the catalog has one.
    #[serde(default)]
    pub ean: Option<String>,
}

// =============================================================================
// Selected Property
// =============================================================================

/// A customer-chosen product property, such as an engraving text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectedProperty {
    pub key: String,
    pub value: String,
}

impl SelectedProperty {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        SelectedProperty {
            key: key.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as shown in a summary card.
///
/// Only the fields this crate reads are typed; everything else about the
/// product is the catalog's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier.
    pub product_id: String,

    /// Display name.
    #[serde(default)]
    pub product_name: String,

    /// Slug used to build the product page link.
    #[serde(default)]
    pub link_text: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,

    /// All variants, in catalog order.
    #[serde(default)]
    pub items: Vec<Sku>,

    /// Legacy single-variant field.
    ///
    /// Older search results carry the pre-selected variant here instead of
    /// passing it alongside the product. Only read when
    /// [`TransitionOptions::legacy_sku_fallback`] is on.
    #[serde(default)]
    pub sku: Option<Sku>,

    /// Properties the customer chose for this product.
    #[serde(default)]
    pub selected_properties: Option<Vec<SelectedProperty>>,
}

impl Product {
    /// First variant in catalog order, if any.
    pub fn first_item(&self) -> Option<&Sku> {
        self.items.first()
    }
}

// =============================================================================
// Provider Props
// =============================================================================

/// Construction-time input of a product summary.
///
/// `product` is required; a missing product is a caller bug and fails
/// deserialization rather than being defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProps {
    pub product: Product,

    #[serde(default)]
    pub selected_item: Option<Sku>,

    /// Treated as `false` when absent.
    #[serde(default)]
    pub is_loading: Option<bool>,
}

impl ProviderProps {
    /// Props for a product with no pre-selected variant.
    pub fn new(product: Product) -> Self {
        ProviderProps {
            product,
            selected_item: None,
            is_loading: None,
        }
    }

    pub fn with_selected_item(mut self, item: Sku) -> Self {
        self.selected_item = Some(item);
        self
    }

    pub fn with_loading(mut self, is_loading: bool) -> Self {
        self.is_loading = Some(is_loading);
        self
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// The state of one product summary at a point in time.
///
/// ## Invariants
/// - Never mutated in place by consumers; every change goes through
///   [`crate::reducer::reduce`] and yields a new value
/// - `query` is `None` whenever the product has no selected properties
/// - `selected_quantity` is exactly what the last `SetQuantity` carried
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub product: Product,

    /// Currently selected variant (`None` until one is known).
    pub selected_item: Option<Sku>,

    pub selected_quantity: i64,

    pub is_hovering: bool,

    pub is_loading: bool,

    /// Derived product query, e.g. `property__color=red&property__size=M`.
    pub query: Option<String>,
}

impl Snapshot {
    /// Builds the first snapshot of a provider using default options.
    pub fn initial(props: ProviderProps) -> Self {
        Self::initial_with(props, &TransitionOptions::default())
    }

    /// Builds the first snapshot of a provider.
    ///
    /// ## Defaults
    /// - `selected_quantity`: 1
    /// - `is_hovering`: false
    /// - `is_loading`: false unless the props say otherwise
    /// - `selected_item`: the props' variant, else the legacy `product.sku`
    ///   when `legacy_sku_fallback` is enabled
    /// - `query`: derived from `product.selected_properties`
    pub fn initial_with(props: ProviderProps, options: &TransitionOptions) -> Self {
        let ProviderProps {
            product,
            selected_item,
            is_loading,
        } = props;

        let selected_item = selected_item.or_else(|| options.fallback_item(&product));
        let query = build_product_query(product.selected_properties.as_deref());

        Snapshot {
            product,
            selected_item,
            selected_quantity: DEFAULT_QUANTITY,
            is_hovering: false,
            is_loading: is_loading.unwrap_or(false),
            query,
        }
    }

    /// Variant to report to the product group: the selected one, else the
    /// first catalog variant.
    pub fn group_item(&self) -> Option<&Sku> {
        self.selected_item
            .as_ref()
            .or_else(|| self.product.first_item())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sku(id: &str) -> Sku {
        Sku {
            item_id: id.to_string(),
            name: format!("Variant {}", id),
            ean: None,
        }
    }

    fn product(id: &str) -> Product {
        Product {
            product_id: id.to_string(),
            product_name: format!("Product {}", id),
            link_text: None,
            brand: None,
            items: vec![sku(&format!("{}-1", id)), sku(&format!("{}-2", id))],
            sku: Some(sku(&format!("{}-legacy", id))),
            selected_properties: None,
        }
    }

    #[test]
    fn test_initial_defaults() {
        let snapshot = Snapshot::initial(ProviderProps::new(product("P1")));

        assert!(!snapshot.is_loading);
        assert!(!snapshot.is_hovering);
        assert_eq!(snapshot.selected_quantity, 1);
        assert_eq!(snapshot.selected_item, Some(sku("P1-legacy")));
        assert_eq!(snapshot.query, None);
    }

    #[test]
    fn test_initial_keeps_explicit_variant_and_loading() {
        let props = ProviderProps::new(product("P1"))
            .with_selected_item(sku("P1-2"))
            .with_loading(true);
        let snapshot = Snapshot::initial(props);

        assert!(snapshot.is_loading);
        assert_eq!(snapshot.selected_item, Some(sku("P1-2")));
    }

    #[test]
    fn test_initial_without_legacy_fallback() {
        let options = TransitionOptions {
            legacy_sku_fallback: false,
            ..TransitionOptions::default()
        };
        let snapshot = Snapshot::initial_with(ProviderProps::new(product("P1")), &options);
        assert_eq!(snapshot.selected_item, None);
    }

    #[test]
    fn test_initial_derives_query() {
        let mut p = product("P1");
        p.selected_properties = Some(vec![SelectedProperty::new("engraving", "Hi Mom")]);
        let snapshot = Snapshot::initial(ProviderProps::new(p));
        assert_eq!(snapshot.query.as_deref(), Some("property__engraving=Hi%20Mom"));
    }

    #[test]
    fn test_group_item_falls_back_to_first_variant() {
        let mut p = product("P1");
        p.sku = None;
        let snapshot = Snapshot::initial(ProviderProps::new(p));

        assert_eq!(snapshot.selected_item, None);
        assert_eq!(snapshot.group_item(), Some(&sku("P1-1")));
    }

    #[test]
    fn test_props_from_json() {
        let props: ProviderProps = serde_json::from_str(
            r#"{
                "product": {
                    "productId": "42",
                    "productName": "Mug",
                    "items": [{"itemId": "42-1", "name": "White"}]
                },
                "isLoading": true
            }"#,
        )
        .unwrap();

        assert_eq!(props.product.product_id, "42");
        assert_eq!(props.product.items.len(), 1);
        assert_eq!(props.selected_item, None);
        assert_eq!(props.is_loading, Some(true));
    }

    #[test]
    fn test_props_require_product() {
        let result = serde_json::from_str::<ProviderProps>(r#"{"isLoading": false}"#);
        assert!(result.is_err());
    }
}
