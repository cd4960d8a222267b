//! # Intents
//!
//! The closed set of state-change requests a product summary accepts.
//!
//! ## Wire Shape
//! Intents coming from the frontend use the action shape the storefront
//! components already emit:
//! ```json
//! { "type": "SET_QUANTITY", "args": { "quantity": 3 } }
//! ```
//! Any `type` this crate does not know becomes [`Intent::Unknown`], which the
//! reducer answers with the unchanged snapshot.

use serde::{Deserialize, Serialize};

use crate::types::{Product, Sku};

/// A described state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "args",
    rename_all = "SCREAMING_SNAKE_CASE",
    try_from = "RawIntent"
)]
pub enum Intent {
    /// Replace the product (and its selected variant).
    #[serde(rename_all = "camelCase")]
    SetProduct {
        product: Product,
        selected_item: Option<Sku>,
    },

    #[serde(rename_all = "camelCase")]
    SetHover { is_hovering: bool },

    #[serde(rename_all = "camelCase")]
    SetLoading { is_loading: bool },

    /// No bounds checking: zero and negative values are stored as-is.
    SetQuantity { quantity: i64 },

    /// Overwrite the derived query with an externally computed one.
    SetProductQuery { query: String },

    /// An action type this crate does not handle.
    Unknown,
}

impl Intent {
    /// Action type name, as used on the wire and in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::SetProduct { .. } => "SET_PRODUCT",
            Intent::SetHover { .. } => "SET_HOVER",
            Intent::SetLoading { .. } => "SET_LOADING",
            Intent::SetQuantity { .. } => "SET_QUANTITY",
            Intent::SetProductQuery { .. } => "SET_PRODUCT_QUERY",
            Intent::Unknown => "UNKNOWN",
        }
    }
}

// =============================================================================
// Wire Decoding
// =============================================================================

/// Undecoded action: the type tag plus whatever args came with it.
#[derive(Deserialize)]
struct RawIntent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    args: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetProductArgs {
    product: Product,
    #[serde(default)]
    selected_item: Option<Sku>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetHoverArgs {
    is_hovering: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetLoadingArgs {
    is_loading: bool,
}

#[derive(Deserialize)]
struct SetQuantityArgs {
    quantity: i64,
}

#[derive(Deserialize)]
struct SetProductQueryArgs {
    query: String,
}

impl TryFrom<RawIntent> for Intent {
    type Error = serde_json::Error;

    fn try_from(raw: RawIntent) -> Result<Self, Self::Error> {
        let intent = match raw.kind.as_str() {
            "SET_PRODUCT" => {
                let args: SetProductArgs = serde_json::from_value(raw.args)?;
                Intent::SetProduct {
                    product: args.product,
                    selected_item: args.selected_item,
                }
            }
            "SET_HOVER" => {
                let args: SetHoverArgs = serde_json::from_value(raw.args)?;
                Intent::SetHover {
                    is_hovering: args.is_hovering,
                }
            }
            "SET_LOADING" => {
                let args: SetLoadingArgs = serde_json::from_value(raw.args)?;
                Intent::SetLoading {
                    is_loading: args.is_loading,
                }
            }
            "SET_QUANTITY" => {
                let args: SetQuantityArgs = serde_json::from_value(raw.args)?;
                Intent::SetQuantity {
                    quantity: args.quantity,
                }
            }
            "SET_PRODUCT_QUERY" => {
                let args: SetProductQueryArgs = serde_json::from_value(raw.args)?;
                Intent::SetProductQuery { query: args.query }
            }
            _ => Intent::Unknown,
        };
        Ok(intent)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_set_quantity() {
        let intent: Intent =
            serde_json::from_str(r#"{"type": "SET_QUANTITY", "args": {"quantity": 3}}"#).unwrap();
        assert_eq!(intent, Intent::SetQuantity { quantity: 3 });
    }

    #[test]
    fn test_decode_set_hover_camel_case() {
        let intent: Intent =
            serde_json::from_str(r#"{"type": "SET_HOVER", "args": {"isHovering": true}}"#)
                .unwrap();
        assert_eq!(intent, Intent::SetHover { is_hovering: true });
    }

    #[test]
    fn test_decode_set_product_without_variant() {
        let intent: Intent = serde_json::from_str(
            r#"{"type": "SET_PRODUCT", "args": {"product": {"productId": "7"}}}"#,
        )
        .unwrap();

        match intent {
            Intent::SetProduct {
                product,
                selected_item,
            } => {
                assert_eq!(product.product_id, "7");
                assert!(selected_item.is_none());
            }
            other => panic!("unexpected intent: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_decodes_to_unknown() {
        let intent: Intent =
            serde_json::from_str(r#"{"type": "SET_COLOR", "args": {"color": "red"}}"#).unwrap();
        assert_eq!(intent, Intent::Unknown);

        let intent: Intent = serde_json::from_str(r#"{"type": "RESET"}"#).unwrap();
        assert_eq!(intent, Intent::Unknown);
    }

    #[test]
    fn test_known_type_with_bad_args_is_rejected() {
        let result = serde_json::from_str::<Intent>(
            r#"{"type": "SET_QUANTITY", "args": {"quantity": "three"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_uses_action_shape() {
        let json = serde_json::to_value(Intent::SetLoading { is_loading: true }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "SET_LOADING", "args": {"isLoading": true}})
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Intent::SetQuantity { quantity: 1 }.kind(), "SET_QUANTITY");
        assert_eq!(
            Intent::SetProductQuery {
                query: String::new()
            }
            .kind(),
            "SET_PRODUCT_QUERY"
        );
        assert_eq!(Intent::Unknown.kind(), "UNKNOWN");
    }
}
