//! # Product Query
//!
//! Turns a product's selected properties into a query string that the
//! product page link carries, so the page can restore the customer's
//! choices.
//!
//! ```text
//! [{key: "color", value: "red"}, {key: "size", value: "M"}]
//!                         │
//!                         ▼
//!       property__color=red&property__size=M
//! ```
//!
//! Encoding is the strict URI-component form: only `A-Z a-z 0-9 - _ . ~`
//! stay literal, so a space becomes `%20` (never `+`) and `*` becomes `%2A`.

use url::form_urlencoded;

use crate::types::SelectedProperty;

/// Prefix every property key gets in the query.
pub const PROPERTY_PREFIX: &str = "property__";

/// Builds the product query for a list of selected properties.
///
/// Returns `None` when there is no list or it is empty. Pairs keep the
/// order of the input; a key listed twice is emitted twice.
///
/// ## Example
/// ```rust
/// use summary_core::query::build_product_query;
/// use summary_core::SelectedProperty;
///
/// let props = vec![
///     SelectedProperty::new("color", "red"),
///     SelectedProperty::new("size", "M"),
/// ];
/// assert_eq!(
///     build_product_query(Some(&props)).as_deref(),
///     Some("property__color=red&property__size=M"),
/// );
/// assert_eq!(build_product_query(None), None);
/// ```
pub fn build_product_query(properties: Option<&[SelectedProperty]>) -> Option<String> {
    let properties = properties.filter(|p| !p.is_empty())?;

    let pairs: Vec<String> = properties
        .iter()
        .map(|property| {
            format!(
                "{}={}",
                encode_component(&format!("{}{}", PROPERTY_PREFIX, property.key)),
                encode_component(&property.value)
            )
        })
        .collect();

    Some(pairs.join("&"))
}

/// Percent-encodes one key or value.
///
/// `byte_serialize` implements the form encoding, which differs from the
/// URI-component encoding in three spots: space, `*` and `~`.
fn encode_component(input: &str) -> String {
    form_urlencoded::byte_serialize(input.as_bytes())
        .map(|chunk| match chunk {
            "+" => "%20".to_string(),
            "%7E" => "~".to_string(),
            run => run.replace('*', "%2A"),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
