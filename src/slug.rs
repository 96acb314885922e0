//! Conversion of free-text data product names into resource-safe slugs.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::constants::defaults;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("valid slug pattern"));

/// Standardises a data product name using `-` as the replacement character.
///
/// See [`standardise_with`].
pub fn standardise(name: Option<&str>) -> String {
    standardise_with(name, "-")
}

/// Lower-cases `name` and replaces every character outside `[a-zA-Z0-9]` with
/// `replacement`, one replacement per character.
///
/// A missing or empty name yields the default slug `demo-data-product`.
///
/// # Example
/// ```
/// use dprender::slug::standardise_with;
///
/// assert_eq!(standardise_with(Some("Customer 360"), "_"), "customer_360");
/// assert_eq!(standardise_with(Some("a  b"), "-"), "a--b");
/// ```
pub fn standardise_with(name: Option<&str>, replacement: &str) -> String {
    match name {
        Some(name) if !name.is_empty() => NON_ALPHANUMERIC
            .replace_all(&name.to_lowercase(), NoExpand(replacement))
            .into_owned(),
        _ => defaults::NAME.to_string(),
    }
}
