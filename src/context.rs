//! Mapping of configuration documents into rendering contexts.
//!
//! Every lookup is total: a missing key, a `null` value, or a missing or
//! non-mapping ancestor (for example a document without `owner`) resolves to
//! the documented default instead of failing.

use std::io;

use log::{debug, warn};
use serde::Serialize;
use serde_yaml::Value;

use crate::config::describe;
use crate::constants::defaults;
use crate::slug::standardise;

/// Tags attached to every resource of a data product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataProductTags {
    pub classification: String,
    pub division: String,
    /// Exposed to templates as `data_product_tags["business unit"]`.
    pub business_unit: String,
    /// JSON array text, e.g. `["a@example.com", "b@example.com"]`.
    pub contacts: String,
}

/// Flat set of values made available to templates for one data product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderingContext {
    pub environment: String,
    pub data_product_name: String,
    pub data_product_description: String,
    pub data_product_tags: DataProductTags,
    pub read_only_members: Vec<String>,
    pub modify_members: Vec<String>,
    pub data_product_name_standardised: String,
}

impl RenderingContext {
    /// Converts the context into the value handed to the template engine.
    ///
    /// Field order is kept, so iterating `data_product_tags` in a template
    /// yields classification, division, business unit and contacts.
    pub fn to_json(&self) -> serde_json::Value {
        let tags = &self.data_product_tags;
        serde_json::json!({
            "environment": self.environment,
            "data_product_name": self.data_product_name,
            "data_product_description": self.data_product_description,
            "data_product_tags": {
                "classification": tags.classification,
                "division": tags.division,
                "business unit": tags.business_unit,
                "contacts": tags.contacts,
            },
            "read_only_members": self.read_only_members,
            "modify_members": self.modify_members,
            "data_product_name_standardised": self.data_product_name_standardised,
        })
    }
}

/// Builds the rendering context for one configuration document.
///
/// # Arguments
/// * `environment` - Environment label from the command line, lower-cased here
/// * `document` - Parsed configuration document
pub fn map_context(environment: &str, document: &Value) -> RenderingContext {
    if !lookup(document, &["owner"]).is_some_and(Value::is_mapping) {
        warn!("No owner mapping in configuration, using default ownership tags");
    }

    let name = lookup_str(document, &["name"], defaults::NAME);
    let context = RenderingContext {
        environment: environment.to_lowercase(),
        data_product_name_standardised: standardise(Some(&name)),
        data_product_name: name,
        data_product_description: lookup_str(
            document,
            &["description"],
            defaults::DESCRIPTION,
        ),
        data_product_tags: DataProductTags {
            classification: lookup_str(
                document,
                &["classification"],
                defaults::CLASSIFICATION,
            ),
            division: lookup_str(document, &["owner", "division"], defaults::DIVISION),
            business_unit: lookup_str(
                document,
                &["owner", "business unit"],
                defaults::BUSINESS_UNIT,
            ),
            contacts: lookup_json_list(document, &["owner", "contacts"]),
        },
        read_only_members: lookup_list(document, &["users", "read-only"]),
        modify_members: lookup_list(document, &["users", "modify"]),
    };

    debug!("Mapped context: {:?}", context);
    context
}

/// Follows `path` through nested mappings.
///
/// Returns `None` when any step is missing, `null`, or not a mapping.
pub fn lookup<'a>(document: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut node = document;
    for key in path {
        node = node.as_mapping()?.get(*key)?;
    }
    if node.is_null() {
        None
    } else {
        Some(node)
    }
}

/// Resolves a string field, rendering numbers and booleans as text.
pub fn lookup_str(document: &Value, path: &[&str], default: &str) -> String {
    match lookup(document, path) {
        None => default.to_string(),
        Some(value) => scalar_to_string(value).unwrap_or_else(|| {
            warn!(
                "Expected a string at '{}', found {}, using default",
                path.join("."),
                describe(value)
            );
            default.to_string()
        }),
    }
}

/// Resolves a list of strings, or an empty list when absent.
pub fn lookup_list(document: &Value, path: &[&str]) -> Vec<String> {
    let Some(value) = lookup(document, path) else {
        return Vec::new();
    };
    let Some(items) = value.as_sequence() else {
        warn!(
            "Expected a list at '{}', found {}, using an empty list",
            path.join("."),
            describe(value)
        );
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let text = scalar_to_string(item);
            if text.is_none() {
                warn!("Skipping {} in list '{}'", describe(item), path.join("."));
            }
            text
        })
        .collect()
}

/// Resolves a list and encodes it as JSON array text, `[]` when absent.
pub fn lookup_json_list(document: &Value, path: &[&str]) -> String {
    let Some(value) = lookup(document, path) else {
        return "[]".to_string();
    };
    if !value.is_sequence() {
        warn!(
            "Expected a list at '{}', found {}, using an empty list",
            path.join("."),
            describe(value)
        );
        return "[]".to_string();
    }

    match encode_list(value) {
        Ok(text) => text,
        Err(err) => {
            warn!("Cannot encode '{}' as JSON: {}", path.join("."), err);
            "[]".to_string()
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn encode_list(value: &Value) -> io::Result<String> {
    let json = serde_json::to_value(value).map_err(io::Error::other)?;
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    json.serialize(&mut serializer).map_err(io::Error::other)?;
    String::from_utf8(buf).map_err(io::Error::other)
}

/// Compact JSON with `", "` and `": "` separators.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
