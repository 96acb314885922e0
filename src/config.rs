//! Loading of data product configuration documents.
//! Documents are YAML files with `name`, `description`, `classification`,
//! `owner` and `users` keys; every key is optional.

use std::path::Path;

use log::{debug, warn};
use serde_yaml::Value;

use crate::constants::CONFIG_EXTENSIONS;
use crate::error::{Error, Result};

/// Returns true when the path carries a `.yaml` or `.yml` extension.
pub fn is_config_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext))
}

/// Parses configuration text, returning `None` for an empty document.
///
/// `path` is only used for error messages. A non-mapping top level is
/// rejected.
pub fn parse_optional_document(content: &str, path: &Path) -> Result<Option<Value>> {
    let value: Value = serde_yaml::from_str(content).map_err(|source| {
        Error::ConfigParseError { path: path.display().to_string(), source }
    })?;

    match value {
        Value::Mapping(_) => Ok(Some(value)),
        Value::Null => Ok(None),
        other => Err(Error::InvalidDocument {
            path: path.display().to_string(),
            found: describe(&other).to_string(),
        }),
    }
}

/// Parses configuration text into a generic document.
///
/// An empty document is accepted and becomes an empty mapping, so every
/// field takes its default.
pub fn parse_document(content: &str, path: &Path) -> Result<Value> {
    match parse_optional_document(content, path)? {
        Some(value) => Ok(value),
        None => {
            warn!("Configuration file '{}' is empty, using defaults", path.display());
            Ok(Value::Mapping(Default::default()))
        }
    }
}

/// Reads the configuration file at `path`, `None` when it is empty.
pub fn load_optional_document<P: AsRef<Path>>(path: P) -> Result<Option<Value>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    parse_optional_document(&content, path)
}

/// Reads and parses the configuration file at `path`.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let document = parse_document(&content, path)?;
    debug!("Loaded YAML file: {}", path.display());
    Ok(document)
}

/// Human readable name of a YAML node kind.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
