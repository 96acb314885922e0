//! Data quality gate over a collection of configuration documents.
//!
//! Every data product must carry a non-blank string `name`, unique across the
//! collection both exactly and ignoring case. The gate is independent of
//! rendering: a collection that fails it still renders file by file.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::config::describe;
use crate::error::{Error, Result};

/// Checks the `name` field of every document.
///
/// # Errors
/// * `Error::NameValidationError` listing every missing, malformed or
///   duplicated name together with the files involved
pub fn validate_names(documents: &[(PathBuf, Value)]) -> Result<()> {
    let mut report = String::new();
    let mut names: Vec<(&str, &Path)> = Vec::new();

    for (path, document) in documents {
        match document.get("name") {
            None => {
                let _ = writeln!(report, "  - {} is missing the 'name' field", path.display());
            }
            Some(Value::Null) => {
                let _ = writeln!(report, "  - {} has a null 'name' field", path.display());
            }
            Some(Value::String(name)) if name.trim().is_empty() => {
                let _ = writeln!(report, "  - {} has an empty 'name' field", path.display());
            }
            Some(Value::String(name)) => names.push((name.as_str(), path.as_path())),
            Some(other) => {
                let _ = writeln!(
                    report,
                    "  - {} has a non-string 'name' field: {}",
                    path.display(),
                    describe(other)
                );
            }
        }
    }

    let mut exact: IndexMap<&str, Vec<&Path>> = IndexMap::new();
    let mut folded: IndexMap<String, Vec<(&str, &Path)>> = IndexMap::new();
    for (name, path) in &names {
        exact.entry(*name).or_default().push(*path);
        folded.entry(name.to_lowercase()).or_default().push((*name, *path));
    }

    for (name, paths) in exact.iter().filter(|(_, paths)| paths.len() > 1) {
        let files: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        let _ = writeln!(
            report,
            "  - '{}' appears {} times in files: {}",
            name,
            paths.len(),
            files.join(", ")
        );
    }

    for (folded_name, entries) in &folded {
        let first = entries[0].0;
        if entries.iter().all(|(name, _)| *name == first) {
            continue;
        }
        let _ = writeln!(
            report,
            "  - Names that resolve to '{}' appear {} times:",
            folded_name,
            entries.len()
        );
        for (name, path) in entries {
            let _ = writeln!(report, "    * '{}' in {}", name, path.display());
        }
    }

    if report.is_empty() {
        Ok(())
    } else {
        Err(Error::NameValidationError(report))
    }
}
