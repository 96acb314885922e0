//! File and directory ignore pattern handling for template trees.
//! This module processes the .templateignore file to exclude specific paths
//! from the rendered output, similar to .gitignore functionality.

use std::io::ErrorKind;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

use crate::constants::IGNORE_FILE;
use crate::error::Result;

/// Patterns that are always ignored.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &["**/.DS_Store", IGNORE_FILE];

/// Reads `.templateignore` from the template root and compiles it together
/// with the default patterns.
///
/// # Notes
/// - A missing ignore file yields only the default patterns; any other
///   read error (permissions, invalid UTF-8) is returned
/// - Blank lines and lines starting with `#` are skipped
/// - Patterns match paths relative to the template root, `/`-separated
pub fn parse_ignore_file<P: AsRef<Path>>(template_root: P) -> Result<GlobSet> {
    let ignore_path = template_root.as_ref().join(IGNORE_FILE);
    let mut builder = GlobSetBuilder::new();

    for pattern in DEFAULT_IGNORE_PATTERNS {
        builder.add(Glob::new(pattern)?);
    }

    match std::fs::read_to_string(&ignore_path) {
        Ok(contents) => {
            for line in contents.lines().map(str::trim) {
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                builder.add(Glob::new(line.trim_end_matches('/'))?);
            }
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist", IGNORE_FILE);
        }
        Err(err) => return Err(err.into()),
    }

    Ok(builder.build()?)
}
