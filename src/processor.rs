//! Rendering of a template tree into the output directory of one data product.
//!
//! Files ending in `.jinja` are rendered and written without the suffix, every
//! other file is copied byte for byte. The tree is built in a staging
//! directory next to the target and swapped into place once complete, so a
//! failed render never leaves a mix of stale and fresh files behind.

use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use log::{debug, info};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::constants::TEMPLATE_SUFFIX;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;

/// Name of the rendered tree inside a staging directory.
const STAGED_TREE: &str = "tree";

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).map_err(Error::IoError)
}

/// Copies a file, keeping its permissions and modification time.
fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;

    let modified = fs::metadata(source)?.modified()?;
    if let Err(err) = fs::File::open(dest).and_then(|file| file.set_modified(modified)) {
        debug!("Cannot preserve modification time of {}: {}", dest.display(), err);
    }
    Ok(())
}

/// Returns true when `filename` carries the template suffix after a
/// non-empty stem, e.g. `main.tf.jinja`.
pub fn is_template_file(filename: &str) -> bool {
    filename.len() > TEMPLATE_SUFFIX.len() && filename.ends_with(TEMPLATE_SUFFIX)
}

/// Maps a template-relative path to its location under `output_dir`.
///
/// # Returns
/// * `(PathBuf, bool)` - Target path, and whether the source must be rendered
pub fn resolve_target_path<P: AsRef<Path>>(relative_path: P, output_dir: P) -> (PathBuf, bool) {
    let relative_path = relative_path.as_ref();
    let output_dir = output_dir.as_ref();

    match relative_path.file_name().and_then(|n| n.to_str()) {
        Some(filename) if is_template_file(filename) => {
            let stripped = &filename[..filename.len() - TEMPLATE_SUFFIX.len()];
            (output_dir.join(relative_path.with_file_name(stripped)), true)
        }
        _ => (output_dir.join(relative_path), false),
    }
}

/// Output directory of a configuration file: its base name without extension.
pub fn output_dir_for<P: AsRef<Path>>(config_path: P, output_root: P) -> PathBuf {
    let base_name = config_path
        .as_ref()
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    output_root.as_ref().join(base_name)
}

/// Template name as understood by the renderer's loader.
fn template_name(relative_path: &Path) -> String {
    relative_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

/// Renders a template tree for one configuration file at a time.
pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    ignored_patterns: &'a GlobSet,
}

impl<'a> Processor<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        ignored_patterns: &'a GlobSet,
    ) -> Self {
        Self { renderer, template_root, ignored_patterns }
    }

    /// Renders the template tree for `config_path` into
    /// `output_root/<config base name>`, replacing any previous output.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - The output directory that was written
    ///
    /// # Errors
    /// * `Error::TemplateDoesNotExistsError` if the template root is missing
    /// * `Error::TemplateRenderError` if any template fails; previous output
    ///   is left untouched in that case
    pub fn process(
        &self,
        config_path: &Path,
        output_root: &Path,
        context: &serde_json::Value,
    ) -> Result<PathBuf> {
        if !self.template_root.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: self.template_root.display().to_string(),
            });
        }

        let out_dir = output_dir_for(config_path, output_root);
        info!("Rendering templates for {} -> {}", config_path.display(), out_dir.display());

        fs::create_dir_all(output_root)?;
        let staging = staging_dir(output_root, &out_dir)?;
        let tree = staging.path().join(STAGED_TREE);
        fs::create_dir(&tree)?;
        self.render_tree(&tree, context)?;
        replace_dir(staging.path(), &out_dir)?;
        staging.close()?;

        Ok(out_dir)
    }

    /// Writes the rendered tree into `target_dir`, creating directories as
    /// needed.
    pub fn render_tree(&self, target_dir: &Path, context: &serde_json::Value) -> Result<()> {
        let root = self.template_root;
        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let relative_path = relative_to(entry.path(), root);
                if self.ignored_patterns.is_match(relative_path) {
                    debug!("Skipping {} from ignore patterns", relative_path.display());
                    false
                } else {
                    true
                }
            });

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            let relative_path = relative_to(path, root);

            if path.is_dir() {
                fs::create_dir_all(target_dir.join(relative_path))?;
                continue;
            }

            let (target_path, is_template) = resolve_target_path(relative_path, target_dir);
            if is_template {
                let source = fs::read_to_string(path)?;
                let content = self
                    .renderer
                    .render_file(&template_name(relative_path), &source, context)
                    .map_err(|err| match err {
                        Error::TemplateRenderError { source, .. } => Error::TemplateRenderError {
                            template: path.display().to_string(),
                            source,
                        },
                        other => other,
                    })?;
                write_file(&target_path, &content)?;
                info!("Rendered template: {} -> {}", path.display(), target_path.display());
            } else {
                copy_file(path, &target_path)?;
                debug!("Copied file: {} -> {}", path.display(), target_path.display());
            }
        }
        Ok(())
    }
}

fn staging_dir(output_root: &Path, out_dir: &Path) -> Result<TempDir> {
    let prefix = format!(
        ".{}.",
        out_dir.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
    );
    Ok(tempfile::Builder::new().prefix(&prefix).tempdir_in(output_root)?)
}

/// Moves the finished `tree` of a staging directory to `out_dir`.
///
/// An existing `out_dir` is first moved into the staging directory, which is
/// removed by the caller, or moved back if the new tree cannot be placed.
fn replace_dir(staging: &Path, out_dir: &Path) -> Result<()> {
    let tree = staging.join(STAGED_TREE);
    if !out_dir.exists() {
        fs::rename(&tree, out_dir)?;
        return Ok(());
    }

    let previous = staging.join("previous");
    fs::rename(out_dir, &previous)?;
    if let Err(err) = fs::rename(&tree, out_dir) {
        fs::rename(&previous, out_dir)?;
        return Err(err.into());
    }
    debug!("Removed existing output directory: {}", out_dir.display());
    Ok(())
}
