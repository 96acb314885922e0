//! Batch processing of data product configuration files.
//!
//! The input path is either one configuration file or a directory whose
//! immediate `.yaml`/`.yml` entries are processed one after the other.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::config::{is_config_file, load_document, load_optional_document};
use crate::context::map_context;
use crate::error::{Error, Result};
use crate::ignore::parse_ignore_file;
use crate::processor::Processor;
use crate::renderer::MiniJinjaRenderer;
use crate::validation::validate_names;

/// Run-wide settings shared by every file of a batch.
#[derive(Debug, Clone)]
pub struct Settings {
    pub template_root: PathBuf,
    pub output_root: PathBuf,
    /// Stop at the first failing file instead of attempting the rest.
    pub fail_fast: bool,
    /// Treat undefined template variables as errors.
    pub strict: bool,
    /// Run the name-uniqueness gate before rendering.
    pub check_names: bool,
}

/// Result of processing a single configuration file.
#[derive(Debug)]
pub struct FileOutcome {
    pub config: PathBuf,
    pub output: Result<PathBuf>,
}

/// What kind of input the batch was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A single configuration file.
    File,
    /// A file without a configuration extension; nothing was done.
    Skipped,
    /// A directory; may have contained no configuration files.
    Directory,
    /// The input path does not exist.
    Missing,
}

/// Per-file outcomes of one batch run.
#[derive(Debug)]
pub struct BatchReport {
    pub input: InputKind,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    fn new(input: InputKind) -> Self {
        Self { input, outcomes: Vec::new() }
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.output.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Turns the report into an error when any file failed.
    pub fn into_result(self) -> Result<Self> {
        match self.failed() {
            0 => Ok(self),
            failed => Err(Error::BatchError { failed, total: self.outcomes.len() }),
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rendered, {} failed", self.succeeded(), self.failed())
    }
}

/// Lists the configuration files directly inside `dir`, sorted by name.
pub fn find_config_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.is_file() && is_config_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Renders every configuration file reachable from `input`.
///
/// # Arguments
/// * `environment` - Environment label passed to every context
/// * `input` - Configuration file or directory of configuration files
/// * `settings` - Template/output roots and failure policy
///
/// # Returns
/// * `Result<BatchReport>` - Outcome of every attempted file. A missing input
///   path or a directory without configuration files is reported, not an error.
///
/// # Errors
/// * The first per-file error when `settings.fail_fast` is set
/// * `Error::NameValidationError` when the name check is enabled and fails
/// * Errors compiling the template ignore file
pub fn run_batch<P: AsRef<Path>>(
    environment: &str,
    input: P,
    settings: &Settings,
) -> Result<BatchReport> {
    let input = input.as_ref();

    let (kind, config_files) = if input.is_file() {
        if is_config_file(input) {
            (InputKind::File, vec![input.to_path_buf()])
        } else {
            info!("Skipping non-YAML file: {}", input.display());
            return Ok(BatchReport::new(InputKind::Skipped));
        }
    } else if input.is_dir() {
        let files = find_config_files(input)?;
        if files.is_empty() {
            warn!("No YAML files found in {}", input.display());
        }
        (InputKind::Directory, files)
    } else {
        error!("Path not found: {}", input.display());
        return Ok(BatchReport::new(InputKind::Missing));
    };

    if settings.check_names {
        check_names(&config_files)?;
    }

    let renderer = MiniJinjaRenderer::new(&settings.template_root, settings.strict);
    let ignored_patterns = parse_ignore_file(&settings.template_root)?;
    let processor = Processor::new(&renderer, &settings.template_root, &ignored_patterns);

    let mut report = BatchReport::new(kind);
    for config in config_files {
        let output = match render_config(&processor, environment, &config, &settings.output_root)
        {
            Ok(out_dir) => Ok(out_dir),
            Err(err) if settings.fail_fast => return Err(err),
            Err(err) => {
                error!("Failed to process {}: {}", config.display(), err);
                Err(err)
            }
        };
        report.outcomes.push(FileOutcome { config, output });
    }

    Ok(report)
}

/// Maps and renders one configuration file.
fn render_config(
    processor: &Processor<'_>,
    environment: &str,
    config: &Path,
    output_root: &Path,
) -> Result<PathBuf> {
    let document = load_document(config)?;
    let context = map_context(environment, &document);
    processor.process(config, output_root, &context.to_json())
}

/// Empty configuration files carry no name and are left out of the check.
fn check_names(config_files: &[PathBuf]) -> Result<()> {
    let mut documents = Vec::new();
    for path in config_files {
        match load_optional_document(path)? {
            Some(document) => documents.push((path.clone(), document)),
            None => debug!("Skipping empty file {} in name check", path.display()),
        }
    }
    validate_names(&documents)?;
    info!("Data product names of {} files are valid", documents.len());
    Ok(())
}
