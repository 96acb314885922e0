//! Error handling for dprender.
//! Defines the error type and result alias used throughout the crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// The configuration file is not valid YAML.
    #[error("Failed to parse configuration file '{path}'. Original error: {source}")]
    ConfigParseError { path: String, source: serde_yaml::Error },

    /// The configuration file parsed, but its top level is not a mapping.
    #[error("Configuration file '{path}' must contain a mapping, found {found}.")]
    InvalidDocument { path: String, found: String },

    #[error("Failed to render template '{template}'. Original error: {source}")]
    TemplateRenderError { template: String, source: minijinja::Error },

    #[error("Cannot proceed: template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Failed to walk the template directory. Original error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Failed to parse .templateignore file. Original error: {0}")]
    IgnoreError(#[from] globset::Error),

    #[error("Data product name validation failed:\n{0}")]
    NameValidationError(String),

    #[error("{failed} of {total} configuration files failed to render.")]
    BatchError { failed: usize, total: usize },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
