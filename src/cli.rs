//! Command-line interface implementation for dprender.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::batch::Settings;
use crate::constants::{DEFAULT_OUTPUT_ROOT, DEFAULT_TEMPLATE_ROOT};

/// Command-line arguments structure for dprender.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render Terraform templates from data product YAML config files.",
    long_about = None
)]
pub struct Args {
    /// Environment name (one of: dev, test, prod)
    #[arg(value_name = "ENVIRONMENT")]
    pub environment: String,

    /// Data product YAML config file or folder containing data product YAML config files
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Directory holding the template tree
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_TEMPLATE_ROOT)]
    pub templates: PathBuf,

    /// Directory receiving one rendered tree per config file
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_ROOT)]
    pub output: PathBuf,

    /// Stop at the first config file that fails instead of rendering the rest
    #[arg(long)]
    pub fail_fast: bool,

    /// Fail on template variables that are not defined
    #[arg(long)]
    pub strict: bool,

    /// Check that data product names are present and unique before rendering
    #[arg(long)]
    pub check_names: bool,
}

impl Args {
    /// Run-wide settings derived from the arguments.
    pub fn settings(&self) -> Settings {
        Settings {
            template_root: self.templates.clone(),
            output_root: self.output.clone(),
            fail_fast: self.fail_fast,
            strict: self.strict,
            check_names: self.check_names,
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
