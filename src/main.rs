//! dprender's main application entry point.
//! Handles command-line argument parsing and hands the input over to the
//! batch driver.

use dprender::{
    batch::run_batch,
    cli::{get_args, Args},
    constants::KNOWN_ENVIRONMENTS,
    error::{default_error_handler, Result},
    logger::init_logger,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.debug);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Warns about environment labels the templates are not written for
/// 2. Renders the input file or directory
/// 3. Fails the run if any configuration file failed
fn run(args: Args) -> Result<()> {
    let environment = args.environment.to_lowercase();
    if !KNOWN_ENVIRONMENTS.contains(&environment.as_str()) {
        log::warn!(
            "Unknown environment '{}', expected one of: {}",
            args.environment,
            KNOWN_ENVIRONMENTS.join(", ")
        );
    }

    let report = run_batch(&args.environment, &args.input, &args.settings())?.into_result()?;
    if !report.outcomes.is_empty() {
        log::info!("Data product rendering completed: {}.", report);
    }
    Ok(())
}
