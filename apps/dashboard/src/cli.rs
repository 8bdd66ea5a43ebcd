//! Command-line argument parsing and usage output.

use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// What the process was asked to do.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Invocation {
    Run(Options),
    Help,
    Version,
}

/// Options for an interactive session.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Options {
    /// Explicit config file; the platform default is used otherwise.
    pub config: Option<PathBuf>,

    /// Overrides `dashboard.initial_view`.
    pub view: Option<String>,
}

/// Parse raw command-line arguments.
pub fn parse(args: Vec<String>) -> AppResult<Invocation> {
    let mut options = Options::default();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => return Ok(Invocation::Help),
            "-V" | "--version" => return Ok(Invocation::Version),
            "-c" | "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| AppError::usage("--config requires a path"))?;
                options.config = Some(PathBuf::from(path));
            }
            "--view" => {
                let view = iter
                    .next()
                    .ok_or_else(|| AppError::usage("--view requires a view name"))?;
                options.view = Some(view);
            }
            other => {
                return Err(AppError::usage(format!("unknown argument: {other}")));
            }
        }
    }

    Ok(Invocation::Run(options))
}

/// Print the top-level usage text.
pub fn print_usage() {
    eprintln!(
        "Usage: stockwise-dashboard [--config <path>] [--view <name>]\n\
         \n\
         Options:\n\
           -c, --config <path>  Client config file (TOML)\n\
               --view <name>    Initial view: dashboard, catalog, advisor, reports, settings\n\
           -h, --help           Show this help\n\
           -V, --version        Show version\n\
         \n\
         Environment:\n\
           STOCKWISE_API_URL    Backend base URL (default http://127.0.0.1:5000/api)\n\
           RUST_LOG             Log filter (logs go to stderr)\n"
    );
}
