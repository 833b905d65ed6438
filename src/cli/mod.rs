//! cli
//!
//! Command-line interface layer for valexport.
//!
//! # Responsibilities
//!
//! - Parse arguments; bad usage exits 1 before anything else runs
//! - Initialise logging
//! - Load configuration and construct the real collaborators
//! - Run the pipeline and map its outcome to an exit status
//!
//! This is the only place that decides how the process ends.

pub mod args;

pub use args::Cli;

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::error::ErrorKind;

use crate::build::DntBuilder;
use crate::core::config::{self, Overrides};
use crate::credentials::{Environment, ProcessEnv};
use crate::engine::Pipeline;
use crate::remote::ValTownClient;
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> ExitCode {
    run_from(std::env::args_os(), &ProcessEnv)
}

/// Run with an explicit argument list and environment.
pub fn run_from<I, T>(args: I, env: &dyn Environment) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_args(args) {
        Ok(cli) => cli,
        Err(e) => {
            // help and version go to stdout; everything else is bad usage
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    init_tracing(verbosity);

    match execute(&cli, env, verbosity) {
        Ok(code) => code,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Install the `tracing` subscriber. `RUST_LOG` overrides the level.
pub fn init_tracing(verbosity: Verbosity) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    // a subscriber may already be installed when run in-process
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn execute(cli: &Cli, env: &dyn Environment, verbosity: Verbosity) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let loaded = config::load(cli.config.as_deref(), env, &cwd)
        .context("Failed to load configuration")?;
    if let Some(path) = &loaded.path {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    let config = loaded.config.apply_overrides(Overrides {
        out_dir: cli.out_dir.clone(),
        token_var: cli.token_var.clone(),
    })?;

    let source = ValTownClient::with_api_base(&config.api_base);
    let builder = DntBuilder::new(&config.deno, &config.dnt_module);
    let pipeline = Pipeline {
        source: &source,
        builder: &builder,
        env,
        config: &config,
    };

    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    match rt.block_on(pipeline.run(&cli.url)) {
        Ok(report) => {
            output::success(output::build_successful(&report.out_dir), verbosity);
            Ok(ExitCode::SUCCESS)
        }
        // already reported by the step's fault handler
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
