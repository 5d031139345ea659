//! leapwatch CLI
//!
//! Watches the IERS Bulletin C and posts a Gotify message when it changes.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use leapwatch::{
    error::Result,
    models::Config,
    pipeline::{UpdateChecker, run_periodic},
};

/// leapwatch - IERS Bulletin C change notifier
#[derive(Parser, Debug)]
#[command(name = "leapwatch", version, about = "IERS Bulletin C change notifier")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Run the startup check once and exit
    #[arg(long)]
    once: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    log::info!("Loaded configuration from {}", cli.config.display());

    let checker = UpdateChecker::from_config(&config)?;

    if cli.once {
        let outcome = checker.initial_check().await?;
        log::info!("Check finished: {:?}", outcome);
        return Ok(());
    }

    run_periodic(checker, config.check_interval()).await;
    Ok(())
}

/// Accept the Go-style `-config <path>` and `-config=<path>` spellings.
///
/// clap would read `-config` as `-c onfig`, so these are rewritten to
/// `--config` before parsing. Arguments after `--` are left alone.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut after_separator = false;
    args.into_iter()
        .map(|arg| {
            if after_separator {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    after_separator = true;
                    arg
                }
                Some("-config") => OsString::from("--config"),
                Some(s) if s.starts_with("-config=") => OsString::from(format!("-{s}")),
                _ => arg,
            }
        })
        .collect()
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
