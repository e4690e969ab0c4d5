//  ncrcount: NCR wallet activity log to tax-reporting CSVs

#![forbid(unsafe_code)]

use error_iter::ErrorIter as _;
use is_terminal::IsTerminal as _;
use ncrcount::config::Config;
use ncrcount::errors::{ConfigError, PipelineError};
use ncrcount::pipeline;
use onlyargs::{CliError, OnlyArgs as _};
use onlyargs_derive::OnlyArgs;
use std::path::PathBuf;
use std::{env, process::ExitCode};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

/// Convert an NCR wallet activity log into tax-reporting CSVs.
#[derive(Debug, OnlyArgs)]
#[footer = "Outputs are written next to the transaction file, e.g. `log.txt` produces"]
#[footer = "  `log.csv` and `log-Koinly.csv`."]
#[footer = "Additional environment variables:"]
#[footer = "  - DEPLOYER_TXS is the path to the NCR deployer transactions CSV"]
#[footer = "      default is \"NCR Deployer Transactions.csv\""]
#[footer = "  - MALFORMED_LINES accepts {abort (default), skip}"]
#[footer = "  - EXPORT_DIALECTS is a comma-separated list from {canonical, koinly, tokentax, taxbit}"]
#[footer = "      default is \"canonical,koinly\""]
#[footer = "  - TERM_COLOR accepts \"always\" to override automatic terminal sensing"]
struct Args {
    /// The wallet activity log to convert.
    #[positional]
    input: Vec<PathBuf>,
}

#[derive(Debug, Error)]
enum Error {
    #[error("Argument parsing error")]
    Args(#[from] CliError),

    #[error("Expected exactly one transaction file, got {0}")]
    Usage(usize),

    #[error("Configuration error")]
    Config(#[from] ConfigError),

    #[error("Conversion failed")]
    Pipeline(#[from] PipelineError),
}

fn main() -> ExitCode {
    // Uses the `RUST_LOG` environment var for configuration. E.g. `RUST_LOG=debug cargo run`
    //
    // See: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/struct.EnvFilter.html#directives
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let term_color = env::var("TERM_COLOR")
        .map(|color| color == "always")
        .unwrap_or_else(|_| std::io::stdout().is_terminal());
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(term_color))
        .with(env_filter)
        .init();

    match run(onlyargs::parse()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            if matches!(err, Error::Args(_) | Error::Usage(_)) {
                eprintln!("{}", Args::HELP);
            }

            eprintln!("Error: {err}");
            for source in err.sources().skip(1) {
                eprintln!("  Caused by: {source}");
            }

            ExitCode::FAILURE
        }
    }
}

fn run(args: Result<Args, CliError>) -> Result<(), Error> {
    let args = args?;
    let input = single_input(args.input)?;

    let config = Config::from_env()?;
    debug!("{config:?}");

    let report = pipeline::run(&input, &config)?;

    println!();
    report.stats.pretty_print();

    Ok(())
}

/// Exactly one transaction file must be named.
fn single_input(paths: Vec<PathBuf>) -> Result<PathBuf, Error> {
    let [input] = <[PathBuf; 1]>::try_from(paths).map_err(|paths| Error::Usage(paths.len()))?;

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_input() {
        let input = single_input(vec![PathBuf::from("log.txt")]).unwrap();
        assert_eq!(input, PathBuf::from("log.txt"));

        assert!(matches!(single_input(Vec::new()), Err(Error::Usage(0))));
        assert!(matches!(
            single_input(vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]),
            Err(Error::Usage(2))
        ));
    }

    #[test]
    fn test_help_lists_environment() {
        assert!(Args::HELP.contains("DEPLOYER_TXS"));
        assert!(Args::HELP.contains("EXPORT_DIALECTS"));
    }
}
