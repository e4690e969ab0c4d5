//! One batch run: mint schedule, wallet log, valuations, exports.

use crate::config::Config;
use crate::export::{Dialect, ExportError};
use crate::imports::activity::{read_activity_log, ActivityError};
use crate::model::ledgers::parsed::{assemble, AssembleError};
use crate::model::{MintSchedule, Stats, Transaction};
use crate::valuation::enrich;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid file {0:?}")]
    MissingInput(PathBuf),

    #[error("Error reading file {0:?}")]
    Read(PathBuf, #[source] ActivityError),

    #[error("Unable to parse transactions in {0:?}")]
    Assemble(PathBuf, #[source] AssembleError),

    #[error("Export {0:?} would overwrite the input file")]
    OutputIsInput(PathBuf),

    #[error("Unable to render {0} export")]
    Export(Dialect, #[source] ExportError),

    #[error("Unable to write {0:?}")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct Report {
    pub stats: Stats,
    pub transactions: Vec<Transaction>,
    pub outputs: Vec<PathBuf>,
}

/// Convert the wallet log at `input` into every configured export, written next to it.
///
/// Nothing is written unless the log was read and parsed and every export rendered.
pub fn run(input: &Path, config: &Config) -> Result<Report, PipelineError> {
    if !input.is_file() {
        return Err(PipelineError::MissingInput(input.to_path_buf()));
    }

    let mut stats = Stats::default();

    // Mint values come first; they never stop the run.
    let schedule = load_schedule(&mut stats, &config.deployer_txs);

    println!("Reading transaction file {}", input.display());
    let log = read_activity_log(input).map_err(|err| PipelineError::Read(input.into(), err))?;

    println!("Parsing transactions");
    let mut transactions = assemble(&mut stats, log.lines(), config.malformed_lines)
        .map_err(|err| PipelineError::Assemble(input.into(), err))?;
    println!("  Parsed {} transactions from file", transactions.len());
    if stats.malformed_skipped() > 0 {
        warn!("Skipped {} malformed transaction lines", stats.malformed_skipped());
    }

    if !schedule.is_empty() {
        println!("Calculating prices from deployer transactions");
        let found = enrich(&mut stats, &schedule, &mut transactions);
        println!("  Calculated {found} prices based on deployer transactions");
        if found > 0 {
            warn!("These prices are only an estimate and may not be a correct cost basis");
        }
    }

    let mut rendered = Vec::with_capacity(config.dialects.len());
    for &dialect in &config.dialects {
        let path = dialect.output_path(input);
        if path == input {
            return Err(PipelineError::OutputIsInput(path));
        }
        let bytes = dialect
            .render(&transactions)
            .map_err(|err| PipelineError::Export(dialect, err))?;
        debug!("Rendered {dialect} export, {} bytes", bytes.len());

        rendered.push((dialect, path, bytes));
    }

    println!("Saving converted files");
    let mut outputs = Vec::with_capacity(rendered.len());
    for (dialect, path, bytes) in rendered {
        fs::write(&path, bytes).map_err(|err| PipelineError::Write(path.clone(), err))?;
        println!("  Saved {}", path.display());

        if let Some(column) = dialect.manual_columns() {
            warn!(
                "The `{column}` column in {} must be filled in by hand",
                path.display()
            );
        }
        outputs.push(path);
    }

    Ok(Report {
        stats,
        transactions,
        outputs,
    })
}

/// Replay the deployer history, or fall back to an empty schedule with a warning.
fn load_schedule(s: &mut Stats, path: &Path) -> MintSchedule {
    if !path.is_file() {
        warn!(
            "Deployer transactions file {} not found; calculated mint values will not be available",
            path.display()
        );
        return MintSchedule::new();
    }

    println!(
        "Reading batch information from deployer transaction file {}",
        path.display()
    );
    match MintSchedule::load(s, path) {
        Ok(schedule) => {
            println!("  Found {} minting batches", schedule.len());
            schedule
        }
        Err(err) => {
            warn!(
                "Error reading deployer transactions file; \
                 calculated mint values will not be available: {err}"
            );
            debug!("{err:?}");
            MintSchedule::new()
        }
    }
}
