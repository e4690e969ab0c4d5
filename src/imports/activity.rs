use std::{fs, path::Path};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("FS Error")]
    Fs(#[from] std::io::Error),
}

/// Read a wallet activity log in full. The file is closed before any line is parsed.
pub fn read_activity_log(path: impl AsRef<Path>) -> Result<String, ActivityError> {
    debug!("Reading activity log {:?}", path.as_ref());
    let log = fs::read_to_string(path)?;
    debug!("Read {} bytes", log.len());

    Ok(log)
}
