//! Every public error type, in one place.

pub use crate::config::ConfigError;
pub use crate::export::{DialectError, ExportError};
pub use crate::imports::{activity::ActivityError, deployer::DeployerError};
pub use crate::model::ledgers::{
    lines::ParseLineError,
    parsed::{AssembleError, MalformedLinesError},
};
pub use crate::model::MintValueError;
pub use crate::pipeline::PipelineError;
