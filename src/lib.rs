#![forbid(unsafe_code)]

pub mod config;
pub mod errors;
pub mod export;
pub mod imports;
pub mod model;
pub mod pipeline;
pub mod valuation;
