//! Error types for the podium-csv codec.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot read {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),

  #[error("missing required column `{0}`")]
  MissingColumn(&'static str),

  #[error("line {line}: invalid year `{value}`")]
  InvalidYear { line: u64, value: String },

  #[error("line {line}: invalid medal count `{value}`")]
  InvalidMedalCount { line: u64, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
