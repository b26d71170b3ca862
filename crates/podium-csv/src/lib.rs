//! CSV codec for Podium's two source tables.
//!
//! Decodes the historical medal file and the athlete prediction file into
//! [`podium_core`] records, normalising as it goes. Pure synchronous; the
//! caller decides how and when files are read and cached.
//!
//! # Quick start
//!
//! ```no_run
//! let bytes = podium_csv::read_source("data/medals.csv").unwrap();
//! let medals = podium_csv::parse_medals(bytes.as_slice()).unwrap();
//! println!("{} medal rows", medals.len());
//! ```

pub mod error;
mod noc;
mod parse;

use std::{io::Read, path::Path};

pub use error::{Error, Result};
pub use noc::country_name;
use podium_core::{prediction::AthletePrediction, record::MedalRecord};

/// Read the raw bytes of a source file.
pub fn read_source(path: impl AsRef<Path>) -> Result<Vec<u8>> {
  let path = path.as_ref();
  std::fs::read(path).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })
}

/// Decode the medal table.
///
/// Only the `year` column is required; `discipline`, `noc`, `medal`, `event`
/// and `as` (athlete) are picked up when present. Any malformed row fails
/// the whole table.
pub fn parse_medals(input: impl Read) -> Result<Vec<MedalRecord>> {
  parse::parse_medals(input)
}

/// Decode the prediction table (`sport, icon, athlete, desc, img, medals`).
/// Missing columns and empty cells read as empty strings; an empty medal
/// count reads as zero.
pub fn parse_predictions(input: impl Read) -> Result<Vec<AthletePrediction>> {
  parse::parse_predictions(input)
}
