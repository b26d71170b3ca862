//! [`FileDataset`]: the [`Dataset`] served from two CSV files on disk.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use podium_core::{
  dataset::{Dataset, Loaded},
  prediction::AthletePrediction,
  record::MedalRecord,
};
use sha2::{Digest, Sha256};

use crate::cache::TableCache;

#[derive(Debug)]
pub struct FileDataset {
  medals_path:                 PathBuf,
  predictions_path:            PathBuf,
  pub(crate) medals:           TableCache<MedalRecord>,
  pub(crate) predictions:      TableCache<AthletePrediction>,
}

impl FileDataset {
  /// Nothing is read until a table is first requested.
  pub fn new(
    medals_path: impl Into<PathBuf>,
    predictions_path: impl Into<PathBuf>,
  ) -> Self {
    Self {
      medals_path:      medals_path.into(),
      predictions_path: predictions_path.into(),
      medals:           TableCache::new("medal", |bytes| {
        podium_csv::parse_medals(bytes)
      }),
      predictions:      TableCache::new("prediction", |bytes| {
        podium_csv::parse_predictions(bytes)
      }),
    }
  }

  pub fn medals_path(&self) -> &Path { &self.medals_path }

  pub fn predictions_path(&self) -> &Path { &self.predictions_path }

  /// Load both tables now rather than on the first request.
  pub fn preload(&self) {
    self.medals();
    self.predictions();
  }
}

impl Dataset for FileDataset {
  fn medals(&self) -> Arc<Loaded<MedalRecord>> {
    self.medals.load(&self.medals_path)
  }

  fn predictions(&self) -> Arc<Loaded<AthletePrediction>> {
    self.predictions.load(&self.predictions_path)
  }

  /// Short hash over both source digests.
  fn revision(&self) -> String {
    let mut hasher = Sha256::new();
    hasher.update(self.medals().digest.as_bytes());
    hasher.update(b"\n");
    hasher.update(self.predictions().digest.as_bytes());
    hex::encode(&hasher.finalize()[..8])
  }
}
