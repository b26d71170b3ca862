//! The `Dataset` trait: where the dashboard's two source tables come from.
//!
//! Implemented by `podium-cache`; the API layer depends on this abstraction
//! only, so handlers can be exercised against in-memory tables.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{prediction::AthletePrediction, record::MedalRecord};

/// The outcome of loading one source. Loading never fails outright: on error
/// the rows are empty and `error` carries the message to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loaded<T> {
  pub rows:   Vec<T>,
  pub error:  Option<String>,
  /// Hex digest of the source bytes; empty when nothing could be read.
  pub digest: String,
}

impl<T> Loaded<T> {
  pub fn ok(rows: Vec<T>, digest: impl Into<String>) -> Self {
    Self {
      rows,
      error: None,
      digest: digest.into(),
    }
  }

  pub fn failed(error: impl ToString) -> Self {
    Self {
      rows:   Vec::new(),
      error:  Some(error.to_string()),
      digest: String::new(),
    }
  }
}

/// Read-only access to the medal and prediction tables.
///
/// Tables are loaded at most once and shared immutably afterwards, so
/// implementations hand out `Arc`s and callers never need to lock.
pub trait Dataset: Send + Sync {
  /// The historical medal table.
  fn medals(&self) -> Arc<Loaded<MedalRecord>>;

  /// The athlete prediction table.
  fn predictions(&self) -> Arc<Loaded<AthletePrediction>>;

  /// An identifier that changes whenever either source's content changes.
  fn revision(&self) -> String;
}
