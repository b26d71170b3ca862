//! Error types for `podium-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("hierarchy has no root node")]
  MissingRoot,

  #[error("hierarchy has more than one root: {0:?}")]
  MultipleRoots(Vec<String>),

  #[error("duplicate node id: {0:?}")]
  DuplicateId(String),

  #[error("node {id:?} references missing parent {parent_id:?}")]
  DanglingParent { id: String, parent_id: String },

  #[error("root must be the first node, found {0:?}")]
  RootNotFirst(String),

  #[error("node {0:?} is not reachable from the root")]
  Unreachable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
