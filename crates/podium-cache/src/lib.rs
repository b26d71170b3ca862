//! File-backed, load-once table cache for Podium.
//!
//! Each source file is read and decoded at most once per process; every
//! later request shares the same immutable table. A file that cannot be
//! read or decoded yields an empty table carrying the error message, so a
//! bad source degrades its panels instead of the whole server.

mod cache;
mod dataset;

pub use cache::{Parser, TableCache};
pub use dataset::FileDataset;

#[cfg(test)]
mod tests;
