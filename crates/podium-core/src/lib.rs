//! Core types and pure transformations for the Podium medal dashboard.
//!
//! This crate is deliberately free of file, HTTP, and caching concerns. It
//! turns typed medal and prediction tables into the filtered subsets,
//! rollups, and hierarchies the charts consume, and resolves chart clicks
//! back onto prediction records. All other crates depend on it.

pub mod aggregate;
pub mod build;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod hierarchy;
pub mod history;
pub mod prediction;
pub mod record;
pub mod selection;
pub mod settings;
pub mod style;

pub use error::{Error, Result};
