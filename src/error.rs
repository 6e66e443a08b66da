//! Error types for tablecast operations.

use thiserror::Error;

/// Errors that can occur while importing a table fragment.
///
/// The conversion core itself never fails: already-consumed conflicts and
/// schema rejections are per-node declines, and degenerate inputs have
/// defined repairs. Errors only surface at the crate's outer edge, where
/// there is nothing to convert at all.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no table element found in input")]
    NoTable,
}

pub type Result<T> = std::result::Result<T, Error>;
