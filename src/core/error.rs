use std::io;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised while building or drawing a table.
///
/// Drawing itself only ever fails with [`TableError::Surface`]: the engine
/// does no validation of its own and forwards whatever the surface reports.
#[derive(Error, Debug)]
pub enum TableError {
    /// A drawing primitive failed on the underlying surface
    #[error("surface error: {0}")]
    Surface(#[from] io::Error),

    /// The table description breaks a structural invariant
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// The JSON template could not be parsed
    #[error("invalid template: {0}")]
    Template(#[from] serde_json::Error),

    /// A template cell references an image key that was not supplied
    #[error("missing image asset: {0}")]
    MissingAsset(String),

    #[error("image error: {0}")]
    Image(String),

    #[error("font error: {0}")]
    Font(String),
}
