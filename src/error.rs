use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors while obtaining a map or its configuration.
#[derive(Debug, Error)]
pub enum MapError {
    /// The source file could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A configuration file is not valid JSON for [`crate::GameConfig`].
    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        /// File that failed.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The source exists but cannot be treated as map text.
    #[error("invalid map: {0}")]
    InvalidMap(String),
}

/// Recoverable problems found on a single line or token.
///
/// These never abort a parse. The loader hands them to a
/// [`crate::Reporter`] and skips the offending line or token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    /// `Tile Size:` line whose value is not `<int>x<int>` with both sides non-zero.
    #[error("malformed tile size header: {0:?}")]
    MalformedHeader(String),
    /// A second header disagreeing with the first one.
    #[error("tile size already set to {first}, ignoring {ignored:?}")]
    DuplicateHeader {
        /// Size in effect.
        first: String,
        /// Text of the ignored header.
        ignored: String,
    },
    /// Tile data in a map that has no usable header.
    #[error("tile line without a tile size header: {0:?}")]
    MissingTileSize(String),
    /// Token matching none of the known tile shapes.
    #[error("tile does not match any known pattern: {0:?}")]
    UnrecognizedToken(String),
    /// Numeric field that does not fit, either as captured or once scaled to pixels.
    #[error("numeric field {field} out of range in {token:?}")]
    NumericFieldInvalid {
        /// Name of the field (`id`, `x`, `y`, ...).
        field: &'static str,
        /// Token the field came from.
        token: String,
    },
}
