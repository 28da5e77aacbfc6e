//! # Error Types
//!
//! Enumerates every way a [`crate::finder::Finder`] or
//! [`crate::finder_light::FinderLight`] can fail to open or answer a query.
//! Query-time failures are limited to [`Error::OutOfRange`]; every other
//! runtime outcome (no shortcut entry, an empty candidate list) is modeled
//! as `None`, not an error, per the lookup contract.

use std::path::PathBuf;

/// Errors surfaced by the core lookup engine.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("coordinate out of range: lng={lng}, lat={lat}")]
    OutOfRange { lng: f64, lat: f64 },

    #[error("unknown timezone name: {0}")]
    InvalidZoneName(String),

    #[error("zone id {0} is out of range (0..{1})")]
    InvalidZoneId(u32, u32),

    #[error("data corrupt in {path}: {reason}")]
    DataCorrupt { path: PathBuf, reason: String },

    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataCorrupt { path: path.into(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
