//! Error kinds shared across the suite.
//!
//! Effects are infallible after init; everything that can go wrong does
//! so while bringing the platform up or decoding assets. Optional assets
//! (screen captures, audio, quote feeds) degrade silently instead of
//! surfacing here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Window, renderer, or audio subsystem could not be created.
    #[error("init failure: {0}")]
    InitFailure(String),

    /// A mandatory asset could not be decoded.
    #[error("asset decode error: {0}")]
    AssetDecode(String),

    /// No usable font for a text-dependent effect.
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// Fork/exec failed or a child misbehaved.
    #[error("subprocess error: {0}")]
    Subprocess(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<String> for Error {
    /// SDL2 reports errors as plain strings; fold them into init failures.
    fn from(msg: String) -> Self {
        Error::InitFailure(msg)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
