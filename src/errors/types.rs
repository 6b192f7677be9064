//! Error type definitions for the CafeVibe application
//!
//! This module defines all error types used throughout the application,
//! providing a hierarchical error system that makes debugging and error
//! handling more straightforward.

use thiserror::Error;

/// Top-level application error type
///
/// This enum represents all possible errors that can occur in the application.
/// It uses `thiserror` to provide automatic error trait implementations and
/// proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// Record store errors (slot I/O, quota, lifecycle)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Photo normalization errors
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Place-search errors
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Share cascade errors
    #[error("Share error: {0}")]
    Share(#[from] ShareError),
}

/// Record-store specific errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// The persistent slot could not be read
    #[error("Slot read failed: {0}")]
    SlotRead(#[source] std::io::Error),

    /// The persistent slot could not be written
    #[error("Slot write failed: {0}")]
    SlotWrite(#[source] std::io::Error),

    /// The serialized collection no longer fits the slot.
    ///
    /// Surfaced to the user as an actionable "free some space" message; the
    /// in-memory collection is never rolled back on this error.
    #[error("Slot quota exceeded: payload is {needed} bytes, quota is {quota} bytes")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Collection (de)serialization failures
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Photo-pipeline specific errors
#[derive(Error, Debug)]
pub enum ImageError {
    /// The source file could not be read
    #[error("Photo read failed: {0}")]
    Read(#[source] std::io::Error),

    /// The bytes did not decode as a raster image
    #[error("Photo decode failed: {message}")]
    Decode { message: String },

    /// JPEG re-encoding of the scaled raster failed
    #[error("Photo encode failed: {message}")]
    Encode { message: String },

    /// A photo string that is not a `data:image/...;base64,` payload
    #[error("Not an embeddable photo data URL")]
    NotADataUrl,
}

/// Place-search specific errors
#[derive(Error, Debug)]
pub enum SearchError {
    /// Transport-level failures talking to the search endpoint
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured endpoint is not a valid URL
    #[error("Invalid search endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The endpoint answered with something other than the expected rows
    #[error("Malformed search result: {message}")]
    MalformedResult { message: String },
}

/// Share cascade specific errors
#[derive(Error, Debug)]
pub enum ShareError {
    /// The user dismissed the share sheet; not a failure, aborts the cascade
    #[error("Share cancelled by user")]
    Cancelled,

    /// One outlet tier failed; the cascade falls through to the next tier
    #[error("Share outlet '{outlet}' failed: {message}")]
    Outlet { outlet: String, message: String },

    /// Every tier failed; the only share error that reaches the user
    #[error("Sharing failed: no outlet could deliver the summary")]
    Exhausted,
}

impl ShareError {
    /// Create an outlet-tier failure
    pub fn outlet<O: Into<String>, M: Into<String>>(outlet: O, message: M) -> Self {
        Self::Outlet {
            outlet: outlet.into(),
            message: message.into(),
        }
    }
}
