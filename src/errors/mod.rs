//! Centralized error handling for CafeVibe
//!
//! Every failure in this application is recoverable: a bad slot payload falls
//! back to seed data, a full slot leaves the in-memory collection intact, a
//! broken photo leaves the draft untouched, a dead search endpoint shows an
//! empty candidate list. The types here exist so callers can tell those
//! degradations apart, not so anything can abort the process.

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
