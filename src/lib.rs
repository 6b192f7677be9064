//! CafeVibe: a personal cafe-cataloguing toolkit.
//!
//! The core is a locally persisted record store plus a photo normalization
//! pipeline; place search, share text and map markers hang off narrow seams
//! so any UI (or the bundled CLI) can drive them.

pub mod app;
pub mod config;
pub mod errors;
pub mod images;
pub mod map;
pub mod models;
pub mod search;
pub mod share;
pub mod store;
