//! Active-triphone feature extraction from `HVite` alignment traces.
//!
//! The trace is parsed into a [`triphones::TraceRecord`], the triphones seen
//! for a word list form a [`triphones::Catalogue`], and the count and vector
//! models turn both into per-phone feature sets.

pub mod config;
pub mod triphones;
