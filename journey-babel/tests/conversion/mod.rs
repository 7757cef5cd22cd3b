//! Conversion tests
//!
//! Whole entries through the full pipeline, plus property tests over arbitrary input.

mod entries;
mod properties;
