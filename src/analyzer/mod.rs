//! The four page analyzers.
//!
//! Each analyzer is a pure function of the parsed document (plus the input's
//! transport metadata for the technical analyzer) and produces its own report.

/// Structured data (JSON-LD) analysis.
pub mod json_ld;

/// Meta tag analysis.
pub mod meta_tags;

/// Content structure analysis.
pub mod content;

/// Technical factor analysis.
pub mod technical;

mod entities;
mod faq;
mod readability;
