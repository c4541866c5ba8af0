//! Error types for llmo-audit.
//!
//! Auditing a document never fails: malformed markup, broken JSON-LD and
//! unreachable probe targets are folded into the report. The only
//! caller-visible error is a misconfigured [`Options`](crate::Options) value,
//! rejected when an [`Auditor`](crate::Auditor) is constructed.

/// Error type for auditor construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The lookup tables or weights in `Options` are unusable.
    #[error("invalid audit configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
