//! Error types for format selection

use thiserror::Error;

/// Error returned when an output format string is not recognized
///
/// Carries the rejected input so configuration errors can be reported
/// verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown output format {0:?}, expected \"original\" or \"clean\"")]
pub struct ParseFormatError(pub String);
