use thiserror::Error;

/// Errors raised while decoding a single field.
///
/// Note: this error type surfaces per field; a failed field never aborts the
/// decoding of subsequent fields in the same pass.
#[derive(Debug, Error)]
pub enum RangeError {
    #[error("invalid range {text:?}: expected \"start-end\" with two base-10 integers")]
    Malformed { text: String },
    #[error("invalid range {start}-{end}: start exceeds end")]
    Reversed { start: u64, end: u64 },
    #[error("byte {index} missing from dump (range {start}-{end})")]
    MissingByte { index: u64, start: u64, end: u64 },
}
