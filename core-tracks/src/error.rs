//! Error types for track handles.

use thiserror::Error;

/// Errors raised by track ownership handles.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TrackError {
    /// Read, wrote, or extracted the value of an empty handle.
    ///
    /// This is a contract violation on the caller's side, not a recoverable
    /// condition: the operation is aborted and the error must not be
    /// silently swallowed.
    #[error("null access: attempted to {operation} through an empty handle")]
    NullAccess {
        /// The operation the caller attempted.
        operation: &'static str,
    },
}

/// Result type for track operations.
pub type Result<T> = std::result::Result<T, TrackError>;
