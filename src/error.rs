//! Unified recoverable error type.
//!
//! Only declared-fallible foreign calls and host-side string preparation can
//! fail recoverably. Protocol faults are deliberately *not* represented
//! here; they live in [`crate::fault`] and never flow through a `Result`.

use thiserror::Error;

use crate::call::CallError;

/// Unified error type for all recoverable failures in this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// A declared-fallible foreign call reported failure through its error
    /// record.
    #[error(transparent)]
    Call(#[from] CallError),

    /// A host string could not take the null-terminated boundary form.
    #[error("host string holds an interior NUL byte at {position}")]
    EmbeddedNul { position: usize },
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is a failure reported by a foreign call.
    pub fn is_call(&self) -> bool {
        matches!(self, Self::Call(_))
    }
}
