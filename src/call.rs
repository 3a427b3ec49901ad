//! The out-of-band error record for declared-fallible operations.
//!
//! A fallible flat entry point takes a trailing [`CallStatus`] output slot.
//! Code 0 always means success; a nonzero code carries an owned message
//! string that the consuming side must read and then release. The record is
//! transient: produced by one call, consumed immediately by the caller,
//! never stored. Translation into `Result` is the whole of this layer's
//! error handling; it performs no retries and no recovery.

use std::ffi::{CString, c_char};

use thiserror::Error;

use crate::logging::debug;
use crate::strings;

/// A declared-fallible foreign call reported failure.
///
/// The message is carried verbatim from the far side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("foreign call failed with code {code}: {}", .message.as_deref().unwrap_or("<no message>"))]
pub struct CallError {
    pub code: i32,
    pub message: Option<String>,
}

/// The error record exchanged across the boundary: `{code, message}` with a
/// null message pointer when there is nothing to say.
#[repr(C)]
#[derive(Debug)]
pub struct CallStatus {
    code: i32,
    message: *mut c_char,
}

impl CallStatus {
    /// Code reported by every successful call.
    pub const SUCCESS: i32 = 0;

    /// Generic failure code used by this side's entry points.
    pub const FAILURE: i32 = 1;

    /// A fresh record in the success state, ready to pass to an entry point.
    pub const fn new() -> Self {
        Self {
            code: Self::SUCCESS,
            message: std::ptr::null_mut(),
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }

    /// Marks the record failed, allocating an owned copy of `message` for
    /// the consuming side to read and release.
    pub fn set_failure(&mut self, code: i32, message: &str) {
        debug!(code = code, detail = message, "recording call failure");
        self.code = code;
        let owned = CString::new(message)
            .or_else(|_| CString::new(message.replace('\0', "")))
            .unwrap_or_default();
        self.message = owned.into_raw();
    }

    /// Consumes the record: success maps to `Ok`, a nonzero code to a
    /// [`CallError`] carrying the message. The message string, when present,
    /// is read out and released here, exactly once.
    pub fn into_result(self) -> Result<(), CallError> {
        let message = if self.message.is_null() {
            None
        } else {
            // Ownership of the message moved into this record when the far
            // side set it; taking it back is the mandatory release.
            Some(unsafe { strings::take_owned_c_string(self.message) })
        };
        if self.code == Self::SUCCESS {
            return Ok(());
        }
        Err(CallError {
            code: self.code,
            message,
        })
    }
}

impl Default for CallStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Invokes a fallible flat entry point and translates its error record into
/// the host's native failure signaling.
///
/// Seeds a success-state [`CallStatus`], passes it to `call` as the trailing
/// output slot, and converts a nonzero code into `Err` with the carried
/// message. On failure the entry point's return value is discarded; the far
/// side reports nothing meaningful alongside an error.
pub fn fallible_call<R>(call: impl FnOnce(&mut CallStatus) -> R) -> Result<R, CallError> {
    let mut status = CallStatus::new();
    let ret = call(&mut status);
    status.into_result().map(|()| ret)
}
