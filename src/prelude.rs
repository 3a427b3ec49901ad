//! Convenient re-exports for common usage patterns.
//!
//! A single import brings the codec and marshalling surface into scope:
//!
//! ```
//! use seam_abi::prelude::*;
//!
//! let buffer = lower_into_buffer(&vec![1u16, 2, 3]);
//! let back: Vec<u16> = lift_from_buffer(buffer);
//! assert_eq!(back, vec![1, 2, 3]);
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Core contracts
pub use crate::codec::Codec;
pub use crate::marshal::{Marshal, lift_from_buffer, lower_into_buffer};

// Carriers and cursors
pub use crate::buffer::ForeignBuffer;
pub use crate::call::{CallError, CallStatus, fallible_call};
pub use crate::cursor::{Reader, Writer};
pub use crate::strings::WideString;

// Fault tier
pub use crate::fault::{FaultKind, ProtocolFault};
