//! Binary wire protocol and type-marshalling layer for the boundary between
//! a safety-enforcing core engine and its hosting runtime.
//!
//! The two sides share nothing but a schema and a handful of flat entry
//! points; this crate supplies everything needed to move structured values
//! between them: a bounds-checked byte cursor over a fixed wire layout, a
//! per-type [`Codec`] contract, and a per-type [`Marshal`] contract that
//! decides whether a value crosses as a bare scalar, a string pointer, or
//! an owned [`ForeignBuffer`]. Transport is out of scope: everything here
//! describes the in-memory byte layout and ownership rules of a single
//! synchronous call.
//!
//! # Quick start
//!
//! ```
//! use seam_abi::{Marshal, wire_record};
//!
//! wire_record! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct Profile {
//!         pub name: String,
//!         pub age: u8,
//!     }
//! }
//!
//! let profile = Profile { name: "Zoë".to_owned(), age: 7 };
//! let buffer = profile.lower();          // encode + hand over ownership
//! let back = Profile::lift(buffer);      // decode + mandatory release
//! assert_eq!(back, profile);
//! ```
//!
//! # Modules
//!
//! - [`cursor`] - sequential big-endian reader/writer over buffer bytes
//! - [`buffer`] - the owned byte block exchanged across the boundary
//! - [`codec`] - per-type `{size, decode, encode}` wire contract
//! - [`marshal`] - per-type `{lift, lower}` boundary contract
//! - [`strings`] - the narrow/wide string crossing conventions
//! - [`call`] - the error record for declared-fallible operations
//! - [`fault`] - the fatal tier for schema-contract violations
//!
//! # Error handling
//!
//! Failures split into two disjoint tiers. Schema disagreements (bounds
//! overruns, leftover bytes, out-of-range tags) are protocol faults: they
//! abandon the operation through [`fault::raise`] and cannot be caught by
//! ordinary error handling. Only operations the schema declares fallible
//! can fail recoverably, through [`CallStatus`] translated into
//! [`Result`].
//!
//! # Feature flags
//!
//! - `logging` - library-level tracing (consumers provide their own
//!   subscriber)

pub mod buffer;
pub mod call;
pub mod codec;
pub mod cursor;
pub mod fault;
mod logging;
pub mod marshal;
pub mod prelude;
pub mod strings;

mod error;

// Re-export the unified error type
pub use error::{Error, Result};

// Re-export the core contracts and carriers at the crate root
pub use buffer::{ForeignBuffer, seam_buffer_alloc, seam_buffer_free};
pub use call::{CallError, CallStatus, fallible_call};
pub use codec::Codec;
pub use cursor::{Reader, Writer};
pub use fault::{FaultKind, ProtocolFault};
pub use marshal::{Marshal, lift_from_buffer, lower_into_buffer};
pub use strings::{WideString, seam_string_alloc_from, seam_string_free, try_lower_c_string};
