//! Fatal protocol faults.
//!
//! A fault means the two sides of the boundary disagree about the schema:
//! one side's build omits or adds a field, tag, or length the other expects.
//! That is a build-time contract break, not a data-level problem, so the
//! current operation is abandoned rather than reported as a recoverable
//! error.
//!
//! Faults diverge through [`raise`], which panics with a [`ProtocolFault`]
//! payload. The payload type implements neither `std::error::Error` nor any
//! conversion into [`crate::Error`], so `?`-style propagation and ordinary
//! `match`-on-error code cannot absorb one. Callers that must observe a
//! fault (test harnesses, crash reporters) can downcast the panic payload.

use std::fmt;

/// The specific contract violation behind a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FaultKind {
    /// A read or write would run past the declared end of the buffer.
    OutOfBounds {
        offset: usize,
        requested: usize,
        available: usize,
    },

    /// A whole-buffer decode finished with bytes left over.
    TrailingBytes { remaining: usize },

    /// An optional's presence tag was neither 0 nor 1.
    BadOptionTag(u8),

    /// An enum tag outside the declared `1..=variants` range.
    BadEnumTag { tag: u32, variants: u32 },

    /// A buffer declared a negative length.
    NegativeLength(i64),

    /// A count or size too large for its 4-byte wire representation.
    LengthOverflow(usize),

    /// Cursor offset or size arithmetic overflowed.
    OffsetOverflow,

    /// String bytes on the wire were not valid UTF-8.
    InvalidUtf8,

    /// A host string lowered to the null-terminated convention contained
    /// an interior NUL byte.
    EmbeddedNul { position: usize },

    /// A string producer reported more bytes than its declared upper bound.
    ProducerOverrun { reported: usize, hint: usize },
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                offset,
                requested,
                available,
            } => write!(
                f,
                "access of {requested} bytes at offset {offset} exceeds buffer length {available}"
            ),
            Self::TrailingBytes { remaining } => write!(
                f,
                "{remaining} bytes left in buffer after decoding a complete value"
            ),
            Self::BadOptionTag(tag) => write!(f, "optional tag must be 0 or 1, got {tag}"),
            Self::BadEnumTag { tag, variants } => {
                write!(f, "enum tag {tag} outside declared range 1..={variants}")
            }
            Self::NegativeLength(len) => write!(f, "buffer declared negative length {len}"),
            Self::LengthOverflow(len) => {
                write!(f, "length {len} does not fit the 4-byte wire field")
            }
            Self::OffsetOverflow => write!(f, "cursor offset arithmetic overflowed"),
            Self::InvalidUtf8 => write!(f, "string bytes on the wire are not valid UTF-8"),
            Self::EmbeddedNul { position } => {
                write!(f, "host string holds an interior NUL byte at {position}")
            }
            Self::ProducerOverrun { reported, hint } => write!(
                f,
                "string producer reported {reported} bytes written, above its {hint}-byte bound"
            ),
        }
    }
}

/// Panic payload carried by a protocol fault. Only [`raise`] constructs one.
#[derive(Debug)]
pub struct ProtocolFault {
    kind: FaultKind,
}

impl ProtocolFault {
    /// The contract violation that triggered this fault.
    pub fn kind(&self) -> &FaultKind {
        &self.kind
    }
}

impl fmt::Display for ProtocolFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "protocol fault: {}", self.kind)
    }
}

/// Abandon the current operation: the wire contents and the schema disagree.
///
/// Never returns. Public so that generated codec instantiations (and the
/// [`wire_record!`](crate::wire_record) / [`wire_enum!`](crate::wire_enum)
/// expansions) can report violations through the same path as the built-in
/// codecs.
#[cold]
pub fn raise(kind: FaultKind) -> ! {
    crate::logging::error!(fault = %kind, "protocol fault, abandoning operation");
    std::panic::panic_any(ProtocolFault { kind })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_payload_carries_kind() {
        let caught = std::panic::catch_unwind(|| raise(FaultKind::BadOptionTag(7)));
        let payload = match caught {
            Err(payload) => payload,
            Ok(never) => never,
        };
        let fault = payload
            .downcast::<ProtocolFault>()
            .unwrap_or_else(|_| panic!("payload must be a ProtocolFault"));
        assert_eq!(*fault.kind(), FaultKind::BadOptionTag(7));
    }

    #[test]
    fn display_names_the_violation() {
        let kind = FaultKind::OutOfBounds {
            offset: 3,
            requested: 4,
            available: 5,
        };
        assert_eq!(
            kind.to_string(),
            "access of 4 bytes at offset 3 exceeds buffer length 5"
        );
    }
}
