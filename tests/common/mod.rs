//! Shared fixtures and helpers for the integration suite.

#![allow(dead_code)]

use seam_abi::{Codec, FaultKind, ForeignBuffer, ProtocolFault, Writer, wire_enum, wire_record};

wire_record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Profile {
        pub name: String,
        pub age: u8,
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Roster {
        pub label: Option<String>,
        pub members: Vec<Profile>,
        pub active: bool,
    }
}

wire_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Channel {
        Stable,
        Beta,
        Nightly,
    }
}

/// Runs `f`, expecting it to abandon the operation with a protocol fault;
/// returns the fault kind for inspection.
pub fn expect_fault(f: impl FnOnce()) -> FaultKind {
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
    let payload = match outcome {
        Err(payload) => payload,
        Ok(()) => panic!("operation completed instead of faulting"),
    };
    match payload.downcast::<ProtocolFault>() {
        Ok(fault) => fault.kind().clone(),
        Err(_) => panic!("panic payload was not a ProtocolFault"),
    }
}

/// Encodes a value and copies the produced wire bytes out of the buffer.
pub fn encode_to_vec<T: Codec>(value: &T) -> Vec<u8> {
    let mut writer = Writer::with_capacity(value.size());
    value.encode(&mut writer);
    let buffer = writer.into_buffer();
    let bytes = buffer.as_slice().to_vec();
    buffer.destroy();
    bytes
}

/// Lifts a value of `T` from raw wire bytes, including the whole-buffer
/// consumption check and buffer release.
pub fn lift_bytes<T: Codec>(bytes: &[u8]) -> T {
    seam_abi::lift_from_buffer(ForeignBuffer::from_vec(bytes.to_vec()))
}
