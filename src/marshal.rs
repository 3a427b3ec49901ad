//! Conversion between host values and their boundary representation.
//!
//! Every type that crosses the boundary does so one of two ways, chosen
//! statically per type by its [`Marshal`] impl:
//!
//! - **directly**, when the foreign representation is a transferable scalar
//!   (the fixed-width numerics, booleans as a byte, enum tags) or a string
//!   pointer;
//! - **buffer-mediated**, when the value is composite or variable-length:
//!   the codec encodes it into a [`ForeignBuffer`] whose ownership then
//!   moves across the boundary.
//!
//! The two free functions [`lower_into_buffer`] and [`lift_from_buffer`]
//! implement the buffer strategy once; buffer-mediated `Marshal` impls
//! delegate to them.

use std::collections::HashMap;
use std::hash::Hash;

use crate::buffer::ForeignBuffer;
use crate::codec::Codec;
use crate::cursor::{Reader, Writer};
use crate::fault::{self, FaultKind};
use crate::logging::trace;

/// Two-way conversion between a host type and its foreign representation.
///
/// `lift` turns the boundary-safe representation into the native value;
/// `lower` does the reverse. For buffer and string representations the
/// conversion also moves ownership: a lowered value belongs to the far side
/// once handed over, and a lifted one is consumed (and its backing storage
/// released) by the lift.
pub trait Marshal: Sized {
    /// The representation at the call boundary: a scalar equal to the wire
    /// form, a string pointer, or a [`ForeignBuffer`].
    type Foreign;

    /// Converts the native value into its boundary representation.
    fn lower(&self) -> Self::Foreign;

    /// Converts a boundary representation into the native value.
    fn lift(foreign: Self::Foreign) -> Self;
}

macro_rules! direct_marshal {
    ($($ty:ty),+ $(,)?) => {
        $(
        impl Marshal for $ty {
            type Foreign = $ty;

            fn lower(&self) -> $ty {
                *self
            }

            fn lift(foreign: $ty) -> Self {
                foreign
            }
        }
        )+
    };
}

direct_marshal! {
    u8, i8, u16, i16, u32, i32, u64, i64, f32, f64,
}

/// Booleans cross the boundary as an unsigned byte; some host call
/// conventions do not pass native booleans reliably.
impl Marshal for bool {
    type Foreign = u8;

    fn lower(&self) -> u8 {
        u8::from(*self)
    }

    fn lift(foreign: u8) -> Self {
        foreign != 0
    }
}

/// Lowers a value by the buffer-mediated strategy: size, encode into a
/// writer of exactly that capacity, materialize, and hand the buffer's
/// ownership to the caller (and onward across the boundary).
pub fn lower_into_buffer<T: Codec>(value: &T) -> ForeignBuffer {
    let size = value.size();
    trace!(size = size, "lowering value into buffer");
    let mut writer = Writer::with_capacity(size);
    value.encode(&mut writer);
    writer.into_buffer()
}

/// Lifts a value by the buffer-mediated strategy: decode exactly one value
/// of `T` from the incoming buffer, fault if any bytes remain, then release
/// the buffer. The release is mandatory and happens exactly once per lift;
/// the buffer handle must not be reused afterwards.
pub fn lift_from_buffer<T: Codec>(buffer: ForeignBuffer) -> T {
    trace!(len = buffer.len(), "lifting value from buffer");
    let value = {
        let mut reader = Reader::new(buffer.as_slice());
        let value = T::decode(&mut reader);
        if reader.has_remaining() {
            fault::raise(FaultKind::TrailingBytes {
                remaining: reader.remaining(),
            });
        }
        value
    };
    buffer.destroy();
    value
}

impl<T: Codec> Marshal for Option<T> {
    type Foreign = ForeignBuffer;

    fn lower(&self) -> ForeignBuffer {
        lower_into_buffer(self)
    }

    fn lift(foreign: ForeignBuffer) -> Self {
        lift_from_buffer(foreign)
    }
}

impl<T: Codec> Marshal for Vec<T> {
    type Foreign = ForeignBuffer;

    fn lower(&self) -> ForeignBuffer {
        lower_into_buffer(self)
    }

    fn lift(foreign: ForeignBuffer) -> Self {
        lift_from_buffer(foreign)
    }
}

impl<K, V> Marshal for HashMap<K, V>
where
    K: Codec + Eq + Hash,
    V: Codec,
{
    type Foreign = ForeignBuffer;

    fn lower(&self) -> ForeignBuffer {
        lower_into_buffer(self)
    }

    fn lift(foreign: ForeignBuffer) -> Self {
        lift_from_buffer(foreign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_marshalling_is_identity() {
        assert_eq!(u32::lift(42u32.lower()), 42);
        assert_eq!(i64::lift((-3i64).lower()), -3);
        assert_eq!(f64::lift(1.25f64.lower()), 1.25);
    }

    #[test]
    fn bool_crosses_as_byte() {
        assert_eq!(true.lower(), 1u8);
        assert_eq!(false.lower(), 0u8);
        assert!(bool::lift(255));
        assert!(!bool::lift(0));
    }

    #[test]
    fn buffer_strategy_round_trips() {
        let value = vec![Some(1u16), None, Some(3u16)];
        let lifted: Vec<Option<u16>> = Marshal::lift(value.lower());
        assert_eq!(lifted, value);
    }
}
