//! Codecs for the fixed-width primitives and host strings.

use super::{Codec, add_sizes};
use crate::cursor::{Reader, Writer};
use crate::fault::{self, FaultKind};

macro_rules! fixed_width_codec {
    ($($ty:ty => $read:ident / $write:ident),+ $(,)?) => {
        $(
        impl Codec for $ty {
            fn size(&self) -> usize {
                size_of::<$ty>()
            }

            fn decode(reader: &mut Reader<'_>) -> Self {
                reader.$read()
            }

            fn encode(&self, writer: &mut Writer) {
                writer.$write(*self);
            }
        }
        )+
    };
}

fixed_width_codec! {
    u8 => read_u8 / write_u8,
    i8 => read_i8 / write_i8,
    u16 => read_u16 / write_u16,
    i16 => read_i16 / write_i16,
    u32 => read_u32 / write_u32,
    i32 => read_i32 / write_i32,
    u64 => read_u64 / write_u64,
    i64 => read_i64 / write_i64,
    f32 => read_f32 / write_f32,
    f64 => read_f64 / write_f64,
}

/// Booleans occupy one byte on the wire. The writer always emits exactly
/// 0 or 1; the reader normalizes any nonzero byte to `true`.
impl Codec for bool {
    fn size(&self) -> usize {
        1
    }

    fn decode(reader: &mut Reader<'_>) -> Self {
        reader.read_u8() != 0
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_u8(u8::from(*self));
    }
}

/// Host strings that already hold valid UTF-8 copy byte-for-byte under the
/// length prefix. The far side vouches for UTF-8 on in-buffer strings, so
/// bytes that fail validation on decode are a schema-contract fault.
impl Codec for String {
    fn size(&self) -> usize {
        add_sizes(size_of::<u32>(), self.len())
    }

    fn decode(reader: &mut Reader<'_>) -> Self {
        reader.read_string_with(|raw| match std::str::from_utf8(raw) {
            Ok(s) => s.to_owned(),
            Err(_) => fault::raise(FaultKind::InvalidUtf8),
        })
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_string_with(self.len(), |region| {
            region.copy_from_slice(self.as_bytes());
            self.len()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_to_vec<T: Codec>(value: &T) -> Vec<u8> {
        let mut writer = Writer::with_capacity(value.size());
        value.encode(&mut writer);
        let buffer = writer.into_buffer();
        let bytes = buffer.as_slice().to_vec();
        buffer.destroy();
        bytes
    }

    #[test]
    fn bool_writer_emits_exactly_zero_or_one() {
        assert_eq!(encode_to_vec(&true), vec![1]);
        assert_eq!(encode_to_vec(&false), vec![0]);
    }

    #[test]
    fn bool_reader_normalizes_nonzero() {
        let mut reader = Reader::new(&[7]);
        assert!(bool::decode(&mut reader));
    }

    #[test]
    fn string_encoding_is_length_prefixed_utf8() {
        let bytes = encode_to_vec(&String::from("Zoë"));
        assert_eq!(bytes, vec![0, 0, 0, 4, 0x5A, 0x6F, 0xC3, 0xAB]);
    }

    #[test]
    fn string_size_is_exact() {
        let value = String::from("héllo");
        assert_eq!(value.size(), encode_to_vec(&value).len());
    }
}
