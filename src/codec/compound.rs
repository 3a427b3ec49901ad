//! Compositional codecs: optionals, sequences, associative maps.

use std::collections::HashMap;
use std::hash::Hash;

use super::{Codec, add_sizes};
use crate::cursor::{Reader, Writer};
use crate::fault::{self, FaultKind};

fn encode_count(writer: &mut Writer, count: usize) {
    match u32::try_from(count) {
        Ok(count) => writer.write_u32(count),
        Err(_) => fault::raise(FaultKind::LengthOverflow(count)),
    }
}

/// Optionals carry a 1-byte presence tag: 0 absent, 1 present followed by
/// the payload. Any other tag is a schema disagreement.
impl<T: Codec> Codec for Option<T> {
    fn size(&self) -> usize {
        match self {
            None => 1,
            Some(value) => add_sizes(1, value.size()),
        }
    }

    fn decode(reader: &mut Reader<'_>) -> Self {
        match reader.read_u8() {
            0 => None,
            1 => Some(T::decode(reader)),
            tag => fault::raise(FaultKind::BadOptionTag(tag)),
        }
    }

    fn encode(&self, writer: &mut Writer) {
        match self {
            None => writer.write_u8(0),
            Some(value) => {
                writer.write_u8(1);
                value.encode(writer);
            }
        }
    }
}

/// Sequences carry their exact element count, then each element in order.
impl<T: Codec> Codec for Vec<T> {
    fn size(&self) -> usize {
        self.iter()
            .fold(size_of::<u32>(), |acc, item| add_sizes(acc, item.size()))
    }

    fn decode(reader: &mut Reader<'_>) -> Self {
        let count = reader.read_u32() as usize;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::decode(reader));
        }
        items
    }

    fn encode(&self, writer: &mut Writer) {
        encode_count(writer, self.len());
        for item in self {
            item.encode(writer);
        }
    }
}

/// Maps carry their entry count, then each (key, value) pair in whatever
/// order the producing map iterates. The codec neither sorts nor
/// deduplicates; the wire order is the producer's order.
impl<K, V> Codec for HashMap<K, V>
where
    K: Codec + Eq + Hash,
    V: Codec,
{
    fn size(&self) -> usize {
        self.iter().fold(size_of::<u32>(), |acc, (key, value)| {
            add_sizes(acc, add_sizes(key.size(), value.size()))
        })
    }

    fn decode(reader: &mut Reader<'_>) -> Self {
        let count = reader.read_u32() as usize;
        let mut entries = HashMap::with_capacity(count);
        for _ in 0..count {
            let key = K::decode(reader);
            let value = V::decode(reader);
            entries.insert(key, value);
        }
        entries
    }

    fn encode(&self, writer: &mut Writer) {
        encode_count(writer, self.len());
        for (key, value) in self {
            key.encode(writer);
            value.encode(writer);
        }
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
    fn absent_optional_is_one_byte() {
        assert_eq!(encode_to_vec(&None::<u32>), vec![0x00]);
    }

    #[test]
    fn present_optional_prefixes_payload() {
        assert_eq!(
            encode_to_vec(&Some(42u32)),
            vec![0x01, 0x00, 0x00, 0x00, 0x2A]
        );
    }

    #[test]
    fn sequence_leads_with_exact_count() {
        let value: Vec<u16> = vec![1, 2, 3];
        assert_eq!(
            encode_to_vec(&value),
            vec![0x00, 0x00, 0x00, 0x03, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03]
        );
    }

    #[test]
    fn empty_sequence_is_just_the_count() {
        let value: Vec<u64> = Vec::new();
        assert_eq!(encode_to_vec(&value), vec![0, 0, 0, 0]);
        assert_eq!(value.size(), 4);
    }

    #[test]
    fn map_entries_follow_the_count() {
        let mut map = HashMap::new();
        map.insert(7u8, 9u8);
        assert_eq!(encode_to_vec(&map), vec![0, 0, 0, 1, 7, 9]);
    }
}
