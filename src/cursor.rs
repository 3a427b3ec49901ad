//! Sequential reader and writer over boundary buffer bytes.
//!
//! Cursors are transient: each encode or decode call owns one for its
//! duration, and none survives the call. Multi-byte integers travel
//! big-endian; floats travel as the bit pattern of the equal-width unsigned
//! integer. Every operation advances the offset by exactly the bytes it
//! consumed or produced, and any access past the declared end of the region
//! is a protocol fault, not an error.

use crate::buffer::ForeignBuffer;
use crate::fault::{self, FaultKind};

/// A non-owning view over a buffer's bytes, tracking a read offset.
pub struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

macro_rules! impl_read_be {
    ($($name:ident -> $ty:ty),+ $(,)?) => {
        $(
        pub fn $name(&mut self) -> $ty {
            let mut raw = [0u8; size_of::<$ty>()];
            raw.copy_from_slice(self.take(size_of::<$ty>()));
            <$ty>::from_be_bytes(raw)
        }
        )+
    };
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Whether any bytes remain between the offset and the declared end.
    pub fn has_remaining(&self) -> bool {
        self.offset < self.bytes.len()
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Current read offset from the start of the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Consumes exactly `n` bytes, faulting if they are not all present.
    fn take(&mut self, n: usize) -> &'a [u8] {
        let end = match self.offset.checked_add(n) {
            Some(end) => end,
            None => fault::raise(FaultKind::OffsetOverflow),
        };
        let Some(slice) = self.bytes.get(self.offset..end) else {
            fault::raise(FaultKind::OutOfBounds {
                offset: self.offset,
                requested: n,
                available: self.bytes.len(),
            });
        };
        self.offset = end;
        slice
    }

    impl_read_be! {
        read_u8 -> u8,
        read_i8 -> i8,
        read_u16 -> u16,
        read_i16 -> i16,
        read_u32 -> u32,
        read_i32 -> i32,
        read_u64 -> u64,
        read_i64 -> i64,
    }

    pub fn read_f32(&mut self) -> f32 {
        f32::from_bits(self.read_u32())
    }

    pub fn read_f64(&mut self) -> f64 {
        f64::from_bits(self.read_u64())
    }

    /// Reads a length-prefixed string: a 4-byte byte count followed by that
    /// many UTF-8 bytes, no terminator.
    ///
    /// The sink receives a borrowed view of the raw bytes and must copy them
    /// into an owned value before returning; the view dies with this call.
    /// The sink must not touch the reader.
    pub fn read_string_with<T>(&mut self, sink: impl FnOnce(&[u8]) -> T) -> T {
        let length = self.read_u32() as usize;
        sink(self.take(length))
    }
}

/// An owned scratch region destined to become a [`ForeignBuffer`], tracking
/// a write offset.
///
/// The capacity is fixed up front from the codec's size computation; writing
/// past it is a protocol fault. Because sizes are exact (worst-case only for
/// wide-string transcoding), the scratch vector never reallocates.
pub struct Writer {
    buf: Vec<u8>,
    capacity: usize,
}

macro_rules! impl_write_be {
    ($($name:ident($ty:ty)),+ $(,)?) => {
        $(
        pub fn $name(&mut self, value: $ty) {
            self.push(&value.to_be_bytes());
        }
        )+
    };
}

impl Writer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Bytes written so far.
    pub fn written(&self) -> usize {
        self.buf.len()
    }

    fn bounded_end(&self, extra: usize) -> usize {
        let end = match self.buf.len().checked_add(extra) {
            Some(end) => end,
            None => fault::raise(FaultKind::OffsetOverflow),
        };
        if end > self.capacity {
            fault::raise(FaultKind::OutOfBounds {
                offset: self.buf.len(),
                requested: extra,
                available: self.capacity,
            });
        }
        end
    }

    fn push(&mut self, bytes: &[u8]) {
        self.bounded_end(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    impl_write_be! {
        write_u8(u8),
        write_i8(i8),
        write_u16(u16),
        write_i16(i16),
        write_u32(u32),
        write_i32(i32),
        write_u64(u64),
        write_i64(i64),
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }

    /// Writes a length-prefixed string whose final byte count is not known
    /// until it has been produced.
    ///
    /// The producer receives a writable region of `size_hint` bytes (its
    /// caller-estimated upper bound) and returns the exact count it wrote;
    /// the cursor then rewinds and records that count in the 4-byte prefix.
    /// Host strings that transcode at the boundary need this indirection:
    /// the wire only ever stores the true final length, but the producer
    /// cannot know it before converting. The producer must not touch the
    /// writer.
    pub fn write_string_with(&mut self, size_hint: usize, producer: impl FnOnce(&mut [u8]) -> usize) {
        let prefix_at = self.buf.len();
        let body_at = self.bounded_end(size_of::<u32>());
        self.buf.resize(body_at, 0);
        let body_end = self.bounded_end(size_hint);
        self.buf.resize(body_end, 0);

        let region = self.region_mut(body_at, body_end);
        let written = producer(region);
        if written > size_hint {
            fault::raise(FaultKind::ProducerOverrun {
                reported: written,
                hint: size_hint,
            });
        }

        let prefix = match u32::try_from(written) {
            Ok(prefix) => prefix,
            Err(_) => fault::raise(FaultKind::LengthOverflow(written)),
        };
        self.region_mut(prefix_at, body_at)
            .copy_from_slice(&prefix.to_be_bytes());
        self.buf.truncate(body_at + written);
    }

    fn region_mut(&mut self, start: usize, end: usize) -> &mut [u8] {
        let len = self.buf.len();
        match self.buf.get_mut(start..end) {
            Some(region) => region,
            None => fault::raise(FaultKind::OutOfBounds {
                offset: start,
                requested: end.saturating_sub(start),
                available: len,
            }),
        }
    }

    /// Materializes the accumulated bytes: one allocation through the
    /// buffer entry point, one bulk copy.
    pub fn into_buffer(self) -> ForeignBuffer {
        let size = match u32::try_from(self.buf.len()) {
            Ok(size) => size,
            Err(_) => fault::raise(FaultKind::LengthOverflow(self.buf.len())),
        };
        let mut buffer = ForeignBuffer::allocate(size);
        buffer.as_mut_slice().copy_from_slice(&self.buf);
        buffer
    }
}
