//! The transferable byte block exchanged across the boundary.
//!
//! A [`ForeignBuffer`] is a `(length, data)` pair with exactly one owner at
//! any time. The producing side creates it through [`ForeignBuffer::allocate`]
//! (or the `seam_buffer_alloc` entry point when the far side produces), hands
//! it across the boundary by value, and whichever side currently owns it must
//! destroy it exactly once. Use after destruction and double destruction are
//! caller contract violations; this layer does not detect them.

use crate::fault::{self, FaultKind};
use crate::logging::debug;

/// An owned, contiguous byte block crossing the boundary.
///
/// Laid out as a C pair of a signed 64-bit length and a data pointer so the
/// far side can consume it without any Rust-specific knowledge. The length
/// is signed on the wire for ABI uniformity; a negative value is a protocol
/// fault.
#[repr(C)]
#[derive(Debug)]
pub struct ForeignBuffer {
    len: i64,
    data: *mut u8,
}

// A ForeignBuffer is an ownership token: at most one side holds it, and a
// holder may move it to another thread wholesale. Concurrent access to the
// same buffer is excluded by the ownership-transfer discipline, not by
// locking.
unsafe impl Send for ForeignBuffer {}

impl ForeignBuffer {
    /// Allocates a zero-filled buffer of exactly `size` bytes.
    pub fn allocate(size: u32) -> Self {
        debug!(size = size, "allocating boundary buffer");
        Self::from_vec(vec![0u8; size as usize])
    }

    /// Takes ownership of `bytes`, shrinking to the exact length.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        if len == 0 {
            return Self {
                len: 0,
                data: std::ptr::null_mut(),
            };
        }
        let boxed: Box<[u8]> = bytes.into_boxed_slice();
        Self {
            len: len as i64,
            data: Box::into_raw(boxed).cast::<u8>(),
        }
    }

    /// Declared length in bytes. A negative declared length is a fault.
    pub fn len(&self) -> usize {
        match usize::try_from(self.len) {
            Ok(len) => len,
            Err(_) => fault::raise(FaultKind::NegativeLength(self.len)),
        }
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        let len = self.len();
        if self.data.is_null() {
            if len != 0 {
                fault::raise(FaultKind::OutOfBounds {
                    offset: 0,
                    requested: len,
                    available: 0,
                });
            }
            return &[];
        }
        // Invariant: `data` points at `len` initialized bytes owned by this
        // buffer, and no other side holds the buffer while we borrow it.
        unsafe { std::slice::from_raw_parts(self.data, len) }
    }

    /// Mutably borrows the buffer contents.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        let len = self.len();
        if self.data.is_null() {
            return &mut [];
        }
        unsafe { std::slice::from_raw_parts_mut(self.data, len) }
    }

    /// Releases the buffer. The single mandatory free for an owned buffer.
    pub fn destroy(self) {
        debug!(len = self.len, "freeing boundary buffer");
        if self.data.is_null() {
            return;
        }
        let len = self.len();
        // Invariant: `data`/`len` came from `from_vec`'s Box::into_raw and
        // ownership was not given away since.
        unsafe {
            let slice = std::ptr::slice_from_raw_parts_mut(self.data, len);
            drop(Box::from_raw(slice));
        }
    }
}

/// Allocation entry point for the far side of the boundary.
///
/// Ownership of the returned buffer moves to the caller, which must release
/// it through [`seam_buffer_free`] (or hand it back across the boundary).
#[unsafe(no_mangle)]
pub extern "C" fn seam_buffer_alloc(size: u32) -> ForeignBuffer {
    ForeignBuffer::allocate(size)
}

/// Matching free entry point for buffers allocated by [`seam_buffer_alloc`]
/// or produced by a lowering on this side.
///
/// # Safety
///
/// `buffer` must be currently owned by the caller, must have originated from
/// this library's allocation path, and must not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn seam_buffer_free(buffer: ForeignBuffer) {
    buffer.destroy();
}
