//! String crossing conventions.
//!
//! Strings are a distinguished direct case: instead of riding a buffer, a
//! lowered string is an owned, null-terminated UTF-8 byte sequence passed as
//! a pointer, and a lifted one is copied out of that pointer into the host
//! representation (which then releases it). Two host string kinds exist:
//!
//! - [`String`], which already holds valid UTF-8 and copies byte-for-byte;
//! - [`WideString`], 16-bit units that transcode to and from UTF-8 at the
//!   boundary.
//!
//! Inside buffers both kinds use the length-prefixed wire form. The wide
//! kind cannot know its UTF-8 length before transcoding, so its encoder
//! hands the cursor a worst-case estimate (3 bytes per unit) and lets the
//! length prefix record the true count afterwards.

use std::char::REPLACEMENT_CHARACTER;
use std::ffi::{CStr, CString, c_char};

use crate::call::CallStatus;
use crate::codec::{Codec, add_sizes};
use crate::cursor::{Reader, Writer};
use crate::error::Error;
use crate::fault::{self, FaultKind};
use crate::logging::debug;
use crate::marshal::Marshal;

/// A host string of 16-bit code units (UTF-16), the "wide" kind.
///
/// Kept as raw units rather than `String` so that boundary transcoding is
/// explicit and unit sequences survive a round trip bit-for-bit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WideString {
    units: Vec<u16>,
}

impl WideString {
    pub fn from_units(units: Vec<u16>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[u16] {
        &self.units
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Converts to an owned `String`, replacing unpaired surrogates.
    pub fn to_string_lossy(&self) -> String {
        char::decode_utf16(self.units.iter().copied())
            .map(|unit| unit.unwrap_or(REPLACEMENT_CHARACTER))
            .collect()
    }

    /// Worst-case UTF-8 byte length: 3 bytes per unit. A one-unit scalar
    /// needs at most 3 UTF-8 bytes, and a surrogate pair's two units become
    /// 4; unpaired surrogates become the 3-byte replacement character.
    fn estimated_utf8_len(&self) -> usize {
        match self.units.len().checked_mul(3) {
            Some(len) => len,
            None => fault::raise(FaultKind::OffsetOverflow),
        }
    }
}

impl From<&str> for WideString {
    fn from(s: &str) -> Self {
        Self {
            units: s.encode_utf16().collect(),
        }
    }
}

/// Transcodes UTF-16 units into `out`, returning the bytes written.
/// `out` must hold the worst-case estimate; unpaired surrogates are
/// replaced, matching the host transcoding convention.
fn utf16_to_utf8(units: &[u16], out: &mut [u8]) -> usize {
    let mut written = 0usize;
    for decoded in char::decode_utf16(units.iter().copied()) {
        let ch = decoded.unwrap_or(REPLACEMENT_CHARACTER);
        let len = ch.len_utf8();
        let Some(slot) = out.get_mut(written..written + len) else {
            fault::raise(FaultKind::OutOfBounds {
                offset: written,
                requested: len,
                available: out.len(),
            });
        };
        ch.encode_utf8(slot);
        written += len;
    }
    written
}

impl Codec for WideString {
    fn size(&self) -> usize {
        add_sizes(size_of::<u32>(), self.estimated_utf8_len())
    }

    fn decode(reader: &mut Reader<'_>) -> Self {
        reader.read_string_with(|raw| match std::str::from_utf8(raw) {
            Ok(s) => Self::from(s),
            Err(_) => fault::raise(FaultKind::InvalidUtf8),
        })
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_string_with(self.estimated_utf8_len(), |region| {
            utf16_to_utf8(&self.units, region)
        });
    }
}

/// Allocates the owned, null-terminated boundary form of `s`, treating an
/// interior NUL as the contract violation it is.
fn lower_c_string(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(owned) => owned.into_raw(),
        Err(err) => fault::raise(FaultKind::EmbeddedNul {
            position: err.nul_position(),
        }),
    }
}

/// Fallible form of the string lowering, for hosts that want to reject an
/// interior NUL as a data error before anything crosses the boundary.
///
/// The returned pointer is owned by the caller; release it through
/// [`seam_string_free`] or by handing it across the boundary.
pub fn try_lower_c_string(s: &str) -> crate::Result<*mut c_char> {
    CString::new(s)
        .map(CString::into_raw)
        .map_err(|err| Error::EmbeddedNul {
            position: err.nul_position(),
        })
}

/// Takes ownership of a boundary string, copies it out, and releases it.
///
/// # Safety
///
/// `ptr` must be a live, null-terminated string produced by this library's
/// string allocation path, currently owned by the caller and not used again.
pub(crate) unsafe fn take_owned_c_string(ptr: *mut c_char) -> String {
    let bytes = unsafe { CStr::from_ptr(ptr) }.to_bytes().to_vec();
    drop(unsafe { CString::from_raw(ptr) });
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Narrow strings cross as a pointer to owned, null-terminated UTF-8.
/// Lowering a string with an interior NUL is a contract violation: the
/// direct convention has no way to carry one.
impl Marshal for String {
    type Foreign = *mut c_char;

    fn lower(&self) -> *mut c_char {
        lower_c_string(self)
    }

    fn lift(foreign: *mut c_char) -> Self {
        // The far side vouches for UTF-8 on direct strings; a violation is
        // a contract break, not data to sanitize.
        let bytes = unsafe { CStr::from_ptr(foreign) }.to_bytes().to_vec();
        drop(unsafe { CString::from_raw(foreign) });
        match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(_) => fault::raise(FaultKind::InvalidUtf8),
        }
    }
}

/// Wide strings transcode to UTF-8 on the way out and back on the way in.
/// The lowering copies twice (units to UTF-8, UTF-8 into the owned
/// allocation); the extra copy keeps the allocation path identical to the
/// narrow kind's.
impl Marshal for WideString {
    type Foreign = *mut c_char;

    fn lower(&self) -> *mut c_char {
        lower_c_string(&self.to_string_lossy())
    }

    fn lift(foreign: *mut c_char) -> Self {
        let lifted = unsafe { take_owned_c_string(foreign) };
        Self::from(lifted.as_str())
    }
}

/// String allocation entry point for the far side of the boundary.
///
/// Copies the incoming null-terminated UTF-8 bytes into a fresh owned
/// string and returns it; the caller owns the result and must release it
/// through [`seam_string_free`]. A null input reports failure through the
/// error record and returns null.
///
/// # Safety
///
/// `bytes`, when non-null, must point at a live null-terminated byte
/// sequence, and `out_status` must point at a writable [`CallStatus`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn seam_string_alloc_from(
    bytes: *const c_char,
    out_status: *mut CallStatus,
) -> *mut c_char {
    let status = unsafe { &mut *out_status };
    if bytes.is_null() {
        status.set_failure(CallStatus::FAILURE, "null string pointer");
        return std::ptr::null_mut();
    }
    let copied = unsafe { CStr::from_ptr(bytes) }.to_owned();
    debug!(len = copied.as_bytes().len(), "allocated boundary string");
    copied.into_raw()
}

/// Matching free entry point for strings allocated on this side.
///
/// # Safety
///
/// `string` must have been produced by this library's string allocation
/// path, be currently owned by the caller, and not be used afterwards.
/// A null pointer is ignored.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn seam_string_free(string: *mut c_char) {
    if string.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(string) });
}
