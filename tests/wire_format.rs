//! Byte-exact wire format tests against the shared-layout reference
//! vectors, plus the fatal-fault properties of malformed input.

mod common;

use common::{Channel, Profile, encode_to_vec, expect_fault, lift_bytes};
use seam_abi::{FaultKind, Marshal};

#[test]
fn record_with_string_and_byte_field() {
    let profile = Profile {
        name: "Zoë".to_owned(),
        age: 7,
    };
    let bytes = encode_to_vec(&profile);
    assert_eq!(
        bytes,
        vec![
            0x00, 0x00, 0x00, 0x04, // name byte length
            0x5A, 0x6F, 0xC3, 0xAB, // "Zoë"
            0x07, // age
        ]
    );
    assert_eq!(lift_bytes::<Profile>(&bytes), profile);
}

#[test]
fn absent_optional_u32() {
    let bytes = encode_to_vec(&None::<u32>);
    assert_eq!(bytes, vec![0x00]);
    assert_eq!(lift_bytes::<Option<u32>>(&bytes), None);
}

#[test]
fn present_optional_u32() {
    let bytes = encode_to_vec(&Some(42u32));
    assert_eq!(bytes, vec![0x01, 0x00, 0x00, 0x00, 0x2A]);
    assert_eq!(lift_bytes::<Option<u32>>(&bytes), Some(42));
}

#[test]
fn sequence_of_u16() {
    let bytes = encode_to_vec(&vec![1u16, 2, 3]);
    assert_eq!(
        bytes,
        vec![0x00, 0x00, 0x00, 0x03, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03]
    );
    assert_eq!(lift_bytes::<Vec<u16>>(&bytes), vec![1, 2, 3]);
}

#[test]
fn record_wire_form_has_no_framing() {
    // A record is nothing but its fields: stripping the name leaves the age.
    let profile = Profile {
        name: String::new(),
        age: 255,
    };
    assert_eq!(encode_to_vec(&profile), vec![0x00, 0x00, 0x00, 0x00, 0xFF]);
}

#[test]
fn enum_tags_are_one_based_declaration_order() {
    assert_eq!(Channel::Stable.lower(), 1);
    assert_eq!(Channel::Beta.lower(), 2);
    assert_eq!(Channel::Nightly.lower(), 3);
    assert_eq!(encode_to_vec(&Channel::Beta), vec![0x00, 0x00, 0x00, 0x02]);
}

#[test]
fn enum_tag_bijection_holds_for_every_declared_tag() {
    for tag in 1u32..=3 {
        assert_eq!(Channel::lift(tag).lower(), tag);
    }
}

#[test]
fn enum_tag_past_the_range_is_fatal_not_clamped() {
    let kind = expect_fault(|| {
        let _ = Channel::lift(4);
    });
    assert_eq!(kind, FaultKind::BadEnumTag { tag: 4, variants: 3 });
}

#[test]
fn enum_tag_zero_is_fatal() {
    let kind = expect_fault(|| {
        let _ = Channel::lift(0);
    });
    assert_eq!(kind, FaultKind::BadEnumTag { tag: 0, variants: 3 });
}

#[test]
fn bool_reader_accepts_any_nonzero_byte() {
    assert!(lift_bytes::<bool>(&[0x07]));
    assert!(!lift_bytes::<bool>(&[0x00]));
}

#[test]
fn float_crosses_as_bit_pattern() {
    let bytes = encode_to_vec(&1.0f64);
    assert_eq!(bytes, vec![0x3F, 0xF0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(lift_bytes::<f64>(&bytes), 1.0);
}

#[test]
fn truncation_by_one_byte_faults_at_the_missing_read() {
    let mut bytes = encode_to_vec(&Profile {
        name: "Zoë".to_owned(),
        age: 7,
    });
    bytes.pop();
    let kind = expect_fault(|| {
        let _ = lift_bytes::<Profile>(&bytes);
    });
    // The name decodes fine; the age read needs the byte at offset 8.
    assert_eq!(
        kind,
        FaultKind::OutOfBounds {
            offset: 8,
            requested: 1,
            available: 8,
        }
    );
}

#[test]
fn truncated_string_body_faults_inside_the_string() {
    // Length prefix says 4 bytes follow, but only 3 do.
    let kind = expect_fault(|| {
        let _ = lift_bytes::<String>(&[0x00, 0x00, 0x00, 0x04, 0x5A, 0x6F, 0xC3]);
    });
    assert_eq!(
        kind,
        FaultKind::OutOfBounds {
            offset: 4,
            requested: 4,
            available: 7,
        }
    );
}

#[test]
fn leftover_bytes_after_decode_are_fatal() {
    let kind = expect_fault(|| {
        let _ = lift_bytes::<u32>(&[0, 0, 0, 1, 0xAA]);
    });
    assert_eq!(kind, FaultKind::TrailingBytes { remaining: 1 });
}

#[test]
fn malformed_optional_tag_is_fatal() {
    let kind = expect_fault(|| {
        let _ = lift_bytes::<Option<u32>>(&[0x02]);
    });
    assert_eq!(kind, FaultKind::BadOptionTag(2));
}

#[test]
fn out_of_range_enum_tag_on_the_wire_is_fatal() {
    let kind = expect_fault(|| {
        let _ = lift_bytes::<Channel>(&[0x00, 0x00, 0x00, 0x09]);
    });
    assert_eq!(kind, FaultKind::BadEnumTag { tag: 9, variants: 3 });
}

#[test]
fn invalid_utf8_in_wire_string_is_fatal() {
    let kind = expect_fault(|| {
        let _ = lift_bytes::<String>(&[0x00, 0x00, 0x00, 0x01, 0xFF]);
    });
    assert_eq!(kind, FaultKind::InvalidUtf8);
}
