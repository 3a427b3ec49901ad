//! Instantiation macros for schema-declared records and enums.
//!
//! The interface-description tooling that enumerates operations and types is
//! external to this crate; what it emits for each record and enum is exactly
//! one invocation of these macros. Hand-written code can invoke them too,
//! which is how the test suite exercises the compositional rules.

/// Declares a record type and binds it to the wire: each field encoded in
/// declared order, no framing, no field names or type tags on the wire.
/// Both sides must agree on the field list and order. The record crosses the
/// boundary buffer-mediated.
///
/// ```
/// use seam_abi::wire_record;
///
/// wire_record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Profile {
///         pub name: String,
///         pub age: u8,
///     }
/// }
/// ```
#[macro_export]
macro_rules! wire_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($(#[$field_meta:meta])* $field_vis:vis $field:ident : $ty:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $($(#[$field_meta])* $field_vis $field: $ty,)+
        }

        impl $crate::Codec for $name {
            fn size(&self) -> usize {
                let mut size = 0usize;
                $(size = $crate::codec::add_sizes(size, $crate::Codec::size(&self.$field));)+
                size
            }

            fn decode(reader: &mut $crate::Reader<'_>) -> Self {
                Self {
                    $($field: <$ty as $crate::Codec>::decode(reader),)+
                }
            }

            fn encode(&self, writer: &mut $crate::Writer) {
                $($crate::Codec::encode(&self.$field, writer);)+
            }
        }

        impl $crate::Marshal for $name {
            type Foreign = $crate::ForeignBuffer;

            fn lower(&self) -> $crate::ForeignBuffer {
                $crate::lower_into_buffer(self)
            }

            fn lift(buffer: $crate::ForeignBuffer) -> Self {
                $crate::lift_from_buffer(buffer)
            }
        }
    };
}

/// Declares a unit-variant enum and binds it to the wire: a 4-byte tag equal
/// to the variant's 1-based declaration index. The tag set is dense and
/// fixed by declaration order on both sides; it is never renumbered, and a
/// tag outside the declared range is a protocol fault in both directions.
/// Enums cross the boundary directly, as their tag.
///
/// ```
/// use seam_abi::wire_enum;
///
/// wire_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Verdict {
///         Allow,
///         Deny,
///     }
/// }
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($(#[$variant_meta])* $variant,)+
        }

        impl $crate::Marshal for $name {
            type Foreign = u32;

            fn lower(&self) -> u32 {
                match self {
                    $(Self::$variant => (Self::$variant as u32) + 1,)+
                }
            }

            fn lift(tag: u32) -> Self {
                $(
                    if tag == (Self::$variant as u32) + 1 {
                        return Self::$variant;
                    }
                )+
                let variants = [$(stringify!($variant)),+].len() as u32;
                $crate::fault::raise($crate::fault::FaultKind::BadEnumTag { tag, variants })
            }
        }

        impl $crate::Codec for $name {
            fn size(&self) -> usize {
                4
            }

            fn decode(reader: &mut $crate::Reader<'_>) -> Self {
                <Self as $crate::Marshal>::lift(reader.read_u32())
            }

            fn encode(&self, writer: &mut $crate::Writer) {
                writer.write_u32($crate::Marshal::lower(self));
            }
        }
    };
}
