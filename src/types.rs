//! Declared field types.
//!
//! Every field in a [`Schema`] carries a [`TypeTag`]. The tag set is closed:
//! a field is a primitive, an optional wrapper around another tag, or a nested
//! record. Primitives are the only tags the coercer ever sees, so adding a new
//! primitive kind means one new [`Primitive`] variant and one new arm in
//! [`coerce`](crate::coerce::coerce).
//!
//! Rust types map to tags through [`EnvType`]:
//!
//! ```ignore
//! TypeTag::of::<u16>()            // UnsignedInt(W16)
//! TypeTag::of::<Option<String>>() // Optional(String)
//! TypeTag::record(Db::schema())   // Record(..)
//! ```

use std::fmt;

use crate::schema::Schema;

/// Bit width of an integer primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    pub fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }

    /// Width matching the target's pointer size, for `isize`/`usize`.
    fn pointer() -> Self {
        match usize::BITS {
            16 => IntWidth::W16,
            32 => IntWidth::W32,
            _ => IntWidth::W64,
        }
    }
}

/// Precision of a floating-point primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatPrecision {
    F32,
    F64,
}

/// A type the coercer can produce from a single raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    SignedInt(IntWidth),
    UnsignedInt(IntWidth),
    Float(FloatPrecision),
    Bool,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::String => write!(f, "string"),
            Primitive::SignedInt(w) => write!(f, "i{}", w.bits()),
            Primitive::UnsignedInt(w) => write!(f, "u{}", w.bits()),
            Primitive::Float(FloatPrecision::F32) => write!(f, "f32"),
            Primitive::Float(FloatPrecision::F64) => write!(f, "f64"),
            Primitive::Bool => write!(f, "bool"),
        }
    }
}

/// The declared type of a schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeTag {
    Primitive(Primitive),
    /// May be absent. `Optional(Record(..))` is materialized only when the
    /// environment holds at least one of the record's keys.
    Optional(Box<TypeTag>),
    /// A nested record with its own schema.
    Record(Schema),
}

impl TypeTag {
    /// The tag for a Rust primitive or `Option` of one.
    pub fn of<T: EnvType>() -> Self {
        T::type_tag()
    }

    pub fn record(schema: Schema) -> Self {
        TypeTag::Record(schema)
    }

    pub fn optional(inner: TypeTag) -> Self {
        TypeTag::Optional(Box::new(inner))
    }

    /// `Optional(Optional(T))` carries no more information than `Optional(T)`.
    pub(crate) fn strip_optional(&self) -> &TypeTag {
        match self {
            TypeTag::Optional(inner) => inner.strip_optional(),
            other => other,
        }
    }
}

impl From<Primitive> for TypeTag {
    fn from(p: Primitive) -> Self {
        TypeTag::Primitive(p)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Primitive(p) => write!(f, "{p}"),
            TypeTag::Optional(inner) => write!(f, "optional {inner}"),
            TypeTag::Record(schema) => write!(f, "record {}", schema.name()),
        }
    }
}

/// Rust types with a known [`TypeTag`].
///
/// Implemented for `String`, the integer and float primitives, `bool`, and
/// `Option<T>` of any of those. Nested records are declared with
/// [`TypeTag::record`] instead.
pub trait EnvType {
    fn type_tag() -> TypeTag;
}

macro_rules! env_type {
    ($($ty:ty => $prim:expr),* $(,)?) => {
        $(
            impl EnvType for $ty {
                fn type_tag() -> TypeTag {
                    TypeTag::Primitive($prim)
                }
            }
        )*
    };
}

env_type! {
    String => Primitive::String,
    i8 => Primitive::SignedInt(IntWidth::W8),
    i16 => Primitive::SignedInt(IntWidth::W16),
    i32 => Primitive::SignedInt(IntWidth::W32),
    i64 => Primitive::SignedInt(IntWidth::W64),
    isize => Primitive::SignedInt(IntWidth::pointer()),
    u8 => Primitive::UnsignedInt(IntWidth::W8),
    u16 => Primitive::UnsignedInt(IntWidth::W16),
    u32 => Primitive::UnsignedInt(IntWidth::W32),
    u64 => Primitive::UnsignedInt(IntWidth::W64),
    usize => Primitive::UnsignedInt(IntWidth::pointer()),
    f32 => Primitive::Float(FloatPrecision::F32),
    f64 => Primitive::Float(FloatPrecision::F64),
    bool => Primitive::Bool,
}

impl<T: EnvType> EnvType for Option<T> {
    fn type_tag() -> TypeTag {
        TypeTag::optional(T::type_tag())
    }
}
