// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type tags for declared property types and stored values.
//!
//! Instead of asking a runtime type system whether one type is assignable
//! from another, every property declares a [`TypeKind`] and every value
//! carries a [`ContainerKind`]. Assignability is a comparison of the two tags.

use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

/// The closed set of primitive kinds a [`Primitive`](crate::Primitive) can hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveKind {
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// 128-bit decimal.
    Decimal,
    /// Boolean.
    Bool,
    /// Unicode scalar value.
    Char,
    /// 128-bit globally unique identifier.
    Guid,
    /// Date and time with a fixed UTC offset.
    DateTimeOffset,
    /// Date and time without an offset.
    DateTime,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Signed duration.
    TimeSpan,
}

impl PrimitiveKind {
    /// Every primitive kind, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::Decimal,
        Self::Bool,
        Self::Char,
        Self::Guid,
        Self::DateTimeOffset,
        Self::DateTime,
        Self::Date,
        Self::Time,
        Self::TimeSpan,
    ];

    /// Returns a short lowercase name for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Decimal => "decimal",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Guid => "guid",
            Self::DateTimeOffset => "datetime-offset",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::Time => "time",
            Self::TimeSpan => "timespan",
        }
    }

    /// Returns `true` for the integer and floating point kinds.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::F32
                | Self::F64
                | Self::Decimal
        )
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tag for a reference (heap, shared) value type.
///
/// Identity is the [`TypeId`]; the name is kept for diagnostics only.
#[derive(Copy, Clone)]
pub struct RefType {
    id: TypeId,
    name: &'static str,
}

impl RefType {
    /// Returns the tag for `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the tagged type.
    #[must_use]
    #[inline]
    pub fn type_id(self) -> TypeId {
        self.id
    }

    /// Returns the type name of the tagged type.
    #[must_use]
    #[inline]
    pub fn name(self) -> &'static str {
        self.name
    }
}

impl PartialEq for RefType {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RefType {}

impl Hash for RefType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for RefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefType").field(&self.name).finish()
    }
}

/// The type a property declares.
///
/// # Example
///
/// ```rust
/// use understory_flex::{PrimitiveKind, TypeKind};
///
/// let age = TypeKind::Primitive(PrimitiveKind::I32);
/// assert!(age.is_assignable_from(TypeKind::Primitive(PrimitiveKind::I32)));
/// assert!(!age.is_assignable_from(TypeKind::Primitive(PrimitiveKind::I64)));
/// assert!(!age.is_assignable_from(TypeKind::of_ref::<String>()));
///
/// assert!(TypeKind::Any.is_assignable_from(age));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// One of the inline primitive kinds.
    Primitive(PrimitiveKind),
    /// A shared reference to a value of one concrete type.
    Reference(RefType),
    /// Any value at all.
    Any,
}

impl TypeKind {
    /// Shorthand for `TypeKind::Reference(RefType::of::<T>())`.
    #[must_use]
    pub fn of_ref<T: ?Sized + 'static>() -> Self {
        Self::Reference(RefType::of::<T>())
    }

    /// Returns `true` if a value tagged `other` may be stored in a property
    /// declared as `self`.
    ///
    /// There is no implicit widening: an `i16` is not assignable to an `i32`
    /// property.
    #[must_use]
    pub fn is_assignable_from(self, other: Self) -> bool {
        match self {
            Self::Any => true,
            _ => self == other,
        }
    }

    /// Returns `true` if a null reference may be stored in a property
    /// declared as `self`.
    #[must_use]
    pub fn accepts_null(self) -> bool {
        !matches!(self, Self::Primitive(_))
    }

    /// Returns `true` if a value of kind `value` may be stored in a property
    /// declared as `self`.
    ///
    /// [`ContainerKind::Empty`] is accepted everywhere since it clears the
    /// slot.
    #[must_use]
    pub fn accepts(self, value: ContainerKind) -> bool {
        match value {
            ContainerKind::Empty => true,
            ContainerKind::Null => self.accepts_null(),
            ContainerKind::Primitive(kind) => self.is_assignable_from(Self::Primitive(kind)),
            ContainerKind::Reference(ty) => self.is_assignable_from(Self::Reference(ty)),
        }
    }

    /// Returns the primitive kind, if this is a primitive tag.
    #[must_use]
    pub fn primitive(self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) => Some(kind),
            _ => None,
        }
    }
}

impl From<PrimitiveKind> for TypeKind {
    #[inline]
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

impl From<RefType> for TypeKind {
    #[inline]
    fn from(ty: RefType) -> Self {
        Self::Reference(ty)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Reference(ty) => f.write_str(ty.name()),
            Self::Any => f.write_str("any"),
        }
    }
}

/// The kind of value a [`ValueContainer`](crate::ValueContainer) currently holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Nothing.
    Empty,
    /// A present but null reference.
    Null,
    /// A primitive of the given kind.
    Primitive(PrimitiveKind),
    /// A reference to a value of the given type.
    Reference(RefType),
}

impl ContainerKind {
    /// Returns the declared type that matches this kind exactly.
    ///
    /// Returns `None` for [`Empty`](Self::Empty) and [`Null`](Self::Null).
    #[must_use]
    pub fn type_kind(self) -> Option<TypeKind> {
        match self {
            Self::Empty | Self::Null => None,
            Self::Primitive(kind) => Some(TypeKind::Primitive(kind)),
            Self::Reference(ty) => Some(TypeKind::Reference(ty)),
        }
    }
}

impl From<PrimitiveKind> for ContainerKind {
    #[inline]
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::Null => f.write_str("null"),
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Reference(ty) => f.write_str(ty.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;
    use hashbrown::HashSet;

    #[test]
    fn all_kinds_are_distinct() {
        let set: HashSet<_> = PrimitiveKind::ALL.iter().copied().collect();
        assert_eq!(set.len(), PrimitiveKind::ALL.len());

        let names: HashSet<_> = PrimitiveKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), PrimitiveKind::ALL.len());
    }

    #[test]
    fn numeric_kinds() {
        assert!(PrimitiveKind::I8.is_numeric());
        assert!(PrimitiveKind::Decimal.is_numeric());
        assert!(!PrimitiveKind::Bool.is_numeric());
        assert!(!PrimitiveKind::TimeSpan.is_numeric());
    }

    #[test]
    fn ref_type_identity_is_type_id() {
        assert_eq!(RefType::of::<String>(), RefType::of::<String>());
        assert_ne!(RefType::of::<String>(), RefType::of::<u8>());
        assert!(RefType::of::<String>().name().contains("String"));
    }

    #[test]
    fn assignability() {
        let i32_kind = TypeKind::Primitive(PrimitiveKind::I32);
        let string_kind = TypeKind::of_ref::<String>();

        assert!(i32_kind.is_assignable_from(i32_kind));
        assert!(!i32_kind.is_assignable_from(PrimitiveKind::U32.into()));
        assert!(!i32_kind.is_assignable_from(string_kind));
        assert!(string_kind.is_assignable_from(string_kind));
        assert!(!string_kind.is_assignable_from(i32_kind));
        assert!(TypeKind::Any.is_assignable_from(string_kind));
        assert!(TypeKind::Any.is_assignable_from(i32_kind));
    }

    #[test]
    fn null_acceptance() {
        assert!(!TypeKind::Primitive(PrimitiveKind::Bool).accepts_null());
        assert!(TypeKind::of_ref::<String>().accepts_null());
        assert!(TypeKind::Any.accepts_null());
    }

    #[test]
    fn container_kind_acceptance() {
        let i32_kind = TypeKind::Primitive(PrimitiveKind::I32);
        let string_kind = TypeKind::of_ref::<String>();

        assert!(i32_kind.accepts(ContainerKind::Empty));
        assert!(!i32_kind.accepts(ContainerKind::Null));
        assert!(i32_kind.accepts(PrimitiveKind::I32.into()));
        assert!(!i32_kind.accepts(ContainerKind::Reference(RefType::of::<String>())));

        assert!(string_kind.accepts(ContainerKind::Null));
        assert!(string_kind.accepts(ContainerKind::Reference(RefType::of::<String>())));
        assert!(!string_kind.accepts(ContainerKind::Reference(RefType::of::<u8>())));

        assert!(TypeKind::Any.accepts(ContainerKind::Null));
        assert!(TypeKind::Any.accepts(PrimitiveKind::Guid.into()));
    }

    #[test]
    fn container_kind_type_kind() {
        assert_eq!(ContainerKind::Empty.type_kind(), None);
        assert_eq!(ContainerKind::Null.type_kind(), None);
        assert_eq!(
            ContainerKind::Primitive(PrimitiveKind::Char).type_kind(),
            Some(TypeKind::Primitive(PrimitiveKind::Char))
        );
        assert_eq!(format!("{}", ContainerKind::Null), "null");
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", TypeKind::Primitive(PrimitiveKind::I32)), "i32");
        assert_eq!(format!("{}", TypeKind::Any), "any");
        assert!(format!("{}", TypeKind::of_ref::<String>()).contains("String"));
    }
}
