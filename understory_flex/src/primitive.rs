// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline primitive payloads.
//!
//! [`Primitive`] is a tagged sum over every [`PrimitiveKind`]. Equality,
//! ordering and hashing dispatch on the active kind and use that kind's own
//! semantics; two primitives of different kinds are never equal, even when
//! their payloads share a bit pattern.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use ordered_float::OrderedFloat;
use uuid::Uuid;

use crate::decimal::Decimal;
use crate::error::KindMismatch;
use crate::kind::PrimitiveKind;

/// A primitive value, stored inline.
///
/// Floats follow the `ordered-float` conventions: `-0.0 == 0.0`, NaN equals
/// NaN, and NaN sorts above every other value.
///
/// # Example
///
/// ```rust
/// use core::cmp::Ordering;
/// use understory_flex::{Primitive, PrimitiveKind};
///
/// let a = Primitive::from(42_i32);
/// assert_eq!(a.kind(), PrimitiveKind::I32);
/// assert_eq!(a, Primitive::I32(42));
///
/// // Same bits, different kinds.
/// assert_ne!(Primitive::I32(1), Primitive::U32(1));
///
/// assert_eq!(a.try_cmp(&Primitive::I32(43)), Ok(Ordering::Less));
/// assert!(a.try_cmp(&Primitive::I64(43)).is_err());
/// ```
#[derive(Copy, Clone, Debug)]
pub enum Primitive {
    /// Signed 8-bit integer.
    I8(i8),
    /// Signed 16-bit integer.
    I16(i16),
    /// Signed 32-bit integer.
    I32(i32),
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
    /// 128-bit decimal.
    Decimal(Decimal),
    /// Boolean.
    Bool(bool),
    /// Unicode scalar value.
    Char(char),
    /// Globally unique identifier.
    Guid(Uuid),
    /// Date and time with a fixed UTC offset.
    DateTimeOffset(DateTime<FixedOffset>),
    /// Date and time without an offset.
    DateTime(NaiveDateTime),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Signed duration.
    TimeSpan(TimeDelta),
}

impl Primitive {
    /// Returns the kind of this primitive.
    #[must_use]
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::I8(_) => PrimitiveKind::I8,
            Self::I16(_) => PrimitiveKind::I16,
            Self::I32(_) => PrimitiveKind::I32,
            Self::I64(_) => PrimitiveKind::I64,
            Self::U8(_) => PrimitiveKind::U8,
            Self::U16(_) => PrimitiveKind::U16,
            Self::U32(_) => PrimitiveKind::U32,
            Self::U64(_) => PrimitiveKind::U64,
            Self::F32(_) => PrimitiveKind::F32,
            Self::F64(_) => PrimitiveKind::F64,
            Self::Decimal(_) => PrimitiveKind::Decimal,
            Self::Bool(_) => PrimitiveKind::Bool,
            Self::Char(_) => PrimitiveKind::Char,
            Self::Guid(_) => PrimitiveKind::Guid,
            Self::DateTimeOffset(_) => PrimitiveKind::DateTimeOffset,
            Self::DateTime(_) => PrimitiveKind::DateTime,
            Self::Date(_) => PrimitiveKind::Date,
            Self::Time(_) => PrimitiveKind::Time,
            Self::TimeSpan(_) => PrimitiveKind::TimeSpan,
        }
    }

    /// Compares two primitives of the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`KindMismatch`] if the kinds differ; there is no ordering
    /// between values of different kinds.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, KindMismatch> {
        let ordering = match (self, other) {
            (Self::I8(a), Self::I8(b)) => a.cmp(b),
            (Self::I16(a), Self::I16(b)) => a.cmp(b),
            (Self::I32(a), Self::I32(b)) => a.cmp(b),
            (Self::I64(a), Self::I64(b)) => a.cmp(b),
            (Self::U8(a), Self::U8(b)) => a.cmp(b),
            (Self::U16(a), Self::U16(b)) => a.cmp(b),
            (Self::U32(a), Self::U32(b)) => a.cmp(b),
            (Self::U64(a), Self::U64(b)) => a.cmp(b),
            (Self::F32(a), Self::F32(b)) => OrderedFloat(*a).cmp(&OrderedFloat(*b)),
            (Self::F64(a), Self::F64(b)) => OrderedFloat(*a).cmp(&OrderedFloat(*b)),
            (Self::Decimal(a), Self::Decimal(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Char(a), Self::Char(b)) => a.cmp(b),
            (Self::Guid(a), Self::Guid(b)) => a.cmp(b),
            (Self::DateTimeOffset(a), Self::DateTimeOffset(b)) => a.cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Time(a), Self::Time(b)) => a.cmp(b),
            (Self::TimeSpan(a), Self::TimeSpan(b)) => a.cmp(b),
            _ => {
                return Err(KindMismatch::new(
                    self.kind().into(),
                    other.kind().into(),
                ));
            }
        };
        Ok(ordering)
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        self.try_cmp(other) == Ok(Ordering::Equal)
    }
}

impl Eq for Primitive {}

impl PartialOrd for Primitive {
    /// Returns `None` for primitives of different kinds.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl Hash for Primitive {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Self::I8(v) => v.hash(state),
            Self::I16(v) => v.hash(state),
            Self::I32(v) => v.hash(state),
            Self::I64(v) => v.hash(state),
            Self::U8(v) => v.hash(state),
            Self::U16(v) => v.hash(state),
            Self::U32(v) => v.hash(state),
            Self::U64(v) => v.hash(state),
            Self::F32(v) => OrderedFloat(*v).hash(state),
            Self::F64(v) => OrderedFloat(*v).hash(state),
            Self::Decimal(v) => v.hash(state),
            Self::Bool(v) => v.hash(state),
            Self::Char(v) => v.hash(state),
            Self::Guid(v) => v.hash(state),
            Self::DateTimeOffset(v) => v.hash(state),
            Self::DateTime(v) => v.hash(state),
            Self::Date(v) => v.hash(state),
            Self::Time(v) => v.hash(state),
            Self::TimeSpan(v) => v.hash(state),
        }
    }
}

macro_rules! primitive_conversions {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Primitive {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl TryFrom<Primitive> for $ty {
                type Error = KindMismatch;

                fn try_from(value: Primitive) -> Result<Self, KindMismatch> {
                    match value {
                        Primitive::$variant(v) => Ok(v),
                        other => Err(KindMismatch::new(
                            PrimitiveKind::$variant.into(),
                            other.kind().into(),
                        )),
                    }
                }
            }
        )*
    };
}

primitive_conversions! {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Bool(bool),
    Char(char),
    Guid(Uuid),
    DateTimeOffset(DateTime<FixedOffset>),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    TimeSpan(TimeDelta),
}
