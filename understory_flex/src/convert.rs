// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed conversion into and out of [`ValueContainer`].

use alloc::string::String;
use alloc::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use uuid::Uuid;

use crate::decimal::Decimal;
use crate::error::KindMismatch;
use crate::kind::{ContainerKind, PrimitiveKind, RefType, TypeKind};
use crate::primitive::Primitive;
use crate::value::{ReferenceValue, ValueContainer};

/// A Rust type that can be stored in a property.
///
/// Every primitive payload type implements this, as do [`String`] and
/// `Arc<T>` for any [`ReferenceValue`]. Other owned reference types can opt
/// in with [`reference_property_value!`](crate::reference_property_value).
pub trait PropertyValue: Sized + 'static {
    /// The declared type of a property holding this Rust type.
    fn type_kind() -> TypeKind;

    /// Wraps the value in a container.
    fn into_container(self) -> ValueContainer;

    /// Reads a value out of a container.
    ///
    /// Returns `Ok(None)` for `Empty` and for null references.
    ///
    /// # Errors
    ///
    /// Returns [`KindMismatch`] if the container holds another kind of value.
    fn from_container(value: &ValueContainer) -> Result<Option<Self>, KindMismatch>;
}

macro_rules! primitive_property_values {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                #[inline]
                fn type_kind() -> TypeKind {
                    TypeKind::Primitive(PrimitiveKind::$variant)
                }

                #[inline]
                fn into_container(self) -> ValueContainer {
                    ValueContainer::Primitive(Primitive::$variant(self))
                }

                fn from_container(value: &ValueContainer) -> Result<Option<Self>, KindMismatch> {
                    match value {
                        ValueContainer::Empty => Ok(None),
                        ValueContainer::Primitive(Primitive::$variant(v)) => Ok(Some(*v)),
                        other => Err(KindMismatch::new(
                            PrimitiveKind::$variant.into(),
                            other.kind(),
                        )),
                    }
                }
            }

            impl From<$ty> for ValueContainer {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Primitive(Primitive::$variant(value))
                }
            }
        )*
    };
}

primitive_property_values! {
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

/// Implements [`PropertyValue`] for owned reference types.
///
/// The type must be `Clone` and a [`ReferenceValue`]. Reads clone the value
/// out of the shared reference.
///
/// ```rust
/// use core::fmt;
/// use understory_flex::{PropertyValue, TypeKind, ValueContainer, reference_property_value};
///
/// #[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// struct Tag(u32);
///
/// impl fmt::Display for Tag {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "#{}", self.0)
///     }
/// }
///
/// reference_property_value!(Tag);
///
/// assert_eq!(Tag::type_kind(), TypeKind::of_ref::<Tag>());
/// let value = Tag(3).into_container();
/// assert_eq!(Tag::from_container(&value), Ok(Some(Tag(3))));
/// assert_eq!(Tag::from_container(&ValueContainer::null()), Ok(None));
/// ```
#[macro_export]
macro_rules! reference_property_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::PropertyValue for $ty {
                fn type_kind() -> $crate::TypeKind {
                    $crate::TypeKind::of_ref::<$ty>()
                }

                fn into_container(self) -> $crate::ValueContainer {
                    $crate::ValueContainer::from_reference(self)
                }

                fn from_container(
                    value: &$crate::ValueContainer,
                ) -> ::core::result::Result<::core::option::Option<Self>, $crate::KindMismatch> {
                    match value {
                        $crate::ValueContainer::Empty | $crate::ValueContainer::Reference(None) => {
                            ::core::result::Result::Ok(::core::option::Option::None)
                        }
                        other => other
                            .downcast_ref::<$ty>()
                            .map(|v| ::core::option::Option::Some(::core::clone::Clone::clone(v)))
                            .ok_or_else(|| {
                                $crate::KindMismatch::new(
                                    $crate::ContainerKind::Reference($crate::RefType::of::<$ty>()),
                                    other.kind(),
                                )
                            }),
                    }
                }
            }
        )*
    };
}

reference_property_value!(String);

impl<T: ReferenceValue> PropertyValue for Arc<T> {
    fn type_kind() -> TypeKind {
        TypeKind::of_ref::<T>()
    }

    fn into_container(self) -> ValueContainer {
        ValueContainer::from_shared(self)
    }

    fn from_container(value: &ValueContainer) -> Result<Option<Self>, KindMismatch> {
        match value {
            ValueContainer::Empty | ValueContainer::Reference(None) => Ok(None),
            other => other.shared::<T>().map(Some).ok_or_else(|| {
                KindMismatch::new(ContainerKind::Reference(RefType::of::<T>()), other.kind())
            }),
        }
    }
}
