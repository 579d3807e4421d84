// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The variant value container.
//!
//! [`ValueContainer`] holds nothing, one shared (possibly null) reference, or
//! one inline [`Primitive`]. Primitives never touch the heap; only reference
//! values are allocated, once, behind an [`Arc`].

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::any::Any;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{BuildHasher, Hash, Hasher};

use rustc_hash::FxBuildHasher;

use crate::error::KindMismatch;
use crate::kind::{ContainerKind, PrimitiveKind, RefType, TypeKind};
use crate::primitive::Primitive;
use crate::text::FormatProvider;

/// A value that can be held by reference in a [`ValueContainer`].
///
/// This is implemented for every `'static` type that is `Eq + Hash +
/// Display + Debug + Send + Sync`. Container equality, hashing and text
/// rendering delegate to the referenced value through this trait.
pub trait ReferenceValue: Any + Send + Sync + fmt::Debug + fmt::Display {
    /// Returns the value as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Converts a shared handle into a shared [`Any`] for downcasting.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// Returns `true` if `other` has the same concrete type and is equal.
    fn dyn_eq(&self, other: &dyn ReferenceValue) -> bool;

    /// Feeds the value into `state`.
    fn dyn_hash(&self, state: &mut dyn Hasher);

    /// Returns the type tag of the concrete type.
    fn ref_type(&self) -> RefType;
}

impl<T> ReferenceValue for T
where
    T: Any + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn dyn_eq(&self, other: &dyn ReferenceValue) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }

    fn ref_type(&self) -> RefType {
        RefType::of::<T>()
    }
}

/// A value of any primitive kind, a shared reference, or nothing.
///
/// `Reference(None)` is a present-but-null reference and is distinct from
/// [`Empty`](Self::Empty).
///
/// # Equality and hashing
///
/// - `Empty` equals only `Empty`.
/// - Primitives compare with their kind's own semantics and never equal a
///   primitive of another kind.
/// - References delegate to the referenced value; null equals null.
///
/// [`hash_code`](Self::hash_code) is a deterministic hash consistent with
/// equality in which `Empty` and null both hash to `0`.
///
/// # Example
///
/// ```rust
/// use understory_flex::ValueContainer;
///
/// let a = ValueContainer::from(42_i32);
/// assert!(a.is_primitive());
/// assert_eq!(a, ValueContainer::from(42_i32));
/// assert_ne!(a, ValueContainer::from(43_i32));
///
/// let name = ValueContainer::from_reference(String::from("a"));
/// assert_ne!(name, ValueContainer::from_reference(String::from("b")));
/// assert_eq!(name.downcast_ref::<String>().map(String::as_str), Some("a"));
///
/// assert_eq!(ValueContainer::null(), ValueContainer::null());
/// assert_ne!(ValueContainer::null(), ValueContainer::Empty);
/// assert_eq!(ValueContainer::null().hash_code(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub enum ValueContainer {
    /// No value.
    #[default]
    Empty,
    /// An inline primitive.
    Primitive(Primitive),
    /// A shared reference, or null.
    Reference(Option<Arc<dyn ReferenceValue>>),
}

impl ValueContainer {
    /// Creates a container holding a primitive.
    #[must_use]
    #[inline]
    pub fn from_primitive(value: impl Into<Primitive>) -> Self {
        Self::Primitive(value.into())
    }

    /// Creates a container holding a new shared reference to `value`.
    #[must_use]
    pub fn from_reference<T: ReferenceValue>(value: T) -> Self {
        Self::Reference(Some(Arc::new(value)))
    }

    /// Creates a container sharing an existing reference.
    #[must_use]
    pub fn from_shared<T: ReferenceValue>(value: Arc<T>) -> Self {
        Self::Reference(Some(value))
    }

    /// Creates a container holding a null reference.
    #[must_use]
    #[inline]
    pub const fn null() -> Self {
        Self::Reference(None)
    }

    /// Returns `true` for [`Empty`](Self::Empty).
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` only for the [`Primitive`](Self::Primitive) discriminant.
    #[must_use]
    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Returns `true` for references, including null.
    #[must_use]
    #[inline]
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// Returns `true` for a null reference.
    #[must_use]
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Reference(None))
    }

    /// Returns the kind of value held.
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        match self {
            Self::Empty => ContainerKind::Empty,
            Self::Primitive(p) => ContainerKind::Primitive(p.kind()),
            Self::Reference(None) => ContainerKind::Null,
            Self::Reference(Some(value)) => ContainerKind::Reference(value.ref_type()),
        }
    }

    /// Returns the declared type that matches the held value exactly.
    ///
    /// Returns `None` for `Empty` and for null references.
    #[must_use]
    pub fn type_kind(&self) -> Option<TypeKind> {
        self.kind().type_kind()
    }

    /// Returns the type tag of a held non-null reference.
    #[must_use]
    pub fn reference_type(&self) -> Option<RefType> {
        self.as_reference().map(|value| value.ref_type())
    }

    /// Returns the primitive kind, if a primitive is held.
    #[must_use]
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        self.as_primitive().map(Primitive::kind)
    }

    /// Returns the primitive, if one is held.
    #[must_use]
    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the shared reference, if a non-null reference is held.
    #[must_use]
    pub fn as_reference(&self) -> Option<&Arc<dyn ReferenceValue>> {
        match self {
            Self::Reference(value) => value.as_ref(),
            _ => None,
        }
    }

    /// Downcasts a held reference to `T`.
    ///
    /// Returns `None` for non-references, null, and references to other types.
    #[must_use]
    pub fn downcast_ref<T: ReferenceValue>(&self) -> Option<&T> {
        self.as_reference()
            .and_then(|value| (**value).as_any().downcast_ref())
    }

    /// Returns a new handle to a held reference of type `T`.
    #[must_use]
    pub fn shared<T: ReferenceValue>(&self) -> Option<Arc<T>> {
        self.as_reference()
            .and_then(|value| Arc::clone(value).into_any_arc().downcast().ok())
    }

    /// Compares two primitives of the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`KindMismatch`] unless both containers hold primitives of the
    /// same kind. `Empty`, null and references have no ordering.
    pub fn compare(&self, other: &Self) -> Result<Ordering, KindMismatch> {
        match (self, other) {
            (Self::Primitive(a), Self::Primitive(b)) => a.try_cmp(b),
            _ => Err(KindMismatch::new(self.kind(), other.kind())),
        }
    }

    /// Returns a deterministic hash consistent with equality.
    ///
    /// `Empty` and null references hash to `0`.
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        match self {
            Self::Empty | Self::Reference(None) => 0,
            _ => FxBuildHasher.hash_one(self),
        }
    }

    /// Renders the value using `provider`.
    ///
    /// Only primitives are affected by the provider; references render
    /// through their own `Display`.
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if the provider's pattern for this value's kind
    /// is invalid.
    pub fn format_with(&self, provider: &dyn FormatProvider) -> Result<String, fmt::Error> {
        match self {
            Self::Primitive(p) => p.format_with(provider),
            other => Ok(other.to_string()),
        }
    }
}

impl PartialEq for ValueContainer {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Primitive(a), Self::Primitive(b)) => a == b,
            (Self::Reference(None), Self::Reference(None)) => true,
            (Self::Reference(Some(a)), Self::Reference(Some(b))) => a.dyn_eq(&**b),
            _ => false,
        }
    }
}

impl Eq for ValueContainer {}

impl Hash for ValueContainer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Empty => state.write_u8(0),
            Self::Primitive(p) => {
                state.write_u8(1);
                p.hash(state);
            }
            Self::Reference(None) => state.write_u8(2),
            Self::Reference(Some(value)) => {
                state.write_u8(3);
                value.ref_type().hash(state);
                value.dyn_hash(state);
            }
        }
    }
}

impl fmt::Display for ValueContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("None"),
            Self::Primitive(p) => fmt::Display::fmt(p, f),
            Self::Reference(None) => f.write_str("null"),
            Self::Reference(Some(value)) => fmt::Display::fmt(value, f),
        }
    }
}

impl From<Primitive> for ValueContainer {
    #[inline]
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<String> for ValueContainer {
    fn from(value: String) -> Self {
        Self::from_reference(value)
    }
}

impl<T: ReferenceValue> From<Option<Arc<T>>> for ValueContainer {
    fn from(value: Option<Arc<T>>) -> Self {
        match value {
            Some(value) => Self::from_shared(value),
            None => Self::null(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;
    use chrono::NaiveDate;

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Tag(u32);

    impl fmt::Display for Tag {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "#{}", self.0)
        }
    }

    #[test]
    fn discriminant_queries() {
        let empty = ValueContainer::default();
        assert!(empty.is_empty());
        assert!(!empty.is_primitive());
        assert_eq!(empty.kind(), ContainerKind::Empty);

        let number = ValueContainer::from_primitive(7_u16);
        assert!(number.is_primitive());
        assert!(!number.is_reference());
        assert_eq!(number.primitive_kind(), Some(PrimitiveKind::U16));

        let null = ValueContainer::null();
        assert!(null.is_reference());
        assert!(null.is_null());
        assert!(!null.is_primitive());
        assert_eq!(null.kind(), ContainerKind::Null);

        let tag = ValueContainer::from_reference(Tag(1));
        assert!(tag.is_reference());
        assert!(!tag.is_null());
        assert_eq!(tag.kind(), ContainerKind::Reference(RefType::of::<Tag>()));
        assert_eq!(tag.type_kind(), Some(TypeKind::of_ref::<Tag>()));
        assert_eq!(tag.reference_type(), Some(RefType::of::<Tag>()));
        assert_eq!(number.type_kind(), Some(TypeKind::Primitive(PrimitiveKind::U16)));
        assert_eq!(null.type_kind(), None);
        assert_eq!(null.reference_type(), None);
        assert_eq!(empty.type_kind(), None);
    }

    #[test]
    fn primitive_equality() {
        assert_eq!(ValueContainer::from(42_i32), ValueContainer::from(42_i32));
        assert_ne!(ValueContainer::from(42_i32), ValueContainer::from(43_i32));
        assert_ne!(ValueContainer::from(42_i32), ValueContainer::from(42_i64));
    }

    #[test]
    fn reference_equality() {
        let a = ValueContainer::from(String::from("a"));
        assert_eq!(a, ValueContainer::from(String::from("a")));
        assert_ne!(a, ValueContainer::from(String::from("b")));
        assert_ne!(a, ValueContainer::null());
        assert_ne!(ValueContainer::from_reference(Tag(1)), ValueContainer::from_reference(1_u32));
        assert_eq!(ValueContainer::null(), ValueContainer::null());
    }

    #[test]
    fn cross_discriminant_inequality() {
        let all = vec![
            ValueContainer::Empty,
            ValueContainer::null(),
            ValueContainer::from(0_i32),
            ValueContainer::from_reference(0_i32),
        ];
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                assert_eq!(a == b, i == j, "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn hash_code_rules() {
        assert_eq!(ValueContainer::Empty.hash_code(), 0);
        assert_eq!(ValueContainer::null().hash_code(), 0);
        assert_eq!(
            ValueContainer::from(String::from("x")).hash_code(),
            ValueContainer::from(String::from("x")).hash_code()
        );
        assert_eq!(
            ValueContainer::from(0.0_f64).hash_code(),
            ValueContainer::from(-0.0_f64).hash_code()
        );
    }

    #[test]
    fn compare_same_kind() {
        let a = ValueContainer::from(1.5_f32);
        let b = ValueContainer::from(2.5_f32);
        assert_eq!(a.compare(&b), Ok(Ordering::Less));
        assert_eq!(b.compare(&a), Ok(Ordering::Greater));
        assert_eq!(a.compare(&a.clone()), Ok(Ordering::Equal));
    }

    #[test]
    fn compare_rejects_mismatches() {
        let int = ValueContainer::from(1_i32);
        let err = int.compare(&ValueContainer::from(1_u32)).unwrap_err();
        assert_eq!(err.expected, ContainerKind::Primitive(PrimitiveKind::I32));
        assert_eq!(err.found, ContainerKind::Primitive(PrimitiveKind::U32));

        assert!(int.compare(&ValueContainer::Empty).is_err());
        assert!(ValueContainer::null().compare(&ValueContainer::null()).is_err());
        let text = ValueContainer::from(String::from("a"));
        assert!(text.compare(&text.clone()).is_err());
    }

    #[test]
    fn downcast_and_share() {
        let shared = Arc::new(Tag(9));
        let value = ValueContainer::from_shared(Arc::clone(&shared));
        assert_eq!(value.downcast_ref::<Tag>(), Some(&Tag(9)));
        assert_eq!(value.downcast_ref::<String>(), None);

        let handle = value.shared::<Tag>().unwrap();
        assert!(Arc::ptr_eq(&handle, &shared));
        assert!(value.shared::<String>().is_none());
        assert!(ValueContainer::null().shared::<Tag>().is_none());
    }

    #[test]
    fn display() {
        assert_eq!(ValueContainer::Empty.to_string(), "None");
        assert_eq!(ValueContainer::null().to_string(), "null");
        assert_eq!(ValueContainer::from(-5_i8).to_string(), "-5");
        assert_eq!(ValueContainer::from_reference(Tag(3)).to_string(), "#3");
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(ValueContainer::from(date).to_string(), "2025-01-31");
        assert!(format!("{:?}", ValueContainer::from(1_u8)).contains("U8"));
    }

    struct SlashDates;

    impl FormatProvider for SlashDates {
        fn date_pattern(&self) -> &str {
            "%m/%d/%Y"
        }
    }

    struct BrokenTimes;

    impl FormatProvider for BrokenTimes {
        fn time_pattern(&self) -> &str {
            "%H:%Q"
        }
    }

    #[test]
    fn format_with_provider() {
        let date = ValueContainer::from(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!(date.format_with(&SlashDates), Ok("01/31/2025".into()));
        assert_eq!(ValueContainer::Empty.format_with(&SlashDates), Ok("None".into()));
        assert_eq!(
            ValueContainer::from_reference(Tag(4)).format_with(&BrokenTimes),
            Ok("#4".into())
        );

        let noon = ValueContainer::from(chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(noon.format_with(&BrokenTimes), Err(fmt::Error));
    }

    #[test]
    fn container_stays_small() {
        assert!(size_of::<ValueContainer>() <= 32);
    }

    #[test]
    fn option_arc_conversion() {
        let none: Option<Arc<Tag>> = None;
        assert!(ValueContainer::from(none).is_null());
        assert_eq!(
            ValueContainer::from(Some(Arc::new(Tag(2)))),
            ValueContainer::from_reference(Tag(2))
        );
    }
}
