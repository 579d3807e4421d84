// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property descriptors.
//!
//! A [`PropertyDescriptor`] declares one property: its id, name, declared
//! type and optional presentation strings and value comparer.

use alloc::borrow::Cow;
use alloc::sync::Arc;
use core::fmt;

use crate::convert::PropertyValue;
use crate::id::PropertyId;
use crate::kind::TypeKind;
use crate::value::ValueContainer;

/// Custom equality for the values of one property.
pub type ValueComparer = Arc<dyn Fn(&ValueContainer, &ValueContainer) -> bool + Send + Sync>;

/// The declaration of a single property.
///
/// Two properties of one registry may share a name as long as their declared
/// types differ.
///
/// # Example
///
/// ```rust
/// use understory_flex::{PropertyDescriptor, PropertyId, ValueContainer};
///
/// let age = PropertyDescriptor::of::<i32>(PropertyId::new(1), "Age")
///     .with_display_name("Age (years)")
///     .with_description("Age of the person in whole years.");
///
/// assert_eq!(age.name(), "Age");
/// assert_eq!(age.display_name(), Some("Age (years)"));
///
/// // Without a comparer, values compare with `==`.
/// assert!(age.values_equal(&ValueContainer::from(3_i32), &ValueContainer::from(3_i32)));
/// ```
#[derive(Clone)]
pub struct PropertyDescriptor {
    id: PropertyId,
    name: Cow<'static, str>,
    declared_type: TypeKind,
    comparer: Option<ValueComparer>,
    description: Option<Cow<'static, str>>,
    display_name: Option<Cow<'static, str>>,
}

impl PropertyDescriptor {
    /// Creates a descriptor with an explicit declared type.
    #[must_use]
    pub fn new(id: PropertyId, name: impl Into<Cow<'static, str>>, declared_type: TypeKind) -> Self {
        Self {
            id,
            name: name.into(),
            declared_type,
            comparer: None,
            description: None,
            display_name: None,
        }
    }

    /// Creates a descriptor whose declared type is that of `T`.
    #[must_use]
    pub fn of<T: PropertyValue>(id: PropertyId, name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(id, name, T::type_kind())
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the name shown to users.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<Cow<'static, str>>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets a custom equality for values of this property.
    #[must_use]
    pub fn with_comparer<F>(mut self, comparer: F) -> Self
    where
        F: Fn(&ValueContainer, &ValueContainer) -> bool + Send + Sync + 'static,
    {
        self.comparer = Some(Arc::new(comparer));
        self
    }

    /// Returns the property id.
    #[must_use]
    #[inline]
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// Returns the property name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type.
    #[must_use]
    #[inline]
    pub fn declared_type(&self) -> TypeKind {
        self.declared_type
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the custom comparer, if any.
    #[must_use]
    pub fn comparer(&self) -> Option<&ValueComparer> {
        self.comparer.as_ref()
    }

    /// Compares two values of this property.
    ///
    /// Uses the custom comparer when one is set, `==` otherwise.
    #[must_use]
    pub fn values_equal(&self, a: &ValueContainer, b: &ValueContainer) -> bool {
        match &self.comparer {
            Some(comparer) => comparer(a, b),
            None => a == b,
        }
    }

    pub(crate) fn name_cow(&self) -> &Cow<'static, str> {
        &self.name
    }
}

// Comparers aren't Debug.
impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("has_comparer", &self.comparer.is_some())
            .field("description", &self.description)
            .field("display_name", &self.display_name)
            .finish()
    }
}
