// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property access on flexible objects.
//!
//! This module provides the [`PropertyAccessor`] trait for objects whose
//! properties are described by a [`PropertyRegistry`], and
//! [`PropertyAccessorExt`] for id-based get and set with type checking.
//!
//! Every call resolves the id against the registry, checks the declared type
//! where needed, and delegates to the object's [`SlotStore`].

use alloc::sync::Arc;

use crate::convert::PropertyValue;
use crate::descriptor::PropertyDescriptor;
use crate::error::AccessError;
use crate::id::{PropertyId, SlotIndex};
use crate::kind::TypeKind;
use crate::registry::PropertyRegistry;
use crate::store::{ContainerStore, SlotStore};
use crate::value::ValueContainer;

/// A trait for objects that carry registry-described properties.
///
/// This trait provides access to the object's registry and slot store,
/// enabling the extension methods in [`PropertyAccessorExt`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use understory_flex::{ContainerStore, PropertyAccessor, PropertyRegistry};
///
/// struct Person {
///     registry: Arc<PropertyRegistry>,
///     store: ContainerStore,
/// }
///
/// impl PropertyAccessor for Person {
///     type Store = ContainerStore;
///
///     fn registry(&self) -> &PropertyRegistry {
///         &self.registry
///     }
///
///     fn store(&self) -> &ContainerStore {
///         &self.store
///     }
///
///     fn store_mut(&mut self) -> &mut ContainerStore {
///         &mut self.store
///     }
/// }
/// ```
pub trait PropertyAccessor {
    /// The backing store.
    type Store: SlotStore;

    /// Returns the registry describing this object's properties.
    fn registry(&self) -> &PropertyRegistry;

    /// Returns a reference to the backing store.
    fn store(&self) -> &Self::Store;

    /// Returns a mutable reference to the backing store.
    fn store_mut(&mut self) -> &mut Self::Store;
}

/// Extension methods for [`PropertyAccessor`].
pub trait PropertyAccessorExt: PropertyAccessor {
    /// Gets a property value as a `T`.
    ///
    /// Returns `Ok(None)` if the property has no value. The declared type is
    /// not checked; the store decides whether its value reads as a `T`.
    ///
    /// # Errors
    ///
    /// - [`AccessError::UnknownProperty`] if the id is not in the registry.
    /// - [`AccessError::InvalidDiscriminant`] if the stored value is not a `T`.
    fn get<T: PropertyValue>(&self, id: PropertyId) -> Result<Option<T>, AccessError> {
        let slot = self.registry().slot(id).ok_or(AccessError::UnknownProperty(id))?;
        self.store().get_at(slot)
    }

    /// Sets a property value and returns the previous value as a `T`.
    ///
    /// # Errors
    ///
    /// - [`AccessError::UnknownProperty`] if the id is not in the registry.
    /// - [`AccessError::TypeMismatch`] if `T` is not assignable to the
    ///   declared type. The store is left untouched.
    fn set<T: PropertyValue>(&mut self, id: PropertyId, value: T) -> Result<Option<T>, AccessError> {
        let (declared, slot) = resolve(self.registry(), id)?;
        if !declared.is_assignable_from(T::type_kind()) {
            return Err(AccessError::TypeMismatch {
                id,
                declared,
                found: value.into_container().kind(),
            });
        }
        self.store_mut().set_at(slot, value)
    }

    /// Gets a property value as a container.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::UnknownProperty`] if the id is not in the
    /// registry.
    fn get_value(&self, id: PropertyId) -> Result<ValueContainer, AccessError> {
        let slot = self.registry().slot(id).ok_or(AccessError::UnknownProperty(id))?;
        self.store().load(slot)
    }

    /// Sets a property value from a container and returns the previous one.
    ///
    /// [`Empty`](ValueContainer::Empty) is accepted for every property and
    /// clears it. Null is accepted for reference and `Any` properties.
    ///
    /// # Errors
    ///
    /// - [`AccessError::UnknownProperty`] if the id is not in the registry.
    /// - [`AccessError::TypeMismatch`] if the value is not assignable to the
    ///   declared type. The store is left untouched.
    fn set_value(
        &mut self,
        id: PropertyId,
        value: ValueContainer,
    ) -> Result<ValueContainer, AccessError> {
        let (declared, slot) = resolve(self.registry(), id)?;
        let found = value.kind();
        if !declared.accepts(found) {
            return Err(AccessError::TypeMismatch {
                id,
                declared,
                found,
            });
        }
        self.store_mut().exchange(slot, value)
    }

    /// Clears a property and returns its previous value.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::UnknownProperty`] if the id is not in the
    /// registry.
    fn clear(&mut self, id: PropertyId) -> Result<ValueContainer, AccessError> {
        self.set_value(id, ValueContainer::Empty)
    }

    /// Returns `true` if the id is in this object's registry.
    fn has_property(&self, id: PropertyId) -> bool {
        self.registry().contains(id)
    }

    /// Returns the descriptor of a property.
    fn descriptor(&self, id: PropertyId) -> Option<&PropertyDescriptor> {
        self.registry().descriptor(id)
    }

    /// Compares the current value of a property with `candidate`.
    ///
    /// Uses the descriptor's comparer when it has one.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::UnknownProperty`] if the id is not in the
    /// registry.
    fn value_equals(&self, id: PropertyId, candidate: &ValueContainer) -> Result<bool, AccessError> {
        let (descriptor, slot) = self
            .registry()
            .lookup(id)
            .ok_or(AccessError::UnknownProperty(id))?;
        let current = self.store().load(slot)?;
        Ok(descriptor.values_equal(&current, candidate))
    }
}

impl<A: PropertyAccessor + ?Sized> PropertyAccessorExt for A {}

fn resolve(registry: &PropertyRegistry, id: PropertyId) -> Result<(TypeKind, SlotIndex), AccessError> {
    registry
        .lookup(id)
        .map(|(descriptor, slot)| (descriptor.declared_type(), slot))
        .ok_or(AccessError::UnknownProperty(id))
}

/// A flexible object: a shared registry plus per-instance storage.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use understory_flex::{
///     AccessError, FlexObject, PropertyAccessorExt, PropertyDescriptor, PropertyId,
///     PropertyRegistry,
/// };
///
/// let age = PropertyId::new(1);
/// let name = PropertyId::new(2);
/// let registry = Arc::new(
///     PropertyRegistry::build([
///         PropertyDescriptor::of::<i32>(age, "Age"),
///         PropertyDescriptor::of::<String>(name, "Name"),
///     ])
///     .unwrap(),
/// );
///
/// let mut person = FlexObject::new(Arc::clone(&registry));
/// person.set(age, 42_i32).unwrap();
/// assert_eq!(person.get::<i32>(age), Ok(Some(42)));
///
/// let err = person.set(age, String::from("x")).unwrap_err();
/// assert!(matches!(err, AccessError::TypeMismatch { .. }));
/// assert_eq!(person.get::<i32>(age), Ok(Some(42)));
///
/// assert_eq!(
///     person.get::<i32>(PropertyId::new(99)),
///     Err(AccessError::UnknownProperty(PropertyId::new(99)))
/// );
/// ```
#[derive(Clone, Debug)]
pub struct FlexObject<S = ContainerStore> {
    registry: Arc<PropertyRegistry>,
    store: S,
}

impl FlexObject<ContainerStore> {
    /// Creates an object with one empty slot per property of `registry`.
    #[must_use]
    pub fn new(registry: Arc<PropertyRegistry>) -> Self {
        let store = ContainerStore::for_registry(&registry);
        Self { registry, store }
    }
}

impl<S: SlotStore> FlexObject<S> {
    /// Creates an object over a caller-supplied store.
    ///
    /// The store must have a slot for every property of `registry`.
    #[must_use]
    pub fn with_store(registry: Arc<PropertyRegistry>, store: S) -> Self {
        Self { registry, store }
    }

    /// Returns the shared registry.
    #[must_use]
    pub fn shared_registry(&self) -> &Arc<PropertyRegistry> {
        &self.registry
    }

    /// Consumes the object and returns its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: SlotStore> PropertyAccessor for FlexObject<S> {
    type Store = S;

    #[inline]
    fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    #[inline]
    fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
