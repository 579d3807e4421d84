// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated property registries.
//!
//! A [`PropertyRegistry`] is built once per host type from its descriptors,
//! assigns each a dense [`SlotIndex`], and is immutable afterwards.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::{HashMap, HashSet};

use crate::descriptor::PropertyDescriptor;
use crate::error::RegistryError;
use crate::id::{PropertyId, SlotIndex};
use crate::kind::TypeKind;

/// A host type that can describe its own properties.
///
/// This is the boundary to whatever produces descriptors for a type, be it
/// hand-written code or a generator.
pub trait PropertySource {
    /// Returns the descriptors of every property of the type.
    fn descriptors() -> Vec<PropertyDescriptor>;
}

/// An immutable map from property id to descriptor and storage slot.
///
/// Slots are assigned `0, 1, 2, ...` in input order, skipping `None` inputs.
/// Registries are `Send + Sync` and are meant to be shared behind an
/// [`Arc`](alloc::sync::Arc) by every instance of a host type.
///
/// # Example
///
/// ```rust
/// use understory_flex::{PropertyDescriptor, PropertyId, PropertyRegistry, SlotIndex};
///
/// let age = PropertyId::new(1);
/// let name = PropertyId::new(2);
///
/// let registry = PropertyRegistry::build([
///     Some(PropertyDescriptor::of::<i32>(age, "Age")),
///     None,
///     Some(PropertyDescriptor::of::<String>(name, "Name")),
/// ])
/// .unwrap();
///
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.slot(age), Some(SlotIndex::new(0)));
/// assert_eq!(registry.slot(name), Some(SlotIndex::new(1)));
/// assert!(registry.lookup(PropertyId::new(99)).is_none());
/// ```
pub struct PropertyRegistry {
    entries: Vec<PropertyDescriptor>,
    by_id: HashMap<PropertyId, SlotIndex>,
}

impl PropertyRegistry {
    /// Builds a registry from descriptors.
    ///
    /// Items may be descriptors or `Option`s of descriptors; `None` items are
    /// skipped without consuming a slot. An empty input builds an empty
    /// registry.
    ///
    /// # Errors
    ///
    /// Fails on the first descriptor whose id was already seen
    /// ([`RegistryError::DuplicateId`]), or whose name and declared type
    /// together were already seen ([`RegistryError::DuplicateNameType`]).
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` descriptors are supplied.
    pub fn build<I>(descriptors: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator,
        I::Item: Into<Option<PropertyDescriptor>>,
    {
        let descriptors = descriptors.into_iter();
        let (lower, _) = descriptors.size_hint();
        let mut entries = Vec::with_capacity(lower);
        let mut by_id = HashMap::with_capacity(lower);
        let mut seen: HashSet<(Cow<'static, str>, TypeKind)> = HashSet::with_capacity(lower);

        for descriptor in descriptors.filter_map(Into::<Option<PropertyDescriptor>>::into) {
            let id = descriptor.id();
            if by_id.contains_key(&id) {
                return Err(RegistryError::DuplicateId(id));
            }
            let key = (descriptor.name_cow().clone(), descriptor.declared_type());
            if seen.contains(&key) {
                let (name, declared_type) = key;
                return Err(RegistryError::DuplicateNameType {
                    name,
                    declared_type,
                });
            }
            seen.insert(key);

            assert!(
                entries.len() < u32::MAX as usize,
                "Too many properties (max {})",
                u32::MAX
            );
            #[expect(clippy::cast_possible_truncation, reason = "checked above")]
            let slot = SlotIndex::new(entries.len() as u32);
            by_id.insert(id, slot);
            entries.push(descriptor);
        }

        #[cfg(feature = "logging")]
        log::debug!("built property registry with {} slots", entries.len());

        Ok(Self { entries, by_id })
    }

    /// Builds the registry of a [`PropertySource`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoProperties`] if the source declares no
    /// properties, and otherwise fails like [`build`](Self::build).
    pub fn from_source<S: PropertySource>() -> Result<Self, RegistryError> {
        let source_type = core::any::type_name::<S>();
        let descriptors = S::descriptors();
        if descriptors.is_empty() {
            return Err(RegistryError::NoProperties { source_type });
        }

        #[cfg(feature = "logging")]
        log::debug!(
            "building property registry for `{source_type}` from {} descriptors",
            descriptors.len()
        );

        Self::build(descriptors)
    }

    /// Returns the descriptor and slot of a property.
    ///
    /// Returns `None` for ids that are not in the registry.
    #[must_use]
    #[inline]
    pub fn lookup(&self, id: PropertyId) -> Option<(&PropertyDescriptor, SlotIndex)> {
        let slot = *self.by_id.get(&id)?;
        self.entries.get(slot.as_usize()).map(|d| (d, slot))
    }

    /// Returns the descriptor of a property.
    #[must_use]
    pub fn descriptor(&self, id: PropertyId) -> Option<&PropertyDescriptor> {
        self.lookup(id).map(|(d, _)| d)
    }

    /// Returns the slot of a property.
    #[must_use]
    pub fn slot(&self, id: PropertyId) -> Option<SlotIndex> {
        self.by_id.get(&id).copied()
    }

    /// Returns `true` if the property is in the registry.
    #[must_use]
    pub fn contains(&self, id: PropertyId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Returns the first descriptor with the given name, in slot order.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.entries.iter().find(|d| d.name() == name)
    }

    /// Returns the number of properties, which is also the number of slots.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the registry has no properties.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over all properties in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &PropertyDescriptor)> {
        self.entries.iter().enumerate().map(|(i, d)| {
            #[expect(clippy::cast_possible_truncation, reason = "index < len <= u32::MAX")]
            (SlotIndex::new(i as u32), d)
        })
    }
}

impl fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRegistry")
            .field("count", &self.entries.len())
            .field(
                "properties",
                &self.entries.iter().map(PropertyDescriptor::name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
