// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance slot storage.
//!
//! This module provides the [`SlotStore`] contract a host type implements for
//! its backing storage, and [`ContainerStore`], a ready-made store holding one
//! [`ValueContainer`] per slot.
//!
//! # Tiers
//!
//! `SlotStore` has two tiers:
//!
//! - a required non-generic tier ([`load`](SlotStore::load) and
//!   [`exchange`](SlotStore::exchange)) that moves [`ValueContainer`]s;
//! - a generic tier ([`get_at`](SlotStore::get_at) and
//!   [`set_at`](SlotStore::set_at)) with default implementations on top of
//!   the first. Stores with a typed layout may override it to avoid going
//!   through a container.

use smallvec::SmallVec;

use crate::convert::PropertyValue;
use crate::error::AccessError;
use crate::id::SlotIndex;
use crate::registry::PropertyRegistry;
use crate::value::ValueContainer;

/// Default inline capacity for slots.
///
/// Most flexible objects have only a handful of properties, so this avoids
/// heap allocation in the common case.
const INLINE_CAPACITY: usize = 8;

/// Backing storage addressed by [`SlotIndex`].
///
/// Slot indices come from the [`PropertyRegistry`] the store was sized for.
pub trait SlotStore {
    /// Returns a copy of the value in `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::SlotOutOfRange`] for a slot the store lacks.
    fn load(&self, slot: SlotIndex) -> Result<ValueContainer, AccessError>;

    /// Replaces the value in `slot` and returns the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::SlotOutOfRange`] for a slot the store lacks.
    fn exchange(
        &mut self,
        slot: SlotIndex,
        value: ValueContainer,
    ) -> Result<ValueContainer, AccessError>;

    /// Returns the value in `slot` as a `T`, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidDiscriminant`] if the slot holds a value
    /// of another kind, or [`AccessError::SlotOutOfRange`].
    fn get_at<T: PropertyValue>(&self, slot: SlotIndex) -> Result<Option<T>, AccessError>
    where
        Self: Sized,
    {
        Ok(T::from_container(&self.load(slot)?)?)
    }

    /// Stores `value` in `slot` and returns the previous value as a `T`.
    ///
    /// The previous value is `None` if the slot was empty, or if it held a
    /// value of another kind.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::SlotOutOfRange`].
    fn set_at<T: PropertyValue>(&mut self, slot: SlotIndex, value: T) -> Result<Option<T>, AccessError>
    where
        Self: Sized,
    {
        let previous = self.exchange(slot, value.into_container())?;
        Ok(T::from_container(&previous).ok().flatten())
    }
}

/// A store holding one [`ValueContainer`] per slot.
///
/// The first eight slots are stored inline without heap allocation. Every
/// slot starts [`Empty`](ValueContainer::Empty).
///
/// # Example
///
/// ```rust
/// use understory_flex::{ContainerStore, SlotIndex, SlotStore};
///
/// let mut store = ContainerStore::with_slots(2);
/// let slot = SlotIndex::new(1);
///
/// assert_eq!(store.get_at::<i32>(slot), Ok(None));
/// assert_eq!(store.set_at(slot, 5_i32), Ok(None));
/// assert_eq!(store.set_at(slot, 6_i32), Ok(Some(5)));
/// assert_eq!(store.get_at::<i32>(slot), Ok(Some(6)));
///
/// assert!(store.load(SlotIndex::new(2)).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerStore {
    slots: SmallVec<[ValueContainer; INLINE_CAPACITY]>,
}

impl ContainerStore {
    /// Creates a store with `len` empty slots.
    #[must_use]
    pub fn with_slots(len: usize) -> Self {
        let mut slots = SmallVec::new();
        slots.resize(len, ValueContainer::Empty);
        Self { slots }
    }

    /// Creates a store with one empty slot per property of `registry`.
    #[must_use]
    pub fn for_registry(registry: &PropertyRegistry) -> Self {
        Self::with_slots(registry.len())
    }

    /// Returns the number of slots.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the store has no slots.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns a reference to the value in `slot`.
    #[must_use]
    pub fn get(&self, slot: SlotIndex) -> Option<&ValueContainer> {
        self.slots.get(slot.as_usize())
    }

    /// Returns the number of slots holding a value.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|v| !v.is_empty()).count()
    }

    /// Returns an iterator over all slots and their values.
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &ValueContainer)> {
        self.slots.iter().enumerate().map(|(i, v)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "stores are sized from registries, which have at most u32::MAX slots"
            )]
            (SlotIndex::new(i as u32), v)
        })
    }

    fn slot_mut(&mut self, slot: SlotIndex) -> Result<&mut ValueContainer, AccessError> {
        let len = self.slots.len();
        self.slots
            .get_mut(slot.as_usize())
            .ok_or(AccessError::SlotOutOfRange { slot, len })
    }
}

impl SlotStore for ContainerStore {
    fn load(&self, slot: SlotIndex) -> Result<ValueContainer, AccessError> {
        self.get(slot).cloned().ok_or(AccessError::SlotOutOfRange {
            slot,
            len: self.slots.len(),
        })
    }

    fn exchange(
        &mut self,
        slot: SlotIndex,
        value: ValueContainer,
    ) -> Result<ValueContainer, AccessError> {
        Ok(core::mem::replace(self.slot_mut(slot)?, value))
    }

    fn get_at<T: PropertyValue>(&self, slot: SlotIndex) -> Result<Option<T>, AccessError> {
        let value = self.get(slot).ok_or(AccessError::SlotOutOfRange {
            slot,
            len: self.slots.len(),
        })?;
        Ok(T::from_container(value)?)
    }
}
