// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property and slot identification types.
//!
//! This module provides [`PropertyId`], the stable identifier a host type
//! assigns to each of its properties, and [`SlotIndex`], the dense position a
//! [`PropertyRegistry`](crate::PropertyRegistry) assigns to it.

use core::fmt;

/// A stable numeric property identifier.
///
/// Ids are chosen by whoever describes the host type (hand-written
/// descriptors or a generator), not by the registry. They only need to be
/// unique within one registry.
///
/// # Example
///
/// ```rust
/// use understory_flex::PropertyId;
///
/// let id = PropertyId::new(42);
/// assert_eq!(id.get(), 42);
/// assert_eq!(id, PropertyId::from(42_u32));
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(u32);

impl PropertyId {
    /// Creates a property id from its raw value.
    #[must_use]
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value of this id.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for PropertyId {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<PropertyId> for u32 {
    #[inline]
    fn from(id: PropertyId) -> Self {
        id.0
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyId").field(&self.0).finish()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyId({})", self.0)
    }
}

/// The dense, zero-based storage position of a property within one registry.
///
/// Slot indices are only meaningful together with the registry that
/// assigned them. Backing stores use them to address their storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotIndex(u32);

impl SlotIndex {
    /// Creates a slot index.
    ///
    /// This is normally done by [`PropertyRegistry::build`](crate::PropertyRegistry::build);
    /// stores and tests may construct indices directly.
    #[must_use]
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the index as a `usize`, for indexing into slices.
    #[must_use]
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}
