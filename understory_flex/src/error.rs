// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! ```text
//! RegistryError      - building a registry (fatal for that input)
//! AccessError        - getting or setting a property on an instance
//! └── KindMismatch   - a value container held a different kind than required
//! ParseError         - parsing the invariant text form of a primitive
//! ```
//!
//! Every error is returned to the immediate caller. Nothing in this crate
//! retries, logs or swallows an error.

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use thiserror::Error;

use crate::id::{PropertyId, SlotIndex};
use crate::kind::{ContainerKind, PrimitiveKind, TypeKind};

/// Errors raised while building a [`PropertyRegistry`](crate::PropertyRegistry).
///
/// Building with the same descriptors again fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two descriptors share a property id.
    #[error("duplicate property id found: {0}")]
    DuplicateId(PropertyId),

    /// Two descriptors share both name and declared type.
    #[error("duplicate property name and type combination found: ({name}, {declared_type})")]
    DuplicateNameType {
        /// The repeated name.
        name: Cow<'static, str>,
        /// The repeated declared type.
        declared_type: TypeKind,
    },

    /// A [`PropertySource`](crate::PropertySource) produced no descriptors.
    #[error("type `{source_type}` does not declare any properties")]
    NoProperties {
        /// Type name of the source.
        source_type: &'static str,
    },
}

/// A value container held a different kind of value than required.
///
/// This signals a programming error: comparing primitives of different
/// kinds, or reading a slot as a type other than the one stored in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected a {expected} value, found {found}")]
pub struct KindMismatch {
    /// The kind the operation required.
    pub expected: ContainerKind,
    /// The kind actually present.
    pub found: ContainerKind,
}

impl KindMismatch {
    /// Creates a kind mismatch error.
    #[must_use]
    pub fn new(expected: ContainerKind, found: ContainerKind) -> Self {
        Self { expected, found }
    }
}

/// Errors raised by property access through a
/// [`PropertyAccessor`](crate::PropertyAccessor) or a
/// [`SlotStore`](crate::SlotStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The property id is not in the instance's registry.
    #[error("property {0} is not defined on the type")]
    UnknownProperty(PropertyId),

    /// The value cannot be stored in a property of the declared type.
    #[error("property {id} is declared as {declared}, cannot assign {found}")]
    TypeMismatch {
        /// The property being set.
        id: PropertyId,
        /// Its declared type.
        declared: TypeKind,
        /// The kind of the rejected value.
        found: ContainerKind,
    },

    /// The stored value is not of the requested kind.
    #[error(transparent)]
    InvalidDiscriminant(#[from] KindMismatch),

    /// The store has no such slot.
    #[error("{slot} is out of range for a store with {len} slots")]
    SlotOutOfRange {
        /// The requested slot.
        slot: SlotIndex,
        /// Number of slots in the store.
        len: usize,
    },
}

/// The text could not be parsed as the invariant form of a primitive kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} literal `{input}`")]
pub struct ParseError {
    /// The kind that was being parsed.
    pub kind: PrimitiveKind,
    /// The rejected input.
    pub input: String,
}

impl ParseError {
    pub(crate) fn new(kind: PrimitiveKind, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }
}
