// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Flex: slot-indexed properties for flexible objects.
//!
//! This crate stores strongly but dynamically typed property values by a
//! stable numeric id, without runtime reflection and without allocating for
//! primitive values. It sits beneath a higher-level "flexible object"; the
//! set of properties and the storage layout are chosen by the host type.
//!
//! ## Core Concepts
//!
//! ### Values
//!
//! [`ValueContainer`] holds nothing, a shared (possibly null) reference, or
//! one of nineteen inline [`Primitive`] kinds. Equality, ordering and hashing
//! use each kind's own semantics.
//!
//! ### Registry
//!
//! [`PropertyRegistry`] is built once per host type from
//! [`PropertyDescriptor`]s. It rejects duplicate ids and duplicate
//! `(name, declared type)` pairs, assigns dense [`SlotIndex`]es in input
//! order, and is immutable afterwards.
//!
//! ### Access
//!
//! [`PropertyAccessor`] is implemented by every property-bearing object, and
//! [`PropertyAccessorExt`] provides id-based get and set on top of it. Each
//! call resolves the id, checks the declared type on writes, and delegates to
//! a [`SlotStore`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use understory_flex::{
//!     AccessError, FlexObject, PropertyAccessorExt, PropertyDescriptor, PropertyId,
//!     PropertyRegistry, ValueContainer,
//! };
//!
//! const AGE: PropertyId = PropertyId::new(1);
//! const NAME: PropertyId = PropertyId::new(2);
//!
//! // Build the registry once per host type and share it.
//! let registry = Arc::new(
//!     PropertyRegistry::build([
//!         PropertyDescriptor::of::<i32>(AGE, "Age"),
//!         PropertyDescriptor::of::<String>(NAME, "Name"),
//!     ])
//!     .unwrap(),
//! );
//!
//! let mut person = FlexObject::new(Arc::clone(&registry));
//!
//! // Typed access.
//! person.set(AGE, 42_i32).unwrap();
//! person.set(NAME, String::from("Ada")).unwrap();
//! assert_eq!(person.get::<i32>(AGE), Ok(Some(42)));
//!
//! // Container access.
//! assert_eq!(person.get_value(AGE).unwrap(), ValueContainer::from(42_i32));
//! person.set_value(NAME, ValueContainer::null()).unwrap();
//! assert_eq!(person.get::<String>(NAME), Ok(None));
//!
//! // Declared types are enforced on writes.
//! assert!(matches!(
//!     person.set(AGE, String::from("old")),
//!     Err(AccessError::TypeMismatch { .. })
//! ));
//! ```
//!
//! ## Features
//!
//! - `logging`: emit `log` records when registries are built.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod convert;
mod decimal;
mod descriptor;
mod error;
mod id;
mod kind;
mod object;
mod primitive;
mod registry;
mod store;
mod text;
mod value;

pub use convert::PropertyValue;
pub use decimal::{Decimal, MAX_SCALE};
pub use descriptor::{PropertyDescriptor, ValueComparer};
pub use error::{AccessError, KindMismatch, ParseError, RegistryError};
pub use id::{PropertyId, SlotIndex};
pub use kind::{ContainerKind, PrimitiveKind, RefType, TypeKind};
pub use object::{FlexObject, PropertyAccessor, PropertyAccessorExt};
pub use primitive::Primitive;
pub use registry::{PropertyRegistry, PropertySource};
pub use store::{ContainerStore, SlotStore};
pub use text::{
    DATE_PATTERN, DATE_TIME_OFFSET_PATTERN, DATE_TIME_OFFSET_SECONDS_PATTERN, DATE_TIME_PATTERN,
    FormatProvider, Invariant, TIME_PATTERN, parse_primitive,
};
pub use value::{ReferenceValue, ValueContainer};
