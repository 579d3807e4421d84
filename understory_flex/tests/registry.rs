// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for building and querying `PropertyRegistry`.

use std::borrow::Cow;
use std::sync::Arc;
use std::thread;

use understory_flex::{
    PrimitiveKind, PropertyDescriptor, PropertyId, PropertyRegistry, PropertySource,
    RegistryError, SlotIndex, TypeKind,
};

fn descriptor(id: u32, name: &'static str) -> PropertyDescriptor {
    PropertyDescriptor::of::<i32>(PropertyId::new(id), name)
}

#[test]
fn age_and_name_lookup() {
    let registry = PropertyRegistry::build([
        PropertyDescriptor::of::<i32>(PropertyId::new(1), "Age"),
        PropertyDescriptor::of::<String>(PropertyId::new(2), "Name"),
    ])
    .unwrap();

    let (age, slot) = registry.lookup(PropertyId::new(1)).unwrap();
    assert_eq!(slot, SlotIndex::new(0));
    assert_eq!(age.name(), "Age");
    assert_eq!(age.declared_type(), TypeKind::Primitive(PrimitiveKind::I32));

    let (name, slot) = registry.lookup(PropertyId::new(2)).unwrap();
    assert_eq!(slot, SlotIndex::new(1));
    assert_eq!(name.declared_type(), TypeKind::of_ref::<String>());

    assert!(registry.lookup(PropertyId::new(3)).is_none());
}

#[test]
fn slots_follow_supplied_order_skipping_nulls() {
    let registry = PropertyRegistry::build([
        None,
        Some(descriptor(30, "C")),
        Some(descriptor(10, "A")),
        None,
        Some(descriptor(20, "B")),
    ])
    .unwrap();

    let order: Vec<_> = registry.iter().map(|(slot, d)| (slot.get(), d.id().get())).collect();
    assert_eq!(order, vec![(0, 30), (1, 10), (2, 20)]);
}

#[test]
fn reordering_other_descriptors_keeps_lookup_stable() {
    let target = descriptor(7, "Target");
    let others = [descriptor(1, "A"), descriptor(2, "B"), descriptor(3, "C")];

    let permutations = [[0, 1, 2], [2, 1, 0], [1, 2, 0], [0, 2, 1]];
    let mut results = Vec::new();
    for perm in permutations {
        let mut input = vec![target.clone()];
        input.extend(perm.iter().map(|&i| others[i].clone()));
        let registry = PropertyRegistry::build(input).unwrap();
        let (d, slot) = registry.lookup(PropertyId::new(7)).unwrap();
        results.push((d.name().to_owned(), d.declared_type(), slot));
    }
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn duplicate_id_fails() {
    let err = PropertyRegistry::build([descriptor(1, "A"), descriptor(2, "B"), descriptor(1, "C")])
        .unwrap_err();
    assert_eq!(err, RegistryError::DuplicateId(PropertyId::new(1)));
    assert!(err.to_string().contains("PropertyId(1)"));
}

#[test]
fn duplicate_name_and_type_fails() {
    let err = PropertyRegistry::build([descriptor(1, "A"), descriptor(2, "A")]).unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateNameType {
            name: Cow::Borrowed("A"),
            declared_type: TypeKind::Primitive(PrimitiveKind::I32),
        }
    );
}

#[test]
fn duplicate_id_is_reported_before_name() {
    // Same id and same name: the id check runs first.
    let err = PropertyRegistry::build([descriptor(1, "A"), descriptor(1, "A")]).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateId(PropertyId::new(1)));
}

#[test]
fn distinct_names_with_same_type_succeed() {
    let registry =
        PropertyRegistry::build([descriptor(1, "A"), descriptor(2, "B"), descriptor(3, "C")])
            .unwrap();
    assert_eq!(registry.len(), 3);
}

#[test]
fn owned_names_are_accepted() {
    let names: Vec<String> = (0..4).map(|i| format!("P{i}")).collect();
    let registry = PropertyRegistry::build(
        names
            .iter()
            .zip(1..)
            .map(|(n, id)| PropertyDescriptor::of::<u8>(PropertyId::new(id), n.clone())),
    )
    .unwrap();
    assert_eq!(registry.by_name("P2").map(|d| d.id()), Some(PropertyId::new(3)));
}

#[test]
fn unknown_ids_are_never_errors() {
    let registry = PropertyRegistry::build([descriptor(1, "A")]).unwrap();
    for id in [0, 2, u32::MAX] {
        assert!(registry.lookup(PropertyId::new(id)).is_none());
        assert!(registry.slot(PropertyId::new(id)).is_none());
        assert!(!registry.contains(PropertyId::new(id)));
    }
}

struct Widget;

impl PropertySource for Widget {
    fn descriptors() -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::of::<f64>(PropertyId::new(1), "Width")
                .with_display_name("Width")
                .with_description("Horizontal extent in pixels."),
            PropertyDescriptor::of::<f64>(PropertyId::new(2), "Height"),
        ]
    }
}

struct Marker;

impl PropertySource for Marker {
    fn descriptors() -> Vec<PropertyDescriptor> {
        Vec::new()
    }
}

#[test]
fn empty_input_policy() {
    // Accepted by the registry itself...
    let registry = PropertyRegistry::build(Vec::<PropertyDescriptor>::new()).unwrap();
    assert!(registry.is_empty());

    // ...rejected for a source type with no properties.
    assert!(matches!(
        PropertyRegistry::from_source::<Marker>(),
        Err(RegistryError::NoProperties { .. })
    ));

    let widget = PropertyRegistry::from_source::<Widget>().unwrap();
    assert_eq!(
        widget.descriptor(PropertyId::new(1)).and_then(|d| d.description()),
        Some("Horizontal extent in pixels.")
    );
}

#[test]
fn concurrent_lookups() {
    let registry = Arc::new(PropertyRegistry::from_source::<Widget>().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                (0..1000).all(|_| {
                    registry.slot(PropertyId::new(2)) == Some(SlotIndex::new(1))
                        && registry.lookup(PropertyId::new(3)).is_none()
                })
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
