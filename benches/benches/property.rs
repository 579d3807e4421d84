// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_flex`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::{Arc, Once};
use std::{string::String, vec::Vec};

use understory_flex::{
    ContainerStore, FlexObject, PropertyAccessorExt, PropertyDescriptor, PropertyId,
    PropertyRegistry, ValueContainer,
};

const WIDTH: PropertyId = PropertyId::new(1);
const TEXT: PropertyId = PropertyId::new(2);

fn registry(extra: u32) -> Arc<PropertyRegistry> {
    let mut descriptors: Vec<PropertyDescriptor> = vec![
        PropertyDescriptor::of::<f64>(WIDTH, "Width"),
        PropertyDescriptor::of::<String>(TEXT, "Text"),
    ];
    descriptors.extend((0..extra).map(|i| {
        PropertyDescriptor::of::<i32>(PropertyId::new(100 + i), format!("Extra{i}"))
    }));
    Arc::new(PropertyRegistry::build(descriptors).unwrap())
}

fn bench_property(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: ValueContainer={} ContainerStore={} FlexObject={}",
            size_of::<ValueContainer>(),
            size_of::<ContainerStore>(),
            size_of::<FlexObject>(),
        );
    });

    let mut group = c.benchmark_group("property/lookup");
    for extra in [0_u32, 16, 256] {
        let registry = registry(extra);
        group.bench_function(BenchmarkId::new("hit", registry.len()), |b| {
            b.iter(|| black_box(registry.lookup(black_box(WIDTH)).map(|(_, slot)| slot)));
        });
        group.bench_function(BenchmarkId::new("miss", registry.len()), |b| {
            b.iter(|| black_box(registry.lookup(black_box(PropertyId::new(99)))));
        });
    }
    group.finish();

    let registry = registry(6);

    let mut group = c.benchmark_group("property/get");

    group.bench_function("typed/f64", |b| {
        let mut object = FlexObject::new(Arc::clone(&registry));
        object.set(WIDTH, 100.0_f64).unwrap();
        b.iter(|| black_box(object.get::<f64>(black_box(WIDTH))));
    });

    group.bench_function("container/f64", |b| {
        let mut object = FlexObject::new(Arc::clone(&registry));
        object.set(WIDTH, 100.0_f64).unwrap();
        b.iter(|| black_box(object.get_value(black_box(WIDTH))));
    });

    group.bench_function("typed/string", |b| {
        let mut object = FlexObject::new(Arc::clone(&registry));
        object
            .set(TEXT, "hello world hello world hello world".to_string())
            .unwrap();
        b.iter(|| black_box(object.get::<String>(black_box(TEXT))));
    });

    group.bench_function("container/string", |b| {
        let mut object = FlexObject::new(Arc::clone(&registry));
        object
            .set(TEXT, "hello world hello world hello world".to_string())
            .unwrap();
        b.iter(|| black_box(object.get_value(black_box(TEXT))));
    });

    group.finish();

    let mut group = c.benchmark_group("property/set");

    group.bench_function("typed/f64", |b| {
        b.iter_batched(
            || FlexObject::new(Arc::clone(&registry)),
            |mut object| {
                black_box(object.set(WIDTH, 123.0_f64).unwrap());
                black_box(object);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("container/f64", |b| {
        b.iter_batched(
            || FlexObject::new(Arc::clone(&registry)),
            |mut object| {
                black_box(object.set_value(WIDTH, ValueContainer::from(123.0_f64)).unwrap());
                black_box(object);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("typed/string", |b| {
        b.iter_batched(
            || FlexObject::new(Arc::clone(&registry)),
            |mut object| {
                black_box(object.set(TEXT, String::from("hello world")).unwrap());
                black_box(object);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("rejected", |b| {
        let mut object = FlexObject::new(Arc::clone(&registry));
        b.iter(|| black_box(object.set(WIDTH, black_box(1_i32)).is_err()));
    });

    group.finish();

    let mut group = c.benchmark_group("property/hash");
    let values = [
        ValueContainer::from(42_i32),
        ValueContainer::from(1.5_f64),
        ValueContainer::from(String::from("hello")),
        ValueContainer::null(),
    ];
    for value in &values {
        group.bench_function(BenchmarkId::new("hash_code", value.kind()), |b| {
            b.iter(|| black_box(black_box(value).hash_code()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_property);
criterion_main!(benches);
