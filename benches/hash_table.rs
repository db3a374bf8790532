use std::collections::HashMap;

use chained_table::HashTable;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use proptest::{
    prelude::{any, Strategy},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn random_items() -> Vec<(String, String)> {
    let mut runner = TestRunner::default();
    proptest::collection::vec(any::<(String, String)>(), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current()
}

fn hash_table_benches(c: &mut Criterion) {
    let items = random_items();

    let mut group = c.benchmark_group("Chained table vs std");
    group.sample_size(SAMPLE_SIZE);

    // the table never grows, so chain length is what the bucket count buys
    for buckets in [8usize, 64, 1024].iter() {
        group.bench_with_input(BenchmarkId::new("chained set", buckets), buckets, |b, &buckets| {
            b.iter(|| {
                let mut table = HashTable::with_capacity(buckets);
                for (key, value) in items.iter().cloned() {
                    table.set(key, value);
                }
                table
            });
        });

        let table: HashTable<_, _> = {
            let mut table = HashTable::with_capacity(*buckets);
            table.extend(items.iter().cloned());
            table
        };
        group.bench_with_input(BenchmarkId::new("chained get", buckets), buckets, |b, _| {
            b.iter(|| {
                for (key, _) in &items {
                    let _ = black_box(table.get(key.as_str()));
                }
            });
        });
    }

    group.bench_function("std insert", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for (key, value) in items.iter().cloned() {
                map.insert(key, value);
            }
            map
        });
    });

    let map: HashMap<_, _> = items.iter().cloned().collect();
    group.bench_function("std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = black_box(map.get(key.as_str()));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, hash_table_benches);

criterion_main!(benches);
