//! Benchmark for AvlTreeMap and RedBlackTreeMap vs standard BTreeMap.
//!
//! Compares both balancing schemes against Rust's standard BTreeMap for
//! insertion (ascending and scattered keys), lookup, removal and iteration.

use arbor::tree::{AvlTreeMap, RedBlackTreeMap};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;

const SIZES: [u32; 3] = [100, 1_000, 10_000];

/// A fixed permutation of `0..size` that avoids degenerate ascending input.
fn scattered(size: u32) -> Vec<u32> {
    // 2654435761 is coprime with every size used here.
    (0..size)
        .map(|index| ((u64::from(index) * 2_654_435_761) % u64::from(size)) as u32)
        .collect()
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in SIZES {
        let keys = scattered(size);

        group.bench_with_input(BenchmarkId::new("AvlTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = AvlTreeMap::new();
                for &key in keys {
                    map.insert(black_box(key), black_box(key * 2));
                }
                black_box(map)
            });
        });

        group.bench_with_input(
            BenchmarkId::new("RedBlackTreeMap", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    let mut map = RedBlackTreeMap::new();
                    for &key in keys {
                        map.insert(black_box(key), black_box(key * 2));
                    }
                    black_box(map)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for &key in keys {
                    map.insert(black_box(key), black_box(key * 2));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// insert_ascending Benchmark
// =============================================================================

fn benchmark_insert_ascending(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert_ascending");

    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("AvlTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = AvlTreeMap::with_capacity(size as usize);
                for key in 0..size {
                    map.insert(black_box(key), key);
                }
                black_box(map)
            });
        });

        group.bench_with_input(
            BenchmarkId::new("RedBlackTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = RedBlackTreeMap::with_capacity(size as usize);
                    for key in 0..size {
                        map.insert(black_box(key), key);
                    }
                    black_box(map)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for key in 0..size {
                    map.insert(black_box(key), key);
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in SIZES {
        let keys = scattered(size);
        let avl_map: AvlTreeMap<u32, u32> = keys.iter().map(|&key| (key, key)).collect();
        let red_black_map: RedBlackTreeMap<u32, u32> = keys.iter().map(|&key| (key, key)).collect();
        let standard_map: BTreeMap<u32, u32> = keys.iter().map(|&key| (key, key)).collect();

        group.bench_with_input(BenchmarkId::new("AvlTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0_u64;
                for key in 0..size {
                    if let Some(&value) = avl_map.get(&black_box(key)) {
                        sum += u64::from(value);
                    }
                }
                black_box(sum)
            });
        });

        group.bench_with_input(
            BenchmarkId::new("RedBlackTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0_u64;
                    for key in 0..size {
                        if let Some(&value) = red_black_map.get(&black_box(key)) {
                            sum += u64::from(value);
                        }
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0_u64;
                for key in 0..size {
                    if let Some(&value) = standard_map.get(&black_box(key)) {
                        sum += u64::from(value);
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove");

    for size in SIZES {
        let keys = scattered(size);
        let avl_map: AvlTreeMap<u32, u32> = (0..size).map(|key| (key, key)).collect();
        let red_black_map: RedBlackTreeMap<u32, u32> = (0..size).map(|key| (key, key)).collect();
        let standard_map: BTreeMap<u32, u32> = (0..size).map(|key| (key, key)).collect();

        group.bench_with_input(BenchmarkId::new("AvlTreeMap", size), &keys, |bencher, keys| {
            bencher.iter_batched(
                || avl_map.clone(),
                |mut map| {
                    for key in keys {
                        black_box(map.remove(key));
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_with_input(
            BenchmarkId::new("RedBlackTreeMap", size),
            &keys,
            |bencher, keys| {
                bencher.iter_batched(
                    || red_black_map.clone(),
                    |mut map| {
                        for key in keys {
                            black_box(map.remove(key));
                        }
                        map
                    },
                    criterion::BatchSize::LargeInput,
                );
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter_batched(
                || standard_map.clone(),
                |mut map| {
                    for key in keys {
                        black_box(map.remove(key));
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// iter Benchmark
// =============================================================================

fn benchmark_iter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iter");

    for size in SIZES {
        let avl_map: AvlTreeMap<u32, u32> = (0..size).map(|key| (key, key)).collect();
        let red_black_map: RedBlackTreeMap<u32, u32> = (0..size).map(|key| (key, key)).collect();
        let standard_map: BTreeMap<u32, u32> = (0..size).map(|key| (key, key)).collect();

        group.bench_function(BenchmarkId::new("AvlTreeMap", size), |bencher| {
            bencher.iter(|| black_box(avl_map.iter().map(|(_, &value)| u64::from(value)).sum::<u64>()));
        });

        group.bench_function(BenchmarkId::new("RedBlackTreeMap", size), |bencher| {
            bencher.iter(|| {
                black_box(
                    red_black_map
                        .iter()
                        .map(|(_, &value)| u64::from(value))
                        .sum::<u64>(),
                )
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", size), |bencher| {
            bencher.iter(|| {
                black_box(
                    standard_map
                        .iter()
                        .map(|(_, &value)| u64::from(value))
                        .sum::<u64>(),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_insert_ascending,
    benchmark_get,
    benchmark_remove,
    benchmark_iter
);

criterion_main!(benches);
