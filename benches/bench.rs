use std::env;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use once_cell::sync::OnceCell;
use regex::Regex;

use pivot_experiment::measure::pin_thread_to_core;
use pivot_experiment::{generate, sort_with, Distribution, Order, PivotMethod, RandomStream};

const BENCH_SEED: u64 = 200;

fn pin_once() {
    use std::cell::Cell;
    let pin_core_id: usize = 2;

    thread_local! {static AFFINITY_ALREADY_SET: Cell<bool> = Cell::new(false); }

    // Set affinity only once per thread.
    AFFINITY_ALREADY_SET.with(|affinity_already_set| {
        if !affinity_already_set.get() {
            pin_thread_to_core(pin_core_id);
            affinity_already_set.set(true);
        }
    });
}

fn is_bench_name_ok(name: &str) -> bool {
    static FILTER_REGEX: OnceCell<Option<Regex>> = OnceCell::new();

    let filter_regex = FILTER_REGEX.get_or_init(|| {
        env::var("CUSTOM_BENCH_REGEX")
            .ok()
            .map(|filter_regex| Regex::new(&filter_regex).expect("invalid CUSTOM_BENCH_REGEX"))
    });

    filter_regex
        .as_ref()
        .map(|reg| reg.is_match(name))
        .unwrap_or(true)
}

#[derive(Copy, Clone)]
struct InputShape {
    name: &'static str,
    order: Order,
    shuffle_percent: u8,
    twin_percent: u8,
}

const SHAPES: [InputShape; 6] = [
    InputShape {
        name: "regular",
        order: Order::Regular,
        shuffle_percent: 0,
        twin_percent: 0,
    },
    InputShape {
        name: "sorted",
        order: Order::Sorted,
        shuffle_percent: 0,
        twin_percent: 0,
    },
    InputShape {
        name: "reversed",
        order: Order::Reversed,
        shuffle_percent: 0,
        twin_percent: 0,
    },
    InputShape {
        name: "sorted_shuffle_5",
        order: Order::Sorted,
        shuffle_percent: 5,
        twin_percent: 0,
    },
    InputShape {
        name: "reversed_shuffle_5",
        order: Order::Reversed,
        shuffle_percent: 5,
        twin_percent: 0,
    },
    InputShape {
        name: "regular_twins_50",
        order: Order::Regular,
        shuffle_percent: 0,
        twin_percent: 50,
    },
];

#[inline(never)]
fn bench_method(
    c: &mut Criterion,
    test_size: usize,
    distribution: Distribution,
    shape: InputShape,
    method: PivotMethod,
) {
    // Pin the benchmark to the same core to improve repeatability. Doing it this way allows
    // criterion to do other stuff with other threads.
    pin_once();

    let pattern_name = format!("{}-{}", distribution.name(), shape.name);
    let method_name = method.name();

    let provide_input = move || {
        let mut rng = RandomStream::new(BENCH_SEED);
        let v = generate(
            test_size,
            distribution,
            shape.order,
            shape.shuffle_percent,
            shape.twin_percent,
            &mut rng,
        );

        (v, rng)
    };

    let batch_size = if test_size > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    let hot_name = format!("{method_name}-hot-{pattern_name}-{test_size}");
    if is_bench_name_ok(&hot_name) {
        c.bench_function(&hot_name, |b| {
            b.iter_batched_ref(
                &provide_input,
                |(test_data, rng)| sort_with(method, black_box(test_data.as_mut_slice()), rng),
                batch_size,
            )
        });
    }

    #[cfg(feature = "cold_benchmarks")]
    {
        let cold_name = format!("{method_name}-cold-{pattern_name}-{test_size}");
        if is_bench_name_ok(&cold_name) {
            c.bench_function(&cold_name, |b| {
                b.iter_batched_ref(
                    || {
                        let input = provide_input();
                        // Only the sort should find the input in memory, not in cache.
                        pivot_experiment::measure::flush_cache();
                        input
                    },
                    |(test_data, rng)| {
                        sort_with(method, black_box(test_data.as_mut_slice()), rng)
                    },
                    BatchSize::PerIteration,
                )
            });
        }
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    // The first element strategy degrades to quadratic time and linear recursion depth on ordered
    // input, larger sizes are not worth waiting for.
    let test_sizes = [16, 256, 2_048];

    for test_size in test_sizes {
        for distribution in Distribution::ALL {
            for shape in SHAPES {
                for method in PivotMethod::ALL {
                    bench_method(c, test_size, distribution, shape, method);
                }
            }
        }
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
