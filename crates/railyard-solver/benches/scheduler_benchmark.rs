// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use railyard_model::{
    good::Good, index::StationIndex, instance::Instance, loading::InstanceLoader,
    network::NetworkBuilder,
};
use railyard_router::{fixed_lane::FixedLaneSearch, search::LaneSwitchingSearch};
use railyard_solver::{monitor::no_op::NoOperationMonitor, scheduler::Scheduler};
use regex::Regex;
use std::fs;
use std::hint::black_box;
use std::path::{Path, PathBuf};

fn find_instances_dir() -> Option<PathBuf> {
    let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
    while let Some(p) = cur {
        let cand = p.join("data");
        if cand.is_dir() {
            return Some(cand);
        }
        cur = p.parent();
    }
    None
}

/// Gathers all instance files matching "^network-\d+\.txt$".
fn get_instance_files() -> Vec<PathBuf> {
    let Some(dir) = find_instances_dir() else {
        return Vec::new();
    };

    let re = Regex::new(r"^network-\d+\.txt$").unwrap();

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("Failed to read data directory")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|s| re.is_match(s))
                .unwrap_or(false)
        })
        .collect();

    files.sort();
    files
}

/// A `side` x `side` grid yard with random picker stock and random goods.
fn grid_instance(side: usize, num_lanes: usize, num_goods: usize, seed: u64) -> Instance<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let name = |r: usize, c: usize| format!("S{}_{}", r, c);

    let mut builder = NetworkBuilder::preallocated(num_lanes, 20.0, side * side, 2 * side * side);
    for r in 0..side {
        for c in 0..side {
            builder
                .add_station(name(r, c), rng.random_range(1..6))
                .unwrap();
        }
    }
    let mut edge = 0;
    for r in 0..side {
        for c in 0..side {
            if c + 1 < side {
                builder
                    .add_edge(format!("E{}", edge), &name(r, c), &name(r, c + 1))
                    .unwrap();
                edge += 1;
            }
            if r + 1 < side {
                builder
                    .add_edge(format!("E{}", edge), &name(r, c), &name(r + 1, c))
                    .unwrap();
                edge += 1;
            }
        }
    }
    let network = builder.build();

    let num_stations = side * side;
    let goods = (0..num_goods)
        .map(|g| {
            Good::new(
                format!("G{}", g),
                StationIndex::new(rng.random_range(0..num_stations)),
                StationIndex::new(rng.random_range(0..num_stations)),
                rng.random_range(0.5..8.0),
            )
        })
        .collect();

    Instance::new(network, goods)
}

fn bench_grid_instances(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler_grid");

    for side in [8, 16, 32] {
        let num_goods = side * side;
        let instance = grid_instance(side, 3, num_goods, side as u64);
        let scheduler = Scheduler::default();

        group.throughput(Throughput::Elements(num_goods as u64));

        let mut search = LaneSwitchingSearch::preallocated(side * side);
        group.bench_with_input(
            BenchmarkId::new("lane_switching", side),
            &instance,
            |b, instance| {
                b.iter(|| {
                    let outcome = scheduler.arrange(
                        black_box(instance),
                        &mut search,
                        &mut NoOperationMonitor::new(),
                    );
                    black_box(outcome.statistics().routed)
                })
            },
        );

        let mut search = FixedLaneSearch::preallocated(side * side);
        group.bench_with_input(
            BenchmarkId::new("fixed_lane", side),
            &instance,
            |b, instance| {
                b.iter(|| {
                    let outcome = scheduler.arrange(
                        black_box(instance),
                        &mut search,
                        &mut NoOperationMonitor::new(),
                    );
                    black_box(outcome.statistics().routed)
                })
            },
        );
    }
    group.finish();
}

fn bench_real_instances(c: &mut Criterion) {
    let files = get_instance_files();
    if files.is_empty() {
        eprintln!("No instance files found in data/ matching pattern. Skipping benchmark.");
        return;
    }

    let loader = InstanceLoader::<f64>::new();
    let mut group = c.benchmark_group("scheduler_benchmark");

    for path in files {
        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        let instance = loader
            .from_path(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", file_name, e));

        let scheduler = Scheduler::default();
        let mut search = LaneSwitchingSearch::preallocated(instance.network().num_stations());

        group.throughput(Throughput::Elements(instance.num_goods() as u64));
        group.bench_with_input(
            BenchmarkId::new("lane_switching", &file_name),
            &instance,
            |b, instance| {
                b.iter(|| {
                    let outcome = scheduler.arrange(
                        black_box(instance),
                        &mut search,
                        &mut NoOperationMonitor::new(),
                    );
                    black_box(outcome.plan().num_routed())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_grid_instances, bench_real_instances);
criterion_main!(benches);
