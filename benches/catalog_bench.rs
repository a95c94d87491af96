//! Benchmarks for catalog lookup and the register tick.
//!
//! Run with:
//! ```sh
//! cargo bench --bench catalog_bench
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use playreg_core::{Pins, RegisterConfig};
use playreg_register::{Catalog, Peripherals, RegisterMode, catalog::fnv1a32};
use std::hint::black_box;

fn bench_fnv1a32(c: &mut Criterion) {
    let mut group = c.benchmark_group("fnv1a32");

    for len in [8usize, 13, 64] {
        let input = "4".repeat(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| black_box(fnv1a32(black_box(input.as_bytes()))));
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    group.throughput(Throughput::Elements(1));

    let catalog = Catalog::new(&RegisterConfig::default()).unwrap();

    group.bench_function("ean13", |b| {
        b.iter(|| black_box(catalog.resolve(black_box("4901234567894"))));
    });

    group.finish();
}

/// One full tick that scans a code through the debug console.
fn bench_update_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_tick");
    group.throughput(Throughput::Elements(1));

    let (peripherals, handles) = Peripherals::mock();
    let mut register = RegisterMode::new(peripherals, RegisterConfig::default()).unwrap();
    register.initialize(Pins::default());
    register.enter();

    group.bench_function("idle", |b| {
        b.iter(|| register.update());
    });

    group.bench_function("debug_scan", |b| {
        b.iter(|| {
            handles.debug.inject_line(black_box("BC:4901234567894"));
            register.update();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_fnv1a32, bench_resolve, bench_update_tick);
criterion_main!(benches);
