//! Benchmarks for drape cloth simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use drape::*;

fn bench_topology_build(c: &mut Criterion) {
    c.bench_function("topology_128x128_build", |b| {
        let config: ClothConfig<f32> = ClothConfig::new();
        let mut state = ClothState::new(&config);
        state.reset(Vec3::zero(), config.gravity);
        b.iter(|| Topology::build(config.resolution, state.positions()).len());
    });
}

fn bench_substep(c: &mut Criterion) {
    c.bench_function("cloth_64x64_100_substeps", |b| {
        b.iter(|| {
            let config: ClothConfig<f32> = ClothConfig::new().with_resolution(64).with_seed(1);
            let mut sim = Simulation::new(config).unwrap();
            for _ in 0..100 {
                sim.substep(&mut NoOpStepObserver);
            }
            sim.state().positions()[0]
        });
    });
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("cloth_128x128_frame");
    for parallel in [false, true] {
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(name, |b| {
            let config: ClothConfig<f32> = ClothConfig::new().with_seed(1).with_parallel(parallel);
            let mut sim = Simulation::new(config).unwrap();
            b.iter(|| {
                sim.advance_frame(&mut NoOpStepObserver);
                sim.elapsed()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_topology_build, bench_substep, bench_frame);
criterion_main!(benches);
