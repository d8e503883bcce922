use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use sync::{CoarseGuard, FineGuards};
use workload::{Delay, Discipline, Target, process};

fn drain(discipline: &impl Discipline) {
    for target in Target::ALL {
        discipline.take(target);
    }
}

fn coarse_process_loop(c: &mut Criterion) {
    let discipline = CoarseGuard::new(1_000);
    let delay = Delay::none();
    let mut rng = rand::rng();

    c.bench_function("sync_guards coarse process_loop_500", |b| {
        b.iter(|| {
            process(&discipline, black_box(500), &mut rng, &delay);
            drain(&discipline);
        })
    });
}

fn fine_process_loop(c: &mut Criterion) {
    let discipline = FineGuards::new(1_000);
    let delay = Delay::none();
    let mut rng = rand::rng();

    c.bench_function("sync_guards fine process_loop_500", |b| {
        b.iter(|| {
            process(&discipline, black_box(500), &mut rng, &delay);
            drain(&discipline);
        })
    });
}

criterion_group!(benches, coarse_process_loop, fine_process_loop);
criterion_main!(benches);
