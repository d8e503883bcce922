use std::{ops::Range, time::Instant};

use hdrhistogram::Histogram;
use rand::Rng;
use tracing::warn;

use crate::{Delay, Discipline, Target};

/// Every appended value is drawn uniformly from this range.
pub const VALUE_RANGE: Range<u32> = 0..100;

/// Highest per-task latency the histogram tracks, in microseconds.
const MAX_TRACKED_LATENCY_US: u64 = 60_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The delay was cut short. The value has been appended nonetheless.
    Interrupted,
}

/// Body shared by every task unit: wait for `delay`, then hand one freshly drawn value to
/// `append`.
///
/// An interrupted delay is logged and otherwise ignored, the append always happens.
pub fn draw<R: Rng + ?Sized>(rng: &mut R, delay: &Delay, append: impl FnOnce(u32)) -> Outcome {
    let outcome = match delay.wait() {
        Ok(()) => Outcome::Completed,
        Err(e) => {
            warn!(error = %e, "task delay interrupted, appending anyway");
            Outcome::Interrupted
        }
    };
    append(rng.random_range(VALUE_RANGE));
    outcome
}

/// Appends one value to container A.
pub fn task1<D: Discipline, R: Rng + ?Sized>(
    discipline: &D,
    rng: &mut R,
    delay: &Delay,
) -> Outcome {
    discipline.perform(Target::A, rng, delay)
}

/// Appends one value to container B.
pub fn task2<D: Discipline, R: Rng + ?Sized>(
    discipline: &D,
    rng: &mut R,
    delay: &Delay,
) -> Outcome {
    discipline.perform(Target::B, rng, delay)
}

/// What one worker observed while running its process loop.
#[derive(Debug, Clone)]
pub struct WorkerStats {
    pub tasks: usize,
    pub interrupted: usize,
    /// Duration of each task unit in microseconds, including time spent waiting for a guard.
    pub latency_us: Histogram<u64>,
}

impl WorkerStats {
    pub fn new() -> Self {
        Self {
            tasks: 0,
            interrupted: 0,
            latency_us: Histogram::new_with_max(MAX_TRACKED_LATENCY_US, 3)
                .expect("Initializing the histogram should work"),
        }
    }

    fn record(&mut self, outcome: Outcome, started: Instant) {
        self.tasks += 1;
        if outcome == Outcome::Interrupted {
            self.interrupted += 1;
        }
        self.latency_us
            .saturating_record(started.elapsed().as_micros() as u64);
    }

    /// Folds the observations of `other` into `self`.
    pub fn merge(&mut self, other: &WorkerStats) {
        self.tasks += other.tasks;
        self.interrupted += other.interrupted;
        // Both histograms share the same bounds, so adding cannot fail.
        let _ = self.latency_us.add(&other.latency_us);
    }
}

impl Default for WorkerStats {
    fn default() -> Self {
        Self::new()
    }
}

/// The process loop: runs `task1` then `task2`, `iterations` times, on the calling thread.
pub fn process<D: Discipline, R: Rng + ?Sized>(
    discipline: &D,
    iterations: usize,
    rng: &mut R,
    delay: &Delay,
) -> WorkerStats {
    let mut stats = WorkerStats::new();
    for _ in 0..iterations {
        let started = Instant::now();
        let outcome = task1(discipline, rng, delay);
        stats.record(outcome, started);

        let started = Instant::now();
        let outcome = task2(discipline, rng, delay);
        stats.record(outcome, started);
    }
    stats
}
