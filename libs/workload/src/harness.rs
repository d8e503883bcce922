use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crossbeam::channel::RecvTimeoutError;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{info, warn};

use crate::{Discipline, Sizes, Worker, WorkerStats};

pub const ITERATIONS: usize = 1_000;
pub const WORKERS: usize = 2;
pub const TASK_DELAY: Duration = Duration::from_millis(1);
/// Observational deadline for both workers. Missing it does not cancel anything.
pub const DEADLINE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy)]
pub struct RunCfg {
    pub iterations: usize,
    pub workers: usize,
    pub task_delay: Duration,
    pub deadline: Duration,
    /// Worker `i` draws from `StdRng::seed_from_u64(seed + i)`. Without a seed every worker is
    /// seeded from the operating system.
    pub seed: Option<u64>,
}

impl Default for RunCfg {
    fn default() -> Self {
        Self {
            iterations: ITERATIONS,
            workers: WORKERS,
            task_delay: TASK_DELAY,
            deadline: DEADLINE,
            seed: None,
        }
    }
}

impl RunCfg {
    /// Number of appends each container receives when no update is lost.
    pub fn expected_per_container(&self) -> usize {
        self.iterations * self.workers
    }

    fn worker_rng(&self, worker: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(worker as u64)),
            None => StdRng::from_os_rng(),
        }
    }
}

/// What the harness saw when the deadline passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    Met,
    /// Workers were still running. Holds the state inspected at that moment.
    Missed { elapsed: Duration, sizes: Sizes },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub p50_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub discipline: &'static str,
    /// Wall-clock time until every worker had finished its process loop.
    pub elapsed: Duration,
    pub sizes: Sizes,
    pub expected_per_container: usize,
    pub deadline: Deadline,
    pub interrupted: usize,
    pub latency: Latency,
}

impl RunReport {
    pub fn deadline_met(&self) -> bool {
        self.deadline == Deadline::Met
    }

    /// Appends that did not make it into the containers.
    pub fn lost_updates(&self) -> usize {
        (2 * self.expected_per_container).saturating_sub(self.sizes.total())
    }

    pub fn log_summary(&self) {
        info!("{:=^60}", format!(" {} ", self.discipline));
        info!("Elapsed: {} ms", self.elapsed.as_millis());
        info!("Completed: {}", self.sizes);
        match self.deadline {
            Deadline::Met => info!("Deadline: met"),
            Deadline::Missed { elapsed, sizes } => warn!(
                "Deadline: missed, after {} ms the containers held {}",
                elapsed.as_millis(),
                sizes
            ),
        }
        if self.lost_updates() > 0 {
            warn!(
                "Lost updates: {} of {}",
                self.lost_updates(),
                2 * self.expected_per_container
            );
        }
        if self.interrupted > 0 {
            info!("Interrupted delays: {}", self.interrupted);
        }
        info!(
            "Task latency: p50 {} µs, p99 {} µs, max {} µs",
            self.latency.p50_us, self.latency.p99_us, self.latency.max_us
        );
    }
}

/// Runs the process loop on `cfg.workers` threads against `discipline` and reports how long
/// it took and what ended up in the containers.
///
/// The harness waits up to `cfg.deadline` for the workers, inspects the containers if they are
/// late, then joins them regardless.
/// # Error
/// Returns an error if a worker thread cannot be spawned or panics.
pub fn run<D: Discipline>(discipline: Arc<D>, cfg: RunCfg) -> anyhow::Result<RunReport> {
    info!(
        discipline = D::NAME,
        workers = cfg.workers,
        iterations = cfg.iterations,
        task_delay_ms = cfg.task_delay.as_millis() as u64,
        "Starting timer"
    );
    let start = Instant::now();
    let deadline_at = start + cfg.deadline;

    let (done_tx, done_rx) = crossbeam::channel::bounded(cfg.workers);
    let mut workers = Vec::with_capacity(cfg.workers);
    for id in 0..cfg.workers {
        workers.push(Worker::spawn(
            id,
            Arc::clone(&discipline),
            cfg.iterations,
            cfg.task_delay,
            cfg.worker_rng(id),
            done_tx.clone(),
        )?);
    }
    // Only the workers hold senders now, a disconnect means every one of them is gone.
    drop(done_tx);

    let mut finished = 0;
    while finished < cfg.workers {
        match done_rx.recv_deadline(deadline_at) {
            Ok(_) => finished += 1,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    let deadline = if finished == cfg.workers {
        Deadline::Met
    } else {
        let missed = Deadline::Missed {
            elapsed: start.elapsed(),
            sizes: discipline.sizes(),
        };
        let late: Vec<usize> = workers
            .iter()
            .filter(|w| !w.is_finished())
            .map(Worker::id)
            .collect();
        warn!(
            discipline = D::NAME,
            ?late,
            "Workers did not finish within {} ms, waiting for them",
            cfg.deadline.as_millis()
        );
        missed
    };

    let mut stats = WorkerStats::new();
    for worker in workers {
        stats.merge(&worker.join()?);
    }
    let elapsed = start.elapsed();
    info!(discipline = D::NAME, "Stopping timer");

    Ok(RunReport {
        discipline: D::NAME,
        elapsed,
        sizes: discipline.sizes(),
        expected_per_container: cfg.expected_per_container(),
        deadline,
        interrupted: stats.interrupted,
        latency: Latency {
            p50_us: stats.latency_us.value_at_quantile(0.5),
            p99_us: stats.latency_us.value_at_quantile(0.99),
            max_us: stats.latency_us.max(),
        },
    })
}
