use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use anyhow::{Context, anyhow};
use crossbeam::channel::Sender;
use rand::rngs::StdRng;
use tracing::debug;

use crate::{Delay, Discipline, Interrupter, WorkerStats, process};

/// Handle to one worker thread running a full process loop.
#[derive(Debug)]
pub struct Worker {
    id: usize,
    handle: JoinHandle<WorkerStats>,
    interrupter: Interrupter,
}

impl Worker {
    /// Spawns the thread `worker-<id>`, which runs `iterations` rounds of task1/task2 against
    /// `discipline` and sends its `id` through `done` once the loop has finished.
    ///
    /// The worker owns `rng`, so no generator state is ever shared between threads.
    pub fn spawn<D: Discipline>(
        id: usize,
        discipline: Arc<D>,
        iterations: usize,
        task_delay: Duration,
        mut rng: StdRng,
        done: Sender<usize>,
    ) -> anyhow::Result<Self> {
        let (delay, interrupter) = Delay::interruptible(task_delay);

        let handle = thread::Builder::new()
            .name(format!("worker-{id}"))
            .spawn(move || {
                let stats = process(&*discipline, iterations, &mut rng, &delay);
                debug!(
                    worker = id,
                    tasks = stats.tasks,
                    interrupted = stats.interrupted,
                    "process loop completed"
                );
                // The harness may have stopped listening after its deadline.
                let _ = done.send(id);
                stats
            })
            .with_context(|| format!("Could not spawn worker {id}"))?;

        Ok(Self {
            id,
            handle,
            interrupter,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cuts the worker's current (or next) task delay short. The task still appends its value.
    pub fn interrupt(&self) {
        self.interrupter.interrupt();
    }

    /// Blocks until the worker's process loop has returned.
    /// # Error
    /// Returns an error if the worker thread panicked.
    pub fn join(self) -> anyhow::Result<WorkerStats> {
        let id = self.id;
        self.handle
            .join()
            .map_err(|_| anyhow!("Worker {id} panicked"))
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use rand::{SeedableRng, rngs::StdRng};

    use super::Worker;
    use crate::{Discipline, Target, test::recorder::Recorder};

    #[test]
    fn worker_reports_completion_and_stats() {
        let recorder = Arc::new(Recorder::default());
        let (done_tx, done_rx) = crossbeam::channel::unbounded();

        let worker = Worker::spawn(
            3,
            Arc::clone(&recorder),
            20,
            Duration::ZERO,
            StdRng::seed_from_u64(1),
            done_tx,
        )
        .unwrap();

        assert_eq!(done_rx.recv().unwrap(), 3);
        let stats = worker.join().unwrap();
        assert_eq!(stats.tasks, 40);
        assert_eq!(recorder.len(Target::A), 20);
        assert_eq!(recorder.len(Target::B), 20);
    }

    #[test]
    fn interrupted_worker_still_appends_everything() {
        let recorder = Arc::new(Recorder::default());
        let (done_tx, done_rx) = crossbeam::channel::unbounded();

        let worker = Worker::spawn(
            0,
            Arc::clone(&recorder),
            2,
            Duration::from_secs(5),
            StdRng::seed_from_u64(2),
            done_tx,
        )
        .unwrap();
        for _ in 0..4 {
            worker.interrupt();
        }

        done_rx
            .recv_timeout(Duration::from_secs(10))
            .expect("every delay was interrupted");
        let stats = worker.join().unwrap();
        assert_eq!(stats.interrupted, 4);
        assert_eq!(recorder.sizes().total(), 4);
    }
}
