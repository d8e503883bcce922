//! Containers that are safe to append to from any thread without an external guard.

use crossbeam::queue::SegQueue;
use rand::Rng;
use workload::{Delay, Discipline, Outcome, Target, draw};

/// Both containers are unbounded lock-free queues. Appends are linearizable and no guard is
/// held while a task unit waits for its delay.
#[derive(Debug, Default)]
pub struct LockFree {
    a: SegQueue<u32>,
    b: SegQueue<u32>,
}

impl LockFree {
    /// The queues grow on demand, `capacity` is accepted for symmetry with the other
    /// disciplines.
    pub fn new(_capacity: usize) -> Self {
        Self::default()
    }

    fn queue(&self, target: Target) -> &SegQueue<u32> {
        match target {
            Target::A => &self.a,
            Target::B => &self.b,
        }
    }
}

impl Discipline for LockFree {
    const NAME: &'static str = "lock-free";

    fn perform<R: Rng + ?Sized>(&self, target: Target, rng: &mut R, delay: &Delay) -> Outcome {
        draw(rng, delay, |v| self.queue(target).push(v))
    }

    fn len(&self, target: Target) -> usize {
        self.queue(target).len()
    }

    fn take(&self, target: Target) -> Vec<u32> {
        let queue = self.queue(target);
        let mut values = Vec::with_capacity(queue.len());
        while let Some(v) = queue.pop() {
            values.push(v);
        }
        values
    }
}
