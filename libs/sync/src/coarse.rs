use std::sync::{Mutex, PoisonError};

use rand::Rng;
use workload::{Delay, Discipline, Outcome, Target, draw};

#[derive(Debug, Default)]
struct Lists {
    a: Vec<u32>,
    b: Vec<u32>,
}

impl Lists {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            a: Vec::with_capacity(capacity),
            b: Vec::with_capacity(capacity),
        }
    }

    fn get_mut(&mut self, target: Target) -> &mut Vec<u32> {
        match target {
            Target::A => &mut self.a,
            Target::B => &mut self.b,
        }
    }
}

/// One guard spans both containers.
///
/// A task unit holds the guard for its whole duration, delay included. Any task on any
/// container therefore waits for every other task to finish: safe, but the two workers never
/// make progress at the same time.
#[derive(Debug)]
pub struct CoarseGuard {
    lists: Mutex<Lists>,
}

impl CoarseGuard {
    pub fn new(capacity: usize) -> Self {
        Self {
            lists: Mutex::new(Lists::with_capacity(capacity)),
        }
    }
}

impl Discipline for CoarseGuard {
    const NAME: &'static str = "coarse guard";

    fn perform<R: Rng + ?Sized>(&self, target: Target, rng: &mut R, delay: &Delay) -> Outcome {
        // A panicking holder must not wedge the other worker.
        let mut lists = self.lists.lock().unwrap_or_else(PoisonError::into_inner);
        draw(rng, delay, |v| lists.get_mut(target).push(v))
    }

    fn len(&self, target: Target) -> usize {
        let mut lists = self.lists.lock().unwrap_or_else(PoisonError::into_inner);
        lists.get_mut(target).len()
    }

    fn take(&self, target: Target) -> Vec<u32> {
        let mut lists = self.lists.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(lists.get_mut(target))
    }
}
