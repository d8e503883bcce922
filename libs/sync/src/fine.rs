use std::sync::{Mutex, PoisonError};

use rand::Rng;
use workload::{Delay, Discipline, Outcome, Target, draw};

/// One guard per container.
///
/// task1 only contends with other task1 calls and task2 with task2, so while one worker holds
/// the guard of A the other can work on B.
#[derive(Debug)]
pub struct FineGuards {
    a: Mutex<Vec<u32>>,
    b: Mutex<Vec<u32>>,
}

impl FineGuards {
    pub fn new(capacity: usize) -> Self {
        Self {
            a: Mutex::new(Vec::with_capacity(capacity)),
            b: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    fn guard(&self, target: Target) -> &Mutex<Vec<u32>> {
        match target {
            Target::A => &self.a,
            Target::B => &self.b,
        }
    }
}

impl Discipline for FineGuards {
    const NAME: &'static str = "fine guards";

    fn perform<R: Rng + ?Sized>(&self, target: Target, rng: &mut R, delay: &Delay) -> Outcome {
        let mut list = self
            .guard(target)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        draw(rng, delay, |v| list.push(v))
    }

    fn len(&self, target: Target) -> usize {
        self.guard(target)
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn take(&self, target: Target) -> Vec<u32> {
        let mut list = self
            .guard(target)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *list)
    }
}
