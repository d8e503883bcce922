use std::sync::Mutex;

use rand::Rng;

use crate::{Delay, Discipline, Outcome, Target, draw};

/// Keeps every append in call order behind a single mutex. Only used by unit tests.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) calls: Mutex<Vec<(Target, u32)>>,
}

impl Discipline for Recorder {
    const NAME: &'static str = "recorder";

    fn perform<R: Rng + ?Sized>(&self, target: Target, rng: &mut R, delay: &Delay) -> Outcome {
        draw(rng, delay, |v| self.calls.lock().unwrap().push((target, v)))
    }

    fn len(&self, target: Target) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.iter().filter(|(t, _)| *t == target).count()
    }

    fn take(&self, target: Target) -> Vec<u32> {
        let mut calls = self.calls.lock().unwrap();
        let (taken, kept): (Vec<_>, Vec<_>) = calls.drain(..).partition(|(t, _)| *t == target);
        *calls = kept;
        taken.into_iter().map(|(_, v)| v).collect()
    }
}

/// Panics on the first task unit.
#[derive(Debug, Default)]
pub(crate) struct Exploding;

impl Discipline for Exploding {
    const NAME: &'static str = "exploding";

    fn perform<R: Rng + ?Sized>(&self, target: Target, _: &mut R, _: &Delay) -> Outcome {
        panic!("task on container {target} exploded");
    }

    fn len(&self, _: Target) -> usize {
        0
    }

    fn take(&self, _: Target) -> Vec<u32> {
        vec![]
    }
}
