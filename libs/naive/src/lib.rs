use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use rand::Rng;
use workload::{Delay, Discipline, Outcome, Target, draw};

/// Fixed-capacity append-only vector without any synchronization around its appends.
///
/// Slots and length are atomics so concurrent use is memory safe, but an append reads the
/// length and publishes the new one in two separate steps. Two threads appending at the same
/// time can read the same length, write the same slot and both publish `len + 1`: one of the
/// values is lost.
struct RacyVec {
    slots: Box<[AtomicU32]>,
    len: AtomicUsize,
}

impl RacyVec {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| AtomicU32::new(0)).collect(),
            len: AtomicUsize::new(0),
        }
    }

    /// Values beyond capacity are dropped.
    fn push(&self, value: u32) {
        let len = self.len.load(Ordering::Relaxed);
        let Some(slot) = self.slots.get(len) else {
            return;
        };
        slot.store(value, Ordering::Relaxed);
        self.len.store(len + 1, Ordering::Relaxed);
    }

    fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    fn take(&self) -> Vec<u32> {
        let len = self.len.swap(0, Ordering::Relaxed);
        self.slots[..len]
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
            .collect()
    }
}

/// Both containers are shared by every worker without any guard.
pub struct Unsynchronized {
    a: RacyVec,
    b: RacyVec,
}

impl Unsynchronized {
    pub fn new(capacity: usize) -> Self {
        Self {
            a: RacyVec::with_capacity(capacity),
            b: RacyVec::with_capacity(capacity),
        }
    }

    fn container(&self, target: Target) -> &RacyVec {
        match target {
            Target::A => &self.a,
            Target::B => &self.b,
        }
    }
}

impl Discipline for Unsynchronized {
    const NAME: &'static str = "unsynchronized";

    fn perform<R: Rng + ?Sized>(&self, target: Target, rng: &mut R, delay: &Delay) -> Outcome {
        draw(rng, delay, |v| self.container(target).push(v))
    }

    fn len(&self, target: Target) -> usize {
        self.container(target).len()
    }

    fn take(&self, target: Target) -> Vec<u32> {
        self.container(target).take()
    }
}
