use std::fmt;

use rand::Rng;

use crate::{Delay, Outcome};

/// One of the two containers every discipline manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    A,
    B,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::A, Target::B];
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::A => f.write_str("A"),
            Target::B => f.write_str("B"),
        }
    }
}

/// A synchronization discipline layered over containers A and B.
///
/// Implementations decide which guard (if any) is held while a task unit runs. The workload
/// itself is identical for all of them, see [`crate::task1`] and [`crate::task2`].
pub trait Discipline: Send + Sync + 'static {
    /// Short human readable name, used in log lines and reports.
    const NAME: &'static str;

    /// Runs one task unit against `target`: waits for `delay`, then appends one value drawn
    /// from `rng`.
    fn perform<R: Rng + ?Sized>(&self, target: Target, rng: &mut R, delay: &Delay) -> Outcome;

    fn len(&self, target: Target) -> usize;

    /// Removes and returns every value held by `target`.
    ///
    /// Meant for inspection once all workers have finished; values appended concurrently with
    /// the call may or may not be part of the result.
    fn take(&self, target: Target) -> Vec<u32>;

    fn sizes(&self) -> Sizes {
        Sizes {
            a: self.len(Target::A),
            b: self.len(Target::B),
        }
    }
}

/// Lengths of both containers at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sizes {
    pub a: usize,
    pub b: usize,
}

impl Sizes {
    pub fn total(&self) -> usize {
        self.a + self.b
    }

    pub fn get(&self, target: Target) -> usize {
        match target {
            Target::A => self.a,
            Target::B => self.b,
        }
    }
}

impl fmt::Display for Sizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List1: {}; List2: {}", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::{Sizes, Target};

    #[test]
    fn sizes_total_and_lookup() {
        let sizes = Sizes { a: 1999, b: 2000 };

        assert_eq!(sizes.total(), 3999);
        assert_eq!(sizes.get(Target::A), 1999);
        assert_eq!(sizes.get(Target::B), 2000);
    }

    #[test]
    fn sizes_display_names_both_lists() {
        let sizes = Sizes { a: 3, b: 4 };
        assert_eq!(sizes.to_string(), "List1: 3; List2: 4");
    }

    #[test]
    fn target_display() {
        let names: Vec<String> = Target::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
