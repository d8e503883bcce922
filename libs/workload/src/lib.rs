mod delay;
mod discipline;
pub mod harness;
mod task;
pub mod test;
mod worker;

// region:    --- Exports
pub use delay::{Delay, DelayError, Interrupter};
pub use discipline::{Discipline, Sizes, Target};
pub use task::{Outcome, VALUE_RANGE, WorkerStats, draw, process, task1, task2};
pub use worker::Worker;
// endregion: --- Exports
