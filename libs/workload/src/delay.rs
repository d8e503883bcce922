use std::{thread, time::Duration};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DelayError {
    #[error("delay of {0:?} was interrupted")]
    Interrupted(Duration),
}

/// Artificial processing time spent by every task unit.
///
/// A delay created through [`Delay::interruptible`] can be cut short from another thread with
/// the matching [`Interrupter`]. Every interrupt wakes at most one wait.
#[derive(Debug, Clone)]
pub struct Delay {
    period: Duration,
    interrupts: Option<Receiver<()>>,
}

/// Sending side of an interruptible [`Delay`].
#[derive(Debug, Clone)]
pub struct Interrupter(Sender<()>);

impl Delay {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interrupts: None,
        }
    }

    /// A delay that returns immediately. Used by benchmarks to measure guard overhead only.
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interruptible(period: Duration) -> (Self, Interrupter) {
        let (tx, rx) = channel::unbounded();
        (
            Self {
                period,
                interrupts: Some(rx),
            },
            Interrupter(tx),
        )
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Blocks the calling thread for the configured period.
    /// # Error
    /// Returns [`DelayError::Interrupted`] when an [`Interrupter`] fired before the period elapsed.
    pub fn wait(&self) -> Result<(), DelayError> {
        if self.period.is_zero() {
            return Ok(());
        }
        let Some(interrupts) = &self.interrupts else {
            thread::sleep(self.period);
            return Ok(());
        };

        match interrupts.recv_timeout(self.period) {
            Err(RecvTimeoutError::Timeout) => Ok(()),
            Ok(()) => Err(DelayError::Interrupted(self.period)),
            // Nobody can interrupt anymore, fall back to a plain sleep.
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(self.period);
                Ok(())
            }
        }
    }
}

impl Interrupter {
    /// Wakes the next (or currently running) wait of the paired delay.
    /// Does nothing if the delay has been dropped.
    pub fn interrupt(&self) {
        let _ = self.0.send(());
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{Delay, DelayError};

    #[test]
    fn plain_delay_waits_at_least_its_period() {
        let delay = Delay::new(Duration::from_millis(5));
        let start = Instant::now();

        assert_eq!(delay.wait(), Ok(()));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn zero_delay_returns_immediately() {
        let delay = Delay::none();
        assert_eq!(delay.wait(), Ok(()));
        assert_eq!(delay.period(), Duration::ZERO);
    }

    #[test]
    fn interrupt_cuts_one_wait_short() {
        let period = Duration::from_secs(5);
        let (delay, interrupter) = Delay::interruptible(period);
        interrupter.interrupt();

        let start = Instant::now();
        assert_eq!(delay.wait(), Err(DelayError::Interrupted(period)));
        assert!(start.elapsed() < period);
    }

    #[test]
    fn interrupt_is_consumed_by_a_single_wait() {
        let (delay, interrupter) = Delay::interruptible(Duration::from_millis(2));
        interrupter.interrupt();

        assert!(delay.wait().is_err());
        assert_eq!(delay.wait(), Ok(()));
    }

    #[test]
    fn dropped_interrupter_degrades_to_sleep() {
        let (delay, interrupter) = Delay::interruptible(Duration::from_millis(3));
        drop(interrupter);

        let start = Instant::now();
        assert_eq!(delay.wait(), Ok(()));
        assert!(start.elapsed() >= Duration::from_millis(3));
    }
}
