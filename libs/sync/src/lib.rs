//! Lock based disciplines. Both keep every append, they differ in what a single guard covers.

mod coarse;
mod fine;

pub use coarse::CoarseGuard;
pub use fine::FineGuards;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use workload::harness::{self, RunCfg};

    use crate::{CoarseGuard, FineGuards};

    /// Widening the guard to both containers roughly doubles the run time.
    #[test]
    fn coarse_guard_pays_serialization_penalty() {
        let cfg = RunCfg::default();
        let coarse = harness::run(
            Arc::new(CoarseGuard::new(cfg.expected_per_container())),
            cfg,
        )
        .unwrap();
        let fine = harness::run(
            Arc::new(FineGuards::new(cfg.expected_per_container())),
            cfg,
        )
        .unwrap();

        assert_eq!(coarse.sizes, fine.sizes);
        assert!(
            coarse.elapsed >= fine.elapsed.mul_f64(1.5),
            "coarse {:?} vs fine {:?}",
            coarse.elapsed,
            fine.elapsed
        );
    }
}
