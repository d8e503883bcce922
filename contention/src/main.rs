use std::sync::Arc;

use cfg::{Cfg, Variant};
use clap::Parser;
use lock_free::LockFree;
use naive::Unsynchronized;
use strum::IntoEnumIterator;
use sync::{CoarseGuard, FineGuards};
use tracing::{error, info};
use workload::harness::{self, RunCfg, RunReport};

pub mod cfg;
mod tracer;

fn main() {
    tracer::init_tracing();
    let cfg = Cfg::parse();
    info!("Running configuration: {cfg:?}");

    let variants: Vec<Variant> = match cfg.variant {
        Some(variant) => vec![variant],
        None => Variant::iter().collect(),
    };

    let mut reports = Vec::with_capacity(variants.len());
    for variant in variants {
        match run_variant(variant) {
            Ok(report) => {
                report.log_summary();
                reports.push(report);
            }
            Err(e) => {
                error!("Error: {e:?}");
                std::process::exit(1);
            }
        }
    }

    if reports.len() > 1 {
        log_comparison(&reports);
    }
}

fn run_variant(variant: Variant) -> anyhow::Result<RunReport> {
    let cfg = RunCfg::default();
    let capacity = cfg.expected_per_container();

    match variant {
        Variant::Unsynchronized => harness::run(Arc::new(Unsynchronized::new(capacity)), cfg),
        Variant::Coarse => harness::run(Arc::new(CoarseGuard::new(capacity)), cfg),
        Variant::Fine => harness::run(Arc::new(FineGuards::new(capacity)), cfg),
        Variant::LockFree => harness::run(Arc::new(LockFree::new(capacity)), cfg),
    }
}

fn log_comparison(reports: &[RunReport]) {
    info!("{:=^72}", " Comparison ");
    info!(
        "{:<16} {:>10} {:>8} {:>8} {:>6} {:>10}",
        "discipline", "elapsed", "list1", "list2", "lost", "deadline"
    );
    for report in reports {
        info!(
            "{:<16} {:>7} ms {:>8} {:>8} {:>6} {:>10}",
            report.discipline,
            report.elapsed.as_millis(),
            report.sizes.a,
            report.sizes.b,
            report.lost_updates(),
            if report.deadline_met() { "met" } else { "missed" }
        );
    }
}
