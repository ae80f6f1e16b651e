//! semantle run - Long-running rotation service

use std::sync::Arc;

use chrono::Utc;
use clap::Args;
use tracing::{info, warn};

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;
use crate::puzzle::RotationScheduler;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Worker threads for the async runtime (defaults to the CPU count)
    #[arg(long)]
    pub workers: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &RunArgs) -> Result<()> {
    let report = ctx.boot(Utc::now());
    info!(
        activated = report.activated,
        failed = report.failed.len(),
        "boot backfill finished"
    );
    let mut response = robot_ok(&report);
    if !report.failed.is_empty() {
        let warning = failed_warning(&report.failed);
        warn!("{warning}");
        response = response.with_warning(warning);
    }
    if ctx.robot_mode {
        emit_robot(&response)?;
    }

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(workers) = args.workers {
        builder.worker_threads(workers.max(1));
    }
    let runtime = builder.build()?;

    runtime.block_on(async {
        let scheduler = RotationScheduler::spawn(Arc::clone(&ctx.rotation));
        info!("rotation scheduler running; press Ctrl-C to stop");
        let signal = tokio::signal::ctrl_c().await;
        scheduler.shutdown();
        signal
    })?;

    let stats = ctx.rotation.cache_stats();
    info!(
        resident = ctx.rotation.resident_tables(),
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        "shutting down"
    );
    Ok(())
}

fn failed_warning(failed: &[usize]) -> String {
    let days: Vec<String> = failed.iter().map(ToString::to_string).collect();
    format!("puzzles not activated: {}", days.join(", "))
}
