//! semantle nearest - Nearest words to a day's secret

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;
use crate::similarity::Neighbor;

#[derive(Args, Debug)]
pub struct NearestArgs {
    /// Puzzle index
    pub day: usize,

    /// Maximum number of neighbors (defaults to display.nearest_limit)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct NearestReport {
    day: usize,
    neighbors: Vec<Neighbor>,
}

pub fn run(ctx: &AppContext, args: &NearestArgs) -> Result<()> {
    super::prepare_day(ctx, args.day)?;
    let limit = args.limit.unwrap_or(ctx.config.display.nearest_limit);
    let neighbors = ctx.nearest(args.day, limit)?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(NearestReport {
            day: args.day,
            neighbors,
        }));
    }

    for neighbor in &neighbors {
        println!(
            "{:>6}  {:<24} {:>7.2}",
            neighbor.rank,
            neighbor.word,
            neighbor.similarity * 100.0
        );
    }
    Ok(())
}
