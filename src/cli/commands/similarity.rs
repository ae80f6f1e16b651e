//! semantle similarity - Similarity landmarks of a day

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SimilarityArgs {
    /// Puzzle index
    pub day: usize,
}

pub fn run(ctx: &AppContext, args: &SimilarityArgs) -> Result<()> {
    super::prepare_day(ctx, args.day)?;
    let summary = ctx.similarity(args.day)?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(summary));
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("Puzzle #{}", summary.day));
    match summary.stats {
        Some(stats) => {
            layout
                .kv("nearest", &format!("{:.2}", stats.top * 100.0))
                .kv("10th nearest", &format!("{:.2}", stats.top10 * 100.0))
                .kv("farthest", &format!("{:.2}", stats.rest * 100.0));
        }
        None => {
            layout.push_line("no neighbors");
        }
    }
    if let Some(leader) = &summary.leader {
        layout.kv(
            "leader",
            &format!("{} ({} guesses)", leader.nickname, leader.guess_count),
        );
    }
    emit_human(layout);
    Ok(())
}
