//! semantle submit - Record a finished game

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;
use crate::leaderboard::Submission;

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Puzzle index
    pub day: usize,

    /// Player nickname
    pub nickname: String,

    /// Number of guesses it took
    pub guess_count: u32,
}

pub fn run(ctx: &AppContext, args: &SubmitArgs) -> Result<()> {
    let placement = ctx.submit(
        args.day,
        Submission::new(args.nickname.clone(), args.guess_count),
    )?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(placement));
    }
    println!(
        "{} {} placed {} of {} on puzzle #{}",
        "Recorded:".green(),
        placement.record.nickname.bold(),
        placement.position,
        placement.total,
        args.day
    );
    Ok(())
}
