//! semantle leaderboard - A day's leaderboard

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;
use crate::leaderboard::ScoreRecord;

#[derive(Args, Debug)]
pub struct LeaderboardArgs {
    /// Puzzle index
    pub day: usize,

    /// Show only the first N entries
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct LeaderboardReport {
    day: usize,
    total: usize,
    records: Vec<ScoreRecord>,
}

pub fn run(ctx: &AppContext, args: &LeaderboardArgs) -> Result<()> {
    let mut records = ctx.leaderboard(args.day);
    let total = records.len();
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    if ctx.robot_mode {
        return emit_robot(&robot_ok(LeaderboardReport {
            day: args.day,
            total,
            records,
        }));
    }

    if records.is_empty() {
        println!("No finished games for puzzle #{}", args.day);
        return Ok(());
    }
    for (position, record) in records.iter().enumerate() {
        println!(
            "{:>4}. {:<20} {:>4} guesses  {}",
            position + 1,
            record.nickname,
            record.guess_count,
            record.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}
