//! semantle guess - Score a guess

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;
use crate::guess::{GuessOutcome, GuessRank};

#[derive(Args, Debug)]
pub struct GuessArgs {
    /// Puzzle index
    pub day: usize,

    /// Word to score
    pub word: String,
}

pub fn run(ctx: &AppContext, args: &GuessArgs) -> Result<()> {
    super::prepare_day(ctx, args.day)?;
    let outcome = ctx.evaluate(args.day, &args.word)?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(outcome));
    }
    println!("{}", render(&outcome, ctx.config.display.nearest_limit));
    Ok(())
}

/// Ranks past `limit`, and words outside the table, are labeled
/// "beyond top `limit`" instead of by number.
fn render(outcome: &GuessOutcome, limit: usize) -> String {
    let similarity = format!("{:.2}", outcome.similarity * 100.0);
    match outcome.rank {
        GuessRank::Solved => format!(
            "{} {} is the secret word",
            "Solved!".green().bold(),
            outcome.guess.bold()
        ),
        GuessRank::Ranked { rank } if rank <= limit => format!(
            "{:<20} similarity {:>7}  rank {}",
            outcome.guess,
            similarity,
            rank.to_string().cyan()
        ),
        GuessRank::Ranked { .. } | GuessRank::Beyond { .. } => format!(
            "{:<20} similarity {:>7}  {}",
            outcome.guess,
            similarity,
            format!("beyond top {limit}").dimmed()
        ),
    }
}
