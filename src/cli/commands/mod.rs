//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use chrono::Utc;
use clap::Subcommand;

pub mod days;
pub mod giveup;
pub mod guess;
pub mod leaderboard;
pub mod nearest;
pub mod run;
pub mod similarity;
pub mod submit;
pub mod today;
pub mod yesterday;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Today(args) => today::run(ctx, args),
        Commands::Guess(args) => guess::run(ctx, args),
        Commands::Nearest(args) => nearest::run(ctx, args),
        Commands::Similarity(args) => similarity::run(ctx, args),
        Commands::Leaderboard(args) => leaderboard::run(ctx, args),
        Commands::Submit(args) => submit::run(ctx, args),
        Commands::Days(args) => days::run(ctx, args),
        Commands::Yesterday(args) => yesterday::run(ctx, args),
        Commands::Giveup(args) => giveup::run(ctx, args),
        Commands::Run(args) => run::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current puzzle index and next rotation
    Today(today::TodayArgs),

    /// Score a guess against a day's secret
    Guess(guess::GuessArgs),

    /// List the nearest words to a day's secret
    Nearest(nearest::NearestArgs),

    /// Show similarity landmarks of a day
    Similarity(similarity::SimilarityArgs),

    /// Show a day's leaderboard
    Leaderboard(leaderboard::LeaderboardArgs),

    /// Record a finished game
    Submit(submit::SubmitArgs),

    /// List playable days with their leaders
    Days(days::DaysArgs),

    /// Reveal the secret of the puzzle before a day
    Yesterday(yesterday::YesterdayArgs),

    /// Give up and reveal a day's secret
    Giveup(giveup::GiveupArgs),

    /// Boot fully and keep the midnight rotation running until Ctrl-C
    Run(run::RunArgs),
}

/// Activate `day` if a full boot would have, without backfilling the rest.
fn prepare_day(ctx: &AppContext, day: usize) -> Result<()> {
    ctx.ensure_booted(day, Utc::now())
}
