//! semantle yesterday - Secret of the previous puzzle

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct YesterdayArgs {
    /// Puzzle index whose predecessor to reveal
    pub today: usize,
}

#[derive(Serialize)]
struct YesterdayReport {
    today: usize,
    day: usize,
    secret: Option<String>,
}

pub fn run(ctx: &AppContext, args: &YesterdayArgs) -> Result<()> {
    let day = ctx.rotation.calendar().previous(args.today);
    super::prepare_day(ctx, day)?;
    let secret = ctx.yesterday(args.today);

    if ctx.robot_mode {
        return emit_robot(&robot_ok(YesterdayReport {
            today: args.today,
            day,
            secret,
        }));
    }
    match secret {
        Some(word) => println!("Puzzle #{day} was: {word}"),
        None => println!("Puzzle #{day} has not been played yet"),
    }
    Ok(())
}
