//! semantle giveup - Reveal a day's secret

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct GiveupArgs {
    /// Puzzle index
    pub day: usize,
}

#[derive(Serialize)]
struct GiveupReport {
    day: usize,
    secret: String,
}

pub fn run(ctx: &AppContext, args: &GiveupArgs) -> Result<()> {
    super::prepare_day(ctx, args.day)?;
    let secret = ctx.reveal(args.day)?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(GiveupReport {
            day: args.day,
            secret,
        }));
    }
    println!("The secret word for puzzle #{} is: {secret}", args.day);
    Ok(())
}
