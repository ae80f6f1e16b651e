//! semantle days - Playable days and their leaders

use chrono::Utc;
use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct DaysArgs {}

pub fn run(ctx: &AppContext, _args: &DaysArgs) -> Result<()> {
    let days = ctx.days(Utc::now());

    if ctx.robot_mode {
        return emit_robot(&robot_ok(days));
    }
    for summary in &days {
        match &summary.leader {
            Some(leader) => println!(
                "#{:<5} {} ({} guesses)",
                summary.day, leader.nickname, leader.guess_count
            ),
            None => println!("#{:<5} -", summary.day),
        }
    }
    Ok(())
}
