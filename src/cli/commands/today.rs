//! semantle today - Current puzzle and next rotation

use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct TodayArgs {}

#[derive(Debug, Serialize)]
struct TodayReport {
    day: usize,
    cycle: i64,
    local_date: NaiveDate,
    timezone: String,
    next_rollover: DateTime<Utc>,
    active_on_boot: bool,
    num_secrets: usize,
}

pub fn run(ctx: &AppContext, _args: &TodayArgs) -> Result<()> {
    let now = Utc::now();
    let calendar = ctx.rotation.calendar();
    let position = calendar.position(now);
    let report = TodayReport {
        day: position.index,
        cycle: position.cycle,
        local_date: calendar.local_date(now),
        timezone: calendar.timezone().name().to_string(),
        next_rollover: calendar.next_rollover(now),
        active_on_boot: ctx.boot_activates(position.index, now),
        num_secrets: calendar.num_secrets(),
    };

    if ctx.robot_mode {
        return emit_robot(&robot_ok(report));
    }

    let mut layout = HumanLayout::new();
    layout
        .title(&format!("Puzzle #{}", report.day))
        .kv("local date", &format!("{} ({})", report.local_date, report.timezone))
        .kv("cycle", &report.cycle.to_string())
        .kv("catalog", &format!("{} secrets", report.num_secrets))
        .kv("next rotation", &report.next_rollover.to_rfc3339())
        .kv(
            "playable",
            if report.active_on_boot {
                "yes"
            } else {
                "after next rotation"
            },
        );
    emit_human(layout);
    Ok(())
}
