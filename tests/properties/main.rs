//! Property tests for ranking, the calendar and leaderboards.

mod calendar_props;
mod leaderboard_props;
mod ranking_props;
