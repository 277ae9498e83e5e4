/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Attendance marker color:
/// attended → green
/// missed → grey
pub fn color_for_attended(attended: bool) -> &'static str {
    if attended { GREEN } else { GREY }
}

/// Streak color:
/// \>0 → green
/// 0 → grey
pub fn color_for_streak(value: i64) -> &'static str {
    if value > 0 { GREEN } else { GREY }
}
