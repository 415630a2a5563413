/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Grey placeholder for empty cells, plain value otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--:--" {
        format!("{GREY}--:--:--{RESET}")
    } else {
        value.to_string()
    }
}

/// Check-in in green, check-out in red; an unverified time is greyed.
pub fn colorize_in_out(value: &str, is_in: bool, verified: bool) -> String {
    if value.trim().is_empty() {
        return colorize_optional(value);
    }
    if !verified {
        return format!("{GREY}{value}{RESET}");
    }

    if is_in {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}
