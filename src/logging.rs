//! Timestamped diagnostics on stderr.
//!
//! `PROJECTILE_LOG` selects the minimum level: `error`, `warn`, `info`
//! (default) or `off`.

use std::env;
use std::fmt;

use chrono::{DateTime, Local};

pub const LOG_ENV_VAR: &str = "PROJECTILE_LOG";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
        };
        f.pad(name)
    }
}

/// `None` means logging is switched off.
pub fn parse_threshold(value: Option<&str>) -> Option<Level> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("off") | Some("none") => None,
        Some("error") => Some(Level::Error),
        Some("warn") | Some("warning") => Some(Level::Warn),
        _ => Some(Level::Info),
    }
}

fn threshold() -> Option<Level> {
    parse_threshold(env::var(LOG_ENV_VAR).ok().as_deref())
}

pub fn format_line(timestamp: DateTime<Local>, level: Level, message: &str) -> String {
    format!("{} {level:<5} {message}", timestamp.format("%Y-%m-%d %H:%M:%S%.3f"))
}

pub fn log(level: Level, message: &str) {
    if threshold().is_some_and(|min| level <= min) {
        eprintln!("{}", format_line(Local::now(), level, message));
    }
}

pub fn info(message: &str) {
    log(Level::Info, message);
}

pub fn warn(message: &str) {
    log(Level::Warn, message);
}

pub fn error(message: &str) {
    log(Level::Error, message);
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::{Level, format_line, parse_threshold};

    #[test]
    fn threshold_defaults_to_info() {
        assert_eq!(parse_threshold(None), Some(Level::Info));
        assert_eq!(parse_threshold(Some("bogus")), Some(Level::Info));
        assert_eq!(parse_threshold(Some(" WARN ")), Some(Level::Warn));
        assert_eq!(parse_threshold(Some("off")), None);
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Warn < Level::Info);
    }

    #[test]
    fn line_carries_timestamp_and_level() {
        let ts = Local
            .with_ymd_and_hms(2024, 7, 9, 14, 5, 7)
            .single()
            .expect("unambiguous local time");
        let line = format_line(ts, Level::Warn, "probe failed");
        assert_eq!(line, "2024-07-09 14:05:07.000 WARN  probe failed");
    }
}
