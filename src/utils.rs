use std::time::{SystemTime, UNIX_EPOCH};

pub fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Humanized age of a unix-millis timestamp relative to `now_ms`,
/// e.g. "4 minutes ago".
pub fn format_relative(then_ms: u64, now_ms: u64) -> String {
    let secs = now_ms.saturating_sub(then_ms) / 1000;
    if secs < 5 {
        return "just now".to_string();
    }
    if secs < 60 {
        return format!("{} seconds ago", secs);
    }
    if secs < 3600 {
        return ago(secs / 60, "minute");
    }
    if secs < 86_400 {
        return ago(secs / 3600, "hour");
    }
    ago(secs / 86_400, "day")
}

fn ago(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_formatting() {
        let now = 1_000_000_000;
        assert_eq!(format_relative(now, now), "just now");
        assert_eq!(format_relative(now - 4_000, now), "just now");
        assert_eq!(format_relative(now - 30_000, now), "30 seconds ago");
        assert_eq!(format_relative(now - 60_000, now), "1 minute ago");
        assert_eq!(format_relative(now - 45 * 60_000, now), "45 minutes ago");
        assert_eq!(format_relative(now - 2 * 3_600_000, now), "2 hours ago");
        assert_eq!(format_relative(now - 3 * 86_400_000, now), "3 days ago");
    }

    #[test]
    fn test_relative_clamps_future_timestamps() {
        let now = 1_000_000_000;
        assert_eq!(format_relative(now + 60_000, now), "just now");
    }
}
