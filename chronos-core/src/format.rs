//! Formatting helpers shared by the tracker, reports and the UI.

use chrono::{DateTime, Datelike, Local, Timelike};

/// Format seconds as `M:SS` (minutes unpadded, no hour rollover).
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format a timestamp as 24-hour wall-clock time (`14:05:09`).
pub fn format_clock_time(ts: DateTime<Local>) -> String {
    ts.format("%H:%M:%S").to_string()
}

/// Format a timestamp in the zh-TW locale style (`2024/5/3 下午2:05:09`).
pub fn format_local_datetime(ts: DateTime<Local>) -> String {
    let (is_pm, hour12) = ts.hour12();
    let meridiem = if is_pm { "下午" } else { "上午" };
    format!(
        "{} {}{}:{:02}:{:02}",
        format_local_date(ts),
        meridiem,
        hour12,
        ts.minute(),
        ts.second()
    )
}

/// Format a date in the zh-TW locale style (`2024/5/3`).
pub fn format_local_date(ts: DateTime<Local>) -> String {
    format!("{}/{}/{}", ts.year(), ts.month(), ts.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 3, h, m, s).unwrap()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(30), "0:30");
        assert_eq!(format_duration(61), "1:01");
        assert_eq!(format_duration(6000), "100:00");
    }

    #[test]
    fn test_format_clock_time_is_24_hour() {
        assert_eq!(format_clock_time(at(14, 5, 9)), "14:05:09");
        assert_eq!(format_clock_time(at(0, 0, 1)), "00:00:01");
    }

    #[test]
    fn test_format_local_datetime() {
        assert_eq!(format_local_datetime(at(14, 5, 9)), "2024/5/3 下午2:05:09");
        assert_eq!(format_local_datetime(at(0, 30, 0)), "2024/5/3 上午12:30:00");
        assert_eq!(format_local_datetime(at(12, 0, 0)), "2024/5/3 下午12:00:00");
    }
}
