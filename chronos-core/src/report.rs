//! Plain-text observation report.
//!
//! The report is a pure function of the session and the generation time, so
//! rendering twice with the same inputs yields byte-identical text.

use std::fmt::Write as _;

use chrono::{DateTime, Local, NaiveDate};

use crate::format::{format_duration, format_local_datetime};
use crate::tracker::Session;

pub const REPORT_TITLE: &str = "Chronos 觀課紀錄報告";
/// Prefix of exported report file names.
pub const REPORT_FILE_PREFIX: &str = "觀課紀錄";
pub const REPORT_FILE_EXTENSION: &str = "txt";

const RULE: &str = "========================";

/// Render the full report.
pub fn render_report(session: &Session, generated_at: DateTime<Local>) -> String {
    let start = session
        .start_time
        .map(format_local_datetime)
        .unwrap_or_else(|| "-".to_string());

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "{REPORT_TITLE}");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "科目：{}", session.subject);
    let _ = writeln!(out, "開始時間：{start}");
    let _ = writeln!(out, "結束時間：{}", format_local_datetime(generated_at));
    out.push('\n');

    out.push_str("[教學模式統計]\n");
    for (mode, secs) in session.mode_durations.iter() {
        let _ = writeln!(out, "- {}: {}", mode.label(), format_duration(secs));
    }
    out.push('\n');

    out.push_str("[教學行為次數]\n");
    for (action, count) in session.action_counts.iter() {
        let _ = writeln!(out, "- {}: {} 次", action.label(), count);
    }
    out.push('\n');

    out.push_str("[詳細紀錄流]\n");
    for entry in session.log.chronological() {
        out.push_str(&entry.report_line());
        out.push('\n');
    }

    out
}

/// `觀課紀錄_<subject>_<YYYY-MM-DD>.txt`, with path separators in the subject
/// replaced so the name stays a single path component.
///
/// `date` is the observer's local calendar date, not the UTC date, so a
/// lesson just after midnight is filed under the day it was taught.
pub fn export_filename(subject: &str, date: NaiveDate) -> String {
    let subject: String = subject
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!(
        "{}_{}_{}.{}",
        REPORT_FILE_PREFIX,
        subject,
        date.format("%Y-%m-%d"),
        REPORT_FILE_EXTENSION
    )
}
