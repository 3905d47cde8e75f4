use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Resolve a date argument to its stored `YYYY-MM-DD` form.
/// `None` means today.
pub(crate) fn parse_date(date_str: Option<String>) -> Result<String> {
    let date = match date_str {
        None => Local::now().date_naive(),
        Some(s) => match s.as_str() {
            "today" => Local::now().date_naive(),
            "yesterday" => Local::now().date_naive() - chrono::Duration::days(1),
            _ => NaiveDate::parse_from_str(&s, "%Y-%m-%d").with_context(|| {
                format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday")
            })?,
        },
    };
    Ok(date.format("%Y-%m-%d").to_string())
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

/// Print a one-line warning when the tolerant load dropped rows.
pub(crate) fn warn_skipped(skipped: usize) {
    if skipped > 0 {
        eprintln!("Warning: skipped {skipped} malformed row(s) in the meal log");
    }
}
