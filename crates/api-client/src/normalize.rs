//! Column-name and timestamp normalisation shared by the market-data providers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Names that mark the first column as the row index.
const INDEX_COLUMNS: [&str; 5] = ["Date", "Datetime", "Timestamp", "Time", "Price"];

/// Normalises a raw column name to the casing the band engine expects.
///
/// `"high"` → `"High"`, `"ADJ_CLOSE"` / `"adjclose"` → `"Adj Close"`. A
/// flattened multi-level header such as `"('Close', 'AAPL')"` keeps only its
/// first level.
pub fn normalize_column_name(raw: &str) -> String {
    let mut name = raw.trim();
    if let Some(inner) = name.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        name = inner.split(',').next().unwrap_or(inner);
    }
    let name = name.trim().trim_matches(|c: char| c == '\'' || c == '"');

    let words: Vec<String> = name
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-' || c == '.')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    if words.concat() == "adjclose" {
        return "Adj Close".to_string();
    }

    words
        .iter()
        .map(|w| title_case(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether a (normalised) column name denotes the time index.
pub fn is_index_column(name: &str) -> bool {
    INDEX_COLUMNS.contains(&name)
}

/// Parses the timestamp formats pandas and yfinance write: RFC 3339,
/// `YYYY-MM-DD HH:MM:SS[+HH:MM]`, a bare date, or epoch seconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
