//! Record dates as they appear in exports.

use chrono::{DateTime, NaiveDate};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Parse `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY.MM.DD` or an RFC 3339 timestamp.
/// Timestamps keep their own calendar date (no timezone shift).
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
