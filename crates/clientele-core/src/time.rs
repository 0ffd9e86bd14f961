use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const DISPLAY_FORMAT: &str = "%d/%m/%Y | %H:%M:%S";

#[derive(Debug, Error)]
pub enum TimeParseError {
    #[error("timestamp cannot be empty")]
    Empty,
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid datetime format: expected YYYY-MM-DD or YYYY-MM-DD HH:MM")]
    InvalidDateTime,
    #[error("ambiguous local time: {0}")]
    AmbiguousLocalTime(String),
}

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

/// Parses `YYYY-MM-DD`, optionally followed by `HH:MM[:SS]`, as local time.
/// A bare date means local midnight.
pub fn parse_local_timestamp(input: &str) -> Result<i64, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }
    local_to_utc_timestamp(parse_naive(trimmed)?)
}

fn parse_naive(raw: &str) -> Result<NaiveDateTime, TimeParseError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).ok_or(TimeParseError::InvalidDate);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or(TimeParseError::InvalidDateTime)
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    to_local(ts).format("%Y-%m-%d %H:%M").to_string()
}

/// Long form used in detail views, e.g. `15/01/2030 | 13:45:00`.
pub fn format_timestamp_display(ts: i64) -> String {
    to_local(ts).format(DISPLAY_FORMAT).to_string()
}

fn to_local(ts: i64) -> DateTime<Local> {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(&Local)
}

fn local_to_utc_timestamp(naive: NaiveDateTime) -> Result<i64, TimeParseError> {
    let local = Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| TimeParseError::AmbiguousLocalTime(naive.to_string()))?;
    Ok(local.with_timezone(&Utc).timestamp())
}

#[cfg(test)]
mod tests {
    use super::{
        format_timestamp_datetime, format_timestamp_display, parse_local_timestamp,
        TimeParseError,
    };
    use chrono::{Local, TimeZone, Utc};

    #[test]
    fn parse_local_timestamp_accepts_date_only() {
        let ts = parse_local_timestamp("2030-01-15").unwrap();
        let local = Utc.timestamp_opt(ts, 0).unwrap().with_timezone(&Local);
        assert_eq!(local.format("%Y-%m-%d").to_string(), "2030-01-15");
    }

    #[test]
    fn parse_local_timestamp_accepts_seconds() {
        let ts = parse_local_timestamp("2030-01-15 13:45:10").unwrap();
        let local = Utc.timestamp_opt(ts, 0).unwrap().with_timezone(&Local);
        assert_eq!(
            local.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2030-01-15 13:45:10"
        );
    }

    #[test]
    fn parse_local_timestamp_rejects_garbage() {
        assert!(matches!(
            parse_local_timestamp("   ").unwrap_err(),
            TimeParseError::Empty
        ));
        assert!(matches!(
            parse_local_timestamp("15/01/2030").unwrap_err(),
            TimeParseError::InvalidDateTime
        ));
    }

    #[test]
    fn format_helpers_match_local_time() {
        let local = Local.with_ymd_and_hms(2030, 1, 15, 13, 45, 7).unwrap();
        let ts = local.with_timezone(&Utc).timestamp();
        assert_eq!(format_timestamp_datetime(ts), "2030-01-15 13:45");
        assert_eq!(format_timestamp_display(ts), "15/01/2030 | 13:45:07");
    }
}
