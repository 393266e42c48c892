use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::AppError;

/// Combine a `YYYY-MM-DD` date with `HH:MM`[:SS] times of day into a pair
/// of UTC timestamps. No `start < end` check is made; the stored window is
/// whatever the form said.
pub fn parse_window(
    date: &str,
    start_time: &str,
    end_time: &str,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let date: NaiveDate = date
        .parse()
        .map_err(|e| AppError::BadRequest(format!("Invalid date: {e}")))?;

    Ok((
        combine(date, parse_time(start_time)?),
        combine(date, parse_time(end_time)?),
    ))
}

fn parse_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|e| AppError::BadRequest(format!("Invalid time of day {value:?}: {e}")))
}

fn combine(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    NaiveDateTime::new(date, time).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_date_and_times() {
        let (start, end) = parse_window("2026-03-02", "09:00", "10:30").unwrap();
        assert_eq!(start.to_rfc3339(), "2026-03-02T09:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2026-03-02T10:30:00+00:00");
    }

    #[test]
    fn accepts_seconds() {
        let (start, _) = parse_window("2026-03-02", "09:00:30", "10:00").unwrap();
        assert_eq!(start.to_rfc3339(), "2026-03-02T09:00:30+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_window("not-a-date", "09:00", "10:00").is_err());
        assert!(parse_window("2026-03-02", "9am", "10:00").is_err());
    }

    #[test]
    fn inverted_windows_are_not_rejected() {
        // The stored window is exactly what the form said.
        let (start, end) = parse_window("2026-03-02", "15:00", "09:00").unwrap();
        assert!(start > end);
    }
}
