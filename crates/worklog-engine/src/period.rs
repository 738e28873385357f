use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Monday through Sunday of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = date.weekday().num_days_from_monday() as i64;
    let monday = date - Duration::days(offset);
    (monday, monday + Duration::days(6))
}

/// The week before the one containing `today`.
pub fn last_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    week_bounds(today - Duration::days(7))
}

/// Validate an inclusive range before it reaches extraction or reporting.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    if start > end {
        return Err(format!("start date {} is after end date {}", start, end));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_runs_monday_to_sunday() {
        // 2025-03-05 is a Wednesday.
        let (start, end) = week_bounds(date(2025, 3, 5));
        assert_eq!(start, date(2025, 3, 3));
        assert_eq!(end, date(2025, 3, 9));
        assert_eq!(start.weekday(), Weekday::Mon);

        let (start, _) = week_bounds(date(2025, 3, 3));
        assert_eq!(start, date(2025, 3, 3));
    }

    #[test]
    fn last_week_is_previous_monday_to_sunday() {
        let (start, end) = last_week(date(2025, 3, 5));
        assert_eq!(start, date(2025, 2, 24));
        assert_eq!(end, date(2025, 3, 2));
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        assert!(validate_range(date(2025, 3, 5), date(2025, 3, 3)).is_err());
        assert!(validate_range(date(2025, 3, 3), date(2025, 3, 3)).is_ok());
    }
}
