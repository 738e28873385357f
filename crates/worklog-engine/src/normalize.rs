use chrono::NaiveDate;
use std::collections::BTreeMap;
use worklog_types::SubmissionEntry;

/// Redistribute each date's minutes to exactly the daily budget.
///
/// Every date is normalized independently and exhaustively: a date with a
/// single entry still receives the entire budget. Per date bucket:
///
/// 1. Each entry gets a raw proportional share of the budget.
/// 2. Shares are rounded half-up to the nearest increment; a share that
///    rounds to zero is clamped up to one increment (an entry that existed
///    at all is worth reporting).
/// 3. The rounding remainder is applied wholly to the bucket's largest
///    rounded entry, first entry winning ties. Both the budget and every
///    rounded value are multiples of the increment, so the final values
///    stay on the increment grid while summing exactly to the budget.
///
/// A bucket whose original minutes sum to zero is skipped; its entries
/// keep `normalized_minutes == None` and callers must tolerate that.
pub fn normalize_entries(
    entries: &mut [SubmissionEntry],
    daily_budget_minutes: i64,
    round_increment_minutes: i64,
) {
    // Indices grouped per date, preserving input order within each bucket.
    let mut by_date: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    for (idx, entry) in entries.iter().enumerate() {
        by_date.entry(entry.date).or_default().push(idx);
    }

    for indices in by_date.values() {
        let total: i64 = indices.iter().map(|&i| entries[i].original_minutes).sum();
        if total == 0 {
            continue;
        }

        let mut allocated = 0;
        for &i in indices {
            let raw = entries[i].original_minutes as f64 / total as f64
                * daily_budget_minutes as f64;
            let mut rounded = round_to_increment(raw, round_increment_minutes);
            if rounded == 0 {
                rounded = round_increment_minutes;
            }
            entries[i].normalized_minutes = Some(rounded);
            allocated += rounded;
        }

        let remainder = daily_budget_minutes - allocated;
        if remainder != 0
            && let Some(&largest) = indices
                .iter()
                .max_by_key(|&&i| (entries[i].normalized_minutes, std::cmp::Reverse(i)))
        {
            let value = entries[largest].normalized_minutes.unwrap_or(0) + remainder;
            entries[largest].normalized_minutes = Some(value);
        }
    }
}

/// Round half-up to the nearest multiple of the increment.
fn round_to_increment(raw: f64, increment: i64) -> i64 {
    ((raw / increment as f64) + 0.5).floor() as i64 * increment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: u32, minutes: i64) -> SubmissionEntry {
        SubmissionEntry::new(
            None,
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            format!("entry {}", minutes),
            minutes,
        )
    }

    fn normalized(entries: &[SubmissionEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.normalized_minutes.unwrap()).collect()
    }

    #[test]
    fn proportional_shares_sum_to_budget() {
        // 120/180/60 of 360 total against a 480 budget.
        let mut entries = vec![entry(3, 120), entry(3, 180), entry(3, 60)];
        normalize_entries(&mut entries, 480, 30);

        assert_eq!(normalized(&entries), vec![150, 240, 90]);
        assert_eq!(normalized(&entries).iter().sum::<i64>(), 480);
        assert!(normalized(&entries).iter().all(|m| m % 30 == 0));
    }

    #[test]
    fn single_entry_receives_whole_budget() {
        let mut entries = vec![entry(3, 60)];
        normalize_entries(&mut entries, 240, 30);
        assert_eq!(entries[0].normalized_minutes, Some(240));
    }

    #[test]
    fn tiny_entry_is_clamped_to_one_increment() {
        let mut entries = vec![entry(3, 300), entry(3, 10)];
        normalize_entries(&mut entries, 480, 30);

        let values = normalized(&entries);
        assert!(values[1] >= 30);
        assert_eq!(values.iter().sum::<i64>(), 480);
        // 10/310 of 480 rounds to zero, clamps to 30; the remainder lands
        // on the large entry.
        assert_eq!(values, vec![450, 30]);
    }

    #[test]
    fn dates_are_normalized_independently() {
        let mut entries = vec![entry(3, 60), entry(4, 90), entry(3, 60)];
        normalize_entries(&mut entries, 480, 30);

        assert_eq!(entries[0].normalized_minutes, Some(240));
        assert_eq!(entries[2].normalized_minutes, Some(240));
        assert_eq!(entries[1].normalized_minutes, Some(480));
    }

    #[test]
    fn remainder_goes_to_first_largest_on_ties() {
        // Three equal entries: 480/3 = 160, rounds to 150 each, 30 left
        // over. The first entry is the tie-winner.
        let mut entries = vec![entry(3, 100), entry(3, 100), entry(3, 100)];
        normalize_entries(&mut entries, 480, 30);
        assert_eq!(normalized(&entries), vec![180, 150, 150]);
    }

    #[test]
    fn zero_total_bucket_is_left_unnormalized() {
        let mut entries = vec![entry(3, 0), entry(3, 0), entry(4, 60)];
        normalize_entries(&mut entries, 480, 30);

        assert_eq!(entries[0].normalized_minutes, None);
        assert_eq!(entries[1].normalized_minutes, None);
        assert_eq!(entries[2].normalized_minutes, Some(480));
    }

    #[test]
    fn original_minutes_are_preserved() {
        let mut entries = vec![entry(3, 120), entry(3, 45)];
        normalize_entries(&mut entries, 480, 30);
        assert_eq!(entries[0].original_minutes, 120);
        assert_eq!(entries[1].original_minutes, 45);
    }
}
