use crate::models::{MoodRecord, ViewState};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Where an updated record ended up after a same-day merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Replaced(usize),
    Prepended,
}

/// Reduces a loosely formatted remote timestamp to its UTC calendar day.
/// Timestamps without an offset are read as UTC.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc).date_naive());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc).date_naive());
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc).date_naive());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .ok()
}

pub fn is_on_day(record: &MoodRecord, day: NaiveDate) -> bool {
    normalize_date(&record.date) == Some(day)
}

/// First record, in received order, dated `today` that carries an image.
pub fn today_image(moods: &[MoodRecord], today: NaiveDate) -> Option<String> {
    moods
        .iter()
        .filter(|record| is_on_day(record, today))
        .find_map(|record| record.image().map(str::to_string))
}

/// Merges a freshly submitted record: replaces the first entry already dated
/// `today` in place, otherwise puts the record at the front.
pub fn merge_today(moods: &mut Vec<MoodRecord>, updated: MoodRecord, today: NaiveDate) -> Placement {
    match moods.iter().position(|record| is_on_day(record, today)) {
        Some(index) => {
            moods[index] = updated;
            Placement::Replaced(index)
        }
        None => {
            moods.insert(0, updated);
            Placement::Prepended
        }
    }
}

/// Applies a successful submit response to the view.
pub fn apply_submission(view: &mut ViewState, updated: MoodRecord, today: NaiveDate) -> Placement {
    let image = updated.image().map(str::to_string);
    let placement = merge_today(&mut view.moods, updated, today);
    view.today_image = image;
    placement
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sequence_number: i64, date: &str, image_url: &str) -> MoodRecord {
        MoodRecord {
            sequence_number,
            date: date.to_string(),
            image_url: Some(image_url.to_string()),
            description: format!("mood {sequence_number}"),
            average_mood: "neutral".to_string(),
            total_submissions: 1,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn normalizes_common_remote_formats() {
        let expected = Some(day(2024, 1, 2));
        assert_eq!(normalize_date("2024-01-02T10:00:00Z"), expected);
        assert_eq!(normalize_date("2024-01-02T10:00:00.123Z"), expected);
        assert_eq!(normalize_date("2024-01-02 10:00:00"), expected);
        assert_eq!(normalize_date("2024-01-02T10:00:00"), expected);
        assert_eq!(normalize_date("2024-01-02"), expected);
        assert_eq!(normalize_date(" 2024-01-02 "), expected);
        assert_eq!(normalize_date("Tue, 02 Jan 2024 10:00:00 +0000"), expected);
    }

    #[test]
    fn offsets_are_converted_to_utc_day() {
        assert_eq!(
            normalize_date("2024-01-02T01:00:00+05:00"),
            Some(day(2024, 1, 1))
        );
        assert_eq!(
            normalize_date("2024-01-01 22:00:00-03:00"),
            Some(day(2024, 1, 2))
        );
    }

    #[test]
    fn garbage_dates_do_not_normalize() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("yesterday"), None);
        assert_eq!(normalize_date("2024-13-45"), None);
    }

    #[test]
    fn today_image_first_match_wins() {
        let today = day(2024, 6, 1);
        let moods = vec![
            record(1, "2024-05-31T12:00:00Z", "https://x/old.png"),
            record(2, "not a date", "https://x/bad.png"),
            record(3, "2024-06-01T08:00:00Z", ""),
            record(4, "2024-06-01T09:00:00Z", "https://x/first.png"),
            record(5, "2024-06-01T10:00:00Z", "https://x/second.png"),
        ];

        assert_eq!(
            today_image(&moods, today).as_deref(),
            Some("https://x/first.png")
        );
    }

    #[test]
    fn today_image_absent_without_match() {
        let moods = vec![record(1, "2024-01-01T00:00:00Z", "")];
        assert_eq!(today_image(&moods, day(2024, 1, 2)), None);
        assert_eq!(today_image(&moods, day(2024, 1, 1)), None);
        assert_eq!(today_image(&[], day(2024, 1, 1)), None);
    }

    #[test]
    fn merge_replaces_same_day_entry_in_place() {
        let today = day(2024, 6, 1);
        let mut moods = vec![
            record(1, "2024-05-30", "a"),
            record(2, "2024-06-01T03:00:00Z", "b"),
            record(3, "2024-05-29", "c"),
        ];

        let placement = merge_today(&mut moods, record(9, "2024-06-01T05:00:00Z", "new"), today);

        assert_eq!(placement, Placement::Replaced(1));
        assert_eq!(moods.len(), 3);
        assert_eq!(moods[1].sequence_number, 9);
    }

    #[test]
    fn merge_prepends_when_no_entry_today() {
        let today = day(2024, 6, 1);
        let mut moods = vec![record(1, "2024-05-30", "a")];

        let placement = merge_today(&mut moods, record(2, "2024-06-01", "b"), today);

        assert_eq!(placement, Placement::Prepended);
        assert_eq!(moods.len(), 2);
        assert_eq!(moods[0].sequence_number, 2);
    }

    #[test]
    fn apply_submission_sets_today_image_from_update() {
        let today = day(2024, 6, 1);
        let mut view = ViewState {
            today_image: Some("https://x/stale.png".to_string()),
            ..ViewState::default()
        };

        apply_submission(&mut view, record(2, "2024-06-01", ""), today);
        assert_eq!(view.today_image, None);

        apply_submission(&mut view, record(3, "2024-06-01", "https://x/new.png"), today);
        assert_eq!(view.today_image.as_deref(), Some("https://x/new.png"));
        assert_eq!(view.moods.len(), 1);
    }
}
