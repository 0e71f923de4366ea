//! Date Formatting Helpers

use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// "Good morning" through "Good night" by hour of day
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        17..=20 => "Good evening",
        _ => "Good night",
    }
}

/// "Monday, January 5"
pub fn format_today(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// Compact due-date label: Today/Tomorrow/Yesterday, a weekday inside the
/// coming week, otherwise "Jan 5"
pub fn format_date_short(date: NaiveDate, today: NaiveDate) -> String {
    let diff = (date - today).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        2..=7 => date.format("%a").to_string(),
        _ => date.format("%b %-d").to_string(),
    }
}

/// "Mon, Jan 5" for journal headers
pub fn format_note_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// "Jan 5 – Feb 15" for milestone headers
pub fn format_range(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() {
        format!("{} – {}", start.format("%b %-d"), end.format("%b %-d"))
    } else {
        format!("{} – {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_greeting_buckets() {
        assert_eq!(greeting(6), "Good morning");
        assert_eq!(greeting(13), "Good afternoon");
        assert_eq!(greeting(18), "Good evening");
        assert_eq!(greeting(23), "Good night");
        assert_eq!(greeting(2), "Good night");
    }

    #[test]
    fn test_short_labels_near_today() {
        let today = date("2026-01-05");
        assert_eq!(format_date_short(date("2026-01-05"), today), "Today");
        assert_eq!(format_date_short(date("2026-01-06"), today), "Tomorrow");
        assert_eq!(format_date_short(date("2026-01-04"), today), "Yesterday");
        assert_eq!(format_date_short(date("2026-01-09"), today), "Fri");
        assert_eq!(format_date_short(date("2026-02-20"), today), "Feb 20");
    }

    #[test]
    fn test_range_collapses_same_year() {
        assert_eq!(format_range(date("2026-01-01"), date("2026-02-15")), "Jan 1 – Feb 15");
        assert_eq!(
            format_range(date("2025-12-21"), date("2026-01-07")),
            "Dec 21, 2025 – Jan 7, 2026"
        );
    }
}
