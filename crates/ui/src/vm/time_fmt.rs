use chrono::NaiveDate;

/// `Nov 5, 2025`
#[must_use]
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Wednesday, November 5`
#[must_use]
pub fn format_day_heading(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// Deadline relative to `today`, at day granularity.
#[must_use]
pub fn format_relative_due(due: NaiveDate, today: NaiveDate) -> String {
    let days = (due - today).num_days();
    match days {
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        -1 => "1 day overdue".to_string(),
        d if d > 1 => format!("Due in {d} days"),
        d => format!("{} days overdue", -d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    #[test]
    fn formats_dates() {
        assert_eq!(format_due_date(date(5)), "Nov 5, 2025");
        assert_eq!(format_day_heading(date(5)), "Wednesday, November 5");
    }

    #[test]
    fn relative_labels() {
        let today = date(10);
        assert_eq!(format_relative_due(date(10), today), "Due today");
        assert_eq!(format_relative_due(date(11), today), "Due tomorrow");
        assert_eq!(format_relative_due(date(14), today), "Due in 4 days");
        assert_eq!(format_relative_due(date(9), today), "1 day overdue");
        assert_eq!(format_relative_due(date(5), today), "5 days overdue");
    }
}
