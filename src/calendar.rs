//! Calendar arithmetic shared by the window calculator, the grid mapper and
//! the bar aggregator, so all three agree on week and quarter boundaries.

use chrono::{Datelike, Duration, Months, NaiveDate};

/// Monday of the ISO week containing `date`.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Monday of ISO week 1 of `year`. January 4 always falls in week 1.
pub fn week_one_monday(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 4).map(week_monday)
}

/// Calendar bounds (Monday to Sunday) of `week_number` counted from week 1
/// of `year`. Week numbers past the last ISO week of the year simply roll
/// into the following year.
pub fn week_bounds(year: i32, week_number: i32) -> Option<(NaiveDate, NaiveDate)> {
    let offset = Duration::try_weeks(i64::from(week_number) - 1)?;
    let start = week_one_monday(year)?.checked_add_signed(offset)?;
    let end = start.checked_add_signed(Duration::days(6))?;
    Some((start, end))
}

/// ISO week number of `date`, derived from the same week-1 anchor used for
/// weekly records.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    let monday = week_monday(date);
    let anchor = [date.year() + 1, date.year(), date.year() - 1]
        .into_iter()
        .filter_map(week_one_monday)
        .find(|first| *first <= monday);

    match anchor {
        Some(first) => ((monday - first).num_days() / 7 + 1) as u32,
        None => date.iso_week().week(),
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the quarter containing `date` (months 1, 4, 7, 10).
pub fn first_of_quarter(date: NaiveDate) -> NaiveDate {
    let month = date.month0() / 3 * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
}

pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Quarter number in 1..=4.
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

/// Months elapsed since year 0, used to diff month positions.
pub fn month_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Quarters elapsed since year 0.
pub fn quarter_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 4 + i64::from(date.month0() / 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_one_contains_january_fourth() {
        assert_eq!(week_one_monday(2025), Some(ymd(2024, 12, 30)));
        assert_eq!(week_one_monday(2026), Some(ymd(2025, 12, 29)));
        assert_eq!(week_one_monday(2021), Some(ymd(2021, 1, 4)));
    }

    #[test]
    fn week_bounds_span_monday_to_sunday() {
        assert_eq!(week_bounds(2025, 2), Some((ymd(2025, 1, 6), ymd(2025, 1, 12))));
        assert_eq!(week_bounds(2025, 1), Some((ymd(2024, 12, 30), ymd(2025, 1, 5))));
    }

    #[test]
    fn iso_week_number_matches_chrono() {
        let mut day = ymd(2019, 12, 1);
        while day < ymd(2027, 2, 1) {
            assert_eq!(iso_week_number(day), day.iso_week().week(), "{day}");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn quarter_helpers() {
        assert_eq!(first_of_quarter(ymd(2025, 5, 17)), ymd(2025, 4, 1));
        assert_eq!(first_of_quarter(ymd(2025, 12, 31)), ymd(2025, 10, 1));
        assert_eq!(quarter_of(ymd(2025, 9, 30)), 3);
        assert_eq!(quarter_ordinal(ymd(2026, 1, 1)) - quarter_ordinal(ymd(2025, 12, 31)), 1);
    }

    #[test]
    fn week_monday_is_identity_on_mondays() {
        assert_eq!(week_monday(ymd(2025, 1, 6)), ymd(2025, 1, 6));
        assert_eq!(week_monday(ymd(2025, 1, 12)), ymd(2025, 1, 6));
    }
}
