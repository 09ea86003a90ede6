use chrono::NaiveDate;

use crate::calendar;
use crate::models::{GridPosition, TimelineWindow};
use crate::scale::Scale;

/// Map a date range onto the window's 1-based columns.
///
/// Returns `None` when either end of the range is missing. The result is not
/// clamped: ranges before or after the window produce indices below 1 or
/// above `total_units`.
pub fn position(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    window: &TimelineWindow,
    scale: Scale,
) -> Option<GridPosition> {
    let (start, end) = (start?, end?);
    Some(scale.layout().position_of(start, end, window))
}

pub fn week_position(start: NaiveDate, end: NaiveDate, window: &TimelineWindow) -> GridPosition {
    let origin = calendar::week_monday(window.start_date);
    let index = |date: NaiveDate| {
        (calendar::week_monday(date) - origin)
            .num_days()
            .div_euclid(7)
            + 1
    };
    GridPosition::between(index(start), index(end))
}

pub fn month_position(start: NaiveDate, end: NaiveDate, window: &TimelineWindow) -> GridPosition {
    let origin = calendar::month_ordinal(window.start_date);
    let index = |date: NaiveDate| calendar::month_ordinal(date) - origin + 1;
    GridPosition::between(index(start), index(end))
}

pub fn quarter_position(
    start: NaiveDate,
    end: NaiveDate,
    window: &TimelineWindow,
) -> GridPosition {
    let origin = calendar::quarter_ordinal(window.start_date);
    let index = |date: NaiveDate| calendar::quarter_ordinal(date) - origin + 1;
    GridPosition::between(index(start), index(end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::compute_window;
    use chrono::Duration;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn missing_endpoint_has_no_position() {
        let window = compute_window(Scale::Week, ymd(2025, 1, 6)).unwrap();
        assert_eq!(position(None, Some(ymd(2025, 1, 6)), &window, Scale::Week), None);
        assert_eq!(position(Some(ymd(2025, 1, 6)), None, &window, Scale::Week), None);
    }

    #[test]
    fn week_ranges_align_to_mondays() {
        let window = compute_window(Scale::Week, ymd(2025, 1, 6)).unwrap();
        let placed = position(Some(ymd(2025, 1, 15)), Some(ymd(2025, 1, 28)), &window, Scale::Week);
        assert_eq!(placed, Some(GridPosition { start: 2, span: 3 }));
    }

    #[test]
    fn week_ranges_before_window_go_negative() {
        let window = compute_window(Scale::Week, ymd(2025, 1, 6)).unwrap();
        let placed = week_position(ymd(2024, 12, 16), ymd(2024, 12, 22), &window);
        assert_eq!(placed, GridPosition { start: -2, span: 1 });
        assert_eq!(placed.end(), -2);
    }

    #[test]
    fn month_ranges_cross_year_boundary() {
        let window = compute_window(Scale::Month, ymd(2024, 11, 3)).unwrap();
        let placed = month_position(ymd(2024, 12, 30), ymd(2025, 2, 2), &window);
        assert_eq!(placed, GridPosition { start: 2, span: 3 });
        let far = month_position(ymd(2026, 1, 1), ymd(2026, 1, 31), &window);
        assert_eq!(far.start, 15);
    }

    #[test]
    fn quarter_ranges_use_quarter_ordinals() {
        let window = compute_window(Scale::Quarter, ymd(2025, 2, 10)).unwrap();
        let placed = quarter_position(ymd(2025, 3, 31), ymd(2025, 4, 1), &window);
        assert_eq!(placed, GridPosition { start: 1, span: 2 });
        let before = quarter_position(ymd(2024, 10, 1), ymd(2024, 12, 31), &window);
        assert_eq!(before, GridPosition { start: 0, span: 1 });
    }

    proptest! {
        #[test]
        fn prop_range_inside_header_maps_to_that_column(
            days in 0i64..30_000,
            pick in 0usize..3,
            column in 0usize..8,
            a in 0i64..120,
            b in 0i64..120,
        ) {
            let scale = Scale::ALL[pick];
            let window = compute_window(scale, ymd(1990, 1, 1) + Duration::days(days)).unwrap();
            let header = &window.headers[column];
            let length = (header.end - header.start).num_days() + 1;
            let (lo, hi) = (a.min(b) % length, a.max(b) % length);
            let (lo, hi) = (lo.min(hi), lo.max(hi));
            let placed = position(
                Some(header.start + Duration::days(lo)),
                Some(header.start + Duration::days(hi)),
                &window,
                scale,
            );
            prop_assert_eq!(placed, Some(GridPosition { start: column as i64 + 1, span: 1 }));
        }
    }
}
