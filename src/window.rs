use chrono::{Datelike, Duration, NaiveDate};

use crate::calendar;
use crate::error::TimelineError;
use crate::models::{Header, TimelineWindow};
use crate::scale::Scale;

pub fn compute_window(scale: Scale, focus: NaiveDate) -> Result<TimelineWindow, TimelineError> {
    scale.layout().window_for(focus)
}

/// Twelve weeks starting on the Monday of the focus week.
pub fn week_window(focus: NaiveDate) -> Result<TimelineWindow, TimelineError> {
    assemble(
        Scale::Week,
        calendar::week_monday(focus),
        |start| start.checked_add_signed(Duration::days(7)),
        |start| {
            format!(
                "W{} ({}/{})",
                calendar::iso_week_number(start),
                start.month(),
                start.day()
            )
        },
    )
}

/// Twelve calendar months starting with the focus month.
pub fn month_window(focus: NaiveDate) -> Result<TimelineWindow, TimelineError> {
    assemble(
        Scale::Month,
        calendar::first_of_month(focus),
        |start| calendar::add_months(start, 1),
        |start| start.format("%Y-%m").to_string(),
    )
}

/// Eight quarters (two years) starting with the focus quarter.
pub fn quarter_window(focus: NaiveDate) -> Result<TimelineWindow, TimelineError> {
    assemble(
        Scale::Quarter,
        calendar::first_of_quarter(focus),
        |start| calendar::add_months(start, 3),
        |start| format!("{} Q{}", start.year(), calendar::quarter_of(start)),
    )
}

fn assemble(
    scale: Scale,
    start_date: NaiveDate,
    next_bucket: impl Fn(NaiveDate) -> Option<NaiveDate>,
    label: impl Fn(NaiveDate) -> String,
) -> Result<TimelineWindow, TimelineError> {
    let total_units = scale.total_units();
    let mut headers = Vec::with_capacity(total_units);
    let mut cursor = start_date;

    for _ in 0..total_units {
        let next = next_bucket(cursor).ok_or(TimelineError::DateOutOfRange(start_date))?;
        let end = next
            .pred_opt()
            .ok_or(TimelineError::DateOutOfRange(start_date))?;
        headers.push(Header {
            label: label(cursor),
            start: cursor,
            end,
        });
        cursor = next;
    }

    let end_date = headers.last().map_or(start_date, |header| header.end);

    Ok(TimelineWindow {
        scale,
        start_date,
        end_date,
        headers,
        total_units,
        grid_template: format!("repeat({total_units}, 1fr)"),
    })
}
