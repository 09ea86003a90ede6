use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TimelineError;
use crate::grid;
use crate::models::{GridPosition, TimelineWindow};
use crate::window;

/// Zoom level of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Week,
    Month,
    Quarter,
}

/// Scale-specific window and placement arithmetic.
pub trait ScaleLayout {
    fn window_for(&self, focus: NaiveDate) -> Result<TimelineWindow, TimelineError>;
    fn position_of(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        window: &TimelineWindow,
    ) -> GridPosition;
}

pub struct WeekLayout;
pub struct MonthLayout;
pub struct QuarterLayout;

impl ScaleLayout for WeekLayout {
    fn window_for(&self, focus: NaiveDate) -> Result<TimelineWindow, TimelineError> {
        window::week_window(focus)
    }

    fn position_of(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        window: &TimelineWindow,
    ) -> GridPosition {
        grid::week_position(start, end, window)
    }
}

impl ScaleLayout for MonthLayout {
    fn window_for(&self, focus: NaiveDate) -> Result<TimelineWindow, TimelineError> {
        window::month_window(focus)
    }

    fn position_of(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        window: &TimelineWindow,
    ) -> GridPosition {
        grid::month_position(start, end, window)
    }
}

impl ScaleLayout for QuarterLayout {
    fn window_for(&self, focus: NaiveDate) -> Result<TimelineWindow, TimelineError> {
        window::quarter_window(focus)
    }

    fn position_of(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        window: &TimelineWindow,
    ) -> GridPosition {
        grid::quarter_position(start, end, window)
    }
}

impl Scale {
    pub const ALL: [Scale; 3] = [Scale::Week, Scale::Month, Scale::Quarter];

    pub fn layout(self) -> &'static dyn ScaleLayout {
        match self {
            Scale::Week => &WeekLayout,
            Scale::Month => &MonthLayout,
            Scale::Quarter => &QuarterLayout,
        }
    }

    /// Number of header columns in a window of this scale.
    pub fn total_units(self) -> usize {
        match self {
            Scale::Week | Scale::Month => 12,
            Scale::Quarter => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scale::Week => "week",
            Scale::Month => "month",
            Scale::Quarter => "quarter",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scale {
    type Err = TimelineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Scale::ALL
            .into_iter()
            .find(|scale| scale.as_str() == value)
            .ok_or_else(|| TimelineError::UnsupportedScale(value.to_string()))
    }
}
