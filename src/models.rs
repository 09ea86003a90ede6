use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scale::Scale;

#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub name: String,
    pub year: Option<i32>,
}

/// One week of planned and reported progress for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgressRecord {
    pub week_number: i32,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub planned_progress: i32,
    #[serde(default)]
    pub actual_progress: i32,
    #[serde(default)]
    pub planned_description: String,
    #[serde(default)]
    pub actual_description: Option<String>,
    #[serde(default)]
    pub actual_hours: f64,
}

impl WeeklyProgressRecord {
    /// Whether anything has been reported against this week.
    pub fn has_content(&self) -> bool {
        self.actual_description
            .as_deref()
            .is_some_and(|text| !text.is_empty())
            || self.actual_progress > 0
    }

    /// Sort key putting records in calendar order. Records without a year
    /// count from `project_year`.
    pub fn calendar_key(&self, project_year: Option<i32>) -> (Option<i32>, i32) {
        (self.year.or(project_year), self.week_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The bounded calendar range being rendered, split into header columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineWindow {
    pub scale: Scale,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub headers: Vec<Header>,
    pub total_units: usize,
    pub grid_template: String,
}

/// 1-based column placement. Either end may lie outside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridPosition {
    #[serde(rename = "grid_start")]
    pub start: i64,
    #[serde(rename = "grid_span")]
    pub span: i64,
}

impl GridPosition {
    pub fn between(start: i64, end: i64) -> Self {
        Self {
            start,
            span: end - start + 1,
        }
    }

    pub fn end(&self) -> i64 {
        self.start + self.span - 1
    }

    pub fn overlaps(&self, total_units: usize) -> bool {
        self.end() >= 1 && self.start <= total_units as i64
    }
}

/// A weekly record together with the calendar week it was placed in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarMember {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub record: WeeklyProgressRecord,
}

/// A contiguous run of weeks sharing one planned description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseBar {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub members: Vec<BarMember>,
    #[serde(flatten)]
    pub placement: Option<GridPosition>,
    pub actuals: Vec<ActualSegment>,
}

/// Reported progress for one week, positioned inside the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActualSegment {
    #[serde(flatten)]
    pub placement: GridPosition,
    pub progress: i32,
    pub description: Option<String>,
    pub week_number: i32,
    pub year: Option<i32>,
    pub actual_hours: f64,
    pub planned_progress: i32,
    pub planned_description: String,
    pub has_content: bool,
}

/// Everything a renderer needs to draw one project's timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttView {
    pub scale: Scale,
    pub focus_date: NaiveDate,
    pub prev_date: NaiveDate,
    pub next_date: NaiveDate,
    pub project_year: i32,
    pub window: TimelineWindow,
    pub bars: Vec<PhaseBar>,
}
