use chrono::{Datelike, Duration, NaiveDate};
use log::{debug, warn};

use crate::bars;
use crate::config::TimelineConfig;
use crate::error::TimelineError;
use crate::models::{GanttView, WeeklyProgressRecord};
use crate::scale::Scale;
use crate::visibility;
use crate::window;

/// What the caller asked to see.
#[derive(Debug, Clone, Default)]
pub struct TimelineRequest {
    pub scale: Option<String>,
    pub focus_date: Option<String>,
    pub project_year: Option<i32>,
}

pub fn parse_focus_date(value: &str) -> Result<NaiveDate, TimelineError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| TimelineError::InvalidDateInput(value.to_string()))
}

/// Parse the requested focus date, substituting `today` when it is missing
/// or malformed.
pub fn resolve_focus_date(value: Option<&str>, today: NaiveDate) -> NaiveDate {
    match value.map(parse_focus_date) {
        Some(Ok(date)) => date,
        Some(Err(err)) => {
            warn!("{err}; using {today}");
            today
        }
        None => today,
    }
}

pub fn resolve_project_year(year: Option<i32>, focus: NaiveDate) -> i32 {
    year.unwrap_or_else(|| {
        debug!("project has no year; anchoring weeks on {}", focus.year());
        focus.year()
    })
}

/// Lay out one project's weekly records for the requested scale and focus.
pub fn build_view(
    request: &TimelineRequest,
    records: &[WeeklyProgressRecord],
    config: &TimelineConfig,
    today: NaiveDate,
) -> Result<GanttView, TimelineError> {
    let scale = match request.scale.as_deref() {
        Some(value) => value.parse::<Scale>()?,
        None => config.default_scale,
    };
    let focus_date = resolve_focus_date(request.focus_date.as_deref(), today);
    let project_year = resolve_project_year(request.project_year, focus_date);

    let window = window::compute_window(scale, focus_date)?;
    let phases = bars::aggregate(project_year, records);
    let bars = visibility::filter_visible(phases, &window, scale, config.clip_mode);

    let step = Duration::try_days(config.navigation_step_days);
    Ok(GanttView {
        scale,
        focus_date,
        prev_date: step
            .and_then(|step| focus_date.checked_sub_signed(step))
            .unwrap_or(focus_date),
        next_date: step
            .and_then(|step| focus_date.checked_add_signed(step))
            .unwrap_or(focus_date),
        project_year,
        window,
        bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GridPosition;
    use crate::visibility::ClipMode;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(week_number: i32, planned: &str, actual: Option<&str>) -> WeeklyProgressRecord {
        WeeklyProgressRecord {
            week_number,
            year: None,
            planned_progress: 25,
            actual_progress: 0,
            planned_description: planned.to_string(),
            actual_description: actual.map(str::to_string),
            actual_hours: 0.0,
        }
    }

    fn request(scale: &str, focus: &str, year: Option<i32>) -> TimelineRequest {
        TimelineRequest {
            scale: Some(scale.to_string()),
            focus_date: Some(focus.to_string()),
            project_year: year,
        }
    }

    #[test]
    fn malformed_focus_falls_back_to_today() {
        let today = ymd(2026, 10, 19);
        assert_eq!(resolve_focus_date(Some("2025-13-01"), today), today);
        assert_eq!(resolve_focus_date(Some("yesterday"), today), today);
        assert_eq!(resolve_focus_date(None, today), today);
        assert_eq!(resolve_focus_date(Some("2025-01-06"), today), ymd(2025, 1, 6));
    }

    #[test]
    fn unsupported_scale_is_surfaced() {
        let result = build_view(
            &request("fortnight", "2025-01-06", Some(2025)),
            &[],
            &TimelineConfig::default(),
            ymd(2026, 10, 19),
        );
        assert_eq!(
            result,
            Err(TimelineError::UnsupportedScale("fortnight".to_string()))
        );
    }

    #[test]
    fn builds_week_view_with_navigation() {
        let records = vec![
            record(1, "Design", None),
            record(2, "Design", Some("wireframes")),
            record(3, "Design", None),
            record(4, "Build", None),
        ];
        let view = build_view(
            &request("week", "2025-01-06", Some(2025)),
            &records,
            &TimelineConfig::default(),
            ymd(2026, 10, 19),
        )
        .unwrap();

        assert_eq!(view.scale, Scale::Week);
        assert_eq!(view.window.start_date, ymd(2025, 1, 6));
        assert_eq!(view.prev_date, ymd(2024, 12, 7));
        assert_eq!(view.next_date, ymd(2025, 2, 5));
        assert_eq!(view.bars.len(), 2);
        assert_eq!(view.bars[0].placement, Some(GridPosition { start: 0, span: 3 }));
        assert_eq!(view.bars[0].actuals.len(), 1);
        assert_eq!(view.bars[1].placement, Some(GridPosition { start: 3, span: 1 }));
    }

    #[test]
    fn missing_year_uses_focus_year() {
        let records = vec![record(2, "Design", None)];
        let view = build_view(
            &request("week", "2025-01-06", None),
            &records,
            &TimelineConfig::default(),
            ymd(2026, 10, 19),
        )
        .unwrap();
        assert_eq!(view.project_year, 2025);
        assert_eq!(view.bars[0].start, ymd(2025, 1, 6));
    }

    #[test]
    fn config_supplies_scale_and_clipping() {
        let config = TimelineConfig {
            clip_mode: ClipMode::Clamp,
            default_scale: Scale::Month,
            ..TimelineConfig::default()
        };
        let records: Vec<_> = (1..=10).map(|n| record(n, "Build", None)).collect();
        let req = TimelineRequest {
            scale: None,
            focus_date: Some("2025-02-14".to_string()),
            project_year: Some(2025),
        };
        let view = build_view(&req, &records, &config, ymd(2026, 10, 19)).unwrap();
        assert_eq!(view.scale, Scale::Month);
        // Weeks 1..=10 run 2024-12-30..2025-03-09: columns -1..=2 before clamping.
        assert_eq!(view.bars[0].placement, Some(GridPosition { start: 1, span: 2 }));
    }

    #[test]
    fn view_serializes_grid_fields() {
        let records = vec![record(2, "Design", Some("kickoff"))];
        let view = build_view(
            &request("quarter", "2025-01-06", Some(2025)),
            &records,
            &TimelineConfig::default(),
            ymd(2026, 10, 19),
        )
        .unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["scale"], "quarter");
        assert_eq!(json["window"]["total_units"], 8);
        assert_eq!(json["window"]["headers"][0]["label"], "2025 Q1");
        assert_eq!(json["bars"][0]["grid_start"], 1);
        assert_eq!(json["bars"][0]["grid_span"], 1);
        assert_eq!(json["bars"][0]["actuals"][0]["grid_start"], 1);
        assert_eq!(json["bars"][0]["actuals"][0]["has_content"], true);
    }
}
