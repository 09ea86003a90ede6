use log::debug;
use serde::{Deserialize, Serialize};

use crate::grid;
use crate::models::{ActualSegment, BarMember, GridPosition, PhaseBar, TimelineWindow};
use crate::scale::Scale;

/// How partially visible bars and segments are placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipMode {
    /// Keep raw coordinates; the renderer hides whatever overflows.
    #[default]
    Unclamped,
    /// Trim placements to columns 1..=total_units, shrinking the span.
    Clamp,
}

impl ClipMode {
    pub fn apply(self, placement: GridPosition, total_units: usize) -> GridPosition {
        match self {
            ClipMode::Unclamped => placement,
            ClipMode::Clamp => {
                let start = placement.start.max(1);
                let end = placement.end().min(total_units as i64);
                GridPosition::between(start, end)
            }
        }
    }
}

/// Place every bar on the window and keep the ones that overlap it.
///
/// Each kept bar carries the reported weeks that fall inside the window.
pub fn filter_visible(
    bars: Vec<PhaseBar>,
    window: &TimelineWindow,
    scale: Scale,
    clip: ClipMode,
) -> Vec<PhaseBar> {
    let total = bars.len();
    let visible: Vec<PhaseBar> = bars
        .into_iter()
        .filter_map(|bar| place_bar(bar, window, scale, clip))
        .collect();
    debug!(
        "{} of {total} phase bars visible in {scale} window {}..{}",
        visible.len(),
        window.start_date,
        window.end_date
    );
    visible
}

fn place_bar(
    bar: PhaseBar,
    window: &TimelineWindow,
    scale: Scale,
    clip: ClipMode,
) -> Option<PhaseBar> {
    let placement = grid::position(Some(bar.start), Some(bar.end), window, scale)?;
    if !placement.overlaps(window.total_units) {
        return None;
    }

    let actuals = bar
        .members
        .iter()
        .filter_map(|member| place_segment(member, window, scale, clip))
        .filter(|segment| segment.has_content)
        .collect();

    Some(PhaseBar {
        placement: Some(clip.apply(placement, window.total_units)),
        actuals,
        ..bar
    })
}

fn place_segment(
    member: &BarMember,
    window: &TimelineWindow,
    scale: Scale,
    clip: ClipMode,
) -> Option<ActualSegment> {
    let placement = grid::position(Some(member.week_start), Some(member.week_end), window, scale)?;
    if !placement.overlaps(window.total_units) {
        return None;
    }

    let record = &member.record;
    Some(ActualSegment {
        placement: clip.apply(placement, window.total_units),
        progress: record.actual_progress,
        description: record.actual_description.clone(),
        week_number: record.week_number,
        year: record.year,
        actual_hours: record.actual_hours,
        planned_progress: record.planned_progress,
        planned_description: record.planned_description.clone(),
        has_content: record.has_content(),
    })
}
