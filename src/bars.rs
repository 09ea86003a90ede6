use log::warn;

use crate::calendar;
use crate::models::{BarMember, PhaseBar, WeeklyProgressRecord};

/// Largest gap, in days, between the end of a bar and the start of the next
/// week that still counts as a continuation.
pub const MAX_CONTINUATION_GAP_DAYS: i64 = 7;

/// Group ordered weekly records into phase bars.
///
/// Consecutive records extend the open bar when their planned description is
/// exactly equal to the bar name and they start no more than a week after the
/// bar ends. Records whose week cannot be placed on the calendar are skipped.
pub fn aggregate(project_year: i32, records: &[WeeklyProgressRecord]) -> Vec<PhaseBar> {
    let (mut closed, open) = records
        .iter()
        .fold((Vec::<PhaseBar>::new(), None::<PhaseBar>), |(closed, open), record| {
            match BarMember::locate(record, project_year) {
                Some(member) => advance(closed, open, member),
                None => {
                    warn!(
                        "skipping week {} (year {:?}): outside the calendar range",
                        record.week_number, record.year
                    );
                    (closed, open)
                }
            }
        });
    closed.extend(open);
    closed
}

fn advance(
    mut closed: Vec<PhaseBar>,
    open: Option<PhaseBar>,
    member: BarMember,
) -> (Vec<PhaseBar>, Option<PhaseBar>) {
    match open {
        Some(bar) if bar.continues_with(&member) => (closed, Some(bar.extended(member))),
        Some(bar) => {
            closed.push(bar);
            (closed, Some(PhaseBar::seeded(member)))
        }
        None => (closed, Some(PhaseBar::seeded(member))),
    }
}

impl BarMember {
    /// Place a record on the calendar. The record's own year anchors week 1
    /// when present, otherwise the project year does.
    pub fn locate(record: &WeeklyProgressRecord, project_year: i32) -> Option<Self> {
        let anchor_year = record.year.unwrap_or(project_year);
        let (week_start, week_end) = calendar::week_bounds(anchor_year, record.week_number)?;
        Some(Self {
            week_start,
            week_end,
            record: record.clone(),
        })
    }
}

impl PhaseBar {
    fn seeded(member: BarMember) -> Self {
        Self {
            name: member.record.planned_description.clone(),
            start: member.week_start,
            end: member.week_end,
            members: vec![member],
            placement: None,
            actuals: Vec::new(),
        }
    }

    fn continues_with(&self, member: &BarMember) -> bool {
        self.name == member.record.planned_description
            && (member.week_start - self.end).num_days() <= MAX_CONTINUATION_GAP_DAYS
    }

    fn extended(self, member: BarMember) -> Self {
        let end = self.end.max(member.week_end);
        let mut members = self.members;
        members.push(member);
        Self {
            end,
            members,
            ..self
        }
    }
}
