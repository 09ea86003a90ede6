use crate::models::WeeklyProgressRecord;

pub const REQUIREMENTS: &str = "Requirements & architecture";
pub const DESIGN: &str = "UI/UX design & data modelling";
pub const DEVELOPMENT: &str = "Core feature development";
pub const OPTIMISATION: &str = "System optimisation & tuning";
pub const ACCEPTANCE: &str = "UAT & bug fixing";

/// Weeks reserved for acceptance testing at the end of every plan.
const ACCEPTANCE_WEEKS: u32 = 3;

/// Build the starting weekly plan for a new project.
///
/// Planned progress is split evenly with the remainder on the final week so
/// the plan sums to 100.
pub fn default_plan(
    project_name: &str,
    year: Option<i32>,
    duration_weeks: u32,
) -> Vec<WeeklyProgressRecord> {
    if duration_weeks == 0 {
        return Vec::new();
    }

    let base = 100 / duration_weeks;
    let remainder = 100 % duration_weeks;
    let follow_up = is_follow_up_phase(project_name);

    (1..=duration_weeks)
        .map(|week| {
            let planned = if week == duration_weeks { base + remainder } else { base };
            WeeklyProgressRecord {
                week_number: week as i32,
                year,
                planned_progress: planned as i32,
                actual_progress: 0,
                planned_description: stage_for(week, duration_weeks, follow_up).to_string(),
                actual_description: None,
                actual_hours: 0.0,
            }
        })
        .collect()
}

/// Later phases of an existing system ("Phase 2", "phase3") skip straight to
/// optimisation work.
pub fn is_follow_up_phase(project_name: &str) -> bool {
    let compact: String = project_name
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    compact.contains("phase") && !compact.contains("phase1")
}

fn stage_for(week: u32, duration_weeks: u32, follow_up: bool) -> &'static str {
    let remaining = duration_weeks - week;
    match (remaining < ACCEPTANCE_WEEKS, follow_up) {
        (true, _) => ACCEPTANCE,
        (false, true) => OPTIMISATION,
        (false, false) if week <= 2 => REQUIREMENTS,
        (false, false) if week <= 4 => DESIGN,
        (false, false) => DEVELOPMENT,
    }
}
