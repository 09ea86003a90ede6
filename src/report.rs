use std::fmt::Write;

use crate::models::{GanttView, GridPosition, PhaseBar};

const NAME_WIDTH: usize = 28;

/// Render a timeline view as a markdown document with a text chart.
///
/// Planned columns are drawn with `=`, weeks with reported work with `#`.
pub fn build_report(project_name: Option<&str>, view: &GanttView) -> String {
    let mut output = String::new();
    let window = &view.window;

    let _ = writeln!(output, "# Timeline: {}", project_name.unwrap_or("unnamed project"));
    let _ = writeln!(
        output,
        "{} view around {} ({} to {}, {} columns)",
        view.scale, view.focus_date, window.start_date, window.end_date, window.total_units
    );
    let _ = writeln!(output, "Previous: {} | Next: {}", view.prev_date, view.next_date);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Chart");

    if view.bars.is_empty() {
        let _ = writeln!(output, "No phases fall inside this window.");
    } else {
        let cell = window
            .headers
            .iter()
            .map(|header| header.label.chars().count())
            .max()
            .unwrap_or(1)
            + 1;

        let _ = writeln!(output, "```text");
        let mut header_row = format!("{:NAME_WIDTH$} ", "");
        for header in &window.headers {
            let _ = write!(header_row, "{:<cell$}", header.label);
        }
        let _ = writeln!(output, "{}", header_row.trim_end());
        for bar in &view.bars {
            let _ = writeln!(output, "{}", chart_row(bar, window.total_units, cell));
        }
        let _ = writeln!(output, "```");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Phases");
    if view.bars.is_empty() {
        let _ = writeln!(output, "No phases fall inside this window.");
    } else {
        for bar in &view.bars {
            let weeks: Vec<String> = bar
                .members
                .iter()
                .map(|member| member.record.week_number.to_string())
                .collect();
            let _ = writeln!(
                output,
                "- {} ({} to {}, weeks {})",
                display_name(&bar.name),
                bar.start,
                bar.end,
                weeks.join(", ")
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Reported Work");
    let mut reported = view.bars.iter().flat_map(|bar| bar.actuals.iter()).peekable();
    if reported.peek().is_none() {
        let _ = writeln!(output, "No work reported inside this window.");
    } else {
        for segment in reported {
            let year = segment.year.map(|y| format!(" {y}")).unwrap_or_default();
            let _ = writeln!(
                output,
                "- Week {}{}: {}% ({:.1}h) {}",
                segment.week_number,
                year,
                segment.progress,
                segment.actual_hours,
                segment.description.as_deref().unwrap_or("")
            );
        }
    }

    output
}

fn chart_row(bar: &PhaseBar, total_units: usize, cell: usize) -> String {
    let name: String = display_name(&bar.name).chars().take(NAME_WIDTH).collect();
    let mut row = format!("{name:NAME_WIDTH$} ");

    for column in 1..=total_units as i64 {
        let mark = if bar.actuals.iter().any(|s| covers(&s.placement, column)) {
            '#'
        } else if bar.placement.is_some_and(|p| covers(&p, column)) {
            '='
        } else {
            ' '
        };
        row.extend(std::iter::repeat(mark).take(cell - 1));
        row.push(' ');
    }

    row.trim_end().to_string()
}

fn covers(placement: &GridPosition, column: i64) -> bool {
    placement.start <= column && column <= placement.end()
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(unnamed phase)"
    } else {
        name
    }
}
