use std::path::Path;

use anyhow::Context;
use log::info;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::models::{ProjectRecord, WeeklyProgressRecord};
use crate::plan;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<Uuid> {
    let project_id = Uuid::parse_str("6b1f3c52-8d0e-4f6a-9a43-2f5c1e7d9b10")?;
    let (name, year, duration_weeks) = ("Vendor portal", 2025, 12u32);

    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO devmanage.projects (id, name, year, duration_weeks)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE
        SET name = EXCLUDED.name, year = EXCLUDED.year, duration_weeks = EXCLUDED.duration_weeks
        "#,
    )
    .bind(project_id)
    .bind(name)
    .bind(year)
    .bind(duration_weeks as i32)
    .execute(&mut *tx)
    .await?;

    let reported = [
        (1, 8, "Kickoff with procurement, scope signed off", 12.0),
        (2, 8, "Architecture review done", 10.5),
        (3, 6, "Wireframes for supplier onboarding", 9.0),
    ];

    for mut week in plan::default_plan(name, Some(year), duration_weeks) {
        if let Some((_, progress, note, hours)) =
            reported.iter().find(|(number, ..)| *number == week.week_number)
        {
            week.actual_progress = *progress;
            week.actual_description = Some(note.to_string());
            week.actual_hours = *hours;
        }
        upsert_week(&mut tx, project_id, &week).await?;
    }
    tx.commit().await?;

    Ok(project_id)
}

/// Insert a project together with its default weekly plan.
pub async fn create_project(
    pool: &PgPool,
    name: &str,
    year: Option<i32>,
    duration_weeks: u32,
) -> anyhow::Result<Uuid> {
    let project_id = Uuid::new_v4();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO devmanage.projects (id, name, year, duration_weeks)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(project_id)
    .bind(name)
    .bind(year)
    .bind(duration_weeks as i32)
    .execute(&mut *tx)
    .await?;

    let weeks = plan::default_plan(name, year, duration_weeks);
    for week in &weeks {
        upsert_week(&mut tx, project_id, week).await?;
    }
    tx.commit().await?;

    info!("created project {project_id} with {} planned weeks", weeks.len());
    Ok(project_id)
}

pub async fn fetch_project(
    pool: &PgPool,
    project_id: Uuid,
) -> anyhow::Result<Option<ProjectRecord>> {
    let row = sqlx::query("SELECT id, name, year FROM devmanage.projects WHERE id = $1")
        .bind(project_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| ProjectRecord {
        id: row.get("id"),
        name: row.get("name"),
        year: row.get("year"),
    }))
}

/// Weekly records of one project in calendar order. Weeks without a year
/// count from the project year.
pub async fn fetch_weekly_progress(
    pool: &PgPool,
    project_id: Uuid,
) -> anyhow::Result<Vec<WeeklyProgressRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT wp.week_number, wp.year, wp.planned_progress, wp.actual_progress,
               wp.planned_description, wp.actual_description, wp.actual_hours
        FROM devmanage.weekly_progress wp
        JOIN devmanage.projects p ON p.id = wp.project_id
        WHERE wp.project_id = $1
        ORDER BY COALESCE(wp.year, p.year), wp.week_number
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        records.push(WeeklyProgressRecord {
            week_number: row.get("week_number"),
            year: row.get("year"),
            planned_progress: row.get("planned_progress"),
            actual_progress: row.get("actual_progress"),
            planned_description: row.get("planned_description"),
            actual_description: row.get("actual_description"),
            actual_hours: row.get("actual_hours"),
        });
    }

    Ok(records)
}

/// Read weekly records from a CSV file with a header row matching the
/// record field names. Rows are returned in calendar order, with rows
/// lacking a year counted from `project_year`.
pub fn read_weekly_csv(
    csv_path: &Path,
    project_year: Option<i32>,
) -> anyhow::Result<Vec<WeeklyProgressRecord>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;

    let mut records = Vec::new();
    for (line, result) in reader.deserialize::<WeeklyProgressRecord>().enumerate() {
        let record = result
            .with_context(|| format!("invalid row {} in {}", line + 1, csv_path.display()))?;
        records.push(record);
    }
    records.sort_by_key(|record| record.calendar_key(project_year));

    Ok(records)
}

/// Upsert weekly records from a CSV file into an existing project. Rows
/// without a year take the project's year.
pub async fn import_csv(
    pool: &PgPool,
    project_id: Uuid,
    csv_path: &Path,
) -> anyhow::Result<usize> {
    let project = fetch_project(pool, project_id)
        .await?
        .with_context(|| format!("project {project_id} not found"))?;
    let records = read_weekly_csv(csv_path, project.year)?;

    let mut tx = pool.begin().await?;
    let mut written = 0usize;
    for mut record in records {
        record.year = record.year.or(project.year);
        written += upsert_week(&mut tx, project.id, &record).await? as usize;
    }
    tx.commit().await?;

    Ok(written)
}

async fn upsert_week(
    conn: &mut PgConnection,
    project_id: Uuid,
    week: &WeeklyProgressRecord,
) -> anyhow::Result<u64> {
    let result = sqlx::query(
        r#"
        INSERT INTO devmanage.weekly_progress
        (id, project_id, week_number, year, planned_progress, actual_progress,
         planned_description, actual_description, actual_hours)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (project_id, year, week_number) DO UPDATE
        SET planned_progress = EXCLUDED.planned_progress,
            actual_progress = EXCLUDED.actual_progress,
            planned_description = EXCLUDED.planned_description,
            actual_description = EXCLUDED.actual_description,
            actual_hours = EXCLUDED.actual_hours
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(project_id)
    .bind(week.week_number)
    .bind(week.year)
    .bind(week.planned_progress)
    .bind(week.actual_progress)
    .bind(&week.planned_description)
    .bind(&week.actual_description)
    .bind(week.actual_hours)
    .execute(conn)
    .await
    .with_context(|| format!("failed to store week {}", week.week_number))?;

    Ok(result.rows_affected())
}
