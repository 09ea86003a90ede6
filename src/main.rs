use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{ArgGroup, Parser, Subcommand};
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

mod bars;
mod calendar;
mod config;
mod db;
mod error;
mod grid;
mod models;
mod plan;
mod report;
mod scale;
mod timeline;
mod visibility;
mod window;

use config::TimelineConfig;
use timeline::TimelineRequest;

#[derive(Parser)]
#[command(name = "devmanage-timeline")]
#[command(about = "Project timeline and Gantt layout for weekly progress plans", long_about = None)]
struct Cli {
    /// TOML file with timeline settings
    #[arg(long, global = true, env = "TIMELINE_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load a demo project with a default plan and some reported weeks
    Seed,
    /// Create a project and its default weekly plan
    CreateProject {
        #[arg(long)]
        name: String,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        duration_weeks: Option<u32>,
    },
    /// Import weekly progress for a project from a CSV file
    Import {
        #[arg(long)]
        project_id: Uuid,
        #[arg(long)]
        csv: PathBuf,
    },
    /// Lay out a project's timeline
    #[command(group(
        ArgGroup::new("source")
            .args(["project_id", "csv"])
            .required(true)
            .multiple(false)
    ))]
    Timeline {
        #[arg(long)]
        project_id: Option<Uuid>,
        /// Read weekly records from a CSV file instead of the database
        #[arg(long)]
        csv: Option<PathBuf>,
        /// week, month or quarter
        #[arg(long)]
        scale: Option<String>,
        /// Focus date as YYYY-MM-DD; defaults to today
        #[arg(long)]
        focus: Option<String>,
        /// Year that week numbers count from
        #[arg(long)]
        year: Option<i32>,
        /// Emit the layout as JSON instead of markdown
        #[arg(long)]
        json: bool,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = TimelineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::InitDb => {
            let pool = connect().await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect().await?;
            let project_id = db::seed(&pool).await?;
            println!("Seed project {project_id} ready.");
        }
        Commands::CreateProject {
            name,
            year,
            duration_weeks,
        } => {
            let pool = connect().await?;
            let weeks = duration_weeks.unwrap_or(config.default_duration_weeks);
            let project_id = db::create_project(&pool, &name, year, weeks).await?;
            println!("Created project {project_id} ({weeks} weeks).");
        }
        Commands::Import { project_id, csv } => {
            let pool = connect().await?;
            let written = db::import_csv(&pool, project_id, &csv).await?;
            println!("Stored {written} weeks from {}.", csv.display());
        }
        Commands::Timeline {
            project_id,
            csv,
            scale,
            focus,
            year,
            json,
            out,
        } => {
            let (project_name, project_year, records) = match (project_id, csv) {
                (Some(project_id), _) => {
                    let pool = connect().await?;
                    let project = db::fetch_project(&pool, project_id)
                        .await?
                        .with_context(|| format!("project {project_id} not found"))?;
                    let records = db::fetch_weekly_progress(&pool, project.id).await?;
                    (Some(project.name), year.or(project.year), records)
                }
                (None, Some(csv)) => {
                    let records = db::read_weekly_csv(&csv, year)?;
                    let name = csv.file_stem().map(|stem| stem.to_string_lossy().into_owned());
                    (name, year, records)
                }
                (None, None) => anyhow::bail!("either --project-id or --csv is required"),
            };

            let request = TimelineRequest {
                scale,
                focus_date: focus,
                project_year,
            };
            let view = timeline::build_view(&request, &records, &config, Utc::now().date_naive())?;

            let rendered = if json {
                serde_json::to_string_pretty(&view)?
            } else {
                report::build_report(project_name.as_deref(), &view)
            };

            match out {
                Some(out) => {
                    std::fs::write(&out, rendered)?;
                    println!("Timeline written to {}.", out.display());
                }
                None => println!("{rendered}"),
            }
        }
    }

    Ok(())
}
