use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use wod_import::model::{ParsedWorkout, Weekday};
use wod_import::settings::Settings;
use wod_import::{db, parse_workouts, source, ParseOptions};

#[derive(Parser)]
#[command(name = "wod_import", about = "Turn weekly workout schedules into structured daily workouts")]
struct Cli {
    /// Year for dates written without one (overrides WOD_DEFAULT_YEAR)
    #[arg(long, global = true)]
    year: Option<i32>,
    /// SQLite file (overrides WOD_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse schedules (PDF or extracted .txt) and print the workouts as JSON
    Parse {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print a readable outline instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Parse schedules and store every workout
    Import {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List stored workouts
    List,
    /// Print one stored workout as JSON
    Show {
        #[arg(long, conflicts_with = "day", required_unless_present = "day")]
        id: Option<i64>,
        /// Weekday label, e.g. "Terça-feira" or "terca"
        #[arg(long)]
        day: Option<Weekday>,
    },
    /// Replace a stored workout with a reviewed JSON record
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        file: PathBuf,
    },
    /// Soft-delete a stored workout
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load()?;
    if let Some(year) = cli.year {
        settings.default_year = year;
    }
    if let Some(db_path) = cli.db {
        settings.db_path = db_path;
    }
    let opts = settings.parse_options(chrono::Local::now().date_naive());

    let result = match cli.command {
        Commands::Parse { files, summary } => {
            let mut all = Vec::new();
            for file in &files {
                all.extend(parse_file(file, &settings, &opts).await?);
            }
            if summary {
                for w in &all {
                    print_summary(w);
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&all)?);
            }
            Ok(())
        }
        Commands::Import { files } => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;

            let pb = if files.len() > 1 {
                let pb = ProgressBar::new(files.len() as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                        .progress_chars("#>-"),
                );
                Some(pb)
            } else {
                None
            };

            let mut stored = 0usize;
            let mut review = 0usize;
            for file in &files {
                if let Some(pb) = &pb {
                    pb.set_message(file.display().to_string());
                }
                let workouts = parse_file(file, &settings, &opts).await?;
                review += workouts.iter().filter(|w| w.needs_review()).count();
                let ids = db::insert_workouts(&conn, &workouts)?;
                stored += ids.len();
                info!(file = %file.display(), ids = ?ids, "stored workouts");
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
            }
            if let Some(pb) = pb {
                pb.finish_and_clear();
            }
            println!(
                "Stored {} workouts from {} file(s) ({} with defaulted sections).",
                stored,
                files.len(),
                review
            );
            Ok(())
        }
        Commands::List => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let rows = db::fetch_all(&conn)?;
            if rows.is_empty() {
                println!("No workouts stored. Run 'import' first.");
                return Ok(());
            }

            println!(
                "{:>4} | {:<10} | {:<13} | {:<16} | {:>5} | {:<6}",
                "ID", "Date", "Day", "Focus", "Min", "Review"
            );
            println!("{}", "-".repeat(70));
            for r in &rows {
                let w = &r.workout;
                println!(
                    "{:>4} | {:<10} | {:<13} | {:<16} | {:>5} | {:<6}",
                    r.id,
                    w.date,
                    w.day_of_week.label(),
                    truncate(&w.focus_technique, 16),
                    w.total_minutes(),
                    if w.needs_review() { "yes" } else { "" }
                );
            }
            println!("\n{} workouts", rows.len());
            Ok(())
        }
        Commands::Show { id, day } => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let found = match (id, day) {
                (Some(id), _) => db::fetch_by_id(&conn, id)?,
                (None, Some(day)) => db::fetch_latest_for_day(&conn, day)?,
                (None, None) => bail!("pass --id or --day"),
            };
            match found {
                Some(w) => println!("{}", serde_json::to_string_pretty(&w)?),
                None => println!("No workout found."),
            }
            Ok(())
        }
        Commands::Update { id, file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let workout: ParsedWorkout = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a workout record", file.display()))?;
            workout.validate()?;

            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            if db::update_workout(&conn, id, &workout)? {
                println!("Updated workout {}.", id);
            } else {
                println!("No workout with id {}.", id);
            }
            Ok(())
        }
        Commands::Delete { id } => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            if db::delete_workout(&conn, id)? {
                println!("Deleted workout {}.", id);
            } else {
                println!("No workout with id {}.", id);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn parse_file(
    path: &Path,
    settings: &Settings,
    opts: &ParseOptions,
) -> anyhow::Result<Vec<ParsedWorkout>> {
    let text = source::load_text(path, settings.extract_timeout()).await?;
    let workouts = parse_workouts(&text, opts);
    let defaulted = workouts.iter().filter(|w| w.needs_review()).count();
    if defaulted > 0 {
        warn!(file = %path.display(), defaulted, "some days have sections that were not found");
    }
    Ok(workouts)
}

fn print_summary(w: &ParsedWorkout) {
    println!("{} {} | {} | {}'", w.day_of_week, w.date, w.focus_technique, w.total_minutes());
    for s in &w.sections {
        println!("  {} ({}') [{}]", s.title, s.duration_minutes, s.origin.as_str());
        for line in &s.content {
            println!("    - {}", line);
        }
    }
    println!();
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
