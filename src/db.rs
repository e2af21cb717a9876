use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::model::{ParsedWorkout, SlotOrigin, StoredWorkout, Weekday, WorkoutSection};

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS workouts (
            id              INTEGER PRIMARY KEY,
            date            TEXT NOT NULL,
            day_of_week     TEXT NOT NULL,
            focus_technique TEXT NOT NULL,
            deleted         BOOLEAN NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_workouts_day ON workouts(day_of_week, date);

        CREATE TABLE IF NOT EXISTS workout_sections (
            workout_id       INTEGER NOT NULL REFERENCES workouts(id),
            position         INTEGER NOT NULL,
            slot_id          TEXT NOT NULL,
            title            TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL CHECK(duration_minutes >= 1),
            content          TEXT NOT NULL,
            origin           TEXT NOT NULL CHECK(origin IN ('detected','defaulted','reviewed')),
            PRIMARY KEY (workout_id, position)
        );
        ",
    )?;
    Ok(())
}

// ── Writes ──

/// Insert every workout in one transaction; returns the new ids in input order.
pub fn insert_workouts(conn: &Connection, workouts: &[ParsedWorkout]) -> Result<Vec<i64>> {
    let tx = conn.unchecked_transaction()?;
    let mut ids = Vec::with_capacity(workouts.len());
    {
        let mut stmt = tx.prepare(
            "INSERT INTO workouts (date, day_of_week, focus_technique) VALUES (?1, ?2, ?3)",
        )?;
        for w in workouts {
            stmt.execute(params![w.date.to_string(), w.day_of_week.label(), w.focus_technique])?;
            let id = tx.last_insert_rowid();
            insert_sections(&tx, id, &w.sections)?;
            ids.push(id);
        }
    }
    tx.commit()?;
    Ok(ids)
}

fn insert_sections(conn: &Connection, workout_id: i64, sections: &[WorkoutSection]) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO workout_sections
         (workout_id, position, slot_id, title, duration_minutes, content, origin)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for (i, s) in sections.iter().enumerate() {
        stmt.execute(params![
            workout_id,
            i as i64,
            s.id,
            s.title,
            s.duration_minutes,
            s.content.join("\n"),
            s.origin.as_str(),
        ])?;
    }
    Ok(())
}

/// Replace a live workout's fields and sections. Returns false if no such row.
pub fn update_workout(conn: &Connection, id: i64, workout: &ParsedWorkout) -> Result<bool> {
    let tx = conn.unchecked_transaction()?;
    let changed = tx.execute(
        "UPDATE workouts
         SET date = ?1, day_of_week = ?2, focus_technique = ?3, updated_at = datetime('now')
         WHERE id = ?4 AND deleted = 0",
        params![workout.date.to_string(), workout.day_of_week.label(), workout.focus_technique, id],
    )?;
    if changed == 0 {
        return Ok(false);
    }
    tx.execute("DELETE FROM workout_sections WHERE workout_id = ?1", params![id])?;
    insert_sections(&tx, id, &workout.sections)?;
    tx.commit()?;
    Ok(true)
}

/// Soft delete. Returns false if the row is missing or already deleted.
pub fn delete_workout(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE workouts SET deleted = 1, updated_at = datetime('now') WHERE id = ?1 AND deleted = 0",
        params![id],
    )?;
    Ok(changed > 0)
}

// ── Reads ──

struct WorkoutRow {
    id: i64,
    date: String,
    day_of_week: String,
    focus_technique: String,
}

const WORKOUT_COLUMNS: &str = "SELECT id, date, day_of_week, focus_technique FROM workouts";

fn map_workout_row(row: &rusqlite::Row) -> rusqlite::Result<WorkoutRow> {
    Ok(WorkoutRow {
        id: row.get(0)?,
        date: row.get(1)?,
        day_of_week: row.get(2)?,
        focus_technique: row.get(3)?,
    })
}

pub fn fetch_by_id(conn: &Connection, id: i64) -> Result<Option<StoredWorkout>> {
    let row = conn
        .query_row(
            &format!("{} WHERE id = ?1 AND deleted = 0", WORKOUT_COLUMNS),
            params![id],
            map_workout_row,
        )
        .optional()?;
    row.map(|r| hydrate(conn, r)).transpose()
}

/// Most recent live workout for a weekday.
pub fn fetch_latest_for_day(conn: &Connection, day: Weekday) -> Result<Option<StoredWorkout>> {
    let row = conn
        .query_row(
            &format!(
                "{} WHERE day_of_week = ?1 AND deleted = 0 ORDER BY date DESC, id DESC LIMIT 1",
                WORKOUT_COLUMNS
            ),
            params![day.label()],
            map_workout_row,
        )
        .optional()?;
    row.map(|r| hydrate(conn, r)).transpose()
}

pub fn fetch_all(conn: &Connection) -> Result<Vec<StoredWorkout>> {
    let mut stmt = conn.prepare(&format!("{} WHERE deleted = 0 ORDER BY date, id", WORKOUT_COLUMNS))?;
    let rows = stmt
        .query_map([], map_workout_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(|r| hydrate(conn, r)).collect()
}

fn hydrate(conn: &Connection, row: WorkoutRow) -> Result<StoredWorkout> {
    let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
        .with_context(|| format!("workout {} has a malformed date '{}'", row.id, row.date))?;
    let day_of_week = Weekday::from_token(&row.day_of_week)
        .with_context(|| format!("workout {} has an unknown weekday '{}'", row.id, row.day_of_week))?;

    let mut stmt = conn.prepare_cached(
        "SELECT slot_id, title, duration_minutes, content, origin
         FROM workout_sections WHERE workout_id = ?1 ORDER BY position",
    )?;
    let sections = stmt
        .query_map(params![row.id], |r| {
            let content: String = r.get(3)?;
            let origin: String = r.get(4)?;
            Ok(WorkoutSection {
                id: r.get(0)?,
                title: r.get(1)?,
                duration_minutes: r.get(2)?,
                content: content
                    .split('\n')
                    .filter(|l| !l.trim().is_empty())
                    .map(str::to_string)
                    .collect(),
                origin: SlotOrigin::parse(&origin),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StoredWorkout {
        id: row.id,
        workout: ParsedWorkout {
            date,
            day_of_week,
            focus_technique: row.focus_technique,
            sections,
        },
    })
}
