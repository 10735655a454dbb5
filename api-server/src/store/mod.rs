
use std::{
    fs,
    path::Path,
    sync::{Mutex, MutexGuard},
};

use rusqlite::{params, Connection, Row};

use crate::types::{NewScore, ScoreRow};

/// SQLite-backed leaderboard.
///
/// Row validity is enforced by the table's CHECK constraints, independently
/// of the anti-cheat validator. A violating insert surfaces as an error.
pub struct ScoreStore {
    conn: Mutex<Connection>,
}

const SCORES_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS scores (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        name      TEXT    NOT NULL CHECK(length(name) BETWEEN 1 AND 6),
        score     INTEGER NOT NULL CHECK(score >= 0),
        wave      INTEGER NOT NULL CHECK(wave >= 1),
        duration  REAL    NOT NULL CHECK(duration > 0),
        created   TEXT    NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_scores_score ON scores(score DESC);";

const SELECT_COLUMNS: &str = "SELECT id, name, score, wave, duration, created FROM scores";

impl ScoreStore {
    /// Open (or create) `scores.db` under `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self, String> {
        fs::create_dir_all(data_dir)
            .map_err(|e| format!("failed to create data dir {}: {e}", data_dir.display()))?;

        let db_path = data_dir.join("scores.db");
        let conn = Connection::open(&db_path)
            .map_err(|e| format!("failed to open SQLite at {}: {e}", db_path.display()))?;

        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA busy_timeout=5000;
             PRAGMA synchronous=NORMAL;
             PRAGMA foreign_keys=ON;",
        )
        .map_err(|e| format!("failed to set pragmas: {e}"))?;

        conn.execute_batch(SCORES_SCHEMA)
            .map_err(|e| format!("failed to create scores table: {e}"))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, String> {
        self.conn
            .lock()
            .map_err(|_| "score store mutex poisoned".to_string())
    }

    /// Inserts one score and returns the stored row.
    pub(crate) fn insert(&self, entry: &NewScore) -> Result<ScoreRow, String> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO scores (name, score, wave, duration) VALUES (?1, ?2, ?3, ?4)",
            params![entry.name, entry.score, entry.wave, entry.duration],
        )
        .map_err(|e| format!("insert score failed: {e}"))?;

        let id = conn.last_insert_rowid();
        conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id],
            row_to_score,
        )
        .map_err(|e| format!("read back score {id} failed: {e}"))
    }

    /// Highest scores first; ties go to the earlier entry.
    pub(crate) fn top(&self, limit: usize) -> Result<Vec<ScoreRow>, String> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "{SELECT_COLUMNS} ORDER BY score DESC, created ASC, id ASC LIMIT ?1"
            ))
            .map_err(|e| format!("prepare leaderboard query failed: {e}"))?;

        let rows = stmt
            .query_map(params![limit as i64], row_to_score)
            .map_err(|e| format!("leaderboard query failed: {e}"))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("leaderboard row decode failed: {e}"))
    }

    pub(crate) fn count(&self) -> Result<usize, String> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM scores", [], |row| row.get::<_, i64>(0))
            .map(|count| count as usize)
            .map_err(|e| format!("count scores failed: {e}"))
    }
}

fn row_to_score(row: &Row<'_>) -> rusqlite::Result<ScoreRow> {
    Ok(ScoreRow {
        id: row.get(0)?,
        name: row.get(1)?,
        score: row.get(2)?,
        wave: row.get(3)?,
        duration: row.get(4)?,
        created: row.get(5)?,
    })
}
