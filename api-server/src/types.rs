use serde::Serialize;

/// One leaderboard entry as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ScoreRow {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) score: i64,
    pub(crate) wave: i64,
    pub(crate) duration: f64,
    /// SQLite `datetime('now')`, UTC.
    pub(crate) created: String,
}

/// Values for a new row; `id` and `created` come from the database.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewScore {
    pub(crate) name: String,
    pub(crate) score: i64,
    pub(crate) wave: i64,
    pub(crate) duration: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitResponse {
    pub(crate) inserted: ScoreRow,
    pub(crate) scores: Vec<ScoreRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) service: &'static str,
    pub(crate) stored_scores: usize,
    pub(crate) used_sessions: usize,
    pub(crate) max_used_sessions: usize,
}
