use actix_web::{
    http::StatusCode,
    web::{Bytes, Data},
    HttpResponse, Responder,
};
use pew_core::ScoreSubmission;

use crate::response::{json_error_with_code, store_unavailable, submission_rejected};
use crate::types::{HealthResponse, NewScore, SubmitResponse};
use crate::AppState;

pub(crate) async fn health(state: Data<AppState>) -> impl Responder {
    let stored_scores = match state.scores.count() {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("health check failed: {e}");
            return store_unavailable();
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        service: "pew-pew-api",
        stored_scores,
        used_sessions: state.validator.used_sessions(),
        max_used_sessions: state.validator.max_used_sessions(),
    })
}

pub(crate) async fn issue_token(state: Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.validator.issue_session())
}

pub(crate) async fn leaderboard(state: Data<AppState>) -> impl Responder {
    match state.scores.top(state.leaderboard_limit) {
        Ok(scores) => HttpResponse::Ok().json(scores),
        Err(e) => {
            tracing::error!("leaderboard read failed: {e}");
            store_unavailable()
        }
    }
}

/// Parses the raw body itself so malformed JSON gets the same error shape as
/// every other failure.
pub(crate) async fn submit_score(state: Data<AppState>, body: Bytes) -> impl Responder {
    let submission: ScoreSubmission = match serde_json::from_slice(&body) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::debug!("rejecting malformed score body: {e}");
            return json_error_with_code(
                StatusCode::BAD_REQUEST,
                "invalid JSON",
                Some("invalid_json"),
            );
        }
    };

    let accepted = match state.validator.validate(&submission) {
        Ok(accepted) => accepted,
        Err(err) if err.is_auth_failure() => {
            tracing::warn!(
                reason = %err,
                session_id = %submission.session_id,
                "score submission rejected"
            );
            return submission_rejected(err);
        }
        Err(err) => {
            tracing::info!(
                reason = %err,
                session_id = %submission.session_id,
                score = submission.score,
                wave = submission.wave,
                "score submission rejected"
            );
            return submission_rejected(err);
        }
    };

    let inserted = match state.scores.insert(&NewScore {
        name: accepted.name,
        score: accepted.score,
        wave: accepted.wave,
        duration: accepted.duration,
    }) {
        Ok(row) => row,
        Err(e) => {
            tracing::error!(session_id = %submission.session_id, "score insert failed: {e}");
            return json_error_with_code(
                StatusCode::BAD_REQUEST,
                "failed to save score",
                Some("insert_failed"),
            );
        }
    };

    tracing::info!(
        id = inserted.id,
        name = %inserted.name,
        score = inserted.score,
        wave = inserted.wave,
        "score accepted"
    );

    match state.scores.top(state.leaderboard_limit) {
        Ok(scores) => HttpResponse::Created().json(SubmitResponse { inserted, scores }),
        Err(e) => {
            tracing::error!("leaderboard read after insert failed: {e}");
            store_unavailable()
        }
    }
}
