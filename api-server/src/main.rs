mod config;
mod handlers;
mod response;
mod store;
mod types;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};

pub(crate) use config::{AppState, ServerConfig};
use handlers::{health, issue_token, leaderboard, submit_score};
use store::ScoreStore;

fn cors(allowed_origin: Option<&str>) -> Cors {
    let cors = match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(["GET", "POST"])
            .allow_any_header(),
        None => Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header(),
    };
    cors.max_age(3600)
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health))
        .route("/api/token", web::get().to(issue_token))
        .route("/api/scores", web::get().to(leaderboard))
        .route("/api/scores", web::post().to(submit_score));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let scores = ScoreStore::open(&config.data_dir).map_err(std::io::Error::other)?;
    let state = AppState::new(&config, scores).map_err(std::io::Error::other)?;

    tracing::info!(
        "starting pew-pew api: bind_addr={}:{} data_dir={} leaderboard_limit={} \
         max_used_sessions={} max_body_bytes={}",
        config.host,
        config.port,
        config.data_dir.display(),
        config.leaderboard_limit,
        config.max_used_sessions,
        config.max_body_bytes
    );

    let max_body_bytes = config.max_body_bytes;
    let cors_origin = config.cors_allowed_origin.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .wrap(cors(cors_origin.as_deref()))
            .wrap(middleware::Logger::default())
            .configure(routes)
    });
    if let Some(workers) = config.http_workers {
        server = server.workers(workers);
    }

    server.bind(config.bind_addr())?.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test as awtest};
    use pew_core::{Clock, SystemClock};
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn test_config(data_dir: PathBuf) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            data_dir,
            secret: Some("server-test-secret".to_string()),
            max_used_sessions: 100,
            leaderboard_limit: 10,
            max_body_bytes: config::DEFAULT_MAX_BODY_BYTES,
            http_workers: None,
            cors_allowed_origin: None,
        }
    }

    fn test_state() -> (AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path().to_path_buf());
        let scores = ScoreStore::open(&config.data_dir).unwrap();
        (AppState::new(&config, scores).unwrap(), dir)
    }

    /// A correctly signed submission whose game started a minute ago.
    fn played_submission(state: &AppState, name: &str, score: i64, wave: i64) -> Value {
        let session = state
            .validator
            .signer()
            .issue_at(SystemClock.now_ms() - 60_000);
        json!({
            "name": name,
            "score": score,
            "wave": wave,
            "sessionId": session.session_id,
            "startTime": session.start_time,
            "token": session.token,
        })
    }

    macro_rules! app {
        ($state:expr) => {
            awtest::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .configure(routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn token_endpoint_issues_camel_case_session() {
        let (state, _dir) = test_state();
        let app = app!(state);

        let req = awtest::TestRequest::get().uri("/api/token").to_request();
        let resp = awtest::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = awtest::read_body_json(resp).await;
        assert_eq!(body["sessionId"].as_str().unwrap().len(), 32);
        assert_eq!(body["token"].as_str().unwrap().len(), 64);
        assert!(body["startTime"].is_i64());
        assert_eq!(state.validator.used_sessions(), 0);
    }

    #[actix_web::test]
    async fn empty_leaderboard_is_an_empty_array() {
        let (state, _dir) = test_state();
        let app = app!(state);

        let req = awtest::TestRequest::get().uri("/api/scores").to_request();
        let body: Value = awtest::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn malformed_body_is_invalid_json() {
        let (state, _dir) = test_state();
        let app = app!(state);

        let req = awtest::TestRequest::post()
            .uri("/api/scores")
            .set_payload("{not json")
            .to_request();
        let resp = awtest::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = awtest::read_body_json(resp).await;
        assert_eq!(body["success"], Value::Bool(false));
        assert_eq!(body["error"], "invalid JSON");
        assert_eq!(body["error_code"], "invalid_json");
    }

    #[actix_web::test]
    async fn missing_fields_are_invalid_json() {
        let (state, _dir) = test_state();
        let app = app!(state);

        let req = awtest::TestRequest::post()
            .uri("/api/scores")
            .set_json(json!({ "name": "ACE", "score": 10 }))
            .to_request();
        let resp = awtest::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn tampered_token_is_forbidden() {
        let (state, _dir) = test_state();
        let app = app!(state);

        let mut submission = played_submission(&state, "ACE", 100, 3);
        submission["token"] = json!("0".repeat(64));
        let req = awtest::TestRequest::post()
            .uri("/api/scores")
            .set_json(&submission)
            .to_request();
        let resp = awtest::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body: Value = awtest::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid token");
        assert_eq!(body["error_code"], "invalid_token");
    }

    #[actix_web::test]
    async fn accepted_score_is_stored_once() {
        let (state, _dir) = test_state();
        let app = app!(state);

        let submission = played_submission(&state, " ace ", 250, 4);
        let req = awtest::TestRequest::post()
            .uri("/api/scores")
            .set_json(&submission)
            .to_request();
        let resp = awtest::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = awtest::read_body_json(resp).await;
        assert_eq!(body["inserted"]["name"], "ACE");
        assert_eq!(body["inserted"]["score"], 250);
        assert_eq!(body["scores"].as_array().unwrap().len(), 1);
        let duration = body["inserted"]["duration"].as_f64().unwrap();
        assert!(duration >= 60.0);

        let replay = awtest::TestRequest::post()
            .uri("/api/scores")
            .set_json(&submission)
            .to_request();
        let resp = awtest::call_service(&app, replay).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = awtest::read_body_json(resp).await;
        assert_eq!(body["error"], "session already used");
        assert_eq!(state.scores.count().unwrap(), 1);
    }

    #[actix_web::test]
    async fn storage_rejects_names_the_validator_allows() {
        let (state, _dir) = test_state();
        let app = app!(state);

        let submission = played_submission(&state, "SEVENCH", 10, 1);
        let req = awtest::TestRequest::post()
            .uri("/api/scores")
            .set_json(&submission)
            .to_request();
        let resp = awtest::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = awtest::read_body_json(resp).await;
        assert_eq!(body["error_code"], "insert_failed");
        assert_eq!(state.scores.count().unwrap(), 0);
    }

    #[actix_web::test]
    async fn health_reports_counts() {
        let (state, _dir) = test_state();
        let app = app!(state);

        let submission = played_submission(&state, "ACE", 10, 1);
        let req = awtest::TestRequest::post()
            .uri("/api/scores")
            .set_json(&submission)
            .to_request();
        assert_eq!(awtest::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = awtest::TestRequest::get().uri("/api/health").to_request();
        let body: Value = awtest::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["stored_scores"], 1);
        assert_eq!(body["used_sessions"], 1);
        assert_eq!(body["max_used_sessions"], 100);
    }

    #[test]
    fn missing_secret_falls_back_to_dev_signer() {
        let mut config = test_config(PathBuf::from("unused"));
        config.secret = None;
        let signer = config.signer().unwrap();
        let dev = pew_core::SessionSigner::new(config::DEV_ANTICHEAT_SECRET).unwrap();
        let session = signer.issue_at(1_000);
        assert!(dev.verify(&session.session_id, 1_000, &session.token));
    }

    #[test]
    fn env_helpers_fall_back_on_bad_values() {
        std::env::set_var("PEW_TEST_LIMIT_ZERO", "0");
        std::env::set_var("PEW_TEST_LIMIT_JUNK", "ten");
        std::env::set_var("PEW_TEST_LIMIT_OK", "25");
        assert_eq!(config::read_env_usize("PEW_TEST_LIMIT_ZERO", 10), 10);
        assert_eq!(config::read_env_usize("PEW_TEST_LIMIT_JUNK", 10), 10);
        assert_eq!(config::read_env_usize("PEW_TEST_LIMIT_OK", 10), 25);
        assert_eq!(config::read_env_optional_usize("PEW_TEST_LIMIT_ZERO"), None);

        std::env::set_var("PEW_TEST_BLANK", "   ");
        assert_eq!(config::read_env_string("PEW_TEST_BLANK"), None);
    }
}
