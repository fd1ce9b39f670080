use anyhow::{bail, Context, Result};
use std::time::Duration;

use tracing::{debug, error, info};

use tower_http::services::ServeDir;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    middleware,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::{log_requests, metrics, state::*, ServerConfig};
use crate::chat::{decorate_reply, ReplySource};
use crate::mood::{classify, Emotion};
use crate::sentiment::SentimentScorer;

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub const INVALID_MESSAGE_REPLY: &str = "Please provide a valid message.";
pub const CHAT_FAILURE_REPLY: &str = "Sorry, I couldn't process your request.";
pub const PLAYLIST_MESSAGE: &str =
    "Using a general mood playlist as we couldn't connect to Spotify.";
pub const PLAYLIST_FAILURE_MESSAGE: &str =
    "Unable to fetch a playlist at the moment. Using a general mood playlist instead.";

#[derive(Serialize)]
struct GeneratorInfo {
    provider: String,
    model: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime: String,
    hash: String,
    generator: GeneratorInfo,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

/// Only the `response` field is present on rejected or failed requests.
#[derive(Serialize, Debug)]
struct ChatResponse {
    response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotion: Option<Emotion>,
}

impl ChatResponse {
    fn message_only(response: &str) -> Self {
        Self {
            response: response.to_string(),
            emotion: None,
        }
    }
}

#[derive(Serialize, Debug)]
struct PlaylistResponse {
    emotion: Emotion,
    playlist_url: String,
    message: &'static str,
}

async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<ServerState>) -> impl IntoResponse {
    let generator = state.resolver.generator();
    Json(HealthResponse {
        status: "ok",
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        generator: GeneratorInfo {
            provider: generator.name().to_string(),
            model: generator.model().to_string(),
        },
    })
}

/// Scores the text and maps the polarity to an emotion.
fn classify_text(scorer: &dyn SentimentScorer, text: &str) -> Result<Emotion> {
    let polarity = scorer
        .score(text)
        .with_context(|| format!("Sentiment scorer {} failed", scorer.name()))?;
    if !polarity.is_finite() {
        bail!(
            "Sentiment scorer {} returned a non-finite polarity: {}",
            scorer.name(),
            polarity
        );
    }

    let emotion = classify(polarity);
    debug!("Sentiment polarity: {}", polarity);
    debug!("Classified emotion: {}", emotion);
    metrics::record_emotion(emotion.as_str());
    Ok(emotion)
}

/// The 200 JSON payload an endpoint answers with when it cannot do its job.
/// `None` for endpoints that have no such payload.
pub fn degraded_response(state: &ServerState, path: &str) -> Option<Response> {
    match metrics::categorize_endpoint(path) {
        "chat" => Some(Json(ChatResponse::message_only(CHAT_FAILURE_REPLY)).into_response()),
        // No emotion exists yet on any failing path
        "playlist" => Some(
            Json(PlaylistResponse {
                emotion: Emotion::Neutral,
                playlist_url: state.tables.default_playlist_url().to_string(),
                message: PLAYLIST_FAILURE_MESSAGE,
            })
            .into_response(),
        ),
        _ => None,
    }
}

async fn chat_reply(state: &ServerState, text: &str) -> Result<(ChatResponse, ReplySource)> {
    debug!("User input: {}", text);
    let emotion = classify_text(state.scorer.as_ref(), text)?;

    let reply = state.resolver.resolve(text).await;
    let response = decorate_reply(&reply.text, emotion, &state.tables);

    Ok((
        ChatResponse {
            response,
            emotion: Some(emotion),
        },
        reply.source,
    ))
}

/// First `msg` value of the query string. Repeated keys are not an error.
fn first_msg(query: Result<Query<Vec<(String, String)>>, QueryRejection>) -> Option<String> {
    match query {
        Ok(Query(pairs)) => pairs
            .into_iter()
            .find(|(key, _)| key == "msg")
            .map(|(_, value)| value),
        Err(err) => {
            debug!("Unreadable query string: {}", err);
            None
        }
    }
}

async fn get_bot_response(
    State(state): State<ServerState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let text = match first_msg(query) {
        Some(text) if !text.is_empty() => text,
        _ => return Json(ChatResponse::message_only(INVALID_MESSAGE_REPLY)).into_response(),
    };

    match chat_reply(&state, &text).await {
        Ok((reply, source)) => {
            let mut response = Json(reply).into_response();
            response.extensions_mut().insert(source);
            response
        }
        Err(err) => {
            error!("Error processing user input: {:#}", err);
            metrics::record_error("internal", "/get");
            Json(ChatResponse::message_only(CHAT_FAILURE_REPLY)).into_response()
        }
    }
}

/// Extracts the text to classify from a `/forward/` body. A missing `msg`
/// is empty text; a `msg` that is not a string is a failure.
fn playlist_text(body: &[u8]) -> Result<String> {
    let body: Value = serde_json::from_slice(body).context("Request body is not valid JSON")?;
    let Some(fields) = body.as_object() else {
        bail!("Request body is not a JSON object");
    };
    match fields.get("msg") {
        None => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => bail!("msg is not a string: {}", other),
    }
}

fn playlist_emotion(scorer: &dyn SentimentScorer, body: &[u8]) -> Result<Emotion> {
    let text = playlist_text(body)?;
    debug!("Playlist request for: {}", text);
    classify_text(scorer, &text)
}

async fn forward_playlist(State(state): State<ServerState>, body: Bytes) -> Response {
    match playlist_emotion(state.scorer.as_ref(), &body) {
        Ok(emotion) => Json(PlaylistResponse {
            emotion,
            playlist_url: state.tables.playlist_for(emotion).to_string(),
            message: PLAYLIST_MESSAGE,
        })
        .into_response(),
        Err(err) => {
            error!("Error fetching Spotify playlist: {:#}", err);
            metrics::record_error("internal", "/forward/");
            match degraded_response(&state, "/forward/") {
                Some(response) => response,
                None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            }
        }
    }
}

pub fn make_app(config: ServerConfig, state: ServerState) -> Result<Router> {
    let api_routes: Router = Router::new()
        .route("/get", get(get_bot_response))
        .route("/forward/", post(forward_playlist))
        .route("/forward", post(forward_playlist))
        .route("/health", get(health))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new().route("/", get(home)),
    };

    let app: Router = home_router
        .merge(api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests));

    Ok(app)
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics::metrics_handler))
}

pub async fn run_server(config: ServerConfig, state: ServerState) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, state)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind to port {}", port))?;
    let metrics_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;

    info!("Ready to serve at port {}!", port);
    info!("Metrics available at port {}!", metrics_port);

    tokio::select! {
        result = axum::serve(listener, app) => result.context("Main server failed"),
        result = axum::serve(metrics_listener, make_metrics_app()) => {
            result.context("Metrics server failed")
        }
    }
}
