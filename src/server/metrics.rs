use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all MoodMelody metrics
const PREFIX: &str = "moodmelody";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Chat Metrics
    pub static ref CHAT_REPLIES_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_chat_replies_total"), "Chat replies by the source that produced them"),
        &["source"]
    ).expect("Failed to create chat_replies_total metric");

    pub static ref EMOTIONS_CLASSIFIED_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_emotions_classified_total"), "Classified emotions"),
        &["emotion"]
    ).expect("Failed to create emotions_classified_total metric");

    // Generation Metrics
    pub static ref GENERATION_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_generation_duration_seconds"),
            "Text generation call duration in seconds"
        )
        .buckets(vec![0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
        &["provider", "outcome"]
    ).expect("Failed to create generation_duration_seconds metric");

    // Error Metrics
    pub static ref ERRORS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_errors_total"), "Total errors by type and endpoint"),
        &["error_type", "endpoint"]
    ).expect("Failed to create errors_total metric");

    pub static ref PROCESS_MEMORY_BYTES: Gauge = Gauge::new(
        format!("{PREFIX}_process_memory_bytes"),
        "Process memory usage in bytes"
    ).expect("Failed to create process_memory_bytes metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(CHAT_REPLIES_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(EMOTIONS_CLASSIFIED_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(GENERATION_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(ERRORS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(PROCESS_MEMORY_BYTES.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Maps a request path to a fixed label, keeping the path label bounded.
pub fn categorize_endpoint(path: &str) -> &'static str {
    match path {
        "/" => "home",
        "/get" => "chat",
        "/forward" | "/forward/" => "playlist",
        "/health" => "health",
        _ => "other",
    }
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let endpoint = categorize_endpoint(path);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, endpoint])
        .observe(duration.as_secs_f64());
}

/// Record which link of the reply chain answered
pub fn record_chat_reply(source: &str) {
    CHAT_REPLIES_TOTAL.with_label_values(&[source]).inc();
}

pub fn record_emotion(emotion: &str) {
    EMOTIONS_CLASSIFIED_TOTAL.with_label_values(&[emotion]).inc();
}

/// Record a generation call and its outcome ("success" or an error kind)
pub fn record_generation(provider: &str, outcome: &str, duration: Duration) {
    GENERATION_DURATION_SECONDS
        .with_label_values(&[provider, outcome])
        .observe(duration.as_secs_f64());
}

/// Record an error
pub fn record_error(error_type: &str, endpoint: &str) {
    ERRORS_TOTAL
        .with_label_values(&[error_type, endpoint])
        .inc();
}

/// Update process memory usage
pub fn update_memory_usage() {
    #[cfg(target_os = "linux")]
    {
        if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
            for line in status.lines() {
                if line.starts_with("VmRSS:") {
                    // VmRSS is reported in kB
                    if let Some(kb) = line
                        .split_whitespace()
                        .nth(1)
                        .and_then(|kb_str| kb_str.parse::<f64>().ok())
                    {
                        PROCESS_MEMORY_BYTES.set(kb * 1024.0);
                        return;
                    }
                }
            }
        }
    }
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    update_memory_usage();

    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
