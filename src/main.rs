use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodmelody_server::chat::ReplyResolver;
use moodmelody_server::config::{self, AppConfig, CliConfig, FileConfig};
use moodmelody_server::generation::{
    GenerationOptions, NoOpGenerator, OllamaGenerator, TextGenerator,
};
use moodmelody_server::sentiment::{LexiconScorer, SentimentScorer};
use moodmelody_server::server::{self, state::ServerState, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Its values override the CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = config::DEFAULT_PORT)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = config::DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to a frontend directory to be statically served instead of the
    /// bundled chat page.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Base URL of the Ollama server.
    #[clap(long, default_value = config::DEFAULT_GENERATION_URL)]
    pub generation_url: String,

    /// Model used for reply generation.
    #[clap(long, default_value = config::DEFAULT_GENERATION_MODEL)]
    pub generation_model: String,

    /// Timeout in seconds for generation requests.
    #[clap(long, default_value_t = config::DEFAULT_GENERATION_TIMEOUT_SEC)]
    pub generation_timeout_sec: u64,

    /// Answer every message with the canned responders only.
    #[clap(long)]
    pub disable_generation: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            port: self.port,
            metrics_port: self.metrics_port,
            logging_level: self.logging_level.clone(),
            frontend_dir_path: self.frontend_dir_path.clone(),
            generation_url: self.generation_url.clone(),
            generation_model: self.generation_model.clone(),
            generation_timeout_sec: self.generation_timeout_sec,
            disable_generation: self.disable_generation,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Initializing metrics...");
    server::metrics::init_metrics();

    let generator: Arc<dyn TextGenerator> = if app_config.generation.enabled {
        let ollama = OllamaGenerator::new(
            app_config.generation.url.clone(),
            app_config.generation.model.clone(),
        );
        info!(
            "Generation via Ollama at {} with model {}",
            ollama.base_url(),
            app_config.generation.model
        );
        if let Err(e) = ollama.health_check().await {
            warn!(
                "Ollama is not reachable ({}), replies will use the fallback responder until it is",
                e
            );
        }
        Arc::new(ollama)
    } else {
        info!("Generation disabled, replies come from the canned responders");
        Arc::new(NoOpGenerator)
    };

    let resolver = Arc::new(ReplyResolver::new(
        generator,
        GenerationOptions {
            timeout: app_config.generation.timeout(),
        },
    ));
    let scorer: Arc<dyn SentimentScorer> = Arc::new(LexiconScorer::default());

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level.clone(),
        port: app_config.port,
        metrics_port: app_config.metrics_port,
        frontend_dir_path: app_config.frontend_dir_path.clone(),
    };
    let state = ServerState::new(
        server_config.clone(),
        scorer,
        resolver,
        Arc::new(app_config.moods),
    );

    server::run_server(server_config, state).await
}
