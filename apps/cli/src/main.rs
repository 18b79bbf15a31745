//! Mirror CLI - interactive chat with a Gemini model.
//!
//! Provides the `mirror` command: a REPL-style conversation with mirror
//! mode (contrastive metaphor transform), monologue mode, best-effort
//! speech output, and transcript logging.

mod chat;
mod config;

use anyhow::{Context, anyhow};
use clap::Parser;
use colored::Colorize;
use mirror_abstraction::{GenerationOptions, Model};
use mirror_core::credentials;
use mirror_models::{ModelConfig, ModelFactory, ModelType};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Mirror - a mirror-image chatbot for the Gemini API.
#[derive(Parser, Debug)]
#[command(
    name = "mirror",
    author,
    version,
    about = "Mirror - interactive Gemini chat with a contrastive metaphor mode",
    long_about = "Mirror is an interactive chat front-end for the Gemini API.\n\
        Replies are extracted defensively (blocked, truncated, and empty responses\n\
        degrade to diagnosable notices), and can be reframed through a fixed\n\
        metaphor table, read aloud, and logged to a per-session transcript."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Model provider (gemini, mock)
    #[arg(long)]
    provider: Option<String>,

    /// Model ID (e.g., "gemini-2.5-pro")
    #[arg(long)]
    model: Option<String>,

    /// Maximum number of new tokens per response, clamped to [10, 8192]
    #[arg(long)]
    max_new_tokens: Option<u32>,

    /// Sampling temperature, clamped to [0.0, 2.0]
    #[arg(long)]
    temperature: Option<f32>,

    /// Nucleus sampling threshold, clamped to [0.0, 1.0]
    #[arg(long)]
    top_p: Option<f32>,

    /// Directory for per-session transcript logs
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Start with mirror mode enabled
    #[arg(long)]
    mirror: bool,

    /// Start with speech output enabled
    #[arg(long)]
    speak: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let file_config = config::load_config();

    // Initialize tracing
    let level = match args
        .log_level
        .as_deref()
        .or(file_config.log_level.as_deref())
        .unwrap_or("info")
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber =
        FmtSubscriber::builder().with_max_level(level).without_time().with_target(false).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Resolve options: CLI arguments over config file over defaults.
    let mut options = GenerationOptions::default();
    if let Some(max_new_tokens) = args.max_new_tokens.or(file_config.max_new_tokens) {
        options = options.with_max_output_tokens(max_new_tokens);
    }
    if let Some(temperature) = args.temperature.or(file_config.temperature) {
        options = options.with_temperature(temperature);
    }
    if let Some(top_p) = args.top_p.or(file_config.top_p) {
        options = options.with_top_p(top_p);
    }

    let provider_name = args
        .provider
        .or(file_config.provider)
        .unwrap_or_else(|| "gemini".to_string());
    let provider = ModelType::from_str(&provider_name)
        .map_err(|()| anyhow!("Unknown provider '{provider_name}' (expected 'gemini' or 'mock')"))?;
    let model_id = args
        .model
        .or(file_config.model)
        .unwrap_or_else(|| "gemini-2.5-pro".to_string());

    let model: Arc<dyn Model + Send + Sync> = match provider {
        ModelType::Gemini => {
            // The key is loaded exactly once; without it there is nothing to run.
            let api_key = credentials::load_api_key()
                .context("Mirror cannot start without a Gemini API key")?;
            println!(
                "{} ✅ {}",
                "GOOGLE_API_KEY:".yellow().bold(),
                credentials::mask(&api_key)
            );
            ModelFactory::create(
                ModelConfig::new(ModelType::Gemini, model_id).with_api_key(api_key),
            )?
        }
        ModelType::Mock => ModelFactory::create(ModelConfig::new(ModelType::Mock, model_id))?,
    };

    let log_dir = args
        .log_dir
        .or(file_config.log_dir)
        .unwrap_or_else(|| PathBuf::from("logs"));

    chat::execute(model, options, args.mirror, args.speak, &log_dir).await
}
