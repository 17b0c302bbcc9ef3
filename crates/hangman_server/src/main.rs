//! Hangman - game server binary.

use anyhow::Result;
use clap::Parser;
use hangman_server::cli::{Cli, Command};
use hangman_server::{HangmanService, NewGameRequest, ServerConfig, SessionStore, play, routes, words};
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, host } => run_server(&cli.config, host, port).await,
        Command::Play {
            language,
            difficulty,
        } => run_play(&cli.config, language, difficulty).await,
    }
}

/// Run the REST game server
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_server(config_path: &Path, host: Option<String>, port: Option<u16>) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hangman_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ServerConfig::load(Some(config_path))?;
    config.set_address(host, port);

    let sampler = words::build_sampler(config.words())?;
    let service = HangmanService::new(SessionStore::new(), sampler);
    let app = routes::router(service);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at http://{}:{}/", config.host(), config.port());
    info!("Routes: POST /api/game/new, /guess, /reveal; GET /state, /hint; DELETE /api/game/{{id}}");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Play a game in the terminal
#[instrument(skip_all)]
async fn run_play(config_path: &Path, language: String, difficulty: String) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::load(Some(config_path))?;
    let sampler = words::build_sampler(config.words())?;
    let service = HangmanService::new(SessionStore::new(), sampler);

    let request = NewGameRequest {
        language,
        difficulty,
    };
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let outcome = play::play(&service, request, input, tokio::io::stdout()).await?;

    info!(?outcome, "Terminal game finished");
    Ok(())
}
