//! Command-line interface for the hangman server.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hangman - word-guessing game server
#[derive(Parser, Debug)]
#[command(name = "hangman")]
#[command(about = "Hangman game server with a REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "hangman.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the REST game server
    Serve {
        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
    },

    /// Play a game in the terminal
    Play {
        /// Word language: en, pl or uk
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Easy, Normal or Hard
        #[arg(short, long, default_value = "Normal")]
        difficulty: String,
    },
}
