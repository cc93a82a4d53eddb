//! quizmark CLI — grade free-text quiz answers from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use quizmark_core::Locale;

use crate::config::OutputFormat;

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "quizmark",
    version,
    about = "Free-text answer evaluation for quizzes and flashcards"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate answers against a reference answer
    Evaluate {
        /// Reference answer; separate accepted variants with "/"
        #[arg(long)]
        reference: String,

        /// Answer to evaluate (repeatable)
        #[arg(long = "answer", required = true)]
        answers: Vec<String>,

        /// Feedback language: en, ja
        #[arg(long)]
        locale: Option<Locale>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Evaluate a JSON array of {reference, answer, locale} requests
    Batch {
        /// JSON file to read (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Show the accepted variants of a reference answer and lint it
    Check {
        /// Reference answer to check
        #[arg(long)]
        reference: String,
    },

    /// Create a starter quizmark.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmark=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            reference,
            answers,
            locale,
            format,
        } => config::load_config_from(cli.config.as_deref()).and_then(|config| {
            commands::evaluate::execute(
                &reference,
                &answers,
                locale.unwrap_or(config.locale),
                format.unwrap_or(config.format),
            )
        }),
        Commands::Batch { input, format } => config::load_config_from(cli.config.as_deref())
            .and_then(|config| {
                commands::batch::execute(input.as_deref(), format.unwrap_or(config.format))
            }),
        Commands::Check { reference } => commands::check::execute(&reference),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
