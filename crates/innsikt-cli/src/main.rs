//! Innsikt CLI - Insight reconciliation and analytics engine
//!
//! Usage:
//!   innsikt add "..." -s me -t jobb    Add a signal to the chamber
//!   innsikt topics                      List topics with saturation
//!   innsikt stats -s me -t jobb         Show statistics for one topic
//!   innsikt meta -s me                  Build the cross-topic meta profile

mod cli;
mod commands;
mod store;


use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use innsikt_core::{InsightEngine, Lexicon};
use store::ChamberStore;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let store_path = cli.store.clone().unwrap_or_else(store::default_store_path);
    let store = ChamberStore::new(store_path);

    let lexicon = Lexicon::load().context("Failed to load lexicon")?;
    let engine = InsightEngine::with_lexicon(lexicon).context("Failed to build engine")?;

    match cli.command {
        Commands::Add {
            text,
            subject,
            theme,
            place,
            person,
            field,
            emner,
            split,
        } => {
            let context = innsikt_core::SignalContext {
                place_id: place,
                person_id: person,
                field_id: field,
                emner,
            };
            commands::cmd_add(&store, &engine, &text, &subject, &theme, context, split, cli.json)
        }
        Commands::Topics => commands::cmd_topics(&store, &engine, cli.json),
        Commands::Stats { subject, theme } => {
            commands::cmd_stats(&store, &engine, &subject, &theme, cli.json)
        }
        Commands::Insights { subject, theme } => {
            commands::cmd_insights(&store, &subject, &theme, cli.json)
        }
        Commands::Meta { subject } => commands::cmd_meta(&store, &engine, &subject, cli.json),
        Commands::Concepts {
            subject,
            theme,
            concept,
            steps,
        } => commands::cmd_concepts(&store, &subject, &theme, concept.as_deref(), steps, cli.json),
        Commands::Path {
            subject,
            theme,
            steps,
        } => commands::cmd_path(&store, &subject, &theme, steps, cli.json),
        Commands::Synthesis { subject, theme } => {
            commands::cmd_synthesis(&store, &subject, &theme)
        }
        Commands::Article { subject, theme } => {
            commands::cmd_article(&store, &engine, &subject, &theme)
        }
        Commands::Backup { dir } => commands::cmd_backup(&store, dir),
        Commands::Reset { yes } => commands::cmd_reset(&store, yes),
    }
}
