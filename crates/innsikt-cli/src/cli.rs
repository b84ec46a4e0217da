//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Innsikt - Turn free-text signals into reconciled insights
#[derive(Parser)]
#[command(name = "innsikt")]
#[command(about = "Insight reconciliation and analytics engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Chamber file path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a free-text signal to the chamber
    Add {
        /// The utterance text
        text: String,

        /// Subject (user) the signal belongs to
        #[arg(short, long)]
        subject: String,

        /// Theme (topic) the signal belongs to
        #[arg(short, long)]
        theme: String,

        /// Optional place context
        #[arg(long)]
        place: Option<String>,

        /// Optional person context
        #[arg(long)]
        person: Option<String>,

        /// Optional field context
        #[arg(long)]
        field: Option<String>,

        /// Subject tag (repeatable)
        #[arg(long = "emne")]
        emner: Vec<String>,

        /// Split the text into sentences and add each as its own signal
        #[arg(long)]
        split: bool,
    },

    /// List all topics with saturation, density, and artifact type
    Topics,

    /// Show statistics for one topic
    Stats {
        #[arg(short, long)]
        subject: String,

        #[arg(short, long)]
        theme: String,
    },

    /// List insights for one topic
    Insights {
        #[arg(short, long)]
        subject: String,

        #[arg(short, long)]
        theme: String,
    },

    /// Build the cross-topic meta profile for a subject
    Meta {
        #[arg(short, long)]
        subject: String,
    },

    /// List concepts for a topic, or trace one concept over time
    Concepts {
        #[arg(short, long)]
        subject: String,

        #[arg(short, long)]
        theme: String,

        /// Show the thinking trail for this concept key
        #[arg(long)]
        concept: Option<String>,

        /// Maximum steps in a concept trail
        #[arg(long, default_value = "5")]
        steps: usize,
    },

    /// Render the insight path for a topic
    Path {
        #[arg(short, long)]
        subject: String,

        #[arg(short, long)]
        theme: String,

        /// Maximum number of steps
        #[arg(long, default_value = "5")]
        steps: usize,
    },

    /// Render a synthesis text for a topic
    Synthesis {
        #[arg(short, long)]
        subject: String,

        #[arg(short, long)]
        theme: String,
    },

    /// Render an article draft for a topic
    Article {
        #[arg(short, long)]
        subject: String,

        #[arg(short, long)]
        theme: String,
    },

    /// Create a gzip backup of the chamber
    Backup {
        /// Backup directory (defaults to <data dir>/innsikt/backups)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Delete the chamber and start fresh
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
