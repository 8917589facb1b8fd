//! CLI module for Spor.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::config::TranscriptPreference;
use clap::{Parser, Subcommand};

/// Spor - ask questions about video transcripts
///
/// Fetches a transcript once, then answers questions from the closest
/// transcript chunks using embeddings and a chat model.
#[derive(Parser, Debug)]
#[command(name = "spor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question about a fetched transcript
    Ask {
        /// YouTube URL or video ID
        video: String,

        /// The question to ask
        question: String,

        /// Words per chunk (defaults to chunking.chunk_size)
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Number of chunks used as context (defaults to retrieval.top_k)
        #[arg(short, long)]
        k: Option<usize>,

        /// Chat model for the answer
        #[arg(short, long)]
        model: Option<String>,

        /// Print the chunks the answer was grounded in
        #[arg(long)]
        sources: bool,
    },

    /// Show the transcript chunks closest to a query
    Search {
        /// YouTube URL or video ID
        video: String,

        /// Search query
        query: String,

        /// Words per chunk (defaults to chunking.chunk_size)
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Number of results (defaults to retrieval.top_k)
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Download a transcript and store it locally
    Fetch {
        /// YouTube URL or video ID
        url: String,

        /// Transcript source to try first (captions, audio)
        #[arg(long)]
        prefer: Option<TranscriptPreference>,

        /// Fetch again even if a transcript is already stored
        #[arg(short, long)]
        force: bool,
    },

    /// Summarise a video into a single paragraph
    Summarise {
        /// YouTube URL or video ID
        url: String,

        /// Transcript source to try first (captions, audio)
        #[arg(long)]
        prefer: Option<TranscriptPreference>,

        /// Chat model for the summary
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
