use clap::{Parser, Subcommand};
use elite_editor::domain::Tone;
use std::path::PathBuf;

/// `Elite Editor` - rewrite drafts in a chosen tone with a writing coach.
#[derive(Parser, Debug)]
#[command(name = "elite-editor")]
#[command(version)]
#[command(about = "A professional communication coach for your drafts.", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive editor (default when no command is given)
    Tui,

    /// Polish a single draft and print the result
    Polish {
        /// Draft text (read from stdin when neither TEXT nor --file is given)
        text: Option<String>,

        /// Read the draft from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Target tone (professional, formal, casual, assertive, friendly, diplomatic)
        #[arg(short, long)]
        tone: Option<Tone>,

        /// Treat the input as markup instead of plain text
        #[arg(long)]
        html: bool,

        /// Copy the polished result to the clipboard
        #[arg(short, long)]
        copy: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse and manage recent rewrites
    History {
        #[command(subcommand)]
        history_command: HistoryCommands,
    },

    /// List the available tones
    Tones,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List saved rewrites, newest first
    List {
        /// Print the raw entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one saved rewrite in full
    Show { id: String },

    /// Delete one saved rewrite
    Delete { id: String },

    /// Delete every saved rewrite
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
