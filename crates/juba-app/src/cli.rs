//! Command-line interface.
//!
//! Every command except `serve` runs once against the configured store and
//! exits. Global flags override the environment configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use juba_config::StoreBackend;
use juba_types::{Category, Direction};

#[derive(Debug, Parser)]
#[command(name = "juba", author, version, about = "English / Juba Arabic phrasebook", long_about = None)]
pub struct Arguments {
    /// Store backend: memory or json (overrides JUBA_STORE)
    #[arg(long, global = true)]
    pub store: Option<StoreBackend>,

    /// Dictionary file for the json backend (overrides JUBA_DATA_PATH)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the JSON API over WebSocket
    Serve {
        /// Listen address (overrides JUBA_ADDR)
        #[arg(long)]
        addr: Option<String>,
    },

    /// Translate a phrase
    Translate {
        /// Phrase to translate; several words may be given unquoted
        #[arg(required = true, num_args = 1..)]
        phrase: Vec<String>,

        /// Language of the phrase: english or arabi-juba
        #[arg(long, short, default_value = "english")]
        from: Direction,
    },

    /// List dictionary entries
    List {
        #[arg(long)]
        category: Option<Category>,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an entry
    Add {
        english: String,
        arabi_juba: String,

        #[arg(long)]
        category: Option<Category>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Update fields of an entry
    Update {
        id: String,

        #[arg(long)]
        english: Option<String>,

        #[arg(long)]
        arabi_juba: Option<String>,

        #[arg(long)]
        category: Option<Category>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an entry
    Delete { id: String },

    /// Add every entry of a JSON array file
    Import { file: PathBuf },
}
