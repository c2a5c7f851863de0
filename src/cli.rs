//! CLI definitions for buildport.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// buildport CLI.
#[derive(Parser)]
#[command(name = "buildport")]
#[command(about = "Import community gear builds into affix presets")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "buildport.toml", global = true, env = "BUILDPORT_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import a build page and store it in the catalog
    Import {
        /// Build page URL
        url: String,
    },

    /// List imported builds
    List {
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show one imported build as JSON
    Show {
        /// Build id (see `list`)
        id: String,
    },

    /// Delete an imported build
    Delete {
        /// Build id (see `list`)
        id: String,
    },

    /// Export a build variant to the preset file
    Preset {
        /// Build id (see `list`)
        id: String,

        /// Variant name
        variant: String,

        /// Preset name (default: build and variant name)
        #[arg(short, long)]
        name: Option<String>,
    },
}
