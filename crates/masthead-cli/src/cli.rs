//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use masthead_media::Fit;

/// Input path meaning "read from stdin".
pub const STDIN: &str = "-";

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "MASTHEAD_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Masthead commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a hero image from a JSON asset list (or single asset).
    Resolve {
        /// JSON file, or `-` for stdin.
        #[arg(default_value = STDIN)]
        input: String,

        /// Override the target width.
        #[arg(long)]
        width: Option<u32>,

        /// Override the target height.
        #[arg(long)]
        height: Option<u32>,

        /// Override the fit strategy.
        #[arg(long)]
        fit: Option<Fit>,

        /// Override the default focal point.
        #[arg(long)]
        focal: Option<String>,
    },

    /// Build the article header view from article JSON.
    Header {
        /// JSON file, or `-` for stdin.
        #[arg(default_value = STDIN)]
        input: String,
    },

    /// Format a publish date.
    FormatDate {
        /// Date such as `2024-03-15`.
        date: String,
    },

    /// Format a reading time (minutes or preformatted text).
    ReadingTime {
        /// Number of minutes, or text passed through as-is.
        value: String,
    },

    /// Print the local mirror path of a CMS entry.
    SyncPath {
        /// Content model name.
        model: String,

        /// Entry identifier.
        entry_id: String,
    },

    /// List registered components and their inputs.
    Components,

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "image.width").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "image.width").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
