//! Application wiring.
//!
//! [`MastheadCli`] is the composition root: it loads configuration,
//! registers components explicitly, sets up logging, and dispatches
//! commands.

use std::sync::Arc;

use masthead_content::{ComponentRegistry, article_header_definition};
use masthead_core::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command};
use crate::config::MastheadConfig;
use crate::config_handlers;
use crate::handlers::{self, ConstraintOverrides};

// ============================================================================
// MastheadCli
// ============================================================================

/// The Masthead CLI application.
pub struct MastheadCli {
    name: String,
    config: Arc<MastheadConfig>,
    registry: ComponentRegistry,
    version: String,
}

/// Register every component the application uses.
pub fn default_registry() -> Result<ComponentRegistry> {
    let mut registry = ComponentRegistry::new();
    registry.register(article_header_definition())?;
    Ok(registry)
}

impl MastheadCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = MastheadConfig::load(args.config.as_deref())?;
        Self::new(name, config)
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: MastheadConfig) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            config: Arc::new(config),
            registry: default_registry()?,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The loaded configuration.
    pub fn config(&self) -> &MastheadConfig {
        &self.config
    }

    /// The component registry.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Resolve {
                input,
                width,
                height,
                fit,
                focal,
            }) => {
                let json = handlers::read_input(&input).await?;
                let overrides = ConstraintOverrides {
                    width,
                    height,
                    fit,
                    focal,
                };
                println!("{}", handlers::resolve_image(&self.config, &json, &overrides)?);
                Ok(())
            }
            Some(Command::Header { input }) => {
                let json = handlers::read_input(&input).await?;
                println!("{}", handlers::build_header(&self.config, &json)?);
                Ok(())
            }
            Some(Command::FormatDate { date }) => {
                println!("{}", handlers::format_date_value(&date));
                Ok(())
            }
            Some(Command::ReadingTime { value }) => {
                println!("{}", handlers::format_reading_time_value(&value));
                Ok(())
            }
            Some(Command::SyncPath { model, entry_id }) => {
                let path = handlers::sync_path(&self.config.sync, &*self.config, &model, &entry_id)?;
                println!("{path}");
                Ok(())
            }
            Some(Command::Components) => {
                println!("{}", handlers::list_components(&self.registry));
                Ok(())
            }
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
