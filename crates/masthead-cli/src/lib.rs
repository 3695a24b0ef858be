//! Command-line front end for Masthead.
//!
//! # Modules
//!
//! - [`cli`]: Argument parsing
//! - [`config`]: Layered configuration
//! - [`config_handlers`]: `masthead config ...` subcommands
//! - [`handlers`]: Content commands (resolve, header, formatting, sync paths)
//! - [`app`]: Application wiring and dispatch

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod handlers;

pub use app::MastheadCli;
pub use cli::{CliArgs, Command};
pub use config::MastheadConfig;
