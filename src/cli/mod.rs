//! CLI entry point for the Flair client.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Flair smart vent CLI
#[derive(Parser, Debug)]
#[command(name = "flair", version, about = "Flair smart vent API client")]
pub struct Cli {
    /// TOML config file; falls back to FLAIR_* environment variables
    #[arg(short, long, global = true, env = "FLAIR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Acquire a token and show its type and expiry
    Token,
    /// Check that the configured credentials work
    Validate,
    /// List structures
    Structures,
    /// List rooms
    Rooms,
    /// Set a room's target temperature
    SetPoint(SetPointArgs),
}

/// Arguments for `flair set-point`.
#[derive(Parser, Debug)]
pub struct SetPointArgs {
    /// Room id
    pub room: String,
    /// Target temperature in Celsius
    pub celsius: f64,
}
