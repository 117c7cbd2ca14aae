use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shared output mode for commands that print JSON.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Compact single-line JSON.
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
}

/// Top-level CLI parser for the `exo-gateway` binary.
#[derive(Debug, Parser)]
#[command(
    name = "exo-gateway",
    version,
    about = "Normalizing proxy for the exoplanet classification service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Config file (defaults to ./exo-gateway.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP gateway
    Serve(ServeArgs),
    /// Normalize a local CSV file without contacting the prediction service
    Shape(ShapeArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address, overriding `server.bind`
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShapeArgs {
    /// CSV file with a header line
    pub file: PathBuf,

    /// Target model id (unknown ids fall back to the default model)
    #[arg(short, long)]
    pub model: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            config: self.config.clone(),
        }
    }
}
