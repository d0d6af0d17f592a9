//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod analyze;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "postcraft")]
#[command(about = "Extract text from documents and get AI feedback on engagement and SEO")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Bind address: port ("8000"), host ("0.0.0.0") or host:port
        #[arg(short, long, env = "POSTCRAFT_BIND")]
        bind: Option<String>,
    },

    /// Extract text from a file and print the AI review
    Analyze {
        /// Document to analyze (.txt, .pdf, .png, .jpg, .jpeg)
        file: PathBuf,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract text from a file without calling the model
    Extract {
        /// Document to read (.txt, .pdf, .png, .jpg, .jpeg)
        file: PathBuf,
    },

    /// Check OCR tool and model configuration
    Tools,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env();

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.bind.clone());
            serve::cmd_serve(&settings, &bind).await
        }
        Commands::Analyze { file, json } => analyze::cmd_analyze(&settings, &file, json).await,
        Commands::Extract { file } => analyze::cmd_extract(&settings, &file).await,
        Commands::Tools => analyze::cmd_tools(&settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["postcraft", "-v", "analyze", "post.pdf", "--json"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze { file, json } => {
                assert_eq!(file, PathBuf::from("post.pdf"));
                assert!(json);
            }
            _ => panic!("expected analyze"),
        }

        let cli = Cli::try_parse_from(["postcraft", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { bind: Some(b) } if b == "0.0.0.0:9000"));
    }

    #[test]
    fn test_cli_requires_file() {
        assert!(Cli::try_parse_from(["postcraft", "extract"]).is_err());
    }
}
