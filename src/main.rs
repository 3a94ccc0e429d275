use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use learnpath::Config;

mod cli;

#[derive(Parser)]
#[command(name = "learnpath")]
#[command(about = "Track workshop progress, saved solutions and achievements")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.learnpath/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the storage data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show stored progress
    Show {
        /// Only show this module
        #[arg(long)]
        module: Option<String>,
    },

    /// Record a workshop score (the best score is kept)
    Score {
        module: String,
        workshop: String,
        score: i64,
    },

    /// Count a completed workshop in a module
    Complete { module: String },

    /// Read or write saved solution code
    Code {
        #[command(subcommand)]
        command: CodeCommands,
    },

    /// Show achievement progress
    Achievements {
        /// How many in-progress achievements to list
        #[arg(long, default_value_t = 3)]
        top: usize,
    },

    /// Delete all stored progress
    Clear,
}

#[derive(Subcommand)]
enum CodeCommands {
    /// Print saved code for a workshop
    Get {
        module: String,
        workshop: String,
        /// Solution approach (multi-approach workshops)
        #[arg(short, long)]
        approach: Option<String>,
    },

    /// Save code for a workshop
    Save {
        module: String,
        workshop: String,
        /// Solution approach (multi-approach workshops)
        #[arg(short, long)]
        approach: Option<String>,
        /// Code to save
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        code: Option<String>,
        /// Read code from this file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config;
    let data_dir = cli.data_dir;
    let load_config = || -> Result<Config> {
        let mut config = Config::load(config_path.as_deref())?;
        if let Some(dir) = &data_dir {
            config.storage.data_dir = Some(dir.clone());
        }
        Ok(config)
    };

    match cli.command {
        Commands::Init { force } => cli::init::init_command(config_path.as_deref(), force)?,
        Commands::Show { module } => {
            cli::progress::show_command(&load_config()?, module.as_deref())?
        }
        Commands::Score {
            module,
            workshop,
            score,
        } => cli::progress::score_command(&load_config()?, &module, &workshop, score)?,
        Commands::Complete { module } => {
            cli::progress::complete_command(&load_config()?, &module)?
        }
        Commands::Code { command } => match command {
            CodeCommands::Get {
                module,
                workshop,
                approach,
            } => cli::code::get_command(&load_config()?, &module, &workshop, approach.as_deref())?,
            CodeCommands::Save {
                module,
                workshop,
                approach,
                code,
                file,
            } => cli::code::save_command(
                &load_config()?,
                &module,
                &workshop,
                approach.as_deref(),
                code,
                file,
            )?,
        },
        Commands::Achievements { top } => {
            cli::achievements::achievements_command(&load_config()?, top)?
        }
        Commands::Clear => cli::progress::clear_command(&load_config()?)?,
    }

    Ok(())
}
