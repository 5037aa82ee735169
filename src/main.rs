//! CLI entry point for post-repo

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "post-repo")]
#[command(version)]
#[command(about = "Load markdown blog posts and print them as JSON", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List post summaries, newest first
    #[command(alias = "ls")]
    List,

    /// List post identifiers as route parameters
    Ids,

    /// Render one post to HTML
    Show {
        /// Post identifier (file name without extension)
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "post_repo=debug,info"
    } else {
        "post_repo=info"
    };

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let repo = post_repo::PostRepository::open(&base_dir)
        .with_context(|| format!("Failed to open post repository in {:?}", base_dir))?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::List => post_repo::commands::list::run(&repo, &mut stdout, cli.compact)?,
        Commands::Ids => post_repo::commands::ids::run(&repo, &mut stdout, cli.compact)?,
        Commands::Show { id } => {
            post_repo::commands::show::run(&repo, &id, &mut stdout, cli.compact).await?
        }
    }

    Ok(())
}
