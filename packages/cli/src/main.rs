mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    catalog, check, replay, serve, stream, CatalogArgs, CheckArgs, ReplayArgs, ServeArgs,
    StreamArgs, Workspace,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// StreamUI CLI - progressive rendering of generated UI patch streams
#[derive(Parser, Debug)]
#[command(name = "streamui")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog document to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded stream and render the result
    Replay(ReplayArgs),

    /// Report every diagnostic of a recorded stream
    Check(CheckArgs),

    /// Print the catalog or the producer prompt
    Catalog(CatalogArgs),

    /// Run the generation endpoint with a scripted generator
    Serve(ServeArgs),

    /// Drive a full streaming session in-process
    Stream(StreamArgs),
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let workspace = Workspace::load(&cwd, cli.catalog.as_deref())?;

    match cli.command {
        Command::Replay(args) => replay(args, &workspace),
        Command::Check(args) => check(args, &workspace),
        Command::Catalog(args) => catalog(args, &workspace),
        Command::Serve(args) => serve(args, &workspace).await,
        Command::Stream(args) => stream(args, &workspace).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
