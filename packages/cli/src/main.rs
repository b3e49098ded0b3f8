mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, init, serve, show, ApplyArgs, InitArgs, ServeArgs, ShowArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - drive the storefront page builder from the terminal
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override the backend URL from the config file
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a pagecraft.config.json
    Init(InitArgs),

    /// Run the in-memory reference backend
    Serve(ServeArgs),

    /// Show the sections of a page
    Show(ShowArgs),

    /// Apply an edit script to a page and save it
    Apply(ApplyArgs),
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let mut config = Config::load(&cwd)?;
    if let Some(url) = cli.backend_url {
        config.backend_url = url;
    }

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Serve(args) => serve(args).await,
        Command::Show(args) => show(args, &config).await,
        Command::Apply(args) => apply(args, &config).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
