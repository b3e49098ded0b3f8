use clap::Parser;
use pagecraft_server::{serve, BackendState};
use tracing_subscriber::EnvFilter;

/// In-memory backend for the Pagecraft page builder
#[derive(Parser, Debug)]
#[command(name = "pagecraft-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1", env = "PAGECRAFT_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3030, env = "PAGECRAFT_PORT")]
    port: u16,

    /// Start without the built-in pages
    #[arg(long)]
    empty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let state = if args.empty {
        BackendState::new()
    } else {
        BackendState::seeded().await
    };

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    serve(listener, state).await?;
    Ok(())
}
