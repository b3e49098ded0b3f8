use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_server::BackendState;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3030)]
    pub port: u16,

    /// Start without the built-in pages
    #[arg(long)]
    pub empty: bool,
}

/// Run the in-memory reference backend
pub async fn serve(args: ServeArgs) -> Result<()> {
    let state = if args.empty {
        BackendState::new()
    } else {
        BackendState::seeded().await
    };

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    println!(
        "{} http://{}",
        "Serving reference backend on".bright_blue().bold(),
        listener.local_addr()?
    );

    pagecraft_server::serve(listener, state).await?;
    Ok(())
}
