use super::{open_session, print_sections};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_common::PageType;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Page type (home, product, cart, checkout, collection, all-collections, all-products, custom)
    #[arg(short = 't', long)]
    pub page_type: PageType,

    /// Backend page id (defaults to the configured one)
    #[arg(short = 'i', long)]
    pub page_id: Option<String>,
}

/// Print the sections and structural components of a page
pub async fn show(args: ShowArgs, config: &Config) -> Result<()> {
    let selection = config.selection(args.page_type, args.page_id.as_deref())?;
    let session = open_session(config, selection).await?;

    println!(
        "{} {} (id {})",
        "Page".bright_blue().bold(),
        session.selection().page_type,
        session.selection().page_id
    );
    print_sections(session.sections());

    let structural = session.structural().config();
    println!();
    println!(
        "{} v{}",
        "Structural components".bright_blue().bold(),
        structural.version
    );
    for (slot, component) in &structural.components {
        let state = if component.enabled {
            "enabled".green()
        } else {
            "disabled".yellow()
        };
        println!("  {:<18} {}", format!("{:?}", slot), state);
    }

    Ok(())
}
