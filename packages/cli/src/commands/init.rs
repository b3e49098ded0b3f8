use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_common::PageType;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Backend base URL
    #[arg(short, long, default_value = "http://127.0.0.1:3030")]
    pub backend_url: String,

    /// Company that owns custom pages
    #[arg(short, long, default_value = "default")]
    pub company_id: String,

    /// Map built-in pages to the ids used by the reference server
    #[arg(long)]
    pub reference_pages: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = Config::path(cwd);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let mut config = Config {
        backend_url: args.backend_url,
        company_id: args.company_id,
        ..Config::default()
    };

    if args.reference_pages {
        // The reference server seeds built-in pages in this order starting at 1
        for (index, page_type) in PageType::BUILT_IN.iter().enumerate() {
            config.pages.insert(*page_type, index as u64 + 1);
        }
    }

    let json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    Ok(())
}
