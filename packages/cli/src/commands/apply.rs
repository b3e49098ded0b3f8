use super::{open_session, print_sections};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_common::PageType;
use pagecraft_editor::{parse_script, NotificationLevel, SaveReport};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// JSON edit script
    pub script: PathBuf,

    /// Page type to edit
    #[arg(short = 't', long)]
    pub page_type: PageType,

    /// Backend page id (defaults to the configured one)
    #[arg(short = 'i', long)]
    pub page_id: Option<String>,

    /// Print the result without saving
    #[arg(long)]
    pub dry_run: bool,
}

/// Run an edit script through an editor session and save
pub async fn apply(args: ApplyArgs, config: &Config) -> Result<()> {
    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading {}", args.script.display()))?;
    let steps = parse_script(&source)?;

    let selection = config.selection(args.page_type, args.page_id.as_deref())?;
    let mut session = open_session(config, selection).await?;

    let applied = session.run_script(&steps).await;
    println!(
        "{} {}/{} steps changed page {}",
        "Applied".bright_blue().bold(),
        applied,
        steps.len(),
        session.selection().page_id
    );
    print_sections(session.sections());

    if args.dry_run {
        println!("{}", "Dry run, nothing saved".dimmed());
        return Ok(());
    }

    if !session.can_save() {
        println!("{}", "Nothing to save".dimmed());
        return Ok(());
    }

    let report = session.save().await;
    for notification in report.notifications() {
        match notification.level {
            NotificationLevel::Success => println!("  {} {}", "✓".green(), notification.message),
            NotificationLevel::Error => println!("  {} {}", "✗".red(), notification.message),
        }
    }

    ensure_saved(&report)
}

/// Fail when any branch failed, even if the other one was saved
fn ensure_saved(report: &SaveReport) -> Result<()> {
    if report.structural.is_failed() {
        anyhow::bail!("publishing header and footer failed");
    }
    if report.sections.is_failed() {
        anyhow::bail!("saving page sections failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_editor::BranchOutcome;
    use pagecraft_server::BackendState;
    use std::fs;

    async fn spawn_backend() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = BackendState::seeded().await;
        tokio::spawn(async move {
            pagecraft_server::serve(listener, state).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn write_script(dir: &tempfile::TempDir, script: &str) -> PathBuf {
        let path = dir.path().join("edits.json");
        fs::write(&path, script).unwrap();
        path
    }

    #[test]
    fn test_partial_save_is_an_error() {
        let report = SaveReport {
            structural: BranchOutcome::Saved,
            sections: BranchOutcome::Failed("404".to_string()),
        };
        assert!(report.succeeded());
        assert!(ensure_saved(&report).is_err());

        let report = SaveReport {
            structural: BranchOutcome::Failed("timeout".to_string()),
            sections: BranchOutcome::Saved,
        };
        assert!(ensure_saved(&report).is_err());
    }

    #[test]
    fn test_saved_or_skipped_branches_pass() {
        let report = SaveReport {
            structural: BranchOutcome::Skipped,
            sections: BranchOutcome::Saved,
        };
        assert!(ensure_saved(&report).is_ok());
    }

    #[tokio::test]
    async fn test_apply_saves_script_to_backend() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(&dir, r#"[{ "op": "toggleVisibility", "id": "hero" }]"#);
        let config = Config {
            backend_url: spawn_backend().await,
            ..Config::default()
        };
        let args = ApplyArgs {
            script,
            page_type: PageType::Home,
            page_id: Some("1".to_string()),
            dry_run: false,
        };

        apply(args, &config).await.unwrap();

        let selection = config.selection(PageType::Home, Some("1")).unwrap();
        let session = open_session(&config, selection).await.unwrap();
        assert!(!session.sections()[0].visible);
    }

    #[tokio::test]
    async fn test_apply_fails_when_sections_cannot_be_saved() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            &dir,
            r#"[{ "op": "addSection", "section": { "id": "faq", "type": "rich-text", "name": "FAQ" } }]"#,
        );
        let config = Config {
            backend_url: spawn_backend().await,
            ..Config::default()
        };
        let args = ApplyArgs {
            script,
            page_type: PageType::Home,
            page_id: Some("999".to_string()),
            dry_run: false,
        };

        assert!(apply(args, &config).await.is_err());
    }
}
