pub mod apply;
pub mod init;
pub mod serve;
pub mod show;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use serve::{serve, ServeArgs};
pub use show::{show, ShowArgs};

use crate::config::Config;
use colored::Colorize;
use pagecraft_client::HttpBackend;
use pagecraft_common::{PageSelection, Section};
use pagecraft_editor::{Collaborators, EditorSession, SessionOptions};
use std::sync::Arc;

/// Open and initialize an editor session against the configured backend
pub async fn open_session(config: &Config, selection: PageSelection) -> anyhow::Result<EditorSession> {
    tracing::debug!(backend = %config.backend_url, page = %selection.page_id, "opening session");
    let backend = Arc::new(HttpBackend::new(config.backend_url.clone())?);
    let options = SessionOptions {
        company_id: config.company_id.clone(),
        history_depth: config.history_depth,
    };

    let mut session = EditorSession::new(Collaborators::from_backend(backend), options, selection);
    session.initialize().await;
    Ok(session)
}

pub fn print_sections(sections: &[Section]) {
    if sections.is_empty() {
        println!("  {}", "(no sections)".dimmed());
        return;
    }

    for section in sections {
        let visibility = if section.visible {
            "visible".green()
        } else {
            "hidden".yellow()
        };
        let section_type = serde_json::to_value(section.section_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        println!(
            "  {:>3}  {:<24} {:<22} {:<8} {}",
            section.sort_order,
            section.id.bright_white(),
            section_type,
            visibility,
            section.name.dimmed()
        );
    }
}
