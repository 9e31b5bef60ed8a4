//! StockDesk shell entry point.
//!
//! Usage: `stockdesk-desktop [PATH] [DOCUMENT_JSON]`
//!
//! Resolves `PATH` (default: the configured home path) against the persisted
//! session and prints the resulting screen as JSON. When the screen is a
//! document detail and `DOCUMENT_JSON` names a document file, the detail view
//! model is printed as well.

use std::sync::Arc;

use anyhow::Context;
use serde_json::json;

use stockdesk_auth::StoredSession;
use stockdesk_desktop::{FileSessionStore, Shell, ShellConfig};
use stockdesk_documents::StockDocument;

fn main() -> anyhow::Result<()> {
    stockdesk_observability::init();

    let config = ShellConfig::from_env().context("failed to load shell configuration")?;
    tracing::info!(session_file = %config.session_file.display(), "starting shell");

    let store = Arc::new(FileSessionStore::new(config.session_file.clone()));
    let mut shell = Shell::new(StoredSession::new(store), &config);

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| config.home_path.clone());
    let document_file = args.next();

    let screen = shell
        .navigate(&path)
        .with_context(|| format!("failed to navigate to '{path}'"))?
        .clone();

    let detail = match document_file {
        Some(file) => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read document file {file}"))?;
            let doc = StockDocument::from_json(&raw)
                .with_context(|| format!("failed to parse document file {file}"))?;
            shell.detail_for(&doc)
        }
        None => None,
    };

    let output = json!({
        "screen": screen,
        "history": shell.history().entries(),
        "detail": detail,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
