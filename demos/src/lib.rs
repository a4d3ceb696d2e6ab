//! Shared plumbing for the terminal front ends.

use anyhow::Context;
use log::info;
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use daily_thoughts::config::FirebaseConfig;
use daily_thoughts::models::{APP_INFO, APP_INFO_KEY, THOUGHTS};
use daily_thoughts::store::{DocumentStore, MemoryStore};
use daily_thoughts::ui::Dialogs;
use daily_thoughts::DailyThoughts;

/// `alert`/`confirm` on the terminal.
pub struct TerminalDialogs;

impl Dialogs for TerminalDialogs {
    fn alert(&self, message: &str) {
        println!("[alert] {}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        let answer = prompt(&format!("{} [y/N] ", message)).unwrap_or_default();
        matches!(answer.to_lowercase().as_str(), "y" | "yes")
    }
}

/// Print `label` and read one trimmed line; `None` at end of input.
pub fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    io::stdout().flush().ok()?;

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Connect to Firestore from `FIREBASE_*` variables (a `.env` file is read
/// first), or to a seeded in-process store.
pub async fn connect(memory: bool) -> anyhow::Result<DailyThoughts> {
    dotenv::dotenv().ok();

    if memory {
        let store = Arc::new(MemoryStore::new());
        seed(store.as_ref()).await?;
        info!("using the in-memory store");
        let config = FirebaseConfig::new("memory", "local")?;
        return Ok(DailyThoughts::with_store(config, store));
    }

    let app = DailyThoughts::from_env().context("failed to configure the Firestore client")?;
    info!(
        "using Firestore project {} ({})",
        app.config.project_id, app.options.database_id
    );
    Ok(app)
}

async fn seed(store: &dyn DocumentStore) -> anyhow::Result<()> {
    let thoughts = [
        json!({ "type": "text", "category": "motivation", "content": "Small steps every day." }),
        json!({ "type": "text", "category": "tips", "content": "Drink a glass of water first thing.", "downloadable": true }),
        json!({ "type": "image", "category": "images", "content": "https://picsum.photos/seed/sunrise/600/400", "downloadable": true }),
    ];
    for thought in thoughts {
        store.add(THOUGHTS, thought).await?;
    }
    store
        .set(
            APP_INFO,
            APP_INFO_KEY,
            json!({ "developer": "Daily Thoughts Team", "minOS": "Android 8.0", "buildNumber": "1", "version": "1.0.0" }),
        )
        .await?;
    Ok(())
}

/// Initialize logging; `--debug` raises the default level.
pub fn init_logging(debug: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    } else if debug {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}
