use clap::{Parser, Subcommand};
use log::error;
use std::sync::Arc;

use daily_thoughts::admin::{AdminConsole, ContentCell, TableState};
use daily_thoughts_demos::{connect, init_logging, TerminalDialogs};

#[derive(Parser, Debug)]
#[clap(name = "admin", version)]
#[clap(about = "Curate thoughts, app details and the daily content", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// Use a seeded in-memory store instead of Firestore
    #[clap(long)]
    memory: bool,

    /// Output debug logs to stderr
    #[clap(long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the users and thoughts tables and the current forms
    List,
    /// Add a thought
    AddThought {
        /// `text` or `images`
        #[clap(long)]
        category: String,
        /// Text, or an image URL for `images`
        #[clap(long)]
        content: String,
        /// Let viewers download it
        #[clap(long)]
        downloadable: bool,
    },
    /// Delete a registered user
    DeleteUser { id: String },
    /// Delete a thought
    DeleteThought { id: String },
    /// Overwrite the app details
    AppInfo {
        #[clap(long)]
        developer: String,
        #[clap(long)]
        min_os: String,
        #[clap(long)]
        build_number: String,
        /// Three dot-separated numbers, e.g. 1.0.0
        #[clap(long)]
        version: String,
    },
    /// Publish today's quote, tip and achievement
    Publish {
        #[clap(long, default_value = "")]
        quote: String,
        #[clap(long, default_value = "")]
        author: String,
        #[clap(long, default_value = "")]
        tip: String,
        #[clap(long, default_value = "")]
        achievement: String,
        #[clap(long, default_value = "")]
        milestone: String,
        /// soft, dark, ocean, sunset, forest or custom
        #[clap(long, default_value = "")]
        theme: String,
        /// Background image for the custom theme
        #[clap(long, default_value = "")]
        custom_url: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let app = connect(cli.memory).await?;
    let mut admin = app.admin(Arc::new(TerminalDialogs));
    admin.load().await;

    match cli.command {
        Commands::List => {}
        Commands::AddThought {
            category,
            content,
            downloadable,
        } => {
            admin.select_thought_category(&category);
            admin.set_thought_content(&content);
            admin.set_thought_downloadable(downloadable);
            println!("preview: {}", admin.thought_preview().to_html());
            admin.submit_thought().await;
        }
        Commands::DeleteUser { id } => {
            admin.delete_user(&id).await;
        }
        Commands::DeleteThought { id } => {
            admin.delete_thought(&id).await;
        }
        Commands::AppInfo {
            developer,
            min_os,
            build_number,
            version,
        } => {
            let form = admin.app_info_form_mut();
            form.developer = developer;
            form.min_os = min_os;
            form.build_number = build_number;
            form.version = version;
            admin.submit_app_info().await;
        }
        Commands::Publish {
            quote,
            author,
            tip,
            achievement,
            milestone,
            theme,
            custom_url,
        } => {
            admin.edit_daily_content(|form| {
                form.quote = quote;
                form.quote_author = author;
                form.tip = tip;
                form.achievement = achievement;
                form.milestone = milestone;
                form.theme = theme;
                form.custom_theme_url = custom_url;
            });
            let preview = admin.daily_preview();
            println!("preview ({}): {}", preview.style(), preview.to_html());
            admin.submit_daily_content().await;
        }
    }

    print_console(&admin);
    Ok(())
}

fn print_console(admin: &AdminConsole) {
    println!("== Users ==");
    match admin.users() {
        TableState::Rows(rows) => {
            for row in rows {
                println!("{:<10} {:<24} {:<32} {}", row.short_id, row.name, row.email, row.delete.id);
            }
        }
        other => println!("{}", other.message().unwrap_or_default()),
    }

    println!("== Thoughts ==");
    match admin.thoughts() {
        TableState::Rows(rows) => {
            for row in rows {
                let content = match &row.content {
                    ContentCell::Thumbnail(url) => format!("<image {}>", url),
                    ContentCell::Text(text) => text.clone(),
                };
                println!("{:<6} {:<12} {:<56} {}", row.kind, row.category, content, row.delete.id);
            }
        }
        other => println!("{}", other.message().unwrap_or_default()),
    }

    let info = admin.app_info_form();
    println!("== App info ==");
    println!(
        "developer={:?} minOS={:?} buildNumber={:?} version={:?}",
        info.developer, info.min_os, info.build_number, info.version
    );

    let daily = admin.daily_form();
    println!("== Daily content ==");
    println!("theme={:?} milestone={:?}", daily.theme, daily.milestone);
    println!("{}", admin.daily_preview().to_html());
}

