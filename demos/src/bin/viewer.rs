use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::sync::Arc;

use daily_thoughts::ui::FileStorage;
use daily_thoughts::viewer::{Tab, Viewer};
use daily_thoughts_demos::{connect, init_logging, prompt, TerminalDialogs};

#[derive(Parser, Debug)]
#[clap(name = "viewer", version)]
#[clap(about = "Browse the daily thoughts from the terminal", long_about = None)]
struct Cli {
    /// Use a seeded in-memory store instead of Firestore
    #[clap(long)]
    memory: bool,

    /// File holding the local registration flag
    #[clap(long, default_value = ".daily-thoughts/storage.json")]
    storage: PathBuf,

    /// Directory downloads are saved into
    #[clap(long, default_value = "downloads")]
    downloads: PathBuf,

    /// Output debug logs to stderr
    #[clap(long)]
    debug: bool,
}

const HELP: &str = "commands: next | tab home|category|about | filter [category] | download [id] | help | quit";

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
    let storage = FileStorage::open(&cli.storage)?;
    let mut viewer = app.viewer(Arc::new(TerminalDialogs), Box::new(storage));

    viewer.start().await;
    while viewer.modal_visible() {
        println!("Welcome! Tell us who you are.");
        let (Some(name), Some(email)) = (prompt("Name: "), prompt("Email: ")) else {
            return Ok(());
        };
        viewer.submit_registration(&name, &email).await;
    }

    show(&viewer);
    println!("{}", HELP);

    while let Some(line) = prompt("> ") {
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("next"), _) => {
                viewer.next();
                show(&viewer);
            }
            (Some("tab"), Some(name)) => {
                let tab = match name {
                    "home" => Tab::Home,
                    "category" => Tab::Category,
                    "about" => Tab::About,
                    _ => {
                        println!("unknown tab {}", name);
                        continue;
                    }
                };
                viewer.select_tab(tab);
                show(&viewer);
            }
            (Some("filter"), category) => {
                viewer.set_category_filter(category.unwrap_or_default());
                show(&viewer);
            }
            (Some("download"), id) => {
                let download = match id {
                    Some(id) => viewer.download(id),
                    None => viewer.download_current(),
                };
                match download {
                    Some(download) => {
                        let path = download.save_into(&cli.downloads, app.http_client()).await?;
                        println!("saved {}", path.display());
                    }
                    None => println!("nothing downloadable here"),
                }
            }
            (Some("help"), _) => println!("{}", HELP),
            (Some("quit"), _) | (Some("exit"), _) => break,
            (None, _) => {}
            (Some(other), _) => println!("unknown command {:?}; {}", other, HELP),
        }
    }
    Ok(())
}

fn show(viewer: &Viewer) {
    println!("== {} ==", viewer.page_title());
    match viewer.active_tab() {
        Tab::Home => {
            match viewer.carousel().displayed() {
                Some(doc) => println!("[{}] {}", doc.data.category, doc.data.content),
                None => println!("(no thoughts yet)"),
            }
            if viewer.carousel().download_visible() {
                println!("(download available)");
            }
        }
        Tab::Category => {
            println!("filter: {:?}", viewer.category_filter());
            match viewer.filtered() {
                Some(view) if !view.cards().is_empty() => {
                    for doc in view.cards() {
                        let marker = if doc.data.is_downloadable() { " [download]" } else { "" };
                        println!("{}  [{}] {}{}", doc.id, doc.data.category, doc.data.content, marker);
                    }
                }
                _ => println!("No thoughts available."),
            }
        }
        Tab::About => match viewer.about() {
            Some(about) => {
                for (label, text) in about.fields() {
                    println!("{:<12} {}", label, text);
                }
            }
            None => println!("(no app details)"),
        },
    }
}
