use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use news_core::{
    AppConfig, FileStorage, NewsDraft, NewsItem, NewsPatch, NewsService, NewsState,
    Notification, NotificationLevel, Notifier, StoredNewsRepository, init_logging,
};

#[derive(Parser, Debug)]
#[command(name = "news", about = "Manage the news feed")]
struct Cli {
    /// Directory holding the news collection (overrides NEWS_DATA_DIR).
    #[clap(short, long)]
    data_dir: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Get {
        id: String,
    },
    Create {
        #[clap(long)]
        title: String,
        #[clap(long)]
        content: String,
        #[clap(long)]
        image_url: String,
        #[clap(long)]
        publication_date: Option<DateTime<Utc>>,
    },
    Update {
        id: String,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        content: Option<String>,
        #[clap(long)]
        image_url: Option<String>,
        #[clap(long)]
        publication_date: Option<DateTime<Utc>>,
    },
    Delete {
        id: String,
    },
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => println!("{}", notification.message),
            NotificationLevel::Failure => eprintln!("error: {}", notification.message),
        }
    }
}

fn print_item(item: &NewsItem) {
    println!(
        "- [{}] {} (published {}, updated {})",
        item.id,
        item.title,
        item.publication_date.to_rfc3339(),
        item.updated_at.to_rfc3339()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_logging("warn");
    let args = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    let repo = StoredNewsRepository::new(FileStorage::new(&config.data_dir))
        .with_key(config.storage_key.clone())
        .with_latency(config.latency);
    let state = NewsState::with_notifier(
        NewsService::new(Arc::new(repo)),
        Arc::new(ConsoleNotifier),
    );

    let ok = match args.command {
        Command::List => {
            let ok = state.fetch_all().await;
            if ok {
                let news = state.news();
                println!("News ({})", news.len());
                for item in &news {
                    print_item(item);
                }
            }
            ok
        }
        Command::Get { id } => match state.get_by_id(&id).await.into_result() {
            Ok(item) => {
                print_item(&item);
                println!("  image: {}", item.image_url);
                println!("  created: {}", item.created_at.to_rfc3339());
                println!();
                println!("{}", item.content);
                true
            }
            Err(_) => false,
        },
        Command::Create {
            title,
            content,
            image_url,
            publication_date,
        } => {
            let draft = NewsDraft {
                title,
                content,
                image_url,
                publication_date,
            };
            let ok = state.create(draft).await;
            if ok {
                if let Some(item) = state.news().last() {
                    println!("{item}");
                }
            }
            ok
        }
        Command::Update {
            id,
            title,
            content,
            image_url,
            publication_date,
        } => {
            let patch = NewsPatch {
                title,
                content,
                image_url,
                publication_date,
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update: pass at least one field");
            }
            state.update(&id, patch).await
        }
        Command::Delete { id } => state.delete(&id).await,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
