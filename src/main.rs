use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cafevibe::{
    app::Session,
    config::Config,
    errors::StoreError,
    map::RecordingPort,
    share::{share_summary, ShareOutcome},
};

#[derive(Parser)]
#[command(name = "cafevibe")]
#[command(version)]
#[command(about = "Personal cafe catalogue: pins, tasting notes and photos")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the catalogue the way the sidebar shows it (newest first)
    List {
        /// Case-insensitive filter over name and address
        #[arg(short, long, default_value = "")]
        filter: String,
    },
    /// Print one record as its share summary
    Show { id: String },
    /// Add a custom pin
    Add {
        name: String,
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lng: f64,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Delete a record by id
    Remove { id: String },
    /// Normalize a photo file and attach it to a record
    Photo { id: String, file: PathBuf },
    /// Share a record through the outlet cascade
    Share { id: String },
    /// Query the place-search endpoint
    Search { query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("cafevibe={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load_from_file(&cli.config)?;
    let mut session = Session::from_config(&config, Box::new(RecordingPort::new()))?;
    session.init().await;

    match cli.command {
        Command::List { filter } => {
            for cafe in session.store().sidebar(&filter) {
                println!("{}  {}  ({})", cafe.id, cafe.name, cafe.address);
            }
            println!("共收藏 {} 間咖啡廳", session.store().len());
        }
        Command::Show { id } => match session.store().get(&id) {
            Some(cafe) => println!("{}", share_summary(cafe)),
            None => println!("no record with id {id}"),
        },
        Command::Add {
            name,
            lat,
            lng,
            address,
            note,
        } => {
            let mut draft = session.draft_custom(lat, lng);
            draft.name = name;
            draft.address = address;
            draft.item_note = note;
            let id = draft.id.clone();
            surface_flush(session.save(draft, true).await);
            println!("added {id}");
        }
        Command::Remove { id } => {
            surface_flush(session.delete(&id).await);
        }
        Command::Photo { id, file } => match session.store().get(&id).cloned() {
            Some(mut cafe) => {
                if session.attach_photo(&mut cafe, &file).await {
                    surface_flush(session.save(cafe, false).await);
                    println!("photo attached to {id}");
                } else {
                    println!("photo not attached: file did not decode as an image");
                }
            }
            None => println!("no record with id {id}"),
        },
        Command::Share { id } => match session.share(&id).await {
            Ok(ShareOutcome::Delivered { outlet }) => {
                println!("shared via {outlet}");
            }
            Ok(ShareOutcome::Cancelled) => {}
            Err(e) => println!("無法分享：{e}"),
        },
        Command::Search { query } => match session.search_places(&query).await {
            Some(candidates) if candidates.is_empty() => println!("no candidates"),
            Some(candidates) => {
                for c in candidates {
                    println!("{}  {}  ({:.4}, {:.4})", c.external_id, c.address, c.lat, c.lng);
                }
            }
            None => {}
        },
    }

    Ok(())
}

/// A failed flush keeps the in-memory change; tell the user to free space
/// rather than treating it as fatal.
fn surface_flush(result: Result<(), StoreError>) {
    if let Err(e) = result {
        warn!(error = %e, "flush failed");
        println!("儲存空間不足，無法儲存更多資料（可能是照片太多）。請嘗試刪除一些舊紀錄。");
    }
}
