mod app;
mod arena;
mod browse;
mod config;
mod input;
mod playback;
mod player;
mod view;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tiny-player", version, about = "Play audio playlists hosted as channels")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Browse and play interactively (default).
    Play,
    /// Print the number of playlists in the playlist channel.
    Count,
    /// List playlists (headless).
    Channels {
        /// Only show playlists whose "owner / title" contains this text.
        #[arg(long)]
        search: Option<String>,
        /// Fetch a single page instead of the whole list.
        #[arg(long)]
        page: Option<usize>,
    },
    /// Print a playlist's tracks (headless).
    Playlist {
        slug: String,
    },
    /// Dump a raw channel JSON to stdout (headless).
    ChannelJson {
        slug: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tiny_player=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            let mut app = app::App::new(cfg)?;
            app.run().await?;
        }
        Command::Count => {
            let client = make_client(&cfg)?;
            let count = client.get_item_count().await?;
            let pages = browse::pagination::page_count(count, cfg.api.per_page);
            println!("{count} playlists ({pages} pages of {})", cfg.api.per_page);
        }
        Command::Channels { search, page } => {
            let client = make_client(&cfg)?;
            let items = match page {
                Some(page) => {
                    let count = client.get_item_count().await?;
                    let max = browse::pagination::page_count(count, cfg.api.per_page);
                    let page = browse::pagination::resolve_intent(
                        browse::PageIntent::Page(page),
                        1,
                        max,
                    );
                    println!("page {page}/{max}");
                    client
                        .get_paginated_contents(client.playlist_channel(), page, cfg.api.per_page)
                        .await?
                }
                None => {
                    let mut all = client.get_channel_contents(None).await?;
                    all.reverse();
                    all
                }
            };
            let items = match search.as_deref() {
                Some(q) => browse::search::filter(&items, q),
                None => items,
            };
            view::print_playlists(&items);
        }
        Command::Playlist { slug } => {
            let client = make_client(&cfg)?;
            let playlist = client.get_full_channel(&slug).await?;
            view::print_tracks(&playlist, None);
        }
        Command::ChannelJson { slug } => {
            let client = make_client(&cfg)?;
            let v = client.get_channel_raw(&slug).await?;
            println!("{}", serde_json::to_string_pretty(&v)?);
        }
    }

    Ok(())
}

fn make_client(cfg: &config::Config) -> anyhow::Result<arena::api::ArenaClient> {
    arena::api::ArenaClient::new(&cfg.api.base_url, &cfg.api.playlist_channel)
}
