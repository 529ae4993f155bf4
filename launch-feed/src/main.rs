use launch_feed::command::{FeedCommand, HELP_TEXT};
use launch_feed::config::FeedConfig;
use launch_feed::feed::{LaunchApiClient, LaunchFeed, ScrollMetrics, ScrollWatcher, UiEvent};
use launch_feed::logging;
use launch_feed::render::{self, FeedView};

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};

/// Pixels per rendered text line when reporting scroll positions
const LINE_HEIGHT_PX: u32 = 20;

fn scroll_metrics(view: &FeedView, viewport_height: u32, offset: Option<u32>) -> ScrollMetrics {
    let lines = render::render_text(view).lines().count() as u32;
    let document_height = lines * LINE_HEIGHT_PX;
    ScrollMetrics {
        viewport_height,
        scroll_offset: offset.unwrap_or_else(|| document_height.saturating_sub(viewport_height)),
        document_height,
    }
}

fn print_view(view: &FeedView) {
    println!("{}", "-".repeat(60));
    print!("{}", render::render_text(view));
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = FeedConfig::load()?;

    let _logging_guard = logging::init_logging(&config.log_dir, "launch-feed", &config.log_level)?;
    tracing::info!("Launch feed starting against {}", config.api_url);

    let fetcher = Arc::new(LaunchApiClient::new(&config)?);
    let feed = LaunchFeed::new(fetcher);

    let (events_tx, events_rx) = mpsc::channel(32);
    let (views_tx, mut views_rx) = watch::channel(FeedView::default());
    let (scroll_tx, scroll_rx) = watch::channel(ScrollMetrics::default());

    let feed_task = tokio::spawn(feed.run(events_rx, views_tx));
    let scroll_watcher = ScrollWatcher::spawn(scroll_rx, events_tx.clone());

    println!("{}", HELP_TEXT);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            changed = views_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views_rx.borrow_and_update().clone();
                print_view(&view);
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let view = views_rx.borrow().clone();
                match FeedCommand::parse(&line) {
                    FeedCommand::Search(term) => events_tx.send(UiEvent::Search(term)).await?,
                    FeedCommand::Scroll(offset) => {
                        scroll_tx.send_replace(scroll_metrics(&view, config.viewport_height, offset));
                    }
                    FeedCommand::Toggle(number) => match view.cards.get(number - 1) {
                        Some(card) => events_tx.send(UiEvent::Toggle(card.key)).await?,
                        None => println!("No card {}", number),
                    },
                    FeedCommand::Html(path) => match render::export_html(&view, &path).await {
                        Ok(()) => println!("Saved {}", path.display()),
                        Err(e) => {
                            tracing::error!("HTML export failed: {:#}", e);
                            println!("Export failed: {}", e);
                        }
                    },
                    FeedCommand::Help => println!("{}", HELP_TEXT),
                    FeedCommand::Quit => break,
                    FeedCommand::Invalid(message) => println!("{}", message),
                }
            }
        }
    }

    tracing::info!("Shutting down");
    drop(scroll_watcher);
    drop(events_tx);
    feed_task.await.context("Feed task panicked")?;

    Ok(())
}
