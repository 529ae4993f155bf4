use chrono::Utc;
use launch_common::LaunchRecord;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use super::fetcher::{FetchError, Fetcher};
use super::scroll;
use super::scroll::ScrollMetrics;
use super::state::{FeedAction, FetchTicket, QueryState};
use super::visibility::{VisibilityKey, VisibilityMap};
use crate::render::{build_view, FeedView};

/// User interaction delivered to the feed
#[derive(Debug, Clone)]
pub enum UiEvent {
    Search(String),
    Scrolled(ScrollMetrics),
    Toggle(VisibilityKey),
}

type Completion = (FetchTicket, Result<Vec<LaunchRecord>, FetchError>);

/// The launch feed component.
///
/// Owns the query state and visibility map; fetches run as spawned tasks and
/// report back through an internal channel, so every state change happens on
/// the task that drives the feed.
pub struct LaunchFeed {
    state: QueryState,
    visibility: VisibilityMap,
    fetcher: Arc<dyn Fetcher>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl LaunchFeed {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            state: QueryState::new(),
            visibility: VisibilityMap::new(),
            fetcher,
            completion_tx,
            completion_rx,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    /// Issue the initial page-0 request
    pub fn mount(&mut self) {
        self.dispatch(FeedAction::Mount);
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Search(term) => {
                tracing::info!("Search term changed to {:?}", term);
                self.dispatch(FeedAction::SearchChanged(term));
            }
            UiEvent::Scrolled(metrics) => {
                if scroll::should_load_more(&metrics, self.state.is_loading(), self.state.has_more()) {
                    self.dispatch(FeedAction::NextPage);
                }
            }
            UiEvent::Toggle(key) => {
                self.visibility.toggle(key);
            }
        }
    }

    /// Wait for the next fetch to finish and apply it.
    ///
    /// Stale completions are consumed too; they just leave the state alone.
    pub async fn settle(&mut self) {
        if let Some((ticket, result)) = self.completion_rx.recv().await {
            self.complete(ticket, result);
        }
    }

    pub fn view(&self) -> FeedView {
        build_view(&self.state, &self.visibility, Utc::now())
    }

    /// Drive the feed until the event channel closes, publishing a fresh view
    /// after every change.
    pub async fn run(mut self, mut events: mpsc::Receiver<UiEvent>, views: watch::Sender<FeedView>) {
        self.mount();
        views.send_replace(self.view());

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                Some((ticket, result)) = self.completion_rx.recv() => {
                    self.complete(ticket, result);
                }
            }
            views.send_replace(self.view());
        }

        tracing::info!("Launch feed stopped");
    }

    fn dispatch(&mut self, action: FeedAction) {
        if let Some(ticket) = self.state.apply(action) {
            self.spawn_fetch(ticket);
        }
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        tracing::info!(
            "Loading page {} for {:?} (generation {})",
            ticket.page,
            ticket.search_term,
            ticket.generation
        );

        let fetcher = self.fetcher.clone();
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch(&ticket.search_term, ticket.page).await;
            let _ = completion_tx.send((ticket, result));
        });
    }

    fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<LaunchRecord>, FetchError>) {
        let action = match result {
            Ok(records) => FeedAction::FetchSucceeded { ticket, records },
            Err(e) => {
                tracing::warn!("Page {} for {:?} failed: {}", ticket.page, ticket.search_term, e);
                FeedAction::FetchFailed {
                    message: e.user_message().to_string(),
                    ticket,
                }
            }
        };
        self.dispatch(action);
    }
}
