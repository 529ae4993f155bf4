use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::controller::UiEvent;

/// Distance from the bottom, in pixels, at which the next page is requested
pub const LOAD_THRESHOLD: u32 = 100;

/// Viewport position, all values in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    pub viewport_height: u32,
    pub scroll_offset: u32,
    pub document_height: u32,
}

impl ScrollMetrics {
    pub fn near_bottom(&self) -> bool {
        self.viewport_height.saturating_add(self.scroll_offset)
            >= self.document_height.saturating_sub(LOAD_THRESHOLD)
    }
}

/// Whether a scroll event should turn into a next-page intent
pub fn should_load_more(metrics: &ScrollMetrics, loading: bool, has_more: bool) -> bool {
    metrics.near_bottom() && !loading && has_more
}

/// Forwards scroll positions to the feed for as long as it is alive.
///
/// Dropping the watcher stops the forwarding task.
pub struct ScrollWatcher {
    handle: JoinHandle<()>,
}

impl ScrollWatcher {
    pub fn spawn(mut metrics: watch::Receiver<ScrollMetrics>, events: mpsc::Sender<UiEvent>) -> Self {
        let handle = tokio::spawn(async move {
            while metrics.changed().await.is_ok() {
                let current = *metrics.borrow_and_update();
                if events.send(UiEvent::Scrolled(current)).await.is_err() {
                    break;
                }
            }
            tracing::debug!("Scroll watcher stopped");
        });

        Self { handle }
    }
}

impl Drop for ScrollWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
