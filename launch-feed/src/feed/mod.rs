//! The launch feed component: query state, fetching, scroll handling and
//! detail visibility.

pub mod controller;
pub mod fetcher;
pub mod scroll;
pub mod state;
pub mod visibility;

pub use controller::{LaunchFeed, UiEvent};
pub use fetcher::{FetchError, Fetcher, LaunchApiClient, FETCH_FAILED_MESSAGE};
pub use scroll::{ScrollMetrics, ScrollWatcher};
pub use state::{FeedAction, FetchTicket, QueryState};
pub use visibility::{VisibilityKey, VisibilityMap};
