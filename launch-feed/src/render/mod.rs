//! Feed renderer
//!
//! Turns the feed state into a `FeedView` tree, which the text and HTML
//! backends then lay out.

pub mod html;
pub mod text;
pub mod time_ago;

use chrono::{DateTime, Utc};
use launch_common::{LaunchRecord, LaunchStatus};

use crate::feed::state::QueryState;
use crate::feed::visibility::{VisibilityKey, VisibilityMap};

pub use html::{export_html, render_html};
pub use text::render_text;
pub use time_ago::{time_ago, UNIX_EPOCH_TIMESTAMP};

pub const PLACEHOLDER_PATCH_URL: &str = "https://via.placeholder.com/100";
pub const NO_DETAILS_TEXT: &str = "No descriptions yet.";
pub const END_OF_LIST_TEXT: &str = "End of list.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedView {
    pub search_term: String,
    pub cards: Vec<CardView>,
    /// Spinner visible
    pub loading: bool,
    pub end_of_list: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub key: VisibilityKey,
    pub mission_name: String,
    pub status: LaunchStatus,
    /// "View" or "Hide"
    pub toggle_label: &'static str,
    pub detail: Option<DetailView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub relative_time: String,
    pub article_link: Option<String>,
    pub video_link: Option<String>,
    pub patch_url: String,
    pub patch_alt: String,
    pub details: String,
}

/// Build the view for the current state; `now` feeds the relative times.
pub fn build_view(state: &QueryState, visibility: &VisibilityMap, now: DateTime<Utc>) -> FeedView {
    let cards = state
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| build_card(record, index, visibility, now))
        .collect();

    FeedView {
        search_term: state.search_term().to_string(),
        cards,
        loading: state.is_loading(),
        end_of_list: !state.has_more() && !state.is_loading(),
        error: state.error().map(str::to_string),
    }
}

fn build_card(record: &LaunchRecord, index: usize, visibility: &VisibilityMap, now: DateTime<Utc>) -> CardView {
    let key = VisibilityKey::new(record.flight_number, index);
    let visible = visibility.is_visible(key);

    let detail = visible.then(|| DetailView {
        relative_time: time_ago(
            record.launch_date_utc.as_deref().unwrap_or(UNIX_EPOCH_TIMESTAMP),
            now,
        ),
        article_link: record.links.article().map(str::to_string),
        video_link: record.links.video().map(str::to_string),
        patch_url: record
            .links
            .patch()
            .unwrap_or(PLACEHOLDER_PATCH_URL)
            .to_string(),
        patch_alt: format!("{} patch", record.mission_name),
        details: record.details_text().unwrap_or(NO_DETAILS_TEXT).to_string(),
    });

    CardView {
        key,
        mission_name: record.mission_name.clone(),
        status: record.status(),
        toggle_label: if visible { "Hide" } else { "View" },
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::state::FeedAction;
    use launch_common::LaunchLinks;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-16T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn state_with(records: Vec<LaunchRecord>) -> QueryState {
        let mut state = QueryState::new();
        let ticket = state.apply(FeedAction::Mount).unwrap();
        state.apply(FeedAction::FetchSucceeded { ticket, records });
        state
    }

    fn record(flight_number: u64, success: Option<bool>, upcoming: bool) -> LaunchRecord {
        LaunchRecord {
            flight_number,
            mission_name: format!("Mission {}", flight_number),
            launch_date_utc: Some("2026-10-16T11:58:30Z".to_string()),
            launch_success: success,
            upcoming,
            ..Default::default()
        }
    }

    #[test]
    fn test_badges() {
        let state = state_with(vec![
            record(1, Some(true), true),
            record(2, Some(false), true),
            record(3, Some(false), false),
            record(4, None, false),
        ]);
        let view = build_view(&state, &VisibilityMap::new(), now());
        let badges: Vec<_> = view.cards.iter().map(|c| c.status.as_str()).collect();
        assert_eq!(badges, vec!["Success", "Upcoming", "Failed", "Failed"]);
    }

    #[test]
    fn test_hidden_card_has_no_detail() {
        let state = state_with(vec![record(1, Some(true), false)]);
        let view = build_view(&state, &VisibilityMap::new(), now());
        assert_eq!(view.cards[0].toggle_label, "View");
        assert!(view.cards[0].detail.is_none());
    }

    #[test]
    fn test_visible_card_fallbacks() {
        let state = state_with(vec![record(7, Some(true), false)]);
        let mut visibility = VisibilityMap::new();
        visibility.toggle(VisibilityKey::new(7, 0));

        let view = build_view(&state, &visibility, now());
        let card = &view.cards[0];
        assert_eq!(card.toggle_label, "Hide");

        let detail = card.detail.as_ref().unwrap();
        assert_eq!(detail.relative_time, "in a minute");
        assert_eq!(detail.patch_url, PLACEHOLDER_PATCH_URL);
        assert_eq!(detail.patch_alt, "Mission 7 patch");
        assert_eq!(detail.details, NO_DETAILS_TEXT);
        assert!(detail.article_link.is_none());
        assert!(detail.video_link.is_none());
    }

    #[test]
    fn test_null_launch_date_counts_from_epoch() {
        let mut launch = record(8, None, true);
        launch.launch_date_utc = None;
        let state = state_with(vec![launch]);
        let mut visibility = VisibilityMap::new();
        visibility.toggle(VisibilityKey::new(8, 0));

        let view = build_view(&state, &visibility, now());
        // 20742 days: 691 thirty-day months, 57 twelve-month years
        assert_eq!(view.cards[0].detail.as_ref().unwrap().relative_time, "57 years ago");
    }

    #[test]
    fn test_visible_card_links() {
        let mut launch = record(9, Some(true), false);
        launch.links = LaunchLinks {
            article_link: Some("https://example.com/a".into()),
            video_link: Some("https://example.com/v".into()),
            mission_patch_small: Some("https://example.com/p.png".into()),
        };
        launch.details = Some("Went fine.".into());
        let state = state_with(vec![launch]);
        let mut visibility = VisibilityMap::new();
        visibility.toggle(VisibilityKey::new(9, 0));

        let view = build_view(&state, &visibility, now());
        let detail = view.cards[0].detail.as_ref().unwrap();
        assert_eq!(detail.article_link.as_deref(), Some("https://example.com/a"));
        assert_eq!(detail.video_link.as_deref(), Some("https://example.com/v"));
        assert_eq!(detail.patch_url, "https://example.com/p.png");
        assert_eq!(detail.details, "Went fine.");
    }

    #[test]
    fn test_visibility_key_uses_index() {
        let state = state_with(vec![record(5, Some(true), false), record(5, Some(true), false)]);
        let mut visibility = VisibilityMap::new();
        visibility.toggle(VisibilityKey::new(5, 1));

        let view = build_view(&state, &visibility, now());
        assert!(view.cards[0].detail.is_none());
        assert!(view.cards[1].detail.is_some());
    }

    #[test]
    fn test_markers() {
        let mut state = QueryState::new();
        let ticket = state.apply(FeedAction::Mount).unwrap();

        let view = build_view(&state, &VisibilityMap::new(), now());
        assert!(view.loading);
        assert!(!view.end_of_list);

        state.apply(FeedAction::FetchFailed {
            ticket,
            message: "Failed to fetch launches".into(),
        });
        let view = build_view(&state, &VisibilityMap::new(), now());
        assert!(!view.loading);
        assert!(!view.end_of_list);
        assert_eq!(view.error.as_deref(), Some("Failed to fetch launches"));

        let view = build_view(&state_with(vec![]), &VisibilityMap::new(), now());
        assert!(view.end_of_list);
        assert!(view.cards.is_empty());
    }
}
