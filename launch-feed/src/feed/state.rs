use launch_common::{LaunchRecord, PAGE_SIZE};

/// Identifies one outstanding page request.
///
/// A completion is only applied when its generation and page still match the
/// session that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub page: u32,
    pub search_term: String,
}

/// Inputs to [`QueryState::apply`]
#[derive(Debug)]
pub enum FeedAction {
    /// Initial load for the empty search term
    Mount,
    SearchChanged(String),
    NextPage,
    FetchSucceeded {
        ticket: FetchTicket,
        records: Vec<LaunchRecord>,
    },
    FetchFailed {
        ticket: FetchTicket,
        message: String,
    },
}

/// View state of the launch feed
#[derive(Debug, Clone)]
pub struct QueryState {
    search_term: String,
    page: u32,
    records: Vec<LaunchRecord>,
    has_more: bool,
    loading: bool,
    error: Option<String>,
    generation: u64,
    mounted: bool,
    /// The last request for `page` failed; the next page intent retries it
    retry_page: bool,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            page: 0,
            records: Vec::new(),
            has_more: true,
            loading: false,
            error: None,
            generation: 0,
            mounted: false,
            retry_page: false,
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply one action. Returns the request to issue, if any.
    pub fn apply(&mut self, action: FeedAction) -> Option<FetchTicket> {
        match action {
            FeedAction::Mount => {
                if self.mounted {
                    return None;
                }
                self.mounted = true;
                self.request_page()
            }
            FeedAction::SearchChanged(term) => {
                if self.mounted && term == self.search_term {
                    return None;
                }
                self.mounted = true;
                self.reset(term);
                self.request_page()
            }
            FeedAction::NextPage => {
                if !self.mounted || !self.has_more || self.loading {
                    return None;
                }
                if self.retry_page {
                    self.retry_page = false;
                } else {
                    self.page += 1;
                }
                self.request_page()
            }
            FeedAction::FetchSucceeded { ticket, records } => {
                if !self.is_current(&ticket) {
                    tracing::debug!(
                        "Discarding stale page {} of generation {} (current generation {})",
                        ticket.page,
                        ticket.generation,
                        self.generation
                    );
                    return None;
                }
                self.has_more = records.len() == PAGE_SIZE;
                self.records.extend(records);
                self.loading = false;
                self.error = None;
                None
            }
            FeedAction::FetchFailed { ticket, message } => {
                if !self.is_current(&ticket) {
                    tracing::debug!(
                        "Discarding stale failure for page {} of generation {}",
                        ticket.page,
                        ticket.generation
                    );
                    return None;
                }
                self.error = Some(message);
                self.loading = false;
                self.retry_page = true;
                None
            }
        }
    }

    /// Start a new session for `term`
    fn reset(&mut self, term: String) {
        self.search_term = term;
        self.records.clear();
        self.page = 0;
        self.has_more = true;
        self.loading = false;
        self.retry_page = false;
        self.generation += 1;
    }

    fn request_page(&mut self) -> Option<FetchTicket> {
        if !self.has_more {
            return None;
        }
        self.loading = true;
        Some(FetchTicket {
            generation: self.generation,
            page: self.page,
            search_term: self.search_term.clone(),
        })
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.loading && ticket.generation == self.generation && ticket.page == self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize, first_flight: u64) -> Vec<LaunchRecord> {
        (0..n as u64)
            .map(|i| LaunchRecord {
                flight_number: first_flight + i,
                mission_name: format!("Mission {}", first_flight + i),
                ..Default::default()
            })
            .collect()
    }

    fn succeed(state: &mut QueryState, ticket: FetchTicket, n: usize) {
        let first = ticket.page as u64 * PAGE_SIZE as u64;
        state.apply(FeedAction::FetchSucceeded {
            ticket,
            records: records(n, first),
        });
    }

    #[test]
    fn test_mount_requests_first_page_once() {
        let mut state = QueryState::new();
        let ticket = state.apply(FeedAction::Mount).unwrap();
        assert_eq!(ticket.page, 0);
        assert_eq!(ticket.search_term, "");
        assert!(state.is_loading());
        assert!(state.apply(FeedAction::Mount).is_none());
    }

    #[test]
    fn test_search_change_resets_before_fetch() {
        let mut state = QueryState::new();
        let ticket = state.apply(FeedAction::Mount).unwrap();
        succeed(&mut state, ticket, PAGE_SIZE);
        let ticket = state.apply(FeedAction::NextPage).unwrap();
        succeed(&mut state, ticket, 3);
        assert_eq!(state.records().len(), 13);
        assert!(!state.has_more());

        let ticket = state.apply(FeedAction::SearchChanged("Falcon".into())).unwrap();
        assert_eq!(ticket.page, 0);
        assert_eq!(ticket.search_term, "Falcon");
        assert!(state.records().is_empty());
        assert_eq!(state.page(), 0);
        assert!(state.has_more());
    }

    #[test]
    fn test_same_search_term_is_noop() {
        let mut state = QueryState::new();
        state.apply(FeedAction::SearchChanged("Falcon".into())).unwrap();
        let generation = state.generation();
        assert!(state.apply(FeedAction::SearchChanged("Falcon".into())).is_none());
        assert_eq!(state.generation(), generation);
    }

    #[test]
    fn test_full_page_keeps_has_more_short_page_exhausts() {
        let mut state = QueryState::new();
        let ticket = state.apply(FeedAction::Mount).unwrap();
        succeed(&mut state, ticket, PAGE_SIZE);
        assert!(state.has_more());

        let ticket = state.apply(FeedAction::NextPage).unwrap();
        assert_eq!(ticket.page, 1);
        succeed(&mut state, ticket, 7);
        assert!(!state.has_more());

        assert!(state.apply(FeedAction::NextPage).is_none());
        assert_eq!(state.page(), 1);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_next_page_ignored_while_loading() {
        let mut state = QueryState::new();
        state.apply(FeedAction::Mount).unwrap();
        assert!(state.apply(FeedAction::NextPage).is_none());
        assert_eq!(state.page(), 0);
    }

    #[test]
    fn test_falcon_scenario() {
        let mut state = QueryState::new();
        let ticket = state.apply(FeedAction::SearchChanged("Falcon".into())).unwrap();
        succeed(&mut state, ticket, 10);
        assert!(state.has_more());

        let ticket = state.apply(FeedAction::NextPage).unwrap();
        assert_eq!(ticket.page, 1);
        succeed(&mut state, ticket, 4);

        assert!(!state.has_more());
        assert!(!state.is_loading());
        assert_eq!(state.records().len(), 14);
        assert_eq!(state.records()[13].flight_number, 13);
    }

    #[test]
    fn test_failure_keeps_records_and_retries_same_page() {
        let mut state = QueryState::new();
        let ticket = state.apply(FeedAction::Mount).unwrap();
        succeed(&mut state, ticket, PAGE_SIZE);

        let ticket = state.apply(FeedAction::NextPage).unwrap();
        state.apply(FeedAction::FetchFailed {
            ticket,
            message: "Failed to fetch launches".into(),
        });
        assert_eq!(state.error(), Some("Failed to fetch launches"));
        assert_eq!(state.records().len(), PAGE_SIZE);
        assert!(state.has_more());
        assert!(!state.is_loading());

        let retry = state.apply(FeedAction::NextPage).unwrap();
        assert_eq!(retry.page, 1);
        succeed(&mut state, retry, 2);
        assert_eq!(state.error(), None);
        assert_eq!(state.records().len(), PAGE_SIZE + 2);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut state = QueryState::new();
        let stale = state.apply(FeedAction::SearchChanged("Falcon".into())).unwrap();
        let current = state.apply(FeedAction::SearchChanged("Starlink".into())).unwrap();

        succeed(&mut state, stale.clone(), PAGE_SIZE);
        assert!(state.records().is_empty());
        assert!(state.is_loading());

        state.apply(FeedAction::FetchFailed {
            ticket: stale,
            message: "Failed to fetch launches".into(),
        });
        assert_eq!(state.error(), None);

        succeed(&mut state, current, 2);
        assert_eq!(state.records().len(), 2);
        assert_eq!(state.search_term(), "Starlink");
    }

    #[test]
    fn test_duplicate_completion_is_discarded() {
        let mut state = QueryState::new();
        let ticket = state.apply(FeedAction::Mount).unwrap();
        succeed(&mut state, ticket.clone(), PAGE_SIZE);
        succeed(&mut state, ticket, PAGE_SIZE);
        assert_eq!(state.records().len(), PAGE_SIZE);
    }
}
