use std::collections::HashMap;

/// Identifies one card: flight number plus its position in the list.
///
/// The same flight may appear more than once across pages, so the index is
/// part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibilityKey {
    pub flight_number: u64,
    pub index: usize,
}

impl VisibilityKey {
    pub fn new(flight_number: u64, index: usize) -> Self {
        Self { flight_number, index }
    }
}

/// Which cards currently show their detail panel
#[derive(Debug, Clone, Default)]
pub struct VisibilityMap {
    entries: HashMap<VisibilityKey, bool>,
}

impl VisibilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, key: VisibilityKey) -> bool {
        self.entries.get(&key).copied().unwrap_or(false)
    }

    /// Flip one entry and return its new value
    pub fn toggle(&mut self, key: VisibilityKey) -> bool {
        let entry = self.entries.entry(key).or_insert(false);
        *entry = !*entry;
        tracing::debug!("Card {}-{} visible: {}", key.flight_number, key.index, *entry);
        *entry
    }
}
