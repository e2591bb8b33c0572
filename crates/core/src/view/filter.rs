//! Search and category filtering.

use crate::store::Torrent;

use super::types::ViewControls;

/// A normalized filter derived from the current view controls.
///
/// A record passes iff the search term is empty or found (case-insensitive)
/// in the name or the joined tags, AND the category is unset or an exact
/// match.
#[derive(Debug, Clone, Default)]
pub struct DisplayFilter {
    /// Lowercased, trimmed search term. Empty matches everything.
    term: String,
    /// Exact category, `None` for "any".
    category: Option<String>,
}

impl DisplayFilter {
    pub fn new(term: &str, category: Option<&str>) -> Self {
        Self {
            term: term.trim().to_lowercase(),
            category: category.map(str::to_string),
        }
    }

    pub fn from_controls(controls: &ViewControls) -> Self {
        Self::new(&controls.search, controls.category.as_deref())
    }

    pub fn matches(&self, torrent: &Torrent) -> bool {
        self.matches_search(torrent) && self.matches_category(torrent)
    }

    fn matches_search(&self, torrent: &Torrent) -> bool {
        if self.term.is_empty() {
            return true;
        }
        if torrent.name.to_lowercase().contains(&self.term) {
            return true;
        }
        torrent
            .tags
            .as_ref()
            .is_some_and(|tags| tags.joined().to_lowercase().contains(&self.term))
    }

    fn matches_category(&self, torrent: &Torrent) -> bool {
        match &self.category {
            None => true,
            Some(category) => torrent.category == *category,
        }
    }
}
