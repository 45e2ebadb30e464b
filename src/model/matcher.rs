// Logic for checking if events match a free-text search query.
//
// A query matches when its lowercase form is a substring of the lowercased
// title, the lowercased location, or any lowercased tag. Absent fields never
// match. The query is used as typed: no trimming and no tokenization.

use crate::model::event::Event;

fn contains_folded(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle_lower))
}

impl Event {
    /// Returns true when the (already lowercased) query hits title, location or a tag.
    pub fn matches_lowered_query(&self, query_lower: &str) -> bool {
        contains_folded(self.title.as_deref(), query_lower)
            || contains_folded(self.location.as_deref(), query_lower)
            || self
                .tags
                .as_ref()
                .is_some_and(|tags| tags.iter().any(|t| t.to_lowercase().contains(query_lower)))
    }

    /// Case-insensitive substring search. An empty query matches everything.
    pub fn matches_search_term(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.matches_lowered_query(&query.to_lowercase())
    }
}
