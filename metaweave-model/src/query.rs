use crate::media_type::MediaType;

/// A free-text catalog search restricted to one media type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchQuery {
    pub search_query: String,
    pub media_type: MediaType,
}

impl SearchQuery {
    pub fn new(search_query: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            search_query: search_query.into(),
            media_type,
        }
    }

    pub fn trimmed(&self) -> &str {
        self.search_query.trim()
    }

    /// Two queries hit the same cache slot when the type matches and the
    /// text matches after trimming. Case is significant.
    pub fn same_search(&self, other: &SearchQuery) -> bool {
        self.media_type == other.media_type && self.trimmed() == other.trimmed()
    }
}
