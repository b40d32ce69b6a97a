//! Keyword matching strategies.

/// How a source credits configured keywords to a record.
///
/// Matching is case-insensitive substring containment either way; the
/// strategies differ only in how many keywords one record may be credited
/// with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// The first keyword (in configured order) found in the text wins; at
    /// most one mention per record. Used by the Reddit and Twitter
    /// collectors.
    FirstWins,
    /// Every keyword found produces its own candidate mention, one per
    /// (record, keyword) pair. Used by the Bluesky collector, whose search
    /// iterates keywords outer; the deduplicator reconciles the resulting
    /// duplicates.
    PerKeyword,
}

impl MatchStrategy {
    /// The keywords credited for `text`, in configured order.
    #[must_use]
    pub fn credit<'k>(self, text: &str, keywords: &'k [String]) -> Vec<&'k str> {
        let haystack = text.to_lowercase();
        let mut credited = Vec::new();
        for keyword in keywords {
            if haystack.contains(&keyword.to_lowercase()) {
                credited.push(keyword.as_str());
                if self == MatchStrategy::FirstWins {
                    break;
                }
            }
        }
        credited
    }
}
