//! Identity-based deduplication.

use std::collections::HashSet;

use mentionbot_core::{Mention, Platform};

/// Collapse repeated identities to their first occurrence, preserving order.
///
/// Keys on `(platform, id)`: identifiers are only unique within a platform,
/// so a bare-id key could collapse unrelated records across platforms. A
/// mention with an empty id is always kept; empty ids are never treated as
/// duplicates of each other. Single linear pass.
#[must_use]
pub fn dedup_mentions(mentions: Vec<Mention>) -> Vec<Mention> {
    let mut seen: HashSet<(Platform, String)> = HashSet::new();
    mentions
        .into_iter()
        .filter(|mention| {
            mention.id.is_empty() || seen.insert((mention.platform, mention.id.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use mentionbot_core::{MentionKind, Sentiment};

    use super::*;

    fn mention(platform: Platform, id: &str, title: &str) -> Mention {
        Mention {
            platform,
            kind: MentionKind::Post,
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            author: "a".to_string(),
            author_display_name: "a".to_string(),
            url: String::new(),
            score: 0,
            num_comments: 0,
            created_at: None,
            keyword_matched: "kw".to_string(),
            sentiment: Sentiment::neutral(),
            raw_extra: serde_json::json!({}),
        }
    }

    #[test]
    fn keeps_first_occurrence_in_order() {
        let input = vec![
            mention(Platform::Reddit, "1", "A"),
            mention(Platform::Reddit, "2", "B"),
            mention(Platform::Reddit, "1", "C"),
        ];
        let output = dedup_mentions(input);
        let titles: Vec<&str> = output.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn is_idempotent() {
        let input = vec![
            mention(Platform::Reddit, "1", "A"),
            mention(Platform::Twitter, "2", "B"),
            mention(Platform::Reddit, "1", "C"),
        ];
        let once = dedup_mentions(input);
        let twice = dedup_mentions(once.clone());
        let once_ids: Vec<&str> = once.iter().map(|m| m.id.as_str()).collect();
        let twice_ids: Vec<&str> = twice.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(once_ids, twice_ids);
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn same_id_on_different_platforms_is_not_a_duplicate() {
        let input = vec![
            mention(Platform::Reddit, "xyz", "A"),
            mention(Platform::Bluesky, "xyz", "B"),
        ];
        let output = dedup_mentions(input);
        assert_eq!(output.len(), 2);
    }

    #[test]
    fn empty_ids_are_always_kept() {
        let input = vec![
            mention(Platform::Reddit, "", "A"),
            mention(Platform::Reddit, "", "B"),
            mention(Platform::Reddit, "1", "C"),
        ];
        let output = dedup_mentions(input);
        assert_eq!(output.len(), 3);
    }
}
