//! Pre-scoring text cleanup.

use std::sync::OnceLock;

use regex::Regex;

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"http\S+|www\S+").expect("valid url regex"))
}

fn handle_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@[\w.-]+").expect("valid handle regex"))
}

fn hashtag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#(\w+)").expect("valid hashtag regex"))
}

/// Strip URLs, @-handles, and hashtag markers from a copy of `text`.
///
/// Hashtags keep their word content (`#ansible` becomes `ansible`); handles
/// and URLs are removed entirely. Runs of whitespace collapse to single
/// spaces. Used only on the scorer's input; stored mention content is
/// never cleaned.
#[must_use]
pub fn clean_for_sentiment(text: &str) -> String {
    let text = url_re().replace_all(text, "");
    let text = handle_re().replace_all(&text, "");
    let text = hashtag_re().replace_all(&text, "$1");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_removed() {
        assert_eq!(
            clean_for_sentiment("read https://example.com/post now"),
            "read now"
        );
        assert_eq!(clean_for_sentiment("see www.example.com today"), "see today");
    }

    #[test]
    fn handles_are_removed() {
        assert_eq!(clean_for_sentiment("thanks @some-user.bsky for this"), "thanks for this");
    }

    #[test]
    fn hashtags_keep_word_content() {
        assert_eq!(clean_for_sentiment("loving #ansible today"), "loving ansible today");
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(clean_for_sentiment("  a \n b\t c  "), "a b c");
    }

    #[test]
    fn combined_noise_is_stripped() {
        assert_eq!(
            clean_for_sentiment("@bot check https://x.io #great tool"),
            "check great tool"
        );
    }
}
