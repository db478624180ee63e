// file: src/filter/matcher.rs
// description: case-insensitive substring spam classification

use crate::api::Comment;
use crate::filter::WordList;

/// Binary spam classifier. Any single blocked word appearing anywhere in a
/// comment's text (case-insensitive) flags it; there is no tokenization,
/// stemming, or scoring.
#[derive(Debug, Clone)]
pub struct SpamFilter {
    words: Vec<String>,
}

impl SpamFilter {
    pub fn new(list: &WordList) -> Self {
        Self {
            words: list.words().iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Empty text is never spam, regardless of the word list.
    pub fn is_spam(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        let lowered = text.to_lowercase();
        self.words.iter().any(|word| lowered.contains(word))
    }

    /// IDs of the comments in a batch that classify as spam, in input order.
    pub fn flag_spam(&self, comments: &[Comment]) -> Vec<String> {
        comments
            .iter()
            .filter(|comment| self.is_spam(&comment.text))
            .map(|comment| comment.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filter(words: &[&str]) -> SpamFilter {
        SpamFilter::new(&WordList::from_words(
            words.iter().map(|w| w.to_string()).collect(),
        ))
    }

    #[test]
    fn test_empty_text_is_never_spam() {
        let filter = filter(&["spam"]);
        assert!(!filter.is_spam(""));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let filter = filter(&["spam", "buy now"]);
        assert!(filter.is_spam("Buy NOW cheap followers"));
        assert!(filter.is_spam("this is SPAM"));
    }

    #[test]
    fn test_substring_containment_flags() {
        let filter = filter(&["scam"]);
        assert!(filter.is_spam("what a scammer"));
    }

    #[test]
    fn test_clean_text_is_not_flagged() {
        let filter = filter(&["spam", "buy now"]);
        assert!(!filter.is_spam("great video, thanks for sharing"));
    }

    #[test]
    fn test_empty_word_list_flags_nothing() {
        let filter = filter(&[]);
        assert!(!filter.is_spam("buy now cheap followers spam"));
    }

    #[test]
    fn test_flag_spam_returns_matching_ids_in_order() {
        let filter = filter(&["spam"]);
        let comments = vec![
            Comment {
                id: "c1".to_string(),
                text: "nice one".to_string(),
            },
            Comment {
                id: "c2".to_string(),
                text: "SPAM here".to_string(),
            },
            Comment {
                id: "c3".to_string(),
                text: String::new(),
            },
            Comment {
                id: "c4".to_string(),
                text: "more spam".to_string(),
            },
        ];

        assert_eq!(
            filter.flag_spam(&comments),
            vec!["c2".to_string(), "c4".to_string()]
        );
    }

    #[test]
    fn test_flagged_never_exceeds_batch_size() {
        let filter = filter(&["a"]);
        let comments = vec![
            Comment {
                id: "c1".to_string(),
                text: "aaaa".to_string(),
            },
            Comment {
                id: "c2".to_string(),
                text: "banana".to_string(),
            },
        ];

        assert_eq!(filter.flag_spam(&comments).len(), comments.len());
    }
}
