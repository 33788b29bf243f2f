//! Tokenization shared by indexing and querying

use unicode_segmentation::UnicodeSegmentation;

/// UAX #29 word segmentation followed by lowercasing. No stop words, no stemming.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer;

impl Analyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(|word| word.to_lowercase()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_punctuation_and_lowercases() {
        let tokens = Analyzer::new().analyze("Spring Boot, Kafka & PostgreSQL!");
        assert_eq!(tokens, vec!["spring", "boot", "kafka", "postgresql"]);
    }

    #[test]
    fn test_keeps_stop_words_and_duplicates() {
        let tokens = Analyzer::new().analyze("The team and the product");
        assert_eq!(tokens, vec!["the", "team", "and", "the", "product"]);
    }

    #[test]
    fn test_punctuation_only_yields_nothing() {
        assert!(Analyzer::new().analyze(" -- ** // ").is_empty());
    }
}
