use std::collections::HashSet;

/// Tokens removed from every keyword set before comparison.
const STOPWORDS: [&str; 12] = [
    "and", "the", "to", "of", "a", "in", "for", "with", "on", "as", "is", "required",
];

/// Extracts a normalized keyword set from free text.
///
/// Lowercases, drops every character that is not an ASCII letter, digit, or
/// whitespace (accented letters are dropped, not transliterated), splits on
/// whitespace, and removes stopwords. Duplicates collapse; empty input yields
/// an empty set. Never fails.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    let mut normalized = String::with_capacity(text.len());
    for c in text.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
            normalized.push(c);
        }
    }

    normalized
        .split_whitespace()
        .filter(|w| !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \t\n").is_empty());
    }

    #[test]
    fn test_stopwords_removed() {
        assert_eq!(
            extract_keywords("The Java Developer is required"),
            set(&["java", "developer"])
        );
    }

    #[test]
    fn test_punctuation_and_symbols_stripped() {
        assert_eq!(
            extract_keywords("C++/Rust, SQL & no-SQL!"),
            set(&["crust", "sql", "nosql"])
        );
    }

    #[test]
    fn test_accented_letters_dropped_not_transliterated() {
        // "café" loses the é entirely rather than becoming "cafe".
        assert_eq!(extract_keywords("café résumé"), set(&["caf", "rsum"]));
    }

    #[test]
    fn test_digits_kept() {
        assert_eq!(
            extract_keywords("Python3 and 5 years"),
            set(&["python3", "5", "years"])
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(
            extract_keywords("rust rust RUST Rust"),
            set(&["rust"])
        );
    }

    #[test]
    fn test_all_stopwords_yields_empty_set() {
        assert!(extract_keywords("the and of a in is").is_empty());
    }

    #[test]
    fn test_idempotent_on_joined_output() {
        let first = extract_keywords("Senior Rust Engineer, 5+ years required!");
        let joined = first.iter().cloned().collect::<Vec<_>>().join(" ");
        assert_eq!(extract_keywords(&joined), first);
    }
}
