//! Text normalization and keyword-matching primitives.
//!
//! All keyword matching in the parser runs over the normalized form:
//! lowercased, with every character outside `[\w\s$.,%-]` replaced by a
//! space, and whitespace collapsed.

/// Normalize raw utterance text for keyword matching.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut last_was_space = true;
    for c in lowered.chars() {
        let keep = c.is_alphanumeric() || matches!(c, '_' | '$' | '.' | ',' | '%' | '-');
        if keep {
            out.push(c);
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    out.trim().to_string()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whole-word match: `word` appears in `text` with non-word characters
/// (or string edges) on both sides.
pub fn has_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let mut start = 0;
    while let Some(pos) = text[start..].find(word) {
        let abs = start + pos;
        let before_ok = text[..abs]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = text[abs + word.len()..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));
        if before_ok && after_ok {
            return true;
        }
        // Advance past this occurrence; stay on a char boundary.
        start = abs + word.len();
        if start >= text.len() {
            break;
        }
    }
    false
}

/// Matching policy for keyword tables: multi-word phrases use substring
/// containment, single words require word boundaries.
pub fn has_phrase(text: &str, phrase: &str) -> bool {
    if phrase.contains(' ') {
        text.contains(phrase)
    } else {
        has_word(text, phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("Show me the leads!"), "show me the leads");
        assert_eq!(normalize("  What's   up?  "), "what s up");
    }

    #[test]
    fn test_normalize_keeps_money_chars() {
        assert_eq!(
            normalize("deals over $50,000 (25.5% up)"),
            "deals over $50,000 25.5% up"
        );
    }

    #[test]
    fn test_has_word_boundaries() {
        assert!(has_word("delete the lead", "delete"));
        assert!(!has_word("undeleted records", "delete"));
        assert!(!has_word("leads", "lead"));
        assert!(has_word("my lead, please", "lead"));
    }

    #[test]
    fn test_has_phrase_multiword_substring() {
        assert!(has_phrase("please remove all of them", "remove all"));
        assert!(has_phrase("go to the dashboard", "go to"));
        assert!(!has_phrase("removed all", "remove all"));
    }

    #[test]
    fn test_has_word_non_ascii_safe() {
        // Must not panic on multi-byte boundaries.
        assert!(!has_word("café leads", "caf"));
        assert!(has_word("café leads", "leads"));
    }
}
