//! Claim name derivation.
//!
//! A claim name is a URL-safe slug derived from a human-readable title:
//! lowercase, every run of non-alphanumeric characters collapsed to a single
//! dash, assembled word by word under a fixed length budget. Publish attempts
//! beyond the first append a numeric suffix, and the budget always reserves
//! room for it.

/// Maximum length of a derived claim name, suffix included.
pub const MAX_NAME_LEN: usize = 40;

/// Names longer than this keep whole words only; shorter names may end in a
/// truncated word to use up the budget.
const WHOLE_WORDS_THRESHOLD: usize = 20;

/// Derive the claim name for a title at the given publish attempt (1-based).
pub fn claim_name_from_title(title: &str, attempt: u32) -> String {
    let suffix = if attempt > 1 {
        format!("-{attempt}")
    } else {
        String::new()
    };
    let max_len = MAX_NAME_LEN - suffix.len();

    let normalized = normalize(title);
    let mut chunks = normalized.split('-');

    // normalize() yields ASCII only, so byte truncation is safe
    let mut name = chunks.next().unwrap_or("").to_string();
    if name.len() > max_len {
        name.truncate(max_len);
        return format!("{name}{suffix}");
    }

    for chunk in chunks {
        if name.len() + 1 + chunk.len() > max_len {
            if name.len() < WHOLE_WORDS_THRESHOLD {
                name.push('-');
                name.push_str(chunk);
                name.truncate(max_len);
            }
            break;
        }
        name.push('-');
        name.push_str(chunk);
    }

    format!("{name}{suffix}")
}

/// Lowercase and collapse every run of non-alphanumeric characters to a
/// single dash, trimming leading and trailing dashes.
fn normalize(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_title() {
        assert_eq!(claim_name_from_title("Game of life", 1), "game-of-life");
    }

    #[test]
    fn test_attempt_suffix() {
        assert_eq!(claim_name_from_title("Game of life", 2), "game-of-life-2");
        assert_eq!(claim_name_from_title("Game of life", 10), "game-of-life-10");
    }

    #[test]
    fn test_punctuation_collapses() {
        assert_eq!(claim_name_from_title("Hello, World!!!", 1), "hello-world");
        assert_eq!(
            claim_name_from_title("  --Spaced__out.title--  ", 1),
            "spaced-out-title"
        );
    }

    #[test]
    fn test_non_ascii_treated_as_separator() {
        assert_eq!(claim_name_from_title("café こんにちは au lait", 1), "caf-au-lait");
    }

    #[test]
    fn test_length_budget() {
        let title = "the quick brown fox jumps over the lazy dog again and again";
        let name = claim_name_from_title(title, 1);
        assert!(name.len() <= MAX_NAME_LEN);
        assert_eq!(name, "the-quick-brown-fox-jumps-over-the-lazy");
    }

    #[test]
    fn test_suffix_fits_inside_budget() {
        let title = "the quick brown fox jumps over the lazy dog again and again";
        let name = claim_name_from_title(title, 3);
        assert!(name.len() <= MAX_NAME_LEN);
        assert!(name.ends_with("-3"));
        // budget shrinks to make room for the suffix, dropping "lazy"
        assert_eq!(name, "the-quick-brown-fox-jumps-over-the-3");
    }

    #[test]
    fn test_first_word_longer_than_budget() {
        let title = "a".repeat(60);
        let name = claim_name_from_title(&title, 1);
        assert_eq!(name.len(), MAX_NAME_LEN);
        assert_eq!(name, "a".repeat(40));

        // later attempts still get their suffix
        let retry = claim_name_from_title(&title, 2);
        assert_eq!(retry.len(), MAX_NAME_LEN);
        assert!(retry.ends_with("-2"));
    }

    #[test]
    fn test_short_name_takes_truncated_word() {
        // the overflowing word arrives while the name is still short, so it
        // is taken and hard-truncated at the budget
        let title = "brief pneumonoultramicroscopicsilicovolcanoconiosis";
        let name = claim_name_from_title(title, 1);
        assert_eq!(name, "brief-pneumonoultramicroscopicsilicovolc");
        assert_eq!(name.len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_long_name_keeps_whole_words() {
        let title = "twenty-two characters x supercalifragilistic";
        let name = claim_name_from_title(title, 1);
        // name is past the whole-words threshold, overflowing word is dropped
        assert_eq!(name, "twenty-two-characters-x");
    }

    #[test]
    fn test_empty_title_yields_empty_name() {
        assert_eq!(claim_name_from_title("", 1), "");
        assert_eq!(claim_name_from_title("!!!", 1), "");
    }

    #[test]
    fn test_deterministic() {
        let title = "Some Title (remastered)";
        assert_eq!(
            claim_name_from_title(title, 1),
            claim_name_from_title(title, 1)
        );
    }
}
