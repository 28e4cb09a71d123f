//! Regex tokenizer with clitic splitting. Offsets are character offsets.

use std::sync::LazyLock;

use regex::Regex;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+(?:[-'’.]\w+)*|\.\.\.|```|\S").expect("token pattern is valid")
});

const CLITICS: &[&str] = &["'s", "'re", "'ve", "'ll", "'d", "'m"];

/// A surface token before tagging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub text: String,
    /// Character offset.
    pub idx: usize,
    /// A newline run of two or more follows this token.
    pub paragraph_break_after: bool,
}

/// Split `text` into surface tokens.
pub fn tokenize(text: &str) -> Vec<RawToken> {
    // byte offset -> char offset
    let mut char_at_byte = vec![0usize; text.len() + 1];
    let mut chars_seen = 0;
    for (byte, _) in text.char_indices() {
        char_at_byte[byte] = chars_seen;
        chars_seen += 1;
    }
    char_at_byte[text.len()] = chars_seen;

    let mut tokens = Vec::new();
    let mut matches = TOKEN_RE.find_iter(text).peekable();
    while let Some(m) = matches.next() {
        let gap_end = matches.peek().map(|n| n.start()).unwrap_or(text.len());
        let gap = &text[m.end()..gap_end];
        let paragraph_break_after = gap.matches('\n').count() >= 2;
        let idx = char_at_byte[m.start()];
        for (piece, offset) in split_clitics(m.as_str()) {
            tokens.push(RawToken {
                text: piece,
                idx: idx + offset,
                paragraph_break_after: false,
            });
        }
        if let Some(last) = tokens.last_mut() {
            last.paragraph_break_after = paragraph_break_after;
        }
    }
    tokens
}

/// `don't` -> `do` + `n't`, `it's` -> `it` + `'s`. Offsets are char offsets within `word`.
fn split_clitics(word: &str) -> Vec<(String, usize)> {
    let normalized = word.replace('’', "'");
    let lower = normalized.to_lowercase();
    let char_len = word.chars().count();

    if lower.ends_with("n't") && char_len > 3 {
        let split = char_len - 3;
        return vec![
            (normalized.chars().take(split).collect(), 0),
            (normalized.chars().skip(split).collect(), split),
        ];
    }
    for clitic in CLITICS {
        let clitic_len = clitic.chars().count();
        if lower.ends_with(clitic) && char_len > clitic_len {
            let split = char_len - clitic_len;
            return vec![
                (normalized.chars().take(split).collect(), 0),
                (normalized.chars().skip(split).collect(), split),
            ];
        }
    }
    vec![(word.to_string(), 0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[RawToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn splits_words_and_punctuation() {
        let tokens = tokenize("The config uses `max_retries` to control behavior.");
        assert_eq!(
            texts(&tokens),
            vec!["The", "config", "uses", "`", "max_retries", "`", "to", "control", "behavior", "."]
        );
        assert_eq!(tokens[4].idx, 17);
    }

    #[test]
    fn splits_clitics() {
        let tokens = tokenize("It's fine, don't worry.");
        assert_eq!(texts(&tokens), vec!["It", "'s", "fine", ",", "do", "n't", "worry", "."]);
        assert_eq!(tokens[1].idx, 2);
        assert_eq!(tokens[5].idx, 13);
    }

    #[test]
    fn offsets_are_character_offsets() {
        let tokens = tokenize("café au lait");
        assert_eq!(tokens[1].idx, 5);
        assert_eq!(tokens[2].idx, 8);
    }

    #[test]
    fn marks_paragraph_breaks() {
        let tokens = tokenize("One.\n\nTwo.");
        assert!(tokens[1].paragraph_break_after);
        assert!(!tokens[0].paragraph_break_after);
    }

    #[test]
    fn keeps_fences_and_ellipses_whole() {
        let tokens = tokenize("Wait... ```code```");
        assert_eq!(texts(&tokens), vec!["Wait", "...", "```", "code", "```"]);
    }
}
