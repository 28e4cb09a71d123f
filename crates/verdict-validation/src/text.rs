//! Plain-text heuristics shared by the validators that do not need a full NLP pass.

use std::sync::LazyLock;

use regex::Regex;

pub use verdict_core::models::confidence_breakdown::clamp_unit;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]+(?:['’][A-Za-z]+)*").expect("word pattern is valid"));

static SENTENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]*").expect("sentence pattern is valid"));

static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph pattern is valid"));

static CONTRACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\w+(?:n't|'re|'ll|'ve|'m|'d|’re|’ll|’ve|n’t)\b|\b(?:it|that|there|what|he|she)'s\b")
        .expect("contraction pattern is valid")
});


/// `part / whole`, or 0 when `whole` is 0.
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Lowercased word tokens.
pub fn words(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase().replace('’', "'"))
        .collect()
}

/// Sentences split on terminal punctuation. Whitespace-only fragments are dropped.
pub fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .collect()
}

pub fn paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_RE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn has_contraction(text: &str) -> bool {
    CONTRACTION_RE.is_match(text)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population variance.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Vowel-group syllable estimate, at least 1 for any word with letters.
pub fn syllables(word: &str) -> usize {
    let lower: Vec<char> = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();
    if lower.is_empty() {
        return 0;
    }
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut previous_vowel = false;
    for &c in &lower {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }
    let n = lower.len();
    if n > 2 && lower[n - 1] == 'e' && lower[n - 2] != 'l' && !is_vowel(lower[n - 2]) && count > 1 {
        count -= 1;
    }
    count.max(1)
}

/// Whether a (possibly multi-word) lowercase phrase occurs in a word sequence.
pub fn contains_phrase(words: &[String], phrase: &str) -> bool {
    let parts: Vec<&str> = phrase.split_whitespace().collect();
    if parts.is_empty() || parts.len() > words.len() {
        return false;
    }
    words
        .windows(parts.len())
        .any(|window| window.iter().zip(&parts).all(|(w, p)| w == p))
}

/// `[start, end)` character bounds of a `radius` window around `center`, clipped to `len`.
pub fn char_window(len: usize, center: usize, radius: usize) -> (usize, usize) {
    let center = center.min(len);
    (center.saturating_sub(radius), (center + radius).min(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_lowercased_and_keep_contractions() {
        assert_eq!(words("Don't STOP, it’s fine"), vec!["don't", "stop", "it's", "fine"]);
    }

    #[test]
    fn sentence_split() {
        let s = sentences("One two. Three four! Five?  ");
        assert_eq!(s, vec!["One two.", "Three four!", "Five?"]);
        assert!(sentences("  ... ").is_empty());
    }

    #[test]
    fn paragraph_split() {
        assert_eq!(paragraphs("a b\n\n c d\n \n\ne"), vec!["a b", "c d", "e"]);
    }

    #[test]
    fn syllable_estimates() {
        assert_eq!(syllables("cat"), 1);
        assert_eq!(syllables("make"), 1);
        assert_eq!(syllables("table"), 2);
        assert_eq!(syllables("documentation"), 5);
        assert_eq!(syllables("42"), 0);
    }

    #[test]
    fn phrases_match_whole_words() {
        let w = words("For example, this works");
        assert!(contains_phrase(&w, "for example"));
        assert!(!contains_phrase(&w, "example this works now"));
        assert!(!contains_phrase(&w, "exam"));
    }

    #[test]
    fn window_is_clipped() {
        assert_eq!(char_window(10, 2, 5), (0, 7));
        assert_eq!(char_window(10, 50, 5), (5, 10));
    }

    #[test]
    fn variance_of_constant_is_zero() {
        assert_eq!(variance(&[3.0, 3.0, 3.0]), 0.0);
        assert!((variance(&[1.0, 3.0]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn contractions_detected() {
        assert!(has_contraction("Don't you think"));
        assert!(has_contraction("it's great"));
        assert!(!has_contraction("The dog's bone"));
    }
}
