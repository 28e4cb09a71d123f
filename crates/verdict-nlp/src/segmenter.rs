//! Sentence segmentation over surface tokens.

use crate::lexicon::ABBREVIATIONS;
use crate::tokenizer::RawToken;

fn is_terminal(text: &str) -> bool {
    matches!(text, "." | "!" | "?" | "...")
}

fn is_closer(text: &str) -> bool {
    matches!(text, "\"" | "'" | ")" | "]" | "”" | "’")
}

/// Token ranges `[start, end)` for each sentence.
///
/// A sentence ends at terminal punctuation (plus trailing closing quotes or
/// brackets) when the next token starts uppercase, is a digit/quote/bracket,
/// or the text ends; and unconditionally at paragraph breaks. A period after
/// a known abbreviation never ends a sentence.
pub fn segment(tokens: &[RawToken]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < tokens.len() {
        let text = tokens[i].text.as_str();
        let mut end_here = tokens[i].paragraph_break_after;

        if is_terminal(text) {
            let after_abbreviation = text == "."
                && i > 0
                && ABBREVIATIONS.contains(tokens[i - 1].text.to_lowercase().as_str());
            if !after_abbreviation {
                let mut j = i + 1;
                while j < tokens.len() && is_closer(&tokens[j].text) {
                    j += 1;
                }
                let boundary = match tokens.get(j) {
                    None => true,
                    Some(next) => next
                        .text
                        .chars()
                        .next()
                        .map(|c| c.is_uppercase() || c.is_ascii_digit() || "\"'([`“‘".contains(c))
                        .unwrap_or(false),
                };
                if boundary {
                    i = j - 1;
                    end_here = true;
                }
            }
        }

        if end_here {
            ranges.push((start, i + 1));
            start = i + 1;
        }
        i += 1;
    }

    if start < tokens.len() {
        ranges.push((start, tokens.len()));
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn splits_on_terminal_punctuation() {
        let tokens = tokenize("The documentation is comprehensive. It covers all topics thoroughly.");
        let ranges = segment(&tokens);
        assert_eq!(ranges, vec![(0, 5), (5, 11)]);
    }

    #[test]
    fn abbreviations_do_not_split() {
        let tokens = tokenize("Dr. Smith arrived. He sat down.");
        let ranges = segment(&tokens);
        assert_eq!(ranges.len(), 2);
    }

    #[test]
    fn trailing_text_without_punctuation_is_a_sentence() {
        let tokens = tokenize("No ending punctuation here");
        assert_eq!(segment(&tokens), vec![(0, 4)]);
    }

    #[test]
    fn lowercase_continuation_does_not_split() {
        let tokens = tokenize("Version 2. is out");
        assert_eq!(segment(&tokens).len(), 1);
    }

    #[test]
    fn closing_quotes_stay_with_sentence() {
        let tokens = tokenize("He said \"stop.\" Then he left.");
        let ranges = segment(&tokens);
        assert_eq!(ranges.len(), 2);
        assert_eq!(tokens[ranges[0].1 - 1].text, "\"");
    }

    #[test]
    fn empty_input_has_no_sentences() {
        assert!(segment(&[]).is_empty());
    }
}
