//! NLP document model returned by an `NlpAnalyzer`.
//!
//! All offsets are character offsets into `Document::text`, never byte offsets.

use serde::{Deserialize, Serialize};

/// One token with its linguistic annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Position in `Document::tokens`.
    pub index: usize,
    pub text: String,
    /// Character offset of the first character.
    pub idx: usize,
    /// Universal POS tag (NOUN, VERB, PRON, ...).
    pub pos: String,
    /// Fine-grained Penn-style tag (NN, VBZ, PRP, ...).
    pub tag: String,
    pub lemma: String,
    /// Dependency relation to `head`.
    pub dep: String,
    /// Index of the head token. A root points at itself.
    pub head: usize,
    pub children: Vec<usize>,
    /// Morphological features, `Key=Value|Key=Value`.
    pub morph: String,
    /// Index of the containing sentence.
    pub sentence: usize,
    pub is_stop: bool,
    pub is_punct: bool,
}

impl Token {
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.idx + self.char_len()
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn is_root(&self) -> bool {
        self.head == self.index
    }

    pub fn is_alpha(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }

    /// Distance from `pos` to this token's span; 0 when contained.
    pub fn boundary_distance(&self, pos: usize) -> usize {
        if pos < self.idx {
            self.idx - pos
        } else if pos >= self.end() {
            pos + 1 - self.end()
        } else {
            0
        }
    }

    /// Parse the `morph` string into key/value pairs, in order.
    pub fn morph_features(&self) -> Vec<(String, String)> {
        self.morph
            .split('|')
            .filter_map(|pair| {
                let (k, v) = pair.split_once('=')?;
                Some((k.to_string(), v.to_string()))
            })
            .collect()
    }
}

/// A sentence span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub index: usize,
    pub start_char: usize,
    /// Exclusive.
    pub end_char: usize,
    pub start_token: usize,
    /// Exclusive.
    pub end_token: usize,
}

impl Sentence {
    pub fn contains_char(&self, pos: usize) -> bool {
        pos >= self.start_char && pos < self.end_char
    }

    pub fn token_count(&self) -> usize {
        self.end_token.saturating_sub(self.start_token)
    }

    fn distance(&self, pos: usize) -> usize {
        if pos < self.start_char {
            self.start_char - pos
        } else if pos >= self.end_char {
            pos + 1 - self.end_char
        } else {
            0
        }
    }
}

/// Analysed text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub tokens: Vec<Token>,
    pub sentences: Vec<Sentence>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn sentence_tokens(&self, sentence: &Sentence) -> &[Token] {
        let end = sentence.end_token.min(self.tokens.len());
        let start = sentence.start_token.min(end);
        &self.tokens[start..end]
    }

    pub fn sentence_of(&self, token: &Token) -> Option<&Sentence> {
        self.sentences.get(token.sentence)
    }

    pub fn head_of(&self, token: &Token) -> Option<&Token> {
        self.tokens.get(token.head)
    }

    pub fn children_of<'a>(&'a self, token: &'a Token) -> impl Iterator<Item = &'a Token> + 'a {
        token.children.iter().filter_map(|&i| self.tokens.get(i))
    }

    /// Token whose span contains `pos`.
    pub fn token_at_char(&self, pos: usize) -> Option<&Token> {
        self.tokens.iter().find(|t| pos >= t.idx && pos < t.end())
    }

    /// Token with the minimum boundary distance to `pos`; first wins on ties.
    pub fn nearest_token(&self, pos: usize) -> Option<&Token> {
        self.tokens.iter().min_by_key(|t| t.boundary_distance(pos))
    }

    pub fn sentence_at_char(&self, pos: usize) -> Option<&Sentence> {
        self.sentences.iter().find(|s| s.contains_char(pos))
    }

    /// Sentence with the minimum distance to `pos`; first wins on ties.
    pub fn nearest_sentence(&self, pos: usize) -> Option<&Sentence> {
        self.sentences.iter().min_by_key(|s| s.distance(pos))
    }

    /// Text covered by a sentence.
    pub fn sentence_text(&self, sentence: &Sentence) -> String {
        self.text
            .chars()
            .skip(sentence.start_char)
            .take(sentence.end_char.saturating_sub(sentence.start_char))
            .collect()
    }
}
