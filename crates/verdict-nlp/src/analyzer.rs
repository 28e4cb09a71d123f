//! `RuleBasedAnalyzer`: the default `NlpAnalyzer` implementation.

use tracing::debug;

use verdict_core::errors::NlpError;
use verdict_core::models::{Document, Sentence, Token};
use verdict_core::traits::NlpAnalyzer;

use crate::lemmatizer::{lemmatize, morph_for};
use crate::lexicon::STOP_WORDS;
use crate::parser::{self, Attachment, Node};
use crate::segmenter::segment;
use crate::tagger::tag_sentence;
use crate::tokenizer::tokenize;

/// How dependencies are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentMode {
    /// Heuristic clause-aware attachment.
    Heuristic,
    /// Every token hangs off the sentence root.
    Flat,
}

/// Deterministic lexicon/rule driven analyzer.
#[derive(Debug, Clone)]
pub struct RuleBasedAnalyzer {
    model_name: String,
    mode: AttachmentMode,
}

impl RuleBasedAnalyzer {
    pub fn new(model_name: impl Into<String>, mode: AttachmentMode) -> Self {
        Self {
            model_name: model_name.into(),
            mode,
        }
    }

    pub fn mode(&self) -> AttachmentMode {
        self.mode
    }
}

impl NlpAnalyzer for RuleBasedAnalyzer {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn analyze(&self, text: &str) -> Result<Document, NlpError> {
        let raw = tokenize(text);
        let ranges = segment(&raw);

        let mut tokens: Vec<Token> = Vec::with_capacity(raw.len());
        let mut sentences = Vec::with_capacity(ranges.len());

        for (sentence_index, &(start, end)) in ranges.iter().enumerate() {
            let slice = &raw[start..end];
            let words: Vec<&str> = slice.iter().map(|t| t.text.as_str()).collect();
            let tags = tag_sentence(&words);
            let lowers: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

            let nodes: Vec<Node<'_>> = tags
                .iter()
                .zip(&lowers)
                .map(|(t, lower)| Node {
                    pos: t.pos,
                    tag: t.tag,
                    lower: lower.as_str(),
                })
                .collect();
            let arcs: Vec<Attachment> = match self.mode {
                AttachmentMode::Heuristic => parser::parse(&nodes),
                AttachmentMode::Flat => parser::parse_flat(&nodes),
            };
            if arcs.len() != slice.len() {
                return Err(NlpError::AnalysisFailed {
                    reason: format!(
                        "attachment count {} does not match token count {}",
                        arcs.len(),
                        slice.len()
                    ),
                });
            }

            for (offset, raw_token) in slice.iter().enumerate() {
                let tag = &tags[offset];
                let lower = &lowers[offset];
                tokens.push(Token {
                    index: start + offset,
                    text: raw_token.text.clone(),
                    idx: raw_token.idx,
                    pos: tag.pos.to_string(),
                    tag: tag.tag.to_string(),
                    lemma: lemmatize(&raw_token.text, tag.pos, tag.tag),
                    dep: arcs[offset].dep.to_string(),
                    head: start + arcs[offset].head,
                    children: Vec::new(),
                    morph: morph_for(tag.pos, tag.tag, lower),
                    sentence: sentence_index,
                    is_stop: STOP_WORDS.contains(lower.as_str()),
                    is_punct: tag.pos == "PUNCT",
                });
            }

            let first = &slice[0];
            let last = &slice[slice.len() - 1];
            sentences.push(Sentence {
                index: sentence_index,
                start_char: first.idx,
                end_char: last.idx + last.text.chars().count(),
                start_token: start,
                end_token: end,
            });
        }

        for i in 0..tokens.len() {
            let head = tokens[i].head;
            if head != i {
                tokens[head].children.push(i);
            }
        }

        debug!(
            model = %self.model_name,
            tokens = tokens.len(),
            sentences = sentences.len(),
            "analyzed text"
        );

        Ok(Document {
            text: text.to_string(),
            tokens,
            sentences,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> RuleBasedAnalyzer {
        RuleBasedAnalyzer::new("en_rule_based", AttachmentMode::Heuristic)
    }

    #[test]
    fn builds_sentences_with_char_bounds() {
        let doc = analyzer()
            .analyze("The documentation is comprehensive. It covers all topics thoroughly.")
            .unwrap();
        assert_eq!(doc.sentences.len(), 2);
        assert_eq!(doc.sentences[0].start_char, 0);
        assert_eq!(doc.sentences[0].end_char, 35);
        assert_eq!(doc.sentences[1].start_char, 36);
        assert_eq!(doc.tokens[5].text, "It");
        assert_eq!(doc.tokens[5].sentence, 1);
    }

    #[test]
    fn children_mirror_heads() {
        let doc = analyzer().analyze("It uses settings to control behavior.").unwrap();
        for token in &doc.tokens {
            for &child in &token.children {
                assert_eq!(doc.tokens[child].head, token.index);
            }
            if !token.is_root() {
                assert!(doc.tokens[token.head].children.contains(&token.index));
            }
        }
    }

    #[test]
    fn empty_text_yields_empty_document() {
        let doc = analyzer().analyze("").unwrap();
        assert!(doc.is_empty());
        assert!(doc.sentences.is_empty());
    }

    #[test]
    fn flat_mode_has_one_root_per_sentence() {
        let doc = RuleBasedAnalyzer::new("en_basic", AttachmentMode::Flat)
            .analyze("Dogs bark. Cats sleep.")
            .unwrap();
        let roots = doc.tokens.iter().filter(|t| t.is_root()).count();
        assert_eq!(roots, 2);
    }
}
