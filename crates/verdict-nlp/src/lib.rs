//! # verdict-nlp
//!
//! Deterministic rule-based NLP analysis backing the validators:
//! tokenization, sentence segmentation, POS tagging, lemmatization and
//! heuristic dependency attachment. All offsets are character offsets.

pub mod analyzer;
pub mod lemmatizer;
pub mod lexicon;
pub mod models;
pub mod parser;
pub mod segmenter;
pub mod tagger;
pub mod tokenizer;

pub use analyzer::{AttachmentMode, RuleBasedAnalyzer};
pub use models::{available_models, load_default, load_model, load_with_fallback};
