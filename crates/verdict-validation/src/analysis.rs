//! NLP analysis shared by the morphological and context validators.

use std::sync::Arc;

use tracing::debug;

use verdict_core::cache::CacheStats;
use verdict_core::errors::VerdictResult;
use verdict_core::models::{Document, Sentence, Token};
use verdict_core::traits::NlpAnalyzer;
use verdict_core::AnalysisCache;

/// An analyzer plus the per-validator document cache keyed by raw text.
pub struct CachedAnalyzer {
    analyzer: Arc<dyn NlpAnalyzer>,
    cache: AnalysisCache<String, Arc<Document>>,
}

impl CachedAnalyzer {
    /// Load `primary`, falling back to `fallback`. Fails if neither loads.
    pub fn load(primary: &str, fallback: &str) -> VerdictResult<Self> {
        let analyzer = verdict_nlp::load_with_fallback(primary, fallback)?;
        Ok(Self::new(analyzer))
    }

    pub fn new(analyzer: Arc<dyn NlpAnalyzer>) -> Self {
        Self {
            analyzer,
            cache: AnalysisCache::new(),
        }
    }

    pub fn model_name(&self) -> &str {
        self.analyzer.model_name()
    }

    /// Cached analysis of `text`. Failed analyses are not cached.
    pub fn analyze(&self, text: &str) -> VerdictResult<Arc<Document>> {
        self.cache.get_or_try_compute(text.to_string(), || {
            debug!(model = self.analyzer.model_name(), chars = text.len(), "analyzing text");
            Ok(Arc::new(self.analyzer.analyze(text)?))
        })
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache.hits()
    }

    pub fn cache_misses(&self) -> u64 {
        self.cache.misses()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

/// The flagged token.
///
/// Prefers a token spelled like the first word of `error_text` close to
/// `position`, then the token containing `position`, then the nearest token.
pub fn locate_error_token<'a>(doc: &'a Document, position: usize, error_text: &str) -> Option<&'a Token> {
    let needle = error_text
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '_').to_lowercase())
        .unwrap_or_default();
    if !needle.is_empty() {
        let reach = needle.chars().count() + 2;
        let spelled = doc
            .tokens
            .iter()
            .filter(|t| t.lower() == needle)
            .min_by_key(|t| t.boundary_distance(position));
        if let Some(token) = spelled.filter(|t| t.boundary_distance(position) <= reach) {
            return Some(token);
        }
    }
    doc.token_at_char(position).or_else(|| doc.nearest_token(position))
}

/// Sentence of the located error token, else the one containing or nearest `position`.
pub fn locate_error_sentence<'a>(
    doc: &'a Document,
    position: usize,
    error_text: &str,
) -> Option<&'a Sentence> {
    locate_error_token(doc, position, error_text)
        .and_then(|t| doc.sentence_of(t))
        .or_else(|| doc.sentence_at_char(position))
        .or_else(|| doc.nearest_sentence(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Arc<Document> {
        CachedAnalyzer::load("en_rule_based", "en_basic")
            .unwrap()
            .analyze(text)
            .unwrap()
    }

    #[test]
    fn gap_position_resolves_to_the_flagged_word() {
        let d = doc("The documentation is comprehensive. It covers all topics thoroughly.");
        let token = locate_error_token(&d, 35, "It").unwrap();
        assert_eq!(token.text, "It");
        assert_eq!(locate_error_sentence(&d, 35, "It").unwrap().index, 1);
    }

    #[test]
    fn falls_back_to_containing_then_nearest() {
        let d = doc("Cats sleep all day.");
        assert_eq!(locate_error_token(&d, 6, "zzz").unwrap().text, "sleep");
        assert_eq!(locate_error_token(&d, 500, "").unwrap().text, ".");
    }

    #[test]
    fn second_analysis_is_served_from_cache() {
        let analyzer = CachedAnalyzer::load("en_rule_based", "en_basic").unwrap();
        let first = analyzer.analyze("Same text.").unwrap();
        let second = analyzer.analyze("Same text.").unwrap();
        assert_eq!(analyzer.cache_hits(), 1);
        assert_eq!(first.text, second.text);
    }
}
