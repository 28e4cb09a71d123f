//! Local keyword-pattern domain classification used when no classifier is
//! injected, or when the injected one fails.

use std::collections::BTreeMap;

use verdict_core::models::{AnalysisSource, DomainAnalysis};

use crate::knowledge::{CompiledDomainPatterns, DomainKnowledge};
use crate::text::{clamp_unit, words};

const BASE_CONFIDENCE: f64 = 0.3;

/// Per-word-normalised pattern counts; the highest scoring domain wins.
///
/// `content_type` is the caller's hint; without one the winning domain name
/// doubles as the content type.
pub fn classify(
    text: &str,
    content_type: Option<&str>,
    patterns: &CompiledDomainPatterns,
    knowledge: &DomainKnowledge,
) -> DomainAnalysis {
    let word_count = words(text).len().max(1) as f64;
    let domain_scores: BTreeMap<String, f64> = patterns
        .domains()
        .map(|domain| {
            let score = patterns.count_matches(domain, text) as f64 / word_count;
            (domain.to_string(), score)
        })
        .collect();

    // Strictly greater, so ties keep the first domain in table order.
    let best = domain_scores
        .iter()
        .filter(|(_, &score)| score > 0.0)
        .fold(None::<(&String, f64)>, |best, (domain, &score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((domain, score)),
        });

    let total: f64 = domain_scores.values().sum();
    let (primary_domain, confidence) = match best {
        Some((domain, score)) => (domain.clone(), clamp_unit(BASE_CONFIDENCE + 0.7 * score / total)),
        None => (knowledge.default_domain.clone(), BASE_CONFIDENCE),
    };

    DomainAnalysis {
        content_type: content_type.map_or_else(|| primary_domain.clone(), str::to_string),
        primary_domain,
        confidence,
        domain_scores,
        source: AnalysisSource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, content_type: Option<&str>) -> DomainAnalysis {
        let kb = DomainKnowledge::default();
        let patterns = CompiledDomainPatterns::compile(&kb).unwrap();
        classify(text, content_type, &patterns, &kb)
    }

    #[test]
    fn fairy_tale_is_creative() {
        let analysis = run(
            "The magical fairy tale features enchanted creatures in mystical forest settings.",
            None,
        );
        assert_eq!(analysis.primary_domain, "creative");
        assert_eq!(analysis.content_type, "creative");
        assert_eq!(analysis.source, AnalysisSource::Fallback);
        assert!(analysis.confidence > 0.6);
    }

    #[test]
    fn technical_text_and_content_type_hint() {
        let analysis = run("The server caches every database query in memory.", Some("api_reference"));
        assert_eq!(analysis.primary_domain, "technical");
        assert_eq!(analysis.content_type, "api_reference");
    }

    #[test]
    fn no_matches_falls_back_to_default_domain() {
        let analysis = run("Zzz qqq.", None);
        assert_eq!(analysis.primary_domain, "general");
        assert_eq!(analysis.confidence, BASE_CONFIDENCE);
        assert!(run("", None).domain_scores.values().all(|s| *s == 0.0));
    }
}
