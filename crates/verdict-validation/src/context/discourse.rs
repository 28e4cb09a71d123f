//! Discourse flow across the context window: markers, cohesion, topic drift
//! and logical progression.

use std::collections::{BTreeMap, BTreeSet};

use verdict_core::models::{Document, Sentence, Token, ValidationEvidence};

use crate::knowledge::DiscourseKnowledge;
use crate::text::{clamp_unit, contains_phrase, mean, ratio, variance};

pub const EVIDENCE_TYPE: &str = "discourse_flow";

/// Adjacent sentences sharing less than this fraction of nouns break the flow.
const DISRUPTION_OVERLAP: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct DiscourseAnalysis {
    /// Marker category to the markers found for it.
    pub markers: BTreeMap<String, Vec<String>>,
    pub lexical_cohesion: f64,
    pub structural_consistency: f64,
    pub coherence: f64,
    /// Indices (within the window) of sentences that break from their predecessor.
    pub flow_disruptions: Vec<usize>,
    pub topic_consistency: f64,
    pub tense_consistency: f64,
    pub logical_progression: f64,
    pub structure: String,
    pub confidence: f64,
}

fn content_lemmas(tokens: &[Token], pos: &[&str]) -> BTreeSet<String> {
    tokens
        .iter()
        .filter(|t| !t.is_punct && !t.is_stop && pos.contains(&t.pos.as_str()))
        .map(|t| t.lemma.to_lowercase())
        .collect()
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    ratio(a.intersection(b).count(), union)
}

/// Fraction of content lemmas that occur in more than one sentence.
fn lexical_cohesion(per_sentence: &[BTreeSet<String>]) -> f64 {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for lemmas in per_sentence {
        for lemma in lemmas {
            *seen.entry(lemma.as_str()).or_default() += 1;
        }
    }
    ratio(seen.values().filter(|&&n| n > 1).count(), seen.len())
}

/// 1 when sentence lengths are uniform, falling with their spread.
fn structural_consistency(lengths: &[f64]) -> f64 {
    let m = mean(lengths);
    if m == 0.0 {
        return 0.5;
    }
    clamp_unit(1.0 - variance(lengths).sqrt() / m)
}

fn tense_consistency(tokens: &[&Token]) -> f64 {
    let mut tenses: BTreeMap<String, usize> = BTreeMap::new();
    for token in tokens.iter().filter(|t| matches!(t.pos.as_str(), "VERB" | "AUX")) {
        if let Some((_, tense)) = token.morph_features().into_iter().find(|(k, _)| k == "Tense") {
            *tenses.entry(tense).or_default() += 1;
        }
    }
    let total: usize = tenses.values().sum();
    if total == 0 {
        return 1.0;
    }
    ratio(tenses.values().copied().max().unwrap_or(0), total)
}

pub fn analyze(doc: &Document, window: &[&Sentence], knowledge: &DiscourseKnowledge) -> DiscourseAnalysis {
    let sentence_tokens: Vec<&[Token]> = window.iter().map(|s| doc.sentence_tokens(s)).collect();
    let all_tokens: Vec<&Token> = sentence_tokens.iter().flat_map(|s| s.iter()).collect();
    let words: Vec<String> = all_tokens.iter().filter(|t| !t.is_punct).map(|t| t.lower()).collect();

    let markers: BTreeMap<String, Vec<String>> = knowledge
        .discourse_markers
        .iter()
        .filter_map(|(category, phrases)| {
            let found: Vec<String> = phrases
                .iter()
                .filter(|p| contains_phrase(&words, p))
                .cloned()
                .collect();
            (!found.is_empty()).then(|| (category.clone(), found))
        })
        .collect();

    let all_content: Vec<BTreeSet<String>> = sentence_tokens
        .iter()
        .map(|s| content_lemmas(s, &["NOUN", "PROPN", "VERB", "ADJ", "ADV"]))
        .collect();
    let nouns: Vec<BTreeSet<String>> = sentence_tokens
        .iter()
        .map(|s| content_lemmas(s, &["NOUN", "PROPN"]))
        .collect();
    let topics: Vec<BTreeSet<String>> = sentence_tokens
        .iter()
        .map(|s| content_lemmas(s, &["NOUN", "PROPN", "VERB"]))
        .collect();
    let lengths: Vec<f64> = sentence_tokens
        .iter()
        .map(|s| s.iter().filter(|t| !t.is_punct).count() as f64)
        .collect();

    let lexical = lexical_cohesion(&all_content);
    let structural = structural_consistency(&lengths);
    let coherence = clamp_unit((lexical + structural) / 2.0);

    let flow_disruptions: Vec<usize> = nouns
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| {
            !pair[0].is_empty() && !pair[1].is_empty() && jaccard(&pair[0], &pair[1]) < DISRUPTION_OVERLAP
        })
        .map(|(i, _)| i + 1)
        .collect();

    let mut overlaps = Vec::new();
    for i in 0..topics.len() {
        for j in (i + 1)..topics.len() {
            overlaps.push(jaccard(&topics[i], &topics[j]));
        }
    }
    // A single sentence cannot drift from itself.
    let topic_consistency = if overlaps.is_empty() { 1.0 } else { mean(&overlaps) };

    let tense = tense_consistency(&all_tokens);
    let mut progression = 0.5 + 0.3 * tense;
    if !markers.is_empty() {
        progression += 0.2;
    }
    let logical_progression = clamp_unit(progression);

    let structure = markers
        .iter()
        .max_by(|a, b| a.1.len().cmp(&b.1.len()).then_with(|| b.0.cmp(a.0)))
        .map(|(category, _)| knowledge.structure_for(category).to_string())
        .unwrap_or_else(|| "mixed".to_string());

    let transitions = window.len().saturating_sub(1);
    let disruption_rate = ratio(flow_disruptions.len(), transitions);
    let confidence = clamp_unit(
        0.3 * coherence + 0.2 * (1.0 - disruption_rate) + 0.2 * topic_consistency + 0.3 * logical_progression,
    );

    DiscourseAnalysis {
        markers,
        lexical_cohesion: lexical,
        structural_consistency: structural,
        coherence,
        flow_disruptions,
        topic_consistency,
        tense_consistency: tense,
        logical_progression,
        structure,
        confidence,
    }
}

impl DiscourseAnalysis {
    pub fn marker_count(&self) -> usize {
        self.markers.values().map(Vec::len).sum()
    }

    pub fn to_evidence(&self) -> ValidationEvidence {
        ValidationEvidence::new(
            EVIDENCE_TYPE,
            self.confidence,
            format!(
                "{} discourse, coherence {:.2}, {} marker(s), {} flow disruption(s)",
                self.structure,
                self.coherence,
                self.marker_count(),
                self.flow_disruptions.len()
            ),
        )
        .with_data("discourse_structure", self.structure.as_str())
        .with_data("coherence", self.coherence)
        .with_data("lexical_cohesion", self.lexical_cohesion)
        .with_data("structural_consistency", self.structural_consistency)
        .with_data("topic_consistency", self.topic_consistency)
        .with_data("logical_progression", self.logical_progression)
        .with_data("tense_consistency", self.tense_consistency)
        .with_data("flow_disruptions", self.flow_disruptions.iter().map(|&i| i as u64).collect::<Vec<_>>())
        .with_data("marker_categories", self.markers.keys().cloned().collect::<Vec<_>>())
    }
}
