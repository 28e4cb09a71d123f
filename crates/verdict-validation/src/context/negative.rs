//! Negative evidence: signals that a flagged span is quoted, legacy or code.
//!
//! Works on raw characters so it can run before any NLP analysis.

use verdict_core::models::ValidationEvidence;

use crate::knowledge::{CompiledSyntaxPatterns, NegativeEvidenceKnowledge};

pub const EVIDENCE_TYPE: &str = "negative_context";

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegativeSignalKind {
    Quoted,
    Legacy,
    InlineCode,
    CodeFence,
    TechnicalSyntax,
}

impl NegativeSignalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quoted => "quoted",
            Self::Legacy => "legacy_marker",
            Self::InlineCode => "inline_code",
            Self::CodeFence => "code_fence",
            Self::TechnicalSyntax => "technical_syntax",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NegativeSignal {
    pub kind: NegativeSignalKind,
    pub confidence: f64,
    pub detail: String,
}

impl NegativeSignal {
    pub fn to_evidence(&self) -> ValidationEvidence {
        ValidationEvidence::new(EVIDENCE_TYPE, self.confidence, self.detail.clone())
            .with_data("signal", self.kind.as_str())
    }
}

/// Character view of the text around the error span.
struct Span<'a> {
    chars: &'a [char],
    start: usize,
    end: usize,
}

impl Span<'_> {
    fn line_bounds(&self) -> (usize, usize) {
        let line_start = self.chars[..self.start]
            .iter()
            .rposition(|c| *c == '\n')
            .map_or(0, |i| i + 1);
        let line_end = self.chars[self.end..]
            .iter()
            .position(|c| *c == '\n')
            .map_or(self.chars.len(), |i| self.end + i);
        (line_start, line_end)
    }

    /// Distance in characters from `[from, to)` to the error span; 0 when they overlap.
    fn distance(&self, from: usize, to: usize) -> usize {
        if to <= self.start {
            self.start - to
        } else if from >= self.end {
            from - self.end
        } else {
            0
        }
    }
}

/// Scan for every negative signal around the error.
pub fn scan(
    text: &str,
    error_position: usize,
    error_text: &str,
    knowledge: &NegativeEvidenceKnowledge,
    patterns: &CompiledSyntaxPatterns,
) -> Vec<NegativeSignal> {
    let chars: Vec<char> = text.chars().collect();
    let start = error_position.min(chars.len());
    let end = (start + error_text.chars().count()).min(chars.len());
    let span = Span { chars: &chars, start, end };

    let mut signals = Vec::new();
    if let Some(quote) = enclosing_quote(&span, knowledge) {
        signals.push(NegativeSignal {
            kind: NegativeSignalKind::Quoted,
            confidence: knowledge.quote_confidence,
            detail: format!("error span is enclosed in {quote} quotes"),
        });
    }
    if let Some(marker) = nearest_legacy_marker(&span, text, knowledge, patterns) {
        signals.push(NegativeSignal {
            kind: NegativeSignalKind::Legacy,
            confidence: knowledge.legacy_confidence,
            detail: format!("legacy marker '{marker}' near the error"),
        });
    }
    if inside_code_fence(text, &span) {
        signals.push(NegativeSignal {
            kind: NegativeSignalKind::CodeFence,
            confidence: knowledge.code_fence_confidence,
            detail: "error span is inside a fenced code block".to_string(),
        });
    } else if inside_inline_code(&span) {
        signals.push(NegativeSignal {
            kind: NegativeSignalKind::InlineCode,
            confidence: knowledge.inline_code_confidence,
            detail: "error span is inside inline code backticks".to_string(),
        });
    }
    if let Some(token) = nearby_technical_syntax(&span, knowledge, patterns) {
        signals.push(NegativeSignal {
            kind: NegativeSignalKind::TechnicalSyntax,
            confidence: knowledge.technical_syntax_confidence,
            detail: format!("technical syntax '{token}' near the error"),
        });
    }
    signals
}

/// Cumulative confidence of a signal set.
pub fn total_confidence(signals: &[NegativeSignal]) -> f64 {
    signals.iter().map(|s| s.confidence).sum()
}

fn is_word_char(c: Option<&char>) -> bool {
    c.is_some_and(|c| c.is_alphanumeric())
}

/// Straight quote left open before `until`.
///
/// Openers follow a non-word character and closers precede one, so
/// contractions and trailing possessive apostrophes (`users'`) never pair.
fn open_straight_quote(chars: &[char], from: usize, until: usize, quote: char) -> Option<usize> {
    let mut open = None;
    for i in (from..until).filter(|&i| chars[i] == quote) {
        let after_word = is_word_char(i.checked_sub(1).and_then(|j| chars.get(j)));
        let before_word = is_word_char(chars.get(i + 1));
        match open {
            None if !after_word => open = Some(i),
            Some(_) if !before_word => open = None,
            _ => {}
        }
    }
    open
}

fn enclosing_quote(span: &Span<'_>, knowledge: &NegativeEvidenceKnowledge) -> Option<char> {
    let (line_start, line_end) = span.line_bounds();
    let scan_start = span.start.saturating_sub(knowledge.scan_window).max(line_start);
    let scan_end = (span.end + knowledge.scan_window).min(line_end);

    knowledge
        .quote_chars
        .iter()
        .filter_map(|q| q.chars().next())
        .find(|&open| {
            let close = NegativeEvidenceKnowledge::closing_quote(open);
            if open == close {
                let opened = open_straight_quote(span.chars, line_start, span.start, open);
                let closes_after = (span.end..scan_end)
                    .any(|i| span.chars[i] == close && !is_word_char(span.chars.get(i + 1)));
                opened.is_some_and(|i| i >= scan_start) && closes_after
            } else {
                let last_open = (scan_start..span.start)
                    .filter(|&i| span.chars[i] == open)
                    .last();
                let closed_between = last_open.is_some_and(|o| {
                    (o + 1..span.start).any(|i| span.chars[i] == close)
                });
                let closes_after = (span.end..scan_end).any(|i| span.chars[i] == close);
                last_open.is_some() && !closed_between && closes_after
            }
        })
        .or_else(|| wrapped_span(span, knowledge))
}

/// The flagged text itself starts and ends with a matching quote pair.
fn wrapped_span(span: &Span<'_>, knowledge: &NegativeEvidenceKnowledge) -> Option<char> {
    if span.end < span.start + 2 {
        return None;
    }
    let first = span.chars[span.start];
    let last = span.chars[span.end - 1];
    knowledge
        .quote_chars
        .iter()
        .filter_map(|q| q.chars().next())
        .find(|&open| first == open && last == NegativeEvidenceKnowledge::closing_quote(open))
}

fn nearest_legacy_marker(
    span: &Span<'_>,
    text: &str,
    knowledge: &NegativeEvidenceKnowledge,
    patterns: &CompiledSyntaxPatterns,
) -> Option<String> {
    patterns
        .legacy_spans(text)
        .into_iter()
        .map(|(from, to, word)| (span.distance(from, to), word))
        .filter(|(distance, _)| *distance <= knowledge.legacy_window)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, word)| word)
}

fn fence_starts(text: &str) -> Vec<usize> {
    text.match_indices(FENCE)
        .map(|(byte, _)| text[..byte].chars().count())
        .collect()
}

fn inside_code_fence(text: &str, span: &Span<'_>) -> bool {
    let fences = fence_starts(text);
    let before = fences.iter().filter(|&&f| f + FENCE.len() <= span.start).count();
    let after = fences.iter().any(|&f| f >= span.end);
    before % 2 == 1 && after
}

/// Single backticks on the same line, ignoring fence runs.
fn inside_inline_code(span: &Span<'_>) -> bool {
    let (line_start, line_end) = span.line_bounds();
    let is_single_tick = |i: usize| {
        span.chars[i] == '`'
            && i.checked_sub(1).map_or(true, |j| span.chars[j] != '`')
            && span.chars.get(i + 1) != Some(&'`')
    };
    let before = (line_start..span.start).filter(|&i| is_single_tick(i)).count();
    let after = (span.end..line_end).any(is_single_tick);
    before % 2 == 1 && after
}

fn nearby_technical_syntax(
    span: &Span<'_>,
    knowledge: &NegativeEvidenceKnowledge,
    patterns: &CompiledSyntaxPatterns,
) -> Option<String> {
    let window_start = span.start.saturating_sub(knowledge.scan_window);
    let window_end = (span.end + knowledge.scan_window).min(span.chars.len());
    let window: String = span.chars[window_start..window_end].iter().collect();

    patterns
        .syntax_spans(&window)
        .into_iter()
        .map(|(from, to)| (from + window_start, to + window_start))
        .map(|(from, to)| (span.distance(from, to), from, to))
        .filter(|(distance, _, _)| *distance <= knowledge.technical_syntax_window)
        .min_by_key(|(distance, _, _)| *distance)
        .map(|(_, from, to)| span.chars[from..to].iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, needle: &str) -> Vec<NegativeSignal> {
        let knowledge = NegativeEvidenceKnowledge::default();
        let patterns = CompiledSyntaxPatterns::compile(&knowledge).unwrap();
        let byte = text.find(needle).unwrap();
        let position = text[..byte].chars().count();
        scan(text, position, needle, &knowledge, &patterns)
    }

    fn kinds(signals: &[NegativeSignal]) -> Vec<NegativeSignalKind> {
        signals.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn backticks_are_quote_and_inline_code() {
        let signals = run("The config uses `max_retries` to control behavior.", "max_retries");
        assert_eq!(
            kinds(&signals),
            vec![NegativeSignalKind::Quoted, NegativeSignalKind::InlineCode]
        );
        assert!(total_confidence(&signals) >= 0.85);
    }

    #[test]
    fn apostrophes_inside_words_are_not_quotes() {
        let signals = run("It's fine and the team doesn't mind.", "team");
        assert!(signals.is_empty());
    }

    #[test]
    fn double_quotes_bracket_the_span() {
        let signals = run("He called it \"irregardless\" on purpose.", "irregardless");
        assert_eq!(kinds(&signals), vec![NegativeSignalKind::Quoted]);
    }

    #[test]
    fn possessive_apostrophe_does_not_unbalance_single_quotes() {
        let signals = run("The users' guide calls it 'utilize' everywhere.", "utilize");
        assert_eq!(kinds(&signals), vec![NegativeSignalKind::Quoted]);
        assert_eq!(signals[0].detail, "error span is enclosed in ' quotes");

        assert!(run("The users' guide says utilize everywhere.", "utilize").is_empty());
    }

    #[test]
    fn legacy_marker_within_window() {
        let signals = run("This deprecated endpoint utilises the old flow.", "utilises");
        assert_eq!(kinds(&signals), vec![NegativeSignalKind::Legacy]);

        let far = format!("Deprecated.{} The endpoint utilises it.", " ".repeat(80));
        assert!(run(&far, "utilises").is_empty());
    }

    #[test]
    fn fenced_code_wins_over_inline() {
        let text = "Example:\n```\nlet x = foo;\n```\nDone.";
        let signals = run(text, "foo");
        assert_eq!(kinds(&signals), vec![NegativeSignalKind::CodeFence]);
    }

    #[test]
    fn technical_syntax_nearby() {
        let signals = run("Call handler => respond quickly.", "respond");
        assert_eq!(kinds(&signals), vec![NegativeSignalKind::TechnicalSyntax]);
        assert_eq!(signals[0].confidence, 0.7);
    }

    #[test]
    fn out_of_range_position_is_harmless() {
        let knowledge = NegativeEvidenceKnowledge::default();
        let patterns = CompiledSyntaxPatterns::compile(&knowledge).unwrap();
        assert!(scan("short", 500, "word", &knowledge, &patterns).is_empty());
        assert!(scan("", 0, "", &knowledge, &patterns).is_empty());
    }
}
