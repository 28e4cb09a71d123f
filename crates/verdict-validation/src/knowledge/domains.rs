//! Domain profiles, rule relevance and audience tables for the domain validator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{list, scores, table};

/// Style a domain expects of its prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleExpectation {
    /// Preferred average sentence length in words, inclusive range.
    pub min_sentence_length: f64,
    pub max_sentence_length: f64,
    /// `formal`, `neutral` or `informal`.
    pub formality: String,
    /// `positive`, `neutral` or `negative`.
    pub tone: String,
    pub conventions: Vec<String>,
}

/// Everything known about one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainProfile {
    /// Expected audience name, a key of `DomainKnowledge::audiences`.
    pub audience: String,
    pub audience_is_technical: bool,
    /// Case-insensitive regexes whose matches indicate this domain.
    pub patterns: Vec<String>,
    /// Rule-name fragments that apply strongly in this domain.
    pub high_applicability: Vec<String>,
    pub medium_applicability: Vec<String>,
    pub style: StyleExpectation,
    /// casual / vague / cross_domain_jargon word lists.
    pub inappropriate_terms: BTreeMap<String, Vec<String>>,
    /// Preferred alternatives for common words.
    pub synonyms: BTreeMap<String, Vec<String>>,
    /// Named exceptions keyed by rule type.
    pub rule_exceptions: BTreeMap<String, Vec<String>>,
}

impl DomainProfile {
    pub fn exceptions_for(&self, rule_type: &str) -> &[String] {
        self.rule_exceptions
            .get(rule_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Inappropriate-term category containing `lower`, if any.
    pub fn inappropriate_category(&self, lower: &str) -> Option<&str> {
        self.inappropriate_terms
            .iter()
            .find(|(_, words)| words.iter().any(|w| w == lower))
            .map(|(category, _)| category.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceProfile {
    /// 0 (lay reader) to 1 (specialist).
    pub technical_level: f64,
    pub expected_knowledge: Vec<String>,
}

/// Audience forced for a rule type within a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceOverride {
    pub rule_type: String,
    pub domain: String,
    pub audience: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainKnowledge {
    /// Domain used when nothing matches.
    pub default_domain: String,
    /// Relevance for a rule type missing from `rule_relevance`.
    pub default_relevance: f64,
    pub default_audience_alignment: f64,
    /// Audience rules that win over the domain's default audience.
    pub audience_overrides: Vec<AudienceOverride>,
    pub domains: BTreeMap<String, DomainProfile>,
    /// rule type → domain → relevance in `[0, 1]`.
    pub rule_relevance: BTreeMap<String, BTreeMap<String, f64>>,
    /// Content type → domains it is consistent with.
    pub content_type_domains: BTreeMap<String, Vec<String>>,
    /// Per rule type, base audience alignment.
    pub audience_base: BTreeMap<String, f64>,
    /// Per rule type, adjustment when the audience is technical.
    pub technical_audience_adjustment: BTreeMap<String, f64>,
    /// Per rule type, adjustment when the audience is general.
    pub general_audience_adjustment: BTreeMap<String, f64>,
    pub audiences: BTreeMap<String, AudienceProfile>,
}

fn style(min: f64, max: f64, formality: &str, tone: &str, conventions: &[&str]) -> StyleExpectation {
    StyleExpectation {
        min_sentence_length: min,
        max_sentence_length: max,
        formality: formality.to_string(),
        tone: tone.to_string(),
        conventions: list(conventions),
    }
}

fn technical() -> DomainProfile {
    DomainProfile {
        audience: "technical_professionals".to_string(),
        audience_is_technical: true,
        patterns: list(&[
            r"\b(api|apis|sdk|cli|json|yaml|xml|http|https|url|sql)\b",
            r"\b(function|method|class|module|library|framework|interface)s?\b",
            r"\b(server|client|database|cache|queue|thread|process|kernel)s?\b",
            r"\b(config|configuration|parameter|argument|variable|setting)s?\b",
            r"\b(deploy|compile|debug|install|execute|implement|refactor)\w*\b",
            r"\b(algorithm|protocol|endpoint|repository|runtime|latency)s?\b",
            r"\b(code|software|system|data|retries|behavior)\b",
        ]),
        high_applicability: list(&["terminology", "technical", "precision", "consistency", "jargon", "acronym"]),
        medium_applicability: list(&["passive", "clarity", "sentence_length", "grammar"]),
        style: style(10.0, 25.0, "formal", "neutral", &["code_formatting", "precise_terminology", "imperative_instructions"]),
        inappropriate_terms: table(&[
            ("casual", &["stuff", "thing", "things", "gonna", "kinda", "awesome", "cool"]),
            ("vague", &["somehow", "something", "various", "etc", "whatever", "some"]),
            ("cross_domain_jargon", &["synergy", "enchanted", "magical", "whimsical", "paradigm"]),
        ]),
        synonyms: table(&[
            ("use", &["utilize", "employ"]),
            ("start", &["initialize", "launch"]),
            ("fix", &["resolve", "patch"]),
            ("show", &["display", "render"]),
            ("make", &["create", "generate"]),
            ("get", &["retrieve", "fetch"]),
        ]),
        rule_exceptions: table(&[
            ("style", &["imperative_mood_acceptable", "code_identifiers_exempt"]),
            ("grammar", &["code_fragments_exempt"]),
        ]),
    }
}

fn business() -> DomainProfile {
    DomainProfile {
        audience: "business_professionals".to_string(),
        audience_is_technical: false,
        patterns: list(&[
            r"\b(revenue|profit|sales|budget|cost|pricing|invoice)s?\b",
            r"\b(customer|client|stakeholder|partner|vendor|investor)s?\b",
            r"\b(market|strategy|growth|roi|kpi|quarter|forecast)s?\b",
            r"\b(meeting|proposal|contract|agreement|deadline|deliverable)s?\b",
            r"\b(management|leadership|team|department|company|organization)s?\b",
        ]),
        high_applicability: list(&["conciseness", "tone", "clarity", "professional", "wordiness"]),
        medium_applicability: list(&["passive", "terminology", "formality"]),
        style: style(12.0, 22.0, "formal", "positive", &["executive_summary", "action_items", "bullet_points"]),
        inappropriate_terms: table(&[
            ("casual", &["gonna", "wanna", "stuff", "awesome", "cool", "guys"]),
            ("vague", &["soon", "somehow", "various", "whatever"]),
            ("cross_domain_jargon", &["enchanted", "hypothesis", "mutex", "kernel"]),
        ]),
        synonyms: table(&[
            ("use", &["leverage", "apply"]),
            ("help", &["support", "assist"]),
            ("buy", &["purchase", "acquire"]),
            ("talk", &["discuss", "communicate"]),
        ]),
        rule_exceptions: table(&[("style", &["industry_terminology_acceptable"])]),
    }
}

fn academic() -> DomainProfile {
    DomainProfile {
        audience: "academics".to_string(),
        audience_is_technical: true,
        patterns: list(&[
            r"\b(research|study|studies|analysis|analyses|hypothesis|hypotheses)\b",
            r"\b(theory|theories|methodology|literature|findings|evidence)\b",
            r"\b(experiment|sample|participants|variable|correlation|significant)s?\b",
            r"\b(journal|publication|citation|scholar|peer|thesis|dissertation)s?\b",
            r"\b(furthermore|moreover|therefore|consequently|thus)\b",
        ]),
        high_applicability: list(&["citation", "formality", "terminology", "precision", "passive", "hedging"]),
        medium_applicability: list(&["sentence_length", "clarity", "grammar"]),
        style: style(15.0, 30.0, "formal", "neutral", &["citations", "objective_voice", "hedged_claims"]),
        inappropriate_terms: table(&[
            ("casual", &["stuff", "gonna", "awesome", "cool", "totally", "basically"]),
            ("vague", &["things", "lots", "somehow", "pretty"]),
            ("cross_domain_jargon", &["synergy", "monetize", "magical"]),
        ]),
        synonyms: table(&[
            ("show", &["demonstrate", "indicate"]),
            ("use", &["employ", "apply"]),
            ("big", &["substantial", "considerable"]),
            ("think", &["posit", "argue"]),
        ]),
        rule_exceptions: table(&[("style", &["passive_voice_conventional"])]),
    }
}

fn creative() -> DomainProfile {
    DomainProfile {
        audience: "general_readers".to_string(),
        audience_is_technical: false,
        patterns: list(&[
            r"\b(story|stories|tale|tales|fable|legend|myth|poem|novel|chapter)\b",
            r"\b(magic|magical|enchanted|mystical|fairy|wizard|dragon|witch)\w*\b",
            r"\b(creature|hero|heroine|villain|princess|prince|king|queen|character)s?\b",
            r"\b(forest|castle|kingdom|village|journey|adventure|quest|dream)s?\b",
            r"\b(whisper|shimmer|glow|wander|gaze)\w*\b",
        ]),
        high_applicability: list(&["imagery", "voice", "repetition", "flow", "dialogue"]),
        medium_applicability: list(&["sentence_variety", "word_choice", "tone"]),
        style: style(5.0, 35.0, "informal", "positive", &["vivid_imagery", "varied_rhythm", "dialogue"]),
        inappropriate_terms: table(&[
            ("casual", &["lol", "btw", "omg"]),
            ("vague", &["stuff", "thing"]),
            ("cross_domain_jargon", &["api", "synergy", "stakeholder", "deliverable", "methodology"]),
        ]),
        synonyms: table(&[
            ("said", &["whispered", "declared"]),
            ("walk", &["wander", "stroll"]),
            ("big", &["towering", "vast"]),
            ("look", &["gaze", "glance"]),
        ]),
        rule_exceptions: table(&[
            ("grammar", &["artistic_license_acceptable", "fragments_for_effect"]),
            ("style", &["stylistic_repetition_acceptable"]),
            ("terminology", &["invented_terms_acceptable"]),
        ]),
    }
}

fn general() -> DomainProfile {
    DomainProfile {
        audience: "general_readers".to_string(),
        audience_is_technical: false,
        patterns: list(&[
            r"\b(people|person|everyday|life|home|family|friend|world)s?\b",
            r"\b(today|tomorrow|yesterday|week|weekend|month|year)s?\b",
        ]),
        high_applicability: list(&["grammar", "spelling", "punctuation", "clarity"]),
        medium_applicability: list(&["style", "conciseness", "readability"]),
        style: style(8.0, 22.0, "neutral", "neutral", &["plain_language"]),
        inappropriate_terms: table(&[
            ("casual", &["omg", "lol"]),
            ("vague", &["stuff"]),
            ("cross_domain_jargon", &["heuristic", "paradigm", "synergy"]),
        ]),
        synonyms: table(&[
            ("utilize", &["use"]),
            ("commence", &["start", "begin"]),
            ("facilitate", &["help"]),
        ]),
        rule_exceptions: BTreeMap::new(),
    }
}

fn relevance_row(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    scores(entries)
}

impl Default for DomainKnowledge {
    fn default() -> Self {
        let domains = [
            ("technical", technical()),
            ("business", business()),
            ("academic", academic()),
            ("creative", creative()),
            ("general", general()),
        ]
        .into_iter()
        .map(|(name, profile)| (name.to_string(), profile))
        .collect();

        let rule_relevance = [
            ("grammar", relevance_row(&[("technical", 0.9), ("business", 0.9), ("academic", 1.0), ("creative", 0.6), ("general", 0.9)])),
            ("spelling", relevance_row(&[("technical", 1.0), ("business", 1.0), ("academic", 1.0), ("creative", 0.8), ("general", 1.0)])),
            ("punctuation", relevance_row(&[("technical", 0.8), ("business", 0.8), ("academic", 0.9), ("creative", 0.5), ("general", 0.8)])),
            ("style", relevance_row(&[("technical", 0.7), ("business", 0.8), ("academic", 0.8), ("creative", 0.5), ("general", 0.7)])),
            ("terminology", relevance_row(&[("technical", 1.0), ("business", 0.7), ("academic", 0.9), ("creative", 0.2), ("general", 0.4)])),
            ("tone", relevance_row(&[("technical", 0.5), ("business", 0.9), ("academic", 0.7), ("creative", 0.6), ("general", 0.6)])),
            ("content", relevance_row(&[("technical", 0.7), ("business", 0.8), ("academic", 0.8), ("creative", 0.4), ("general", 0.6)])),
        ]
        .into_iter()
        .map(|(rule_type, row)| (rule_type.to_string(), row))
        .collect();

        let audiences = [
            ("developers", 0.9, &["programming", "apis", "tooling"][..]),
            ("technical_professionals", 0.8, &["domain_terminology", "system_concepts"][..]),
            ("academics", 0.7, &["research_methods", "field_literature"][..]),
            ("business_professionals", 0.4, &["business_terminology", "market_context"][..]),
            ("general_readers", 0.2, &["everyday_vocabulary"][..]),
        ]
        .into_iter()
        .map(|(name, level, knowledge)| {
            (
                name.to_string(),
                AudienceProfile {
                    technical_level: level,
                    expected_knowledge: list(knowledge),
                },
            )
        })
        .collect();

        Self {
            default_domain: "general".to_string(),
            default_relevance: 0.5,
            default_audience_alignment: 0.6,
            audience_overrides: vec![
                AudienceOverride {
                    rule_type: "terminology".to_string(),
                    domain: "technical".to_string(),
                    audience: "developers".to_string(),
                },
                AudienceOverride {
                    rule_type: "terminology".to_string(),
                    domain: "academic".to_string(),
                    audience: "academics".to_string(),
                },
            ],
            domains,
            rule_relevance,
            content_type_domains: table(&[
                ("technical", &["technical"]),
                ("documentation", &["technical", "business"]),
                ("api_reference", &["technical"]),
                ("procedural", &["technical", "general"]),
                ("business", &["business"]),
                ("marketing", &["business", "general"]),
                ("academic", &["academic"]),
                ("research", &["academic", "technical"]),
                ("narrative", &["creative", "general"]),
                ("creative", &["creative"]),
                ("general", &["general"]),
            ]),
            audience_base: scores(&[
                ("grammar", 0.8),
                ("spelling", 0.9),
                ("punctuation", 0.7),
                ("style", 0.6),
                ("terminology", 0.7),
                ("tone", 0.6),
            ]),
            technical_audience_adjustment: scores(&[
                ("terminology", 0.2),
                ("style", -0.1),
                ("tone", -0.1),
            ]),
            general_audience_adjustment: scores(&[
                ("terminology", -0.2),
                ("style", 0.1),
                ("grammar", 0.1),
            ]),
            audiences,
        }
    }
}

impl DomainKnowledge {
    pub fn profile(&self, domain: &str) -> Option<&DomainProfile> {
        self.domains.get(domain)
    }

    pub fn relevance(&self, rule_type: &str, domain: &str) -> f64 {
        self.rule_relevance
            .get(rule_type)
            .and_then(|row| row.get(domain))
            .copied()
            .unwrap_or(self.default_relevance)
    }

    pub fn content_type_matches(&self, content_type: &str, domain: &str) -> bool {
        self.content_type_domains
            .get(content_type)
            .is_some_and(|domains| domains.iter().any(|d| d == domain))
    }

    /// Base alignment for a rule type, adjusted for a technical or general audience.
    pub fn audience_alignment(&self, rule_type: &str, technical_audience: bool) -> f64 {
        let base = self
            .audience_base
            .get(rule_type)
            .copied()
            .unwrap_or(self.default_audience_alignment);
        let adjustments = if technical_audience {
            &self.technical_audience_adjustment
        } else {
            &self.general_audience_adjustment
        };
        (base + adjustments.get(rule_type).copied().unwrap_or(0.0)).clamp(0.0, 1.0)
    }

    pub fn audience_override(&self, rule_type: &str, domain: &str) -> Option<&str> {
        self.audience_overrides
            .iter()
            .find(|o| o.rule_type == rule_type && o.domain == domain)
            .map(|o| o.audience.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_domains_with_known_audiences() {
        let kb = DomainKnowledge::default();
        assert_eq!(kb.domains.len(), 5);
        for profile in kb.domains.values() {
            assert!(kb.audiences.contains_key(&profile.audience), "{}", profile.audience);
            assert!(profile.style.min_sentence_length < profile.style.max_sentence_length);
        }
    }

    #[test]
    fn terminology_matters_little_in_creative_writing() {
        let kb = DomainKnowledge::default();
        assert!(kb.relevance("terminology", "creative") < kb.relevance("terminology", "technical"));
        assert_eq!(kb.relevance("unheard_of", "technical"), kb.default_relevance);
    }

    #[test]
    fn creative_grammar_has_artistic_license() {
        let kb = DomainKnowledge::default();
        let creative = kb.profile("creative").unwrap();
        assert!(creative
            .exceptions_for("grammar")
            .iter()
            .any(|e| e == "artistic_license_acceptable"));
        assert!(creative.exceptions_for("spelling").is_empty());
    }

    #[test]
    fn audience_alignment_stays_in_unit_range() {
        let kb = DomainKnowledge::default();
        assert!((kb.audience_alignment("terminology", true) - 0.9).abs() < 1e-9);
        assert!((kb.audience_alignment("terminology", false) - 0.5).abs() < 1e-9);
        assert_eq!(kb.audience_override("terminology", "technical"), Some("developers"));
    }
}
