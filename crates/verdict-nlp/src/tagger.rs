//! Lexicon + suffix POS tagging with a contextual repair pass.
//!
//! Produces Universal POS tags and Penn-style fine tags.

use crate::lexicon::{
    ADJECTIVES, ADJECTIVE_SUFFIXES, ADVERBS, BE_FORMS, COORDINATING_CONJUNCTIONS, DETERMINERS,
    DO_FORMS, HAVE_FORMS, INTERJECTIONS, LY_NON_ADVERBS, MODALS, PERSONAL_PRONOUNS,
    POSSESSIVE_DETERMINERS, PREPOSITIONS, SUBORDINATING_CONJUNCTIONS, SUFFIX_NOUN_EXCEPTIONS,
    VERBS, VERB_SUFFIXES, WH_PRONOUNS,
};

/// A coarse and fine tag pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub pos: &'static str,
    pub tag: &'static str,
}

impl Tag {
    const fn new(pos: &'static str, tag: &'static str) -> Self {
        Self { pos, tag }
    }

    fn is(&self, pos: &str) -> bool {
        self.pos == pos
    }

    fn is_nominal(&self) -> bool {
        matches!(self.pos, "NOUN" | "PROPN")
    }

    fn is_verbal(&self) -> bool {
        matches!(self.pos, "VERB" | "AUX")
    }
}

/// Tag every token of one sentence. `words` are the surface forms.
pub fn tag_sentence(words: &[&str]) -> Vec<Tag> {
    let mut tags: Vec<Tag> = words
        .iter()
        .enumerate()
        .map(|(i, w)| lexical_tag(w, i == 0 || is_opening(words.get(i.wrapping_sub(1)))))
        .collect();
    repair(words, &mut tags);
    tags
}

fn is_opening(prev: Option<&&str>) -> bool {
    matches!(prev, Some(&p) if matches!(p, "\"" | "'" | "(" | "[" | "`" | "“" | "‘" | ":" | "-"))
}

fn punct_tag(word: &str) -> Tag {
    match word {
        "." | "!" | "?" | "..." => Tag::new("PUNCT", "."),
        "," => Tag::new("PUNCT", ","),
        ":" | ";" | "-" | "--" | "—" | "–" => Tag::new("PUNCT", ":"),
        "(" | "[" | "{" => Tag::new("PUNCT", "-LRB-"),
        ")" | "]" | "}" => Tag::new("PUNCT", "-RRB-"),
        "\"" | "'" | "`" | "```" | "“" | "”" | "‘" | "’" => Tag::new("PUNCT", "''"),
        "$" | "€" | "£" => Tag::new("SYM", "$"),
        _ => Tag::new("SYM", "SYM"),
    }
}

fn be_tag(lower: &str) -> &'static str {
    match lower {
        "is" | "'s" => "VBZ",
        "are" | "am" | "'re" | "'m" => "VBP",
        "was" | "were" => "VBD",
        "been" => "VBN",
        "being" => "VBG",
        _ => "VB",
    }
}

fn aux_tag(lower: &str) -> &'static str {
    match lower {
        "has" | "does" => "VBZ",
        "had" | "did" => "VBD",
        "having" => "VBG",
        _ => "VBP",
    }
}

/// Candidate verb stems for a word ending in `s`.
pub(crate) fn third_person_stem(lower: &str) -> Option<String> {
    if !lower.ends_with('s') || lower.len() < 3 || lower.ends_with("ss") {
        return None;
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        let candidate = format!("{stem}y");
        if VERBS.contains(candidate.as_str()) {
            return Some(candidate);
        }
    }
    if let Some(stem) = lower.strip_suffix("es") {
        if VERBS.contains(stem) {
            return Some(stem.to_string());
        }
    }
    let stem = &lower[..lower.len() - 1];
    VERBS.contains(stem).then(|| stem.to_string())
}

fn has_suffix(lower: &str, suffixes: &[&str], min_len: usize) -> bool {
    lower.chars().count() >= min_len && suffixes.iter().any(|s| lower.ends_with(s))
}

fn is_plural_noun_form(lower: &str) -> bool {
    lower.len() > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
}

fn lexical_tag(word: &str, sentence_start: bool) -> Tag {
    if !word.chars().any(char::is_alphanumeric) {
        return punct_tag(word);
    }
    if word.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return Tag::new("NUM", "CD");
    }

    let lower = word.to_lowercase();
    let l = lower.as_str();
    match l {
        "n't" | "not" => return Tag::new("PART", "RB"),
        "'s" => return Tag::new("PART", "POS"),
        "to" => return Tag::new("PART", "TO"),
        "there" => return Tag::new("ADV", "RB"),
        _ => {}
    }
    if l == "that" || l == "which" || l == "what" {
        return Tag::new("DET", "WDT");
    }
    if DETERMINERS.contains(l) {
        return Tag::new("DET", "DT");
    }
    if POSSESSIVE_DETERMINERS.contains(l) {
        return Tag::new("PRON", "PRP$");
    }
    if PERSONAL_PRONOUNS.contains(l) {
        return Tag::new("PRON", "PRP");
    }
    if WH_PRONOUNS.contains(l) {
        return Tag::new("PRON", "WP");
    }
    if MODALS.contains(l) {
        return Tag::new("AUX", "MD");
    }
    if BE_FORMS.contains(l) {
        return Tag::new("AUX", be_tag(l));
    }
    if HAVE_FORMS.contains(l) || DO_FORMS.contains(l) {
        return Tag::new("AUX", aux_tag(l));
    }
    if PREPOSITIONS.contains(l) {
        return Tag::new("ADP", "IN");
    }
    if COORDINATING_CONJUNCTIONS.contains(l) {
        return Tag::new("CCONJ", "CC");
    }
    if SUBORDINATING_CONJUNCTIONS.contains(l) {
        return Tag::new("SCONJ", "IN");
    }
    if INTERJECTIONS.contains(l) {
        return Tag::new("INTJ", "UH");
    }
    if ADVERBS.contains(l) {
        return match l {
            "more" | "less" => Tag::new("ADV", "RBR"),
            "most" | "least" => Tag::new("ADV", "RBS"),
            _ => Tag::new("ADV", "RB"),
        };
    }
    if ADJECTIVES.contains(l) {
        return match l {
            "better" | "worse" => Tag::new("ADJ", "JJR"),
            "best" | "worst" => Tag::new("ADJ", "JJS"),
            _ => Tag::new("ADJ", "JJ"),
        };
    }

    let first_upper = word.chars().next().is_some_and(char::is_uppercase);
    let all_upper = word.chars().count() >= 2
        && word.chars().all(|c| !c.is_alphabetic() || c.is_uppercase());
    if all_upper || (first_upper && !sentence_start) {
        return Tag::new("PROPN", "NNP");
    }

    if VERBS.contains(l) {
        return Tag::new("VERB", "VB");
    }
    if third_person_stem(l).is_some() {
        return Tag::new("VERB", "VBZ");
    }
    if l.ends_with("ing") && l.len() > 4 {
        return Tag::new("VERB", "VBG");
    }
    if l.ends_with("ed") && l.len() > 3 {
        return Tag::new("VERB", "VBD");
    }
    if l.ends_with("ly") && l.len() > 4 && !LY_NON_ADVERBS.contains(l) {
        return Tag::new("ADV", "RB");
    }
    if SUFFIX_NOUN_EXCEPTIONS.contains(l) {
        return if is_plural_noun_form(l) {
            Tag::new("NOUN", "NNS")
        } else {
            Tag::new("NOUN", "NN")
        };
    }
    if has_suffix(l, VERB_SUFFIXES, 6) {
        return Tag::new("VERB", "VB");
    }
    if has_suffix(l, ADJECTIVE_SUFFIXES, 5) {
        return Tag::new("ADJ", "JJ");
    }
    if is_plural_noun_form(l) {
        return Tag::new("NOUN", "NNS");
    }
    Tag::new("NOUN", "NN")
}

fn noun_for(word: &str) -> Tag {
    if is_plural_noun_form(&word.to_lowercase()) {
        Tag::new("NOUN", "NNS")
    } else {
        Tag::new("NOUN", "NN")
    }
}

/// Next index that is not an adverb or particle negation.
fn next_content(tags: &[Tag], from: usize) -> Option<usize> {
    (from..tags.len()).find(|&j| !matches!(tags[j].pos, "ADV" | "PART") || tags[j].tag == "TO")
}

fn repair(words: &[&str], tags: &mut [Tag]) {
    let n = tags.len();
    for i in 0..n {
        let lower = words[i].to_lowercase();
        let prev = if i > 0 { Some(tags[i - 1].clone()) } else { None };
        let next = tags.get(i + 1).cloned();

        match (tags[i].pos, tags[i].tag) {
            // "the use", "in control", "a running start"
            ("VERB", "VB" | "VBZ" | "VBG") => {
                let nominal_context = prev.as_ref().is_some_and(|p| {
                    matches!(p.pos, "DET" | "ADJ" | "NUM")
                        || p.tag == "PRP$"
                        || p.tag == "POS"
                        || (p.pos == "ADP" && tags[i].tag != "VBG")
                });
                let after_finite_verb = prev
                    .as_ref()
                    .is_some_and(|p| p.is_verbal() && p.tag != "MD" && tags[i].tag == "VBZ");
                if nominal_context || after_finite_verb {
                    tags[i] = noun_for(words[i]);
                } else if tags[i].tag == "VB" {
                    tags[i] = match prev.as_ref() {
                        Some(p) if p.tag == "MD" || p.tag == "TO" || DO_FORMS.contains(words[i - 1].to_lowercase().as_str()) => {
                            Tag::new("VERB", "VB")
                        }
                        Some(p) if p.tag == "PRP" || p.tag == "NNS" => Tag::new("VERB", "VBP"),
                        None => Tag::new("VERB", "VB"),
                        Some(p) if p.is_nominal() => Tag::new("VERB", "VBP"),
                        Some(_) => Tag::new("VERB", "VB"),
                    };
                }
            }
            ("VERB", "VBD") => {
                let after_aux = prev.as_ref().is_some_and(|p| p.pos == "AUX");
                let modifies_noun = next.as_ref().is_some_and(Tag::is_nominal)
                    && !prev
                        .as_ref()
                        .is_some_and(|p| p.is_nominal() || p.is("PRON"));
                if after_aux {
                    tags[i] = Tag::new("VERB", "VBN");
                } else if modifies_noun {
                    tags[i] = Tag::new("ADJ", "JJ");
                }
            }
            ("PART", "TO") => {
                let verb_follows = next.as_ref().is_some_and(|t| t.is("VERB") || t.is("AUX"))
                    || words
                        .get(i + 1)
                        .is_some_and(|w| VERBS.contains(w.to_lowercase().as_str()));
                if !verb_follows {
                    tags[i] = Tag::new("ADP", "IN");
                }
            }
            ("PART", "POS") => {
                if prev.as_ref().is_some_and(|p| p.is("PRON") || p.tag == "WDT") {
                    tags[i] = Tag::new("AUX", "VBZ");
                }
            }
            ("AUX", _) if HAVE_FORMS.contains(lower.as_str()) || DO_FORMS.contains(lower.as_str()) => {
                let verb_follows = next_content(tags, i + 1).is_some_and(|j| {
                    tags[j].is("VERB") || (tags[j].is("AUX") && tags[j].tag != "MD")
                });
                if !verb_follows {
                    tags[i] = Tag::new("VERB", tags[i].tag);
                }
            }
            ("PRON", "PRP$") if lower == "her" => {
                let modifies = next
                    .as_ref()
                    .is_some_and(|t| t.is_nominal() || t.is("ADJ") || t.is("NUM"));
                if !modifies {
                    tags[i] = Tag::new("PRON", "PRP");
                }
            }
            ("DET", "WDT") => {
                tags[i] = match next.as_ref() {
                    Some(t) if t.is_nominal() || t.is("ADJ") => Tag::new("DET", "DT"),
                    Some(t) if t.is_verbal() => Tag::new("PRON", "WDT"),
                    Some(t) if (t.is("DET") || t.is("PRON") || t.is("PROPN"))
                        && prev.as_ref().is_some_and(|p| p.is_verbal() || p.is("ADJ") || p.is("NOUN")) =>
                    {
                        Tag::new("SCONJ", "IN")
                    }
                    _ if lower == "that" => Tag::new("PRON", "DT"),
                    _ => Tag::new("PRON", "WP"),
                };
            }
            ("ADV", "RB") if lower == "there" => {
                if next.as_ref().is_some_and(|t| t.is("AUX")) {
                    tags[i] = Tag::new("PRON", "EX");
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos_of(sentence: &str) -> Vec<&'static str> {
        let tokens = crate::tokenizer::tokenize(sentence);
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        tag_sentence(&words).into_iter().map(|t| t.pos).collect()
    }

    #[test]
    fn tags_simple_declarative() {
        assert_eq!(
            pos_of("The documentation is comprehensive."),
            vec!["DET", "NOUN", "AUX", "ADJ", "PUNCT"]
        );
    }

    #[test]
    fn verb_after_noun_subject_stays_verb() {
        assert_eq!(
            pos_of("The magical fairy tale features enchanted creatures."),
            vec!["DET", "ADJ", "NOUN", "NOUN", "VERB", "ADJ", "NOUN", "PUNCT"]
        );
    }

    #[test]
    fn verb_lemma_after_determiner_becomes_noun() {
        let tags = pos_of("The use of caching helps.");
        assert_eq!(tags[1], "NOUN");
    }

    #[test]
    fn infinitive_to_is_particle() {
        let tags = pos_of("It uses settings to control behavior.");
        assert_eq!(tags, vec!["PRON", "VERB", "NOUN", "PART", "VERB", "NOUN", "PUNCT"]);
    }

    #[test]
    fn contraction_after_pronoun_is_auxiliary() {
        let tags = pos_of("It's fine.");
        assert_eq!(tags, vec!["PRON", "AUX", "ADJ", "PUNCT"]);
    }

    #[test]
    fn possessive_after_noun_is_particle() {
        let tags = pos_of("The team's plan works.");
        assert_eq!(tags[2], "PART");
    }

    #[test]
    fn proper_nouns_mid_sentence() {
        let tags = pos_of("We met Alice in Paris.");
        assert_eq!(tags[2], "PROPN");
        assert_eq!(tags[4], "PROPN");
    }
}
