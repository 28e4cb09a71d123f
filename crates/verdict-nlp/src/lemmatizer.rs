//! Suffix-stripping lemmatizer backed by an irregular-form table.

use crate::lexicon::{IRREGULAR_LEMMAS, VERBS};

/// Stems that take a silent `e` in their base form (`comput` -> `compute`).
const E_RESTORING_ENDINGS: &[&str] = &[
    "at", "ut", "iz", "ys", "ag", "rg", "ud", "uc", "ur", "ov", "iv", "av", "ev", "ak", "ot",
    "in", "ar", "ir", "id", "ib", "ok", "as", "ag", "bl", "pl", "tl", "rs", "ps",
];

/// Lemma for `text` given its coarse and fine tags.
pub fn lemmatize(text: &str, pos: &str, tag: &str) -> String {
    if pos == "PROPN" {
        return text.to_string();
    }
    let lower = text.to_lowercase().replace('’', "'");
    if matches!(pos, "PUNCT" | "SYM" | "NUM") {
        return lower;
    }
    if pos == "AUX" && lower == "'s" {
        return "be".to_string();
    }
    if pos == "PART" && lower == "'s" {
        return lower;
    }
    if let Some(lemma) = IRREGULAR_LEMMAS.get(lower.as_str()) {
        // "her" stays "her" as a possessive determiner
        if tag == "PRP$" && lower == "her" {
            return lower;
        }
        if pos == "ADJ" && matches!(lower.as_str(), "better" | "best") {
            return "good".to_string();
        }
        return (*lemma).to_string();
    }

    match (pos, tag) {
        ("NOUN", "NNS") => singular(&lower),
        ("VERB" | "AUX", "VBZ") => singular(&lower),
        ("VERB" | "AUX", "VBG") => strip_inflection(&lower, "ing"),
        ("VERB" | "AUX", "VBD" | "VBN") => {
            if lower.ends_with("ied") && lower.len() > 4 {
                format!("{}y", &lower[..lower.len() - 3])
            } else if lower.ends_with("ed") {
                strip_inflection(&lower, "ed")
            } else {
                lower
            }
        }
        _ => lower,
    }
}

fn singular(lower: &str) -> String {
    if lower.len() > 4 && lower.ends_with("ies") {
        return format!("{}y", &lower[..lower.len() - 3]);
    }
    for ending in ["sses", "ches", "shes", "xes", "zes"] {
        if lower.ends_with(ending) {
            return lower[..lower.len() - 2].to_string();
        }
    }
    if lower.len() > 2
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        return lower[..lower.len() - 1].to_string();
    }
    lower.to_string()
}

fn strip_inflection(lower: &str, suffix: &str) -> String {
    let Some(stem) = lower.strip_suffix(suffix) else {
        return lower.to_string();
    };
    if stem.is_empty() {
        return lower.to_string();
    }
    if VERBS.contains(stem) {
        return stem.to_string();
    }
    let chars: Vec<char> = stem.chars().collect();
    let last = chars.last().copied().unwrap_or_default();
    let doubled = chars.len() >= 2
        && last == chars[chars.len() - 2]
        && !matches!(last, 'a' | 'e' | 'i' | 'o' | 'u');
    if doubled {
        let undoubled = &stem[..stem.len() - last.len_utf8()];
        if VERBS.contains(undoubled) {
            return undoubled.to_string();
        }
    }
    let with_e = format!("{stem}e");
    if VERBS.contains(with_e.as_str()) {
        return with_e;
    }
    if doubled && !matches!(last, 'l' | 's' | 'z' | 'f') {
        return stem[..stem.len() - last.len_utf8()].to_string();
    }
    if E_RESTORING_ENDINGS.iter().any(|e| stem.ends_with(e)) && !stem.ends_with("ee") {
        return with_e;
    }
    stem.to_string()
}

/// Morphological feature string for a fine tag.
pub fn morph_for(pos: &str, tag: &str, lower: &str) -> String {
    match tag {
        "NN" | "NNP" => "Number=Sing".to_string(),
        "NNS" | "NNPS" => "Number=Plur".to_string(),
        "VB" => "VerbForm=Inf".to_string(),
        "VBP" => "Tense=Pres|VerbForm=Fin".to_string(),
        "VBZ" => "Number=Sing|Person=3|Tense=Pres|VerbForm=Fin".to_string(),
        "VBD" => "Tense=Past|VerbForm=Fin".to_string(),
        "VBN" => "Aspect=Perf|Tense=Past|VerbForm=Part".to_string(),
        "VBG" => "Aspect=Prog|Tense=Pres|VerbForm=Part".to_string(),
        "MD" => "VerbType=Mod".to_string(),
        "JJ" => "Degree=Pos".to_string(),
        "JJR" | "RBR" => "Degree=Cmp".to_string(),
        "JJS" | "RBS" => "Degree=Sup".to_string(),
        "PRP" | "PRP$" => pronoun_features(lower, tag == "PRP$"),
        "DT" if pos == "DET" => match lower {
            "the" => "Definite=Def|PronType=Art".to_string(),
            "a" | "an" => "Definite=Ind|PronType=Art".to_string(),
            _ => "PronType=Dem".to_string(),
        },
        "CD" => "NumType=Card".to_string(),
        "POS" => "Poss=Yes".to_string(),
        "TO" | "RB" if lower == "n't" || lower == "not" => "Polarity=Neg".to_string(),
        "." | "," | ":" => "PunctType=Peri".to_string(),
        _ => String::new(),
    }
}

fn pronoun_features(lower: &str, possessive: bool) -> String {
    let (person, number) = match lower {
        "i" | "me" | "my" | "mine" | "myself" => ("1", "Sing"),
        "we" | "us" | "our" | "ours" | "ourselves" => ("1", "Plur"),
        "you" | "your" | "yours" | "yourself" | "yourselves" => ("2", ""),
        "they" | "them" | "their" | "theirs" | "themselves" => ("3", "Plur"),
        "he" | "him" | "his" | "she" | "her" | "hers" | "it" | "its" | "himself" | "herself"
        | "itself" => ("3", "Sing"),
        _ => ("", ""),
    };
    let gender = match lower {
        "he" | "him" | "his" | "himself" => "Masc",
        "she" | "her" | "hers" | "herself" => "Fem",
        "it" | "its" | "itself" => "Neut",
        _ => "",
    };
    let mut features = Vec::new();
    if !gender.is_empty() {
        features.push(format!("Gender={gender}"));
    }
    if !number.is_empty() {
        features.push(format!("Number={number}"));
    }
    if !person.is_empty() {
        features.push(format!("Person={person}"));
    }
    if possessive {
        features.push("Poss=Yes".to_string());
    }
    features.push("PronType=Prs".to_string());
    features.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_forms() {
        assert_eq!(lemmatize("was", "AUX", "VBD"), "be");
        assert_eq!(lemmatize("children", "NOUN", "NNS"), "child");
        assert_eq!(lemmatize("wrote", "VERB", "VBD"), "write");
    }

    #[test]
    fn regular_verb_inflections() {
        assert_eq!(lemmatize("uses", "VERB", "VBZ"), "use");
        assert_eq!(lemmatize("used", "VERB", "VBD"), "use");
        assert_eq!(lemmatize("controlled", "VERB", "VBN"), "control");
        assert_eq!(lemmatize("running", "VERB", "VBG"), "run");
        assert_eq!(lemmatize("making", "VERB", "VBG"), "make");
        assert_eq!(lemmatize("carried", "VERB", "VBD"), "carry");
    }

    #[test]
    fn plural_nouns() {
        assert_eq!(lemmatize("topics", "NOUN", "NNS"), "topic");
        assert_eq!(lemmatize("libraries", "NOUN", "NNS"), "library");
        assert_eq!(lemmatize("boxes", "NOUN", "NNS"), "box");
        assert_eq!(lemmatize("status", "NOUN", "NN"), "status");
    }

    #[test]
    fn proper_nouns_keep_case() {
        assert_eq!(lemmatize("Paris", "PROPN", "NNP"), "Paris");
    }

    #[test]
    fn pronoun_morphology() {
        assert_eq!(
            morph_for("PRON", "PRP", "she"),
            "Gender=Fem|Number=Sing|Person=3|PronType=Prs"
        );
        assert_eq!(morph_for("PRON", "PRP", "they"), "Number=Plur|Person=3|PronType=Prs");
    }
}
