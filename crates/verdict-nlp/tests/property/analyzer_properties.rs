use proptest::prelude::*;
use verdict_core::traits::NlpAnalyzer;
use verdict_nlp::{load_model, RuleBasedAnalyzer};

fn analyzers() -> Vec<std::sync::Arc<dyn NlpAnalyzer>> {
    vec![
        load_model("en_rule_based").unwrap(),
        load_model("en_basic").unwrap(),
    ]
}

proptest! {
    #[test]
    fn offsets_point_at_token_text(s in "\\PC{0,200}") {
        for analyzer in analyzers() {
            let doc = analyzer.analyze(&s).unwrap();
            let chars: Vec<char> = s.chars().collect();
            for token in &doc.tokens {
                prop_assert!(token.end() <= chars.len());
                let slice: String = chars[token.idx..token.end()].iter().collect();
                prop_assert_eq!(slice.replace('’', "'"), token.text.replace('’', "'"));
            }
        }
    }

    #[test]
    fn every_token_reaches_its_sentence_root(s in "[A-Za-z ,.!?']{0,160}") {
        for analyzer in analyzers() {
            let doc = analyzer.analyze(&s).unwrap();
            for token in &doc.tokens {
                let mut current = token.index;
                for _ in 0..=doc.tokens.len() {
                    if doc.tokens[current].is_root() {
                        break;
                    }
                    current = doc.tokens[current].head;
                }
                prop_assert!(doc.tokens[current].is_root());
                prop_assert_eq!(doc.tokens[current].sentence, token.sentence);
            }
        }
    }

    #[test]
    fn sentences_partition_tokens(s in "\\PC{0,200}") {
        let analyzer = RuleBasedAnalyzer::new("en_rule_based", verdict_nlp::AttachmentMode::Heuristic);
        let doc = analyzer.analyze(&s).unwrap();
        let mut expected_start = 0;
        for sentence in &doc.sentences {
            prop_assert_eq!(sentence.start_token, expected_start);
            prop_assert!(sentence.end_token > sentence.start_token);
            prop_assert!(sentence.start_char < sentence.end_char);
            expected_start = sentence.end_token;
        }
        prop_assert_eq!(expected_start, doc.tokens.len());
    }

    #[test]
    fn analysis_is_deterministic(s in "\\PC{0,120}") {
        let analyzer = load_model("en_rule_based").unwrap();
        prop_assert_eq!(analyzer.analyze(&s).unwrap(), analyzer.analyze(&s).unwrap());
    }
}
