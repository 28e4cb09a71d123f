//! Closed-class word lists and open-class seed lexicons for the tagger.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

pub static DETERMINERS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any", "no",
        "another", "either", "neither", "all", "both", "such", "what", "which", "whatever",
    ])
});

pub static POSSESSIVE_DETERMINERS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| set(&["my", "your", "his", "her", "its", "our", "their", "whose"]));

pub static PERSONAL_PRONOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "yourselves", "themselves",
        "mine", "yours", "hers", "ours", "theirs", "someone", "somebody", "something", "anyone",
        "anybody", "anything", "everyone", "everybody", "everything", "nobody", "nothing", "one",
        "none",
    ])
});

pub static WH_PRONOUNS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| set(&["who", "whom", "whoever", "whomever"]));

pub static MODALS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "can", "could", "will", "would", "shall", "should", "may", "might", "must", "ca", "wo",
        "'ll", "'d",
    ])
});

pub static BE_FORMS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&["be", "is", "are", "was", "were", "am", "been", "being", "'s", "'re", "'m"])
});

pub static HAVE_FORMS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| set(&["have", "has", "had", "having", "'ve"]));

pub static DO_FORMS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| set(&["do", "does", "did"]));

pub static PREPOSITIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
        "during", "before", "after", "above", "below", "from", "up", "down", "of", "off", "over",
        "under", "within", "without", "across", "behind", "beyond", "near", "until", "upon",
        "via", "per", "like", "among", "toward", "towards", "around", "along", "despite",
        "inside", "outside", "onto", "throughout", "beside", "besides", "except", "regarding",
        "concerning", "than",
    ])
});

pub static COORDINATING_CONJUNCTIONS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| set(&["and", "or", "but", "nor", "yet", "so", "&", "plus"]));

pub static SUBORDINATING_CONJUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "because", "although", "though", "while", "if", "unless", "whereas", "since", "whether",
        "once", "as", "when", "whenever", "where", "wherever",
    ])
});

pub static ADVERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "not", "never", "very", "too", "also", "always", "often", "however", "therefore", "thus",
        "then", "here", "there", "now", "just", "only", "still", "already", "quite", "rather",
        "well", "almost", "even", "soon", "again", "furthermore", "moreover", "consequently",
        "additionally", "finally", "hence", "instead", "meanwhile", "otherwise", "perhaps",
        "maybe", "sometimes", "usually", "seldom", "rarely", "yesterday", "today", "tomorrow",
        "anyway", "besides", "nevertheless", "nonetheless", "indeed", "else", "ever", "far",
        "much", "more", "most", "less", "least", "so", "how", "why", "away", "back", "together",
        "later", "afterwards", "first", "second", "third", "lastly", "next", "n't", "somewhat",
        "thereby", "whereby", "accordingly", "likewise", "similarly", "subsequently",
    ])
});

pub static INTERJECTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "oh", "wow", "hey", "hello", "hi", "yes", "yeah", "okay", "ok", "ouch", "oops", "lol",
        "omg", "btw", "alas", "hmm", "uh", "um", "yay", "please", "thanks",
    ])
});

/// Adjectives the suffix rules would miss (or mis-tag as adverbs/verbs).
pub static ADJECTIVES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "good", "bad", "new", "old", "great", "big", "small", "large", "little", "long", "short",
        "high", "low", "young", "early", "late", "important", "different", "same", "able",
        "whole", "free", "full", "clear", "simple", "easy", "hard", "difficult", "true", "false",
        "real", "sure", "certain", "open", "close", "ready", "fast", "slow", "quick", "strong",
        "weak", "right", "wrong", "main", "major", "minor", "likely", "unlikely", "friendly",
        "only", "own", "other", "few", "many", "several", "various", "complete", "correct",
        "proper", "specific", "general", "common", "rare", "wide", "narrow", "deep", "broad",
        "hot", "cold", "warm", "cool", "dark", "bright", "light", "heavy", "rich", "poor",
        "safe", "secure", "robust", "stable", "formal", "informal", "brief", "concise", "vague",
        "precise", "accurate", "complex", "modern", "recent", "current", "previous", "final",
        "initial", "primary", "secondary", "basic", "advanced", "technical", "legal", "magical",
        "mystical", "enchanted", "comprehensive", "thorough", "efficient", "effective",
        "awesome", "cool", "nice", "fine", "happy", "sad", "glad", "sorry", "best", "better",
        "worse", "worst", "last", "next", "due", "key", "empty", "entire", "extra", "fair",
        "fresh", "huge", "tiny", "quiet", "loud", "smart", "wise", "calm", "kind", "gentle",
        "ancient", "dense", "sparse", "legacy", "deprecated", "obsolete", "optional", "required",
        "mandatory", "explicit", "implicit", "internal", "external", "global", "local", "public",
        "private", "default", "custom", "average", "overall", "annual", "quarterly", "strategic",
        "financial", "academic", "empirical", "theoretical", "significant", "relevant",
        "appropriate", "inappropriate", "consistent", "inconsistent",
    ])
});

/// Base forms of common verbs.
pub static VERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "use", "make", "go", "get", "take", "see", "come", "know", "think", "look", "want",
        "give", "find", "tell", "ask", "work", "seem", "feel", "try", "leave", "call", "keep",
        "let", "begin", "help", "show", "hear", "play", "run", "move", "live", "believe",
        "bring", "happen", "write", "provide", "sit", "stand", "lose", "pay", "meet", "include",
        "continue", "set", "learn", "change", "lead", "understand", "watch", "follow", "stop",
        "create", "speak", "read", "allow", "add", "spend", "grow", "open", "walk", "win",
        "offer", "remember", "love", "consider", "appear", "buy", "wait", "serve", "die", "send",
        "expect", "build", "stay", "fall", "cut", "reach", "kill", "remain", "suggest", "raise",
        "pass", "sell", "require", "report", "decide", "pull", "cover", "control", "feature",
        "describe", "explain", "contain", "support", "handle", "return", "configure", "install",
        "deploy", "implement", "define", "specify", "enable", "disable", "validate", "verify",
        "check", "test", "fix", "update", "improve", "increase", "reduce", "remove", "delete",
        "replace", "ensure", "avoid", "prevent", "process", "store", "load", "save", "call",
        "execute", "compile", "parse", "render", "connect", "send", "receive", "request",
        "respond", "analyze", "analyse", "evaluate", "measure", "compare", "review", "approve",
        "discuss", "focus", "manage", "develop", "design", "plan", "produce", "deliver",
        "achieve", "perform", "operate", "maintain", "monitor", "track", "apply", "affect",
        "depend", "involve", "indicate", "suggest", "argue", "demonstrate", "examine",
        "investigate", "propose", "conclude", "assume", "claim", "note", "observe", "shorten",
        "need", "like", "fly", "swim", "jump", "sing", "dance", "wander", "whisper", "shine",
        "glow", "dream", "drive", "eat", "drink", "sleep", "bank", "lie", "rest", "close",
        "document", "list", "map", "record", "present", "object", "permit", "access", "address",
        "utilize", "leverage", "facilitate", "optimize", "streamline", "enhance", "ensure",
        "mention", "refer", "point", "state", "cause", "result", "lead", "form", "fill",
        "mean", "matter", "differ", "exist", "occur", "depend", "belong", "consist", "involve",
        "return", "throw", "catch", "hold", "turn", "put", "bring", "break", "choose", "draw",
        "drop", "enter", "finish", "hope", "join", "kick", "laugh", "lift", "notice", "own",
        "pick", "prefer", "push", "rely", "seek", "share", "smile", "split", "start", "stick",
        "suppose", "teach", "throw", "touch", "travel", "trust", "visit", "vote", "wish",
        "wonder", "worry", "cover", "fit", "match", "score", "rank", "sort", "filter", "merge",
        "group", "flag", "mark", "rewrite", "edit", "revise", "clarify", "simplify",
    ])
});

/// Irregular inflections to lemma.
pub static IRREGULAR_LEMMAS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("am", "be"),
        ("been", "be"), ("being", "be"), ("'re", "be"), ("'m", "be"), ("has", "have"),
        ("had", "have"), ("'ve", "have"), ("does", "do"), ("did", "do"), ("done", "do"),
        ("went", "go"), ("gone", "go"), ("goes", "go"), ("made", "make"), ("said", "say"),
        ("took", "take"), ("taken", "take"), ("saw", "see"), ("seen", "see"), ("came", "come"),
        ("knew", "know"), ("known", "know"), ("thought", "think"), ("gave", "give"),
        ("given", "give"), ("found", "find"), ("told", "tell"), ("felt", "feel"),
        ("left", "leave"), ("kept", "keep"), ("began", "begin"), ("begun", "begin"),
        ("showed", "show"), ("shown", "show"), ("heard", "hear"), ("ran", "run"),
        ("brought", "bring"), ("wrote", "write"), ("written", "write"), ("sat", "sit"),
        ("stood", "stand"), ("lost", "lose"), ("paid", "pay"), ("met", "meet"),
        ("led", "lead"), ("understood", "understand"), ("spoke", "speak"),
        ("spoken", "speak"), ("spent", "spend"), ("grew", "grow"), ("grown", "grow"),
        ("won", "win"), ("bought", "buy"), ("sent", "send"), ("built", "build"),
        ("fell", "fall"), ("fallen", "fall"), ("held", "hold"), ("chose", "choose"),
        ("chosen", "choose"), ("drew", "draw"), ("drawn", "draw"), ("broke", "break"),
        ("broken", "break"), ("taught", "teach"), ("threw", "throw"), ("thrown", "throw"),
        ("caught", "catch"), ("sought", "seek"), ("meant", "mean"), ("ate", "eat"),
        ("eaten", "eat"), ("drove", "drive"), ("driven", "drive"), ("slept", "sleep"),
        ("flew", "fly"), ("flown", "fly"), ("swam", "swim"), ("sang", "sing"), ("sung", "sing"),
        ("children", "child"), ("men", "man"), ("women", "woman"), ("feet", "foot"),
        ("teeth", "tooth"), ("mice", "mouse"), ("people", "people"), ("data", "data"),
        ("better", "well"), ("best", "well"), ("worse", "bad"), ("worst", "bad"),
        ("n't", "not"), ("ca", "can"), ("wo", "will"), ("'ll", "will"), ("'d", "would"),
        ("me", "i"), ("him", "he"), ("her", "she"), ("us", "we"), ("them", "they"),
        ("analyses", "analysis"), ("criteria", "criterion"), ("phenomena", "phenomenon"),
        ("indices", "index"), ("matrices", "matrix"),
    ]
    .into_iter()
    .collect()
});

/// Function words used for `is_stop`.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "a", "an", "the", "and", "or", "but", "if", "then", "else", "when", "at", "by", "for",
        "with", "about", "against", "between", "into", "through", "during", "before", "after",
        "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
        "again", "further", "once", "here", "there", "where", "why", "how", "all", "any",
        "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
        "only", "own", "same", "so", "than", "too", "very", "can", "will", "just", "should",
        "now", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "having", "do", "does", "did", "doing", "i", "me", "my", "myself", "we", "our", "ours",
        "you", "your", "yours", "he", "him", "his", "she", "her", "hers", "it", "its", "they",
        "them", "their", "theirs", "what", "which", "who", "whom", "this", "that", "these",
        "those", "am", "would", "could", "of", "as", "until", "while", "also", "may", "might",
        "must", "shall", "n't", "'s", "'re", "'ve", "'ll", "'d", "'m",
    ])
});

/// Abbreviations whose trailing period does not end a sentence.
pub static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co",
        "corp", "dept", "fig", "no", "vol", "approx", "e.g", "i.e", "cf", "al", "jan", "feb",
        "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
    ])
});

/// Adjective-forming suffixes, longest first.
pub const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ical", "able", "ible", "ful", "ous", "ive", "less", "ish", "ary", "ic", "al", "ent", "ant",
];

/// Verb-forming suffixes.
pub const VERB_SUFFIXES: &[&str] = &["ize", "ise", "ify", "ate"];

/// Words ending in `-ly` that are not adverbs.
pub static LY_NON_ADVERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "only", "early", "friendly", "likely", "unlikely", "daily", "weekly", "monthly",
        "yearly", "lonely", "lovely", "ugly", "silly", "holy", "costly", "elderly", "family",
        "supply", "apply", "reply", "rely", "fly", "ally", "italy", "july", "assembly",
    ])
});

/// Nouns that the adjective suffix rules would otherwise claim.
pub static SUFFIX_NOUN_EXCEPTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    set(&[
        "animal", "signal", "journal", "proposal", "approval", "arrival", "capital", "hospital",
        "interval", "material", "manual", "portal", "terminal", "total", "trial", "metal",
        "client", "agent", "event", "content", "element", "comment", "component", "document",
        "student", "parent", "percent", "assistant", "consultant", "participant", "plant",
        "restaurant", "variant", "tenant", "talent", "moment", "payment", "statement",
        "department", "environment", "management", "requirement", "argument", "experiment",
        "investment", "equipment", "development", "government", "agreement", "improvement",
        "treatment", "deployment", "alignment", "assignment", "basic", "logic", "topic",
        "music", "traffic", "republic", "graphic", "library", "summary", "dictionary",
        "boundary", "salary", "secretary", "glossary", "vocabulary", "objective", "initiative",
        "executive", "archive", "motive", "detective", "incentive", "narrative", "alternative",
        "representative", "relative", "perspective", "table", "cable", "variable", "bible",
        "vegetable", "schedule", "fish", "dish", "wish", "english", "polish", "chemical",
        "physical", "intent", "patent", "accent", "extent", "context", "ant", "giant", "grant",
        "elephant", "constant", "instant", "infant", "merchant", "servant", "sergeant",
        "tale", "forest", "settings", "setting",
    ])
});

pub fn is_verb_lemma(word: &str) -> bool {
    VERBS.contains(word)
}
