//! Heuristic dependency attachment.
//!
//! Works one sentence at a time over tagged tokens. Noun phrases are chunked
//! first, then every token is attached by positional rules relative to the
//! root and the clause it sits in. A final pass breaks any cycle by
//! re-attaching to the root, so the output is always a tree.

/// A tagged token as seen by the parser.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    pub pos: &'a str,
    pub tag: &'a str,
    pub lower: &'a str,
}

/// Head (sentence-relative index) and relation label for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub head: usize,
    pub dep: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct Chunk {
    start: usize,
    head: usize,
}

fn is_nominal(node: &Node<'_>) -> bool {
    matches!(node.pos, "NOUN" | "PROPN")
}

fn is_pronominal(node: &Node<'_>) -> bool {
    (node.pos == "PRON" && node.tag != "PRP$") || node.pos == "DET" || node.pos == "NUM"
}

fn is_be(lower: &str) -> bool {
    matches!(lower, "be" | "is" | "are" | "was" | "were" | "am" | "been" | "being" | "'s" | "'re" | "'m")
}

fn is_clause_punct(node: &Node<'_>) -> bool {
    node.pos == "PUNCT" && matches!(node.tag, "," | ":")
}

fn is_relative(node: &Node<'_>) -> bool {
    node.pos == "PRON" && matches!(node.tag, "WDT" | "WP")
}

/// Flat attachment: everything hangs off the root.
pub fn parse_flat(nodes: &[Node<'_>]) -> Vec<Attachment> {
    if nodes.is_empty() {
        return Vec::new();
    }
    let root = nodes
        .iter()
        .position(|n| n.pos == "VERB")
        .or_else(|| nodes.iter().position(|n| n.pos == "AUX"))
        .or_else(|| nodes.iter().position(is_nominal))
        .unwrap_or(0);
    nodes
        .iter()
        .enumerate()
        .map(|(i, n)| match i {
            _ if i == root => Attachment { head: root, dep: "ROOT" },
            _ if n.pos == "PUNCT" => Attachment { head: root, dep: "punct" },
            _ => Attachment { head: root, dep: "dep" },
        })
        .collect()
}

/// Full heuristic attachment.
pub fn parse(nodes: &[Node<'_>]) -> Vec<Attachment> {
    Parser::new(nodes).run()
}

struct Parser<'n, 'a> {
    nodes: &'n [Node<'a>],
    heads: Vec<Option<Attachment>>,
    segment: Vec<usize>,
    chunks: Vec<Chunk>,
    /// Chunk head for every token inside a chunk.
    chunk_of: Vec<Option<usize>>,
    root: usize,
}

impl<'n, 'a> Parser<'n, 'a> {
    fn new(nodes: &'n [Node<'a>]) -> Self {
        let n = nodes.len();
        let mut parser = Self {
            nodes,
            heads: vec![None; n],
            segment: vec![0; n],
            chunks: Vec::new(),
            chunk_of: vec![None; n],
            root: 0,
        };
        parser.mark_segments();
        parser.chunk();
        parser
    }

    fn run(mut self) -> Vec<Attachment> {
        let n = self.nodes.len();
        if n == 0 {
            return Vec::new();
        }
        self.root = self.choose_root();
        self.set(self.root, self.root, "ROOT");

        self.attach_auxiliaries();
        self.attach_chunk_internals();
        for i in 0..n {
            if self.heads[i].is_some() {
                continue;
            }
            self.attach(i);
        }
        self.break_cycles();

        self.heads
            .into_iter()
            .map(|a| a.unwrap_or(Attachment { head: self.root, dep: "dep" }))
            .collect()
    }

    fn set(&mut self, i: usize, head: usize, dep: &'static str) {
        self.heads[i] = Some(Attachment { head, dep });
    }

    fn mark_segments(&mut self) {
        let mut current = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            let opens = i > 0 && (node.pos == "SCONJ" || is_relative(node));
            if opens {
                current += 1;
            }
            self.segment[i] = current;
            if is_clause_punct(node) {
                current += 1;
            }
        }
    }

    fn segment_opener(&self, i: usize) -> Option<&Node<'a>> {
        let seg = self.segment[i];
        let first = (0..=i).find(|&j| self.segment[j] == seg)?;
        Some(&self.nodes[first])
    }

    fn in_chunk(&self, j: usize) -> bool {
        let node = &self.nodes[j];
        match node.pos {
            "ADJ" | "NUM" | "NOUN" | "PROPN" => true,
            "DET" => node.tag == "DT",
            "PRON" => node.tag == "PRP$",
            "PART" => node.tag == "POS",
            "ADV" => self.nodes.get(j + 1).is_some_and(|n| n.pos == "ADJ"),
            _ => false,
        }
    }

    fn chunk(&mut self) {
        let n = self.nodes.len();
        let mut i = 0;
        while i < n {
            if !self.in_chunk(i) || self.nodes[i].tag == "POS" {
                i += 1;
                continue;
            }
            let start = i;
            let mut last_nominal = None;
            let mut j = i;
            while j < n && self.in_chunk(j) {
                if is_nominal(&self.nodes[j]) {
                    last_nominal = Some(j);
                }
                j += 1;
            }
            match last_nominal {
                Some(head) => {
                    self.chunks.push(Chunk { start, head });
                    for k in start..=head {
                        self.chunk_of[k] = Some(head);
                    }
                    i = head + 1;
                }
                None => i = j.max(i + 1),
            }
        }
    }

    fn choose_root(&self) -> usize {
        let nodes = self.nodes;
        let unmarked_verb = (0..nodes.len()).find(|&i| {
            nodes[i].pos == "VERB"
                && !(i > 0 && nodes[i - 1].tag == "TO")
                && self
                    .segment_opener(i)
                    .map_or(true, |o| !(o.pos == "SCONJ" || is_relative(o)))
        });
        if let Some(i) = unmarked_verb {
            return i;
        }
        if let Some(i) = nodes.iter().position(|n| n.pos == "VERB") {
            return i;
        }
        if let Some(i) = nodes.iter().position(|n| n.pos == "AUX") {
            return i;
        }
        if let Some(i) = nodes.iter().position(is_nominal) {
            return self.chunk_of[i].unwrap_or(i);
        }
        if let Some(i) = nodes.iter().position(|n| n.pos == "ADJ") {
            return i;
        }
        nodes.iter().position(|n| n.pos != "PUNCT").unwrap_or(0)
    }

    /// Main verb an auxiliary at `i` belongs to.
    fn main_verb_after(&self, i: usize) -> Option<usize> {
        let mut j = i + 1;
        while j < self.nodes.len() {
            match (self.nodes[j].pos, self.nodes[j].tag) {
                ("VERB", _) => return Some(j),
                ("ADV", _) | ("AUX", _) => j += 1,
                ("PART", t) if t != "TO" && t != "POS" => j += 1,
                _ => return None,
            }
        }
        None
    }

    fn attach_auxiliaries(&mut self) {
        for i in 0..self.nodes.len() {
            if i == self.root || self.nodes[i].pos != "AUX" {
                continue;
            }
            if let Some(verb) = self.main_verb_after(i) {
                let dep = if is_be(self.nodes[i].lower) && self.nodes[verb].tag == "VBN" {
                    "auxpass"
                } else {
                    "aux"
                };
                self.set(i, verb, dep);
            }
        }
    }

    fn attach_chunk_internals(&mut self) {
        let chunks = self.chunks.clone();
        for chunk in chunks {
            for k in chunk.start..chunk.head {
                if self.nodes[k].tag == "POS" && k > chunk.start {
                    let possessor = k - 1;
                    self.set(k, possessor, "case");
                    if possessor != self.root {
                        self.set(possessor, chunk.head, "poss");
                    }
                }
            }
            for k in chunk.start..chunk.head {
                if self.heads[k].is_some() {
                    continue;
                }
                let node = self.nodes[k];
                let (head, dep) = match node.pos {
                    "DET" => (chunk.head, "det"),
                    "PRON" => (chunk.head, "poss"),
                    "NUM" => (chunk.head, "nummod"),
                    "ADJ" => (chunk.head, "amod"),
                    "NOUN" | "PROPN" => (chunk.head, "compound"),
                    "ADV" => (k + 1, "advmod"),
                    _ => (chunk.head, "dep"),
                };
                self.set(k, head, dep);
            }
        }
    }

    /// Resolve an auxiliary to the verb it serves.
    fn clause_head(&self, i: usize) -> usize {
        match self.heads[i] {
            Some(Attachment { head, dep: "aux" | "auxpass" }) => head,
            _ => i,
        }
    }

    fn is_predicate(&self, i: usize) -> bool {
        matches!(self.nodes[i].pos, "VERB" | "AUX")
            && !matches!(self.heads[i], Some(Attachment { dep: "aux" | "auxpass", .. }))
    }

    fn predicate_before(&self, i: usize) -> Option<usize> {
        (0..i)
            .rev()
            .take_while(|&j| self.segment[j] == self.segment[i])
            .find(|&j| self.is_predicate(j))
    }

    fn predicate_after(&self, i: usize) -> Option<usize> {
        (i + 1..self.nodes.len())
            .find(|&j| matches!(self.nodes[j].pos, "VERB" | "AUX"))
            .map(|j| self.clause_head(j))
    }

    fn has_passive_aux(&self, verb: usize) -> bool {
        self.heads
            .iter()
            .any(|a| matches!(a, Some(Attachment { head, dep: "auxpass" }) if *head == verb))
    }

    /// Nearest nominal, predicate or adjective to the left.
    fn content_before(&self, i: usize) -> Option<usize> {
        (0..i).rev().find(|&j| {
            let node = &self.nodes[j];
            self.is_predicate(j)
                || node.pos == "ADJ"
                || (is_nominal(node) && self.chunk_of[j].map_or(true, |h| h == j))
                || (is_pronominal(node) && self.chunk_of[j].is_none())
        })
    }

    fn previous_nominal_head(&self, before: usize) -> Option<usize> {
        (0..before).rev().find(|&j| {
            let node = &self.nodes[j];
            (is_nominal(node) && self.chunk_of[j] == Some(j))
                || (is_pronominal(node) && self.chunk_of[j].is_none())
        })
    }

    fn attach(&mut self, i: usize) {
        let node = self.nodes[i];
        let root = self.root;
        match node.pos {
            "PUNCT" => self.set(i, root, "punct"),
            "INTJ" => self.set(i, root, "intj"),
            "NOUN" | "PROPN" | "PRON" | "DET" | "NUM" => self.attach_nominal(i),
            "ADP" => {
                let head = self.content_before(i).unwrap_or(root);
                self.set(i, head, "prep");
            }
            "VERB" | "AUX" => self.attach_predicate(i),
            "ADJ" => {
                let prev = (0..i).rev().find(|&j| self.nodes[j].pos != "ADV");
                match prev {
                    Some(p) if self.is_predicate(p) => self.set(i, p, "acomp"),
                    Some(p) if self.nodes[p].pos == "CCONJ" => {
                        let head = (0..p).rev().find(|&j| self.nodes[j].pos == "ADJ").unwrap_or(root);
                        self.set(i, head, "conj");
                    }
                    _ => self.set(i, root, "dep"),
                }
            }
            "ADV" => {
                let next_modifiable = self
                    .nodes
                    .get(i + 1)
                    .is_some_and(|n| matches!(n.pos, "ADJ" | "ADV"));
                let head = if next_modifiable {
                    i + 1
                } else {
                    self.predicate_before(i)
                        .or_else(|| self.predicate_after(i))
                        .unwrap_or(root)
                };
                self.set(i, head, "advmod");
            }
            "PART" => match node.tag {
                "TO" => {
                    let head = match self.nodes.get(i + 1) {
                        Some(n) if matches!(n.pos, "VERB" | "AUX") => i + 1,
                        _ => root,
                    };
                    self.set(i, head, "aux");
                }
                "POS" => self.set(i, i.saturating_sub(1), "case"),
                _ => {
                    let head = self
                        .main_verb_after(i)
                        .or_else(|| (0..i).rev().find(|&j| matches!(self.nodes[j].pos, "VERB" | "AUX")).map(|j| self.clause_head(j)))
                        .unwrap_or(root);
                    self.set(i, head, "neg");
                }
            },
            "CCONJ" => {
                let head = self.content_before(i).unwrap_or(root);
                self.set(i, head, "cc");
            }
            "SCONJ" => {
                let head = self.predicate_after(i).unwrap_or(root);
                self.set(i, head, "mark");
            }
            _ => self.set(i, root, "dep"),
        }
    }

    fn attach_nominal(&mut self, i: usize) {
        let node = self.nodes[i];
        let start = self
            .chunks
            .iter()
            .find(|c| c.head == i)
            .map(|c| c.start)
            .unwrap_or(i);
        let prev = start.checked_sub(1).map(|p| (p, self.nodes[p]));

        if let Some((p, prev_node)) = prev {
            if prev_node.pos == "ADP" {
                self.set(i, p, "pobj");
                return;
            }
            if prev_node.pos == "CCONJ" {
                if let Some(q) = self.previous_nominal_head(p) {
                    self.set(i, q, "conj");
                    return;
                }
            }
        }

        if self.predicate_before(start).is_none() {
            if let Some(verb) = self.predicate_after(i) {
                let dep = if node.tag == "EX" {
                    "expl"
                } else if self.has_passive_aux(verb) {
                    "nsubjpass"
                } else {
                    "nsubj"
                };
                self.set(i, verb, dep);
                return;
            }
        }

        if let Some(verb) = self.predicate_before(start) {
            let dep = if self.nodes[verb].pos == "AUX" && is_be(self.nodes[verb].lower) {
                "attr"
            } else {
                "dobj"
            };
            self.set(i, verb, dep);
            return;
        }

        if node.pos == "NUM" {
            self.set(i, self.root, "nummod");
        } else {
            self.set(i, self.root, "dep");
        }
    }

    fn attach_predicate(&mut self, i: usize) {
        let root = self.root;
        let prev = i.checked_sub(1).map(|p| self.nodes[p]);

        if prev.is_some_and(|p| p.tag == "TO") {
            let governor = (0..i.saturating_sub(1)).rev().find(|&j| {
                self.is_predicate(j) || self.nodes[j].pos == "ADJ" || is_nominal(&self.nodes[j])
            });
            match governor {
                Some(g) if is_nominal(&self.nodes[g]) => self.set(i, g, "acl"),
                Some(g) => self.set(i, g, "xcomp"),
                None => self.set(i, root, "advcl"),
            }
            return;
        }

        if let Some(opener) = self.segment_opener(i).copied() {
            if self.segment[i] > 0 || opener.pos == "SCONJ" {
                if opener.pos == "SCONJ" {
                    self.set(i, root, "advcl");
                    return;
                }
                if is_relative(&opener) {
                    let first = (0..=i).find(|&j| self.segment[j] == self.segment[i]).unwrap_or(i);
                    let head = self.previous_nominal_head(first).unwrap_or(root);
                    self.set(i, head, "relcl");
                    return;
                }
            }
        }

        let before = (0..i).rev().find(|&j| self.nodes[j].pos != "ADV");
        if before.is_some_and(|b| self.nodes[b].pos == "CCONJ") {
            let head = (0..i).rev().find(|&j| self.is_predicate(j)).unwrap_or(root);
            self.set(i, head, "conj");
            return;
        }

        if matches!(self.nodes[i].tag, "VBG" | "VBN") {
            if let Some(p) = i.checked_sub(1).filter(|&p| is_nominal(&self.nodes[p])) {
                self.set(i, p, "acl");
                return;
            }
        }

        self.set(i, root, "ccomp");
    }

    fn break_cycles(&mut self) {
        let n = self.nodes.len();
        for i in 0..n {
            let mut current = i;
            let mut steps = 0;
            while current != self.root && steps <= n {
                current = self.heads[current].map(|a| a.head).unwrap_or(self.root);
                steps += 1;
            }
            if current != self.root {
                self.set(i, self.root, "dep");
            }
        }
    }
}
