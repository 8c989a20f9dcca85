// Copyright 2025 Cornell University
// released under MIT License

use regex::{Match, Regex};
use rustc_hash::{FxHashMap, FxHashSet};

lazy_static::lazy_static! {
    /// `<ws> <identifier> <op> <expression> ;` with `<op>` one of `<=`,
    /// `:=`, `=`. The left side keeps simple indexed forms (`a[3]`) as
    /// written.
    static ref ASSIGNMENT_RE: Regex =
        Regex::new(r"\s+(?P<lhs>[\w\[\]]+)\s*(?:<=|:=|=)\s*(?P<rhs>.+);").unwrap();

    /// Lines carrying a guard expression: up to two leading block keywords,
    /// then `if` or `always @`, then the guard text.
    static ref CONDITIONAL_RE: Regex =
        Regex::new(r"(?m)^\s*(?:(?:else|begin|end)\b\s*){0,2}(?:if\b|always\s*@)\s*(?P<guard>.*)").unwrap();

    /// Identifiers inside assignment right-hand sides. The lowercase
    /// anchor keeps ALL-CAPS macros and parameters out of the read set.
    static ref RHS_IDENT_RE: Regex = Regex::new(r"\b[a-z][0-9A-Za-z_]*").unwrap();

    /// Identifiers inside guard expressions, either case.
    static ref GUARD_IDENT_RE: Regex = Regex::new(r"\b[A-Za-z][0-9A-Za-z_]*").unwrap();
}

/// Words the identifier patterns would otherwise pick up out of guard and
/// expression text.
const RESERVED: &[&str] = &[
    "always", "and", "begin", "else", "end", "if", "negedge", "or", "posedge",
];

/// Identifier matches in `text`, skipping reserved words and the tails of
/// based literals such as the `b0` in `1'b0`.
fn identifiers<'t>(pattern: &'static Regex, text: &'t str) -> impl Iterator<Item = Match<'t>> {
    pattern.find_iter(text).filter(move |m| {
        if RESERVED.contains(&m.as_str()) {
            return false;
        }
        m.start() == 0 || text.as_bytes()[m.start() - 1] != b'\''
    })
}

/// Read/write sets for one selected block. Membership is purely lexical:
/// an identifier written anywhere in the block is treated as written, even
/// if some line reads it first.
#[derive(Debug, Default)]
pub struct UsageSets {
    written: FxHashSet<String>,
    read: FxHashSet<String>,
    /// Document byte span of the first capture of each identifier, for
    /// diagnostics labels.
    first_seen: FxHashMap<String, (usize, usize)>,
}

impl UsageSets {
    /// Scans the selected block. `block_offset` is the block's byte offset
    /// within the enclosing document.
    pub fn analyze(block: &str, block_offset: usize) -> Self {
        let mut usage = UsageSets::default();
        usage.scan_assignments(block, block_offset);
        usage.scan_conditionals(block, block_offset);
        usage
    }

    pub fn written(&self) -> &FxHashSet<String> {
        &self.written
    }

    pub fn read(&self) -> &FxHashSet<String> {
        &self.read
    }

    /// Identifiers that only ever appear in read position.
    pub fn only_read(&self) -> impl Iterator<Item = &str> {
        self.read
            .iter()
            .filter(|name| !self.written.contains(name.as_str()))
            .map(|name| name.as_str())
    }

    pub fn span_of(&self, name: &str) -> Option<(usize, usize)> {
        self.first_seen.get(name).copied()
    }

    fn scan_assignments(&mut self, block: &str, offset: usize) {
        for caps in ASSIGNMENT_RE.captures_iter(block) {
            let lhs = caps.name("lhs").unwrap();
            self.note(lhs.as_str(), offset + lhs.start(), offset + lhs.end());
            self.written.insert(lhs.as_str().to_string());

            let rhs = caps.name("rhs").unwrap();
            for m in identifiers(&RHS_IDENT_RE, rhs.as_str()) {
                let start = offset + rhs.start() + m.start();
                self.note(m.as_str(), start, start + m.len());
                self.read.insert(m.as_str().to_string());
            }
        }
    }

    fn scan_conditionals(&mut self, block: &str, offset: usize) {
        for caps in CONDITIONAL_RE.captures_iter(block) {
            let guard = caps.name("guard").unwrap();
            for m in identifiers(&GUARD_IDENT_RE, guard.as_str()) {
                let start = offset + guard.start() + m.start();
                self.note(m.as_str(), start, start + m.len());
                self.read.insert(m.as_str().to_string());
            }
        }
    }

    fn note(&mut self, name: &str, start: usize, end: usize) {
        self.first_seen
            .entry(name.to_string())
            .or_insert((start, end));
    }
}
