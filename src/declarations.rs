// Copyright 2025 Cornell University
// released under MIT License

use regex::Regex;
use rustc_hash::FxHashMap;

lazy_static::lazy_static! {
    /// One or two declaration keywords, an optional sign qualifier, an
    /// optional packed dimension, the identifier, then any number of
    /// unpacked dimensions. A lexical filter, not a grammar: lines that do
    /// not fit this shape are skipped, and only the first identifier of a
    /// `reg a, b;` list is seen.
    static ref DECLARATION_RE: Regex = Regex::new(
        r"(?m)^\s*(?:(?:input|output|wire|reg|logic|parameter)\b\s*){1,2}(?P<q>(?:(?:signed|unsigned)\b)?\s*(?:\[[A-Za-z0-9_\-\+:\s\*]+\])?)\s*(?P<name>[A-Za-z0-9_]+)(?P<dims>(?:\s*\[[A-Za-z0-9_\-\+:\s\*\\]+\])*)"
    )
    .unwrap();
}

/// Width/signedness information recovered from a declaration line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Declaration {
    /// `signed`/`unsigned` plus the packed dimension, e.g. `signed [7:0]`.
    /// Empty for plain one-bit signals.
    pub width_qualifier: String,
    /// Unpacked (memory) dimensions, e.g. `[0:15]`. Usually empty.
    pub unpacked_dims: String,
}

/// Identifier -> declaration mapping for a whole document. Built once per
/// document and read-only afterwards; a later declaration of the same name
/// overwrites an earlier one.
#[derive(Debug, Default)]
pub struct DeclarationTable {
    entries: FxHashMap<String, Declaration>,
}

impl DeclarationTable {
    pub fn scan(text: &str) -> Self {
        let mut entries = FxHashMap::default();
        for caps in DECLARATION_RE.captures_iter(text) {
            let name = caps.name("name").unwrap().as_str().to_string();
            let declaration = Declaration {
                width_qualifier: caps.name("q").unwrap().as_str().trim().to_string(),
                unpacked_dims: caps.name("dims").unwrap().as_str().trim().to_string(),
            };
            entries.insert(name, declaration);
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
