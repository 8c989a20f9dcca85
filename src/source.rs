// Copyright 2025 Cornell University
// released under MIT License

use regex::Regex;

use crate::errors::{ExtractError, Result};

lazy_static::lazy_static! {
    /// First `module <name> (` line of a design file.
    static ref MODULE_NAME_RE: Regex =
        Regex::new(r"(?m)^\s*module\s+(?P<n>\w+)\s*\(").unwrap();
}

/// The full input text, addressed by 0-based line index. Immutable once
/// loaded; every later pass borrows from it.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    text: String,
    lines: Vec<String>,
}

impl SourceDocument {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = text.lines().map(|line| line.to_string()).collect();
        Self { text, lines }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Name of the top-level module this document declares, taken from the
    /// first `module <name> (` line.
    pub fn module_name(&self) -> Result<&str> {
        MODULE_NAME_RE
            .captures(&self.text)
            .map(|caps| caps.name("n").unwrap().as_str())
            .ok_or(ExtractError::ModuleNameNotFound)
    }

    /// Splits the document around `range` into the lines before the
    /// selection, the selected block (newline-joined) and the lines after.
    pub fn select(&self, range: LineRange) -> Selection<'_> {
        let block_offset = self.lines[..range.start()]
            .iter()
            .map(|line| line.len() + 1)
            .sum();
        Selection {
            prologue: &self.lines[..range.start()],
            block: self.lines[range.start()..range.end()].join("\n"),
            epilogue: &self.lines[range.end()..],
            block_offset,
        }
    }
}

/// A validated half-open `[start, end)` interval of 0-based line indices.
///
/// Callers select lines the way the web frontend sends them: a 1-based
/// first line together with an exclusive end line. `from_selection`
/// converts by decrementing the start and rejects empty or out-of-bounds
/// ranges instead of clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    pub fn from_selection(start: usize, end: usize, line_count: usize) -> Result<Self> {
        if start >= end {
            return Err(ExtractError::EmptyRange { start, end });
        }
        if start == 0 || end > line_count {
            return Err(ExtractError::RangeOutOfBounds {
                start,
                end,
                lines: line_count,
            });
        }
        Ok(Self {
            start: start - 1,
            end,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

/// One document split into prologue, selected block and epilogue.
#[derive(Debug)]
pub struct Selection<'a> {
    pub prologue: &'a [String],
    pub block: String,
    pub epilogue: &'a [String],
    /// Byte offset of the block's first line within the document, used to
    /// translate in-block match positions to document positions.
    pub block_offset: usize,
}
