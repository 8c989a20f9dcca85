// Copyright 2025 Cornell University
// released under MIT License

use thiserror::Error;

/// Failures that abort an extraction request. Unresolved signal
/// declarations are not listed here: they degrade the output and are
/// reported through the `DiagnosticHandler` instead.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no `module <name> (` declaration found in the input")]
    ModuleNameNotFound,
    #[error("selected line range {start}-{end} is empty")]
    EmptyRange { start: usize, end: usize },
    #[error("selected line range {start}-{end} does not fit an input with {lines} lines")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        lines: usize,
    },
    #[error("failed to perform i/o: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
