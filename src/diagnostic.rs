// Copyright 2025 Cornell University
// released under MIT License

use std::collections::HashSet;
use std::io::Write;

use clap::ColorChoice;
use codespan_reporting::diagnostic::{
    Diagnostic as CodespanDiagnostic, Label as CodespanLabel, LabelStyle, Severity,
};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Track emitted spans so repeated lookups of the same identifier do not
/// duplicate the diagnostic
#[derive(Hash, Eq, PartialEq, Debug)]
struct SpanKey {
    fileid: usize,
    start: usize,
    end: usize,
}

/// Severity of diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

/// A label representing a part of the source code
#[derive(Debug, Clone, PartialEq, Eq)]
struct Label {
    message: Option<String>,
    range: (usize, usize),
}

impl Label {
    fn to_codespan_label(&self, fileid: usize) -> CodespanLabel<usize> {
        CodespanLabel::new(LabelStyle::Primary, fileid, self.range.0..self.range.1)
            .with_message(self.message.clone().unwrap_or_default())
    }
}

/// Diagnostic of a particular part of source code
struct Diagnostic {
    title: String,
    message: String,
    level: Level,
    location: Option<(usize, Label)>,
}

impl Diagnostic {
    fn emit(&self, buffer: &mut Buffer, files: &SimpleFiles<String, String>) {
        if let Some((fileid, label)) = &self.location {
            let severity = match self.level {
                Level::Error => Severity::Error,
                Level::Warning => Severity::Warning,
            };

            let diagnostic = CodespanDiagnostic::new(severity)
                .with_message(&self.message)
                .with_labels(vec![label.to_codespan_label(*fileid)]);

            let config = term::Config::default();
            term::emit(buffer, &config, files, &diagnostic).expect("Failed to write diagnostic");
        } else {
            let color = match self.level {
                Level::Error => Color::Red,
                Level::Warning => Color::Yellow,
            };

            buffer
                .set_color(ColorSpec::new().set_bold(true).set_fg(Some(color)))
                .expect("Failed to set color");
            writeln!(buffer, "{}", self.title).expect("Failed to write title");

            buffer
                .set_color(&ColorSpec::new())
                .expect("Failed to reset color");
        }
    }
}

/// Collects diagnostics for one or more extraction requests. Rendered
/// output accumulates in `error_string`; nothing is printed, the caller
/// decides where the text goes.
pub struct DiagnosticHandler {
    files: SimpleFiles<String, String>,
    reported: HashSet<SpanKey>,
    error_string: String,
    /// `color_choice` indicates whether to emit diagnostics w/ ANSI colors
    color_choice: ColorChoice,
}

impl Default for DiagnosticHandler {
    /// Default `DiagnosticHandler` does not emit colored diagnostics
    fn default() -> Self {
        Self::new(ColorChoice::Never)
    }
}

impl DiagnosticHandler {
    pub fn new(color_choice: ColorChoice) -> Self {
        Self {
            files: SimpleFiles::new(),
            reported: HashSet::new(),
            error_string: String::new(),
            color_choice,
        }
    }

    /// Creates a buffer for diagnostics
    /// (different buffers are created based on whether we want colors or not)
    fn create_buffer(&self) -> Buffer {
        if self.color_choice == ColorChoice::Never {
            Buffer::no_color()
        } else {
            Buffer::ansi()
        }
    }

    pub fn add_file(&mut self, name: String, content: String) -> usize {
        self.files.add(name, content)
    }

    pub fn error_string(&self) -> &str {
        &self.error_string
    }

    /// Reports an identifier that is used in the selected block but never
    /// declared in the document. `start`/`end` label the first use.
    pub fn emit_unresolved(&mut self, message: &str, fileid: usize, start: usize, end: usize) {
        if !self.reported.insert(SpanKey { fileid, start, end }) {
            return;
        }
        log::warn!("{}", message);

        let mut buffer = self.create_buffer();
        let label = Label {
            message: Some(message.to_string()),
            range: (start, end),
        };
        let diagnostic = Diagnostic {
            title: format!("{:?} in file {}", Level::Warning, fileid),
            message: message.to_string(),
            level: Level::Warning,
            location: Some((fileid, label)),
        };

        diagnostic.emit(&mut buffer, &self.files);
        self.error_string
            .push_str(&String::from_utf8_lossy(buffer.as_slice()));
    }

    pub fn emit_general_message(&mut self, message: &str, level: Level) {
        log::warn!("{}", message);

        let mut buffer = self.create_buffer();
        let diagnostic = Diagnostic {
            title: format!("{:?}: {}", level, message),
            message: message.to_string(),
            level,
            location: None,
        };

        diagnostic.emit(&mut buffer, &self.files);
        self.error_string
            .push_str(&String::from_utf8_lossy(buffer.as_slice()));
    }
}
