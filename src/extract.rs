// Copyright 2025 Cornell University
// released under MIT License

use log::debug;

use crate::declarations::DeclarationTable;
use crate::diagnostic::DiagnosticHandler;
use crate::errors::Result;
use crate::ports::{classify, PortSet};
use crate::source::{LineRange, SourceDocument};
use crate::synth::{assemble, ArtifactSink};
use crate::usage::UsageSets;

/// Result of one extraction request. `diagnostics` accompanies the
/// best-effort output, it never replaces it.
#[derive(Debug)]
pub struct Extraction {
    /// Port declarations of the new module, inputs first.
    pub ports: Vec<String>,
    /// Instantiation connections, positionally aligned with `ports`.
    pub connections: Vec<String>,
    /// The full reconstructed document.
    pub text: String,
    /// Name of the top-level module the block was extracted from.
    pub parent: String,
    /// One entry per identifier that had no resolvable declaration.
    pub diagnostics: Vec<String>,
}

/// Promotes the selected lines of `doc` into a new module named `name`.
///
/// `lines` follows the frontend convention: a 1-based first line together
/// with the line past the selection. Runs the passes in strict order:
/// declaration table, range split, usage analysis, port classification,
/// reassembly. When `sink` is present the synthesized text is also written
/// as `<name>.sv`.
pub fn extract(
    doc: &SourceDocument,
    lines: (usize, usize),
    name: &str,
    handler: &mut DiagnosticHandler,
    sink: Option<&mut dyn ArtifactSink>,
) -> Result<Extraction> {
    let parent = doc.module_name()?.to_string();
    let range = LineRange::from_selection(lines.0, lines.1, doc.line_count())?;
    let fileid = handler.add_file(format!("{parent}.sv"), doc.text().to_string());

    let table = DeclarationTable::scan(doc.text());
    debug!(
        "extracting lines {}-{} of `{}` ({} declarations)",
        lines.0,
        lines.1,
        parent,
        table.len()
    );

    let selection = doc.select(range);
    let usage = UsageSets::analyze(&selection.block, selection.block_offset);
    debug!(
        "{} written and {} read identifiers in the selection",
        usage.written().len(),
        usage.read().len()
    );

    let PortSet {
        ports,
        connections,
        diagnostics,
    } = classify(&usage, &table, handler, fileid);

    let text = assemble(
        name,
        &ports,
        &connections,
        &selection.block,
        selection.prologue,
        selection.epilogue,
    );

    if let Some(sink) = sink {
        sink.write_artifact(name, &text)?;
    }

    Ok(Extraction {
        ports,
        connections,
        text,
        parent,
        diagnostics,
    })
}
