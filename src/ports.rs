// Copyright 2025 Cornell University
// released under MIT License

use std::fmt;

use itertools::Itertools;

use crate::declarations::{Declaration, DeclarationTable};
use crate::diagnostic::{DiagnosticHandler, Level};
use crate::usage::UsageSets;

/// Direction label attached to a classified port. Written signals come
/// back as registers, so the output direction carries a `logic` qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "input"),
            Direction::Output => write!(f, "output logic"),
        }
    }
}

/// Port declarations and the matching instantiation connections, aligned
/// positionally. `diagnostics` lists every identifier dropped for lack of
/// a declaration.
#[derive(Debug, Default)]
pub struct PortSet {
    pub ports: Vec<String>,
    pub connections: Vec<String>,
    pub diagnostics: Vec<String>,
}

impl PortSet {
    fn push(&mut self, direction: Direction, name: &str, declaration: &Declaration) {
        self.ports.push(format!(
            "{} {} {} {}",
            direction, declaration.width_qualifier, name, declaration.unpacked_dims
        ));
        self.connections.push(name.to_string());
    }
}

/// Derives the port list for one selected block: identifiers that are only
/// read become inputs, written identifiers become outputs, and anything
/// without a declaration is dropped with a diagnostic. Ports are ordered
/// inputs first, then outputs, lexicographic within each group, so the
/// connection list lines up with the declarations.
pub fn classify(
    usage: &UsageSets,
    table: &DeclarationTable,
    handler: &mut DiagnosticHandler,
    fileid: usize,
) -> PortSet {
    let mut set = PortSet::default();

    let inputs = usage
        .only_read()
        .sorted()
        .map(|name| (Direction::Input, name));
    let outputs = usage
        .written()
        .iter()
        .map(String::as_str)
        .sorted()
        .map(|name| (Direction::Output, name));

    for (direction, name) in inputs.chain(outputs) {
        match table.get(name) {
            Some(declaration) => set.push(direction, name, declaration),
            None => {
                let message = format!("no declaration for variable {}", name);
                match usage.span_of(name) {
                    Some((start, end)) => handler.emit_unresolved(&message, fileid, start, end),
                    None => handler.emit_general_message(&message, Level::Warning),
                }
                set.diagnostics.push(message);
            }
        }
    }

    set
}
