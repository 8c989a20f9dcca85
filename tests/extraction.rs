// Copyright 2025 Cornell University
// released under MIT License

use hdl_hierarchy::diagnostic::DiagnosticHandler;
use hdl_hierarchy::source::SourceDocument;
use hdl_hierarchy::synth::{ArtifactSink, DirectorySink, INST_BEGIN_MARK, MODULE_BEGIN_MARK};
use hdl_hierarchy::{extract, Extraction};

const FIXTURE: &str = "tests/inputs/pipeline.sv";
const FIXTURE_RANGE: (usize, usize) = (12, 19);

fn extract_fixture(name: &str) -> (SourceDocument, Extraction) {
    let text = std::fs::read_to_string(FIXTURE).unwrap();
    let doc = SourceDocument::new(text);
    let mut handler = DiagnosticHandler::default();
    let extraction = extract(&doc, FIXTURE_RANGE, name, &mut handler, None).unwrap();
    (doc, extraction)
}

#[test]
fn ports_and_connections_line_up() {
    let (_, extraction) = extract_fixture("stage_core");

    assert_eq!(
        extraction.ports,
        [
            "input  clk ",
            "input signed [7:0] data_in ",
            "input [7:0] offset ",
            "input  rst_n ",
            "output logic [7:0] data_out ",
            "output logic [7:0] stage1 ",
            "output logic [7:0] stage2 ",
        ]
    );
    assert_eq!(
        extraction.connections,
        ["clk", "data_in", "offset", "rst_n", "data_out", "stage1", "stage2"]
    );
    assert_eq!(extraction.ports.len(), extraction.connections.len());
}

#[test]
fn no_identifier_is_both_input_and_output() {
    let (_, extraction) = extract_fixture("stage_core");

    let mut names = extraction.connections.clone();
    names.sort_unstable();
    let unique = names.len();
    names.dedup();
    assert_eq!(names.len(), unique);
}

#[test]
fn output_preserves_prologue_and_epilogue_verbatim() {
    let (doc, extraction) = extract_fixture("stage_core");

    let doc_lines: Vec<&str> = doc.text().lines().collect();
    let out_lines: Vec<&str> = extraction.text.lines().collect();

    // the new module comes first, then the untouched prologue
    assert_eq!(out_lines[0], MODULE_BEGIN_MARK);
    let prologue_at = out_lines
        .iter()
        .position(|line| *line == "module pipeline (")
        .unwrap();
    assert_eq!(&out_lines[prologue_at..prologue_at + 11], &doc_lines[..11]);

    // the instantiation replaces the extracted lines, then the epilogue
    let inst_at = out_lines
        .iter()
        .position(|line| *line == INST_BEGIN_MARK)
        .unwrap();
    assert!(prologue_at < inst_at);
    assert_eq!(*out_lines.last().unwrap(), "endmodule");
    assert!(extraction.text.contains("stage_core stage_core_inst ("));
}

#[test]
fn reextracting_the_synthesized_body_reproduces_the_ports() {
    let (_, first) = extract_fixture("stage_core");

    // the port list of the new module doubles as the declarations for its
    // body, so extracting that body again must classify the same ports
    let doc = SourceDocument::new(first.text.clone());
    let lines: Vec<&str> = first.text.lines().collect();
    let body_first = lines
        .iter()
        .position(|line| *line == "  always @ (posedge clk) begin")
        .unwrap()
        + 1;
    let body_end = lines
        .iter()
        .position(|line| *line == "  assign data_out = stage2;")
        .unwrap()
        + 1;

    let mut handler = DiagnosticHandler::default();
    let second = extract(
        &doc,
        (body_first, body_end),
        "stage_core_again",
        &mut handler,
        None,
    )
    .unwrap();

    assert_eq!(second.parent, "stage_core");
    assert_eq!(second.connections, first.connections);
    assert_eq!(second.ports, first.ports);
    assert!(second.diagnostics.is_empty());
}

#[test]
fn sink_receives_the_synthesized_text() {
    let text = std::fs::read_to_string(FIXTURE).unwrap();
    let doc = SourceDocument::new(text);
    let dir = tempfile::TempDir::new().unwrap();
    let mut sink = DirectorySink::new(dir.path());

    let mut handler = DiagnosticHandler::default();
    let extraction = extract(
        &doc,
        FIXTURE_RANGE,
        "stage_core",
        &mut handler,
        Some(&mut sink as &mut dyn ArtifactSink),
    )
    .unwrap();

    let written = std::fs::read_to_string(dir.path().join("stage_core.sv")).unwrap();
    assert_eq!(written, extraction.text);
}
