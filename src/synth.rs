// Copyright 2025 Cornell University
// released under MIT License

use std::fs;
use std::path::PathBuf;

pub const MODULE_BEGIN_MARK: &str = "//Begin automatic-generated hierarchical module";
pub const MODULE_END_MARK: &str = "//End automatic-generated hierarchical module";
pub const INST_BEGIN_MARK: &str = "//Automatic-generated hierarchical module instantiation";
pub const INST_END_MARK: &str = "//End automatic-generated hierarchical module instantiation";

/// Reassembles the full output text: the new module definition, the
/// prologue of the original document, an instantiation of the new module
/// in place of the extracted lines, then the epilogue. The extracted block
/// is carried verbatim; nothing checks that its begin/end or parentheses
/// balance.
pub fn assemble(
    name: &str,
    ports: &[String],
    connections: &[String],
    block: &str,
    prologue: &[String],
    epilogue: &[String],
) -> String {
    let ports_str = ports.join(",\n");
    let connections_str = connections.join(",\n");

    let mut out = format!(
        "{MODULE_BEGIN_MARK}\nmodule {name} (\n{ports_str}\n);\n\n{block}\nendmodule\n{MODULE_END_MARK}"
    );
    out.push('\n');
    out.push_str(&prologue.join("\n"));
    out.push_str(&format!(
        "\n\n{INST_BEGIN_MARK}\n{name} {name}_inst (\n{connections_str}\n);"
    ));
    out.push_str(&format!("\n\n{INST_END_MARK}\n"));
    out.push_str(&epilogue.join("\n"));
    out
}

/// Where synthesized text ends up when the caller asks for an artifact.
/// Injected so the engine itself stays free of filesystem effects.
pub trait ArtifactSink {
    fn write_artifact(&mut self, name: &str, contents: &str) -> std::io::Result<()>;
}

/// Writes `<name>.sv` files into a fixed directory.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSink for DirectorySink {
    fn write_artifact(&mut self, name: &str, contents: &str) -> std::io::Result<()> {
        let path = self.dir.join(format!("{name}.sv"));
        log::debug!("writing artifact to {}", path.display());
        fs::write(&path, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_module_prologue_instantiation_epilogue() {
        let ports = vec!["input clk".to_string(), "output logic q".to_string()];
        let connections = vec!["clk".to_string(), "q".to_string()];
        let prologue = vec!["module top (".to_string(), ");".to_string()];
        let epilogue = vec!["endmodule".to_string()];

        let out = assemble(
            "blinker",
            &ports,
            &connections,
            "  q <= clk;",
            &prologue,
            &epilogue,
        );

        let expected = "\
//Begin automatic-generated hierarchical module
module blinker (
input clk,
output logic q
);

  q <= clk;
endmodule
//End automatic-generated hierarchical module
module top (
);

//Automatic-generated hierarchical module instantiation
blinker blinker_inst (
clk,
q
);

//End automatic-generated hierarchical module instantiation
endmodule";
        assert_eq!(out, expected);
    }

    #[test]
    fn directory_sink_writes_the_artifact() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut sink = DirectorySink::new(dir.path());

        sink.write_artifact("blinker", "module blinker ();\nendmodule\n")
            .unwrap();

        let written = fs::read_to_string(dir.path().join("blinker.sv")).unwrap();
        assert_eq!(written, "module blinker ();\nendmodule\n");
    }
}
