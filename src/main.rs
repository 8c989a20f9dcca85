// Copyright 2025 Cornell University
// released under MIT License

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use hdl_hierarchy::diagnostic::DiagnosticHandler;
use hdl_hierarchy::extract;
use hdl_hierarchy::source::SourceDocument;
use hdl_hierarchy::synth::{ArtifactSink, DirectorySink};

/// Args for the extraction CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Path to a Verilog/SystemVerilog file
    #[arg(long, value_name = "VERILOG_FILE")]
    input: String,

    /// Selected line range as `<first>-<end>`, 1-based first line
    #[arg(short, long, value_name = "LINES")]
    lines: String,

    /// Name of the module to extract
    #[arg(short, long, value_name = "MODULE_NAME")]
    name: String,

    /// Directory to write `<name>.sv` into (omit to skip the artifact)
    #[arg(short, long, value_name = "OUT_DIR")]
    out: Option<std::path::PathBuf>,

    /// Users can specify `-v` or `--verbose` to toggle logging
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn parse_lines(arg: &str) -> Option<(usize, usize)> {
    let (first, end) = arg.split_once('-')?;
    Some((first.trim().parse().ok()?, end.trim().parse().ok()?))
}

/// Example:
/// `cargo run -- --input tests/inputs/pipeline.sv -l 12-19 -n stage_core -v`
fn main() {
    // Parse CLI args
    let cli = Cli::parse();

    // Set up logger to use the log-level specified via the `-v` flag
    // For concision, we disable timestamps and the module paths in the log
    env_logger::Builder::new()
        .format_timestamp(None)
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    let text = match std::fs::read_to_string(&cli.input) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("failed to read {}: {}", cli.input, err);
            std::process::exit(1);
        }
    };

    let Some(lines) = parse_lines(&cli.lines) else {
        eprintln!("expected a `<first>-<end>` line range, got `{}`", cli.lines);
        std::process::exit(1);
    };

    let doc = SourceDocument::new(text);
    let handler = &mut DiagnosticHandler::default();
    let mut sink = cli.out.map(DirectorySink::new);
    let sink = sink.as_mut().map(|sink| sink as &mut dyn ArtifactSink);

    match extract(&doc, lines, &cli.name, handler, sink) {
        Ok(extraction) => {
            log::info!("extracted `{}` from `{}`", cli.name, extraction.parent);
            for port in &extraction.ports {
                log::debug!("port: {}", port);
            }
            eprint!("{}", handler.error_string());
            println!("{}", extraction.text);
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
