// Copyright 2025 Cornell University
// released under MIT License

pub mod declarations;
pub mod diagnostic;
pub mod errors;
mod extract;
pub mod ports;
pub mod source;
pub mod synth;
pub mod usage;

pub use errors::ExtractError;
pub use extract::{extract, Extraction};
