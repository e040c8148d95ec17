/// Command line interface functionality
pub mod cli;
/// Edit scripts, orientations, overlap records, and alignment counters
pub mod data_types;
/// Tooling for parsing GFA files into the sequence store
pub mod parsing;
/// Runs the verifier over every link and formats the diagnostics
pub mod report;
/// Various utility functions that tend to be very generic
pub mod util;
/// Core logic for re-deriving a link alignment from its edit script
pub mod verification;
/// All output writers
pub mod writers;
