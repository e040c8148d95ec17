/*!
# CLI module
Command line interface functionality for the overlap audit.
*/

/// The main CLI module that contains the top-level CLI parser and help text
pub mod core;
/// The audit CLI subcommand
pub mod audit;
