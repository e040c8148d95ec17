/*!
# Writers module
Contains the optional file outputs for the audit command.
*/
/// Generates the per-link summary table
pub mod link_summary;
