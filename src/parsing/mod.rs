/*!
# Parsing module
Contains the logic for parsing input files into meaningful structs / data.
*/
/// Loads GFA segments and links into a sequence store
pub mod gfa;
