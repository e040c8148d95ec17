/// Match / mismatch / insertion / deletion counters
pub mod alignment_stats;
/// Compact CIGAR edit scripts and their operations
pub mod edit_script;
/// Segment orientation within a link
pub mod orientation;
/// A declared overlap between two segments
pub mod overlap_record;
