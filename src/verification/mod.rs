/*!
# Verification module
Reconstructs the base-by-base alignment implied by a link's edit script and compares the declared counts to reality.
*/
/// Three-line alignment rendering
pub mod rendering;
/// Orientation-aware start index and step direction for each sequence
pub mod walk_cursor;

use log::trace;
use serde::Serialize;

use crate::data_types::alignment_stats::AlignmentStats;
use crate::data_types::edit_script::EditOperation;
use crate::data_types::overlap_record::OverlapRecord;
use crate::verification::rendering::AlignmentRendering;
use crate::verification::walk_cursor::WalkCursor;

/// Identifies which side of a link a warning refers to
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, strum_macros::Display)]
pub enum LinkSide {
    A,
    B
}

/// Record-level problems that prevent the per-base walk; these never abort a run
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum AlignmentWarning {
    #[error("invalid alignment length {alignment_length} for sequence length {sequence_length}")]
    InvalidAlignmentLength { side: LinkSide, alignment_length: usize, sequence_length: usize },
    #[error("alignment anchor on sequence {side} reaches index {index} outside sequence length {sequence_length}")]
    AnchorOutOfRange { side: LinkSide, index: isize, sequence_length: usize },
}

/// Result of verifying one link
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Verification {
    /// Counts recomputed from the actual symbols
    true_stats: AlignmentStats,
    /// Counts claimed by the edit script, every M is a match
    declared_stats: AlignmentStats,
    /// Visual alignment, empty if the walk was skipped
    rendering: AlignmentRendering,
    /// Anything that prevented the walk
    warnings: Vec<AlignmentWarning>
}

impl Verification {
    /// True if this link should be reported: real mismatches or a warning
    pub fn is_discrepant(&self) -> bool {
        self.true_stats.mismatches > 0 || !self.warnings.is_empty()
    }

    /// All warnings as "ERROR: "-prefixed lines, empty if there are none
    pub fn warning_text(&self) -> String {
        self.warnings.iter()
            .map(|w| format!("ERROR: {w}\n"))
            .collect()
    }

    // getters
    pub fn true_stats(&self) -> AlignmentStats {
        self.true_stats
    }

    pub fn declared_stats(&self) -> AlignmentStats {
        self.declared_stats
    }

    pub fn rendering(&self) -> &AlignmentRendering {
        &self.rendering
    }

    pub fn warnings(&self) -> &[AlignmentWarning] {
        &self.warnings
    }
}

/// Checks that the consumed lengths fit the sequences and that every cursor read stays in bounds.
fn check_walk_bounds(
    side: LinkSide, cursor: &WalkCursor, consumed: usize, sequence_length: usize
) -> Option<AlignmentWarning> {
    if consumed > sequence_length {
        Some(AlignmentWarning::InvalidAlignmentLength {
            side, alignment_length: consumed, sequence_length
        })
    } else if !cursor.fits_within(consumed, sequence_length) {
        // only reachable for a reverse A walk that consumes the whole sequence
        Some(AlignmentWarning::AnchorOutOfRange {
            side, index: cursor.index(), sequence_length
        })
    } else {
        None
    }
}

/// Walks both sequences along the link's edit script and recomputes the alignment statistics.
/// If the script consumes more than either sequence holds, the walk is skipped and warnings are returned with zero statistics.
/// # Arguments
/// * `sequence_a` - the full first sequence of the link
/// * `sequence_b` - the full second sequence of the link
/// * `record` - the declared overlap
pub fn verify_overlap(sequence_a: &[u8], sequence_b: &[u8], record: &OverlapRecord) -> Verification {
    let edit_script = record.edit_script();
    let (consumed_a, consumed_b) = edit_script.consumed_lengths();

    let mut cursor_a = WalkCursor::for_sequence_a(sequence_a.len(), record.orientation_a(), consumed_a);
    let mut cursor_b = WalkCursor::for_sequence_b(sequence_b.len(), record.orientation_b());
    trace!("Cursor A: {cursor_a:?}, consumed {consumed_a} of {}", sequence_a.len());
    trace!("Cursor B: {cursor_b:?}, consumed {consumed_b} of {}", sequence_b.len());

    let warnings: Vec<AlignmentWarning> = [
        check_walk_bounds(LinkSide::A, &cursor_a, consumed_a, sequence_a.len()),
        check_walk_bounds(LinkSide::B, &cursor_b, consumed_b, sequence_b.len())
    ].into_iter().flatten().collect();

    if !warnings.is_empty() {
        return Verification {
            warnings,
            ..Default::default()
        };
    }

    let mut true_stats = AlignmentStats::default();
    let mut declared_stats = AlignmentStats::default();
    let mut rendering = AlignmentRendering::with_capacity(consumed_a.max(consumed_b));

    for &(operation, count) in edit_script.operations() {
        for _ in 0..count {
            match operation {
                EditOperation::Match => {
                    declared_stats.matches += 1;

                    let symbol_a = cursor_a.symbol(sequence_a);
                    let symbol_b = cursor_b.symbol(sequence_b);
                    if symbol_a == symbol_b {
                        true_stats.matches += 1;
                    } else {
                        true_stats.mismatches += 1;
                    }
                    rendering.push_aligned(symbol_a, symbol_b);

                    cursor_a.advance();
                    cursor_b.advance();
                },
                EditOperation::Insertion => {
                    declared_stats.insertions += 1;
                    true_stats.insertions += 1;
                    rendering.push_insertion(cursor_b.symbol(sequence_b));
                    cursor_b.advance();
                },
                EditOperation::Deletion => {
                    declared_stats.deletions += 1;
                    true_stats.deletions += 1;
                    rendering.push_deletion(cursor_a.symbol(sequence_a));
                    cursor_a.advance();
                }
            }
        }
    }

    Verification {
        true_stats,
        declared_stats,
        rendering,
        warnings
    }
}
