
use crate::data_types::orientation::Orientation;

/// Tracks the current position and direction while walking one sequence of an overlap.
/// Positions are signed so that the cursor can step one past either end after the final symbol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WalkCursor {
    /// Current 0-based index into the sequence
    index: isize,
    /// Either +1 or -1
    step: isize
}

impl WalkCursor {
    /// Anchors the cursor for the first sequence of a link.
    /// The anchor is only meaningful when `consumed <= length`.
    /// Forward walks start at the beginning of the overlapped suffix, `length - consumed`, and move right.
    /// Reverse walks start at index `consumed` and move left toward index 0.
    /// # Arguments
    /// * `length` - full length of sequence A
    /// * `orientation` - orientation of sequence A in the link
    /// * `consumed` - number of symbols the edit script consumes from sequence A
    pub fn for_sequence_a(length: usize, orientation: Orientation, consumed: usize) -> Self {
        match orientation {
            Orientation::Forward => Self {
                index: length.saturating_sub(consumed) as isize,
                step: 1
            },
            Orientation::Reverse => Self {
                index: consumed as isize,
                step: -1
            }
        }
    }

    /// Anchors the cursor for the second sequence of a link.
    /// Forward walks start at index 0, reverse walks start at the last index; neither depends on the consumed length.
    /// # Arguments
    /// * `length` - full length of sequence B
    /// * `orientation` - orientation of sequence B in the link
    pub fn for_sequence_b(length: usize, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Forward => Self {
                index: 0,
                step: 1
            },
            Orientation::Reverse => Self {
                index: length as isize - 1,
                step: -1
            }
        }
    }

    /// Returns the inclusive (lowest, highest) indices that `count` symbol reads would touch, or None if `count` is 0.
    pub fn visited_range(&self, count: usize) -> Option<(isize, isize)> {
        if count == 0 {
            return None;
        }
        let last = self.index + self.step * (count as isize - 1);
        Some((self.index.min(last), self.index.max(last)))
    }

    /// Returns true if reading `count` symbols from here stays inside a sequence of `length`
    pub fn fits_within(&self, count: usize, length: usize) -> bool {
        match self.visited_range(count) {
            Some((lowest, highest)) => lowest >= 0 && highest < length as isize,
            None => true
        }
    }

    /// Returns the symbol under the cursor.
    /// Callers must have checked `fits_within` for the full walk first.
    pub fn symbol(&self, sequence: &[u8]) -> u8 {
        sequence[self.index as usize]
    }

    /// Moves one symbol in the walk direction
    pub fn advance(&mut self) {
        self.index += self.step;
    }

    // getters
    pub fn index(&self) -> isize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_a() {
        let forward = WalkCursor::for_sequence_a(10, Orientation::Forward, 4);
        assert_eq!((forward.index, forward.step), (6, 1));
        assert_eq!(forward.visited_range(4), Some((6, 9)));

        let reverse = WalkCursor::for_sequence_a(10, Orientation::Reverse, 4);
        assert_eq!((reverse.index, reverse.step), (4, -1));
        assert_eq!(reverse.visited_range(4), Some((1, 4)));
    }

    #[test]
    fn test_anchor_b() {
        let forward = WalkCursor::for_sequence_b(10, Orientation::Forward);
        assert_eq!((forward.index, forward.step), (0, 1));
        assert_eq!(forward.visited_range(3), Some((0, 2)));

        let reverse = WalkCursor::for_sequence_b(10, Orientation::Reverse);
        assert_eq!((reverse.index, reverse.step), (9, -1));
        assert_eq!(reverse.visited_range(3), Some((7, 9)));
    }

    #[test]
    fn test_fits_within() {
        // full-length forward overlaps are fine
        assert!(WalkCursor::for_sequence_a(4, Orientation::Forward, 4).fits_within(4, 4));
        assert!(WalkCursor::for_sequence_b(4, Orientation::Reverse).fits_within(4, 4));

        // reverse A anchored at the consumed length runs off the end when everything is consumed
        assert!(!WalkCursor::for_sequence_a(4, Orientation::Reverse, 4).fits_within(4, 4));
        assert!(WalkCursor::for_sequence_a(5, Orientation::Reverse, 4).fits_within(4, 5));

        // nothing read, nothing to check
        assert!(WalkCursor::for_sequence_b(0, Orientation::Reverse).fits_within(0, 0));
        assert!(!WalkCursor::for_sequence_b(2, Orientation::Forward).fits_within(4, 2));
    }

    #[test]
    fn test_walk() {
        let sequence = b"ACGT";
        let mut cursor = WalkCursor::for_sequence_b(sequence.len(), Orientation::Reverse);
        let mut walked = vec![];
        for _ in 0..sequence.len() {
            walked.push(cursor.symbol(sequence));
            cursor.advance();
        }
        assert_eq!(walked, b"TGCA".to_vec());
        assert_eq!(cursor.index(), -1);
    }
}
