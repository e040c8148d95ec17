
use serde::Serialize;

/// Per-base counters for one overlap
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct AlignmentStats {
    /// Number of aligned positions with identical symbols
    pub matches: u64,
    /// Number of aligned positions with differing symbols
    pub mismatches: u64,
    /// Number of symbols only present in sequence B
    pub insertions: u64,
    /// Number of symbols only present in sequence A
    pub deletions: u64
}

impl AlignmentStats {
    /// Constructor
    pub fn new(matches: u64, mismatches: u64, insertions: u64, deletions: u64) -> Self {
        Self {
            matches, mismatches, insertions, deletions
        }
    }

    /// Number of symbols from sequence A covered by these counts
    pub fn consumed_a(&self) -> u64 {
        self.matches + self.mismatches + self.deletions
    }

    /// Number of symbols from sequence B covered by these counts
    pub fn consumed_b(&self) -> u64 {
        self.matches + self.mismatches + self.insertions
    }

    /// Returns true if every counter is zero
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Display for AlignmentStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}\t{}", self.matches, self.mismatches, self.insertions, self.deletions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumed() {
        let stats = AlignmentStats::new(3, 1, 2, 5);
        assert_eq!(stats.consumed_a(), 9);
        assert_eq!(stats.consumed_b(), 6);
        assert!(!stats.is_empty());
        assert!(AlignmentStats::default().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(AlignmentStats::new(3, 0, 1, 1).to_string(), "3\t0\t1\t1");
    }
}
