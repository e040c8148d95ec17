
use itertools::Itertools;
use serde::Serialize;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EditScriptError {
    #[error("invalid cigar operation: {tag}")]
    UnknownEditOperation { tag: char },
    #[error("cigar operation {tag} at position {position} has no positive count")]
    MissingCount { tag: char, position: usize },
    #[error("cigar ends with a count that has no operation: {digits}")]
    DanglingCount { digits: String },
    #[error("cigar count is too large: {digits}")]
    CountOverflow { digits: String },
}

/// The operations we allow in a link overlap
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, strum_macros::AsRefStr)]
pub enum EditOperation {
    /// Match or mismatch, consumes one symbol from both sequences
    #[strum(serialize = "M")]
    Match,
    /// Consumes one symbol from sequence B only
    #[strum(serialize = "I")]
    Insertion,
    /// Consumes one symbol from sequence A only
    #[strum(serialize = "D")]
    Deletion,
}

impl TryFrom<char> for EditOperation {
    type Error = EditScriptError;

    fn try_from(tag: char) -> Result<Self, Self::Error> {
        match tag {
            'M' => Ok(EditOperation::Match),
            'I' => Ok(EditOperation::Insertion),
            'D' => Ok(EditOperation::Deletion),
            _ => Err(EditScriptError::UnknownEditOperation { tag })
        }
    }
}

impl EditOperation {
    /// Returns true if this operation advances along sequence A
    pub fn consumes_a(&self) -> bool {
        match self {
            EditOperation::Match |
            EditOperation::Deletion => true,
            EditOperation::Insertion => false
        }
    }

    /// Returns true if this operation advances along sequence B
    pub fn consumes_b(&self) -> bool {
        match self {
            EditOperation::Match |
            EditOperation::Insertion => true,
            EditOperation::Deletion => false
        }
    }
}

/// An ordered list of (operation, count) pairs, as written in the compact CIGAR encoding.
/// Every count is guaranteed to be >0 by construction.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EditScript {
    operations: Vec<(EditOperation, usize)>
}

impl FromStr for EditScript {
    type Err = EditScriptError;

    /// Parses a compact CIGAR string such as `1I3M1D`.
    /// The GFA placeholder `*` parses to an empty script.
    /// # Errors
    /// * if a tag is not one of `M`, `I`, `D`
    /// * if a tag is not preceded by a positive count
    /// * if the string ends in digits
    fn from_str(cigar: &str) -> Result<Self, Self::Err> {
        if cigar == "*" {
            return Ok(Self::default());
        }

        let mut operations = vec![];
        let mut count_digits = String::new();
        for (position, c) in cigar.chars().enumerate() {
            if c.is_ascii_digit() {
                count_digits.push(c);
                continue;
            }

            // a tag closes out the current operation
            let operation = EditOperation::try_from(c)?;
            let count: usize = if count_digits.is_empty() {
                0
            } else {
                count_digits.parse()
                    .map_err(|_e| EditScriptError::CountOverflow { digits: count_digits.clone() })?
            };
            if count == 0 {
                return Err(EditScriptError::MissingCount { tag: c, position });
            }

            operations.push((operation, count));
            count_digits.clear();
        }

        if !count_digits.is_empty() {
            return Err(EditScriptError::DanglingCount { digits: count_digits });
        }

        Ok(Self {
            operations
        })
    }
}

impl std::fmt::Display for EditScript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.operations.is_empty() {
            return write!(f, "*");
        }
        let encoded = self.operations.iter()
            .map(|(operation, count)| format!("{count}{}", operation.as_ref()))
            .join("");
        write!(f, "{encoded}")
    }
}

impl EditScript {
    /// Returns the total number of symbols consumed on (sequence A, sequence B).
    /// Totals saturate at `usize::MAX`, which no real sequence can hold.
    pub fn consumed_lengths(&self) -> (usize, usize) {
        self.operations.iter()
            .fold((0usize, 0usize), |(length_a, length_b), &(operation, count)| {
                (
                    length_a.saturating_add(if operation.consumes_a() { count } else { 0 }),
                    length_b.saturating_add(if operation.consumes_b() { count } else { 0 })
                )
            })
    }

    // getters
    pub fn operations(&self) -> &[(EditOperation, usize)] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let script: EditScript = "1I3M1D".parse().unwrap();
        assert_eq!(script.operations(), &[
            (EditOperation::Insertion, 1),
            (EditOperation::Match, 3),
            (EditOperation::Deletion, 1)
        ]);
        assert_eq!(script.consumed_lengths(), (4, 4));
        assert_eq!(script.to_string(), "1I3M1D");
    }

    #[test]
    fn test_parse_multi_digit() {
        let script: EditScript = "120M15I7D".parse().unwrap();
        assert_eq!(script.operations(), &[
            (EditOperation::Match, 120),
            (EditOperation::Insertion, 15),
            (EditOperation::Deletion, 7)
        ]);
        assert_eq!(script.consumed_lengths(), (127, 135));
    }

    #[test]
    fn test_parse_placeholder() {
        let script: EditScript = "*".parse().unwrap();
        assert!(script.is_empty());
        assert_eq!(script.consumed_lengths(), (0, 0));
        assert_eq!(script.to_string(), "*");

        let empty: EditScript = "".parse().unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_unknown_operation() {
        assert_eq!(
            "3M1X".parse::<EditScript>(),
            Err(EditScriptError::UnknownEditOperation { tag: 'X' })
        );
        assert_eq!(
            "3=".parse::<EditScript>(),
            Err(EditScriptError::UnknownEditOperation { tag: '=' })
        );
    }

    #[test]
    fn test_missing_count() {
        assert_eq!(
            "M3I".parse::<EditScript>(),
            Err(EditScriptError::MissingCount { tag: 'M', position: 0 })
        );
        assert_eq!(
            "4M0D".parse::<EditScript>(),
            Err(EditScriptError::MissingCount { tag: 'D', position: 3 })
        );
    }

    #[test]
    fn test_dangling_count() {
        assert_eq!(
            "4M12".parse::<EditScript>(),
            Err(EditScriptError::DanglingCount { digits: "12".to_string() })
        );
    }

    #[test]
    fn test_count_overflow() {
        let result = "99999999999999999999999999M".parse::<EditScript>();
        assert!(matches!(result, Err(EditScriptError::CountOverflow { .. })));
    }

    #[test]
    fn test_consumed_lengths_saturate() {
        let script: EditScript = format!("{}M1M2I", usize::MAX).parse().unwrap();
        assert_eq!(script.consumed_lengths(), (usize::MAX, usize::MAX));

        let script: EditScript = format!("{}D1D3M", usize::MAX).parse().unwrap();
        assert_eq!(script.consumed_lengths(), (usize::MAX, 3));
    }
}
