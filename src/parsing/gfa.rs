
use anyhow::Context;
use indexmap::IndexMap;
use log::debug;
use rustc_hash::FxHashMap as HashMap;
use std::io::Read;
use std::path::Path;

use crate::data_types::edit_script::{EditScript, EditScriptError};
use crate::data_types::orientation::{Orientation, OrientationError};
use crate::data_types::overlap_record::OverlapRecord;

/// Fatal problems with the graph contents; any of these stops the run
#[derive(thiserror::Error, Debug)]
pub enum GfaError {
    #[error("line {line}: {source}")]
    Orientation { line: u64, source: OrientationError },
    #[error("line {line}: {source}")]
    EditScript { line: u64, source: EditScriptError },
    #[error("line {line}: {record_type} record is missing the {field} field")]
    MissingField { line: u64, record_type: char, field: &'static str },
    #[error("line {line}: segment {node} has a non-ASCII sequence")]
    NonAsciiSequence { line: u64, node: String },
    #[error("link {node_a} -> {node_b} references segment {missing} with no S record")]
    UnknownSegment { node_a: String, node_b: String, missing: String },
}

/// All the segment sequences and declared links of one graph, resident in memory
#[derive(Clone, Debug, Default)]
pub struct SequenceStore {
    /// Segment name to sequence; absent sequences (`*`) are stored empty
    sequences: HashMap<String, Vec<u8>>,
    /// (node A, node B) to the declared overlap; a repeated pair replaces the earlier record
    links: IndexMap<(String, String), OverlapRecord>
}

impl SequenceStore {
    /// Loads the S and L records of a GFA file.
    /// # Arguments
    /// * `gfa_fn` - path to the GFA file
    /// # Errors
    /// * if the file cannot be opened or read
    /// * if any L record has a bad orientation or edit script
    /// * if any L record references a segment that is never defined
    pub fn from_gfa(gfa_fn: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(gfa_fn)
            .with_context(|| format!("Error while opening {gfa_fn:?}:"))?;
        Self::from_reader(file)
            .with_context(|| format!("Error while parsing {gfa_fn:?}:"))
    }

    /// Loads the S and L records from any GFA-formatted reader.
    /// Other record types (H, P, W, C, ...) are ignored.
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true) // S, L, and others all have different column counts
            .quoting(false)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut store = Self::default();
        for result in csv_reader.records() {
            let row = result.context("Error while reading GFA record")?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            match row.get(0) {
                Some("S") => {
                    let node = required_field(&row, 1, 'S', "segment name", line)?;
                    let sequence = required_field(&row, 2, 'S', "sequence", line)?;
                    // symbols are compared and rendered byte by byte
                    if !sequence.is_ascii() {
                        return Err(GfaError::NonAsciiSequence { line, node: node.to_string() }.into());
                    }
                    let sequence = if sequence == "*" { vec![] } else { sequence.as_bytes().to_vec() };
                    store.sequences.insert(node.to_string(), sequence);
                },
                Some("L") => {
                    let node_a = required_field(&row, 1, 'L', "from segment", line)?;
                    let orientation_a = parse_orientation(required_field(&row, 2, 'L', "from orientation", line)?, line)?;
                    let node_b = required_field(&row, 3, 'L', "to segment", line)?;
                    let orientation_b = parse_orientation(required_field(&row, 4, 'L', "to orientation", line)?, line)?;
                    let edit_script: EditScript = required_field(&row, 5, 'L', "overlap", line)?
                        .parse()
                        .map_err(|source| GfaError::EditScript { line, source })?;

                    let record = OverlapRecord::new(orientation_a, orientation_b, edit_script);
                    if let Some(previous) = store.links.insert((node_a.to_string(), node_b.to_string()), record) {
                        debug!("Line {line}: link {node_a} -> {node_b} replaces earlier record {previous}");
                    }
                },
                _ => {
                    // header, paths, blank lines, etc.
                }
            }
        }

        store.check_link_segments()?;
        Ok(store)
    }

    /// Makes sure every link endpoint has a sequence
    fn check_link_segments(&self) -> Result<(), GfaError> {
        for (node_a, node_b) in self.links.keys() {
            for node in [node_a, node_b] {
                if !self.sequences.contains_key(node) {
                    return Err(GfaError::UnknownSegment {
                        node_a: node_a.clone(), node_b: node_b.clone(), missing: node.clone()
                    });
                }
            }
        }
        Ok(())
    }

    /// Adds or replaces a segment sequence
    #[cfg(test)]
    pub(crate) fn insert_sequence(&mut self, node: String, sequence: Vec<u8>) {
        self.sequences.insert(node, sequence);
    }

    /// Adds or replaces the link between two segments
    #[cfg(test)]
    pub(crate) fn insert_link(&mut self, node_a: String, node_b: String, record: OverlapRecord) {
        self.links.insert((node_a, node_b), record);
    }

    /// Returns the sequence for a segment, if defined
    pub fn sequence(&self, node: &str) -> Option<&[u8]> {
        self.sequences.get(node).map(|s| s.as_slice())
    }

    /// Returns the link between two segments, if declared
    pub fn link(&self, node_a: &str, node_b: &str) -> Option<&OverlapRecord> {
        self.links.get(&(node_a.to_string(), node_b.to_string()))
    }

    /// Iterates over all ((node A, node B), record) pairs; callers must not rely on the order
    pub fn links(&self) -> impl Iterator<Item = (&(String, String), &OverlapRecord)> {
        self.links.iter()
    }

    pub fn num_sequences(&self) -> usize {
        self.sequences.len()
    }

    pub fn num_links(&self) -> usize {
        self.links.len()
    }
}

fn required_field<'a>(
    row: &'a csv::StringRecord, index: usize, record_type: char, field: &'static str, line: u64
) -> Result<&'a str, GfaError> {
    row.get(index)
        .ok_or(GfaError::MissingField { line, record_type, field })
}

fn parse_orientation(symbol: &str, line: u64) -> Result<Orientation, GfaError> {
    symbol.parse()
        .map_err(|source| GfaError::Orientation { line, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::edit_script::EditOperation;

    const SIMPLE_GFA: &str = "H\tVN:Z:1.0
S\t1\tACGT
S\t2\tACGA\tLN:i:4
S\t3\t*
L\t1\t+\t2\t-\t4M
L\t2\t-\t3\t+\t*
";

    #[test]
    fn test_simple_gfa() {
        let store = SequenceStore::from_reader(SIMPLE_GFA.as_bytes()).unwrap();
        assert_eq!(store.num_sequences(), 3);
        assert_eq!(store.num_links(), 2);
        assert_eq!(store.sequence("1"), Some(b"ACGT".as_slice()));
        assert_eq!(store.sequence("2"), Some(b"ACGA".as_slice()));
        assert_eq!(store.sequence("3"), Some(b"".as_slice()));
        assert_eq!(store.sequence("4"), None);

        let link = store.link("1", "2").unwrap();
        assert_eq!(link.orientation_a(), Orientation::Forward);
        assert_eq!(link.orientation_b(), Orientation::Reverse);
        assert_eq!(link.edit_script().operations(), &[(EditOperation::Match, 4)]);
        assert!(store.link("2", "1").is_none());
        assert!(store.link("2", "3").unwrap().edit_script().is_empty());

        let keys: Vec<(String, String)> = store.links().map(|(k, _v)| k.clone()).collect();
        assert_eq!(keys, vec![
            ("1".to_string(), "2".to_string()),
            ("2".to_string(), "3".to_string())
        ]);
    }

    #[test]
    fn test_links_before_segments() {
        let gfa = "L\tb\t+\ta\t+\t2M\n# comment\n\nS\ta\tAA\nS\tb\tAA\n";
        let store = SequenceStore::from_reader(gfa.as_bytes()).unwrap();
        assert_eq!(store.num_links(), 1);
        assert_eq!(store.num_sequences(), 2);
    }

    #[test]
    fn test_duplicate_link_replaced() {
        let gfa = "S\ta\tAAAA\nS\tb\tAAAA\nL\ta\t+\tb\t+\t2M\nL\ta\t+\tb\t-\t3M\n";
        let store = SequenceStore::from_reader(gfa.as_bytes()).unwrap();
        assert_eq!(store.num_links(), 1);
        assert_eq!(store.link("a", "b").unwrap().to_string(), "+ - 3M");
    }

    #[test]
    fn test_bad_orientation() {
        let gfa = "S\ta\tAAAA\nS\tb\tAAAA\nL\ta\t?\tb\t+\t2M\n";
        let err = SequenceStore::from_reader(gfa.as_bytes()).unwrap_err();
        let gfa_err = err.downcast_ref::<GfaError>().unwrap();
        assert!(matches!(
            gfa_err,
            GfaError::Orientation { line: 3, source: OrientationError::MalformedOrientationSymbol { .. } }
        ));
    }

    #[test]
    fn test_bad_operation() {
        let gfa = "S\ta\tAAAA\nS\tb\tAAAA\nL\ta\t+\tb\t+\t2M1X\n";
        let err = SequenceStore::from_reader(gfa.as_bytes()).unwrap_err();
        let gfa_err = err.downcast_ref::<GfaError>().unwrap();
        assert!(matches!(
            gfa_err,
            GfaError::EditScript { line: 3, source: EditScriptError::UnknownEditOperation { tag: 'X' } }
        ));
    }

    #[test]
    fn test_missing_field() {
        let gfa = "S\ta\tAAAA\nL\ta\t+\tb\n";
        let err = SequenceStore::from_reader(gfa.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GfaError>().unwrap(),
            GfaError::MissingField { line: 2, record_type: 'L', .. }
        ));
    }

    #[test]
    fn test_unknown_segment() {
        let gfa = "S\ta\tAAAA\nL\ta\t+\tb\t+\t2M\n";
        let err = SequenceStore::from_reader(gfa.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GfaError>().unwrap(),
            GfaError::UnknownSegment { missing, .. } if missing == "b"
        ));
    }

    #[test]
    fn test_non_ascii_sequence() {
        let gfa = "S\ta\tACGT\nS\tb\tACÄT\nL\ta\t+\tb\t+\t4M\n";
        let err = SequenceStore::from_reader(gfa.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GfaError>().unwrap(),
            GfaError::NonAsciiSequence { line: 2, node } if node == "b"
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = SequenceStore::from_gfa(Path::new("this/file/does/not/exist.gfa"));
        assert!(result.is_err());
    }
}
