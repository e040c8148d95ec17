
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::report::LinkReport;
use crate::util::json_io::create_writer;

/// Writes one row per audited link to a delimited file
pub struct LinkSummaryWriter {
    /// Handle on the writer
    csv_writer: csv::Writer<Box<dyn Write>>,
}

/// Contains all the data written to each row of the summary file
#[derive(Serialize)]
struct LinkSummaryRow<'a> {
    node_a: &'a str,
    node_b: &'a str,
    orientation_a: String,
    orientation_b: String,
    edit_script: String,
    declared_matches: u64,
    declared_insertions: u64,
    declared_deletions: u64,
    true_matches: u64,
    true_mismatches: u64,
    true_insertions: u64,
    true_deletions: u64,
    discrepant: bool,
    /// Warnings joined with "; ", empty if none
    warnings: String
}

impl<'a> LinkSummaryRow<'a> {
    /// Creates a new row from a finished report
    fn new(report: &'a LinkReport) -> Self {
        let record = report.record();
        let verification = report.verification();
        let declared = verification.declared_stats();
        let observed = verification.true_stats();
        let warnings = verification.warnings().iter()
            .map(|w| w.to_string())
            .collect::<Vec<String>>()
            .join("; ");
        Self {
            node_a: report.node_a(),
            node_b: report.node_b(),
            orientation_a: record.orientation_a().to_string(),
            orientation_b: record.orientation_b().to_string(),
            edit_script: record.edit_script().to_string(),
            declared_matches: declared.matches,
            declared_insertions: declared.insertions,
            declared_deletions: declared.deletions,
            true_matches: observed.matches,
            true_mismatches: observed.mismatches,
            true_insertions: observed.insertions,
            true_deletions: observed.deletions,
            discrepant: report.is_discrepant(),
            warnings
        }
    }
}

impl LinkSummaryWriter {
    /// Creates a new summary writer. Names containing `.csv` are comma-delimited, otherwise tab-delimited.
    /// A `.gz` extension enables gzip compression.
    /// # Arguments
    /// * `filename` - path to the output file
    pub fn new(filename: &Path) -> anyhow::Result<Self> {
        let is_csv = filename.to_string_lossy().contains(".csv");
        let delimiter: u8 = if is_csv { b',' } else { b'\t' };
        let csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(create_writer(filename)?);
        Ok(Self {
            csv_writer
        })
    }

    /// Adds a row for the given link
    /// # Arguments
    /// * `report` - the verification results for the link
    pub fn write_link(&mut self, report: &LinkReport) -> csv::Result<()> {
        let row = LinkSummaryRow::new(report);
        self.csv_writer.serialize(&row)?;
        Ok(())
    }

    /// Flushes everything to disk
    pub fn finalize(mut self) -> csv::Result<()> {
        self.csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::orientation::Orientation;
    use crate::data_types::overlap_record::OverlapRecord;
    use crate::verification::verify_overlap;

    fn build_report(node_b: &str, seq_b: &[u8], cigar: &str) -> LinkReport {
        let record = OverlapRecord::new(Orientation::Forward, Orientation::Reverse, cigar.parse().unwrap());
        let verification = verify_overlap(b"ACGT", seq_b, &record);
        LinkReport::new("a".to_string(), node_b.to_string(), record, verification)
    }

    #[test]
    fn test_write_tsv() {
        let folder = tempfile::tempdir().unwrap();
        let out_fn = folder.path().join("links.tsv");
        let mut writer = LinkSummaryWriter::new(&out_fn).unwrap();
        writer.write_link(&build_report("b", b"ACGT", "2M")).unwrap();
        writer.write_link(&build_report("c", b"A", "2M")).unwrap();
        writer.finalize().unwrap();

        let text = std::fs::read_to_string(&out_fn).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("node_a\tnode_b\torientation_a\torientation_b\tedit_script\t"));
        // A[2..4] = GT vs B[3], B[2] = TG
        assert_eq!(lines[1], "a\tb\t+\t-\t2M\t2\t0\t0\t0\t2\t0\t0\ttrue\t");
        assert_eq!(lines[2], "a\tc\t+\t-\t2M\t0\t0\t0\t0\t0\t0\t0\ttrue\tinvalid alignment length 2 for sequence length 1");
    }

    #[test]
    fn test_write_csv() {
        let folder = tempfile::tempdir().unwrap();
        let out_fn = folder.path().join("links.csv");
        let mut writer = LinkSummaryWriter::new(&out_fn).unwrap();
        writer.write_link(&build_report("b", b"AATG", "2M")).unwrap();
        writer.finalize().unwrap();

        let text = std::fs::read_to_string(&out_fn).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "a,b,+,-,2M,2,0,0,2,0,0,0,false,");
    }
}
