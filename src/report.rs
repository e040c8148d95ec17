
use derive_builder::Builder;
use indicatif::ParallelProgressIterator;
use log::{debug, trace};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;

use crate::data_types::overlap_record::OverlapRecord;
use crate::parsing::gfa::SequenceStore;
use crate::util::progress_bar::get_progress_style;
use crate::verification::{verify_overlap, Verification};

/// Controls which links end up in the report
#[derive(Builder, Clone, Copy, Debug, Default)]
#[builder(default)]
pub struct AuditConfig {
    /// if True, every link is reported instead of only the discrepant ones
    report_all: bool,
    /// if True, shows a progress bar while verifying
    show_progress: bool
}

/// Verification outcome for one link, along with the identifiers needed to print it
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LinkReport {
    node_a: String,
    node_b: String,
    record: OverlapRecord,
    verification: Verification
}

impl LinkReport {
    /// Constructor
    pub fn new(node_a: String, node_b: String, record: OverlapRecord, verification: Verification) -> Self {
        Self {
            node_a, node_b, record, verification
        }
    }

    /// True if the link has real mismatches or could not be walked
    pub fn is_discrepant(&self) -> bool {
        self.verification.is_discrepant()
    }

    // getters
    pub fn node_a(&self) -> &str {
        &self.node_a
    }

    pub fn node_b(&self) -> &str {
        &self.node_b
    }

    pub fn record(&self) -> &OverlapRecord {
        &self.record
    }

    pub fn verification(&self) -> &Verification {
        &self.verification
    }
}

impl std::fmt::Display for LinkReport {
    /// Writes the multi-line diagnostic block, terminated by a blank line
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verification = &self.verification;
        writeln!(f, "{}\t{}", self.node_a, self.node_b)?;
        writeln!(f, "{}", self.record)?;
        writeln!(f, "{}", verification.true_stats())?;
        writeln!(f, "{}", verification.declared_stats())?;
        writeln!(f, "{}", verification.rendering())?;
        write!(f, "{}", verification.warning_text())?;
        if verification.is_discrepant() {
            writeln!(f, "ERROR: mismatch found in alignment")?;
        }
        writeln!(f)
    }
}

/// Verifies every link in the store.
/// Each link is independent, so this runs on the global rayon pool; results keep the store's link order.
/// # Arguments
/// * `store` - the loaded sequences and links
/// * `config` - controls reporting
pub fn audit_links(store: &SequenceStore, config: AuditConfig) -> Vec<LinkReport> {
    let all_links: Vec<(&(String, String), &OverlapRecord)> = store.links().collect();
    let num_links = all_links.len() as u64;

    let verify = |((node_a, node_b), record): (&(String, String), &OverlapRecord)| {
        // the store guarantees that every link endpoint has a sequence
        let sequence_a = store.sequence(node_a).unwrap_or_default();
        let sequence_b = store.sequence(node_b).unwrap_or_default();
        let verification = verify_overlap(sequence_a, sequence_b, record);
        trace!("{node_a} -> {node_b}: {verification:?}");
        LinkReport::new(node_a.clone(), node_b.clone(), record.clone(), verification)
    };

    let all_reports: Vec<LinkReport> = if config.show_progress {
        let style = get_progress_style();
        all_links.into_par_iter()
            .map(verify)
            .progress_with_style(style)
            .collect()
    } else {
        all_links.into_par_iter()
            .map(verify)
            .collect()
    };

    let num_discrepant = all_reports.iter().filter(|r| r.is_discrepant()).count();
    debug!("Verified {num_links} links, {num_discrepant} discrepant");

    if config.report_all {
        all_reports
    } else {
        all_reports.into_iter()
            .filter(|r| r.is_discrepant())
            .collect()
    }
}

/// Writes the diagnostic block for each report
/// # Arguments
/// * `reports` - the reports to print, usually the output of `audit_links`
/// * `writer` - destination, usually stdout
pub fn write_reports<W: Write>(reports: &[LinkReport], writer: &mut W) -> std::io::Result<()> {
    for report in reports.iter() {
        write!(writer, "{report}")?;
    }
    writer.flush()
}
