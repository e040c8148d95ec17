
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_optional_output, check_required_filename, AFTER_HELP, FULL_VERSION};

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct AuditSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    audit_version: String,

    /// Assembly graph file (GFA)
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "GFA")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_gfa: PathBuf,

    /// Optional per-link summary table (TSV, or CSV if named .csv; .gz to compress)
    #[clap(long = "output-summary")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_summary: Option<PathBuf>,

    /// Optional JSON dump of the reported links (.gz to compress)
    #[clap(long = "output-json")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_json: Option<PathBuf>,

    /// Prints every link, not only the discrepant ones
    #[clap(long = "report-all")]
    #[clap(help_heading = Some("Reporting"))]
    pub report_all: bool,

    /// Number of threads to use in the verification step
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    pub threads: usize,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_audit_settings(mut settings: AuditSettings) -> anyhow::Result<AuditSettings> {
    // hard code the version in
    settings.audit_version = FULL_VERSION.clone();
    info!("gfa-overlap-audit version: {:?}", &settings.audit_version);
    info!("Sub-command: audit");
    info!("Inputs:");

    check_required_filename(&settings.input_gfa, "Input GFA")?;
    info!("\tGFA: {:?}", &settings.input_gfa);

    info!("Outputs:");
    check_optional_output(settings.output_summary.as_deref(), "Summary")?;
    check_optional_output(settings.output_json.as_deref(), "JSON")?;
    if let Some(filename) = settings.output_summary.as_deref() {
        info!("\tSummary: {filename:?}");
    } else {
        info!("\tSummary: None");
    }
    if let Some(filename) = settings.output_json.as_deref() {
        info!("\tJSON: {filename:?}");
    } else {
        info!("\tJSON: None");
    }
    info!("\tReport all links: {}", if settings.report_all { "ENABLED" } else { "DISABLED" });

    if settings.threads == 0 {
        settings.threads = 1;
    }
    info!("Processing threads: {}", settings.threads);

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_settings() {
        let settings = AuditSettings {
            input_gfa: PathBuf::from("Cargo.toml"),
            threads: 0,
            ..Default::default()
        };
        let settings = check_audit_settings(settings).unwrap();
        assert_eq!(settings.threads, 1);
        assert_eq!(settings.audit_version, FULL_VERSION.clone());
    }

    #[test]
    fn test_missing_input() {
        let settings = AuditSettings {
            input_gfa: PathBuf::from("not_a_file.gfa"),
            ..Default::default()
        };
        assert!(check_audit_settings(settings).is_err());
    }
}
