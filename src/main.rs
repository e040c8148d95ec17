
use log::{LevelFilter, error, info};
use std::time::Instant;

use gfa_overlap_audit::cli::audit::{AuditSettings, check_audit_settings};
use gfa_overlap_audit::cli::core::{Commands, get_cli};
use gfa_overlap_audit::parsing::gfa::{GfaError, SequenceStore};
use gfa_overlap_audit::report::{AuditConfigBuilder, audit_links, write_reports};
use gfa_overlap_audit::util::json_io::save_json;
use gfa_overlap_audit::writers::link_summary::LinkSummaryWriter;

fn run_audit(settings: AuditSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    let settings = match check_audit_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // set up the number of threads for rayon
    match rayon::ThreadPoolBuilder::new().num_threads(settings.threads).build_global() {
        Ok(()) => {},
        Err(e) => {
            error!("Error while building thread pool: {e}");
            std::process::exit(exitcode::OSERR);
        }
    };

    // load the whole graph; malformed links stop everything here
    info!("Loading GFA into memory...");
    let store = match SequenceStore::from_gfa(&settings.input_gfa) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while loading GFA: {e:#}");
            if e.downcast_ref::<GfaError>().is_some() {
                std::process::exit(exitcode::DATAERR);
            } else {
                std::process::exit(exitcode::IOERR);
            }
        }
    };
    info!("Loaded {} segments and {} links.", store.num_sequences(), store.num_links());

    let want_summary = settings.output_summary.is_some();
    let audit_config = match AuditConfigBuilder::default()
        .report_all(settings.report_all || want_summary)
        .show_progress(settings.threads > 1)
        .build() {
        Ok(ac) => ac,
        Err(e) => {
            error!("Error while building audit config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    info!("Verifying links...");
    let all_reports = audit_links(&store, audit_config);

    // the summary table covers every link, the printed blocks follow --report-all
    if let Some(summary_fn) = settings.output_summary.as_deref() {
        info!("Saving link summary to {summary_fn:?}...");
        let write_result = LinkSummaryWriter::new(summary_fn)
            .and_then(|mut writer| {
                for report in all_reports.iter() {
                    writer.write_link(report)?;
                }
                writer.finalize()?;
                Ok(())
            });
        if let Err(e) = write_result {
            error!("Error while saving link summary: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    let printed_reports: Vec<_> = all_reports.into_iter()
        .filter(|r| settings.report_all || r.is_discrepant())
        .collect();
    let num_discrepant = printed_reports.iter().filter(|r| r.is_discrepant()).count();

    let stdout = std::io::stdout();
    if let Err(e) = write_reports(&printed_reports, &mut stdout.lock()) {
        error!("Error while writing reports: {e}");
        std::process::exit(exitcode::IOERR);
    }

    if let Some(json_fn) = settings.output_json.as_deref() {
        info!("Saving reports to {json_fn:?}...");
        if let Err(e) = save_json(&printed_reports, json_fn) {
            error!("Error while saving JSON reports: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    info!("Audited:discrepant links: {} : {num_discrepant}", store.num_links());
    info!("Audit completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Audit(settings) => {
            run_audit(*settings);
        }
    }

    info!("Process finished successfully.");
}
