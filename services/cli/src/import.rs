use clap::Args;
use huntflow_uploader::config::AppConfig;
use huntflow_uploader::error::AppError;
use huntflow_uploader::telemetry;
use huntflow_uploader::workflows::candidates::{
    resolve_account, CandidatePipeline, LabelResolver, ResumeLocator, RunReport,
};
use huntflow_uploader::workflows::huntflow::{HttpTransport, UploadClient};
use huntflow_uploader::workflows::roster::RosterImporter;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Candidate roster (.xlsx, .xls, .ods or .csv)
    pub(crate) database: PathBuf,
    /// Huntflow API bearer token
    pub(crate) token: String,
    /// Directory holding one sub-directory of résumés per position (overrides HUNTFLOW_RESUME_ROOT)
    #[arg(long)]
    pub(crate) resume_root: Option<PathBuf>,
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let ImportArgs {
        database,
        token,
        resume_root,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, api = %config.huntflow.base_url, "configuration loaded");

    let transport = HttpTransport::new(&config.api(token))?;
    let account_id = resolve_account(&transport, config.huntflow.account_id)?;
    let client = UploadClient::new(transport, account_id)
        .with_declined_status(config.huntflow.declined_status_id);

    let resolver = LabelResolver::load(&client)?;
    info!(
        account = %account_id,
        vacancies = resolver.vacancies().len(),
        statuses = resolver.statuses().len(),
        "reference data loaded"
    );

    let records = RosterImporter::from_path(&database)?;
    info!(roster = %database.display(), candidates = records.len(), "roster imported");

    let resume_root = resume_root.unwrap_or_else(|| config.huntflow.resume_root.clone());
    let pipeline = CandidatePipeline::new(client, resolver, ResumeLocator::new(resume_root));
    let report = pipeline.run(&records)?;

    render_summary(&report);
    Ok(())
}

fn render_summary(report: &RunReport) {
    let elapsed = report.elapsed();
    info!(
        attached = report.attached(),
        failed = report.failed(),
        elapsed_ms = elapsed.num_milliseconds(),
        "upload finished"
    );

    println!(
        "{} of {} candidates attached ({} skipped) in {:.1}s",
        report.attached(),
        report.outcomes.len(),
        report.failed(),
        elapsed.num_milliseconds() as f64 / 1000.0
    );
    for outcome in report.outcomes.iter().filter(|outcome| !outcome.is_attached()) {
        let reason = outcome
            .error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        println!(
            "- {} ({}): stopped after {}: {}",
            outcome.full_name, outcome.position, outcome.reached, reason
        );
    }

    for outcome in report.created_but_unattached() {
        if let Some(applicant_id) = outcome.applicant_id {
            warn!(
                full_name = %outcome.full_name,
                applicant_id = %applicant_id,
                "applicant exists without a vacancy link; attach it by hand"
            );
        }
    }
}
