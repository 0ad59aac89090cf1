use chrono::Utc;
use tracing::{debug, error, info, info_span, warn};

use super::domain::{CandidateError, CandidateOutcome, CandidateStage, EnrichedCandidate, RunReport};
use super::labels::{canonical_status, LabelResolver};
use super::locator::ResumeLocator;
use super::payload::assemble_applicant;
use crate::workflows::huntflow::{
    AccountId, ApplicantId, Transport, UploadClient, UploadError, VacancyAttachment,
};
use crate::workflows::roster::RosterRecord;

/// Reference data could not be loaded, so no candidate can be resolved.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("unable to list accounts: {0}")]
    Accounts(#[source] UploadError),
    #[error("the token has access to no accounts")]
    NoAccounts,
    #[error("unable to load vacancies: {0}")]
    Vacancies(#[source] UploadError),
    #[error("unable to load vacancy statuses: {0}")]
    Statuses(#[source] UploadError),
}

/// Failure that ends the whole run. Candidates handled earlier keep whatever was created.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(
        "run aborted while '{full_name}' was past {stage} ({attached} candidates attached before): {source}"
    )]
    Aborted {
        full_name: String,
        stage: CandidateStage,
        applicant_id: Option<ApplicantId>,
        attached: usize,
        #[source]
        source: UploadError,
    },
}

/// Use the configured account, or the first one the token can see.
pub fn resolve_account<T: Transport>(
    transport: &T,
    configured: Option<AccountId>,
) -> Result<AccountId, DictionaryError> {
    if let Some(account) = configured {
        return Ok(account);
    }

    let accounts = UploadClient::list_accounts(transport).map_err(DictionaryError::Accounts)?;
    let account = accounts.first().ok_or(DictionaryError::NoAccounts)?;
    if accounts.len() > 1 {
        warn!(
            account = %account.id,
            available = accounts.len(),
            "token sees several accounts, using the first listed"
        );
    }
    Ok(account.id)
}

#[derive(Debug, Default)]
struct Progress {
    reached: Option<CandidateStage>,
    applicant_id: Option<ApplicantId>,
}

impl Progress {
    fn reach(&mut self, stage: CandidateStage) {
        debug!(stage = %stage, "stage reached");
        self.reached = Some(stage);
    }

    fn reached(&self) -> CandidateStage {
        self.reached.unwrap_or(CandidateStage::Loaded)
    }
}

/// Drives each roster record through locate → resolve → upload → create → attach, one
/// candidate at a time.
pub struct CandidatePipeline<T> {
    client: UploadClient<T>,
    resolver: LabelResolver,
    locator: ResumeLocator,
}

impl<T: Transport> CandidatePipeline<T> {
    pub fn new(client: UploadClient<T>, resolver: LabelResolver, locator: ResumeLocator) -> Self {
        Self {
            client,
            resolver,
            locator,
        }
    }

    pub fn client(&self) -> &UploadClient<T> {
        &self.client
    }

    /// Process the whole roster in order. Per-candidate failures are recorded in the report;
    /// a connection failure while creating or attaching an applicant stops the run.
    pub fn run(&self, records: &[RosterRecord]) -> Result<RunReport, PipelineError> {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(records.len());

        info!(candidates = records.len(), "starting candidate upload");
        for record in records {
            let outcome = self.process(record).map_err(|err| match err {
                PipelineError::Aborted {
                    full_name,
                    stage,
                    applicant_id,
                    source,
                    ..
                } => PipelineError::Aborted {
                    full_name,
                    stage,
                    applicant_id,
                    attached: outcomes
                        .iter()
                        .filter(|outcome: &&CandidateOutcome| outcome.is_attached())
                        .count(),
                    source,
                },
            })?;
            outcomes.push(outcome);
        }

        Ok(RunReport {
            started_at,
            finished_at: Utc::now(),
            outcomes,
        })
    }

    /// Process one record. `Ok` carries either an attached or an abandoned candidate.
    pub fn process(&self, record: &RosterRecord) -> Result<CandidateOutcome, PipelineError> {
        let span = info_span!("candidate", full_name = %record.full_name, position = %record.position);
        let _entered = span.enter();

        let mut progress = Progress::default();
        progress.reach(CandidateStage::Loaded);

        match self.advance(record, &mut progress) {
            Ok(attachment) => {
                info!(
                    applicant_id = ?progress.applicant_id,
                    vacancy_id = %attachment.vacancy,
                    status_id = %attachment.status,
                    "candidate attached to vacancy"
                );
                Ok(CandidateOutcome {
                    full_name: record.full_name.clone(),
                    position: record.position.clone(),
                    stage: CandidateStage::Attached,
                    reached: CandidateStage::Attached,
                    applicant_id: progress.applicant_id,
                    attachment: Some(attachment),
                    error: None,
                })
            }
            Err(CandidateError::Remote { stage, source })
                if source.is_connection_failure() && is_run_fatal(stage) =>
            {
                error!(
                    full_name = %record.full_name,
                    stage = %progress.reached(),
                    applicant_id = ?progress.applicant_id,
                    error = %source,
                    "service unreachable, aborting run"
                );
                Err(PipelineError::Aborted {
                    full_name: record.full_name.clone(),
                    stage: progress.reached(),
                    applicant_id: progress.applicant_id,
                    attached: 0,
                    source,
                })
            }
            Err(err) => {
                if progress.applicant_id.is_some() {
                    error!(
                        full_name = %record.full_name,
                        stage = %progress.reached(),
                        applicant_id = ?progress.applicant_id,
                        error = %err,
                        "applicant created but not attached; reconcile manually"
                    );
                } else {
                    warn!(
                        full_name = %record.full_name,
                        stage = %progress.reached(),
                        error = %err,
                        "candidate abandoned"
                    );
                }
                Ok(CandidateOutcome {
                    full_name: record.full_name.clone(),
                    position: record.position.clone(),
                    stage: CandidateStage::Failed,
                    reached: progress.reached(),
                    applicant_id: progress.applicant_id,
                    attachment: None,
                    error: Some(err),
                })
            }
        }
    }

    fn advance(
        &self,
        record: &RosterRecord,
        progress: &mut Progress,
    ) -> Result<VacancyAttachment, CandidateError> {
        let resume_path = self.locator.locate(&record.position, &record.full_name)?;
        debug!(resume = %resume_path.display(), "résumé located");
        progress.reach(CandidateStage::ResumeLocated);

        let canonical = canonical_status(&record.status_label)?;
        let status_id = self.resolver.status_id(canonical)?;
        let vacancy_id = self.resolver.vacancy_id(&record.position)?;
        let candidate = EnrichedCandidate::new(record.clone(), resume_path, vacancy_id, status_id)?;
        progress.reach(CandidateStage::Enriched);

        let parsed = self
            .client
            .upload_resume(candidate.resume_path())
            .map_err(|source| CandidateError::Remote {
                stage: CandidateStage::ResumeUploaded,
                source,
            })?;
        progress.reach(CandidateStage::ResumeUploaded);

        let payload = assemble_applicant(&parsed, candidate.record());
        let applicant_id = self
            .client
            .create_applicant(&payload)
            .map_err(|source| CandidateError::Remote {
                stage: CandidateStage::ApplicantCreated,
                source,
            })?;
        progress.applicant_id = Some(applicant_id);
        progress.reach(CandidateStage::ApplicantCreated);

        let attachment = self
            .client
            .attach_to_vacancy(
                applicant_id,
                candidate.vacancy_id(),
                candidate.status_id(),
                candidate.record().comment.clone(),
                parsed.file_id(),
            )
            .map_err(|source| CandidateError::Remote {
                stage: CandidateStage::Attached,
                source,
            })?;
        progress.reach(CandidateStage::Attached);

        Ok(attachment)
    }
}

/// Losing the connection after the résumé upload leaves no way to finish the candidate.
fn is_run_fatal(stage: CandidateStage) -> bool {
    matches!(
        stage,
        CandidateStage::ApplicantCreated | CandidateStage::Attached
    )
}
