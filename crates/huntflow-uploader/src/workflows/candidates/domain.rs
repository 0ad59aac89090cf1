use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::labels::LabelError;
use super::locator::LocatorError;
use crate::workflows::huntflow::{ApplicantId, StatusId, UploadError, VacancyAttachment, VacancyId};
use crate::workflows::roster::RosterRecord;

/// Per-candidate lifecycle. Each transition is one component call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStage {
    Loaded,
    ResumeLocated,
    Enriched,
    ResumeUploaded,
    ApplicantCreated,
    Attached,
    Failed,
}

impl CandidateStage {
    pub const fn label(self) -> &'static str {
        match self {
            CandidateStage::Loaded => "loaded",
            CandidateStage::ResumeLocated => "resume_located",
            CandidateStage::Enriched => "enriched",
            CandidateStage::ResumeUploaded => "resume_uploaded",
            CandidateStage::ApplicantCreated => "applicant_created",
            CandidateStage::Attached => "attached",
            CandidateStage::Failed => "failed",
        }
    }
}

impl fmt::Display for CandidateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Roster row with everything needed for upload resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedCandidate {
    record: RosterRecord,
    resume_path: PathBuf,
    vacancy_id: VacancyId,
    status_id: StatusId,
}

impl EnrichedCandidate {
    /// Refuses candidates without a résumé path so nothing half-resolved reaches the upload.
    pub fn new(
        record: RosterRecord,
        resume_path: PathBuf,
        vacancy_id: VacancyId,
        status_id: StatusId,
    ) -> Result<Self, CandidateError> {
        if resume_path.as_os_str().is_empty() {
            return Err(CandidateError::Incomplete {
                missing: "résumé path",
            });
        }
        if record.full_name.trim().is_empty() {
            return Err(CandidateError::Incomplete {
                missing: "full name",
            });
        }

        Ok(Self {
            record,
            resume_path,
            vacancy_id,
            status_id,
        })
    }

    pub fn record(&self) -> &RosterRecord {
        &self.record
    }

    pub fn resume_path(&self) -> &Path {
        &self.resume_path
    }

    pub fn vacancy_id(&self) -> VacancyId {
        self.vacancy_id
    }

    pub fn status_id(&self) -> StatusId {
        self.status_id
    }
}

/// Why a single candidate was abandoned.
#[derive(Debug, thiserror::Error)]
pub enum CandidateError {
    #[error(transparent)]
    Label(#[from] LabelError),
    #[error(transparent)]
    ResumeNotFound(#[from] LocatorError),
    #[error("candidate is missing its {missing}")]
    Incomplete { missing: &'static str },
    #[error("{stage} failed: {source}")]
    Remote {
        /// Stage the remote call was trying to reach.
        stage: CandidateStage,
        #[source]
        source: UploadError,
    },
}

/// Final state of one roster record after a run.
#[derive(Debug)]
pub struct CandidateOutcome {
    pub full_name: String,
    pub position: String,
    /// `Attached` or `Failed`.
    pub stage: CandidateStage,
    /// Last stage completed before the outcome was decided.
    pub reached: CandidateStage,
    pub applicant_id: Option<ApplicantId>,
    pub attachment: Option<VacancyAttachment>,
    pub error: Option<CandidateError>,
}

impl CandidateOutcome {
    pub fn is_attached(&self) -> bool {
        self.stage == CandidateStage::Attached
    }
}

/// Summary of a complete run.
#[derive(Debug)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<CandidateOutcome>,
}

impl RunReport {
    pub fn attached(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_attached()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.attached()
    }

    pub fn elapsed(&self) -> Duration {
        self.finished_at - self.started_at
    }

    /// Candidates whose applicant exists remotely but never reached a vacancy.
    pub fn created_but_unattached(&self) -> impl Iterator<Item = &CandidateOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.applicant_id.is_some() && !outcome.is_attached())
    }
}
