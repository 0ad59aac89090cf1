//! Candidate matching and the upload-and-link pipeline.

pub mod domain;
pub mod labels;
pub mod locator;
mod normalizer;
pub mod payload;
pub mod pipeline;

#[cfg(test)]
mod tests;

pub use domain::{CandidateError, CandidateOutcome, CandidateStage, EnrichedCandidate, RunReport};
pub use labels::{canonical_status, LabelError, LabelResolver};
pub use locator::{LocatorError, ResumeLocator};
pub use payload::assemble_applicant;
pub use pipeline::{resolve_account, CandidatePipeline, DictionaryError, PipelineError};
