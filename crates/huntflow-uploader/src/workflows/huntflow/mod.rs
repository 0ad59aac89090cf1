//! Huntflow recruiting service: identifiers, payload schemas, the transport seam, and the
//! account-scoped upload client.

mod client;
mod domain;
mod transport;

pub use client::{endpoints, UploadClient, UploadError};
pub use domain::{
    Account, AccountId, ApplicantId, ApplicantPayload, BirthDate, Experience, ExternalResume,
    ExternalResumeData, FileId, FileReference, ParsedResume, PersonName, ResumeFields,
    StatusDefinition, StatusId, Vacancy, VacancyAttachment, VacancyId, DECLINED_STATUS_ID,
};
pub use transport::{
    HttpTransport, ServiceRequest, ServiceResponse, Transport, TransportError, SERVICE_OK,
};
