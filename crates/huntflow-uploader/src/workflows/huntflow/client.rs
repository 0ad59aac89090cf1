use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::domain::{
    Account, AccountId, ApplicantId, ApplicantPayload, FileId, ParsedResume, StatusDefinition,
    StatusId, Vacancy, VacancyAttachment, VacancyId, DECLINED_STATUS_ID,
};
use super::transport::{ServiceRequest, ServiceResponse, Transport, TransportError};

/// Relative endpoint paths.
pub mod endpoints {
    use super::{AccountId, ApplicantId};

    pub fn accounts() -> String {
        "accounts".to_string()
    }

    pub fn vacancies(account: AccountId) -> String {
        format!("account/{account}/vacancies")
    }

    pub fn statuses(account: AccountId) -> String {
        format!("account/{account}/vacancy/statuses")
    }

    pub fn upload(account: AccountId) -> String {
        format!("account/{account}/upload")
    }

    pub fn applicants(account: AccountId) -> String {
        format!("account/{account}/applicants")
    }

    pub fn applicant_vacancy(account: AccountId, applicant: ApplicantId) -> String {
        format!("account/{account}/applicants/{applicant}/vacancy")
    }
}

/// Failure of a single remote operation.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no response from {endpoint}: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: TransportError,
    },
    #[error("{endpoint} answered with status {status}: {body}")]
    Rejected {
        endpoint: String,
        status: u16,
        body: Value,
    },
    #[error("malformed payload for {endpoint}: {source}")]
    Payload {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unable to read résumé {}: {source}", path.display())]
    ReadResume {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UploadError {
    /// True when the service never answered, as opposed to answering with an error.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, UploadError::Connection { .. })
    }
}

#[derive(Deserialize)]
struct Items<T> {
    items: Vec<T>,
}

#[derive(Deserialize)]
struct Created {
    id: ApplicantId,
}

/// Account-scoped wrapper over the remote calls an import needs.
pub struct UploadClient<T> {
    transport: T,
    account_id: AccountId,
    declined_status: StatusId,
}

impl<T: Transport> UploadClient<T> {
    pub fn new(transport: T, account_id: AccountId) -> Self {
        Self {
            transport,
            account_id,
            declined_status: DECLINED_STATUS_ID,
        }
    }

    pub fn with_declined_status(mut self, status: StatusId) -> Self {
        self.declined_status = status;
        self
    }

    /// Accounts visible to the token; needed before a client can be scoped.
    pub fn list_accounts(transport: &T) -> Result<Vec<Account>, UploadError> {
        let request = ServiceRequest::Get {
            path: endpoints::accounts(),
        };
        let endpoint = request.path().to_string();
        let response = call(transport, request)?;
        decode::<Items<Account>>(&endpoint, response.body).map(|page| page.items)
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn declined_status(&self) -> StatusId {
        self.declined_status
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_vacancies(&self) -> Result<Vec<Vacancy>, UploadError> {
        self.get_items(endpoints::vacancies(self.account_id))
    }

    pub fn list_statuses(&self) -> Result<Vec<StatusDefinition>, UploadError> {
        self.get_items(endpoints::statuses(self.account_id))
    }

    /// Upload a résumé for server-side parsing and return the extracted fields.
    pub fn upload_resume(&self, path: &Path) -> Result<ParsedResume, UploadError> {
        // The handle is closed by the time `read` returns, before any network traffic.
        let bytes = std::fs::read(path).map_err(|source| UploadError::ReadResume {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        let request = ServiceRequest::PostFile {
            path: endpoints::upload(self.account_id),
            file_name,
            content_type,
            bytes,
            parse: true,
        };
        let endpoint = request.path().to_string();
        let response = call(&self.transport, request)?;
        decode(&endpoint, response.body)
    }

    pub fn create_applicant(&self, payload: &ApplicantPayload) -> Result<ApplicantId, UploadError> {
        let path = endpoints::applicants(self.account_id);
        let body = encode(&path, payload)?;
        let response = call(
            &self.transport,
            ServiceRequest::PostJson {
                path: path.clone(),
                body,
            },
        )?;
        decode::<Created>(&path, response.body).map(|created| created.id)
    }

    /// Put the applicant on the vacancy pipeline at `status`, returning the payload sent.
    pub fn attach_to_vacancy(
        &self,
        applicant: ApplicantId,
        vacancy: VacancyId,
        status: StatusId,
        comment: Option<String>,
        resume: FileId,
    ) -> Result<VacancyAttachment, UploadError> {
        let attachment =
            VacancyAttachment::new(vacancy, status, comment, resume, self.declined_status);
        let path = endpoints::applicant_vacancy(self.account_id, applicant);
        let body = encode(&path, &attachment)?;
        call(&self.transport, ServiceRequest::PostJson { path, body })?;
        Ok(attachment)
    }

    fn get_items<D: DeserializeOwned>(&self, path: String) -> Result<Vec<D>, UploadError> {
        let response = call(&self.transport, ServiceRequest::Get { path: path.clone() })?;
        decode::<Items<D>>(&path, response.body).map(|page| page.items)
    }
}

fn call<T: Transport>(
    transport: &T,
    request: ServiceRequest,
) -> Result<ServiceResponse, UploadError> {
    let endpoint = request.path().to_string();
    let response = transport
        .send(request)
        .map_err(|source| UploadError::Connection {
            endpoint: endpoint.clone(),
            source,
        })?;

    if !response.is_ok() {
        return Err(UploadError::Rejected {
            endpoint,
            status: response.status,
            body: response.body,
        });
    }

    Ok(response)
}

fn decode<D: DeserializeOwned>(endpoint: &str, body: Value) -> Result<D, UploadError> {
    serde_json::from_value(body).map_err(|source| UploadError::Payload {
        endpoint: endpoint.to_string(),
        source,
    })
}

fn encode<S: serde::Serialize>(endpoint: &str, payload: &S) -> Result<Value, UploadError> {
    serde_json::to_value(payload).map_err(|source| UploadError::Payload {
        endpoint: endpoint.to_string(),
        source,
    })
}
