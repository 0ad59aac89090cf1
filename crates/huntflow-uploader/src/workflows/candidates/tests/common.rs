use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tempfile::TempDir;

use crate::workflows::candidates::{CandidatePipeline, LabelResolver, ResumeLocator};
use crate::workflows::huntflow::{
    AccountId, ServiceRequest, ServiceResponse, StatusDefinition, StatusId, Transport,
    TransportError, UploadClient, Vacancy, VacancyId, DECLINED_STATUS_ID,
};
use crate::workflows::roster::RosterRecord;

pub(super) const ACCOUNT: AccountId = AccountId(7);
pub(super) const BACKEND_VACANCY: VacancyId = VacancyId(11);
pub(super) const FRONTEND_VACANCY: VacancyId = VacancyId(12);
pub(super) const OFFERED: StatusId = StatusId(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum Endpoint {
    Accounts,
    Vacancies,
    Statuses,
    Upload,
    CreateApplicant,
    Attach,
}

impl Endpoint {
    fn of(path: &str) -> Self {
        if path == "accounts" {
            Endpoint::Accounts
        } else if path.ends_with("/vacancy/statuses") {
            Endpoint::Statuses
        } else if path.ends_with("/vacancies") {
            Endpoint::Vacancies
        } else if path.ends_with("/upload") {
            Endpoint::Upload
        } else if path.ends_with("/applicants") {
            Endpoint::CreateApplicant
        } else if path.ends_with("/vacancy") {
            Endpoint::Attach
        } else {
            panic!("unexpected path {path}")
        }
    }
}

#[derive(Debug, Clone)]
pub(super) enum Reply {
    Json(Value),
    Status(u16, Value),
    Unreachable,
}

/// In-memory stand-in for the recruiting service. Scripted replies are consumed first;
/// afterwards every endpoint answers successfully.
#[derive(Default)]
pub(super) struct FakeHuntflow {
    scripted: RefCell<HashMap<Endpoint, VecDeque<Reply>>>,
    requests: RefCell<Vec<ServiceRequest>>,
    sequence: Cell<u64>,
}

impl FakeHuntflow {
    pub(super) fn script(&self, endpoint: Endpoint, reply: Reply) -> &Self {
        self.scripted
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(reply);
        self
    }

    pub(super) fn requests(&self) -> Vec<ServiceRequest> {
        self.requests.borrow().clone()
    }

    pub(super) fn calls(&self, endpoint: Endpoint) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| Endpoint::of(request.path()) == endpoint)
            .count()
    }

    pub(super) fn bodies(&self, endpoint: Endpoint) -> Vec<Value> {
        self.requests
            .borrow()
            .iter()
            .filter(|request| Endpoint::of(request.path()) == endpoint)
            .filter_map(|request| match request {
                ServiceRequest::PostJson { body, .. } => Some(body.clone()),
                _ => None,
            })
            .collect()
    }

    fn next_id(&self) -> u64 {
        let id = self.sequence.get() + 1;
        self.sequence.set(id);
        id
    }

    fn default_reply(&self, endpoint: Endpoint) -> Reply {
        match endpoint {
            Endpoint::Accounts => Reply::Json(json!({ "items": [{ "id": ACCOUNT.0, "name": "Sandbox" }] })),
            Endpoint::Vacancies => Reply::Json(json!({ "items": vacancies() })),
            Endpoint::Statuses => Reply::Json(json!({ "items": statuses() })),
            Endpoint::Upload => Reply::Json(json!({
                "id": 500 + self.next_id(),
                "text": "Experienced engineer",
                "fields": {
                    "name": { "first": "Иван", "last": "Петров", "middle": null },
                    "phones": ["+79000000000"],
                    "email": "ivan@example.com",
                    "birthdate": null
                }
            })),
            Endpoint::CreateApplicant => Reply::Json(json!({ "id": 1000 + self.next_id() })),
            Endpoint::Attach => Reply::Json(json!({ "id": self.next_id() })),
        }
    }
}

impl Transport for FakeHuntflow {
    fn send(&self, request: ServiceRequest) -> Result<ServiceResponse, TransportError> {
        let endpoint = Endpoint::of(request.path());
        let path = request.path().to_string();
        self.requests.borrow_mut().push(request);

        let scripted = self
            .scripted
            .borrow_mut()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front);
        let reply = scripted.unwrap_or_else(|| self.default_reply(endpoint));

        match reply {
            Reply::Json(body) => Ok(ServiceResponse { status: 200, body }),
            Reply::Status(status, body) => Ok(ServiceResponse { status, body }),
            Reply::Unreachable => Err(TransportError::Request {
                url: format!("https://huntflow.test/{path}"),
                message: "connection refused".to_string(),
            }),
        }
    }
}

fn vacancies() -> Value {
    json!([
        { "id": BACKEND_VACANCY.0, "position": "Backend Engineer" },
        { "id": FRONTEND_VACANCY.0, "position": "Frontend Developer" }
    ])
}

fn statuses() -> Value {
    json!([
        { "id": 1, "name": "HR Interview" },
        { "id": OFFERED.0, "name": "Offered" },
        { "id": 3, "name": "Submitted" },
        { "id": DECLINED_STATUS_ID.0, "name": "Declined" }
    ])
}

pub(super) fn resolver() -> LabelResolver {
    let vacancies: Vec<Vacancy> = serde_json::from_value(vacancies()).expect("vacancies decode");
    let statuses: Vec<StatusDefinition> =
        serde_json::from_value(statuses()).expect("statuses decode");
    LabelResolver::new(vacancies, statuses)
}

/// Résumé tree with one file per position.
pub(super) fn resume_root() -> TempDir {
    let root = tempfile::tempdir().expect("temp dir");
    for (position, file) in [
        ("Backend Engineer", "Иван_Петров_CV.pdf"),
        ("Frontend Developer", "Анна Смирнова.docx"),
    ] {
        let dir = root.path().join(position);
        fs::create_dir_all(&dir).expect("position dir");
        fs::write(dir.join(file), b"resume").expect("resume fixture");
    }
    root
}

pub(super) fn pipeline<'a>(
    service: &'a FakeHuntflow,
    root: &Path,
) -> CandidatePipeline<&'a FakeHuntflow> {
    CandidatePipeline::new(
        UploadClient::new(service, ACCOUNT),
        resolver(),
        ResumeLocator::new(root),
    )
}

pub(super) fn record(
    position: &str,
    full_name: &str,
    comment: Option<&str>,
    status_label: &str,
) -> RosterRecord {
    RosterRecord {
        position: position.to_string(),
        full_name: full_name.to_string(),
        salary: Some(150000.0),
        comment: comment.map(str::to_string),
        status_label: status_label.to_string(),
    }
}
