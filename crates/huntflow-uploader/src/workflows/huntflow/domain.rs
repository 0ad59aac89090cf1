use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! service_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

service_id!(
    /// Organisation account that owns vacancies and applicants.
    AccountId
);
service_id!(
    /// Job requisition identifier.
    VacancyId
);
service_id!(
    /// Hiring pipeline stage identifier.
    StatusId
);
service_id!(
    /// Applicant created by this importer.
    ApplicantId
);
service_id!(
    /// Uploaded file (résumé or extracted photo).
    FileId
);

/// Status the service reserves for declined candidates. Attachments at this status carry the
/// roster comment as `rejection_reason`; any other status sends `null`. Accounts that number
/// their stages differently override it through `HUNTFLOW_DECLINED_STATUS_ID`.
pub const DECLINED_STATUS_ID: StatusId = StatusId(41);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub id: AccountId,
    #[serde(default)]
    pub name: Option<String>,
}

/// Job requisition as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Vacancy {
    pub id: VacancyId,
    pub position: String,
}

/// Named pipeline stage as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusDefinition {
    pub id: StatusId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    pub id: FileId,
}

/// Document returned by a parse-upload. Only `id` is guaranteed; everything else depends on
/// how much the parser could extract, so reads go through the accessors below, which return
/// `None` for any absent or `null` field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParsedResume {
    pub id: FileId,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub photo: Option<FileReference>,
    #[serde(default)]
    pub fields: Option<ResumeFields>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResumeFields {
    #[serde(default)]
    pub name: Option<PersonName>,
    #[serde(default)]
    pub birthdate: Option<BirthDate>,
    #[serde(default)]
    pub phones: Option<Vec<String>>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub experience: Option<Vec<Experience>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PersonName {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub middle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BirthDate {
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub year: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl ParsedResume {
    fn fields(&self) -> Option<&ResumeFields> {
        self.fields.as_ref()
    }

    fn name(&self) -> Option<&PersonName> {
        self.fields().and_then(|fields| fields.name.as_ref())
    }

    fn birthdate(&self) -> Option<&BirthDate> {
        self.fields().and_then(|fields| fields.birthdate.as_ref())
    }

    pub fn file_id(&self) -> FileId {
        self.id
    }

    pub fn first_name(&self) -> Option<&str> {
        self.name().and_then(|name| name.first.as_deref())
    }

    pub fn last_name(&self) -> Option<&str> {
        self.name().and_then(|name| name.last.as_deref())
    }

    pub fn middle_name(&self) -> Option<&str> {
        self.name().and_then(|name| name.middle.as_deref())
    }

    /// First phone number the parser found.
    pub fn phone(&self) -> Option<&str> {
        self.fields()
            .and_then(|fields| fields.phones.as_ref())
            .and_then(|phones| phones.first())
            .map(String::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.fields().and_then(|fields| fields.email.as_deref())
    }

    /// Employer from the most recent (first listed) experience entry.
    pub fn company(&self) -> Option<&str> {
        self.fields()
            .and_then(|fields| fields.experience.as_ref())
            .and_then(|experience| experience.first())
            .and_then(|entry| entry.company.as_deref())
    }

    pub fn birth_day(&self) -> Option<u32> {
        self.birthdate().and_then(|date| date.day)
    }

    pub fn birth_month(&self) -> Option<u32> {
        self.birthdate().and_then(|date| date.month)
    }

    pub fn birth_year(&self) -> Option<u32> {
        self.birthdate().and_then(|date| date.year)
    }

    pub fn photo_id(&self) -> Option<FileId> {
        self.photo.map(|photo| photo.id)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Applicant creation document. Every `Option` serialises as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantPayload {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub position: String,
    pub company: Option<String>,
    pub money: Option<String>,
    pub birthday_day: Option<u32>,
    pub birthday_month: Option<u32>,
    pub birthday_year: Option<u32>,
    pub photo: Option<FileId>,
    pub externals: Vec<ExternalResume>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalResume {
    pub data: ExternalResumeData,
    pub auth_type: String,
    pub files: Vec<FileReference>,
    pub account_source: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalResumeData {
    pub body: Option<String>,
}

/// Link between an applicant and a vacancy pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacancyAttachment {
    pub vacancy: VacancyId,
    pub status: StatusId,
    pub comment: Option<String>,
    pub files: Vec<FileReference>,
    pub rejection_reason: Option<String>,
}

impl VacancyAttachment {
    pub fn new(
        vacancy: VacancyId,
        status: StatusId,
        comment: Option<String>,
        resume: FileId,
        declined_status: StatusId,
    ) -> Self {
        let rejection_reason = if status == declined_status {
            comment.clone()
        } else {
            None
        };

        Self {
            vacancy,
            status,
            comment,
            files: vec![FileReference { id: resume }],
            rejection_reason,
        }
    }
}
