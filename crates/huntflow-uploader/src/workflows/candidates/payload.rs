use crate::workflows::huntflow::{
    ApplicantPayload, ExternalResume, ExternalResumeData, FileReference, ParsedResume,
};
use crate::workflows::roster::RosterRecord;

const NATIVE_AUTH_TYPE: &str = "NATIVE";

/// Applicant document built from what the parser extracted plus the roster row.
///
/// Position and salary come from the roster; everything personal comes from the parse
/// result. Absent parse fields (name parts, phone, e-mail, employer, birth date, photo,
/// extracted text) become `null` rather than failing the candidate.
pub fn assemble_applicant(parsed: &ParsedResume, record: &RosterRecord) -> ApplicantPayload {
    let owned = |value: Option<&str>| value.map(str::to_string);

    ApplicantPayload {
        last_name: owned(parsed.last_name()),
        first_name: owned(parsed.first_name()),
        middle_name: owned(parsed.middle_name()),
        phone: owned(parsed.phone()),
        email: owned(parsed.email()),
        position: record.position.clone(),
        company: owned(parsed.company()),
        money: record.money(),
        birthday_day: parsed.birth_day(),
        birthday_month: parsed.birth_month(),
        birthday_year: parsed.birth_year(),
        photo: parsed.photo_id(),
        externals: vec![ExternalResume {
            data: ExternalResumeData {
                body: owned(parsed.text()),
            },
            auth_type: NATIVE_AUTH_TYPE.to_string(),
            files: vec![FileReference {
                id: parsed.file_id(),
            }],
            account_source: None,
        }],
    }
}
