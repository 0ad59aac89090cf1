use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::warn;

use super::normalizer::normalize_text;
use crate::workflows::huntflow::{
    StatusDefinition, StatusId, Transport, UploadClient, Vacancy, VacancyId,
};

use super::pipeline::DictionaryError;

static STATUS_TRANSLATIONS: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

/// Roster status wording mapped to the stage names the service uses.
const STATUS_LABELS: &[(&str, &str)] = &[
    ("Интервью с HR", "HR Interview"),
    ("Выставлен оффер", "Offered"),
    ("Отправлено письмо", "Submitted"),
    ("Отказ", "Declined"),
];

fn status_translations() -> &'static HashMap<String, &'static str> {
    STATUS_TRANSLATIONS.get_or_init(|| {
        let mut map = HashMap::with_capacity(STATUS_LABELS.len());
        for (label, canonical) in STATUS_LABELS {
            map.insert(normalize_text(label), *canonical);
        }
        map
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("status label '{0}' has no translation")]
    UnknownStatusLabel(String),
    #[error("status '{0}' is not defined for this account")]
    StatusNotFound(String),
    #[error("no vacancy named '{0}'")]
    VacancyNotFound(String),
}

/// Translate a roster status label into the service's stage name.
pub fn canonical_status(label: &str) -> Result<&'static str, LabelError> {
    status_translations()
        .get(&normalize_text(label))
        .copied()
        .ok_or_else(|| LabelError::UnknownStatusLabel(label.to_string()))
}

/// Resolves roster text to service identifiers against the reference lists fetched for the run.
#[derive(Debug, Clone, Default)]
pub struct LabelResolver {
    vacancies: Vec<Vacancy>,
    statuses: Vec<StatusDefinition>,
}

impl LabelResolver {
    pub fn new(vacancies: Vec<Vacancy>, statuses: Vec<StatusDefinition>) -> Self {
        Self {
            vacancies,
            statuses,
        }
    }

    /// Fetch vacancies and statuses once; either list failing stops the run.
    pub fn load<T: Transport>(client: &UploadClient<T>) -> Result<Self, DictionaryError> {
        let vacancies = client
            .list_vacancies()
            .map_err(DictionaryError::Vacancies)?;
        let statuses = client.list_statuses().map_err(DictionaryError::Statuses)?;
        Ok(Self::new(vacancies, statuses))
    }

    pub fn vacancies(&self) -> &[Vacancy] {
        &self.vacancies
    }

    pub fn statuses(&self) -> &[StatusDefinition] {
        &self.statuses
    }

    /// Exact name match; duplicates resolve to the first listed and are logged.
    pub fn status_id(&self, canonical: &str) -> Result<StatusId, LabelError> {
        let mut matches = self.statuses.iter().filter(|status| status.name == canonical);
        let first = matches
            .next()
            .ok_or_else(|| LabelError::StatusNotFound(canonical.to_string()))?;
        let duplicates = matches.count();
        if duplicates > 0 {
            warn!(
                status = canonical,
                chosen = %first.id,
                duplicates,
                "several statuses share this name, using the first listed"
            );
        }
        Ok(first.id)
    }

    /// Exact position match; duplicates resolve to the first listed and are logged.
    pub fn vacancy_id(&self, position: &str) -> Result<VacancyId, LabelError> {
        let mut matches = self
            .vacancies
            .iter()
            .filter(|vacancy| vacancy.position == position);
        let first = matches
            .next()
            .ok_or_else(|| LabelError::VacancyNotFound(position.to_string()))?;
        let duplicates = matches.count();
        if duplicates > 0 {
            warn!(
                position,
                chosen = %first.id,
                duplicates,
                "several vacancies share this position, using the first listed"
            );
        }
        Ok(first.id)
    }
}
