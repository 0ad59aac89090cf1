use serde_json::json;

use super::common::*;
use crate::workflows::candidates::{resolve_account, DictionaryError, LabelResolver};
use crate::workflows::huntflow::{AccountId, UploadClient, UploadError, VacancyId};

#[test]
fn configured_account_skips_the_lookup() {
    let service = FakeHuntflow::default();
    let account = resolve_account(&service, Some(AccountId(99))).expect("configured account");
    assert_eq!(account, AccountId(99));
    assert!(service.requests().is_empty());
}

#[test]
fn first_listed_account_is_used_by_default() {
    let service = FakeHuntflow::default();
    service.script(
        Endpoint::Accounts,
        Reply::Json(json!({ "items": [
            { "id": 3, "name": "Primary" },
            { "id": 4, "name": "Secondary" }
        ] })),
    );

    let account = resolve_account(&service, None).expect("account resolved");
    assert_eq!(account, AccountId(3));
    assert_eq!(service.calls(Endpoint::Accounts), 1);
}

#[test]
fn token_without_accounts_is_an_error() {
    let service = FakeHuntflow::default();
    service.script(Endpoint::Accounts, Reply::Json(json!({ "items": [] })));

    assert!(matches!(
        resolve_account(&service, None),
        Err(DictionaryError::NoAccounts)
    ));
}

#[test]
fn dictionaries_load_from_the_account() {
    let service = FakeHuntflow::default();
    let client = UploadClient::new(&service, ACCOUNT);

    let resolver = LabelResolver::load(&client).expect("dictionaries load");
    assert_eq!(resolver.vacancies().len(), 2);
    assert_eq!(resolver.statuses().len(), 4);
    assert_eq!(
        resolver.vacancy_id("Backend Engineer").expect("vacancy known"),
        VacancyId(11)
    );
    assert_eq!(service.calls(Endpoint::Vacancies), 1);
    assert_eq!(service.calls(Endpoint::Statuses), 1);
}

#[test]
fn unreachable_vacancy_listing_fails_the_load() {
    let service = FakeHuntflow::default();
    service.script(Endpoint::Vacancies, Reply::Unreachable);
    let client = UploadClient::new(&service, ACCOUNT);

    match LabelResolver::load(&client) {
        Err(DictionaryError::Vacancies(source)) => assert!(source.is_connection_failure()),
        other => panic!("expected vacancy failure, got {:?}", other.err()),
    }
}

#[test]
fn rejected_status_listing_fails_the_load() {
    let service = FakeHuntflow::default();
    service.script(Endpoint::Statuses, Reply::Status(403, json!({ "errors": [] })));
    let client = UploadClient::new(&service, ACCOUNT);

    assert!(matches!(
        LabelResolver::load(&client),
        Err(DictionaryError::Statuses(UploadError::Rejected { status: 403, .. }))
    ));
}
