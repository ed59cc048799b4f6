//! Services that break the contract must be reported, and must not be left
//! holding harness accounts.
//!
//! # Design
//! Broken services are either a scripted in-memory transport or the real
//! mock behind a `Tampered` transport that fakes or rewrites chosen calls.

mod common;

use std::cell::RefCell;

use bookstore_core::{ApiError, BookStore, Credentials, HttpMethod, HttpRequest, HttpResponse, Transport};
use bookstore_harness::{
    run_collection_suite, run_registration_suite, HarnessConfig, SuiteReport, Verdict,
};
use common::{reply, Mock, Tampered};

/// Assert that exactly `failed` scenarios failed and everything else passed.
fn assert_failed_only(report: &SuiteReport, failed: &[&str]) {
    for outcome in &report.outcomes {
        let expected_failure = failed.contains(&outcome.scenario);
        assert_eq!(
            !outcome.passed(),
            expected_failure,
            "{} has verdict {:?}\n{report}",
            outcome.scenario,
            outcome.verdict
        );
    }
    for name in failed {
        assert!(report.outcome(name).is_some(), "no scenario named {name}");
    }
}

/// Accepts every registration and keeps track of what it created and what
/// was deleted again.
#[derive(Default)]
struct AcceptsEverything {
    created: RefCell<Vec<String>>,
    deleted: RefCell<Vec<String>>,
}

impl Transport for &AcceptsEverything {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = request
            .path
            .strip_prefix("http://accepting")
            .unwrap_or(&request.path)
            .to_string();
        let response = match (request.method, path.as_str()) {
            (HttpMethod::Post, "/Account/v1/User") => {
                let creds: Credentials =
                    serde_json::from_str(request.body.as_deref().unwrap_or_default()).unwrap();
                let mut created = self.created.borrow_mut();
                let id = format!("id-{}", created.len());
                created.push(id.clone());
                let body = serde_json::json!({
                    "userID": id,
                    "username": creds.user_name,
                    "books": [],
                });
                reply(201, &body.to_string())
            }
            (HttpMethod::Post, "/Account/v1/GenerateToken") => reply(
                200,
                r#"{"token":"tok","expires":null,"status":"Success","result":"ok"}"#,
            ),
            (HttpMethod::Delete, p) if p.starts_with("/Account/v1/User/") => {
                let id = p.trim_start_matches("/Account/v1/User/").to_string();
                self.deleted.borrow_mut().push(id);
                reply(204, "")
            }
            _ => reply(400, r#"{"code":"1200","message":"unexpected call"}"#),
        };
        Ok(response)
    }
}

#[test]
fn permissive_registration_is_reported_and_every_account_deleted() {
    let service = AcceptsEverything::default();
    let store = BookStore::with_transport("http://accepting", &service);
    let logs = tempfile::tempdir().unwrap();
    let config = HarnessConfig {
        log_dir: logs.path().to_path_buf(),
        ..HarnessConfig::with_base_url("http://accepting")
    };

    let report = run_registration_suite(&store, &config).unwrap();

    assert_failed_only(
        &report,
        &[
            "create_new_valid_user",
            "user_exists",
            "password_no_digits",
            "password_too_short",
            "password_no_uppercase",
            "password_no_lowercase",
            "password_no_special_char",
            "password_empty",
            "only_cyrillic_password",
            "empty_username_empty_password",
            "empty_username",
        ],
    );
    let repeat = report.outcome("create_new_valid_user").unwrap();
    assert_eq!(repeat.context("repeat_status"), Some("201"));
    assert_eq!(repeat.context("repeat_teardown"), Some("deleted"));

    let mut created = service.created.borrow().clone();
    let mut deleted = service.deleted.borrow().clone();
    created.sort();
    deleted.sort();
    assert_eq!(created.len(), 18);
    assert_eq!(created, deleted);
}

#[test]
fn accepted_weak_password_is_reported() {
    let mock = Mock::start();
    let logs = tempfile::tempdir().unwrap();
    // The mock stores a compliant password instead, so it answers 201 and
    // the account can still be logged into and deleted.
    let transport = Tampered::new(|request: &mut HttpRequest| {
        if let Some(body) = request.body.as_mut() {
            *body = body.replace(r#""password":"Password!""#, r#""password":"Password1!""#);
        }
        None
    });
    let store = BookStore::with_transport(&mock.base_url, transport);

    let report = run_registration_suite(&store, &mock.config(logs.path())).unwrap();

    assert_failed_only(&report, &["password_no_digits"]);
    let outcome = report.outcome("password_no_digits").unwrap();
    assert!(
        matches!(&outcome.verdict, Verdict::Failed(reason) if reason.contains("201")),
        "{:?}",
        outcome.verdict
    );
    assert_eq!(outcome.context("teardown"), Some("deleted"));
    assert_eq!(mock.accounts(), 1);
}

#[test]
fn accepted_unknown_isbn_is_reported() {
    let mock = Mock::start();
    let logs = tempfile::tempdir().unwrap();
    let transport = Tampered::new(|request: &mut HttpRequest| {
        let adds_unknown = request.method == HttpMethod::Post
            && request.path.ends_with("/BookStore/v1/Books")
            && request
                .body
                .as_deref()
                .is_some_and(|b| b.contains(r#"{"isbn":"1"}"#));
        adds_unknown.then(|| reply(201, r#"{"books":[{"isbn":"1"}]}"#))
    });
    let store = BookStore::with_transport(&mock.base_url, transport);

    let report = run_collection_suite(&store, &mock.config(logs.path())).unwrap();

    assert_failed_only(&report, &["add_unknown_book"]);
    assert_eq!(
        report.outcome("add_unknown_book").unwrap().context("isbn"),
        Some("1")
    );
    assert_eq!(mock.accounts(), 1);
}

#[test]
fn removal_that_keeps_the_book_is_reported() {
    let mock = Mock::start();
    let logs = tempfile::tempdir().unwrap();
    let transport = Tampered::new(|request: &mut HttpRequest| {
        let removes = request.method == HttpMethod::Delete
            && request.path.ends_with("/BookStore/v1/Book");
        removes.then(|| reply(204, ""))
    });
    let store = BookStore::with_transport(&mock.base_url, transport);

    let report = run_collection_suite(&store, &mock.config(logs.path())).unwrap();

    assert_failed_only(&report, &["remove_book", "remove_absent_book"]);
    let outcome = report.outcome("remove_book").unwrap();
    assert!(
        matches!(&outcome.verdict, Verdict::Failed(reason) if reason.contains("after removal")),
        "{:?}",
        outcome.verdict
    );
    assert_eq!(mock.accounts(), 1);
}
