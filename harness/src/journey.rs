//! End-to-end journey: register, authenticate, collect a book, delete the
//! account, and confirm the credentials no longer work.

use bookstore_core::{BookStore, Credentials, Transport, UserInfo};

use crate::account::{AccountGuard, CleanupOutcome};
use crate::config::HarnessConfig;
use crate::error::{CheckFailure, HarnessError};
use crate::logging::SuiteLog;
use crate::outcome::{ensure, expect_status, Diagnostics, SuiteReport};

pub const SUITE: &str = "journey";

pub fn journey_credentials() -> Credentials {
    Credentials::new("journeyUser", "Password123!")
}

fn journey<T: Transport>(
    store: &BookStore<T>,
    config: &HarnessConfig,
    diag: &mut Diagnostics,
) -> Result<(), CheckFailure> {
    let mut guard = AccountGuard::new(store, journey_credentials());
    let creds = guard.credentials().clone();

    let response = guard.register()?;
    expect_status(&response, 201)?;
    let user_id = guard
        .user_id()
        .map(str::to_string)
        .ok_or_else(|| CheckFailure::Assertion("201 without a readable userID".to_string()))?;
    diag.note("user_id", &user_id);

    let issued = store.generate_token(&creds.user_name, &creds.password)?;
    let token = issued
        .issued_token()
        .ok_or_else(|| CheckFailure::Assertion(format!("no token, status {}", issued.status)))?;

    let isbn = &config.reference_isbn;
    diag.note("isbn", isbn);
    let added = store.add_books(&user_id, &[isbn], &token)?;
    expect_status(&added, 201)?;

    let info = store.get_user_info(&user_id, &token)?;
    expect_status(&info, 200)?;
    let info: UserInfo = info.json()?;
    ensure(
        info.has_isbn(isbn),
        format!("collection is {:?}", info.isbns()),
    )?;

    let deleted = guard.cleanup();
    diag.note("delete", &deleted);
    ensure(
        deleted == CleanupOutcome::Deleted,
        format!("account not deleted: {deleted}"),
    )?;

    let after = store.generate_token(&creds.user_name, &creds.password)?;
    diag.note("token_status_after_delete", after.status);
    ensure(
        after.issued_token().is_none(),
        "deleted account still receives a token",
    )
}

pub fn run_journey_suite<T: Transport>(
    store: &BookStore<T>,
    config: &HarnessConfig,
) -> Result<SuiteReport, HarnessError> {
    let log = SuiteLog::open(&config.log_dir, SUITE)?;
    tracing::info!(base_url = store.client().base_url(), "journey suite");

    let mut report = SuiteReport::new(SUITE);
    report.run("register_collect_delete", |diag| journey(store, config, diag));

    tracing::info!("{report}");
    tracing::info!(log = %log.path().display(), "journey suite finished");
    Ok(report)
}
