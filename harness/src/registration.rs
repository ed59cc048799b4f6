//! Registration contract: password policy, empty fields, alphabets and
//! duplicate handling.
//!
//! Every scenario owns at most one throwaway account. It is deleted right
//! after the scenario, whether the service accepted it on purpose or not.

use bookstore_core::{ApiResponse, BookStore, CreatedUser, Credentials, Transport};

use crate::account::AccountGuard;
use crate::config::HarnessConfig;
use crate::error::{CheckFailure, HarnessError};
use crate::logging::SuiteLog;
use crate::outcome::{ensure, expect_not_status, expect_status, Diagnostics, SuiteReport};

pub const SUITE: &str = "registration";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Accepted,
    Rejected,
}

/// A single registration attempt and the answer the contract requires.
#[derive(Debug, Clone)]
pub struct RegistrationCase {
    pub name: &'static str,
    pub credentials: Credentials,
    pub expect: Expectation,
}

impl RegistrationCase {
    fn new(name: &'static str, username: &str, password: &str, expect: Expectation) -> Self {
        Self {
            name,
            credentials: Credentials::new(username, password),
            expect,
        }
    }
}

/// Policy and alphabet cases, each independent of the others.
pub fn policy_cases() -> Vec<RegistrationCase> {
    use Expectation::{Accepted, Rejected};

    vec![
        RegistrationCase::new("password_no_digits", "invalidNewUser", "Password!", Rejected),
        RegistrationCase::new("password_too_short", "invalidNewUser", "Pass12!", Rejected),
        RegistrationCase::new("password_no_uppercase", "invalidNewUser", "password123!", Rejected),
        RegistrationCase::new("password_no_lowercase", "invalidNewUser", "PASSWORD123!", Rejected),
        RegistrationCase::new("password_no_special_char", "invalidNewUser", "Password123", Rejected),
        RegistrationCase::new("password_empty", "invalidNewUser", "", Rejected),
        RegistrationCase::new(
            "password_other_special_char",
            "invalidNewUser",
            "Password123()/+-*=_",
            Accepted,
        ),
        RegistrationCase::new(
            "password_long",
            "invalidNewUser",
            &"validPassword123!".repeat(20),
            Accepted,
        ),
        RegistrationCase::new("only_cyrillic_username", "валидноИме", "Password123!", Accepted),
        RegistrationCase::new("mixed_username", "валидноUsername", "Password123!", Accepted),
        RegistrationCase::new("only_cyrillic_password", "validUsername", "Парола123!", Rejected),
        RegistrationCase::new("mixed_password", "validUsername", "PasswordПарола123!", Accepted),
        RegistrationCase::new("empty_username_empty_password", "", "", Rejected),
        RegistrationCase::new("empty_username", "", "Password123!", Rejected),
    ]
}

/// Register `guard`'s credentials once and judge the answer.
fn attempt<T: Transport>(
    guard: &mut AccountGuard<'_, T>,
    expect: Expectation,
    diag: &mut Diagnostics,
) -> Result<ApiResponse, CheckFailure> {
    diag.note("username", &guard.credentials().user_name);
    diag.note("password", &guard.credentials().password);

    let response = guard.register()?;
    diag.note("status", response.status);

    match expect {
        Expectation::Accepted => {
            expect_status(&response, 201)?;
            check_created(&response, &guard.credentials().user_name)?;
        }
        Expectation::Rejected => expect_not_status(&response, 201)?,
    }
    Ok(response)
}

/// A 201 body carries an id, echoes the username and has no books.
fn check_created(response: &ApiResponse, username: &str) -> Result<(), CheckFailure> {
    let created: CreatedUser = response.json()?;
    ensure(!created.user_id.is_empty(), "registration returned an empty userID")?;
    ensure(
        created.username == username,
        format!("username echoed as {:?}, sent {username:?}", created.username),
    )?;
    ensure(
        created.books.is_empty(),
        format!("new account already has {} books", created.books.len()),
    )
}

/// Run `check` with a fresh guard, then tear the account down.
fn with_account<T, F>(
    report: &mut SuiteReport,
    store: &BookStore<T>,
    name: &'static str,
    credentials: Credentials,
    check: F,
) where
    T: Transport,
    F: FnOnce(&mut AccountGuard<'_, T>, &mut Diagnostics) -> Result<(), CheckFailure>,
{
    report.run(name, |diag| {
        let mut guard = AccountGuard::new(store, credentials);
        let result = check(&mut guard, diag);
        diag.note("teardown", guard.cleanup());
        result
    });
}

pub fn run_registration_suite<T: Transport>(
    store: &BookStore<T>,
    config: &HarnessConfig,
) -> Result<SuiteReport, HarnessError> {
    let log = SuiteLog::open(&config.log_dir, SUITE)?;
    tracing::info!(base_url = store.client().base_url(), "registration suite");

    let mut report = SuiteReport::new(SUITE);

    with_account(
        &mut report,
        store,
        "create_new_valid_user",
        config.shared_account.clone(),
        |guard, diag| {
            attempt(guard, Expectation::Accepted, diag)?;
            let mut repeat = AccountGuard::new(guard.store(), guard.credentials().clone());
            let again = repeat.register()?;
            diag.note("repeat_status", again.status);
            diag.note("repeat_teardown", repeat.cleanup());
            expect_not_status(&again, 201)
        },
    );

    with_account(
        &mut report,
        store,
        "user_exists",
        config.standing_account.clone(),
        |guard, diag| attempt(guard, Expectation::Rejected, diag).map(drop),
    );

    // Same username as the standing account, different password.
    let reused_username = Credentials::new(
        config.standing_account.user_name.clone(),
        "ExistingUser123!",
    );
    with_account(
        &mut report,
        store,
        "existing_username",
        reused_username,
        |guard, diag| attempt(guard, Expectation::Accepted, diag).map(drop),
    );

    for case in policy_cases() {
        let expect = case.expect;
        with_account(&mut report, store, case.name, case.credentials, move |guard, diag| {
            attempt(guard, expect, diag).map(drop)
        });
    }

    tracing::info!("{report}");
    tracing::info!(log = %log.path().display(), "registration suite finished");
    Ok(report)
}
