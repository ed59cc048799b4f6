//! Authenticated collection contract.
//!
//! The suite shares one account across its scenarios, so they run in the
//! order declared here and each one builds on the collection state the
//! previous one left behind.

use bookstore_core::{AddedBooks, Book, BookList, BookStore, Credentials, Transport, UserInfo};

use crate::account::{AccountGuard, CleanupOutcome};
use crate::config::HarnessConfig;
use crate::error::{CheckFailure, HarnessError};
use crate::isbn_pool::IsbnPool;
use crate::logging::SuiteLog;
use crate::outcome::{ensure, expect_not_status, expect_status, SuiteReport};

pub const SUITE: &str = "collection";

/// ISBNs chosen once per run, each with a single purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsbnPicks {
    pub reference: String,
    pub first: String,
    pub second: String,
    pub replacement: String,
    /// Never added, so removing it must fail.
    pub absent: String,
}

pub struct CollectionFixture<'a, T: Transport> {
    account: AccountGuard<'a, T>,
    pub user_id: String,
    pub token: String,
    pub catalog: Vec<Book>,
    pub picks: IsbnPicks,
    pub seed: u64,
    config: &'a HarnessConfig,
}

fn draw(pool: &mut IsbnPool, purpose: &str) -> Result<String, HarnessError> {
    pool.draw().ok_or_else(|| {
        HarnessError::Setup(format!("catalog too small to draw the {purpose} ISBN"))
    })
}

impl<'a, T: Transport> CollectionFixture<'a, T> {
    /// Register the shared account, authenticate it and pick ISBNs.
    ///
    /// If anything fails after registration the guard drops and the account
    /// is deleted again.
    pub fn setup(store: &'a BookStore<T>, config: &'a HarnessConfig) -> Result<Self, HarnessError> {
        let credentials = config.shared_account.clone();
        let mut account = AccountGuard::new(store, credentials.clone());

        let response = account.register()?;
        let user_id = account.user_id().map(str::to_string).ok_or_else(|| {
            HarnessError::Setup(format!(
                "registering {}: status {}",
                credentials.user_name, response.status
            ))
        })?;

        let token = authenticate(store, &credentials)?;

        let catalog = store.list_books()?.json::<BookList>()?.books;
        if !catalog.iter().any(|b| b.isbn == config.reference_isbn) {
            return Err(HarnessError::Setup(format!(
                "reference ISBN {} is not in the catalog",
                config.reference_isbn
            )));
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(seed, books = catalog.len(), "drawing ISBNs");
        let mut pool = IsbnPool::from_catalog(&catalog, &[config.reference_isbn.as_str()], seed);
        let picks = IsbnPicks {
            reference: config.reference_isbn.clone(),
            first: draw(&mut pool, "first")?,
            second: draw(&mut pool, "second")?,
            replacement: draw(&mut pool, "replacement")?,
            absent: draw(&mut pool, "absent")?,
        };
        tracing::debug!(?picks, "picked");

        Ok(Self {
            account,
            user_id,
            token,
            catalog,
            picks,
            seed,
            config,
        })
    }

    pub fn store(&self) -> &'a BookStore<T> {
        self.account.store()
    }

    pub fn credentials(&self) -> &Credentials {
        self.account.credentials()
    }

    /// Current collection, read back from the service.
    pub fn collection(&self) -> Result<UserInfo, CheckFailure> {
        let response = self.store().get_user_info(&self.user_id, &self.token)?;
        expect_status(&response, 200)?;
        Ok(response.json()?)
    }

    pub fn teardown(mut self) -> CleanupOutcome {
        self.account.cleanup()
    }
}

fn authenticate<T: Transport>(
    store: &BookStore<T>,
    credentials: &Credentials,
) -> Result<String, HarnessError> {
    let response = store.generate_token(&credentials.user_name, &credentials.password)?;
    response.issued_token().ok_or_else(|| {
        HarnessError::Setup(format!(
            "no token for {}: status {}",
            credentials.user_name, response.status
        ))
    })
}

fn sorted(mut isbns: Vec<String>) -> Vec<String> {
    isbns.sort();
    isbns
}

fn owned(info: &UserInfo) -> Vec<String> {
    sorted(info.isbns().into_iter().map(str::to_string).collect())
}

/// Run every collection scenario against one fixture.
pub fn run_scenarios<T: Transport>(fixture: &CollectionFixture<'_, T>) -> SuiteReport {
    let mut report = SuiteReport::new(SUITE);
    let store = fixture.store();
    let picks = &fixture.picks;
    let config = fixture.config;

    report.run("fresh_collection_is_empty", |diag| {
        let info = fixture.collection()?;
        diag.note("books", info.books.len());
        ensure(info.user_id == fixture.user_id, "user info returned another account")?;
        ensure(
            info.books.is_empty(),
            format!("new account owns {:?}", info.isbns()),
        )
    });

    report.run("user_registered", |diag| {
        // A wrongly accepted duplicate is a second account and must go too.
        let mut repeat = AccountGuard::new(store, fixture.credentials().clone());
        let response = repeat.register()?;
        diag.note("status", response.status);
        if let Some(body) = response.error_body() {
            diag.note("code", body.code);
        }
        diag.note("teardown", repeat.cleanup());
        expect_not_status(&response, 201)
    });

    report.run("user_authorized", |diag| {
        let creds = fixture.credentials();
        let response = store.is_authorized(&creds.user_name, &creds.password)?;
        diag.note("status", response.status);
        expect_status(&response, 200)?;
        ensure(
            response.json::<bool>()?,
            "authorized answered false for a fresh token holder",
        )
    });

    report.run("add_reference_book", |diag| {
        diag.note("isbn", &picks.reference);
        let response = store.add_books(&fixture.user_id, &[&picks.reference], &fixture.token)?;
        expect_status(&response, 201)?;
        let added: AddedBooks = response.json()?;
        ensure(
            added.books.iter().any(|b| b.isbn == picks.reference),
            "201 body does not list the added ISBN",
        )?;
        let info = fixture.collection()?;
        ensure(
            info.has_isbn(&picks.reference),
            format!("collection is {:?}", info.isbns()),
        )
    });

    report.run("add_unknown_book", |diag| {
        diag.note("isbn", &config.unknown_isbn);
        let before = owned(&fixture.collection()?);
        let response = store.add_books(&fixture.user_id, &[&config.unknown_isbn], &fixture.token)?;
        if let Some(body) = response.error_body() {
            diag.note("code", body.code);
        }
        expect_status(&response, 400)?;
        let after = owned(&fixture.collection()?);
        ensure(
            before == after,
            format!("collection changed from {before:?} to {after:?}"),
        )
    });

    report.run("add_drawn_books", |diag| {
        diag.note("first", &picks.first);
        diag.note("second", &picks.second);
        let response = store.add_books(
            &fixture.user_id,
            &[&picks.first, &picks.second],
            &fixture.token,
        )?;
        expect_status(&response, 201)?;
        let info = fixture.collection()?;
        ensure(
            info.has_isbn(&picks.first) && info.has_isbn(&picks.second),
            format!("collection is {:?}", info.isbns()),
        )
    });

    report.run("replace_book", |diag| {
        diag.note("current", &picks.reference);
        diag.note("new", &picks.replacement);
        let response = store.replace_book(
            &fixture.user_id,
            &fixture.token,
            &picks.reference,
            &picks.replacement,
        )?;
        expect_status(&response, 200)?;
        let info = fixture.collection()?;
        ensure(
            info.has_isbn(&picks.replacement),
            format!("replacement missing from {:?}", info.isbns()),
        )?;
        ensure(
            !info.has_isbn(&picks.reference),
            format!("replaced ISBN still in {:?}", info.isbns()),
        )
    });

    report.run("fixed_catalog_fact", |diag| {
        let fact = &config.fixed_fact;
        diag.note("isbn", &fact.isbn);
        let response = store.get_book(&fact.isbn)?;
        expect_status(&response, 200)?;
        let book: Book = response.json()?;
        diag.note("pages", book.pages);
        ensure(
            book.pages == fact.pages,
            format!("expected {} pages, got {}", fact.pages, book.pages),
        )
    });

    report.run("remove_book", |diag| {
        diag.note("isbn", &picks.second);
        let before = owned(&fixture.collection()?);
        let response = store.remove_book(&fixture.user_id, &picks.second, &fixture.token)?;
        expect_status(&response, 204)?;
        let after = owned(&fixture.collection()?);
        let expected: Vec<String> = before.into_iter().filter(|i| *i != picks.second).collect();
        ensure(
            after == expected,
            format!("expected {expected:?} after removal, found {after:?}"),
        )
    });

    report.run("remove_absent_book", |diag| {
        diag.note("isbn", &picks.absent);
        let response = store.remove_book(&fixture.user_id, &picks.absent, &fixture.token)?;
        if let Some(body) = response.error_body() {
            diag.note("code", body.code);
        }
        expect_status(&response, 400)
    });

    report
}

pub fn run_collection_suite<T: Transport>(
    store: &BookStore<T>,
    config: &HarnessConfig,
) -> Result<SuiteReport, HarnessError> {
    let log = SuiteLog::open(&config.log_dir, SUITE)?;
    tracing::info!(base_url = store.client().base_url(), "collection suite");

    let fixture = CollectionFixture::setup(store, config)?;
    let report = run_scenarios(&fixture);
    let teardown = fixture.teardown();

    tracing::info!("{report}");
    tracing::info!(%teardown, log = %log.path().display(), "collection suite finished");
    Ok(report)
}
