//! Contract verification harness for the demo bookstore API.
//!
//! # Overview
//! Three suites drive a `BookStore` and judge every answer against the
//! service's documented rules:
//! - `registration`: password policy, empty fields, alphabets, duplicates.
//! - `collection`: one shared account adding, replacing and removing books.
//! - `journey`: register, collect a book, delete, confirm the login is gone.
//!
//! Each suite returns a `SuiteReport`; a scenario that fails is recorded and
//! the suite moves on. Only fixture setup problems surface as `HarnessError`.
//!
//! # Design
//! - Every account a scenario creates is owned by an `AccountGuard` and
//!   deleted when the scenario ends, even on failure.
//! - ISBNs for the collection suite are drawn once from a seeded pool and
//!   used by name, so a run can be replayed with `BOOKSTORE_SEED`.
//! - Each suite writes its own log file under `HarnessConfig::log_dir`.

pub mod account;
pub mod collection;
pub mod config;
pub mod error;
pub mod isbn_pool;
pub mod journey;
pub mod logging;
pub mod outcome;
pub mod registration;

use bookstore_core::{BookStore, Transport};

pub use account::{cleanup_account, AccountGuard, CleanupOutcome};
pub use collection::{run_collection_suite, CollectionFixture, IsbnPicks};
pub use config::{FixedFact, HarnessConfig};
pub use error::{CheckFailure, HarnessError};
pub use isbn_pool::IsbnPool;
pub use journey::run_journey_suite;
pub use logging::SuiteLog;
pub use outcome::{Diagnostics, Outcome, SuiteReport, Verdict};
pub use registration::{run_registration_suite, Expectation, RegistrationCase};

/// Run the three suites in order against `store`.
pub fn run_suites<T: Transport>(
    store: &BookStore<T>,
    config: &HarnessConfig,
) -> Result<Vec<SuiteReport>, HarnessError> {
    Ok(vec![
        run_registration_suite(store, config)?,
        run_collection_suite(store, config)?,
        run_journey_suite(store, config)?,
    ])
}

/// Run every suite against `config.base_url` over HTTP.
pub fn run_all(config: &HarnessConfig) -> Result<Vec<SuiteReport>, HarnessError> {
    let store = BookStore::new(&config.base_url);
    run_suites(&store, config)
}
