//! Structured pass/fail reporting for scenarios.
//!
//! A scenario is a closure returning `Result<(), CheckFailure>`. The suite
//! report runs it, records the verdict together with whatever diagnostic
//! context the scenario noted, and moves on; nothing unwinds.

use std::fmt;

use bookstore_core::ApiResponse;

use crate::error::CheckFailure;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub scenario: &'static str,
    pub verdict: Verdict,
    pub context: Vec<(String, String)>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Passed
    }

    pub fn context(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Key/value notes a scenario leaves behind for the report and the log.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<(String, String)>,
}

impl Diagnostics {
    pub fn note(&mut self, key: &str, value: impl fmt::Display) {
        let value = value.to_string();
        tracing::debug!("{key}: {value}");
        self.entries.push((key.to_string(), value));
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub suite: &'static str,
    pub outcomes: Vec<Outcome>,
}

impl SuiteReport {
    pub fn new(suite: &'static str) -> Self {
        Self {
            suite,
            outcomes: Vec::new(),
        }
    }

    pub fn run<F>(&mut self, scenario: &'static str, check: F)
    where
        F: FnOnce(&mut Diagnostics) -> Result<(), CheckFailure>,
    {
        tracing::info!("starting {scenario}");
        let mut diagnostics = Diagnostics::default();
        let verdict = match check(&mut diagnostics) {
            Ok(()) => {
                tracing::info!("{scenario} passed");
                Verdict::Passed
            }
            Err(failure) => {
                tracing::error!("{scenario} failed: {failure}");
                Verdict::Failed(failure.to_string())
            }
        };
        self.outcomes.push(Outcome {
            scenario,
            verdict,
            context: diagnostics.entries,
        });
    }

    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(Outcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn outcome(&self, scenario: &str) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.scenario == scenario)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed = self.failures().count();
        writeln!(
            f,
            "{}: {} passed, {} failed",
            self.suite,
            self.outcomes.len() - failed,
            failed
        )?;
        for outcome in self.failures() {
            if let Verdict::Failed(reason) = &outcome.verdict {
                writeln!(f, "  {}: {reason}", outcome.scenario)?;
            }
            for (key, value) in &outcome.context {
                writeln!(f, "    {key} = {value}")?;
            }
        }
        Ok(())
    }
}

fn body_text(response: &ApiResponse) -> String {
    response
        .body
        .as_ref()
        .map(|b| b.to_string())
        .unwrap_or_default()
}

pub fn expect_status(response: &ApiResponse, expected: u16) -> Result<(), CheckFailure> {
    if response.is(expected) {
        return Ok(());
    }
    Err(CheckFailure::UnexpectedStatus {
        expected,
        actual: response.status,
        body: body_text(response),
    })
}

pub fn expect_not_status(response: &ApiResponse, forbidden: u16) -> Result<(), CheckFailure> {
    if !response.is(forbidden) {
        return Ok(());
    }
    Err(CheckFailure::ForbiddenStatus {
        status: forbidden,
        body: body_text(response),
    })
}

pub fn ensure(condition: bool, message: impl Into<String>) -> Result<(), CheckFailure> {
    if condition {
        Ok(())
    } else {
        Err(CheckFailure::Assertion(message.into()))
    }
}
