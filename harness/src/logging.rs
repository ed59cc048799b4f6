//! Per-suite diagnostic log files.
//!
//! `SuiteLog` installs a file-backed fmt subscriber as the default for the
//! current thread. Suites run on the calling thread, so everything a suite
//! logs lands in `<log_dir>/<suite>.log` until the guard drops.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::subscriber::DefaultGuard;
use tracing::Level;

use crate::error::HarnessError;

pub struct SuiteLog {
    path: PathBuf,
    _guard: DefaultGuard,
}

impl SuiteLog {
    pub fn open(dir: &Path, suite: &str) -> Result<Self, HarnessError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{suite}.log"));
        let file = File::create(&path)?;

        let subscriber = tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .with_max_level(Level::DEBUG)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);

        Ok(Self {
            path,
            _guard: guard,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
