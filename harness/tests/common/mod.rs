#![allow(dead_code)]

use std::sync::Arc;

use bookstore_core::{ApiError, HttpRequest, HttpResponse, Transport, UreqTransport};
use bookstore_harness::HarnessConfig;
use bookstore_mock::{Bookstore, Db};
use tokio::sync::RwLock;

/// Mock server on a random port, plus a handle on its state.
pub struct Mock {
    pub base_url: String,
    pub db: Db,
}

impl Mock {
    pub fn start() -> Self {
        let db: Db = Arc::new(RwLock::new(Bookstore::seeded()));
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        let state = db.clone();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                bookstore_mock::run_with(listener, state).await
            })
            .unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            db,
        }
    }

    /// Accounts alive on the mock, the standing one included.
    pub fn accounts(&self) -> usize {
        self.db.blocking_read().account_count()
    }

    pub fn config(&self, log_dir: &std::path::Path) -> HarnessConfig {
        HarnessConfig {
            log_dir: log_dir.to_path_buf(),
            seed: Some(7),
            ..HarnessConfig::with_base_url(&self.base_url)
        }
    }
}

/// Real HTTP to the mock, except where `rule` answers first. The rule may
/// also rewrite a request before it is forwarded.
pub struct Tampered<F> {
    inner: UreqTransport,
    rule: F,
}

impl<F> Tampered<F>
where
    F: Fn(&mut HttpRequest) -> Option<HttpResponse>,
{
    pub fn new(rule: F) -> Self {
        Self {
            inner: UreqTransport::new(),
            rule,
        }
    }
}

impl<F> Transport for Tampered<F>
where
    F: Fn(&mut HttpRequest) -> Option<HttpResponse>,
{
    fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        match (self.rule)(&mut request) {
            Some(response) => Ok(response),
            None => self.inner.execute(request),
        }
    }
}

pub fn reply(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    }
}
