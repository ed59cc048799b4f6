//! Throwaway accounts and their cleanup.
//!
//! An `AccountGuard` owns the account behind a registration response and
//! deletes it when asked or, failing that, when it drops. Cleanup problems
//! are logged and reported as a `CleanupOutcome`, never raised.

use std::fmt;

use bookstore_core::{ApiResponse, BookStore, CreatedUser, Credentials, DeleteUser, Transport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Deleted,
    /// No account was ever created.
    NothingToDelete,
    /// A token could not be obtained, so the delete could not succeed.
    SkippedUnauthenticated,
    Failed(String),
}

impl fmt::Display for CleanupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupOutcome::Deleted => write!(f, "deleted"),
            CleanupOutcome::NothingToDelete => write!(f, "nothing to delete"),
            CleanupOutcome::SkippedUnauthenticated => {
                write!(f, "cleanup skipped: could not authenticate")
            }
            CleanupOutcome::Failed(reason) => write!(f, "delete failed: {reason}"),
        }
    }
}

/// Best-effort delete of `user_id`.
pub fn cleanup_account<T: Transport>(
    store: &BookStore<T>,
    user_id: &str,
    credentials: &Credentials,
) -> CleanupOutcome {
    let outcome = match store.delete_user(user_id, &credentials.user_name, &credentials.password) {
        Ok(DeleteUser {
            authenticated: false,
            ..
        }) => CleanupOutcome::SkippedUnauthenticated,
        Ok(DeleteUser { response, .. }) if response.is(204) => CleanupOutcome::Deleted,
        Ok(DeleteUser { response, .. }) => {
            CleanupOutcome::Failed(format!("status {}", response.status))
        }
        Err(err) => CleanupOutcome::Failed(err.to_string()),
    };

    match &outcome {
        CleanupOutcome::Deleted => tracing::info!(
            %user_id,
            username = %credentials.user_name,
            "deleted account"
        ),
        other => tracing::warn!(%user_id, username = %credentials.user_name, "{other}"),
    }
    outcome
}

pub struct AccountGuard<'a, T: Transport> {
    store: &'a BookStore<T>,
    credentials: Credentials,
    user_id: Option<String>,
}

impl<'a, T: Transport> AccountGuard<'a, T> {
    pub fn new(store: &'a BookStore<T>, credentials: Credentials) -> Self {
        Self {
            store,
            credentials,
            user_id: None,
        }
    }

    pub fn store(&self) -> &'a BookStore<T> {
        self.store
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Register the guarded credentials and adopt the account if one was
    /// created, whatever the caller expected.
    pub fn register(&mut self) -> Result<ApiResponse, bookstore_core::ApiError> {
        let response = self
            .store
            .register_user(&self.credentials.user_name, &self.credentials.password)?;
        self.adopt(&response);
        Ok(response)
    }

    /// Take ownership of the account behind a 201 registration response.
    pub fn adopt(&mut self, response: &ApiResponse) -> Option<&str> {
        if !response.is(201) {
            return None;
        }
        let created: CreatedUser = response.json().ok()?;
        tracing::info!(
            user_id = %created.user_id,
            username = %self.credentials.user_name,
            "registered account"
        );
        self.user_id = Some(created.user_id);
        self.user_id.as_deref()
    }

    /// Delete the guarded account now. Later calls, and the eventual drop,
    /// find nothing to delete.
    pub fn cleanup(&mut self) -> CleanupOutcome {
        match self.user_id.take() {
            Some(user_id) => cleanup_account(self.store, &user_id, &self.credentials),
            None => {
                tracing::info!("no need to delete an account");
                CleanupOutcome::NothingToDelete
            }
        }
    }
}

impl<T: Transport> Drop for AccountGuard<'_, T> {
    fn drop(&mut self) {
        if self.user_id.is_some() {
            self.cleanup();
        }
    }
}
