//! One call per remote operation, executed through a `Transport`.
//!
//! Every method returns the raw `ApiResponse`; `Err` is reserved for
//! transport failures and unreadable bodies. Nothing is retried.

use crate::client::BookStoreClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::response::ApiResponse;
use crate::transport::{Transport, UreqTransport};

/// Result of `BookStore::delete_user`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteUser {
    /// Whether a token could be obtained before the DELETE was sent.
    pub authenticated: bool,
    pub response: ApiResponse,
}

#[derive(Debug, Clone)]
pub struct BookStore<T = UreqTransport> {
    client: BookStoreClient,
    transport: T,
}

impl BookStore<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> BookStore<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: BookStoreClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &BookStoreClient {
        &self.client
    }

    fn send(&self, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        let response = self.transport.execute(request)?;
        self.client.parse_response(response)
    }

    pub fn register_user(&self, username: &str, password: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_register_user(username, password)?)
    }

    pub fn generate_token(&self, username: &str, password: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_generate_token(username, password)?)
    }

    pub fn is_authorized(&self, username: &str, password: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_is_authorized(username, password)?)
    }

    /// Generate a token for the account, then delete it.
    ///
    /// When no token can be obtained the DELETE is still sent with an empty
    /// bearer and is expected to be refused; `authenticated` is `false` in
    /// that case.
    pub fn delete_user(&self, user_id: &str, username: &str, password: &str) -> Result<DeleteUser, ApiError> {
        let token_response = self.generate_token(username, password)?;
        let token = token_response.issued_token();

        if token.is_none() {
            tracing::warn!(
                %user_id,
                status = token_response.status,
                "cleanup skipped: could not authenticate"
            );
        }

        let authenticated = token.is_some();
        let response = self.send(
            self.client
                .build_delete_user(user_id, token.as_deref().unwrap_or_default()),
        )?;
        Ok(DeleteUser {
            authenticated,
            response,
        })
    }

    pub fn get_user_info(&self, user_id: &str, token: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_get_user_info(user_id, token))
    }

    pub fn add_books<S: AsRef<str>>(
        &self,
        user_id: &str,
        isbns: &[S],
        token: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_add_books(user_id, isbns, token)?)
    }

    pub fn list_books(&self) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_list_books())
    }

    pub fn get_book(&self, isbn: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_get_book(isbn))
    }

    pub fn replace_book(
        &self,
        user_id: &str,
        token: &str,
        current_isbn: &str,
        new_isbn: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.send(
            self.client
                .build_replace_book(user_id, token, current_isbn, new_isbn)?,
        )
    }

    pub fn remove_book(&self, user_id: &str, isbn: &str, token: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_remove_book(user_id, isbn, token)?)
    }
}
