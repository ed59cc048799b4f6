//! The raw (status, JSON body) pair every operation returns.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::types::{ErrorBody, TokenResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn is(&self, status: u16) -> bool {
        self.status == status
    }

    /// Decode the body into `T`. A missing body decodes as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let value = self.body.clone().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// The token from a `GenerateToken` answer. Anything but a 200 carrying a
    /// non-empty token counts as failed authentication, including the live
    /// service's 200 with `token: null`.
    pub fn issued_token(&self) -> Option<String> {
        if !self.is(200) {
            return None;
        }
        self.json::<TokenResult>()
            .ok()
            .and_then(|t| t.token().map(str::to_string))
    }

    /// The service's `{code, message}` body, when the response carries one.
    pub fn error_body(&self) -> Option<ErrorBody> {
        self.body
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// ISBNs listed under a top-level `books` array, in service order.
    pub fn isbns(&self) -> Vec<String> {
        self.body
            .as_ref()
            .and_then(|v| v.get("books"))
            .and_then(Value::as_array)
            .map(|books| {
                books
                    .iter()
                    .filter_map(|b| b.get("isbn").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
