//! Stateless HTTP request builder and response parser for the bookstore API.
//!
//! # Design
//! `BookStoreClient` holds only a `base_url`. Each remote operation has a
//! `build_*` method producing an `HttpRequest`; every response goes through
//! the single `parse_response`, because callers assert on status codes
//! themselves and the client must not interpret them.

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response::ApiResponse;
use crate::types::{AddBooks, Credentials, IsbnRef, RemoveBook, ReplaceBook};

pub const ACCOUNT_USER: &str = "/Account/v1/User";
pub const ACCOUNT_GENERATE_TOKEN: &str = "/Account/v1/GenerateToken";
pub const ACCOUNT_AUTHORIZED: &str = "/Account/v1/Authorized";
pub const BOOKSTORE_BOOKS: &str = "/BookStore/v1/Books";
pub const BOOKSTORE_BOOK: &str = "/BookStore/v1/Book";

#[derive(Debug, Clone)]
pub struct BookStoreClient {
    base_url: String,
}

impl BookStoreClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_register_user(&self, username: &str, password: &str) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, ACCOUNT_USER, None, &Credentials::new(username, password))
    }

    pub fn build_generate_token(&self, username: &str, password: &str) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Post,
            ACCOUNT_GENERATE_TOKEN,
            None,
            &Credentials::new(username, password),
        )
    }

    pub fn build_is_authorized(&self, username: &str, password: &str) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Post,
            ACCOUNT_AUTHORIZED,
            None,
            &Credentials::new(username, password),
        )
    }

    /// `token` may be empty; the request then carries a bare `Bearer ` header
    /// and the service is expected to refuse it.
    pub fn build_delete_user(&self, user_id: &str, token: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}{ACCOUNT_USER}/{user_id}", self.base_url),
            query: Vec::new(),
            headers: vec![authorization(token)],
            body: None,
        }
    }

    pub fn build_get_user_info(&self, user_id: &str, token: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{ACCOUNT_USER}/{user_id}", self.base_url),
            query: Vec::new(),
            headers: vec![authorization(token)],
            body: None,
        }
    }

    pub fn build_add_books<S: AsRef<str>>(
        &self,
        user_id: &str,
        isbns: &[S],
        token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let payload = AddBooks {
            user_id: user_id.to_string(),
            collection_of_isbns: isbns.iter().map(|i| IsbnRef::from(i.as_ref())).collect(),
        };
        self.json_request(HttpMethod::Post, BOOKSTORE_BOOKS, Some(token), &payload)
    }

    pub fn build_list_books(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{BOOKSTORE_BOOKS}", self.base_url),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_book(&self, isbn: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{BOOKSTORE_BOOK}", self.base_url),
            query: vec![("ISBN".to_string(), isbn.to_string())],
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_replace_book(
        &self,
        user_id: &str,
        token: &str,
        current_isbn: &str,
        new_isbn: &str,
    ) -> Result<HttpRequest, ApiError> {
        let payload = ReplaceBook {
            user_id: user_id.to_string(),
            isbn: new_isbn.to_string(),
        };
        let path = format!("{BOOKSTORE_BOOKS}/{current_isbn}");
        self.json_request(HttpMethod::Put, &path, Some(token), &payload)
    }

    pub fn build_remove_book(&self, user_id: &str, isbn: &str, token: &str) -> Result<HttpRequest, ApiError> {
        let payload = RemoveBook {
            isbn: isbn.to_string(),
            user_id: user_id.to_string(),
        };
        self.json_request(HttpMethod::Delete, BOOKSTORE_BOOK, Some(token), &payload)
    }

    /// Turn a raw response into a status + optional JSON body.
    ///
    /// An empty (or whitespace-only) body yields `None`; anything else must
    /// be JSON.
    pub fn parse_response(&self, response: HttpResponse) -> Result<ApiResponse, ApiError> {
        let body = if response.body.trim().is_empty() {
            None
        } else {
            let value = serde_json::from_str(&response.body)
                .map_err(|e| ApiError::Deserialization(format!("HTTP {}: {e}", response.status)))?;
            Some(value)
        };
        Ok(ApiResponse {
            status: response.status,
            body,
        })
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        token: Option<&str>,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
        if let Some(token) = token {
            headers.push(authorization(token));
        }
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            query: Vec::new(),
            headers,
            body: Some(body),
        })
    }
}

fn authorization(token: &str) -> (String, String) {
    ("authorization".to_string(), format!("Bearer {token}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BookStoreClient {
        BookStoreClient::new("https://demoqa.com")
    }

    fn body(req: &HttpRequest) -> serde_json::Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn build_register_user_produces_correct_request() {
        let req = client().build_register_user("validUser", "Password123!").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "https://demoqa.com/Account/v1/User");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body = body(&req);
        assert_eq!(body["userName"], "validUser");
        assert_eq!(body["password"], "Password123!");
    }

    #[test]
    fn build_register_user_passes_unicode_through() {
        let req = client().build_register_user("валидноИме", "Парола123!").unwrap();
        let body = body(&req);
        assert_eq!(body["userName"], "валидноИме");
        assert_eq!(body["password"], "Парола123!");
    }

    #[test]
    fn build_generate_token_targets_token_endpoint() {
        let req = client().build_generate_token("u", "p").unwrap();
        assert_eq!(req.path, "https://demoqa.com/Account/v1/GenerateToken");
        assert!(req.header("authorization").is_none());
    }

    #[test]
    fn build_is_authorized_targets_authorized_endpoint() {
        let req = client().build_is_authorized("u", "p").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "https://demoqa.com/Account/v1/Authorized");
    }

    #[test]
    fn build_delete_user_carries_bearer() {
        let req = client().build_delete_user("id-1", "tok");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "https://demoqa.com/Account/v1/User/id-1");
        assert_eq!(req.header("Authorization"), Some("Bearer tok"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_delete_user_with_empty_token_keeps_header() {
        let req = client().build_delete_user("id-1", "");
        assert_eq!(req.header("authorization"), Some("Bearer "));
    }

    #[test]
    fn build_get_user_info_is_authenticated_get() {
        let req = client().build_get_user_info("id-1", "tok");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "https://demoqa.com/Account/v1/User/id-1");
        assert_eq!(req.header("authorization"), Some("Bearer tok"));
    }

    #[test]
    fn build_add_books_wraps_each_isbn() {
        let req = client()
            .build_add_books("id-1", &["9781449325862", "9781491904244"], "tok")
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "https://demoqa.com/BookStore/v1/Books");
        assert_eq!(req.header("authorization"), Some("Bearer tok"));
        let body = body(&req);
        assert_eq!(body["userId"], "id-1");
        assert_eq!(body["collectionOfIsbns"][0]["isbn"], "9781449325862");
        assert_eq!(body["collectionOfIsbns"][1]["isbn"], "9781491904244");
    }

    #[test]
    fn build_list_books_is_unauthenticated() {
        let req = client().build_list_books();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "https://demoqa.com/BookStore/v1/Books");
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_book_uses_isbn_query() {
        let req = client().build_get_book("9781491904244");
        assert_eq!(req.path, "https://demoqa.com/BookStore/v1/Book");
        assert_eq!(req.query, vec![("ISBN".to_string(), "9781491904244".to_string())]);
    }

    #[test]
    fn build_replace_book_puts_to_current_isbn() {
        let req = client().build_replace_book("id-1", "tok", "old", "new").unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "https://demoqa.com/BookStore/v1/Books/old");
        let body = body(&req);
        assert_eq!(body["userId"], "id-1");
        assert_eq!(body["isbn"], "new");
    }

    #[test]
    fn build_remove_book_is_delete_with_body() {
        let req = client().build_remove_book("id-1", "9781449325862", "tok").unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "https://demoqa.com/BookStore/v1/Book");
        let body = body(&req);
        assert_eq!(body["isbn"], "9781449325862");
        assert_eq!(body["userId"], "id-1");
    }

    #[test]
    fn parse_response_keeps_status_and_json() {
        let response = HttpResponse {
            status: 406,
            headers: Vec::new(),
            body: r#"{"code":"1204","message":"User exists!"}"#.to_string(),
        };
        let parsed = client().parse_response(response).unwrap();
        assert_eq!(parsed.status, 406);
        assert_eq!(parsed.body.unwrap()["code"], "1204");
    }

    #[test]
    fn parse_response_empty_body_is_none() {
        let response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        let parsed = client().parse_response(response).unwrap();
        assert!(parsed.is(204));
        assert!(parsed.body.is_none());
    }

    #[test]
    fn parse_response_boolean_body() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "true".to_string(),
        };
        let parsed = client().parse_response(response).unwrap();
        assert_eq!(parsed.body, Some(serde_json::Value::Bool(true)));
    }

    #[test]
    fn parse_response_bad_json() {
        let response = HttpResponse {
            status: 502,
            headers: Vec::new(),
            body: "<html>bad gateway</html>".to_string(),
        };
        let err = client().parse_response(response).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = BookStoreClient::new("https://demoqa.com/");
        let req = client.build_list_books();
        assert_eq!(req.path, "https://demoqa.com/BookStore/v1/Books");
    }
}
