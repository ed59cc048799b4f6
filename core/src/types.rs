//! Wire DTOs for the Account and BookStore APIs.
//!
//! # Design
//! Field names follow the service exactly, including its inconsistent
//! casing: registration answers with `userID` while user info answers with
//! `userId`. Catalog metadata fields default when absent so a trimmed book
//! listing still decodes.

use serde::{Deserialize, Serialize};

/// Username/password pair sent to the Account endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }
}

/// Body of a 201 from `POST /Account/v1/User`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedUser {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Body of `POST /Account/v1/GenerateToken`, successful or not.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResult {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub expires: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

impl TokenResult {
    /// The issued token, if any. A null or empty token means authentication
    /// failed even when the status code was 200.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Body of `GET /Account/v1/User/{userId}` and of a successful replace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub books: Vec<Book>,
}

impl UserInfo {
    pub fn isbns(&self) -> Vec<&str> {
        self.books.iter().map(|b| b.isbn.as_str()).collect()
    }

    pub fn has_isbn(&self, isbn: &str) -> bool {
        self.books.iter().any(|b| b.isbn == isbn)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub isbn: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sub_title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, rename = "publish_date")]
    pub publish_date: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
}

/// Body of `GET /BookStore/v1/Books`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookList {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IsbnRef {
    pub isbn: String,
}

impl From<&str> for IsbnRef {
    fn from(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBooks {
    pub user_id: String,
    pub collection_of_isbns: Vec<IsbnRef>,
}

/// Body of a 201 from `POST /BookStore/v1/Books`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddedBooks {
    pub books: Vec<IsbnRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceBook {
    pub user_id: String,
    pub isbn: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveBook {
    pub isbn: String,
    pub user_id: String,
}

/// Error body returned with 4xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
