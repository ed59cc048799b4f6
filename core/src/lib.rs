//! Synchronous client for the demo bookstore Account and BookStore APIs.
//!
//! # Overview
//! `BookStoreClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. `BookStore` pairs it with a
//! `Transport` (ureq by default) and exposes one method per remote
//! operation, each returning the raw status code and JSON body.
//!
//! # Design
//! - The client never interprets status codes; validation failures reported
//!   by the service are ordinary `ApiResponse` values.
//! - `ApiError` is reserved for transport failures and unreadable bodies.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod response;
pub mod transport;
pub mod types;

pub use api::{BookStore, DeleteUser};
pub use client::BookStoreClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::ApiResponse;
pub use transport::{Transport, UreqTransport};
pub use types::{
    AddedBooks, Book, BookList, CreatedUser, Credentials, ErrorBody, IsbnRef, TokenResult, UserInfo,
};
