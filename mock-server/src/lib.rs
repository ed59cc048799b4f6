use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub mod catalog;
pub mod policy;

pub use catalog::{default_catalog, Book};

/// Credentials of the account every seeded store starts with.
pub const STANDING_USERNAME: &str = "existingUser";
pub const STANDING_PASSWORD: &str = "ExistingUserPassword123!";

#[derive(Clone, Debug)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub password: String,
    pub books: Vec<String>,
}

/// In-memory state behind the mock service.
#[derive(Debug, Default)]
pub struct Bookstore {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    catalog: Vec<Book>,
}

impl Bookstore {
    pub fn new(catalog: Vec<Book>) -> Self {
        Self {
            accounts: HashMap::new(),
            tokens: HashMap::new(),
            catalog,
        }
    }

    /// Demo catalog plus the standing account.
    pub fn seeded() -> Self {
        let mut store = Self::new(default_catalog());
        store.insert_account(STANDING_USERNAME.to_string(), STANDING_PASSWORD.to_string());
        store
    }

    pub fn insert_account(&mut self, username: String, password: String) -> Account {
        let account = Account {
            id: Uuid::new_v4().to_string(),
            username,
            password,
            books: Vec::new(),
        };
        self.accounts.insert(account.id.clone(), account.clone());
        account
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Usernames may repeat; only the username+password pair is unique.
    pub fn find_by_credentials(&self, username: &str, password: &str) -> Option<&Account> {
        self.accounts
            .values()
            .find(|a| a.username == username && a.password == password)
    }

    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.catalog.iter().find(|b| b.isbn == isbn)
    }

    fn issue_token(&mut self, user_id: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), user_id.to_string());
        token
    }

    fn remove_account(&mut self, user_id: &str) {
        self.accounts.remove(user_id);
        self.tokens.retain(|_, owner| owner.as_str() != user_id);
    }

    fn user_view(&self, account: &Account) -> UserView {
        UserView {
            user_id: account.id.clone(),
            username: account.username.clone(),
            books: account
                .books
                .iter()
                .filter_map(|isbn| self.book(isbn).cloned())
                .collect(),
        }
    }
}

pub type Db = Arc<RwLock<Bookstore>>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginView {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedUser {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub username: String,
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenView {
    pub token: Option<String>,
    pub expires: Option<String>,
    pub status: String,
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub user_id: String,
    pub username: String,
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Isbn {
    pub isbn: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddListOfBooks {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub collection_of_isbns: Vec<Isbn>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIsbn {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub isbn: String,
}

#[derive(Deserialize)]
pub struct BookQuery {
    #[serde(rename = "ISBN")]
    pub isbn: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookList {
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddedBooks {
    pub books: Vec<Isbn>,
}

type Reply = Result<Response, Response>;

fn error(status: StatusCode, code: &str, message: &str) -> Response {
    let body = ErrorBody {
        code: code.to_string(),
        message: message.to_string(),
    };
    (status, Json(body)).into_response()
}

fn credentials_required() -> Response {
    error(StatusCode::BAD_REQUEST, "1200", "UserName and Password required.")
}

fn not_authorized() -> Response {
    error(StatusCode::UNAUTHORIZED, "1200", "User not authorized!")
}

fn not_in_catalog() -> Response {
    error(
        StatusCode::BAD_REQUEST,
        "1205",
        "ISBN supplied is not available in Books Collection!",
    )
}

fn not_in_collection() -> Response {
    error(
        StatusCode::BAD_REQUEST,
        "1206",
        "ISBN supplied is not available in User's Collection!",
    )
}

fn already_in_collection() -> Response {
    error(
        StatusCode::BAD_REQUEST,
        "1210",
        "ISBN already present in the User's Collection!",
    )
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer")?.trim();
    (!token.is_empty()).then_some(token)
}

/// The bearer token must have been issued to `user_id`.
fn authorize(store: &Bookstore, headers: &HeaderMap, user_id: &str) -> Result<(), Response> {
    let owner = bearer(headers)
        .and_then(|token| store.tokens.get(token))
        .ok_or_else(not_authorized)?;
    if owner != user_id || !store.accounts.contains_key(user_id) {
        return Err(not_authorized());
    }
    Ok(())
}

fn account_mut<'a>(store: &'a mut Bookstore, user_id: &str) -> Result<&'a mut Account, Response> {
    store
        .accounts
        .get_mut(user_id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "1207", "User not found!"))
}

pub fn app() -> Router {
    app_with(Arc::new(RwLock::new(Bookstore::seeded())))
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/Account/v1/User", post(create_user))
        .route("/Account/v1/User/{user_id}", get(get_user).delete(delete_user))
        .route("/Account/v1/GenerateToken", post(generate_token))
        .route("/Account/v1/Authorized", post(authorized))
        .route("/BookStore/v1/Books", get(list_books).post(add_books))
        .route("/BookStore/v1/Books/{isbn}", put(replace_book))
        .route("/BookStore/v1/Book", get(get_book).delete(remove_book))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

async fn create_user(State(db): State<Db>, Json(input): Json<LoginView>) -> Reply {
    if input.user_name.is_empty() || input.password.is_empty() {
        return Err(credentials_required());
    }
    if !policy::password_meets_policy(&input.password) {
        return Err(error(StatusCode::BAD_REQUEST, "1300", policy::POLICY_MESSAGE));
    }
    let mut store = db.write().await;
    if store
        .find_by_credentials(&input.user_name, &input.password)
        .is_some()
    {
        return Err(error(StatusCode::NOT_ACCEPTABLE, "1204", "User exists!"));
    }
    let account = store.insert_account(input.user_name, input.password);
    tracing::debug!(user_id = %account.id, "registered account");
    let created = CreatedUser {
        user_id: account.id,
        username: account.username,
        books: Vec::new(),
    };
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

async fn generate_token(State(db): State<Db>, Json(input): Json<LoginView>) -> Reply {
    if input.user_name.is_empty() || input.password.is_empty() {
        return Err(credentials_required());
    }
    let mut store = db.write().await;
    let user_id = store
        .find_by_credentials(&input.user_name, &input.password)
        .map(|a| a.id.clone());
    let Some(user_id) = user_id else {
        let failed = TokenView {
            token: None,
            expires: None,
            status: "Failed".to_string(),
            result: "User authorization failed.".to_string(),
        };
        return Err((StatusCode::BAD_REQUEST, Json(failed)).into_response());
    };
    let issued = TokenView {
        token: Some(store.issue_token(&user_id)),
        expires: None,
        status: "Success".to_string(),
        result: "User authorized successfully.".to_string(),
    };
    Ok((StatusCode::OK, Json(issued)).into_response())
}

async fn authorized(State(db): State<Db>, Json(input): Json<LoginView>) -> Reply {
    if input.user_name.is_empty() || input.password.is_empty() {
        return Err(credentials_required());
    }
    let store = db.read().await;
    match store.find_by_credentials(&input.user_name, &input.password) {
        Some(_) => Ok(Json(true).into_response()),
        None => Err(error(StatusCode::NOT_FOUND, "1207", "User not found!")),
    }
}

async fn get_user(State(db): State<Db>, Path(user_id): Path<String>, headers: HeaderMap) -> Reply {
    let store = db.read().await;
    authorize(&store, &headers, &user_id)?;
    let account = store.account(&user_id).ok_or_else(not_authorized)?;
    Ok(Json(store.user_view(account)).into_response())
}

async fn delete_user(
    State(db): State<Db>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let mut store = db.write().await;
    authorize(&store, &headers, &user_id)?;
    store.remove_account(&user_id);
    tracing::debug!(%user_id, "deleted account");
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn list_books(State(db): State<Db>) -> Json<BookList> {
    let store = db.read().await;
    Json(BookList {
        books: store.catalog.clone(),
    })
}

async fn get_book(State(db): State<Db>, Query(query): Query<BookQuery>) -> Reply {
    let store = db.read().await;
    let book = query
        .isbn
        .as_deref()
        .and_then(|isbn| store.book(isbn))
        .ok_or_else(not_in_catalog)?;
    Ok(Json(book.clone()).into_response())
}

async fn add_books(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<AddListOfBooks>,
) -> Reply {
    let mut store = db.write().await;
    authorize(&store, &headers, &input.user_id)?;
    let mut incoming: Vec<String> = Vec::with_capacity(input.collection_of_isbns.len());
    for Isbn { isbn } in input.collection_of_isbns {
        if store.book(&isbn).is_none() {
            return Err(not_in_catalog());
        }
        if incoming.contains(&isbn) {
            return Err(already_in_collection());
        }
        incoming.push(isbn);
    }
    let account = account_mut(&mut store, &input.user_id)?;
    if incoming.iter().any(|isbn| account.books.contains(isbn)) {
        return Err(already_in_collection());
    }
    account.books.extend(incoming.iter().cloned());
    let added = AddedBooks {
        books: incoming.into_iter().map(|isbn| Isbn { isbn }).collect(),
    };
    Ok((StatusCode::CREATED, Json(added)).into_response())
}

async fn replace_book(
    State(db): State<Db>,
    Path(current): Path<String>,
    headers: HeaderMap,
    Json(input): Json<UserIsbn>,
) -> Reply {
    let mut store = db.write().await;
    authorize(&store, &headers, &input.user_id)?;
    if store.book(&input.isbn).is_none() {
        return Err(not_in_catalog());
    }
    let account = account_mut(&mut store, &input.user_id)?;
    let position = account
        .books
        .iter()
        .position(|isbn| *isbn == current)
        .ok_or_else(not_in_collection)?;
    if account.books.contains(&input.isbn) {
        return Err(already_in_collection());
    }
    account.books[position] = input.isbn;
    let account = account.clone();
    Ok(Json(store.user_view(&account)).into_response())
}

async fn remove_book(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UserIsbn>,
) -> Reply {
    let mut store = db.write().await;
    authorize(&store, &headers, &input.user_id)?;
    let account = account_mut(&mut store, &input.user_id)?;
    let position = account
        .books
        .iter()
        .position(|isbn| *isbn == input.isbn)
        .ok_or_else(not_in_collection)?;
    account.books.remove(position);
    Ok(StatusCode::NO_CONTENT.into_response())
}
