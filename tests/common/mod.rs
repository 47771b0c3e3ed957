//! In-memory repositories and request helpers for the HTTP contract tests.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use jiff::SignedDuration;
use serde_json::Value;
use tower::ServiceExt;

use wishstore::AppState;
use wishstore::api::routes::create_router;
use wishstore::config::JwtConfig;
use wishstore::error::{AppError, AppResult};
use wishstore::models::{
    Page, PageRequest, SortDirection, Wish, WishData, WishSortKey, Wishlist, WishlistData,
    WishlistSortKey,
};
use wishstore::repositories::{Repositories, WishRepository, WishlistRepository};
use wishstore::utils::jwt::generate_access_token;

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const LOGIN: &str = "alice";

#[derive(Default)]
struct Tables {
    wishes: BTreeMap<i64, Wish>,
    wishlists: BTreeMap<i64, Wishlist>,
    /// login -> user id
    users: BTreeMap<String, i64>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// One store backing both repositories, enforcing the foreign keys the
/// PostgreSQL schema declares.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// Delay applied before answering `WishRepository::find_by_id`
    latency: Mutex<Duration>,
}

fn constraint_violation(operation: &str, constraint: &str) -> AppError {
    AppError::Database {
        operation: operation.to_string(),
        source: anyhow::anyhow!("violates foreign key constraint {}", constraint),
    }
}

fn page_of<T: Clone, K>(
    mut rows: Vec<T>,
    request: &PageRequest<K>,
    compare: impl Fn(&T, &T) -> Ordering,
    id: impl Fn(&T) -> i64,
) -> Page<T> {
    rows.sort_by(|a, b| {
        let ordering = match request.sort.direction {
            SortDirection::Asc => compare(a, b),
            SortDirection::Desc => compare(b, a),
        };
        ordering.then_with(|| id(a).cmp(&id(b)))
    });
    let total = rows.len() as i64;
    let content = rows
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.limit() as usize)
        .collect();
    Page::new(content, total, request)
}

impl MemoryStore {
    pub fn add_user(&self, login: &str) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.users.insert(login.to_string(), id);
        id
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    pub fn wish_count(&self) -> usize {
        self.tables.lock().unwrap().wishes.len()
    }

    pub fn wishlist_count(&self) -> usize {
        self.tables.lock().unwrap().wishlists.len()
    }
}

#[async_trait]
impl WishRepository for MemoryStore {
    async fn save(&self, id: Option<i64>, data: WishData) -> AppResult<Wish> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(wishlist_id) = data.wishlist_id {
            if !tables.wishlists.contains_key(&wishlist_id) {
                return Err(constraint_violation("insert wish", "fk_wish_wishlist_id"));
            }
        }
        let id = match id {
            Some(id) if tables.wishes.contains_key(&id) => id,
            _ => tables.next_id(),
        };
        let wish = data.into_wish(id);
        tables.wishes.insert(id, wish.clone());
        Ok(wish)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Wish>> {
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        Ok(self.tables.lock().unwrap().wishes.get(&id).cloned())
    }

    async fn find_all(&self, request: &PageRequest<WishSortKey>) -> AppResult<Page<Wish>> {
        let rows: Vec<Wish> = self.tables.lock().unwrap().wishes.values().cloned().collect();
        let key = request.sort.key;
        Ok(page_of(
            rows,
            request,
            |a, b| match key {
                WishSortKey::Id => a.id.cmp(&b.id),
                WishSortKey::ProductId => a.product_id.cmp(&b.product_id),
                WishSortKey::Price => a.price.cmp(&b.price),
            },
            |w| w.id,
        ))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.lock().unwrap().wishes.remove(&id).is_some())
    }
}

#[async_trait]
impl WishlistRepository for MemoryStore {
    async fn save(&self, id: Option<i64>, data: WishlistData) -> AppResult<Wishlist> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user_id) = data.user_id {
            if !tables.users.values().any(|&u| u == user_id) {
                return Err(constraint_violation("insert wishlist", "fk_wishlist_user_id"));
            }
        }
        let id = match id {
            Some(id) if tables.wishlists.contains_key(&id) => id,
            _ => tables.next_id(),
        };
        let wishlist = data.into_wishlist(id);
        tables.wishlists.insert(id, wishlist.clone());
        Ok(wishlist)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Wishlist>> {
        Ok(self.tables.lock().unwrap().wishlists.get(&id).cloned())
    }

    async fn find_all(
        &self,
        request: &PageRequest<WishlistSortKey>,
    ) -> AppResult<Page<Wishlist>> {
        let rows: Vec<Wishlist> = self
            .tables
            .lock()
            .unwrap()
            .wishlists
            .values()
            .cloned()
            .collect();
        let key = request.sort.key;
        Ok(page_of(
            rows,
            request,
            |a, b| match key {
                WishlistSortKey::Id => a.id.cmp(&b.id),
                WishlistSortKey::Name => a.name.cmp(&b.name),
                WishlistSortKey::CreationDate => a
                    .creation_date
                    .map(|d| d.to_jiff())
                    .cmp(&b.creation_date.map(|d| d.to_jiff())),
                WishlistSortKey::Hidden => a.hidden.cmp(&b.hidden),
            },
            |w| w.id,
        ))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        if tables.wishes.values().any(|w| w.wishlist_id == Some(id)) {
            return Err(constraint_violation("delete wishlist", "fk_wish_wishlist_id"));
        }
        Ok(tables.wishlists.remove(&id).is_some())
    }

    async fn find_by_current_user(&self, login: &str) -> AppResult<Vec<Wishlist>> {
        let tables = self.tables.lock().unwrap();
        let Some(&user_id) = tables.users.get(login) else {
            return Ok(Vec::new());
        };
        Ok(tables
            .wishlists
            .values()
            .filter(|w| w.user_id == Some(user_id))
            .cloned()
            .collect())
    }
}

/// Router over a fresh store, plus the store for direct inspection.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(5))
    }

    pub fn with_timeout(request_timeout: Duration) -> Self {
        let store = Arc::new(MemoryStore::default());
        let repos = Repositories::from_parts(store.clone(), store.clone());
        let jwt = JwtConfig {
            secret: SECRET.to_string(),
            leeway: 0,
        };
        let router = create_router(
            AppState::from_repositories(repos, jwt),
            request_timeout,
        );
        Self { router, store }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(authorized(Request::get(uri)).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_as(&self, uri: &str, login: &str) -> Response<Body> {
        let request = Request::get(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token(login)))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(authorized(Request::delete(uri)).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(json_request(Request::post(uri), body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(json_request(Request::put(uri), body)).await
    }
}

pub fn token(login: &str) -> String {
    generate_access_token(login, SECRET, SignedDuration::from_hours(1)).unwrap()
}

fn authorized(builder: axum::http::request::Builder) -> axum::http::request::Builder {
    builder.header(header::AUTHORIZATION, format!("Bearer {}", token(LOGIN)))
}

fn json_request(builder: axum::http::request::Builder, body: Value) -> Request<Body> {
    authorized(builder)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header_str<'a>(response: &'a Response<Body>, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing header {name}"))
        .to_str()
        .unwrap()
}

pub fn assert_status(response: &Response<Body>, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}
