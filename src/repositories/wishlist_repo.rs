//! Wishlist repository for async database operations.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::pool_error;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Page, PageRequest, SortDirection, Wishlist, WishlistData, WishlistSortKey};
use crate::schema::{users, wishlists};

/// Data access for wishlists.
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// Inserts when `id` is `None`, otherwise updates the row in place.
    /// Updating an id that has no row inserts a new row with a generated id.
    async fn save(&self, id: Option<i64>, data: WishlistData) -> AppResult<Wishlist>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Wishlist>>;

    /// One page ordered by the requested key, ties broken by ascending id.
    async fn find_all(&self, request: &PageRequest<WishlistSortKey>)
    -> AppResult<Page<Wishlist>>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Wishlists owned by the account with the given login, ordered by id.
    async fn find_by_current_user(&self, login: &str) -> AppResult<Vec<Wishlist>>;
}

/// PostgreSQL wishlist repository holding an async connection pool.
#[derive(Clone)]
pub struct PgWishlistRepository {
    pool: AsyncDbPool,
}

impl PgWishlistRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

/// Rows of the requested page, ordered by the sort key and then by id.
fn page_query(
    request: &PageRequest<WishlistSortKey>,
) -> wishlists::BoxedQuery<'static, Pg> {
    use WishlistSortKey::*;

    let query = wishlists::table.into_boxed();
    let query = match (request.sort.key, request.sort.direction) {
        (Id, SortDirection::Asc) => query.order_by(wishlists::id.asc()),
        (Id, SortDirection::Desc) => query.order_by(wishlists::id.desc()),
        (Name, SortDirection::Asc) => query.order_by(wishlists::name.asc()),
        (Name, SortDirection::Desc) => query.order_by(wishlists::name.desc()),
        (CreationDate, SortDirection::Asc) => query.order_by(wishlists::creation_date.asc()),
        (CreationDate, SortDirection::Desc) => query.order_by(wishlists::creation_date.desc()),
        (Hidden, SortDirection::Asc) => query.order_by(wishlists::hidden.asc()),
        (Hidden, SortDirection::Desc) => query.order_by(wishlists::hidden.desc()),
    };
    query
        .then_order_by(wishlists::id.asc())
        .limit(request.limit())
        .offset(request.offset())
}

#[async_trait]
impl WishlistRepository for PgWishlistRepository {
    async fn save(&self, id: Option<i64>, data: WishlistData) -> AppResult<Wishlist> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction(|conn| {
            async move {
                if let Some(wishlist_id) = id {
                    let updated = diesel::update(wishlists::table.find(wishlist_id))
                        .set(&data)
                        .returning(Wishlist::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                        .map_err(|e| {
                            DatabaseErrorConverter::convert_diesel_error(e, "update wishlist")
                        })?;
                    if let Some(wishlist) = updated {
                        return Ok::<_, AppError>(wishlist);
                    }
                }

                let wishlist = diesel::insert_into(wishlists::table)
                    .values(&data)
                    .returning(Wishlist::as_returning())
                    .get_result(conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(e, "insert wishlist")
                    })?;
                Ok(wishlist)
            }
            .scope_boxed()
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Wishlist>> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let wishlist = wishlists::table
                        .find(id)
                        .select(Wishlist::as_select())
                        .first(conn)
                        .await
                        .optional()
                        .map_err(|e| {
                            DatabaseErrorConverter::convert_diesel_error(e, "find wishlist")
                        })?;
                    Ok::<_, AppError>(wishlist)
                }
                .scope_boxed()
            })
            .await
    }

    async fn find_all(
        &self,
        request: &PageRequest<WishlistSortKey>,
    ) -> AppResult<Page<Wishlist>> {
        let request = *request;
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let content = page_query(&request)
                        .select(Wishlist::as_select())
                        .load(conn)
                        .await
                        .map_err(|e| {
                            DatabaseErrorConverter::convert_diesel_error(e, "list wishlists")
                        })?;
                    let total = wishlists::table
                        .count()
                        .get_result::<i64>(conn)
                        .await
                        .map_err(|e| {
                            DatabaseErrorConverter::convert_diesel_error(e, "count wishlists")
                        })?;
                    Ok::<_, AppError>(Page::new(content, total, &request))
                }
                .scope_boxed()
            })
            .await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction(|conn| {
            async move {
                let removed = diesel::delete(wishlists::table.find(id))
                    .execute(conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(e, "delete wishlist")
                    })?;
                Ok::<_, AppError>(removed > 0)
            }
            .scope_boxed()
        })
        .await
    }

    async fn find_by_current_user(&self, login: &str) -> AppResult<Vec<Wishlist>> {
        let login = login.to_owned();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let owned = wishlists::table
                        .inner_join(users::table)
                        .filter(users::login.eq(&login))
                        .select(Wishlist::as_select())
                        .order_by(wishlists::id.asc())
                        .load(conn)
                        .await
                        .map_err(|e| {
                            DatabaseErrorConverter::convert_diesel_error(
                                e,
                                "find wishlists by owner",
                            )
                        })?;
                    Ok::<_, AppError>(owned)
                }
                .scope_boxed()
            })
            .await
    }
}
