//! Wish repository for async database operations.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::pool_error;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Page, PageRequest, SortDirection, Wish, WishData, WishSortKey};
use crate::schema::wishes;

/// Data access for wishes.
#[async_trait]
pub trait WishRepository: Send + Sync {
    /// Inserts when `id` is `None`, otherwise updates the row in place.
    /// Updating an id that has no row inserts a new row with a generated id.
    async fn save(&self, id: Option<i64>, data: WishData) -> AppResult<Wish>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Wish>>;

    /// One page ordered by the requested key, ties broken by ascending id.
    async fn find_all(&self, request: &PageRequest<WishSortKey>) -> AppResult<Page<Wish>>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// PostgreSQL wish repository holding an async connection pool.
#[derive(Clone)]
pub struct PgWishRepository {
    pool: AsyncDbPool,
}

impl PgWishRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

/// Rows of the requested page, ordered by the sort key and then by id.
fn page_query(request: &PageRequest<WishSortKey>) -> wishes::BoxedQuery<'static, Pg> {
    let query = wishes::table.into_boxed();
    let query = match (request.sort.key, request.sort.direction) {
        (WishSortKey::Id, SortDirection::Asc) => query.order_by(wishes::id.asc()),
        (WishSortKey::Id, SortDirection::Desc) => query.order_by(wishes::id.desc()),
        (WishSortKey::ProductId, SortDirection::Asc) => query.order_by(wishes::product_id.asc()),
        (WishSortKey::ProductId, SortDirection::Desc) => {
            query.order_by(wishes::product_id.desc())
        }
        (WishSortKey::Price, SortDirection::Asc) => query.order_by(wishes::price.asc()),
        (WishSortKey::Price, SortDirection::Desc) => query.order_by(wishes::price.desc()),
    };
    query
        .then_order_by(wishes::id.asc())
        .limit(request.limit())
        .offset(request.offset())
}

#[async_trait]
impl WishRepository for PgWishRepository {
    async fn save(&self, id: Option<i64>, data: WishData) -> AppResult<Wish> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction(|conn| {
            async move {
                if let Some(wish_id) = id {
                    let updated = diesel::update(wishes::table.find(wish_id))
                        .set(&data)
                        .returning(Wish::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update wish"))?;
                    if let Some(wish) = updated {
                        return Ok::<_, AppError>(wish);
                    }
                }

                let wish = diesel::insert_into(wishes::table)
                    .values(&data)
                    .returning(Wish::as_returning())
                    .get_result(conn)
                    .await
                    .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert wish"))?;
                Ok(wish)
            }
            .scope_boxed()
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Wish>> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let wish = wishes::table
                        .find(id)
                        .select(Wish::as_select())
                        .first(conn)
                        .await
                        .optional()
                        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find wish"))?;
                    Ok::<_, AppError>(wish)
                }
                .scope_boxed()
            })
            .await
    }

    async fn find_all(&self, request: &PageRequest<WishSortKey>) -> AppResult<Page<Wish>> {
        let request = *request;
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let content = page_query(&request)
                        .select(Wish::as_select())
                        .load(conn)
                        .await
                        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list wishes"))?;
                    let total = wishes::table
                        .count()
                        .get_result::<i64>(conn)
                        .await
                        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "count wishes"))?;
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
                let removed = diesel::delete(wishes::table.find(id))
                    .execute(conn)
                    .await
                    .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete wish"))?;
                Ok::<_, AppError>(removed > 0)
            }
            .scope_boxed()
        })
        .await
    }
}
