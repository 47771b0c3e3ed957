//! Wish resource handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::WISH_TAG;
use crate::api::dto::{ErrorResponse, PageParams, WishPayload, WishResponse};
use crate::api::headers;
use crate::error::{AppError, AppResult};
use crate::models::WishSortKey;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

const ENTITY_NAME: &str = "wish";
const BASE_URL: &str = "/api/wishes";

/// Creates wish routes.
///
/// Routes:
/// - POST /api/wishes         - Create a wish
/// - PUT /api/wishes          - Update (or create) a wish
/// - GET /api/wishes          - List wishes, paged
/// - GET /api/wishes/{id}     - Get a wish
/// - DELETE /api/wishes/{id}  - Delete a wish
pub fn wish_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_wish, update_wish, list_wishes))
        .routes(routes!(get_wish, delete_wish))
}

/// POST /api/wishes - Create a wish
///
/// Rejects bodies that already carry an id.
#[utoipa::path(
    post,
    path = "/api/wishes",
    tag = WISH_TAG,
    request_body = WishPayload,
    responses(
        (status = 201, description = "Wish created", body = WishResponse),
        (status = 400, description = "Id present or invalid body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_wish(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<WishPayload>,
) -> AppResult<Response> {
    tracing::debug!("REST request to save Wish : {:?}", payload);
    if payload.id.is_some() {
        return Err(AppError::id_exists(ENTITY_NAME));
    }
    create(&state, payload).await
}

async fn create(state: &AppState, payload: WishPayload) -> AppResult<Response> {
    let (_, data) = payload.into_parts()?;
    let wish = state.services.wishes.save(None, data).await?;

    let mut headers = headers::entity_created(ENTITY_NAME, wish.id);
    let location = format!("{BASE_URL}/{}", wish.id);
    if let Ok(value) = HeaderValue::from_str(&location) {
        headers.insert(header::LOCATION, value);
    }
    Ok((StatusCode::CREATED, headers, Json(WishResponse::from(wish))).into_response())
}

/// PUT /api/wishes - Update a wish
///
/// A body without an id is created instead. An id with no stored row is
/// saved as a new wish.
#[utoipa::path(
    put,
    path = "/api/wishes",
    tag = WISH_TAG,
    request_body = WishPayload,
    responses(
        (status = 200, description = "Wish updated", body = WishResponse),
        (status = 201, description = "Wish created", body = WishResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_wish(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<WishPayload>,
) -> AppResult<Response> {
    tracing::debug!("REST request to update Wish : {:?}", payload);
    if payload.id.is_none() {
        return create(&state, payload).await;
    }

    let (id, data) = payload.into_parts()?;
    let wish = state.services.wishes.save(id, data).await?;
    let headers = headers::entity_updated(ENTITY_NAME, wish.id);
    Ok((headers, Json(WishResponse::from(wish))).into_response())
}

/// GET /api/wishes - List wishes
///
/// The body is the bare page content; totals and links travel in headers.
#[utoipa::path(
    get,
    path = "/api/wishes",
    tag = WISH_TAG,
    params(PageParams),
    responses(
        (status = 200, description = "One page of wishes", body = Vec<WishResponse>),
        (status = 400, description = "Invalid paging or sort", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_wishes(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> AppResult<(HeaderMap, Json<Vec<WishResponse>>)> {
    tracing::debug!("REST request to get a page of Wishes");
    let request = params.into_page_request::<WishSortKey>()?;
    let page = state
        .services
        .wishes
        .find_all(&request)
        .await?
        .map(WishResponse::from);

    let headers = headers::pagination(&page, BASE_URL);
    Ok((headers, Json(page.content)))
}

/// GET /api/wishes/{id} - Get a wish
///
/// A missing wish answers 404 with no body.
#[utoipa::path(
    get,
    path = "/api/wishes/{id}",
    tag = WISH_TAG,
    params(("id" = i64, Path, description = "Wish id")),
    responses(
        (status = 200, description = "Wish found", body = WishResponse),
        (status = 404, description = "No wish with this id"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_wish(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Response> {
    tracing::debug!("REST request to get Wish : {}", id);
    let response = match state.services.wishes.find_one(id).await? {
        Some(wish) => Json(WishResponse::from(wish)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    };
    Ok(response)
}

/// DELETE /api/wishes/{id} - Delete a wish
#[utoipa::path(
    delete,
    path = "/api/wishes/{id}",
    tag = WISH_TAG,
    params(("id" = i64, Path, description = "Wish id")),
    responses(
        (status = 200, description = "Wish deleted, or already absent"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_wish(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, HeaderMap)> {
    tracing::debug!("REST request to delete Wish : {}", id);
    state.services.wishes.delete(id).await?;
    Ok((StatusCode::OK, headers::entity_deleted(ENTITY_NAME, id)))
}
