//! Wishlist resource handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::WISHLIST_TAG;
use crate::api::dto::{ErrorResponse, PageParams, WishlistPayload, WishlistResponse};
use crate::api::headers;
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::WishlistSortKey;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

const ENTITY_NAME: &str = "wishlist";
const BASE_URL: &str = "/api/wishlists";

/// Creates wishlist routes.
///
/// Routes:
/// - POST /api/wishlists         - Create a wishlist
/// - PUT /api/wishlists          - Update (or create) a wishlist
/// - GET /api/wishlists          - List wishlists, paged
/// - GET /api/wishlists/mine     - Wishlists of the caller
/// - GET /api/wishlists/{id}     - Get a wishlist
/// - DELETE /api/wishlists/{id}  - Delete a wishlist
pub fn wishlist_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_wishlist, update_wishlist, list_wishlists))
        .routes(routes!(list_my_wishlists))
        .routes(routes!(get_wishlist, delete_wishlist))
}

/// POST /api/wishlists - Create a wishlist
#[utoipa::path(
    post,
    path = "/api/wishlists",
    tag = WISHLIST_TAG,
    request_body = WishlistPayload,
    responses(
        (status = 201, description = "Wishlist created", body = WishlistResponse),
        (status = 400, description = "Id present or invalid body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_wishlist(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<WishlistPayload>,
) -> AppResult<Response> {
    tracing::debug!("REST request to save Wishlist : {:?}", payload);
    if payload.id.is_some() {
        return Err(AppError::id_exists(ENTITY_NAME));
    }
    create(&state, payload).await
}

async fn create(state: &AppState, payload: WishlistPayload) -> AppResult<Response> {
    let (_, data) = payload.into_parts()?;
    let wishlist = state.services.wishlists.save(None, data).await?;

    let mut headers = headers::entity_created(ENTITY_NAME, wishlist.id);
    if let Ok(value) = HeaderValue::from_str(&format!("{BASE_URL}/{}", wishlist.id)) {
        headers.insert(header::LOCATION, value);
    }
    Ok((
        StatusCode::CREATED,
        headers,
        Json(WishlistResponse::from(wishlist)),
    )
        .into_response())
}

/// PUT /api/wishlists - Update a wishlist
///
/// Without an id the body is created, as with POST.
#[utoipa::path(
    put,
    path = "/api/wishlists",
    tag = WISHLIST_TAG,
    request_body = WishlistPayload,
    responses(
        (status = 200, description = "Wishlist updated", body = WishlistResponse),
        (status = 201, description = "Wishlist created", body = WishlistResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_wishlist(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<WishlistPayload>,
) -> AppResult<Response> {
    tracing::debug!("REST request to update Wishlist : {:?}", payload);
    if payload.id.is_none() {
        return create(&state, payload).await;
    }

    let (id, data) = payload.into_parts()?;
    let wishlist = state.services.wishlists.save(id, data).await?;
    Ok((
        headers::entity_updated(ENTITY_NAME, wishlist.id),
        Json(WishlistResponse::from(wishlist)),
    )
        .into_response())
}

/// GET /api/wishlists - List wishlists
#[utoipa::path(
    get,
    path = "/api/wishlists",
    tag = WISHLIST_TAG,
    params(PageParams),
    responses(
        (status = 200, description = "One page of wishlists", body = Vec<WishlistResponse>),
        (status = 400, description = "Invalid paging or sort", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_wishlists(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> AppResult<(HeaderMap, Json<Vec<WishlistResponse>>)> {
    tracing::debug!("REST request to get a page of Wishlists");
    let request = params.into_page_request::<WishlistSortKey>()?;
    let page = state
        .services
        .wishlists
        .find_all(&request)
        .await?
        .map(WishlistResponse::from);

    Ok((headers::pagination(&page, BASE_URL), Json(page.content)))
}

/// GET /api/wishlists/mine - Wishlists owned by the caller
#[utoipa::path(
    get,
    path = "/api/wishlists/mine",
    tag = WISHLIST_TAG,
    responses(
        (status = 200, description = "Wishlists of the authenticated user", body = Vec<WishlistResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_my_wishlists(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<WishlistResponse>>> {
    tracing::debug!("REST request to get Wishlists of {}", auth_user.login);
    let wishlists = state
        .services
        .wishlists
        .find_by_current_user(&auth_user.login)
        .await?;
    Ok(Json(
        wishlists.into_iter().map(WishlistResponse::from).collect(),
    ))
}

/// GET /api/wishlists/{id} - Get a wishlist
#[utoipa::path(
    get,
    path = "/api/wishlists/{id}",
    tag = WISHLIST_TAG,
    params(("id" = i64, Path, description = "Wishlist id")),
    responses(
        (status = 200, description = "Wishlist found", body = WishlistResponse),
        (status = 404, description = "No wishlist with this id"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_wishlist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    tracing::debug!("REST request to get Wishlist : {}", id);
    Ok(match state.services.wishlists.find_one(id).await? {
        Some(wishlist) => Json(WishlistResponse::from(wishlist)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

/// DELETE /api/wishlists/{id} - Delete a wishlist
///
/// Fails with 500 while wishes still reference the wishlist.
#[utoipa::path(
    delete,
    path = "/api/wishlists/{id}",
    tag = WISHLIST_TAG,
    params(("id" = i64, Path, description = "Wishlist id")),
    responses(
        (status = 200, description = "Wishlist deleted, or already absent"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Wishlist still referenced", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_wishlist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, HeaderMap)> {
    tracing::debug!("REST request to delete Wishlist : {}", id);
    state.services.wishlists.delete(id).await?;
    Ok((StatusCode::OK, headers::entity_deleted(ENTITY_NAME, id)))
}
