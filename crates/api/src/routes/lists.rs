//! Favorite list and membership handlers.
//!
//! Every handler runs behind the identity middleware and acts for the
//! [`RequireUser`] it resolved.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::extract::{self, AddProductRequest, ApiJson, CreateListRequest, UpdateListRequest};
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::models::{FavoriteList, FavoriteListWithProducts};
use crate::services::{FavoriteListService, ListProductService};
use crate::state::AppState;

fn lists(state: &AppState) -> FavoriteListService<'_> {
    FavoriteListService::new(state.store(), state.products())
}

/// GET /api/lists
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<FavoriteList>>> {
    Ok(Json(lists(&state).list_all(user.id).await?))
}

/// POST /api/lists
pub async fn store(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiJson(body): ApiJson<CreateListRequest>,
) -> Result<(StatusCode, Json<FavoriteList>)> {
    let name = body.validate()?;
    let list = lists(&state).create(user.id, &name).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// GET /api/lists/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<FavoriteListWithProducts>> {
    let list_id = extract::list_id(&id)?;
    Ok(Json(lists(&state).get_with_products(user.id, list_id).await?))
}

/// PUT /api/lists/{id}
///
/// An unknown list is reported before body validation so a foreign list ID
/// never reveals more than a 404.
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateListRequest>,
) -> Result<Json<FavoriteList>> {
    let list_id = extract::list_id(&id)?;
    let service = lists(&state);
    service.get(user.id, list_id).await?;

    let name = body.validate()?;
    Ok(Json(service.rename(user.id, list_id, &name).await?))
}

/// DELETE /api/lists/{id}
pub async fn destroy(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let list_id = extract::list_id(&id)?;
    lists(&state).soft_delete(user.id, list_id).await?;
    Ok(Json(json!({ "message": "List deleted" })))
}

/// POST /api/lists/{id}/products
///
/// 201 when the SKU was added, 200 when it was already on the list.
pub async fn add_product(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<AddProductRequest>,
) -> Result<Response> {
    let list_id = extract::list_id(&id)?;
    let sku = body.validate()?;

    let added = ListProductService::new(state.store())
        .add_product(user.id, list_id, &sku)
        .await?;

    let status = if added.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(added.product)).into_response())
}

/// DELETE /api/lists/{id}/products/{sku}
pub async fn remove_product(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((id, sku)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>> {
    let list_id = extract::list_id(&id)?;
    let sku = extract::sku(&sku)?;

    ListProductService::new(state.store())
        .remove_product(user.id, list_id, &sku)
        .await?;
    Ok(Json(json!({ "message": "Product removed from list" })))
}
