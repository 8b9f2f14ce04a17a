use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, ItemId, ItemWithScore, SearchItems, UpdateItem};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(create_item, search_items, get_item, update_item, delete_item),
    components(
        schemas(Item, ItemId, ItemWithScore, CreateItem, UpdateItem, SearchItems),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Item storage and vector similarity search (Redis)")
    )
)]
pub struct ApiDoc;

/// Item routes, to be nested under `/items`
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_item))
        .route("/search", post(search_items))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(shared_service)
}

/// Create a new item
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.add(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Find the items nearest to a query embedding
#[utoipa::path(
    post,
    path = "/search",
    tag = "Items",
    request_body = SearchItems,
    responses(
        (status = 200, description = "Up to 5 items, closest first", body = Vec<ItemWithScore>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedJson(input): ValidatedJson<SearchItems>,
) -> ItemResult<Json<Vec<ItemWithScore>>> {
    let results = service.search(input).await?;
    Ok(Json(results))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(id): Path<String>,
) -> ItemResult<Json<Item>> {
    let item = service.get(&id).await?.ok_or(ItemError::NotFound(id))?;
    Ok(Json(item))
}

/// Replace every field of an item
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<Item>> {
    let item = service
        .update(&id, input)
        .await?
        .ok_or(ItemError::NotFound(id))?;
    Ok(Json(item))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = ItemId),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Path(id): Path<String>,
) -> ItemResult<Json<ItemId>> {
    let deleted = service.delete(&id).await?.ok_or(ItemError::NotFound(id))?;
    Ok(Json(deleted))
}
