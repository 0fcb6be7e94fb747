use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{ItemFilter, ItemId, NewOutfit, NewWardrobeItem, OutfitId, UserId};
use super::repository::{RepositoryError, WardrobeRepository};
use super::rules::DEFAULT_OCCASION;
use super::service::{WardrobeService, WardrobeServiceError};
use super::suggestions::OutfitSuggestion;
use crate::weather::WeatherSnapshot;

/// Router builder exposing the wardrobe, outfit, and suggestion endpoints.
pub fn wardrobe_router<R>(service: Arc<WardrobeService<R>>) -> Router
where
    R: WardrobeRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/wardrobe/:user_id/items",
            get(list_items_handler::<R>).post(add_item_handler::<R>),
        )
        .route(
            "/api/v1/wardrobe/:user_id/items/:item_id",
            get(item_handler::<R>).delete(remove_item_handler::<R>),
        )
        .route(
            "/api/v1/wardrobe/:user_id/items/:item_id/notes",
            post(notes_handler::<R>),
        )
        .route(
            "/api/v1/wardrobe/:user_id/items/:item_id/favorite",
            post(toggle_favorite_handler::<R>),
        )
        .route(
            "/api/v1/wardrobe/:user_id/items/:item_id/worn",
            post(mark_worn_handler::<R>),
        )
        .route("/api/v1/wardrobe/:user_id/import", post(import_handler::<R>))
        .route(
            "/api/v1/wardrobe/:user_id/dashboard",
            get(dashboard_handler::<R>),
        )
        .route(
            "/api/v1/wardrobe/:user_id/outfits",
            get(list_outfits_handler::<R>).post(create_outfit_handler::<R>),
        )
        .route(
            "/api/v1/wardrobe/:user_id/outfits/:outfit_id",
            get(outfit_handler::<R>),
        )
        .route(
            "/api/v1/wardrobe/:user_id/outfits/:outfit_id/worn",
            post(mark_outfit_worn_handler::<R>),
        )
        .route(
            "/api/v1/wardrobe/:user_id/suggestions",
            post(suggest_handler::<R>),
        )
        .route(
            "/api/v1/wardrobe/:user_id/suggestions/save",
            post(save_suggestion_handler::<R>),
        )
        .route(
            "/api/v1/wardrobe/:user_id/weather",
            post(weather_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestOutfitsRequest {
    #[serde(default = "default_occasion")]
    pub(crate) occasion: String,
    #[serde(default)]
    pub(crate) season: String,
    #[serde(default)]
    pub(crate) style: String,
}

fn default_occasion() -> String {
    DEFAULT_OCCASION.to_string()
}

#[derive(Debug, Serialize)]
pub(crate) struct SuggestOutfitsResponse {
    pub(crate) occasion: String,
    pub(crate) season: String,
    pub(crate) style: String,
    pub(crate) suggestions: Vec<OutfitSuggestion>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NotesRequest {
    #[serde(default)]
    pub(crate) description: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WornQuery {
    #[serde(default)]
    pub(crate) on: Option<NaiveDate>,
}

impl WornQuery {
    fn date(&self) -> NaiveDate {
        self.on.unwrap_or_else(|| Local::now().date_naive())
    }
}

pub(crate) async fn list_items_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path(user_id): Path<u64>,
    Query(filter): Query<ItemFilter>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.list_items(UserId(user_id), &filter) {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn add_item_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path(user_id): Path<u64>,
    Json(new_item): Json<NewWardrobeItem>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.add_item(UserId(user_id), new_item) {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn item_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path((user_id, item_id)): Path<(u64, u64)>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.get_item(UserId(user_id), ItemId(item_id)) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn remove_item_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path((user_id, item_id)): Path<(u64, u64)>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.remove_item(UserId(user_id), ItemId(item_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn notes_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path((user_id, item_id)): Path<(u64, u64)>,
    Json(request): Json<NotesRequest>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.update_notes(UserId(user_id), ItemId(item_id), request.description) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn toggle_favorite_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path((user_id, item_id)): Path<(u64, u64)>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.toggle_favorite(UserId(user_id), ItemId(item_id)) {
        Ok(favorite) => (
            StatusCode::OK,
            Json(json!({ "success": true, "favorite": favorite })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn mark_worn_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path((user_id, item_id)): Path<(u64, u64)>,
    Query(query): Query<WornQuery>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.mark_worn(UserId(user_id), ItemId(item_id), query.date()) {
        Ok(times_worn) => (
            StatusCode::OK,
            Json(json!({ "success": true, "times_worn": times_worn })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn import_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path(user_id): Path<u64>,
    body: String,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.import_items(UserId(user_id), Cursor::new(body.into_bytes())) {
        Ok(summary) => (StatusCode::CREATED, Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn dashboard_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.dashboard(UserId(user_id)) {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_outfits_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.list_outfits(UserId(user_id)) {
        Ok(outfits) => (StatusCode::OK, Json(outfits)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_outfit_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path(user_id): Path<u64>,
    Json(request): Json<NewOutfit>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.create_outfit(UserId(user_id), request) {
        Ok(outfit) => (StatusCode::CREATED, Json(outfit)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn outfit_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path((user_id, outfit_id)): Path<(u64, u64)>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.get_outfit(UserId(user_id), OutfitId(outfit_id)) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn mark_outfit_worn_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path((user_id, outfit_id)): Path<(u64, u64)>,
    Query(query): Query<WornQuery>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.mark_outfit_worn(UserId(user_id), OutfitId(outfit_id), query.date()) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn suggest_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path(user_id): Path<u64>,
    Json(request): Json<SuggestOutfitsRequest>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    let SuggestOutfitsRequest {
        occasion,
        season,
        style,
    } = request;

    match service
        .suggest_outfits(UserId(user_id), &occasion, &season, &style)
        .await
    {
        Ok(suggestions) => (
            StatusCode::OK,
            Json(SuggestOutfitsResponse {
                occasion,
                season,
                style,
                suggestions,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn save_suggestion_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path(user_id): Path<u64>,
    Json(request): Json<NewOutfit>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.save_suggestion(UserId(user_id), request) {
        Ok(outfit) => (StatusCode::CREATED, Json(outfit)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn weather_handler<R>(
    State(service): State<Arc<WardrobeService<R>>>,
    Path(user_id): Path<u64>,
    Json(snapshot): Json<WeatherSnapshot>,
) -> Response
where
    R: WardrobeRepository + 'static,
{
    match service.weather_recommendation(UserId(user_id), &snapshot) {
        Ok(recommendation) => (StatusCode::OK, Json(recommendation)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: WardrobeServiceError) -> Response {
    let status = match &err {
        WardrobeServiceError::ItemNotFound(_)
        | WardrobeServiceError::OutfitNotFound(_)
        | WardrobeServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        WardrobeServiceError::DuplicateItem(_)
        | WardrobeServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        WardrobeServiceError::Validation(_)
        | WardrobeServiceError::EmptyWardrobe
        | WardrobeServiceError::Import(_) => StatusCode::UNPROCESSABLE_ENTITY,
        WardrobeServiceError::Suggestion(_) => StatusCode::BAD_GATEWAY,
        WardrobeServiceError::Repository(RepositoryError::Unavailable(_)) => {
            error!(error = %err, "wardrobe repository unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
