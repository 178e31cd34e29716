//! Handlers for the `/event` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use schoolcms_core::types::DbId;
use schoolcms_core::upload::UploadKind;
use schoolcms_core::validation::{check, parse_optional_date, require_text};
use schoolcms_db::entity::{Entity, EntityRepo};
use schoolcms_db::models::event::{CreateEvent, Event, UpdateEvent};
use schoolcms_db::repositories::EventRepo;
use validator::Validate;

use super::{delete_with_attachment, find_or_404, plain, rich, updated_row};
use crate::error::{AppError, AppResult};
use crate::extract::{Path, Query};
use crate::form::MultipartForm;
use crate::middleware::rbac::RequireAuth;
use crate::query::SearchParams;
use crate::response::ApiResponse;
use crate::state::AppState;

const FILE_FIELD: &str = "image";
const KIND: UploadKind = UploadKind::EventImage;

#[derive(Debug, Validate)]
struct EventFields {
    #[validate(length(max = 255, message = "must not exceed 255 characters"))]
    title: Option<String>,
    date: Option<String>,
    #[validate(length(max = 255, message = "must not exceed 255 characters"))]
    location: Option<String>,
    description: Option<String>,
}

impl EventFields {
    fn from_form(form: &MultipartForm) -> Self {
        Self {
            title: plain(form.text("title")),
            date: form.text("date"),
            location: plain(form.text("location")),
            description: rich(form.text("description")),
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<Event>>>> {
    let rows = EntityRepo::list::<Event>(&state.pool, params.term()).await?;
    Ok(Json(ApiResponse::ok(rows, "Events retrieved successfully")))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Event>>> {
    let row = find_or_404::<Event>(&state, id).await?;
    Ok(Json(ApiResponse::ok(row, "Event retrieved successfully")))
}

pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut form: MultipartForm,
) -> AppResult<(StatusCode, Json<ApiResponse<Event>>)> {
    let fields = EventFields::from_form(&form);
    check(&fields)?;

    let title = require_text("title", fields.title)?;
    let location = require_text("location", fields.location)?;
    let description = require_text("description", fields.description)?;
    let date = parse_optional_date("date", fields.date.as_deref())?;

    let file = form.take_file(FILE_FIELD)?;
    let image = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = CreateEvent {
        title,
        date,
        location,
        description,
        image: image.clone(),
    };
    let outcome = EventRepo::create(&state.pool, &input)
        .await
        .map_err(AppError::from);
    let row = state
        .uploads
        .settle(KIND, image.as_deref(), None, outcome)
        .await?;

    tracing::info!(id = row.id, user_id = user.user_id, "Event created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(row, "Event created successfully")),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    mut form: MultipartForm,
) -> AppResult<Json<ApiResponse<Event>>> {
    let existing = find_or_404::<Event>(&state, id).await?;

    let fields = EventFields::from_form(&form);
    check(&fields)?;
    let date = parse_optional_date("date", fields.date.as_deref())?;

    let file = form.take_file(FILE_FIELD)?;
    let image = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = UpdateEvent {
        title: fields.title,
        date,
        location: fields.location,
        description: fields.description,
        image: image.clone(),
    };
    let outcome = updated_row(EventRepo::update(&state.pool, id, &input).await, id);
    let row = state
        .uploads
        .settle(KIND, image.as_deref(), existing.attachment(), outcome)
        .await?;

    tracing::info!(id, user_id = user.user_id, "Event updated");
    Ok(Json(ApiResponse::ok(row, "Event updated successfully")))
}

pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Event>>> {
    let row = delete_with_attachment::<Event>(&state, KIND, id).await?;
    Ok(Json(ApiResponse::ok(row, format!("Event with id {id} has been deleted"))))
}
