//! Handlers for the `/news` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use schoolcms_core::types::DbId;
use schoolcms_core::upload::UploadKind;
use schoolcms_core::validation::{check, parse_optional_date, require_text};
use schoolcms_db::entity::{Entity, EntityRepo};
use schoolcms_db::models::news::{CreateNews, News, UpdateNews};
use schoolcms_db::repositories::NewsRepo;
use validator::Validate;

use super::{delete_with_attachment, find_or_404, plain, rich, updated_row};
use crate::error::{AppError, AppResult};
use crate::extract::{Path, Query};
use crate::form::MultipartForm;
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::response::ApiResponse;
use crate::state::AppState;

const FILE_FIELD: &str = "picture";
const KIND: UploadKind = UploadKind::NewsImage;

/// Normalised text fields of a news form.
#[derive(Debug, Validate)]
struct NewsFields {
    #[validate(length(max = 255, message = "must not exceed 255 characters"))]
    title: Option<String>,
    content: Option<String>,
    date: Option<String>,
}

impl NewsFields {
    fn from_form(form: &MultipartForm) -> Self {
        Self {
            title: plain(form.text("title")),
            content: rich(form.text("content")),
            date: form.text("date"),
        }
    }
}

/// GET /news?search=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<News>>>> {
    let rows = EntityRepo::list::<News>(&state.pool, params.term()).await?;
    Ok(Json(ApiResponse::ok(rows, "News retrieved successfully")))
}

/// GET /news/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<News>>> {
    let row = find_or_404::<News>(&state, id).await?;
    Ok(Json(ApiResponse::ok(row, "News retrieved successfully")))
}

/// POST /news/create
///
/// The caller becomes the article's author. `date` defaults to now.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    mut form: MultipartForm,
) -> AppResult<(StatusCode, Json<ApiResponse<News>>)> {
    let fields = NewsFields::from_form(&form);
    check(&fields)?;

    let title = require_text("title", fields.title)?;
    let content = require_text("content", fields.content)?;
    let date = parse_optional_date("date", fields.date.as_deref())?;

    let file = form.take_file(FILE_FIELD)?;
    let image = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = CreateNews {
        title,
        content,
        date,
        image: image.clone(),
        author_id: Some(admin.user_id),
    };
    let outcome = NewsRepo::create(&state.pool, &input)
        .await
        .map_err(AppError::from);
    let row = state
        .uploads
        .settle(KIND, image.as_deref(), None, outcome)
        .await?;

    tracing::info!(id = row.id, author_id = admin.user_id, "News created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(row, "News created successfully")),
    ))
}

/// PUT /news/{id}
///
/// Omitted fields keep their value. A new `picture` replaces the old file.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    mut form: MultipartForm,
) -> AppResult<Json<ApiResponse<News>>> {
    let existing = find_or_404::<News>(&state, id).await?;

    let fields = NewsFields::from_form(&form);
    check(&fields)?;
    let date = parse_optional_date("date", fields.date.as_deref())?;

    let file = form.take_file(FILE_FIELD)?;
    let image = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = UpdateNews {
        title: fields.title,
        content: fields.content,
        date,
        image: image.clone(),
    };
    let outcome = updated_row(NewsRepo::update(&state.pool, id, &input).await, id);
    let row = state
        .uploads
        .settle(KIND, image.as_deref(), existing.attachment(), outcome)
        .await?;

    tracing::info!(id, user_id = admin.user_id, "News updated");
    Ok(Json(ApiResponse::ok(row, "News updated successfully")))
}

/// DELETE /news/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<News>>> {
    let row = delete_with_attachment::<News>(&state, KIND, id).await?;
    Ok(Json(ApiResponse::ok(row, format!("News with id {id} has been deleted"))))
}
