//! Handlers for the `/school-activity` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use schoolcms_core::types::DbId;
use schoolcms_core::upload::UploadKind;
use schoolcms_core::validation::{check, parse_optional_date, require_text};
use schoolcms_db::entity::{Entity, EntityRepo};
use schoolcms_db::models::school_activity::{
    CreateSchoolActivity, SchoolActivity, UpdateSchoolActivity,
};
use schoolcms_db::repositories::SchoolActivityRepo;
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
const KIND: UploadKind = UploadKind::SchoolActivityImage;

#[derive(Debug, Validate)]
struct ActivityFields {
    #[validate(length(max = 255, message = "must not exceed 255 characters"))]
    title: Option<String>,
    description: Option<String>,
    date: Option<String>,
    /// Link to a video or gallery hosted elsewhere.
    #[validate(length(max = 1024, message = "must not exceed 1024 characters"))]
    media: Option<String>,
}

impl ActivityFields {
    fn from_form(form: &MultipartForm) -> Self {
        Self {
            title: plain(form.text("title")),
            description: rich(form.text("description")),
            date: form.text("date"),
            media: plain(form.text("media")),
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<SchoolActivity>>>> {
    let rows = EntityRepo::list::<SchoolActivity>(&state.pool, params.term()).await?;
    Ok(Json(ApiResponse::ok(rows, "School activities retrieved successfully")))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<SchoolActivity>>> {
    let row = find_or_404::<SchoolActivity>(&state, id).await?;
    Ok(Json(ApiResponse::ok(row, "School activity retrieved successfully")))
}

pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut form: MultipartForm,
) -> AppResult<(StatusCode, Json<ApiResponse<SchoolActivity>>)> {
    let fields = ActivityFields::from_form(&form);
    check(&fields)?;

    let title = require_text("title", fields.title)?;
    let description = require_text("description", fields.description)?;
    let date = parse_optional_date("date", fields.date.as_deref())?;

    let file = form.take_file(FILE_FIELD)?;
    let image = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = CreateSchoolActivity {
        title,
        description,
        date,
        media: fields.media,
        image: image.clone(),
    };
    let outcome = SchoolActivityRepo::create(&state.pool, &input)
        .await
        .map_err(AppError::from);
    let row = state
        .uploads
        .settle(KIND, image.as_deref(), None, outcome)
        .await?;

    tracing::info!(id = row.id, user_id = user.user_id, "School activity created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(row, "School activity created successfully")),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    mut form: MultipartForm,
) -> AppResult<Json<ApiResponse<SchoolActivity>>> {
    let existing = find_or_404::<SchoolActivity>(&state, id).await?;

    let fields = ActivityFields::from_form(&form);
    check(&fields)?;
    let date = parse_optional_date("date", fields.date.as_deref())?;

    let file = form.take_file(FILE_FIELD)?;
    let image = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = UpdateSchoolActivity {
        title: fields.title,
        description: fields.description,
        date,
        media: fields.media,
        image: image.clone(),
    };
    let outcome = updated_row(SchoolActivityRepo::update(&state.pool, id, &input).await, id);
    let row = state
        .uploads
        .settle(KIND, image.as_deref(), existing.attachment(), outcome)
        .await?;

    tracing::info!(id, user_id = user.user_id, "School activity updated");
    Ok(Json(ApiResponse::ok(row, "School activity updated successfully")))
}

pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<SchoolActivity>>> {
    let row = delete_with_attachment::<SchoolActivity>(&state, KIND, id).await?;
    Ok(Json(ApiResponse::ok(
        row,
        format!("School activity with id {id} has been deleted"),
    )))
}
