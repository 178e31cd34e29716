//! Handlers for the `/achievement` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use schoolcms_core::content::validate_category;
use schoolcms_core::types::DbId;
use schoolcms_core::upload::UploadKind;
use schoolcms_core::validation::{check, parse_optional_date, require_text};
use schoolcms_db::entity::{Entity, EntityRepo};
use schoolcms_db::models::achievement::{Achievement, CreateAchievement, UpdateAchievement};
use schoolcms_db::repositories::AchievementRepo;
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
const KIND: UploadKind = UploadKind::AchievementImage;

#[derive(Debug, Validate)]
struct AchievementFields {
    #[validate(length(max = 255, message = "must not exceed 255 characters"))]
    student_name: Option<String>,
    #[validate(length(max = 255, message = "must not exceed 255 characters"))]
    title: Option<String>,
    description: Option<String>,
    date: Option<String>,
    category: Option<String>,
}

impl AchievementFields {
    fn from_form(form: &MultipartForm) -> Self {
        Self {
            student_name: plain(form.text("studentName")),
            title: plain(form.text("title")),
            description: rich(form.text("description")),
            date: form.text("date"),
            category: plain(form.text("category")),
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<Achievement>>>> {
    let rows = EntityRepo::list::<Achievement>(&state.pool, params.term()).await?;
    Ok(Json(ApiResponse::ok(rows, "Achievements retrieved successfully")))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Achievement>>> {
    let row = find_or_404::<Achievement>(&state, id).await?;
    Ok(Json(ApiResponse::ok(row, "Achievement retrieved successfully")))
}

/// POST /achievement/create
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut form: MultipartForm,
) -> AppResult<(StatusCode, Json<ApiResponse<Achievement>>)> {
    let fields = AchievementFields::from_form(&form);
    check(&fields)?;

    let student_name = require_text("studentName", fields.student_name)?;
    let title = require_text("title", fields.title)?;
    let description = require_text("description", fields.description)?;
    let category = require_text("category", fields.category)?;
    validate_category(&category)?;
    let date = parse_optional_date("date", fields.date.as_deref())?;

    let file = form.take_file(FILE_FIELD)?;
    let image = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = CreateAchievement {
        student_name,
        title,
        description,
        date,
        category,
        image: image.clone(),
    };
    let outcome = AchievementRepo::create(&state.pool, &input)
        .await
        .map_err(AppError::from);
    let row = state
        .uploads
        .settle(KIND, image.as_deref(), None, outcome)
        .await?;

    tracing::info!(id = row.id, user_id = user.user_id, "Achievement created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(row, "Achievement created successfully")),
    ))
}

/// PUT /achievement/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    mut form: MultipartForm,
) -> AppResult<Json<ApiResponse<Achievement>>> {
    let existing = find_or_404::<Achievement>(&state, id).await?;

    let fields = AchievementFields::from_form(&form);
    check(&fields)?;
    if let Some(category) = &fields.category {
        validate_category(category)?;
    }
    let date = parse_optional_date("date", fields.date.as_deref())?;

    let file = form.take_file(FILE_FIELD)?;
    let image = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = UpdateAchievement {
        student_name: fields.student_name,
        title: fields.title,
        description: fields.description,
        date,
        category: fields.category,
        image: image.clone(),
    };
    let outcome = updated_row(AchievementRepo::update(&state.pool, id, &input).await, id);
    let row = state
        .uploads
        .settle(KIND, image.as_deref(), existing.attachment(), outcome)
        .await?;

    tracing::info!(id, user_id = user.user_id, "Achievement updated");
    Ok(Json(ApiResponse::ok(row, "Achievement updated successfully")))
}

pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Achievement>>> {
    let row = delete_with_attachment::<Achievement>(&state, KIND, id).await?;
    Ok(Json(ApiResponse::ok(
        row,
        format!("Achievement with id {id} has been deleted"),
    )))
}
