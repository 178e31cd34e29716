//! Handlers for the `/teacher` resource.
//!
//! Listing is limited to staff; every mutation requires an admin. A teacher's
//! photo is either an uploaded file or an external URL sent as the `photo`
//! text field.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use schoolcms_core::error::CoreError;
use schoolcms_core::types::DbId;
use schoolcms_core::upload::UploadKind;
use schoolcms_core::validation::{check, optional_text, require_text};
use schoolcms_db::entity::{Entity, EntityRepo};
use schoolcms_db::models::teacher::{CreateTeacher, Teacher, UpdateTeacher};
use schoolcms_db::repositories::TeacherRepo;
use validator::Validate;

use super::{delete_with_attachment, find_or_404, plain, updated_row};
use crate::error::{AppError, AppResult};
use crate::extract::{Path, Query};
use crate::form::MultipartForm;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::SearchParams;
use crate::response::ApiResponse;
use crate::state::AppState;

const FILE_FIELD: &str = "photo";
const KIND: UploadKind = UploadKind::TeacherPhoto;

#[derive(Debug, Validate)]
struct TeacherFields {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    name: Option<String>,
    #[validate(length(max = 255, message = "must not exceed 255 characters"))]
    subject: Option<String>,
    /// External photo URL, used only when no file is uploaded.
    #[validate(length(max = 2048, message = "must not exceed 2048 characters"))]
    photo_url: Option<String>,
}

impl TeacherFields {
    fn from_form(form: &MultipartForm) -> Result<Self, CoreError> {
        let photo_url = optional_text(form.text("photo"));
        if let Some(url) = &photo_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CoreError::Validation(
                    "photo must be an http(s) URL or an uploaded file".into(),
                ));
            }
        }
        Ok(Self {
            name: plain(form.text("name")),
            subject: plain(form.text("subject")),
            photo_url,
        })
    }
}

/// Upload the photo file if one was sent, otherwise fall back to the URL field.
///
/// Returns `(reference to store, staged upload to clean up on failure)`.
async fn resolve_photo(
    state: &AppState,
    form: &mut MultipartForm,
    photo_url: Option<String>,
) -> AppResult<(Option<String>, Option<String>)> {
    match form.take_file(FILE_FIELD)? {
        Some(file) => {
            let stored = state.uploads.store(KIND, &file).await?;
            Ok((Some(stored.clone()), Some(stored)))
        }
        None => Ok((photo_url, None)),
    }
}

pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<Teacher>>>> {
    let rows = EntityRepo::list::<Teacher>(&state.pool, params.term()).await?;
    Ok(Json(ApiResponse::ok(rows, "Teachers retrieved successfully")))
}

pub async fn get(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Teacher>>> {
    let row = find_or_404::<Teacher>(&state, id).await?;
    Ok(Json(ApiResponse::ok(row, "Teacher retrieved successfully")))
}

/// POST /teacher/create (also POST /teacher)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    mut form: MultipartForm,
) -> AppResult<(StatusCode, Json<ApiResponse<Teacher>>)> {
    let fields = TeacherFields::from_form(&form)?;
    check(&fields)?;
    let name = require_text("name", fields.name)?;

    let (photo, staged) = resolve_photo(&state, &mut form, fields.photo_url).await?;

    let input = CreateTeacher {
        name,
        subject: fields.subject,
        photo,
    };
    let outcome = TeacherRepo::create(&state.pool, &input)
        .await
        .map_err(AppError::from);
    let row = state
        .uploads
        .settle(KIND, staged.as_deref(), None, outcome)
        .await?;

    tracing::info!(id = row.id, user_id = admin.user_id, "Teacher created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(row, "Teacher created successfully")),
    ))
}

/// PUT /teacher/{id}
///
/// A new photo (file or URL) replaces the previous one; a previously
/// uploaded file is deleted once the row points elsewhere.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    mut form: MultipartForm,
) -> AppResult<Json<ApiResponse<Teacher>>> {
    let existing = find_or_404::<Teacher>(&state, id).await?;

    let fields = TeacherFields::from_form(&form)?;
    check(&fields)?;

    let (photo, staged) = resolve_photo(&state, &mut form, fields.photo_url).await?;

    let input = UpdateTeacher {
        name: fields.name,
        subject: fields.subject,
        photo: photo.clone(),
    };
    let outcome = updated_row(TeacherRepo::update(&state.pool, id, &input).await, id);
    let row = state
        .uploads
        .settle(KIND, staged.as_deref(), existing.attachment(), outcome)
        .await?;

    // A URL replacing an uploaded file: the old file is no longer referenced.
    if staged.is_none() {
        if let (Some(new_ref), Some(old_ref)) = (photo.as_deref(), existing.attachment()) {
            if new_ref != old_ref {
                state.uploads.discard(KIND, old_ref).await;
            }
        }
    }

    tracing::info!(id, user_id = admin.user_id, "Teacher updated");
    Ok(Json(ApiResponse::ok(row, "Teacher updated successfully")))
}

pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Teacher>>> {
    let row = delete_with_attachment::<Teacher>(&state, KIND, id).await?;
    Ok(Json(ApiResponse::ok(row, format!("Teacher with id {id} has been deleted"))))
}
