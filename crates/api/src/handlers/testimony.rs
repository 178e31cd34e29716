//! Handlers for the `/testimony` resource (alumni testimonials).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Datelike;
use schoolcms_core::content::validate_graduation_year;
use schoolcms_core::error::CoreError;
use schoolcms_core::types::DbId;
use schoolcms_core::upload::UploadKind;
use schoolcms_core::validation::{check, optional_text, parse_integer, require_text};
use schoolcms_db::entity::{Entity, EntityRepo};
use schoolcms_db::models::testimony::{CreateTestimony, Testimony, UpdateTestimony};
use schoolcms_db::repositories::TestimonyRepo;
use validator::Validate;

use super::{delete_with_attachment, find_or_404, plain, rich, updated_row};
use crate::error::{AppError, AppResult};
use crate::extract::{Path, Query};
use crate::form::MultipartForm;
use crate::middleware::rbac::RequireAuth;
use crate::query::SearchParams;
use crate::response::ApiResponse;
use crate::state::AppState;

const FILE_FIELD: &str = "photo";
const KIND: UploadKind = UploadKind::AlumniPhoto;

#[derive(Debug, Validate)]
struct TestimonyFields {
    #[validate(length(max = 255, message = "must not exceed 255 characters"))]
    alumni_name: Option<String>,
    testimony: Option<String>,
    graduation_year: Option<String>,
}

impl TestimonyFields {
    fn from_form(form: &MultipartForm) -> Self {
        Self {
            alumni_name: plain(form.text("alumniName")),
            testimony: rich(form.text("testimony")),
            graduation_year: optional_text(form.text("graduationYear")),
        }
    }

    /// Parsed graduation year, bounded by 1900 and the current year.
    fn graduation_year(&self) -> Result<Option<i32>, CoreError> {
        self.graduation_year
            .as_deref()
            .map(|raw| {
                let year = parse_integer("graduationYear", raw)?;
                validate_graduation_year(year, chrono::Utc::now().year())
            })
            .transpose()
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<Testimony>>>> {
    let rows = EntityRepo::list::<Testimony>(&state.pool, params.term()).await?;
    Ok(Json(ApiResponse::ok(rows, "Testimonies retrieved successfully")))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Testimony>>> {
    let row = find_or_404::<Testimony>(&state, id).await?;
    Ok(Json(ApiResponse::ok(row, "Testimony retrieved successfully")))
}

pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut form: MultipartForm,
) -> AppResult<(StatusCode, Json<ApiResponse<Testimony>>)> {
    let fields = TestimonyFields::from_form(&form);
    check(&fields)?;
    let graduation_year = fields.graduation_year()?;

    let alumni_name = require_text("alumniName", fields.alumni_name)?;
    let testimony = require_text("testimony", fields.testimony)?;

    let file = form.take_file(FILE_FIELD)?;
    let photo = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = CreateTestimony {
        alumni_name,
        testimony,
        graduation_year,
        photo: photo.clone(),
    };
    let outcome = TestimonyRepo::create(&state.pool, &input)
        .await
        .map_err(AppError::from);
    let row = state
        .uploads
        .settle(KIND, photo.as_deref(), None, outcome)
        .await?;

    tracing::info!(id = row.id, user_id = user.user_id, "Testimony created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(row, "Testimony created successfully")),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    mut form: MultipartForm,
) -> AppResult<Json<ApiResponse<Testimony>>> {
    let existing = find_or_404::<Testimony>(&state, id).await?;

    let fields = TestimonyFields::from_form(&form);
    check(&fields)?;
    let graduation_year = fields.graduation_year()?;

    let file = form.take_file(FILE_FIELD)?;
    let photo = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = UpdateTestimony {
        alumni_name: fields.alumni_name,
        testimony: fields.testimony,
        graduation_year,
        photo: photo.clone(),
    };
    let outcome = updated_row(TestimonyRepo::update(&state.pool, id, &input).await, id);
    let row = state
        .uploads
        .settle(KIND, photo.as_deref(), existing.attachment(), outcome)
        .await?;

    tracing::info!(id, user_id = user.user_id, "Testimony updated");
    Ok(Json(ApiResponse::ok(row, "Testimony updated successfully")))
}

pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Testimony>>> {
    let row = delete_with_attachment::<Testimony>(&state, KIND, id).await?;
    Ok(Json(ApiResponse::ok(
        row,
        format!("Testimony with id {id} has been deleted"),
    )))
}
