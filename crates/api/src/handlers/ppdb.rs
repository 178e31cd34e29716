//! Handlers for the `/ppdb` resource (new-student admission campaigns).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use schoolcms_core::content::validate_admission_window;
use schoolcms_core::types::DbId;
use schoolcms_core::upload::UploadKind;
use schoolcms_core::validation::{check, parse_date, parse_optional_date, require_text};
use schoolcms_db::entity::{Entity, EntityRepo};
use schoolcms_db::models::ppdb::{CreatePpdb, Ppdb, UpdatePpdb};
use schoolcms_db::repositories::PpdbRepo;
use validator::Validate;

use super::{delete_with_attachment, find_or_404, plain, rich, updated_row};
use crate::error::{AppError, AppResult};
use crate::extract::{Path, Query};
use crate::form::MultipartForm;
use crate::middleware::rbac::RequireAuth;
use crate::query::SearchParams;
use crate::response::ApiResponse;
use crate::state::AppState;

const FILE_FIELD: &str = "document";
const KIND: UploadKind = UploadKind::PpdbDocument;

#[derive(Debug, Validate)]
struct PpdbFields {
    #[validate(length(max = 255, message = "must not exceed 255 characters"))]
    title: Option<String>,
    description: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    #[validate(length(max = 255, message = "must not exceed 255 characters"))]
    contact_info: Option<String>,
}

impl PpdbFields {
    fn from_form(form: &MultipartForm) -> Self {
        Self {
            title: plain(form.text("title")),
            description: rich(form.text("description")),
            start_date: plain(form.text("startDate")),
            end_date: plain(form.text("endDate")),
            contact_info: plain(form.text("contactInfo")),
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<Ppdb>>>> {
    let rows = EntityRepo::list::<Ppdb>(&state.pool, params.term()).await?;
    Ok(Json(ApiResponse::ok(rows, "PPDB data retrieved successfully")))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Ppdb>>> {
    let row = find_or_404::<Ppdb>(&state, id).await?;
    Ok(Json(ApiResponse::ok(row, "PPDB data retrieved successfully")))
}

/// POST /ppdb/create
///
/// Every text field is required and the window must end after it starts.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut form: MultipartForm,
) -> AppResult<(StatusCode, Json<ApiResponse<Ppdb>>)> {
    let fields = PpdbFields::from_form(&form);
    check(&fields)?;

    let title = require_text("title", fields.title)?;
    let description = require_text("description", fields.description)?;
    let start_date = parse_date("startDate", &require_text("startDate", fields.start_date)?)?;
    let end_date = parse_date("endDate", &require_text("endDate", fields.end_date)?)?;
    let contact_info = require_text("contactInfo", fields.contact_info)?;
    validate_admission_window(start_date, end_date)?;

    let file = form.take_file(FILE_FIELD)?;
    let document = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = CreatePpdb {
        title,
        description,
        start_date,
        end_date,
        contact_info: Some(contact_info),
        document: document.clone(),
    };
    let outcome = PpdbRepo::create(&state.pool, &input)
        .await
        .map_err(AppError::from);
    let row = state
        .uploads
        .settle(KIND, document.as_deref(), None, outcome)
        .await?;

    tracing::info!(id = row.id, user_id = user.user_id, "PPDB created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(row, "PPDB data created successfully")),
    ))
}

/// PUT /ppdb/{id}
///
/// The window is checked against the merged dates, so sending only
/// `endDate` is compared with the stored `startDate`.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    mut form: MultipartForm,
) -> AppResult<Json<ApiResponse<Ppdb>>> {
    let existing = find_or_404::<Ppdb>(&state, id).await?;

    let fields = PpdbFields::from_form(&form);
    check(&fields)?;
    let start_date = parse_optional_date("startDate", fields.start_date.as_deref())?;
    let end_date = parse_optional_date("endDate", fields.end_date.as_deref())?;
    validate_admission_window(
        start_date.unwrap_or(existing.start_date),
        end_date.unwrap_or(existing.end_date),
    )?;

    let file = form.take_file(FILE_FIELD)?;
    let document = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = UpdatePpdb {
        title: fields.title,
        description: fields.description,
        start_date,
        end_date,
        contact_info: fields.contact_info,
        document: document.clone(),
    };
    let outcome = updated_row(PpdbRepo::update(&state.pool, id, &input).await, id);
    let row = state
        .uploads
        .settle(KIND, document.as_deref(), existing.attachment(), outcome)
        .await?;

    tracing::info!(id, user_id = user.user_id, "PPDB updated");
    Ok(Json(ApiResponse::ok(row, "PPDB data updated successfully")))
}

pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Ppdb>>> {
    let row = delete_with_attachment::<Ppdb>(&state, KIND, id).await?;
    Ok(Json(ApiResponse::ok(row, format!("PPDB data with id {id} has been deleted"))))
}
