//! Handlers for the `/school-info` resource (enrolment statistics).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use schoolcms_core::error::CoreError;
use schoolcms_core::school_info::{summarize, validate_total_students, Major};
use schoolcms_core::types::DbId;
use schoolcms_core::validation::{optional_text, parse_integer, require_text};
use schoolcms_db::models::school_info::{
    CreateSchoolInfo, MajorTotal, SchoolInfo, UpdateSchoolInfo,
};
use schoolcms_db::repositories::SchoolInfoRepo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AppResult;
use crate::extract::{Path, Query};
use crate::form::MultipartForm;
use crate::middleware::rbac::RequireAuth;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /school-info`.
#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    pub major: Option<String>,
}

/// Totals plus the raw records they were computed from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_students: i64,
    pub students_by_major: BTreeMap<String, i64>,
    pub records: Vec<SchoolInfo>,
}

/// Totals computed by the database.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_students: i64,
    pub per_major: Vec<MajorTotal>,
}

fn total_students(form: &MultipartForm) -> Result<Option<i32>, CoreError> {
    optional_text(form.text("totalStudents"))
        .map(|raw| validate_total_students(parse_integer("totalStudents", &raw)?))
        .transpose()
}

fn major(form: &MultipartForm) -> Result<Option<Major>, CoreError> {
    optional_text(form.text("major"))
        .map(|raw| Major::parse(&raw))
        .transpose()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /school-info?major=
pub async fn overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> AppResult<Json<ApiResponse<Overview>>> {
    let records = match optional_text(params.major) {
        Some(raw) => SchoolInfoRepo::list_by_major(&state.pool, Major::parse(&raw)?).await?,
        None => SchoolInfoRepo::list(&state.pool).await?,
    };
    let summary = summarize(records.iter().map(|r| (r.major.as_str(), r.total_students)));

    Ok(Json(ApiResponse::ok(
        Overview {
            total_students: summary.total_students,
            students_by_major: summary.students_by_major,
            records,
        },
        "School info retrieved successfully",
    )))
}

/// GET /school-info/summary
pub async fn summary(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SummaryResponse>>> {
    let per_major = SchoolInfoRepo::summary(&state.pool).await?;
    let total_students = per_major.iter().map(|m| m.total_students).sum();
    Ok(Json(ApiResponse::ok(
        SummaryResponse {
            total_students,
            per_major,
        },
        "School info summary retrieved successfully",
    )))
}

/// GET /school-info/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<SchoolInfo>>> {
    let row = SchoolInfoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "SchoolInfo",
            id,
        })?;
    Ok(Json(ApiResponse::ok(row, "School info retrieved successfully")))
}

/// POST /school-info (also /school-info/create)
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    form: MultipartForm,
) -> AppResult<(StatusCode, Json<ApiResponse<SchoolInfo>>)> {
    let total_students = total_students(&form)?.ok_or_else(|| {
        CoreError::Validation("totalStudents is required".into())
    })?;
    let major = major(&form)?
        .ok_or_else(|| CoreError::Validation("major is required".into()))?;

    let input = CreateSchoolInfo {
        total_students,
        major: major.as_str().to_string(),
    };
    let row = SchoolInfoRepo::create(&state.pool, &input).await?;

    tracing::info!(id = row.id, major = %major, total_students, user_id = user.user_id, "School info created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(row, "School info created successfully")),
    ))
}

/// PUT /school-info/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    form: MultipartForm,
) -> AppResult<Json<ApiResponse<SchoolInfo>>> {
    let input = UpdateSchoolInfo {
        total_students: total_students(&form)?,
        major: major(&form)?.map(|m| m.as_str().to_string()),
    };
    let row = SchoolInfoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "SchoolInfo",
            id,
        })?;

    tracing::info!(id, user_id = user.user_id, "School info updated");
    Ok(Json(ApiResponse::ok(row, "School info updated successfully")))
}

/// PATCH /school-info/decrease
///
/// Body `{ major, amount }`. Drains the major's oldest records first and
/// returns every record of that major afterwards. Either the whole amount is
/// subtracted or nothing is.
pub async fn decrease(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    form: MultipartForm,
) -> AppResult<Json<ApiResponse<Vec<SchoolInfo>>>> {
    let major = Major::parse(&require_text("major", form.text("major"))?)?;
    let amount = parse_integer("amount", &require_text("amount", form.text("amount"))?)?;

    let outcome = SchoolInfoRepo::decrease_by_major(&state.pool, major, amount).await?;

    for step in &outcome.steps {
        tracing::debug!(
            id = step.id,
            before = step.before,
            after = step.after,
            subtracted = step.subtracted,
            "Decreased school info record"
        );
    }
    tracing::info!(
        major = %major,
        amount,
        touched = outcome.steps.len(),
        user_id = user.user_id,
        "Decreased students by major"
    );

    Ok(Json(ApiResponse::ok(
        outcome.records,
        format!("Successfully decreased {amount} students from major {major}"),
    )))
}
