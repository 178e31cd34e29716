//! Handlers for the `/user` resource: accounts, login and profile pictures.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use schoolcms_core::content::validate_password_strength;
use schoolcms_core::error::CoreError;
use schoolcms_core::roles::{is_valid_role, ROLE_ADMIN, VALID_ROLES};
use schoolcms_core::types::DbId;
use schoolcms_core::upload::UploadKind;
use schoolcms_core::validation::{check, optional_text, require_text, validate_email};
use schoolcms_db::entity::EntityRepo;
use schoolcms_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use schoolcms_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{find_or_404, not_found, plain};
use crate::extract::{Path, Query};
use crate::auth::jwt::{generate_access_token, TokenSubject};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::form::MultipartForm;
use crate::middleware::auth::AuthUser;
use crate::middleware::idempotency::IdempotencyGuard;
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::response::ApiResponse;
use crate::state::AppState;

const FILE_FIELD: &str = "picture";
const KIND: UploadKind = UploadKind::ProfilePicture;
const EMAIL_CONSTRAINT: &str = "uq_users_email";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Credentials for `POST /user/login`, read from any form encoding.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    fn from_form(form: &MultipartForm) -> Result<Self, CoreError> {
        let email = require_text("email", form.text("email"))?;
        let password = form
            .text("password")
            .filter(|p| !p.is_empty())
            .ok_or_else(|| CoreError::Validation("password is required".into()))?;
        Ok(Self { email, password })
    }
}

/// Identity embedded in a successful login response.
#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Login response: the usual envelope plus `logged` and `token`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: bool,
    pub logged: bool,
    pub data: LoginUser,
    pub token: String,
    pub message: String,
}

#[derive(Debug, Validate)]
struct UserFields {
    #[validate(length(max = 255, message = "must not exceed 255 characters"))]
    name: Option<String>,
    #[validate(length(max = 255, message = "must not exceed 255 characters"))]
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

impl UserFields {
    fn from_form(form: &MultipartForm) -> Result<Self, CoreError> {
        let fields = Self {
            name: plain(form.text("name")),
            email: optional_text(form.text("email")),
            // Passwords are used as typed; only blank counts as absent.
            password: form.text("password").filter(|p| !p.trim().is_empty()),
            role: optional_text(form.text("role")),
        };
        if let Some(email) = &fields.email {
            validate_email(email)?;
        }
        if let Some(password) = &fields.password {
            validate_password_strength(password)?;
        }
        if let Some(role) = &fields.role {
            if !is_valid_role(role) {
                return Err(CoreError::Validation(format!(
                    "Invalid role '{role}'. Must be one of: {}",
                    VALID_ROLES.join(", ")
                )));
            }
        }
        Ok(fields)
    }
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password).map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// Map a duplicate email to 409 with a readable message.
fn email_conflict(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err, EMAIL_CONSTRAINT) {
        AppError::Core(CoreError::Conflict("Email already used".into()))
    } else {
        AppError::Database(err)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /user/login
pub async fn login(
    State(state): State<AppState>,
    form: MultipartForm,
) -> AppResult<Json<LoginResponse>> {
    let input = LoginRequest::from_form(&form)?;
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid credentials".into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid)?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::info!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid());
    }

    let token = generate_access_token(
        TokenSubject {
            id: user.id,
            name: &user.name,
            email: &user.email,
            role: &user.role,
        },
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");
    Ok(Json(LoginResponse {
        status: true,
        logged: true,
        data: LoginUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
        token,
        message: "Login Success".into(),
    }))
}

/// POST /user/create
///
/// Public registration. A repeated `Idempotency-Key` is rejected before
/// anything is written.
pub async fn create(
    State(state): State<AppState>,
    IdempotencyGuard(key): IdempotencyGuard,
    mut form: MultipartForm,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let fields = UserFields::from_form(&form)?;
    check(&fields)?;

    let name = require_text("name", fields.name)?;
    let email = require_text("email", fields.email)?;
    let password = require_text("password", fields.password)?;
    let role = require_text("role", fields.role)?;
    let password_hash = hash(&password)?;

    let file = form.take_file(FILE_FIELD)?;
    let picture = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = CreateUser {
        name,
        email,
        password_hash,
        role,
        profile_picture: picture.clone(),
    };
    let outcome = UserRepo::create(&state.pool, &input)
        .await
        .map_err(email_conflict);
    let user = state
        .uploads
        .settle(KIND, picture.as_deref(), None, outcome)
        .await?;

    tracing::info!(user_id = user.id, idempotency_key = ?key, "User created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            UserResponse::from(&user),
            "User created successfully",
        )),
    ))
}

/// GET /user?search=
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = EntityRepo::list::<User>(&state.pool, params.term()).await?;
    let data: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::ok(data, "Users retrieved successfully")))
}

/// GET /user/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = find_or_404::<User>(&state, id).await?;
    Ok(Json(ApiResponse::ok(
        UserResponse::from(&user),
        "User retrieved successfully",
    )))
}

/// GET /user/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = find_or_404::<User>(&state, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(
        UserResponse::from(&user),
        "Profile retrieved successfully",
    )))
}

/// PUT /user/{id}
///
/// Partial update. A new password is re-hashed; a new picture replaces the
/// old file.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    mut form: MultipartForm,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let existing = find_or_404::<User>(&state, id).await?;

    let fields = UserFields::from_form(&form)?;
    check(&fields)?;
    let password_hash = fields.password.as_deref().map(hash).transpose()?;

    let file = form.take_file(FILE_FIELD)?;
    let picture = state.uploads.store_optional(KIND, file.as_ref()).await?;

    let input = UpdateUser {
        name: fields.name,
        email: fields.email,
        password_hash,
        role: fields.role,
        profile_picture: picture.clone(),
    };
    let outcome = match UserRepo::update(&state.pool, id, &input).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(AppError::from(not_found::<User>(id))),
        Err(e) => Err(email_conflict(e)),
    };
    let user = state
        .uploads
        .settle(
            KIND,
            picture.as_deref(),
            existing.profile_picture.as_deref(),
            outcome,
        )
        .await?;

    tracing::info!(user_id = id, admin_id = admin.user_id, "User updated");
    Ok(Json(ApiResponse::ok(
        UserResponse::from(&user),
        "User updated successfully",
    )))
}

/// PUT /user/pic/{id}
///
/// Replace a profile picture. Allowed for the account owner and admins.
pub async fn update_picture(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    mut form: MultipartForm,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    if auth.user_id != id && auth.role != ROLE_ADMIN {
        tracing::warn!(user_id = auth.user_id, target = id, "Picture change denied");
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only change your own picture".into(),
        )));
    }

    let existing = find_or_404::<User>(&state, id).await?;
    let file = form
        .take_file(FILE_FIELD)?
        .ok_or_else(|| AppError::BadRequest("No picture uploaded".into()))?;
    let picture = state.uploads.store(KIND, &file).await?;

    let outcome = match UserRepo::update_picture(&state.pool, id, &picture).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(AppError::from(not_found::<User>(id))),
        Err(e) => Err(AppError::Database(e)),
    };
    let user = state
        .uploads
        .settle(
            KIND,
            Some(picture.as_str()),
            existing.profile_picture.as_deref(),
            outcome,
        )
        .await?;

    tracing::info!(user_id = id, by = auth.user_id, "Profile picture updated");
    Ok(Json(ApiResponse::ok(
        UserResponse::from(&user),
        "Profile picture updated successfully",
    )))
}

/// DELETE /user/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = super::delete_with_attachment::<User>(&state, KIND, id).await?;
    tracing::info!(user_id = id, admin_id = admin.user_id, "User deleted");
    Ok(Json(ApiResponse::ok(
        UserResponse::from(&user),
        format!("User with id {id} has been deleted"),
    )))
}
