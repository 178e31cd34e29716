//! Form bodies for entity create / update endpoints.
//!
//! Entity endpoints accept `multipart/form-data` (text fields plus at most one
//! file), and also plain JSON or URL-encoded bodies when no file is sent.

use std::collections::HashMap;

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// A file part received in a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name of the form field that carried the file.
    pub field: String,
    /// Client-supplied file name.
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Text fields and the optional file of an entity form.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    file: Option<UploadedFile>,
}

impl MultipartForm {
    /// Value of a text field, if sent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// Take the uploaded file, which must have been sent as `field`.
    pub fn take_file(&mut self, field: &str) -> AppResult<Option<UploadedFile>> {
        match self.file.take() {
            Some(file) if file.field == field => Ok(Some(file)),
            Some(file) => Err(AppError::BadRequest(format!(
                "Unexpected file field '{}'. Expected '{field}'",
                file.field
            ))),
            None => Ok(None),
        }
    }

    async fn read_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let name = field.name().unwrap_or("").to_string();

            let Some(file_name) = field.file_name().map(str::to_string) else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                form.fields.insert(name, text);
                continue;
            };

            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;

            // Browsers send an empty part for an untouched file input.
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            if form.file.is_some() {
                return Err(AppError::BadRequest(
                    "Only one file may be uploaded per request".into(),
                ));
            }
            form.file = Some(UploadedFile {
                field: name,
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        }

        Ok(form)
    }

    fn from_json(object: serde_json::Map<String, Value>) -> Self {
        let fields = object
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(s) => Some((key, s)),
                Value::Number(n) => Some((key, number_text(&n))),
                other => Some((key, other.to_string())),
            })
            .collect();
        Self { fields, file: None }
    }
}

/// Whole-valued JSON numbers (`12.0`) read as integers.
fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

impl<S: Send + Sync> FromRequest<S> for MultipartForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(object) = Json::<serde_json::Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(Self::from_json(object));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(Self { fields, file: None });
        }

        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Self::read_multipart(multipart).await
    }
}
