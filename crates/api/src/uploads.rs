//! On-disk storage for entity attachments.
//!
//! Files live at `{root}/{kind directory}/{stored name}` and rows refer to
//! them by URL (`{base_url}/public/{kind directory}/{stored name}`).
//!
//! Replacing an attachment is two-phase: the new file is written first, the
//! row is updated, and only then is the previous file removed. If the row
//! write fails the new file is discarded instead. Removal is best-effort and
//! never fails a request.

use std::path::PathBuf;

use schoolcms_core::upload::{
    file_name_from_reference, reference_url, stored_file_name, validate_upload, UploadKind,
    PUBLIC_PREFIX,
};

use crate::error::{AppError, AppResult};
use crate::form::UploadedFile;

/// Writes, resolves and deletes attachment files.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    base_url: String,
}

impl UploadStore {
    pub fn new(root: PathBuf, base_url: String) -> Self {
        Self {
            root,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Validate and write `file`, returning the reference URL to store on the row.
    pub async fn store(&self, kind: UploadKind, file: &UploadedFile) -> AppResult<String> {
        let ext = validate_upload(
            kind,
            &file.file_name,
            file.content_type.as_deref(),
            file.bytes.len(),
        )?;

        let dir = self.root.join(kind.directory());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

        let name = stored_file_name(&ext, chrono::Utc::now().timestamp_millis());
        tokio::fs::write(dir.join(&name), &file.bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;

        tracing::debug!(kind = kind.directory(), file = %name, size = file.bytes.len(), "Stored upload");
        Ok(reference_url(&self.base_url, kind, &name))
    }

    /// Store `file` if one was sent.
    pub async fn store_optional(
        &self,
        kind: UploadKind,
        file: Option<&UploadedFile>,
    ) -> AppResult<Option<String>> {
        match file {
            Some(file) => self.store(kind, file).await.map(Some),
            None => Ok(None),
        }
    }

    /// Resolve a stored reference to its path inside the kind's directory.
    ///
    /// Returns `None` for references that do not point into
    /// `/public/{kind directory}/` (e.g. external URLs) or that would escape it.
    pub fn local_path(&self, kind: UploadKind, reference: &str) -> Option<PathBuf> {
        let marker = format!("/{PUBLIC_PREFIX}/{}/", kind.directory());
        let (_, rest) = reference.split_once(&marker)?;
        let name = file_name_from_reference(rest)?;
        if name.len() != rest.split(['?', '#']).next().unwrap_or("").len() {
            // `rest` held further path segments.
            return None;
        }
        Some(self.root.join(kind.directory()).join(name))
    }

    /// Delete the file behind `reference`. Failures are logged and swallowed.
    pub async fn discard(&self, kind: UploadKind, reference: &str) {
        let Some(path) = self.local_path(kind, reference) else {
            tracing::debug!(reference, "Attachment is not a local upload; nothing to delete");
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Deleted upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Upload already missing")
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to delete upload"),
        }
    }

    /// Finish a write that may have staged a new file.
    ///
    /// On success the `previous` file (if any, and if replaced) is deleted;
    /// on failure the `staged` file is deleted. `outcome` is returned as is.
    pub async fn settle<T>(
        &self,
        kind: UploadKind,
        staged: Option<&str>,
        previous: Option<&str>,
        outcome: AppResult<T>,
    ) -> AppResult<T> {
        match (&outcome, staged) {
            (Ok(_), Some(new_ref)) => {
                if let Some(old_ref) = previous.filter(|old| *old != new_ref) {
                    self.discard(kind, old_ref).await;
                }
            }
            (Err(_), Some(new_ref)) => self.discard(kind, new_ref).await,
            (_, None) => {}
        }
        outcome
    }
}
