//! HTTP handlers, one module per resource.
//!
//! Content handlers share the helpers below: fetch-or-404, delete with
//! attachment cleanup, and field normalisation (trim + sanitize).

pub mod achievement;
pub mod event;
pub mod news;
pub mod ppdb;
pub mod school_activity;
pub mod school_info;
pub mod teacher;
pub mod testimony;
pub mod user;

use schoolcms_core::error::CoreError;
use schoolcms_core::sanitize::{clean_html, strip_html};
use schoolcms_core::types::DbId;
use schoolcms_core::upload::UploadKind;
use schoolcms_core::validation::optional_text;
use schoolcms_db::entity::{Entity, EntityRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load a row or fail with 404.
pub(crate) async fn find_or_404<E: Entity>(state: &AppState, id: DbId) -> AppResult<E> {
    EntityRepo::find_by_id::<E>(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::from(not_found::<E>(id)))
}

/// Turn the result of a `RETURNING` update into the row, or 404 if it vanished.
pub(crate) fn updated_row<E: Entity>(
    result: Result<Option<E>, sqlx::Error>,
    id: DbId,
) -> AppResult<E> {
    result?.ok_or_else(|| AppError::from(not_found::<E>(id)))
}

/// Delete a row, then its attachment (best-effort). 404 if the row is absent.
pub(crate) async fn delete_with_attachment<E: Entity>(
    state: &AppState,
    kind: UploadKind,
    id: DbId,
) -> AppResult<E> {
    let row = EntityRepo::delete::<E>(&state.pool, id)
        .await?
        .ok_or_else(|| not_found::<E>(id))?;

    if let Some(reference) = row.attachment() {
        state.uploads.discard(kind, reference).await;
    }
    tracing::info!(entity = E::NAME, id = row.id(), "Deleted");
    Ok(row)
}

pub(crate) fn not_found<E: Entity>(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: E::NAME,
        id,
    }
}

/// Trim a single-line field and strip every tag. Blank counts as absent.
pub(crate) fn plain(value: Option<String>) -> Option<String> {
    optional_text(value)
        .map(|v| strip_html(&v))
        .and_then(|v| optional_text(Some(v)))
}

/// Trim a rich-text field and drop unsafe markup. Blank counts as absent.
pub(crate) fn rich(value: Option<String>) -> Option<String> {
    optional_text(value)
        .map(|v| clean_html(&v))
        .and_then(|v| optional_text(Some(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_strips_markup_and_blanks() {
        assert_eq!(plain(Some(" <b>Juara</b> 1 ".into())).as_deref(), Some("Juara 1"));
        assert_eq!(plain(Some("<i></i>".into())), None);
        assert_eq!(plain(None), None);
    }

    #[test]
    fn rich_keeps_safe_formatting() {
        assert_eq!(
            rich(Some("<p>Hi</p><script>x()</script>".into())).as_deref(),
            Some("<p>Hi</p>")
        );
    }
}
