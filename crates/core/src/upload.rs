//! Upload policies, stored-file naming and reference resolution.
//!
//! Each entity that owns an attachment stores it under its own directory
//! with its own size and type limits. The API layer does the actual I/O.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Size limit for image attachments (2 MiB).
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Size limit for admission documents (5 MiB).
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

/// URL path segment under which uploads are published.
pub const PUBLIC_PREFIX: &str = "public";

const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

const DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/jpeg",
    "image/jpg",
    "image/png",
];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "jpg", "jpeg", "png"];

// ---------------------------------------------------------------------------
// Upload kind
// ---------------------------------------------------------------------------

/// Which entity an uploaded file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadKind {
    NewsImage,
    AchievementImage,
    EventImage,
    SchoolActivityImage,
    AlumniPhoto,
    TeacherPhoto,
    PpdbDocument,
    ProfilePicture,
}

impl UploadKind {
    /// Directory (relative to the upload root) holding files of this kind.
    pub fn directory(self) -> &'static str {
        match self {
            Self::NewsImage => "news_images",
            Self::AchievementImage => "achievement_images",
            Self::EventImage => "event_images",
            Self::SchoolActivityImage => "school_activity_images",
            Self::AlumniPhoto => "alumni_images",
            Self::TeacherPhoto => "teacher_photos",
            Self::PpdbDocument => "ppdb_documents",
            Self::ProfilePicture => "profile_picture",
        }
    }

    /// Maximum accepted file size in bytes.
    pub fn max_bytes(self) -> usize {
        match self {
            Self::PpdbDocument => MAX_DOCUMENT_BYTES,
            _ => MAX_IMAGE_BYTES,
        }
    }

    fn mime_types(self) -> &'static [&'static str] {
        match self {
            Self::PpdbDocument => DOCUMENT_MIME_TYPES,
            _ => IMAGE_MIME_TYPES,
        }
    }

    fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::PpdbDocument => DOCUMENT_EXTENSIONS,
            _ => IMAGE_EXTENSIONS,
        }
    }

    /// Human-readable list of accepted formats for error messages.
    fn accepted_label(self) -> &'static str {
        match self {
            Self::PpdbDocument => "PDF, DOC, DOCX, JPG, JPEG or PNG",
            _ => "JPEG or PNG",
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Lower-cased extension of `file_name`, if it has one.
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Check an incoming file against the limits of `kind`.
///
/// Returns the normalised extension to use for the stored file.
pub fn validate_upload(
    kind: UploadKind,
    file_name: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<String, CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size > kind.max_bytes() {
        return Err(CoreError::Validation(format!(
            "File too large: {size} bytes exceeds the {} byte limit",
            kind.max_bytes()
        )));
    }

    let mime = content_type
        .map(|c| c.split(';').next().unwrap_or("").trim().to_ascii_lowercase())
        .unwrap_or_default();
    if !kind.mime_types().contains(&mime.as_str()) {
        return Err(CoreError::Validation(format!(
            "File type not supported. Only {} allowed.",
            kind.accepted_label()
        )));
    }

    match file_extension(file_name) {
        Some(ext) if kind.extensions().contains(&ext.as_str()) => Ok(ext),
        _ => Err(CoreError::Validation(format!(
            "File extension not supported. Only {} allowed.",
            kind.accepted_label()
        ))),
    }
}

// ---------------------------------------------------------------------------
// Naming and references
// ---------------------------------------------------------------------------

/// Generate a collision-free stored file name: `<unix-millis>-<uuid>.<ext>`.
pub fn stored_file_name(extension: &str, now_millis: i64) -> String {
    format!("{now_millis}-{}.{extension}", uuid::Uuid::new_v4())
}

/// Build the externally-addressable URL for a stored file.
///
/// `{base_url}/public/{directory}/{file_name}`
pub fn reference_url(base_url: &str, kind: UploadKind, file_name: &str) -> String {
    format!(
        "{}/{PUBLIC_PREFIX}/{}/{file_name}",
        base_url.trim_end_matches('/'),
        kind.directory()
    )
}

/// Extract the stored file name from a reference (URL or bare name).
///
/// Returns `None` for references that cannot name a file inside the kind's
/// directory (empty, `.`/`..`, or containing backslashes).
pub fn file_name_from_reference(reference: &str) -> Option<&str> {
    let name = reference
        .split(['?', '#'])
        .next()
        .unwrap_or("")
        .rsplit('/')
        .next()
        .unwrap_or("");
    if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
        return None;
    }
    Some(name)
}
