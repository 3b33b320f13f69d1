//! Multipart text uploads shared by the tailoring and scraping endpoints.

use std::collections::HashMap;
use std::path::Path;

use axum::extract::Multipart;

use crate::errors::AppError;

/// One text part of a multipart body.
#[derive(Debug, Clone)]
pub struct TextUpload {
    /// Original filename; `None` for pasted text fields.
    pub filename: Option<String>,
    pub contents: String,
}

impl TextUpload {
    pub fn extension(&self) -> Option<String> {
        self.filename
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }
}

/// Reads every named part as UTF-8 text, keyed by field name.
///
/// Parts carrying a filename must have one of `allowed_extensions`; parts without a
/// filename are treated as pasted text.
pub async fn read_text_uploads(
    mut multipart: Multipart,
    allowed_extensions: &[&str],
) -> Result<HashMap<String, TextUpload>, AppError> {
    let mut uploads = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let filename = field.file_name().map(str::to_string);

        let upload = TextUpload {
            filename,
            contents: String::new(),
        };
        if upload.filename.is_some() {
            let ext = upload.extension().unwrap_or_default();
            if !allowed_extensions.contains(&ext.as_str()) {
                return Err(AppError::Validation(format!(
                    "Invalid file type for '{name}'. Expected one of: {}",
                    allowed_extensions
                        .iter()
                        .map(|e| format!(".{e}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
        }

        let contents = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Field '{name}' is not valid text: {e}")))?;

        uploads.insert(name, TextUpload { contents, ..upload });
    }

    Ok(uploads)
}

/// Takes a required, non-blank part out of `uploads`.
pub fn require_upload(
    uploads: &mut HashMap<String, TextUpload>,
    field: &str,
) -> Result<TextUpload, AppError> {
    let upload = uploads
        .remove(field)
        .ok_or_else(|| AppError::Validation(format!("Missing '{field}' upload")))?;
    if upload.contents.trim().is_empty() {
        return Err(AppError::Validation(format!("'{field}' cannot be empty")));
    }
    Ok(upload)
}
