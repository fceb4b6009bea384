//! Resume extraction endpoints.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::acquisition;
use crate::errors::AppError;
use crate::extraction::extract_profile;
use crate::models::profile::ResumeProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub profile: ResumeProfile,
    /// Length of the acquired text, as a rough signal of how much the
    /// extractor had to work with.
    pub characters: usize,
}

/// POST /api/v1/resumes/extract
///
/// Multipart upload of a .pdf or .txt file in a `file` field.
pub async fn handle_extract_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Upload field has no filename".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let text =
            acquisition::acquire_from_upload(&filename, &bytes, state.config.max_upload_bytes)?;
        return Ok(Json(respond(&state, &text)));
    }

    Err(AppError::Validation(
        "Multipart body is missing a 'file' field".to_string(),
    ))
}

/// POST /api/v1/resumes/extract-text
///
/// Pasted plain text, for callers that already have the resume body.
pub async fn handle_extract_text(
    State(state): State<AppState>,
    Json(req): Json<ExtractTextRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let text = acquisition::acquire_from_text(&req.text)?;
    Ok(Json(respond(&state, &text)))
}

/// GET /api/v1/resumes/template
///
/// Blank profile skeleton for manual entry, with one empty experience and
/// education row so the client form has something to render.
pub async fn handle_template() -> Json<ResumeProfile> {
    Json(ResumeProfile::manual_entry_template())
}

fn respond(state: &AppState, text: &str) -> ExtractResponse {
    let profile = extract_profile(text, state.config.freeform_skill_cap);
    tracing::info!(
        characters = text.len(),
        skills = profile.skills.len(),
        experience = profile.experience.len(),
        "Extracted profile from resume text"
    );
    ExtractResponse {
        profile,
        characters: text.chars().count(),
    }
}
