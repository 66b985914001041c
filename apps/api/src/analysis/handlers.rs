//! Axum route handlers for document upload and content analysis.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::classifier::{classify_domain, DomainProfile};
use crate::analysis::extract::extract_text;
use crate::analysis::quality::{assess_quality, Gap, QualityProfile};
use crate::errors::AppError;
use crate::models::session::{Session, UploadedDocument};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub filename: String,
    pub byte_size: usize,
    pub extraction_succeeded: bool,
    pub extraction_method: String,
}

impl From<&UploadedDocument> for DocumentSummary {
    fn from(doc: &UploadedDocument) -> Self {
        DocumentSummary {
            filename: doc.filename.clone(),
            byte_size: doc.byte_size,
            extraction_succeeded: doc.extraction_succeeded,
            extraction_method: doc.extraction_method.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub session_id: Uuid,
    pub documents: Vec<DocumentSummary>,
    pub domain_profile: DomainProfile,
    pub quality_profile: QualityProfile,
    pub gaps: Vec<Gap>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/upload
///
/// Accepts one or more files as multipart form data, extracts their text,
/// runs classification and quality assessment over the merged content, and
/// creates the session. The only surfaced input error is having no
/// extractable text at all.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut documents: Vec<UploadedDocument> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue; // non-file form fields are ignored
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        if bytes.is_empty() {
            continue;
        }
        documents.push(extract_text(&filename, &bytes));
    }

    if documents.is_empty() {
        return Err(AppError::Validation(
            "no files found in upload".to_string(),
        ));
    }

    let mut session = Session::new();
    session.documents = documents;

    let merged = session.merged_text();
    if merged.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "none of the uploaded files contained extractable text".to_string(),
        ));
    }

    let domain_profile = classify_domain(&merged);
    let (quality_profile, gaps) = assess_quality(&merged);

    session.domain_profile = Some(domain_profile);
    session.quality_profile = Some(quality_profile);
    session.gaps = gaps.clone();

    info!(
        "Session {} created: {} document(s), domain={:?}, complexity={:?}, quality={}",
        session.id,
        session.documents.len(),
        domain_profile.primary_domain,
        domain_profile.complexity,
        quality_profile.overall
    );

    let response = UploadResponse {
        session_id: session.id,
        documents: session.documents.iter().map(DocumentSummary::from).collect(),
        domain_profile,
        quality_profile,
        gaps,
    };

    state.store.put(session).await?;

    Ok(Json(response))
}

/// GET /api/v1/sessions/:id
///
/// Returns the full accumulated session record.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    let session = state.store.get(id).await?;
    Ok(Json(session))
}
