//! Axum route handlers for SME answers and strategy generation.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::session::{Session, SmeResponse};
use crate::state::AppState;
use crate::strategy::models::StrategyBundle;
use crate::strategy::narrative_parser::parse_narrative;
use crate::strategy::prompts::{build_narrative_prompt, NARRATIVE_SYSTEM};
use crate::strategy::synthesizer::synthesize_strategies;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SmeResponsesRequest {
    pub responses: Vec<SmeResponse>,
}

#[derive(Debug, Serialize)]
pub struct SmeResponsesResponse {
    pub session_id: Uuid,
    pub total_responses: usize,
}

#[derive(Debug, Serialize)]
pub struct StrategiesResponse {
    pub session_id: Uuid,
    pub bundle: StrategyBundle,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/sme-responses
///
/// Appends subject-matter-expert answers to the session. Answers are free
/// text; the synthesizer mines them for keywords later.
pub async fn handle_sme_responses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SmeResponsesRequest>,
) -> Result<Json<SmeResponsesResponse>, AppError> {
    if request.responses.is_empty() {
        return Err(AppError::Validation("responses cannot be empty".to_string()));
    }
    if request
        .responses
        .iter()
        .any(|r| r.question.trim().is_empty() || r.answer.trim().is_empty())
    {
        return Err(AppError::Validation(
            "every response needs a non-empty question and answer".to_string(),
        ));
    }

    let responses = request.responses;
    let session = state
        .store
        .update(id, Box::new(move |s| s.sme_responses.extend(responses)))
        .await?;

    Ok(Json(SmeResponsesResponse {
        session_id: id,
        total_responses: session.sme_responses.len(),
    }))
}

/// POST /api/v1/sessions/:id/strategies
///
/// Generates the strategy bundle for a session. The narrative generator is
/// tried once; on any failure the local synthesizer produces the bundle
/// instead, so this endpoint never fails for generator reasons.
pub async fn handle_generate_strategies(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StrategiesResponse>, AppError> {
    let session = state.store.get(id).await?;

    let bundle = generate_bundle(&state, &session).await;
    info!(
        "Session {}: {} strategies generated via {:?}",
        id,
        bundle.strategies.len(),
        bundle.source
    );

    let stored = state
        .store
        .update(id, Box::new(move |s| s.strategy_bundle = Some(bundle)))
        .await?;

    let bundle = stored
        .strategy_bundle
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("bundle missing after update")))?;

    Ok(Json(StrategiesResponse {
        session_id: id,
        bundle,
    }))
}

/// GET /api/v1/sessions/:id/strategies
///
/// Returns the previously generated bundle, or 404 if none exists yet.
pub async fn handle_get_strategies(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StrategiesResponse>, AppError> {
    let session = state.store.get(id).await?;
    let bundle = session.strategy_bundle.ok_or_else(|| {
        AppError::NotFound(format!("no strategies generated for session {id}"))
    })?;

    Ok(Json(StrategiesResponse {
        session_id: id,
        bundle,
    }))
}

/// Narrative path first, synthesis fallback. Missing analysis fields are
/// substituted with defaults rather than surfaced as errors.
async fn generate_bundle(state: &AppState, session: &Session) -> StrategyBundle {
    let profile = session.domain_profile.unwrap_or_default();
    let quality = session.quality_profile.unwrap_or_default();

    let prompt =
        build_narrative_prompt(&profile, &quality, &session.gaps, &session.sme_responses);

    match state.generator.generate(NARRATIVE_SYSTEM, &prompt).await {
        Ok(narrative) => {
            info!(
                "Narrative generated ({} chars); extracting structured strategies",
                narrative.len()
            );
            parse_narrative(&narrative, &profile)
        }
        Err(e) => {
            warn!("Narrative generator unavailable ({e}); synthesizing strategies locally");
            synthesize_strategies(
                session.domain_profile.as_ref(),
                &quality,
                &session.gaps,
                &session.sme_responses,
            )
        }
    }
}
