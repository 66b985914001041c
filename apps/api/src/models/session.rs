use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::classifier::DomainProfile;
use crate::analysis::quality::{Gap, QualityProfile};
use crate::strategy::models::StrategyBundle;

/// One uploaded document after text extraction.
/// Immutable once the session's analysis has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub filename: String,
    pub byte_size: usize,
    pub text: String,
    pub extraction_succeeded: bool,
    pub extraction_method: String,
}

/// A question/answer pair supplied by a subject-matter expert.
/// `answer` is free text; the engine mines keywords from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmeResponse {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Accumulated per-session state: uploaded documents, analysis results,
/// SME answers, and at most one strategy bundle. Mutated additively as
/// each pipeline step completes; never merged with another session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub documents: Vec<UploadedDocument>,
    pub domain_profile: Option<DomainProfile>,
    pub quality_profile: Option<QualityProfile>,
    pub gaps: Vec<Gap>,
    pub sme_responses: Vec<SmeResponse>,
    pub strategy_bundle: Option<StrategyBundle>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Session {
            id: Uuid::new_v4(),
            documents: Vec::new(),
            domain_profile: None,
            quality_profile: None,
            gaps: Vec::new(),
            sme_responses: Vec::new(),
            strategy_bundle: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Concatenated text of all successfully extracted documents.
    pub fn merged_text(&self) -> String {
        self.documents
            .iter()
            .filter(|d| d.extraction_succeeded)
            .map(|d| d.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}
