use serde::{Deserialize, Serialize};

/// Which path produced a bundle: local synthesis, narrative parsing, or the
/// parser's guaranteed single-strategy fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategySource {
    Synthesized,
    Parsed,
    ParsedFallback,
}

/// A structured, named training-delivery recommendation.
///
/// Within one bundle, `name` and `description` are unique across strategies,
/// and conditionally-added strategies embed literal fragments of the inputs
/// that triggered them (an SME answer excerpt, a gap type, a quality score).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub strategy_type: String,
    pub description: String,
    pub implementation_weeks: String,
    pub benefits: Vec<String>,
    pub ideal_for: Vec<String>,
    pub expert_rationale: String,
    /// 0-100 heuristic fit estimate.
    pub suitability: u8,
    pub personalization_flags: Vec<String>,
    /// Raw span text when parsed from a narrative; `None` when synthesized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_content: Option<String>,
}

/// The complete strategy output for one session: 1-6 strategies plus the
/// templated summary and roadmap paragraphs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyBundle {
    pub strategies: Vec<Strategy>,
    pub executive_summary: String,
    pub implementation_roadmap: String,
    pub source: StrategySource,
}
