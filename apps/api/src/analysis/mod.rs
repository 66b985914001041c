// Content Analysis Engine
// Implements: document text extraction, keyword mining, domain
// classification, and heuristic quality/gap assessment.
// All operations here are pure and deterministic; extraction failures are
// recorded on the document, never raised.

pub mod classifier;
pub mod extract;
pub mod handlers;
pub mod keywords;
pub mod quality;
