//! Domain classification — scores raw text against fixed per-domain keyword
//! sets and estimates audience complexity from content length.
//!
//! Confidence and suitability are bounded heuristic pseudo-scores (a base
//! value plus an offset capped by match count). They are NOT calibrated
//! probabilities and must not be presented as such.

use serde::{Deserialize, Serialize};

/// Fixed top-level subject categories used to select content templates.
///
/// Declaration order doubles as the tie-break order: when two domains score
/// the same match count, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Domain {
    Education,
    Healthcare,
    Technology,
    Business,
    Compliance,
    Manufacturing,
    Finance,
    Retail,
}

impl Domain {
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Education => "Education",
            Domain::Healthcare => "Healthcare",
            Domain::Technology => "Technology",
            Domain::Business => "Business & Management",
            Domain::Compliance => "Compliance & Regulatory",
            Domain::Manufacturing => "Manufacturing",
            Domain::Finance => "Finance",
            Domain::Retail => "Retail",
        }
    }
}

/// Audience sophistication tier, derived from content length as a proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexityTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl ComplexityTier {
    pub fn label(&self) -> &'static str {
        match self {
            ComplexityTier::Beginner => "Beginner",
            ComplexityTier::Intermediate => "Intermediate",
            ComplexityTier::Advanced => "Advanced",
        }
    }
}

/// Classification result for one content unit (or merged set of units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainProfile {
    pub primary_domain: Domain,
    /// 0-100 heuristic match confidence, never below `MIN_CONFIDENCE`.
    pub confidence: u8,
    pub complexity: ComplexityTier,
    /// 0-100 heuristic e-learning suitability estimate.
    pub suitability_score: u8,
}

impl Default for DomainProfile {
    /// Safe substitute when no classification exists (spec: missing profile
    /// never errors downstream).
    fn default() -> Self {
        DomainProfile {
            primary_domain: DEFAULT_DOMAIN,
            confidence: MIN_CONFIDENCE,
            complexity: ComplexityTier::Intermediate,
            suitability_score: BASE_SUITABILITY,
        }
    }
}

struct DomainKeywords {
    domain: Domain,
    keywords: &'static [&'static str],
}

/// Keyword catalogue, one entry per domain. Matching is case-insensitive
/// substring counting; keywords must be lowercase.
const DOMAIN_KEYWORDS: &[DomainKeywords] = &[
    DomainKeywords {
        domain: Domain::Education,
        keywords: &[
            "curriculum", "pedagogy", "student", "classroom", "lesson",
            "instruction", "teacher", "syllabus", "learner",
        ],
    },
    DomainKeywords {
        domain: Domain::Healthcare,
        keywords: &[
            "patient", "clinical", "diagnosis", "treatment", "nursing",
            "hospital", "medical", "hipaa", "pharmacology", "triage",
        ],
    },
    DomainKeywords {
        domain: Domain::Technology,
        keywords: &[
            "software", "programming", "database", "deployment", "cloud",
            "algorithm", "devops", "api", "cybersecurity", "codebase",
        ],
    },
    DomainKeywords {
        domain: Domain::Business,
        keywords: &[
            "management", "leadership", "sales", "marketing", "customer",
            "revenue", "negotiation", "stakeholder", "operations",
        ],
    },
    DomainKeywords {
        domain: Domain::Compliance,
        keywords: &[
            "regulation", "policy", "audit", "legal", "gdpr", "governance",
            "compliance", "certification", "liability",
        ],
    },
    DomainKeywords {
        domain: Domain::Manufacturing,
        keywords: &[
            "production", "assembly", "machinery", "quality control", "lean",
            "maintenance", "warehouse", "shop floor", "tooling",
        ],
    },
    DomainKeywords {
        domain: Domain::Finance,
        keywords: &[
            "banking", "investment", "portfolio", "trading", "accounting",
            "loan", "underwriting", "ledger",
        ],
    },
    DomainKeywords {
        domain: Domain::Retail,
        keywords: &[
            "merchandising", "inventory", "checkout", "shopper", "storefront",
            "point of sale", "stockroom",
        ],
    },
];

/// Returned when no keyword matches at all.
const DEFAULT_DOMAIN: Domain = Domain::Business;

const MIN_CONFIDENCE: u8 = 35;
const BASE_CONFIDENCE: u8 = 68;
const MAX_CONFIDENCE: u8 = 94;
const BASE_SUITABILITY: u8 = 72;
const MAX_SUITABILITY: u8 = 96;

/// Character-count bands for the complexity proxy.
const BEGINNER_MAX_CHARS: usize = 2000;
const INTERMEDIATE_MAX_CHARS: usize = 5000;

/// Classifies `text` into a domain/complexity profile.
///
/// This operation never fails: empty or unmatched text classifies to the
/// default domain at minimum confidence. Output is deterministic for
/// identical input.
pub fn classify_domain(text: &str) -> DomainProfile {
    let lower = text.to_lowercase();
    let (primary_domain, match_count) = best_domain(&lower);
    let complexity = complexity_for_length(text.chars().count());

    let (confidence, suitability_score) = if match_count == 0 {
        (MIN_CONFIDENCE, BASE_SUITABILITY)
    } else {
        let confidence =
            (BASE_CONFIDENCE as usize + match_count * 3).min(MAX_CONFIDENCE as usize) as u8;
        let suitability =
            (BASE_SUITABILITY as usize + match_count * 2).min(MAX_SUITABILITY as usize) as u8;
        (confidence, suitability)
    };

    DomainProfile {
        primary_domain,
        confidence,
        complexity,
        suitability_score,
    }
}

/// Picks the domain with the highest total keyword match count.
/// Ties resolve to the first-declared domain; zero matches resolve to the
/// default domain.
fn best_domain(lower_text: &str) -> (Domain, usize) {
    let mut best = (DEFAULT_DOMAIN, 0usize);
    for entry in DOMAIN_KEYWORDS {
        let count: usize = entry
            .keywords
            .iter()
            .map(|kw| lower_text.matches(kw).count())
            .sum();
        if count > best.1 {
            best = (entry.domain, count);
        }
    }
    best
}

fn complexity_for_length(char_count: usize) -> ComplexityTier {
    if char_count < BEGINNER_MAX_CHARS {
        ComplexityTier::Beginner
    } else if char_count <= INTERMEDIATE_MAX_CHARS {
        ComplexityTier::Intermediate
    } else {
        ComplexityTier::Advanced
    }
}
