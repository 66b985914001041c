//! Quality and gap heuristics — the fallback assessor used when no external
//! content assessment is available.
//!
//! Scores are coarse, bounded (60-100 per axis), and stable for identical
//! input. The output schema matches an externally-sourced assessment so
//! downstream components never know (or care) which produced it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::keywords::extract_keywords;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GapSeverity {
    Low,
    Medium,
    High,
}

impl GapSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            GapSeverity::Low => "Low",
            GapSeverity::Medium => "Medium",
            GapSeverity::High => "High",
        }
    }
}

/// A named deficiency in source content relative to e-learning readiness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub gap_type: String,
    pub severity: GapSeverity,
    pub impact: String,
    pub category: String,
    pub description: String,
    pub recommendation: String,
}

/// Per-axis quality scores, each within 60-100 when produced heuristically.
/// `overall` is always derived from the other four, never set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityProfile {
    pub overall: u8,
    pub clarity: u8,
    pub completeness: u8,
    pub engagement: u8,
    pub currency: u8,
}

impl Default for QualityProfile {
    /// Neutral mid-band profile used when assessment is absent.
    fn default() -> Self {
        let clarity = 75;
        let completeness = 75;
        let engagement = 75;
        let currency = 75;
        QualityProfile {
            overall: derive_overall(clarity, completeness, engagement, currency),
            clarity,
            completeness,
            engagement,
            currency,
        }
    }
}

const AXIS_FLOOR: u8 = 60;
const AXIS_CEILING: u8 = 96;

/// Cues suggesting the content already asks learners to do something.
const INTERACTIVE_CUES: &[&str] = &[
    "quiz", "exercise", "activity", "interactive", "try it", "practice",
    "hands-on", "workshop", "simulation", "role play",
];

const ASSESSMENT_CUES: &[&str] = &[
    "assessment", "quiz", "test", "exam", "knowledge check", "evaluation",
    "rubric", "grading",
];

const VISUAL_CUES: &[&str] = &[
    "diagram", "chart", "image", "figure", "illustration", "video",
    "screenshot", "graph",
];

const EXAMPLE_CUES: &[&str] = &[
    "example", "case study", "scenario", "for instance", "walkthrough",
];

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("valid year regex"));

/// Produces a quality profile and an ordered gap list for `text`.
///
/// Deterministic: identical text always produces identical output. Gaps are
/// emitted most severe first.
pub fn assess_quality(text: &str) -> (QualityProfile, Vec<Gap>) {
    let lower = text.to_lowercase();

    let interactive_hits = cue_hits(&lower, INTERACTIVE_CUES);
    let assessment_hits = cue_hits(&lower, ASSESSMENT_CUES);
    let visual_hits = cue_hits(&lower, VISUAL_CUES);
    let example_hits = cue_hits(&lower, EXAMPLE_CUES);

    let clarity = clarity_score(text);
    let completeness = completeness_score(text.chars().count());
    let engagement = engagement_score(interactive_hits, example_hits, &lower);
    let currency = currency_score(text);
    let overall = derive_overall(clarity, completeness, engagement, currency);

    let profile = QualityProfile {
        overall,
        clarity,
        completeness,
        engagement,
        currency,
    };

    let gaps = detect_gaps(
        &profile,
        &extract_keywords(text),
        interactive_hits,
        assessment_hits,
        visual_hits,
        example_hits,
    );

    (profile, gaps)
}

fn cue_hits(lower_text: &str, cues: &[&str]) -> usize {
    cues.iter()
        .map(|cue| lower_text.matches(cue).count())
        .sum()
}

/// Structural clarity: headings and bullet lists raise the score.
fn clarity_score(text: &str) -> u8 {
    let mut headings = 0usize;
    let mut bullets = 0usize;
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') || is_numbered_heading(trimmed) {
            headings += 1;
        } else if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
            bullets += 1;
        }
    }
    let score = 68 + (headings * 4).min(16) + bullets.min(8);
    clamp_axis(score)
}

fn is_numbered_heading(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_digit()) && matches!(chars.next(), Some('.'))
}

/// Completeness proxied by content volume bands.
fn completeness_score(char_count: usize) -> u8 {
    let score = if char_count < 1000 {
        64
    } else if char_count < 3000 {
        74
    } else if char_count < 6000 {
        84
    } else {
        92
    };
    clamp_axis(score)
}

fn engagement_score(interactive_hits: usize, example_hits: usize, lower_text: &str) -> u8 {
    let question_bonus = if lower_text.matches('?').count() >= 3 { 3 } else { 0 };
    let score = 62 + (interactive_hits * 6).min(18) + (example_hits * 4).min(12) + question_bonus;
    clamp_axis(score)
}

/// Currency from year mentions: recent years raise the score, exclusively
/// old years lower it, no years at all stays neutral.
fn currency_score(text: &str) -> u8 {
    let years: Vec<u32> = YEAR_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    let score = if years.is_empty() {
        74
    } else if years.iter().any(|y| *y >= 2021) {
        88
    } else if years.iter().all(|y| *y < 2016) {
        62
    } else {
        78
    };
    clamp_axis(score)
}

fn clamp_axis(score: usize) -> u8 {
    score.clamp(AXIS_FLOOR as usize, AXIS_CEILING as usize) as u8
}

/// overall = 0.3*clarity + 0.3*completeness + 0.2*engagement + 0.2*currency
fn derive_overall(clarity: u8, completeness: u8, engagement: u8, currency: u8) -> u8 {
    let weighted = clarity as u32 * 30
        + completeness as u32 * 30
        + engagement as u32 * 20
        + currency as u32 * 20;
    ((weighted + 50) / 100) as u8
}

/// Fixed gap catalogue, gated by simple conditions. High severity entries
/// come first, then Medium, then Low. `themes` are the content's extracted
/// keywords, folded into recommendations where they sharpen them.
fn detect_gaps(
    profile: &QualityProfile,
    themes: &[String],
    interactive_hits: usize,
    assessment_hits: usize,
    visual_hits: usize,
    example_hits: usize,
) -> Vec<Gap> {
    let mut gaps = Vec::new();

    if interactive_hits == 0 {
        gaps.push(Gap {
            gap_type: "Interactive Elements Missing".to_string(),
            severity: GapSeverity::High,
            impact: "Learners read passively instead of applying concepts".to_string(),
            category: "engagement".to_string(),
            description: "The content contains no interactive cues such as exercises, \
                          practice activities, or simulations."
                .to_string(),
            recommendation: "Add branching scenarios, short practice tasks, or knowledge \
                             checks after each major section."
                .to_string(),
        });
    }

    if assessment_hits == 0 {
        gaps.push(Gap {
            gap_type: "Assessment Strategy Needed".to_string(),
            severity: GapSeverity::High,
            impact: "There is no way to verify learners actually absorbed the material"
                .to_string(),
            category: "assessment".to_string(),
            description: "No quizzes, tests, or evaluation criteria were detected in the \
                          source content."
                .to_string(),
            recommendation: "Define a pre/post assessment pair and at least one graded \
                             checkpoint per module."
                .to_string(),
        });
    }

    if visual_hits == 0 {
        gaps.push(Gap {
            gap_type: "Visual Content Gap".to_string(),
            severity: GapSeverity::Medium,
            impact: "Text-only delivery lowers retention for visual learners".to_string(),
            category: "media".to_string(),
            description: "No references to diagrams, charts, video, or other visual aids \
                          were found."
                .to_string(),
            recommendation: "Storyboard at least one diagram or short video per key concept."
                .to_string(),
        });
    }

    if example_hits < 2 {
        let recommendation = if themes.is_empty() {
            "Add a worked example or short case study to every module.".to_string()
        } else {
            format!(
                "Add a worked example or short case study to every module, starting \
                 with the content's own themes ({}).",
                themes.join(", ")
            )
        };
        gaps.push(Gap {
            gap_type: "Practical Examples Needed".to_string(),
            severity: GapSeverity::Medium,
            impact: "Learners struggle to transfer abstract content to their day-to-day work"
                .to_string(),
            category: "application".to_string(),
            description: "The content includes few worked examples, case studies, or \
                          scenarios."
                .to_string(),
            recommendation,
        });
    }

    if profile.clarity < 70 {
        gaps.push(Gap {
            gap_type: "Structural Clarity Improvements".to_string(),
            severity: GapSeverity::Medium,
            impact: "Unstructured prose makes the material harder to navigate and chunk"
                .to_string(),
            category: "structure".to_string(),
            description: "The content shows little heading or list structure.".to_string(),
            recommendation: "Break the material into titled sections with bulleted key \
                             points."
                .to_string(),
        });
    }

    if profile.currency < 70 {
        gaps.push(Gap {
            gap_type: "Content Currency Review".to_string(),
            severity: GapSeverity::Low,
            impact: "Dated references erode learner trust in the material".to_string(),
            category: "currency".to_string(),
            description: "Year references in the content skew old.".to_string(),
            recommendation: "Review statistics, screenshots, and citations for anything \
                             that has changed."
                .to_string(),
        });
    }

    gaps
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRUCTURED_TEXT: &str = "# Patient Intake\n\
        - verify identity\n\
        - record vitals\n\
        ## Practice\n\
        Try it yourself with this exercise: a quiz follows each scenario.\n\
        For instance, review the 2024 triage example and the assessment rubric diagram.";

    #[test]
    fn test_assessment_is_deterministic() {
        let a = assess_quality(STRUCTURED_TEXT);
        let b = assess_quality(STRUCTURED_TEXT);
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1);
    }

    #[test]
    fn test_axes_stay_within_documented_bounds() {
        let long = "word ".repeat(3000);
        for text in ["", "short", STRUCTURED_TEXT, long.as_str()] {
            let (profile, _) = assess_quality(text);
            for axis in [
                profile.clarity,
                profile.completeness,
                profile.engagement,
                profile.currency,
            ] {
                assert!((AXIS_FLOOR..=AXIS_CEILING).contains(&axis), "axis {axis} out of bounds");
            }
            assert!(profile.overall <= 100);
        }
    }

    #[test]
    fn test_overall_is_derived_from_axes() {
        let (profile, _) = assess_quality(STRUCTURED_TEXT);
        assert_eq!(
            profile.overall,
            derive_overall(
                profile.clarity,
                profile.completeness,
                profile.engagement,
                profile.currency
            )
        );
    }

    #[test]
    fn test_interactive_content_suppresses_interactive_gap() {
        let (_, gaps) = assess_quality(STRUCTURED_TEXT);
        assert!(!gaps
            .iter()
            .any(|g| g.gap_type == "Interactive Elements Missing"));
    }

    #[test]
    fn test_plain_prose_flags_interactive_and_assessment_gaps() {
        let (_, gaps) = assess_quality("Plain prose about management topics with no cues.");
        let types: Vec<&str> = gaps.iter().map(|g| g.gap_type.as_str()).collect();
        assert!(types.contains(&"Interactive Elements Missing"));
        assert!(types.contains(&"Assessment Strategy Needed"));
    }

    #[test]
    fn test_gaps_ordered_most_severe_first() {
        let (_, gaps) = assess_quality("Plain prose written in 2010 about nothing much.");
        for pair in gaps.windows(2) {
            assert!(pair[0].severity >= pair[1].severity);
        }
    }

    #[test]
    fn test_old_years_lower_currency() {
        let (old, _) = assess_quality("Figures published in 2008 and 2011.");
        let (recent, _) = assess_quality("Figures published in 2024 and 2025.");
        assert!(old.currency < recent.currency);
    }

    #[test]
    fn test_completeness_tracks_length_bands() {
        assert!(completeness_score(500) < completeness_score(2000));
        assert!(completeness_score(2000) < completeness_score(4000));
        assert!(completeness_score(4000) < completeness_score(10_000));
    }
}
