#![allow(dead_code)]

//! Prompt text for the external narrative generator.
//!
//! The output format demanded here is exactly what `narrative_parser`
//! extracts, and the domain descriptions are rendered from the same
//! template catalogue the synthesizer uses, so the two generation paths
//! cannot drift apart.

use crate::analysis::classifier::DomainProfile;
use crate::analysis::quality::{Gap, QualityProfile};
use crate::models::session::SmeResponse;
use crate::strategy::models::StrategyBundle;
use crate::strategy::templates::{complexity_template, template_for};

/// System prompt for narrative strategy generation.
pub const NARRATIVE_SYSTEM: &str =
    "You are a senior instructional designer writing a personalized training \
     delivery plan. Respond in markdown prose. Introduce every strategy with \
     the 🎯 marker followed by a bold title on the same line. For each \
     strategy include a one-paragraph description, then bold-labeled lines \
     for **Suitability:** (a percentage), **Implementation Timeline:**, \
     **Key Benefits:** (a bulleted list), and **Expert Rationale:**. Close \
     the document with '## Executive Summary' and '## Implementation \
     Roadmap' sections. Do not invent facts about the client's content.";

/// User prompt template. Replace: {profile_block}, {quality_block},
/// {gaps_block}, {sme_block}, {catalogue_block}.
const NARRATIVE_PROMPT_TEMPLATE: &str = "\
Design a personalized training delivery plan from the analysis below.

CONTENT PROFILE:
{profile_block}

QUALITY ASSESSMENT:
{quality_block}

CONTENT GAPS:
{gaps_block}

EXPERT INPUT:
{sme_block}

HOUSE DELIVERY CATALOGUE (align recommendations with these models):
{catalogue_block}

Produce between 3 and 5 strategies. Quote the expert's own words where they \
sharpen a recommendation, reference the listed gaps by name, and state a \
suitability percentage for every strategy.";

/// Builds the narrative generation prompt from the session's analysis state.
pub fn build_narrative_prompt(
    profile: &DomainProfile,
    quality: &QualityProfile,
    gaps: &[Gap],
    sme_responses: &[SmeResponse],
) -> String {
    let profile_block = format!(
        "- Domain: {} (confidence {}/100)\n- Complexity: {}\n- E-learning suitability: {}/100",
        profile.primary_domain.label(),
        profile.confidence,
        profile.complexity.label(),
        profile.suitability_score
    );

    let quality_block = format!(
        "- Overall: {}/100\n- Clarity: {} | Completeness: {} | Engagement: {} | Currency: {}",
        quality.overall, quality.clarity, quality.completeness, quality.engagement, quality.currency
    );

    let gaps_block = if gaps.is_empty() {
        "- None identified".to_string()
    } else {
        gaps.iter()
            .map(|g| {
                format!(
                    "- {} ({} severity): {}",
                    g.gap_type,
                    g.severity.label(),
                    g.recommendation
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let sme_block = if sme_responses.is_empty() {
        "- No expert answers provided".to_string()
    } else {
        sme_responses
            .iter()
            .map(|r| format!("- Q: {}\n  A: {}", r.question, r.answer))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let domain = template_for(profile.primary_domain);
    let tier = complexity_template(profile.complexity);
    let catalogue_block = format!(
        "- Default {} model: \"{}\" ({}): {}\n- Default {} model: \"{}\" ({}): {}",
        profile.primary_domain.label(),
        domain.name,
        domain.implementation_weeks,
        domain.description,
        profile.complexity.label(),
        tier.name,
        tier.implementation_weeks,
        tier.description
    );

    NARRATIVE_PROMPT_TEMPLATE
        .replace("{profile_block}", &profile_block)
        .replace("{quality_block}", &quality_block)
        .replace("{gaps_block}", &gaps_block)
        .replace("{sme_block}", &sme_block)
        .replace("{catalogue_block}", &catalogue_block)
}

/// Renders a bundle into the narrative shape the generator is asked for and
/// the parser extracts. Used to round-trip synthesized bundles through the
/// parser path.
pub fn render_narrative(bundle: &StrategyBundle) -> String {
    let mut out = String::new();

    for strategy in &bundle.strategies {
        out.push_str(&format!("🎯 **{}**\n", strategy.name));
        out.push_str(&format!("{}\n", strategy.description));
        out.push_str(&format!("**Suitability:** {}%\n", strategy.suitability));
        out.push_str(&format!(
            "**Implementation Timeline:** {}\n",
            strategy.implementation_weeks
        ));
        out.push_str("**Key Benefits:**\n");
        for benefit in &strategy.benefits {
            out.push_str(&format!("- {benefit}\n"));
        }
        out.push_str(&format!(
            "**Expert Rationale:** {}\n\n",
            strategy.expert_rationale
        ));
    }

    out.push_str(&format!(
        "## Executive Summary\n{}\n\n",
        bundle.executive_summary
    ));
    out.push_str(&format!(
        "## Implementation Roadmap\n{}\n",
        bundle.implementation_roadmap
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::DomainProfile;
    use crate::analysis::quality::{GapSeverity, QualityProfile};
    use crate::strategy::narrative_parser::parse_narrative;
    use crate::strategy::synthesizer::synthesize_strategies;

    fn make_gap() -> Gap {
        Gap {
            gap_type: "Assessment Strategy Needed".to_string(),
            severity: GapSeverity::High,
            impact: "No way to verify learning".to_string(),
            category: "assessment".to_string(),
            description: "No evaluation criteria detected.".to_string(),
            recommendation: "Add a graded checkpoint per module.".to_string(),
        }
    }

    fn make_sme() -> SmeResponse {
        SmeResponse {
            question: "Where do new hires struggle?".to_string(),
            answer: "They cannot apply the escalation policy under pressure".to_string(),
            category: Some("process".to_string()),
        }
    }

    #[test]
    fn test_prompt_contains_all_signal_blocks() {
        let profile = DomainProfile::default();
        let quality = QualityProfile::default();
        let prompt =
            build_narrative_prompt(&profile, &quality, &[make_gap()], &[make_sme()]);
        assert!(prompt.contains("Business & Management"));
        assert!(prompt.contains("Assessment Strategy Needed"));
        assert!(prompt.contains("escalation policy under pressure"));
        assert!(prompt.contains("Scenario-Based Business Coaching"));
        assert!(!prompt.contains("{profile_block}"));
    }

    #[test]
    fn test_prompt_marks_missing_gaps_and_sme() {
        let prompt = build_narrative_prompt(
            &DomainProfile::default(),
            &QualityProfile::default(),
            &[],
            &[],
        );
        assert!(prompt.contains("None identified"));
        assert!(prompt.contains("No expert answers provided"));
    }

    #[test]
    fn test_synthesized_bundle_round_trips_through_parser() {
        let profile = DomainProfile::default();
        let quality = QualityProfile {
            overall: 70,
            clarity: 70,
            completeness: 70,
            engagement: 70,
            currency: 70,
        };
        let synthesized =
            synthesize_strategies(Some(&profile), &quality, &[make_gap()], &[make_sme()]);

        let narrative = render_narrative(&synthesized);
        let parsed = parse_narrative(&narrative, &profile);

        assert_eq!(parsed.strategies.len(), synthesized.strategies.len());
        for (original, reparsed) in synthesized.strategies.iter().zip(parsed.strategies.iter()) {
            assert_eq!(reparsed.name, original.name);
            assert_eq!(reparsed.suitability, original.suitability);
            assert_eq!(reparsed.implementation_weeks, original.implementation_weeks);
            assert!(!reparsed.benefits.is_empty());
        }
        assert_eq!(parsed.executive_summary, synthesized.executive_summary);
        assert_eq!(parsed.implementation_roadmap, synthesized.implementation_roadmap);
    }
}
