//! Strategy synthesis — deterministically builds a personalized strategy
//! bundle from the domain profile, quality scores, gaps, and SME answers.
//!
//! Construction order is fixed: domain, SME focus, gap resolution, quality
//! uplift, complexity match. Domain and complexity strategies are always
//! present; the middle three are conditional. The complexity strategy is
//! appended even when it overlaps the domain strategy thematically; that
//! redundancy is accepted, a skipped trigger is not.

use crate::analysis::classifier::{ComplexityTier, DomainProfile};
use crate::analysis::keywords::extract_keywords;
use crate::analysis::quality::{Gap, GapSeverity, QualityProfile};
use crate::models::session::SmeResponse;
use crate::strategy::models::{Strategy, StrategyBundle, StrategySource};
use crate::strategy::templates::{complexity_template, template_for, StrategyTemplate};

/// Quality strategies are added below this overall score.
const QUALITY_TRIGGER: u8 = 80;
/// Target score quoted in quality-enhancement strategies.
const QUALITY_TARGET: u8 = 90;

/// SME answer prefix lengths spliced into the domain strategy.
const NAME_SPLICE_CHARS: usize = 30;
const DESC_SPLICE_CHARS: usize = 100;

/// Synthesizes the full strategy bundle.
///
/// Never fails on well-formed input; a missing domain profile is replaced
/// with the default profile rather than erroring. The result always holds
/// between 2 and 5 strategies in construction order.
pub fn synthesize_strategies(
    profile: Option<&DomainProfile>,
    quality: &QualityProfile,
    gaps: &[Gap],
    sme_responses: &[SmeResponse],
) -> StrategyBundle {
    let profile = profile.copied().unwrap_or_default();

    let mut strategies = Vec::with_capacity(5);
    strategies.push(domain_strategy(&profile, sme_responses));

    if let Some(first) = sme_responses.first() {
        strategies.push(sme_strategy(first));
    }
    if let Some(top_gap) = gaps.first() {
        strategies.push(gap_strategy(top_gap));
    }
    if quality.overall < QUALITY_TRIGGER {
        strategies.push(quality_strategy(quality));
    }
    strategies.push(complexity_strategy(profile.complexity));

    for (i, strategy) in strategies.iter_mut().enumerate() {
        strategy.id = format!("strategy-{}", i + 1);
    }

    let executive_summary =
        build_executive_summary(&profile, quality, gaps, sme_responses, strategies.len());
    let implementation_roadmap = build_roadmap(strategies.len(), profile.complexity);

    StrategyBundle {
        strategies,
        executive_summary,
        implementation_roadmap,
        source: StrategySource::Synthesized,
    }
}

/// Char-safe prefix of `s`, trimmed of trailing whitespace.
fn excerpt(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect::<String>().trim_end().to_string()
}

fn from_template(template: &StrategyTemplate, flags: Vec<String>) -> Strategy {
    Strategy {
        id: String::new(),
        name: template.name.to_string(),
        strategy_type: template.strategy_type.to_string(),
        description: template.description.to_string(),
        implementation_weeks: template.implementation_weeks.to_string(),
        benefits: template.benefits.iter().map(|b| b.to_string()).collect(),
        ideal_for: template.ideal_for.iter().map(|i| i.to_string()).collect(),
        expert_rationale: template.rationale.to_string(),
        suitability: template.base_suitability,
        personalization_flags: flags,
        full_content: None,
    }
}

/// Step 1: always included. Domain catalogue template, personalized with the
/// first SME answer when one exists.
fn domain_strategy(profile: &DomainProfile, sme_responses: &[SmeResponse]) -> Strategy {
    let template = template_for(profile.primary_domain);
    let mut strategy = from_template(template, vec!["domain_template".to_string()]);

    if let Some(first) = sme_responses.first() {
        strategy.personalization_flags.push("sme_input".to_string());
        strategy.name = format!(
            "{}: {}",
            template.name,
            excerpt(&first.answer, NAME_SPLICE_CHARS)
        );
        strategy.description = format!(
            "{} Tailored to your stated priority: \"{}\".",
            template.description,
            excerpt(&first.answer, DESC_SPLICE_CHARS)
        );
        strategy.expert_rationale = format!(
            "{} Your answer to \"{}\" shaped this recommendation directly: \"{}\".",
            template.rationale,
            first.question,
            excerpt(&first.answer, DESC_SPLICE_CHARS)
        );
    }

    strategy
}

/// Step 2: included when SME answers exist. Organized around keywords mined
/// from the first answer; quotes the question and the full answer.
fn sme_strategy(first: &SmeResponse) -> Strategy {
    let keywords = extract_keywords(&first.answer);
    let focus = if keywords.is_empty() {
        "your stated priorities".to_string()
    } else {
        keywords.join(", ")
    };

    Strategy {
        id: String::new(),
        name: format!("Expert-Guided Focus: {}", excerpt(&first.answer, NAME_SPLICE_CHARS)),
        strategy_type: "sme_focus".to_string(),
        description: format!(
            "A delivery track sequenced around the themes your expert raised ({focus}), \
             so the program opens on the problem they actually named."
        ),
        implementation_weeks: "4-6 weeks".to_string(),
        benefits: vec![
            "Directly addresses expert-identified needs".to_string(),
            "Opens with the highest-urgency topic instead of chapter one".to_string(),
            format!("Keeps {focus} visible throughout the program"),
        ],
        ideal_for: vec![
            "Teams with an engaged subject-matter expert".to_string(),
            "Programs with a known pain point".to_string(),
        ],
        expert_rationale: format!(
            "Your expert was asked \"{}\" and answered \"{}\". This strategy turns that \
             answer into the organizing spine of the program.",
            first.question, first.answer
        ),
        suitability: 88,
        personalization_flags: vec!["sme_input".to_string(), "keyword_extraction".to_string()],
        full_content: None,
    }
}

/// Step 3: included when gaps exist. Built from the highest-priority gap.
fn gap_strategy(gap: &Gap) -> Strategy {
    let (implementation_weeks, suitability) = match gap.severity {
        GapSeverity::High => ("2-4 weeks", 89),
        GapSeverity::Medium => ("3-5 weeks", 85),
        GapSeverity::Low => ("4-6 weeks", 80),
    };

    Strategy {
        id: String::new(),
        name: format!("Closing the Gap: {}", gap.gap_type),
        strategy_type: "gap_resolution".to_string(),
        description: format!(
            "A remediation track focused on \"{}\". {}",
            gap.gap_type, gap.recommendation
        ),
        implementation_weeks: implementation_weeks.to_string(),
        benefits: vec![
            format!("Resolves the {} gap before wider rollout", gap.category),
            "Raises content readiness where the assessment found it weakest".to_string(),
            gap.impact.clone(),
        ],
        ideal_for: vec![
            format!("Content flagged in the {} category", gap.category),
            "Programs still ahead of their launch date".to_string(),
        ],
        expert_rationale: format!(
            "The assessment flagged \"{}\" at {} severity. Addressing it first prevents \
             rework once delivery begins.",
            gap.gap_type,
            gap.severity.label()
        ),
        suitability,
        personalization_flags: vec!["gap_resolution".to_string()],
        full_content: None,
    }
}

/// Step 4: included when overall quality is below the trigger. States the
/// current score and the target explicitly.
fn quality_strategy(quality: &QualityProfile) -> Strategy {
    Strategy {
        id: String::new(),
        name: "Quality Uplift Sprint".to_string(),
        strategy_type: "quality_enhancement".to_string(),
        description: format!(
            "A focused revision pass lifting the content from its current overall score \
             of {} toward a target of {}.",
            quality.overall, QUALITY_TARGET
        ),
        implementation_weeks: "2-4 weeks".to_string(),
        benefits: vec![
            format!(
                "Targets the weakest axes first (clarity {}, engagement {})",
                quality.clarity, quality.engagement
            ),
            "Improves learner completion and satisfaction scores".to_string(),
            "Leaves behind a reusable editorial checklist".to_string(),
        ],
        ideal_for: vec![
            "Content scoring below the launch threshold".to_string(),
            "Teams with editorial capacity available".to_string(),
        ],
        expert_rationale: format!(
            "The material currently scores {}/100 overall. Structured revision cycles \
             are the fastest route to the {} target before wider rollout.",
            quality.overall, QUALITY_TARGET
        ),
        suitability: 86,
        personalization_flags: vec!["quality_scores".to_string()],
        full_content: None,
    }
}

/// Step 5: always included, selected by complexity tier.
fn complexity_strategy(tier: ComplexityTier) -> Strategy {
    let template = complexity_template(tier);
    let mut strategy = from_template(template, vec!["complexity_tier".to_string()]);
    strategy.expert_rationale = format!(
        "{} Selected for a {} audience.",
        template.rationale,
        tier.label()
    );
    strategy
}

fn build_executive_summary(
    profile: &DomainProfile,
    quality: &QualityProfile,
    gaps: &[Gap],
    sme_responses: &[SmeResponse],
    strategy_count: usize,
) -> String {
    format!(
        "Analysis of your {} content (complexity: {}) produced {} delivery strategies. \
         The plan draws on {} expert answer(s), targets {} identified content gap(s), \
         and starts from an overall quality score of {}/100.",
        profile.primary_domain.label(),
        profile.complexity.label(),
        strategy_count,
        sme_responses.len(),
        gaps.len(),
        quality.overall
    )
}

/// Total rollout length: two weeks per strategy plus a tier surcharge, so
/// Advanced programs always run longer than Beginner ones.
pub(crate) fn roadmap_total_weeks(strategy_count: usize, tier: ComplexityTier) -> usize {
    let tier_weeks = match tier {
        ComplexityTier::Beginner => 2,
        ComplexityTier::Intermediate => 4,
        ComplexityTier::Advanced => 6,
    };
    strategy_count * 2 + tier_weeks
}

fn build_roadmap(strategy_count: usize, tier: ComplexityTier) -> String {
    let total = roadmap_total_weeks(strategy_count, tier);
    let foundation_end = (total / 3).max(2);
    let rollout_end = (2 * total / 3).max(foundation_end + 1);

    format!(
        "Phase 1 (weeks 1-{foundation_end}): stand up infrastructure, confirm audiences, \
         and prepare materials for the highest-suitability strategies. \
         Phase 2 (weeks {}-{rollout_end}): pilot each strategy with a small cohort and \
         collect completion and feedback data. \
         Phase 3 (weeks {}-{total}): roll out to the full audience, folding pilot \
         feedback into each module. Total duration: {total} weeks across {strategy_count} \
         strategies at the {} tier.",
        foundation_end + 1,
        rollout_end + 1,
        tier.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::{classify_domain, Domain};
    use crate::analysis::quality::GapSeverity;

    fn make_profile(domain: Domain, complexity: ComplexityTier) -> DomainProfile {
        DomainProfile {
            primary_domain: domain,
            confidence: 80,
            complexity,
            suitability_score: 85,
        }
    }

    fn make_quality(overall: u8) -> QualityProfile {
        QualityProfile {
            overall,
            clarity: overall,
            completeness: overall,
            engagement: overall,
            currency: overall,
        }
    }

    fn make_gap() -> Gap {
        Gap {
            gap_type: "Interactive Elements Missing".to_string(),
            severity: GapSeverity::High,
            impact: "Learners read passively".to_string(),
            category: "engagement".to_string(),
            description: "No interactive cues found.".to_string(),
            recommendation: "Add knowledge checks.".to_string(),
        }
    }

    fn make_sme() -> SmeResponse {
        SmeResponse {
            question: "What is the biggest challenge?".to_string(),
            answer: "Onboarding new nurses takes too long".to_string(),
            category: None,
        }
    }

    #[test]
    fn test_minimum_bundle_is_domain_plus_complexity() {
        let profile = make_profile(Domain::Technology, ComplexityTier::Intermediate);
        let bundle = synthesize_strategies(Some(&profile), &make_quality(95), &[], &[]);
        assert_eq!(bundle.strategies.len(), 2);
        assert_eq!(bundle.strategies[0].strategy_type, "guided_labs");
        assert_eq!(bundle.strategies[1].strategy_type, "integration_program");
        assert_eq!(bundle.source, StrategySource::Synthesized);
    }

    #[test]
    fn test_all_triggers_yield_five_strategies_in_construction_order() {
        let profile = make_profile(Domain::Healthcare, ComplexityTier::Advanced);
        let bundle = synthesize_strategies(
            Some(&profile),
            &make_quality(60),
            &[make_gap()],
            &[make_sme()],
        );
        let types: Vec<&str> = bundle
            .strategies
            .iter()
            .map(|s| s.strategy_type.as_str())
            .collect();
        assert_eq!(
            types,
            vec![
                "clinical_simulation",
                "sme_focus",
                "gap_resolution",
                "quality_enhancement",
                "expert_challenge"
            ]
        );
    }

    #[test]
    fn test_strategy_count_always_between_two_and_five() {
        let profile = make_profile(Domain::Business, ComplexityTier::Beginner);
        for overall in [60u8, 85] {
            for gaps in [vec![], vec![make_gap()]] {
                for sme in [vec![], vec![make_sme()]] {
                    let bundle =
                        synthesize_strategies(Some(&profile), &make_quality(overall), &gaps, &sme);
                    assert!((2..=5).contains(&bundle.strategies.len()));
                }
            }
        }
    }

    #[test]
    fn test_domain_strategy_embeds_sme_answer_verbatim() {
        let profile = make_profile(Domain::Healthcare, ComplexityTier::Intermediate);
        let bundle =
            synthesize_strategies(Some(&profile), &make_quality(90), &[], &[make_sme()]);
        let domain = &bundle.strategies[0];
        assert!(domain
            .description
            .contains("Onboarding new nurses takes too long"));
        assert!(domain
            .expert_rationale
            .contains("What is the biggest challenge?"));
    }

    #[test]
    fn test_sme_strategy_quotes_question_and_full_answer() {
        let bundle = synthesize_strategies(
            None,
            &make_quality(90),
            &[],
            &[make_sme()],
        );
        let sme = bundle
            .strategies
            .iter()
            .find(|s| s.strategy_type == "sme_focus")
            .expect("sme strategy present");
        assert!(sme.expert_rationale.contains("What is the biggest challenge?"));
        assert!(sme
            .expert_rationale
            .contains("Onboarding new nurses takes too long"));
    }

    #[test]
    fn test_gap_strategy_quotes_type_and_severity() {
        let bundle =
            synthesize_strategies(None, &make_quality(90), &[make_gap()], &[]);
        let gap = bundle
            .strategies
            .iter()
            .find(|s| s.strategy_type == "gap_resolution")
            .expect("gap strategy present");
        assert!(gap.name.contains("Interactive Elements Missing"));
        assert!(gap.expert_rationale.contains("High"));
    }

    #[test]
    fn test_quality_strategy_states_current_score_and_target() {
        let bundle = synthesize_strategies(None, &make_quality(64), &[], &[]);
        let quality = bundle
            .strategies
            .iter()
            .find(|s| s.strategy_type == "quality_enhancement")
            .expect("quality strategy present");
        assert!(quality.description.contains("64"));
        assert!(quality.description.contains("90"));
    }

    #[test]
    fn test_quality_at_or_above_trigger_skips_quality_strategy() {
        let bundle = synthesize_strategies(None, &make_quality(80), &[], &[]);
        assert!(!bundle
            .strategies
            .iter()
            .any(|s| s.strategy_type == "quality_enhancement"));
    }

    #[test]
    fn test_missing_profile_falls_back_to_default_domain() {
        let bundle = synthesize_strategies(None, &make_quality(90), &[], &[]);
        assert_eq!(bundle.strategies[0].strategy_type, "blended_coaching");
        assert!(bundle.executive_summary.contains("Business & Management"));
    }

    #[test]
    fn test_names_and_descriptions_are_unique_within_bundle() {
        let profile = make_profile(Domain::Business, ComplexityTier::Intermediate);
        let bundle = synthesize_strategies(
            Some(&profile),
            &make_quality(60),
            &[make_gap()],
            &[make_sme()],
        );
        let mut names: Vec<&str> =
            bundle.strategies.iter().map(|s| s.name.as_str()).collect();
        let mut descriptions: Vec<&str> = bundle
            .strategies
            .iter()
            .map(|s| s.description.as_str())
            .collect();
        let (name_count, desc_count) = (names.len(), descriptions.len());
        names.sort();
        names.dedup();
        descriptions.sort();
        descriptions.dedup();
        assert_eq!(names.len(), name_count);
        assert_eq!(descriptions.len(), desc_count);
    }

    #[test]
    fn test_ids_are_sequential_in_construction_order() {
        let bundle = synthesize_strategies(None, &make_quality(60), &[make_gap()], &[]);
        let ids: Vec<&str> = bundle.strategies.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["strategy-1", "strategy-2", "strategy-3", "strategy-4"]);
    }

    #[test]
    fn test_advanced_roadmap_runs_longer_than_beginner() {
        assert!(
            roadmap_total_weeks(3, ComplexityTier::Advanced)
                > roadmap_total_weeks(3, ComplexityTier::Beginner)
        );
    }

    #[test]
    fn test_roadmap_scales_with_strategy_count() {
        assert!(
            roadmap_total_weeks(5, ComplexityTier::Beginner)
                > roadmap_total_weeks(2, ComplexityTier::Beginner)
        );
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let profile = classify_domain("patient clinical nursing triage");
        let quality = make_quality(70);
        let gaps = vec![make_gap()];
        let sme = vec![make_sme()];
        let a = synthesize_strategies(Some(&profile), &quality, &gaps, &sme);
        let b = synthesize_strategies(Some(&profile), &quality, &gaps, &sme);
        assert_eq!(a.strategies.len(), b.strategies.len());
        for (x, y) in a.strategies.iter().zip(b.strategies.iter()) {
            assert_eq!(x.name, y.name);
            assert_eq!(x.description, y.description);
            assert_eq!(x.suitability, y.suitability);
        }
        assert_eq!(a.executive_summary, b.executive_summary);
        assert_eq!(a.implementation_roadmap, b.implementation_roadmap);
    }
}
