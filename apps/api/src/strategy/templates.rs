//! Strategy template catalogue — the single data source for both the local
//! synthesizer and the narrative generator's prompt. Keeping one table
//! prevents the two paths from drifting apart in schema or tone.

use crate::analysis::classifier::{ComplexityTier, Domain};

/// A fixed delivery-strategy template keyed by domain or complexity tier.
#[derive(Debug, Clone, Copy)]
pub struct StrategyTemplate {
    pub name: &'static str,
    pub strategy_type: &'static str,
    pub description: &'static str,
    pub implementation_weeks: &'static str,
    pub benefits: &'static [&'static str],
    pub ideal_for: &'static [&'static str],
    pub rationale: &'static str,
    pub base_suitability: u8,
}

const EDUCATION: StrategyTemplate = StrategyTemplate {
    name: "Peer-Led Instructional Workshops",
    strategy_type: "peer_workshops",
    description: "Cohorts of learners rotate through facilitated workshops where \
                  experienced staff model lessons and peers critique delivery against \
                  a shared rubric.",
    implementation_weeks: "5-7 weeks",
    benefits: &[
        "Builds internal coaching capacity",
        "Normalizes feedback between colleagues",
        "Surfaces tacit classroom technique",
    ],
    ideal_for: &["Teaching teams", "Curriculum committees", "New instructors"],
    rationale: "Instructional content lands best when practitioners teach each other; \
                workshops convert written curriculum into observable practice.",
    base_suitability: 85,
};

const HEALTHCARE: StrategyTemplate = StrategyTemplate {
    name: "Simulation-Based Clinical Practice",
    strategy_type: "clinical_simulation",
    description: "High-fidelity patient scenarios run in short repeated cycles, with \
                  structured debriefs that tie each decision back to protocol.",
    implementation_weeks: "8-10 weeks",
    benefits: &[
        "Safe rehearsal of high-risk procedures",
        "Protocol recall under realistic pressure",
        "Debriefs that convert errors into teaching moments",
    ],
    ideal_for: &["Clinical staff", "New nurses and residents", "Emergency response teams"],
    rationale: "Clinical competence is built in the gap between knowing a protocol and \
                executing it; simulation closes that gap without patient risk.",
    base_suitability: 88,
};

const TECHNOLOGY: StrategyTemplate = StrategyTemplate {
    name: "Hands-On Lab Progression",
    strategy_type: "guided_labs",
    description: "A ladder of sandboxed labs, each introducing one tool or concept and \
                  ending with a break-fix exercise the learner must debug alone.",
    implementation_weeks: "6-8 weeks",
    benefits: &[
        "Skills verified by working artifacts, not attendance",
        "Break-fix exercises build real debugging instinct",
        "Labs double as onboarding material afterward",
    ],
    ideal_for: &["Engineering teams", "Support engineers", "Technical onboarding"],
    rationale: "Technical skill transfers through keyboard time; a graded lab ladder \
                keeps that time structured and measurable.",
    base_suitability: 87,
};

const BUSINESS: StrategyTemplate = StrategyTemplate {
    name: "Scenario-Based Business Coaching",
    strategy_type: "blended_coaching",
    description: "Weekly coached sessions built around realistic business scenarios, \
                  alternating between group case discussion and individual practice \
                  with a feedback loop.",
    implementation_weeks: "6-8 weeks",
    benefits: &[
        "Decisions practiced before they are expensive",
        "Coaching cadence sustains behavior change",
        "Cases adapt easily to your own accounts and metrics",
    ],
    ideal_for: &["Team leads", "New managers", "Customer-facing staff"],
    rationale: "Management behavior changes through rehearsal and feedback, not slide \
                decks; scenario coaching supplies both on a fixed cadence.",
    base_suitability: 84,
};

const COMPLIANCE: StrategyTemplate = StrategyTemplate {
    name: "Policy-in-Practice Drills",
    strategy_type: "compliance_drills",
    description: "Short recurring drills that place each policy clause into a concrete \
                  workplace situation, with immediate scoring and an audit trail of \
                  completions.",
    implementation_weeks: "4-6 weeks",
    benefits: &[
        "Audit-ready completion records",
        "Policy recall tested in context, not in the abstract",
        "Low time cost per session keeps participation high",
    ],
    ideal_for: &["Regulated teams", "Annual recertification programs", "New hires"],
    rationale: "Compliance fails at the moment of application; drills rehearse exactly \
                that moment and leave the evidence auditors ask for.",
    base_suitability: 86,
};

const MANUFACTURING: StrategyTemplate = StrategyTemplate {
    name: "Station-Based Production Training",
    strategy_type: "on_floor_rotation",
    description: "Learners rotate through instrumented floor stations, certifying on \
                  each operation before advancing, with takt-time targets introduced \
                  only after accuracy is stable.",
    implementation_weeks: "6-9 weeks",
    benefits: &[
        "Certification tied to demonstrated operations",
        "Accuracy-before-speed sequencing reduces rework",
        "Rotation exposes every learner to upstream and downstream steps",
    ],
    ideal_for: &["Line operators", "Shift supervisors", "Cross-training programs"],
    rationale: "Floor skills certify at the station, not in the classroom; rotation \
                plus accuracy gates mirrors how stable lines are actually built.",
    base_suitability: 86,
};

const BEGINNER: StrategyTemplate = StrategyTemplate {
    name: "Foundation-First Learning Path",
    strategy_type: "foundation_path",
    description: "A linear path that secures vocabulary and core concepts first, with \
                  frequent low-stakes checks and no branching until the fundamentals \
                  hold.",
    implementation_weeks: "4-6 weeks",
    benefits: &[
        "No learner left behind by assumed knowledge",
        "Early wins build confidence and completion rates",
        "A shared vocabulary for everything that follows",
    ],
    ideal_for: &["Audiences new to the subject", "Mixed-background cohorts"],
    rationale: "Novice audiences stall on unstated assumptions; a foundation-first \
                sequence removes them before introducing complexity.",
    base_suitability: 82,
};

const INTERMEDIATE: StrategyTemplate = StrategyTemplate {
    name: "Applied Integration Program",
    strategy_type: "integration_program",
    description: "Project-shaped modules that combine previously separate skills into \
                  multi-step deliverables, reviewed against realistic acceptance \
                  criteria.",
    implementation_weeks: "6-8 weeks",
    benefits: &[
        "Connects isolated skills into working practice",
        "Deliverables make progress visible to managers",
        "Acceptance criteria mirror real work",
    ],
    ideal_for: &["Practitioners with the basics in place", "Teams consolidating skills"],
    rationale: "Intermediate learners know the pieces; integration projects force the \
                assembly work that day-to-day tasks rarely schedule time for.",
    base_suitability: 84,
};

const ADVANCED: StrategyTemplate = StrategyTemplate {
    name: "Expert Challenge Labs",
    strategy_type: "expert_challenge",
    description: "Open-ended challenges with deliberately incomplete briefs, peer \
                  review between experts, and a closing teach-back where each learner \
                  presents their approach.",
    implementation_weeks: "8-12 weeks",
    benefits: &[
        "Stretches experts past routine competence",
        "Peer review surfaces divergent expert approaches",
        "Teach-backs turn participants into instructors",
    ],
    ideal_for: &["Senior practitioners", "Communities of practice", "Mentor development"],
    rationale: "Experts disengage from material they can predict; incomplete briefs \
                restore the ambiguity their judgment is actually for.",
    base_suitability: 86,
};

/// Bespoke catalogue entry for a domain, if one exists.
fn bespoke_template(domain: Domain) -> Option<&'static StrategyTemplate> {
    match domain {
        Domain::Education => Some(&EDUCATION),
        Domain::Healthcare => Some(&HEALTHCARE),
        Domain::Technology => Some(&TECHNOLOGY),
        Domain::Business => Some(&BUSINESS),
        Domain::Compliance => Some(&COMPLIANCE),
        Domain::Manufacturing => Some(&MANUFACTURING),
        Domain::Finance | Domain::Retail => None,
    }
}

/// Template for a domain; domains without a bespoke entry fall back to the
/// generic business template.
pub fn template_for(domain: Domain) -> &'static StrategyTemplate {
    bespoke_template(domain).unwrap_or(&BUSINESS)
}

/// Template for a complexity tier. Each tier carries a different philosophy:
/// foundation-building, integration, or expert challenge.
pub fn complexity_template(tier: ComplexityTier) -> &'static StrategyTemplate {
    match tier {
        ComplexityTier::Beginner => &BEGINNER,
        ComplexityTier::Intermediate => &INTERMEDIATE,
        ComplexityTier::Advanced => &ADVANCED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_DOMAINS: &[Domain] = &[
        Domain::Education,
        Domain::Healthcare,
        Domain::Technology,
        Domain::Business,
        Domain::Compliance,
        Domain::Manufacturing,
        Domain::Finance,
        Domain::Retail,
    ];

    #[test]
    fn test_every_domain_resolves_to_a_template() {
        for domain in ALL_DOMAINS {
            let template = template_for(*domain);
            assert!(!template.name.is_empty());
            assert!(!template.benefits.is_empty());
            assert!(template.base_suitability <= 100);
        }
    }

    #[test]
    fn test_domains_without_bespoke_entry_fall_back_to_business() {
        assert_eq!(template_for(Domain::Finance).name, BUSINESS.name);
        assert_eq!(template_for(Domain::Retail).name, BUSINESS.name);
        assert!(bespoke_template(Domain::Finance).is_none());
    }

    #[test]
    fn test_complexity_templates_are_distinct() {
        let beginner = complexity_template(ComplexityTier::Beginner);
        let intermediate = complexity_template(ComplexityTier::Intermediate);
        let advanced = complexity_template(ComplexityTier::Advanced);
        assert_ne!(beginner.name, intermediate.name);
        assert_ne!(intermediate.name, advanced.name);
        assert_ne!(beginner.name, advanced.name);
    }

    #[test]
    fn test_domain_template_names_are_unique() {
        let mut names: Vec<&str> = ALL_DOMAINS.iter().map(|d| template_for(*d).name).collect();
        names.sort();
        names.dedup();
        // 6 bespoke entries; Finance and Retail share the business template
        assert_eq!(names.len(), 6);
    }
}
