//! Canned rewrites for the bio answer.
//!
//! Matching is a plain substring check on the lowercased answer and the
//! first rule that matches wins.

struct RefinementRule {
    triggers: &'static [&'static str],
    rewrite: fn(role: &str, city: &str) -> String,
}

const RULES: &[RefinementRule] = &[
    RefinementRule {
        triggers: &["i take photos", "photographer"],
        rewrite: creative_bio,
    },
    RefinementRule {
        triggers: &["sell cars", "car dealer"],
        rewrite: car_dealer_bio,
    },
];

fn creative_bio(role: &str, city: &str) -> String {
    format!(
        "Creative {} capturing vibrant moments in {city}.",
        role.to_lowercase()
    )
}

fn car_dealer_bio(_role: &str, city: &str) -> String {
    format!("Trusted car dealer offering premium vehicles in {city}.")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BioRefinement {
    Kept(String),
    Rewritten(String),
}

impl BioRefinement {
    pub fn into_bio(self) -> String {
        match self {
            BioRefinement::Kept(bio) | BioRefinement::Rewritten(bio) => bio,
        }
    }
}

/// Applies the first matching rewrite, or keeps `raw` verbatim.
pub fn refine_bio(raw: &str, role: &str, city: &str) -> BioRefinement {
    let lowered = raw.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.triggers.iter().any(|trigger| lowered.contains(trigger)))
        .map(|rule| BioRefinement::Rewritten((rule.rewrite)(role, city)))
        .unwrap_or_else(|| BioRefinement::Kept(raw.to_string()))
}
