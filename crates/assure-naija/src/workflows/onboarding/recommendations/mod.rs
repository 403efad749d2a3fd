mod generators;
mod premium;

pub use premium::PremiumRange;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{ProfileNotReady, UserProfile};
use super::normalizer::ProfileSignals;

/// Upper bound on plans returned for one profile.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Plans scoring at or above this value carry a "match" badge.
pub const STRONG_MATCH_THRESHOLD: u8 = 80;

const MAX_PRIORITY: u8 = 5;
const MAX_MATCH_SCORE: u8 = 100;

/// Catalogue of insurance products the engine can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    Health,
    Life,
    Motor,
    Device,
    Business,
}

impl PlanKind {
    /// Generation order; also the tie-break order when priorities match.
    pub const ALL: [PlanKind; 5] = [
        PlanKind::Health,
        PlanKind::Life,
        PlanKind::Motor,
        PlanKind::Device,
        PlanKind::Business,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            PlanKind::Health => "health",
            PlanKind::Life => "life",
            PlanKind::Motor => "motor",
            PlanKind::Device => "device",
            PlanKind::Business => "business",
        }
    }

    pub fn from_id(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == raw)
    }

    pub const fn title(self) -> &'static str {
        match self {
            PlanKind::Health => "Health Insurance",
            PlanKind::Life => "Life Insurance",
            PlanKind::Motor => "Motor Insurance",
            PlanKind::Device => "Device Insurance",
            PlanKind::Business => "Business Insurance",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            PlanKind::Health => "Medical bills, hospital visits, and prescriptions covered",
            PlanKind::Life => "Financial security for your family",
            PlanKind::Motor => "Third-party and comprehensive vehicle cover",
            PlanKind::Device => "Protect your phone, laptop, and gadgets",
            PlanKind::Business => "Protect your business and income",
        }
    }

    pub const fn features(self) -> &'static [&'static str] {
        match self {
            PlanKind::Health => &[
                "Hospital visits",
                "Prescription drugs",
                "Emergency care",
                "Dental & optical",
            ],
            PlanKind::Life => &[
                "Death benefit",
                "Family protection",
                "Savings component",
                "Flexible terms",
            ],
            PlanKind::Motor => &[
                "Third party liability",
                "Comprehensive cover",
                "Accident protection",
                "Roadside assistance",
            ],
            PlanKind::Device => &[
                "Screen damage",
                "Theft protection",
                "Water damage",
                "Quick replacement",
            ],
            PlanKind::Business => &[
                "Stock protection",
                "Fire & theft",
                "Liability cover",
                "Business interruption",
            ],
        }
    }

    fn generate(self, signals: &ProfileSignals) -> Option<InsurancePlan> {
        match self {
            PlanKind::Health => generators::health_plan(signals),
            PlanKind::Life => generators::life_plan(signals),
            PlanKind::Motor => generators::motor_plan(signals),
            PlanKind::Device => generators::device_plan(signals),
            PlanKind::Business => generators::business_plan(signals),
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One recommendation card. Rebuilt on every request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePlan {
    pub id: PlanKind,
    #[serde(rename = "type")]
    pub plan_type: &'static str,
    pub description: &'static str,
    pub why_fits_you: String,
    pub premium_range: PremiumRange,
    pub features: &'static [&'static str],
    pub priority: u8,
    pub match_score: u8,
}

impl InsurancePlan {
    pub(crate) fn new(
        kind: PlanKind,
        why_fits_you: String,
        premium_range: PremiumRange,
        priority: u8,
        match_score: u8,
    ) -> Self {
        Self {
            id: kind,
            plan_type: kind.title(),
            description: kind.description(),
            why_fits_you,
            premium_range,
            features: kind.features(),
            priority: priority.min(MAX_PRIORITY),
            match_score: match_score.min(MAX_MATCH_SCORE),
        }
    }

    pub fn is_strong_match(&self) -> bool {
        self.match_score >= STRONG_MATCH_THRESHOLD
    }
}

/// Ranked plans for a finalized profile.
///
/// Plans are ordered by priority, highest first; equal priorities keep
/// generation order. `match_score` never affects the order.
pub fn generate_recommendations(
    profile: &UserProfile,
) -> Result<Vec<InsurancePlan>, ProfileNotReady> {
    profile.ensure_complete()?;

    let signals = ProfileSignals::from_profile(profile);
    Ok(rank(
        PlanKind::ALL
            .into_iter()
            .filter_map(|kind| kind.generate(&signals))
            .collect(),
    ))
}

fn rank(mut plans: Vec<InsurancePlan>) -> Vec<InsurancePlan> {
    // sort_by is stable
    plans.sort_by(|a, b| b.priority.cmp(&a.priority));
    plans.truncate(MAX_RECOMMENDATIONS);
    plans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(kind: PlanKind, priority: u8, match_score: u8) -> InsurancePlan {
        InsurancePlan::new(
            kind,
            String::new(),
            PremiumRange::new(1, 2),
            priority,
            match_score,
        )
    }

    #[test]
    fn rank_ignores_match_score() {
        let ranked = rank(vec![
            plan(PlanKind::Health, 3, 99),
            plan(PlanKind::Life, 4, 10),
            plan(PlanKind::Device, 3, 40),
        ]);

        let ids: Vec<_> = ranked.iter().map(|plan| plan.id).collect();
        assert_eq!(ids, vec![PlanKind::Life, PlanKind::Health, PlanKind::Device]);
    }

    #[test]
    fn constructor_clamps_priority_and_score() {
        let clamped = plan(PlanKind::Health, 6, 110);
        assert_eq!(clamped.priority, 5);
        assert_eq!(clamped.match_score, 100);
        assert!(clamped.is_strong_match());
    }

    #[test]
    fn plan_ids_round_trip_through_lookup() {
        for kind in PlanKind::ALL {
            assert_eq!(PlanKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(PlanKind::from_id("travel"), None);
    }
}
