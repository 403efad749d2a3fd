mod tables;

pub use tables::RiskFactor;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Dependents, Employment, ProfileNotReady, RiskLevel, UserProfile};
use super::normalizer::ProfileSignals;

pub(crate) const MAX_SCORE: u8 = 100;
const LOW_CEILING: u8 = 30;
const MEDIUM_CEILING: u8 = 60;

/// Discrete contribution to a risk score, kept for the explanation screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: RiskFactor,
    pub points: u8,
    pub notes: String,
}

/// Score, tier and the contributions behind them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
    pub components: Vec<ScoreComponent>,
}

impl RiskAssessment {
    pub fn label(&self) -> &'static str {
        self.level.label()
    }

    pub fn key_factors(&self) -> [&'static str; 4] {
        self.level.key_factors()
    }

    /// Profile-specific reasons worth calling out when explaining the score.
    pub fn highlights(&self, profile: &UserProfile) -> Vec<String> {
        let signals = ProfileSignals::from_profile(profile);
        let mut highlights = Vec::new();

        if signals.employment == Some(Employment::RiderDriver) {
            highlights.push(format!(
                "Your work as {} is high-risk because you're on the road daily",
                Employment::RiderDriver.label()
            ));
        }

        if let Some(dependents) = signals.dependents.filter(|d| *d != Dependents::None) {
            highlights.push(format!(
                "You have {} depending on you",
                dependents.label()
            ));
        }

        if signals.owns_car {
            highlights.push("You own a vehicle that needs coverage".to_string());
        }

        highlights
    }
}

/// Additive risk score for whatever answers are present, clamped to 100.
///
/// Works on partial profiles; unanswered or unrecognised fields add nothing.
pub fn compute_risk_score(profile: &UserProfile) -> u8 {
    score_profile(profile).score
}

/// Step function from score to tier: `<= 30` low, `<= 60` medium, otherwise high.
pub fn risk_level_of(score: u8) -> RiskLevel {
    if score <= LOW_CEILING {
        RiskLevel::Low
    } else if score <= MEDIUM_CEILING {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Risk readout for a finalized profile.
pub fn assess(profile: &UserProfile) -> Result<RiskAssessment, ProfileNotReady> {
    profile.ensure_complete()?;

    let mut assessment = score_profile(profile);
    if let Some(stored) = profile.risk_score() {
        if stored != assessment.score {
            debug!(
                stored,
                recomputed = assessment.score,
                "keeping stored risk score for completed profile"
            );
        }
        assessment.score = stored;
        assessment.level = risk_level_of(stored);
    }

    Ok(assessment)
}

pub(crate) fn score_profile(profile: &UserProfile) -> RiskAssessment {
    let signals = ProfileSignals::from_profile(profile);
    let components = tables::score_components(&signals);
    let total: u32 = components
        .iter()
        .map(|component| u32::from(component.points))
        .sum();
    let score = total.min(u32::from(MAX_SCORE)) as u8;

    RiskAssessment {
        score,
        level: risk_level_of(score),
        components,
    }
}
