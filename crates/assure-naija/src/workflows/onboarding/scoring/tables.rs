use serde::{Deserialize, Serialize};

use super::super::domain::{
    AgeRange, DailyActivity, Dependents, Employment, HealthStatus, IncomeRange,
};
use super::super::normalizer::ProfileSignals;
use super::ScoreComponent;

/// Profile dimensions that feed the additive risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    AgeRange,
    Employment,
    IncomeRange,
    Dependents,
    DailyActivities,
    HealthStatus,
    CarOwnership,
    PropertyOwnership,
}

pub(crate) const fn age_points(age: AgeRange) -> u8 {
    match age {
        AgeRange::From18To25 => 5,
        AgeRange::From26To35 => 8,
        AgeRange::From36To45 => 10,
        AgeRange::From46To55 => 12,
        AgeRange::Over55 => 15,
    }
}

pub(crate) const fn employment_points(employment: Employment) -> u8 {
    match employment {
        Employment::RiderDriver => 20,
        Employment::ArtisanTrader => 15,
        Employment::SelfEmployedBusiness => 12,
        Employment::OfficeCorporate => 8,
        Employment::Student => 5,
        Employment::Unemployed => 0,
    }
}

pub(crate) const fn income_points(income: IncomeRange) -> u8 {
    match income {
        IncomeRange::Under50k => 15,
        IncomeRange::From50kTo150k => 12,
        IncomeRange::From150kTo300k => 8,
        IncomeRange::From300kTo500k => 5,
        IncomeRange::Above500k => 3,
    }
}

pub(crate) const fn dependents_points(dependents: Dependents) -> u8 {
    match dependents {
        Dependents::None => 3,
        Dependents::OneToTwo => 8,
        Dependents::ThreeToFour => 12,
        Dependents::FiveOrMore => 15,
    }
}

pub(crate) const fn activity_points(activity: DailyActivity) -> u8 {
    match activity {
        DailyActivity::MostlyIndoors => 5,
        DailyActivity::Mixed => 8,
        DailyActivity::TravelHeavy => 12,
        DailyActivity::PhysicalWork => 15,
    }
}

pub(crate) const fn health_points(health: HealthStatus) -> u8 {
    match health {
        HealthStatus::Healthy => 2,
        HealthStatus::MinorConditions => 6,
        HealthStatus::ChronicConditions => 10,
        HealthStatus::Undisclosed => 0,
    }
}

pub(crate) const OWNERSHIP_POINTS: u8 = 5;

/// Points per factor in evaluation order. Factors that contribute nothing are omitted.
pub(crate) fn score_components(signals: &ProfileSignals) -> Vec<ScoreComponent> {
    let mut components = Vec::new();
    let mut push = |factor: RiskFactor, points: u8, notes: String| {
        if points > 0 {
            components.push(ScoreComponent {
                factor,
                points,
                notes,
            });
        }
    };

    if let Some(age) = signals.age_range {
        push(
            RiskFactor::AgeRange,
            age_points(age),
            format!("age range {}", age.label()),
        );
    }

    if let Some(employment) = signals.employment {
        push(
            RiskFactor::Employment,
            employment_points(employment),
            format!("{} work", employment.label()),
        );
    }

    if let Some(income) = signals.income_range {
        push(
            RiskFactor::IncomeRange,
            income_points(income),
            format!("monthly income {}", income.label()),
        );
    }

    if let Some(dependents) = signals.dependents {
        push(
            RiskFactor::Dependents,
            dependents_points(dependents),
            format!("dependents: {}", dependents.label()),
        );
    }

    if let Some(activity) = signals.daily_activities {
        push(
            RiskFactor::DailyActivities,
            activity_points(activity),
            format!("daily routine: {}", activity.label()),
        );
    }

    if let Some(health) = signals.health_status {
        push(
            RiskFactor::HealthStatus,
            health_points(health),
            format!("health: {}", health.marker()),
        );
    }

    if signals.owns_car {
        push(
            RiskFactor::CarOwnership,
            OWNERSHIP_POINTS,
            "owns a car or motorcycle".to_string(),
        );
    }

    if signals.owns_property {
        push(
            RiskFactor::PropertyOwnership,
            OWNERSHIP_POINTS,
            "owns a house, shop, or valuable equipment".to_string(),
        );
    }

    components
}
