use super::domain::{
    AgeRange, DailyActivity, Dependents, Employment, HealthStatus, IncomeRange, InsuranceGoal,
    MonthlyBudget, RiskTolerance, UserProfile,
};

/// Typed reading of a profile's stored answers.
///
/// Unrecognised or missing answers become `None` (or `false` for the ownership
/// flags) so every consumer degrades to "no contribution" instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileSignals {
    pub age_range: Option<AgeRange>,
    pub employment: Option<Employment>,
    pub income_range: Option<IncomeRange>,
    pub dependents: Option<Dependents>,
    pub daily_activities: Option<DailyActivity>,
    pub health_status: Option<HealthStatus>,
    pub owns_car: bool,
    pub owns_property: bool,
    pub insurance_goal: Option<InsuranceGoal>,
    pub risk_tolerance: Option<RiskTolerance>,
    pub monthly_budget: Option<MonthlyBudget>,
}

impl ProfileSignals {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            age_range: exact(&profile.age_range, &AgeRange::ALL, AgeRange::label),
            employment: exact(&profile.employment, &Employment::ALL, Employment::label),
            income_range: exact(&profile.income_range, &IncomeRange::ALL, IncomeRange::label),
            dependents: exact(&profile.dependents, &Dependents::ALL, Dependents::label),
            daily_activities: exact(
                &profile.daily_activities,
                &DailyActivity::ALL,
                DailyActivity::label,
            ),
            health_status: profile.health_status.as_deref().and_then(classify_health),
            owns_car: profile.owns_car.unwrap_or(false),
            owns_property: profile.owns_property.unwrap_or(false),
            insurance_goal: exact(
                &profile.insurance_goal,
                &InsuranceGoal::ALL,
                InsuranceGoal::label,
            ),
            risk_tolerance: exact(
                &profile.risk_tolerance,
                &RiskTolerance::ALL,
                RiskTolerance::label,
            ),
            monthly_budget: exact(
                &profile.monthly_budget,
                &MonthlyBudget::ALL,
                MonthlyBudget::label,
            ),
        }
    }
}

fn exact<T: Copy>(
    raw: &Option<String>,
    options: &[T],
    label: fn(T) -> &'static str,
) -> Option<T> {
    let raw = raw.as_deref()?;
    options.iter().copied().find(|option| label(*option) == raw)
}

/// Health answers are matched by fragment, case-sensitively, so both the full
/// option text and shortened variants land in the same category.
pub(crate) fn classify_health(raw: &str) -> Option<HealthStatus> {
    [
        HealthStatus::ChronicConditions,
        HealthStatus::MinorConditions,
        HealthStatus::Healthy,
        HealthStatus::Undisclosed,
    ]
    .into_iter()
    .find(|status| raw.contains(status.marker()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_matches_by_fragment() {
        assert_eq!(
            classify_health("Chronic conditions (e.g., diabetes, hypertension)"),
            Some(HealthStatus::ChronicConditions)
        );
        assert_eq!(
            classify_health("Minor conditions"),
            Some(HealthStatus::MinorConditions)
        );
        assert_eq!(classify_health("Healthy"), Some(HealthStatus::Healthy));
        assert_eq!(classify_health("chronic conditions"), None);
        assert_eq!(
            classify_health("Prefer not to say"),
            Some(HealthStatus::Undisclosed)
        );
    }

    #[test]
    fn unknown_answers_degrade_to_none() {
        let profile = UserProfile {
            age_range: Some("17".to_string()),
            employment: Some("Astronaut".to_string()),
            dependents: Some("1-2".to_string()),
            owns_car: None,
            ..UserProfile::default()
        };

        let signals = ProfileSignals::from_profile(&profile);

        assert_eq!(signals.age_range, None);
        assert_eq!(signals.employment, None);
        assert_eq!(signals.dependents, None);
        assert!(!signals.owns_car);
    }

    #[test]
    fn canonical_labels_map_to_variants() {
        let profile = UserProfile {
            employment: Some("Rider/Driver".to_string()),
            income_range: Some("Above ₦500k".to_string()),
            monthly_budget: Some("₦5,000 - ₦10,000".to_string()),
            owns_property: Some(true),
            ..UserProfile::default()
        };

        let signals = ProfileSignals::from_profile(&profile);

        assert_eq!(signals.employment, Some(Employment::RiderDriver));
        assert_eq!(signals.income_range, Some(IncomeRange::Above500k));
        assert_eq!(signals.monthly_budget, Some(MonthlyBudget::From5kTo10k));
        assert!(signals.owns_property);
    }
}
