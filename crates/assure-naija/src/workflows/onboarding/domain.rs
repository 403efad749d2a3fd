use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::{self, RiskAssessment};

/// Identifier wrapper for an onboarding session (the persistence key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answer slots collected by the question flow, in question order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    AgeRange,
    Location,
    Employment,
    IncomeRange,
    Dependents,
    DailyActivities,
    HealthStatus,
    OwnsCar,
    OwnsProperty,
    InsuranceGoal,
    RiskTolerance,
    MonthlyBudget,
}

impl ProfileField {
    pub const ALL: [ProfileField; 12] = [
        ProfileField::AgeRange,
        ProfileField::Location,
        ProfileField::Employment,
        ProfileField::IncomeRange,
        ProfileField::Dependents,
        ProfileField::DailyActivities,
        ProfileField::HealthStatus,
        ProfileField::OwnsCar,
        ProfileField::OwnsProperty,
        ProfileField::InsuranceGoal,
        ProfileField::RiskTolerance,
        ProfileField::MonthlyBudget,
    ];

    /// JSON key used by the persisted profile.
    pub const fn key(self) -> &'static str {
        match self {
            ProfileField::AgeRange => "ageRange",
            ProfileField::Location => "location",
            ProfileField::Employment => "employment",
            ProfileField::IncomeRange => "incomeRange",
            ProfileField::Dependents => "dependents",
            ProfileField::DailyActivities => "dailyActivities",
            ProfileField::HealthStatus => "healthStatus",
            ProfileField::OwnsCar => "ownsCar",
            ProfileField::OwnsProperty => "ownsProperty",
            ProfileField::InsuranceGoal => "insuranceGoal",
            ProfileField::RiskTolerance => "riskTolerance",
            ProfileField::MonthlyBudget => "monthlyBudget",
        }
    }

    pub const fn is_boolean(self) -> bool {
        matches!(self, ProfileField::OwnsCar | ProfileField::OwnsProperty)
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value accepted for a single profile field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    Flag(bool),
}

/// Coarse risk bucket derived from the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }

    /// Tier-wide factors shown alongside the risk explanation.
    pub const fn key_factors(self) -> [&'static str; 4] {
        match self {
            RiskLevel::Low => [
                "Younger age group with lower risk exposure",
                "Indoor/low-risk daily activities",
                "No significant health concerns",
                "Stable work environment",
            ],
            RiskLevel::Medium => [
                "Active work that involves some physical risks",
                "Regular commuting or travel",
                "Growing financial responsibilities",
                "Some valuable assets to protect",
            ],
            RiskLevel::High => [
                "High-exposure work environment",
                "Frequent travel or physical activities",
                "Pre-existing health considerations",
                "Multiple assets requiring protection",
            ],
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated onboarding answers plus the fields derived at completion.
///
/// Answers are kept as the literal option strings chosen in the question flow so
/// that any JSON-serialized profile round-trips unchanged. Typed views of the
/// answers come from [`super::normalizer::ProfileSignals`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_activities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owns_car: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owns_property: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tolerance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) risk_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) risk_level: Option<RiskLevel>,
}

impl UserProfile {
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Stored score of a finalized profile. Out-of-range values from a
    /// tampered or corrupt document are ignored.
    pub fn risk_score(&self) -> Option<u8> {
        self.completed_at
            .and(self.risk_score)
            .filter(|score| *score <= scoring::MAX_SCORE)
    }

    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.risk_score().map(scoring::risk_level_of)
    }

    /// True once the profile has been finalized.
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Cheap gate for the engines: `Ok` only for finalized profiles.
    pub fn ensure_complete(&self) -> Result<(), ProfileNotReady> {
        if self.is_complete() {
            return Ok(());
        }

        let missing = self.missing_fields();
        if missing.is_empty() {
            Err(ProfileNotReady::NotFinalized)
        } else {
            Err(ProfileNotReady::MissingAnswers(missing))
        }
    }

    pub fn has_answer(&self, field: ProfileField) -> bool {
        match field {
            ProfileField::AgeRange => self.age_range.is_some(),
            ProfileField::Location => self.location.is_some(),
            ProfileField::Employment => self.employment.is_some(),
            ProfileField::IncomeRange => self.income_range.is_some(),
            ProfileField::Dependents => self.dependents.is_some(),
            ProfileField::DailyActivities => self.daily_activities.is_some(),
            ProfileField::HealthStatus => self.health_status.is_some(),
            ProfileField::OwnsCar => self.owns_car.is_some(),
            ProfileField::OwnsProperty => self.owns_property.is_some(),
            ProfileField::InsuranceGoal => self.insurance_goal.is_some(),
            ProfileField::RiskTolerance => self.risk_tolerance.is_some(),
            ProfileField::MonthlyBudget => self.monthly_budget.is_some(),
        }
    }

    pub fn missing_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|field| !self.has_answer(*field))
            .collect()
    }

    /// Store a single answer. Once finalized only the location may still change.
    pub fn record(&mut self, field: ProfileField, value: AnswerValue) -> Result<(), RecordError> {
        if self.is_complete() && field != ProfileField::Location {
            return Err(RecordError::Locked(field));
        }

        match (field, value) {
            (ProfileField::OwnsCar, AnswerValue::Flag(flag)) => self.owns_car = Some(flag),
            (ProfileField::OwnsProperty, AnswerValue::Flag(flag)) => {
                self.owns_property = Some(flag)
            }
            (field, AnswerValue::Text(text)) if !field.is_boolean() => {
                let slot = match field {
                    ProfileField::AgeRange => &mut self.age_range,
                    ProfileField::Location => &mut self.location,
                    ProfileField::Employment => &mut self.employment,
                    ProfileField::IncomeRange => &mut self.income_range,
                    ProfileField::Dependents => &mut self.dependents,
                    ProfileField::DailyActivities => &mut self.daily_activities,
                    ProfileField::HealthStatus => &mut self.health_status,
                    ProfileField::InsuranceGoal => &mut self.insurance_goal,
                    ProfileField::RiskTolerance => &mut self.risk_tolerance,
                    ProfileField::MonthlyBudget => &mut self.monthly_budget,
                    ProfileField::OwnsCar | ProfileField::OwnsProperty => {
                        return Err(RecordError::KindMismatch(field))
                    }
                };
                *slot = Some(text);
            }
            (field, _) => return Err(RecordError::KindMismatch(field)),
        }

        Ok(())
    }

    /// Stamp the completion time and derived risk fields.
    ///
    /// Completion happens exactly once: finalizing an already completed profile
    /// returns its existing assessment and leaves `completed_at` untouched.
    pub fn finalize(&mut self, now: DateTime<Utc>) -> Result<RiskAssessment, ProfileNotReady> {
        if self.is_complete() {
            return scoring::assess(self);
        }

        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ProfileNotReady::MissingAnswers(missing));
        }

        let assessment = scoring::score_profile(self);
        self.completed_at = Some(now);
        self.risk_score = Some(assessment.score);
        self.risk_level = Some(assessment.level);
        Ok(assessment)
    }

    /// Drop every answer and derived field so the profile can be rebuilt from scratch.
    pub fn reset(&mut self) {
        *self = UserProfile::default();
    }
}

/// Rejections raised while recording an answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("{0} does not accept that kind of answer")]
    KindMismatch(ProfileField),
    #[error("{0} cannot change after the profile is completed")]
    Locked(ProfileField),
}

/// Typed signal that a profile cannot be scored or matched yet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileNotReady {
    #[error("profile is missing answers for: {}", field_list(.0))]
    MissingAnswers(Vec<ProfileField>),
    #[error("profile has not been finalized")]
    NotFinalized,
}

fn field_list(fields: &[ProfileField]) -> String {
    fields
        .iter()
        .map(|field| field.key())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeRange {
    From18To25,
    From26To35,
    From36To45,
    From46To55,
    Over55,
}

impl AgeRange {
    pub const ALL: [AgeRange; 5] = [
        AgeRange::From18To25,
        AgeRange::From26To35,
        AgeRange::From36To45,
        AgeRange::From46To55,
        AgeRange::Over55,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            AgeRange::From18To25 => "18-25",
            AgeRange::From26To35 => "26-35",
            AgeRange::From36To45 => "36-45",
            AgeRange::From46To55 => "46-55",
            AgeRange::Over55 => "55+",
        }
    }

    pub const fn is_young(self) -> bool {
        matches!(self, AgeRange::From18To25 | AgeRange::From26To35)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Employment {
    OfficeCorporate,
    SelfEmployedBusiness,
    ArtisanTrader,
    RiderDriver,
    Student,
    Unemployed,
}

impl Employment {
    pub const ALL: [Employment; 6] = [
        Employment::OfficeCorporate,
        Employment::SelfEmployedBusiness,
        Employment::ArtisanTrader,
        Employment::RiderDriver,
        Employment::Student,
        Employment::Unemployed,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Employment::OfficeCorporate => "Office/Corporate",
            Employment::SelfEmployedBusiness => "Self-employed/Business",
            Employment::ArtisanTrader => "Artisan/Trader",
            Employment::RiderDriver => "Rider/Driver",
            Employment::Student => "Student",
            Employment::Unemployed => "Unemployed",
        }
    }

    pub const fn runs_business(self) -> bool {
        matches!(
            self,
            Employment::SelfEmployedBusiness | Employment::ArtisanTrader
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IncomeRange {
    Under50k,
    From50kTo150k,
    From150kTo300k,
    From300kTo500k,
    Above500k,
}

impl IncomeRange {
    pub const ALL: [IncomeRange; 5] = [
        IncomeRange::Under50k,
        IncomeRange::From50kTo150k,
        IncomeRange::From150kTo300k,
        IncomeRange::From300kTo500k,
        IncomeRange::Above500k,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            IncomeRange::Under50k => "Under ₦50k",
            IncomeRange::From50kTo150k => "₦50k-₦150k",
            IncomeRange::From150kTo300k => "₦150k-₦300k",
            IncomeRange::From300kTo500k => "₦300k-₦500k",
            IncomeRange::Above500k => "Above ₦500k",
        }
    }

    /// Bottom two bands.
    pub const fn is_low(self) -> bool {
        matches!(self, IncomeRange::Under50k | IncomeRange::From50kTo150k)
    }

    pub const fn is_top(self) -> bool {
        matches!(self, IncomeRange::Above500k)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dependents {
    None,
    OneToTwo,
    ThreeToFour,
    FiveOrMore,
}

impl Dependents {
    pub const ALL: [Dependents; 4] = [
        Dependents::None,
        Dependents::OneToTwo,
        Dependents::ThreeToFour,
        Dependents::FiveOrMore,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Dependents::None => "None",
            Dependents::OneToTwo => "1-2 people",
            Dependents::ThreeToFour => "3-4 people",
            Dependents::FiveOrMore => "5 or more",
        }
    }

    pub const fn is_large(self) -> bool {
        matches!(self, Dependents::ThreeToFour | Dependents::FiveOrMore)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DailyActivity {
    MostlyIndoors,
    TravelHeavy,
    PhysicalWork,
    Mixed,
}

impl DailyActivity {
    pub const ALL: [DailyActivity; 4] = [
        DailyActivity::MostlyIndoors,
        DailyActivity::TravelHeavy,
        DailyActivity::PhysicalWork,
        DailyActivity::Mixed,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DailyActivity::MostlyIndoors => "Mostly indoors",
            DailyActivity::TravelHeavy => "Travel a lot",
            DailyActivity::PhysicalWork => "Physical work",
            DailyActivity::Mixed => "Mixed activities",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    Healthy,
    MinorConditions,
    ChronicConditions,
    Undisclosed,
}

impl HealthStatus {
    pub const ALL: [HealthStatus; 4] = [
        HealthStatus::Healthy,
        HealthStatus::MinorConditions,
        HealthStatus::ChronicConditions,
        HealthStatus::Undisclosed,
    ];

    /// Option text offered by the question flow.
    pub const fn label(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy, no issues",
            HealthStatus::MinorConditions => "Minor conditions (e.g., glasses, allergies)",
            HealthStatus::ChronicConditions => "Chronic conditions (e.g., diabetes, hypertension)",
            HealthStatus::Undisclosed => "Prefer not to say",
        }
    }

    /// Fragment an answer must contain to fall in this category.
    pub const fn marker(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::MinorConditions => "Minor conditions",
            HealthStatus::ChronicConditions => "Chronic conditions",
            HealthStatus::Undisclosed => "Prefer not to say",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsuranceGoal {
    HealthCoverage,
    LifeForFamily,
    AssetProtection,
    BusinessProtection,
    AllRound,
}

impl InsuranceGoal {
    pub const ALL: [InsuranceGoal; 5] = [
        InsuranceGoal::HealthCoverage,
        InsuranceGoal::LifeForFamily,
        InsuranceGoal::AssetProtection,
        InsuranceGoal::BusinessProtection,
        InsuranceGoal::AllRound,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            InsuranceGoal::HealthCoverage => "Health coverage",
            InsuranceGoal::LifeForFamily => "Life insurance for family",
            InsuranceGoal::AssetProtection => "Protect my assets (car, property)",
            InsuranceGoal::BusinessProtection => "Business protection",
            InsuranceGoal::AllRound => "I want everything covered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskTolerance {
    Conservative,
    Balanced,
    Aggressive,
}

impl RiskTolerance {
    pub const ALL: [RiskTolerance; 3] = [
        RiskTolerance::Conservative,
        RiskTolerance::Balanced,
        RiskTolerance::Aggressive,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            RiskTolerance::Conservative => "I avoid risk (conservative)",
            RiskTolerance::Balanced => "Balanced approach",
            RiskTolerance::Aggressive => "I can take risks if needed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonthlyBudget {
    Under2k,
    From2kTo5k,
    From5kTo10k,
    From10kTo20k,
    Above20k,
}

impl MonthlyBudget {
    pub const ALL: [MonthlyBudget; 5] = [
        MonthlyBudget::Under2k,
        MonthlyBudget::From2kTo5k,
        MonthlyBudget::From5kTo10k,
        MonthlyBudget::From10kTo20k,
        MonthlyBudget::Above20k,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MonthlyBudget::Under2k => "Under ₦2,000",
            MonthlyBudget::From2kTo5k => "₦2,000 - ₦5,000",
            MonthlyBudget::From5kTo10k => "₦5,000 - ₦10,000",
            MonthlyBudget::From10kTo20k => "₦10,000 - ₦20,000",
            MonthlyBudget::Above20k => "Above ₦20,000",
        }
    }
}

/// Cities offered by the location question; anything else is free text.
pub const KNOWN_CITIES: [&str; 5] = ["Lagos", "Abuja", "Port Harcourt", "Kano", "Ibadan"];

/// Location option that switches the flow to free-text capture.
pub const OTHER_CITY: &str = "Other city";
