use serde::Serialize;

use super::domain::{
    AgeRange, DailyActivity, Dependents, Employment, HealthStatus, IncomeRange, InsuranceGoal,
    MonthlyBudget, ProfileField, RiskTolerance, KNOWN_CITIES, OTHER_CITY,
};

/// Grouping used to introduce a new block of questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Demographics,
    Employment,
    Lifestyle,
    Health,
    Goals,
    Budget,
}

impl QuestionCategory {
    /// Lead-in shown when the flow enters this category.
    pub const fn intro(self) -> Option<&'static str> {
        match self {
            QuestionCategory::Demographics => None,
            QuestionCategory::Employment => Some("Now let's talk about your work and income."),
            QuestionCategory::Lifestyle => Some("Let's look at your lifestyle."),
            QuestionCategory::Health => Some("Now about health and property."),
            QuestionCategory::Goals => Some("What are your insurance goals?"),
            QuestionCategory::Budget => Some("Final question: what's your budget?"),
        }
    }
}

/// One step of the structured question flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatQuestion {
    pub field: ProfileField,
    pub category: QuestionCategory,
    pub question: &'static str,
    pub options: Vec<&'static str>,
}

/// Question plus the category lead-in, when the category just changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPrompt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<&'static str>,
    #[serde(flatten)]
    pub question: ChatQuestion,
}

/// The fixed question sequence, one entry per [`ProfileField`] in field order.
pub fn chat_questions() -> Vec<ChatQuestion> {
    ProfileField::ALL.into_iter().map(question_for).collect()
}

pub fn question_for(field: ProfileField) -> ChatQuestion {
    let (category, question, options): (_, _, Vec<&'static str>) = match field {
        ProfileField::AgeRange => (
            QuestionCategory::Demographics,
            "Let's start with the basics. What's your age range?",
            AgeRange::ALL.iter().map(|v| v.label()).collect(),
        ),
        ProfileField::Location => (
            QuestionCategory::Demographics,
            "Where do you currently live?",
            KNOWN_CITIES.iter().copied().chain([OTHER_CITY]).collect(),
        ),
        ProfileField::Employment => (
            QuestionCategory::Employment,
            "What type of work do you do?",
            Employment::ALL.iter().map(|v| v.label()).collect(),
        ),
        ProfileField::IncomeRange => (
            QuestionCategory::Employment,
            "What's your approximate monthly income?",
            IncomeRange::ALL.iter().map(|v| v.label()).collect(),
        ),
        ProfileField::Dependents => (
            QuestionCategory::Lifestyle,
            "How many people depend on you financially (family members)?",
            Dependents::ALL.iter().map(|v| v.label()).collect(),
        ),
        ProfileField::DailyActivities => (
            QuestionCategory::Lifestyle,
            "What does your typical day look like?",
            DailyActivity::ALL.iter().map(|v| v.label()).collect(),
        ),
        ProfileField::HealthStatus => (
            QuestionCategory::Health,
            "How would you describe your current health status?",
            HealthStatus::ALL.iter().map(|v| v.label()).collect(),
        ),
        ProfileField::OwnsCar => (
            QuestionCategory::Health,
            "Do you own a car or motorcycle?",
            YES_NO.to_vec(),
        ),
        ProfileField::OwnsProperty => (
            QuestionCategory::Health,
            "Do you own a house, shop, or valuable equipment?",
            YES_NO.to_vec(),
        ),
        ProfileField::InsuranceGoal => (
            QuestionCategory::Goals,
            "What's your main reason for looking at insurance?",
            InsuranceGoal::ALL.iter().map(|v| v.label()).collect(),
        ),
        ProfileField::RiskTolerance => (
            QuestionCategory::Goals,
            "How do you feel about financial risk?",
            RiskTolerance::ALL.iter().map(|v| v.label()).collect(),
        ),
        ProfileField::MonthlyBudget => (
            QuestionCategory::Budget,
            "What's the maximum you can spend on insurance monthly?",
            MonthlyBudget::ALL.iter().map(|v| v.label()).collect(),
        ),
    };

    ChatQuestion {
        field,
        category,
        question,
        options,
    }
}

/// Prompt for `field`, carrying the category intro when the previous question
/// belonged to a different category.
pub fn prompt_for(field: ProfileField) -> QuestionPrompt {
    let question = question_for(field);
    let position = ProfileField::ALL
        .iter()
        .position(|candidate| *candidate == field)
        .unwrap_or(0);
    let previous_category = position
        .checked_sub(1)
        .map(|index| question_for(ProfileField::ALL[index]).category);

    let intro = if previous_category == Some(question.category) {
        None
    } else {
        question.category.intro()
    };

    QuestionPrompt { intro, question }
}

pub(crate) const YES_NO: [&str; 2] = ["Yes", "No"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_covers_every_field_in_order() {
        let fields: Vec<_> = chat_questions().iter().map(|q| q.field).collect();
        assert_eq!(fields, ProfileField::ALL.to_vec());
    }

    #[test]
    fn intros_appear_only_on_category_change() {
        assert_eq!(prompt_for(ProfileField::AgeRange).intro, None);
        assert_eq!(prompt_for(ProfileField::Location).intro, None);
        assert_eq!(
            prompt_for(ProfileField::Employment).intro,
            Some("Now let's talk about your work and income.")
        );
        assert_eq!(prompt_for(ProfileField::IncomeRange).intro, None);
        assert!(prompt_for(ProfileField::MonthlyBudget).intro.is_some());
    }

    #[test]
    fn location_offers_escape_option() {
        let question = question_for(ProfileField::Location);
        assert_eq!(question.options.last(), Some(&OTHER_CITY));
        assert_eq!(question.options.len(), 6);
    }
}
