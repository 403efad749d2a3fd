use super::domain::{Dependents, RiskLevel, UserProfile};
use super::normalizer::ProfileSignals;
use super::recommendations::PlanKind;
use super::scoring;

/// Outbound hook for free-text questions the structured flow cannot handle.
///
/// Implementations may call a hosted language model; the onboarding flow never
/// depends on one being present.
pub trait FreeTextAssistant: Send + Sync {
    fn answer_free_text(&self, question: &str, profile: &UserProfile)
        -> Result<String, AssistantError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("assistant unavailable: {0}")]
    Unavailable(String),
}

/// Deterministic assistant answering common insurance questions from fixed text.
///
/// Before the profile is finalized it explains insurance basics. Afterwards it
/// answers questions about the user's own score, plans and costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedAssistant;

impl FreeTextAssistant for ScriptedAssistant {
    fn answer_free_text(
        &self,
        question: &str,
        profile: &UserProfile,
    ) -> Result<String, AssistantError> {
        let question = question.to_lowercase();
        if profile.is_complete() {
            Ok(answer_about_profile(&question, profile))
        } else {
            Ok(answer_faq(&question).to_string())
        }
    }
}

const WHAT_IS_INSURANCE: &str = "Insurance is a safety net. You pay a small amount every month, \
and if something bad happens (illness, an accident, fire or theft) the insurer helps pay the \
large bill. For example, you might pay ₦5,000 a month for car insurance; if an accident costs \
₦300,000 to repair, the insurer covers most of it and you pay only a small deductible.";

const HOW_IT_WORKS: &str = "You pay a premium, usually a small monthly amount. The insurer pools \
it with everyone else's. If something happens you file a claim, the insurer verifies it, and \
then pays the bill. Paying ₦3,000 a month for health cover is ₦36,000 a year, while a single \
hospital stay can cost ₦200,000.";

const WHAT_IT_COSTS: &str = "Cost depends on your age, what you cover, how much cover you need, \
your health and where you live. Rough monthly prices in Nigeria: health ₦2,000 - ₦8,000, life \
₦1,500 - ₦5,000, motor ₦5,000 - ₦15,000, device ₦500 - ₦2,000. Finish the questions and I will \
match plans to your budget.";

const INSURANCE_TYPES: &str = "Common types in Nigeria are health, life, motor, property, \
business, device and travel insurance. Most people need health and life cover, and third-party \
motor insurance is required by law if you own a vehicle.";

const WHY_INSURANCE: &str = "Insurance protects your savings from one large emergency bill, \
gives you peace of mind, keeps your family supported if something happens to you, and covers \
what the law requires for vehicles. Small regular payments can cover bills worth millions.";

const FAQ_HELP: &str = "You can ask me what insurance is, how it works, how much it costs, \
what types there are, or why you need it. Or answer the questions so I can recommend plans \
for you.";

fn answer_faq(question: &str) -> &'static str {
    let has = |needle: &str| question.contains(needle);

    if has("what is insurance")
        || has("concept")
        || has("understand")
        || has("explain insurance")
        || has("insurance mean")
    {
        WHAT_IS_INSURANCE
    } else if has("how") && has("work") {
        HOW_IT_WORKS
    } else if has("cost") || has("price") || has("expensive") || has("how much") || has("afford")
    {
        WHAT_IT_COSTS
    } else if has("type") || has("kind") || has("what insurance") || has("which insurance") {
        INSURANCE_TYPES
    } else if has("need") || has("important") || has("why") || has("benefit") {
        WHY_INSURANCE
    } else {
        FAQ_HELP
    }
}

fn answer_about_profile(question: &str, profile: &UserProfile) -> String {
    let has = |needle: &str| question.contains(needle);
    let assessment = scoring::assess(profile).ok();
    let score = assessment.as_ref().map_or(0, |assessment| assessment.score);
    let level = assessment
        .as_ref()
        .map_or(RiskLevel::Medium, |assessment| assessment.level);
    let employment = profile.employment.as_deref().unwrap_or("your");

    if has("risk") || has("score") {
        let mut lines = vec![format!(
            "Your risk score is {score}/100 ({} risk).",
            level.as_str().to_uppercase()
        )];
        if let Some(assessment) = &assessment {
            lines.extend(assessment.highlights(profile));
        }
        lines.push(
            "This score is used to find cover that protects you well. See your recommendations \
             for the matching plans."
                .to_string(),
        );
        lines.join("\n")
    } else if has("recommend") || has("insurance") || has("plan") {
        let signals = ProfileSignals::from_profile(profile);
        let mut lines = vec!["Based on your profile, I recommend:".to_string()];
        let wants_health = profile
            .insurance_goal
            .as_deref()
            .is_some_and(|goal| goal.contains("Health"));
        if wants_health || level == RiskLevel::High {
            lines.push(format!(
                "{}: very important for {employment} work",
                PlanKind::Health.title()
            ));
        }
        if let Some(dependents) = signals.dependents.filter(|d| *d != Dependents::None) {
            lines.push(format!(
                "{}: protects your {} if anything happens",
                PlanKind::Life.title(),
                dependents.label()
            ));
        }
        if signals.owns_car {
            lines.push(format!(
                "{}: required by law and saves you from big expenses",
                PlanKind::Motor.title()
            ));
        }
        lines.push("See your recommendations for full details and pricing.".to_string());
        lines.join("\n")
    } else if has("cost") || has("pay") || has("price") {
        format!(
            "Your plans are matched to your budget of {}. Typical ranges: health ₦2,500 - \
             ₦8,000/month, life ₦1,500 - ₦5,000/month, motor ₦5,000 - ₦15,000/month. Your \
             recommendations show the exact range for each plan.",
            profile.monthly_budget.as_deref().unwrap_or("your choice")
        )
    } else {
        format!(
            "You can ask me about your risk score ({score}/100), why a plan was recommended, \
             how much it will cost, or anything about {employment} work and insurance."
        )
    }
}
