use crate::infra::InMemorySessionStore;
use assure_naija::error::AppError;
use assure_naija::workflows::onboarding::{
    assess, generate_recommendations, AnswerOutcome, InsurancePlan, OnboardingService,
    RiskAssessment, ScriptedAssistant, UserProfile,
};
use chrono::Utc;
use clap::{Args, ValueEnum};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Path to a profile JSON document (camelCase keys)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Print machine-readable JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Persona whose answers are replayed through the question flow
    #[arg(long, value_enum, default_value_t = Persona::Rider)]
    pub(crate) persona: Persona,
    /// Free-text question to put to the assistant once onboarding completes
    #[arg(long)]
    pub(crate) ask: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Persona {
    /// Okada rider in Lagos supporting a large family
    #[default]
    Rider,
    /// University student with no dependents or assets
    Student,
    /// Market trader who answers in conversational English
    Trader,
}

impl Persona {
    fn answers(self) -> &'static [&'static str] {
        match self {
            Persona::Rider => &[
                "46-55",
                "Lagos",
                "Rider/Driver",
                "₦50k-₦150k",
                "5 or more",
                "Travel a lot",
                "Minor conditions (e.g., glasses, allergies)",
                "Yes",
                "No",
                "Life insurance for family",
                "Balanced approach",
                "₦2,000 - ₦5,000",
            ],
            Persona::Student => &[
                "18-25",
                "Ibadan",
                "Student",
                "Under ₦50k",
                "None",
                "Mostly indoors",
                "Healthy, no issues",
                "No",
                "No",
                "Health coverage",
                "I avoid risk (conservative)",
                "Under ₦2,000",
            ],
            Persona::Trader => &[
                "36-45",
                "Other city",
                "Aba",
                "Artisan/Trader",
                "₦150k-₦300k",
                "3-4 people",
                "Physical work",
                "Prefer not to say",
                "maybe",
                "nope",
                "yes I do",
                "Business protection",
                "I can take risks if needed",
                "₦5,000 - ₦10,000",
            ],
        }
    }
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.profile)?;
    let mut profile: UserProfile = serde_json::from_str(&raw)?;

    if !profile.is_complete() {
        // Fully answered profiles saved before completion are finalized now.
        profile.finalize(Utc::now())?;
    }

    let assessment = assess(&profile)?;
    let plans = generate_recommendations(&profile)?;

    if args.json {
        let payload = json!({
            "assessment": assessment,
            "recommendations": plans,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        render_assessment(&profile, &assessment);
        render_plans(&plans);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { persona, ask } = args;

    let store = Arc::new(InMemorySessionStore::default());
    let service = OnboardingService::new(store, Arc::new(ScriptedAssistant));
    let session = service.create_session()?;
    let id = session.session_id;

    println!("AssureNaija onboarding demo ({persona:?} persona, session {id})");
    for answer in persona.answers() {
        let prompt = service.session(&id)?.next_question;
        if let Some(prompt) = prompt {
            if let Some(intro) = prompt.intro {
                println!("\n{intro}");
            }
            println!("Q: {}", prompt.question.question);
        }
        println!("A: {answer}");

        match service.answer(&id, answer)? {
            AnswerOutcome::Recorded { .. } => {}
            AnswerOutcome::AwaitingLocation { prompt } => println!("Q: {prompt}"),
            AnswerOutcome::NeedsClarification { prompt, .. } => println!("Q: {prompt}"),
            AnswerOutcome::Completed { assessment } => {
                println!("\nOnboarding complete (score {}).", assessment.score);
            }
        }
    }

    let view = service.session(&id)?;
    if !view.completed {
        println!(
            "\nPersona stopped after {}/{} answers",
            view.progress.answered, view.progress.total
        );
        return Ok(());
    }

    let assessment = assess(&view.profile)?;
    render_assessment(&view.profile, &assessment);
    render_plans(&service.recommendations(&id)?);

    let question = ask.unwrap_or_else(|| "Why is my risk score what it is?".to_string());
    println!("\nQ: {question}");
    println!("{}", service.ask(&id, &question)?);

    Ok(())
}

fn render_assessment(profile: &UserProfile, assessment: &RiskAssessment) {
    println!(
        "\nRisk score: {}/100 ({})",
        assessment.score,
        assessment.label()
    );
    for component in &assessment.components {
        println!(
            "  - {:?}: +{} ({})",
            component.factor, component.points, component.notes
        );
    }
    println!("Key factors:");
    for factor in assessment.key_factors() {
        println!("  - {factor}");
    }
    for highlight in assessment.highlights(profile) {
        println!("  * {highlight}");
    }
}

fn render_plans(plans: &[InsurancePlan]) {
    println!("\nRecommended plans:");
    for plan in plans {
        let badge = if plan.is_strong_match() {
            " [strong match]"
        } else {
            ""
        };
        println!(
            "  {}. {} | {} | {}% match{}",
            plan.priority, plan.plan_type, plan.premium_range, plan.match_score, badge
        );
        println!("     {}", plan.why_fits_you);
    }
}
