use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answers::parse_boolean;
use super::domain::{AnswerValue, ProfileField, ProfileNotReady, RecordError, UserProfile};
use super::questions::{prompt_for, QuestionPrompt, YES_NO};
use super::scoring::RiskAssessment;

const LOCATION_PROMPT: &str = "Okay! Tell me the name of your city or state. Just type it below.";
const CLARIFY_PROMPT: &str =
    "Sorry, I'm not sure. Do you have it or not? Just answer 'Yes' or 'No'.";

/// Flow state that lives beside the profile between answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeState {
    pub awaiting_location: bool,
}

/// How far through the question sequence a profile is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntakeProgress {
    pub answered: usize,
    pub total: usize,
}

/// Result of feeding one answer to the flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// Answer stored; `next` is the following question.
    Recorded {
        field: ProfileField,
        next: QuestionPrompt,
    },
    /// The user picked "Other city"; the next answer is taken as the location.
    AwaitingLocation { prompt: &'static str },
    /// A yes/no answer could not be read; the same question is asked again.
    NeedsClarification {
        field: ProfileField,
        prompt: &'static str,
        options: [&'static str; 2],
    },
    /// Final answer stored and the profile finalized.
    Completed { assessment: RiskAssessment },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("the assessment is already complete")]
    AlreadyCompleted,
    #[error("answer text is empty")]
    EmptyAnswer,
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    NotReady(#[from] ProfileNotReady),
}

/// Walks a profile through the question sequence one answer at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeSession {
    profile: UserProfile,
    state: IntakeState,
}

impl IntakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resume(profile: UserProfile, state: IntakeState) -> Self {
        Self { profile, state }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    pub fn into_parts(self) -> (UserProfile, IntakeState) {
        (self.profile, self.state)
    }

    /// First unanswered field, in question order.
    pub fn current_field(&self) -> Option<ProfileField> {
        if self.profile.is_complete() {
            return None;
        }
        ProfileField::ALL
            .into_iter()
            .find(|field| !self.profile.has_answer(*field))
    }

    pub fn current_prompt(&self) -> Option<QuestionPrompt> {
        self.current_field().map(prompt_for)
    }

    pub fn progress(&self) -> IntakeProgress {
        let total = ProfileField::ALL.len();
        IntakeProgress {
            answered: total - self.profile.missing_fields().len(),
            total,
        }
    }

    /// Apply `text` as the answer to the current question.
    pub fn answer(
        &mut self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<AnswerOutcome, IntakeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(IntakeError::EmptyAnswer);
        }

        let Some(field) = self.current_field() else {
            return Err(IntakeError::AlreadyCompleted);
        };

        let value = if self.state.awaiting_location && field == ProfileField::Location {
            self.state.awaiting_location = false;
            AnswerValue::Text(text.to_string())
        } else if field == ProfileField::Location && text.to_lowercase().contains("other") {
            self.state.awaiting_location = true;
            return Ok(AnswerOutcome::AwaitingLocation {
                prompt: LOCATION_PROMPT,
            });
        } else if field.is_boolean() {
            match parse_boolean(text) {
                Some(flag) => AnswerValue::Flag(flag),
                None => {
                    return Ok(AnswerOutcome::NeedsClarification {
                        field,
                        prompt: CLARIFY_PROMPT,
                        options: YES_NO,
                    })
                }
            }
        } else {
            AnswerValue::Text(text.to_string())
        };

        self.profile.record(field, value)?;

        match self.current_field() {
            Some(next) => Ok(AnswerOutcome::Recorded {
                field,
                next: prompt_for(next),
            }),
            None => {
                let assessment = self.profile.finalize(now)?;
                Ok(AnswerOutcome::Completed { assessment })
            }
        }
    }

    /// Start over with an empty profile.
    pub fn restart(&mut self) {
        self.profile.reset();
        self.state = IntakeState::default();
    }
}
