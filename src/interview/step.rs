//! Interview steps and the transition table between them.

use tracing::debug;

use crate::profiles::{parse_services, ProfileDraft, ProfileField};

use super::delay::DelayKind;
use super::refine::{refine_bio, BioRefinement};
use super::script;

/// One numbered question of the interview, plus the display state reached
/// after the last answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterviewStep {
    AwaitingName,
    AwaitingRole,
    AwaitingCity,
    AwaitingAvailability,
    AwaitingWhatsapp,
    AwaitingBio,
    AwaitingServices,
    AwaitingPhotosOrSkip,
    Complete,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Bot message, emitted after the given pause.
    Say { text: String, delay: DelayKind },
    /// Render the card. `lead` is an extra pause before the usual finalize one.
    Finalize { lead: Option<DelayKind> },
}

impl Effect {
    fn say(text: impl Into<String>, delay: DelayKind) -> Self {
        Effect::Say {
            text: text.into(),
            delay,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: InterviewStep,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(step: InterviewStep) -> Self {
        Self {
            next: step,
            effects: Vec::new(),
        }
    }

    pub fn advanced(&self, from: InterviewStep) -> bool {
        self.next != from
    }
}

impl InterviewStep {
    pub const FIRST: InterviewStep = InterviewStep::AwaitingName;

    /// 1-based step number; `None` once complete.
    pub fn number(self) -> Option<u8> {
        match self {
            InterviewStep::AwaitingName => Some(1),
            InterviewStep::AwaitingRole => Some(2),
            InterviewStep::AwaitingCity => Some(3),
            InterviewStep::AwaitingAvailability => Some(4),
            InterviewStep::AwaitingWhatsapp => Some(5),
            InterviewStep::AwaitingBio => Some(6),
            InterviewStep::AwaitingServices => Some(7),
            InterviewStep::AwaitingPhotosOrSkip => Some(8),
            InterviewStep::Complete => None,
        }
    }

    /// Draft field written by this step's answer.
    pub fn field(self) -> Option<ProfileField> {
        match self {
            InterviewStep::AwaitingName => Some(ProfileField::Name),
            InterviewStep::AwaitingRole => Some(ProfileField::Role),
            InterviewStep::AwaitingCity => Some(ProfileField::City),
            InterviewStep::AwaitingAvailability => Some(ProfileField::Availability),
            InterviewStep::AwaitingWhatsapp => Some(ProfileField::Whatsapp),
            InterviewStep::AwaitingBio => Some(ProfileField::Bio),
            InterviewStep::AwaitingServices => Some(ProfileField::Services),
            InterviewStep::AwaitingPhotosOrSkip | InterviewStep::Complete => None,
        }
    }

    pub fn accepts_input(self) -> bool {
        self != InterviewStep::Complete
    }

    /// Applies one answer. Blank answers and answers after completion leave
    /// both the step and the draft untouched.
    pub fn apply(self, draft: &mut ProfileDraft, input: &str) -> Transition {
        let answer = input.trim();
        if answer.is_empty() || !self.accepts_input() {
            return Transition::stay(self);
        }

        let transition = match self {
            InterviewStep::AwaitingName => {
                draft.name = answer.to_string();
                prompt(InterviewStep::AwaitingRole, script::ASK_ROLE)
            }
            InterviewStep::AwaitingRole => {
                draft.role = answer.to_string();
                prompt(InterviewStep::AwaitingCity, script::ASK_CITY)
            }
            InterviewStep::AwaitingCity => {
                draft.city = answer.to_string();
                prompt(InterviewStep::AwaitingAvailability, script::ASK_AVAILABILITY)
            }
            InterviewStep::AwaitingAvailability => {
                draft.availability = answer.to_string();
                prompt(InterviewStep::AwaitingWhatsapp, script::ASK_WHATSAPP)
            }
            InterviewStep::AwaitingWhatsapp => {
                draft.whatsapp = answer.to_string();
                prompt(InterviewStep::AwaitingBio, script::ASK_BIO)
            }
            InterviewStep::AwaitingBio => {
                let refinement = refine_bio(answer, &draft.role, &draft.city);
                let effects = match &refinement {
                    BioRefinement::Rewritten(bio) => vec![
                        Effect::say(script::suggest_bio(bio), DelayKind::Suggestion),
                        Effect::say(script::ASK_SERVICES, DelayKind::ServicesAfterSuggestion),
                    ],
                    BioRefinement::Kept(_) => {
                        vec![Effect::say(script::ASK_SERVICES, DelayKind::Prompt)]
                    }
                };
                draft.bio = refinement.into_bio();
                Transition {
                    next: InterviewStep::AwaitingServices,
                    effects,
                }
            }
            InterviewStep::AwaitingServices => {
                draft.services = parse_services(answer);
                prompt(InterviewStep::AwaitingPhotosOrSkip, script::ASK_PHOTOS)
            }
            InterviewStep::AwaitingPhotosOrSkip => {
                let effects = if answer.eq_ignore_ascii_case(script::SKIP_KEYWORD) {
                    vec![Effect::Finalize { lead: None }]
                } else {
                    vec![
                        Effect::say(script::UPLOAD_PLACEHOLDER, DelayKind::Prompt),
                        Effect::Finalize {
                            lead: Some(DelayKind::UploadNotice),
                        },
                    ]
                };
                Transition {
                    next: InterviewStep::Complete,
                    effects,
                }
            }
            InterviewStep::Complete => Transition::stay(self),
        };
        debug!(from = ?self, to = ?transition.next, "interview step applied");
        transition
    }
}

fn prompt(next: InterviewStep, text: &str) -> Transition {
    Transition {
        next,
        effects: vec![Effect::say(text, DelayKind::Prompt)],
    }
}
