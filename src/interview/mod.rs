//! Scripted chat interview that fills a `ProfileDraft` one answer at a time.
//!
//! `step` holds the pure transition table, `session` drives it against a
//! draft, a transcript and an injectable typing delay.

pub mod delay;
pub mod refine;
pub mod script;
pub mod session;
pub mod step;

pub use delay::{DelayKind, DelaySchedule, NoDelay, SleepDelay, TypingDelay};
pub use refine::{refine_bio, BioRefinement};
pub use session::{InterviewSession, Speaker, SubmitOutcome, TranscriptEntry};
pub use step::{Effect, InterviewStep, Transition};
