//! Simulated "typing" pauses before bot messages.
//!
//! Pauses are cosmetic. Nothing in the interview waits on them for
//! correctness, so tests swap in `NoDelay` or a recorder.

use std::thread;
use std::time::Duration;

use crate::workspace::InterviewSettings;

/// Which pause precedes a bot message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayKind {
    Prompt,
    Suggestion,
    ServicesAfterSuggestion,
    UploadNotice,
    Finalize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelaySchedule {
    pub prompt: Duration,
    pub suggestion: Duration,
    pub services_after_suggestion: Duration,
    pub upload_notice: Duration,
    pub finalize: Duration,
}

impl DelaySchedule {
    pub fn instant() -> Self {
        Self {
            prompt: Duration::ZERO,
            suggestion: Duration::ZERO,
            services_after_suggestion: Duration::ZERO,
            upload_notice: Duration::ZERO,
            finalize: Duration::ZERO,
        }
    }

    pub fn duration(&self, kind: DelayKind) -> Duration {
        match kind {
            DelayKind::Prompt => self.prompt,
            DelayKind::Suggestion => self.suggestion,
            DelayKind::ServicesAfterSuggestion => self.services_after_suggestion,
            DelayKind::UploadNotice => self.upload_notice,
            DelayKind::Finalize => self.finalize,
        }
    }
}

impl Default for DelaySchedule {
    fn default() -> Self {
        Self::from(&InterviewSettings::default())
    }
}

impl From<&InterviewSettings> for DelaySchedule {
    fn from(settings: &InterviewSettings) -> Self {
        if !settings.simulate_typing {
            return Self::instant();
        }
        Self {
            prompt: Duration::from_millis(settings.prompt_delay_ms),
            suggestion: Duration::from_millis(settings.suggestion_delay_ms),
            services_after_suggestion: Duration::from_millis(
                settings.services_after_suggestion_delay_ms,
            ),
            upload_notice: Duration::from_millis(settings.upload_notice_delay_ms),
            finalize: Duration::from_millis(settings.finalize_delay_ms),
        }
    }
}

/// Performs the pause before a bot message is emitted.
pub trait TypingDelay {
    fn pause(&mut self, duration: Duration);
}

/// Blocks the current thread for the requested duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepDelay;

impl TypingDelay for SleepDelay {
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl TypingDelay for NoDelay {
    fn pause(&mut self, _duration: Duration) {}
}
