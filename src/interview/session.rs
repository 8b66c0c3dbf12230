//! A single user's interview: one draft, one step counter, one transcript.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::events::{EventLog, EventType};
use crate::generation::GeneratedArtifacts;
use crate::profiles::ProfileDraft;

use super::delay::{DelayKind, DelaySchedule, SleepDelay, TypingDelay};
use super::script;
use super::step::{Effect, InterviewStep};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Bot,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Result of submitting one answer.
#[derive(Debug, Clone, Default)]
pub struct SubmitOutcome {
    pub accepted: bool,
    /// Bot lines emitted in response, in order.
    pub replies: Vec<String>,
}

/// Drives `InterviewStep` transitions for one session.
///
/// Answers are processed strictly one at a time; `submit` takes `&mut self`
/// so no two answers can be in flight for the same session.
pub struct InterviewSession<D: TypingDelay = SleepDelay> {
    id: Uuid,
    step: InterviewStep,
    draft: ProfileDraft,
    transcript: Vec<TranscriptEntry>,
    artifacts: Option<GeneratedArtifacts>,
    schedule: DelaySchedule,
    delay: D,
    events: Option<EventLog>,
}

impl<D: TypingDelay> InterviewSession<D> {
    /// Starts a fresh session with an empty draft and the greeting queued.
    pub fn new(schedule: DelaySchedule, delay: D) -> Self {
        Self {
            id: Uuid::new_v4(),
            step: InterviewStep::FIRST,
            draft: ProfileDraft::new(),
            transcript: vec![TranscriptEntry::new(Speaker::Bot, script::GREETING)],
            artifacts: None,
            schedule,
            delay,
            events: None,
        }
    }

    /// Records session events to `log` from now on.
    pub fn with_event_log(mut self, log: EventLog) -> Self {
        self.events = Some(log);
        self.record(EventType::InterviewStarted, json!({}));
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> InterviewStep {
        self.step
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn artifacts(&self) -> Option<&GeneratedArtifacts> {
        self.artifacts.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.step == InterviewStep::Complete
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Last bot line, i.e. the question currently awaiting an answer.
    pub fn current_prompt(&self) -> Option<&str> {
        self.transcript
            .iter()
            .rev()
            .find(|entry| entry.speaker == Speaker::Bot)
            .map(|entry| entry.text.as_str())
    }

    pub fn into_draft(self) -> ProfileDraft {
        self.draft
    }

    /// Feeds one answer. Blank input, or input after completion, is ignored.
    pub fn submit(&mut self, input: &str) -> SubmitOutcome {
        let from = self.step;
        let transition = from.apply(&mut self.draft, input);
        if !transition.advanced(from) {
            return SubmitOutcome::default();
        }

        self.transcript
            .push(TranscriptEntry::new(Speaker::User, input.trim()));
        self.step = transition.next;
        self.record(
            EventType::AnswerRecorded,
            json!({
                "step": from.number(),
                "field": from.field().map(|field| field.key()),
            }),
        );

        let mut replies = Vec::new();
        for effect in transition.effects {
            match effect {
                Effect::Say { text, delay } => {
                    self.say(delay, text.clone());
                    replies.push(text);
                }
                Effect::Finalize { lead } => {
                    if let Some(kind) = lead {
                        self.pause(kind);
                    }
                    replies.extend(self.finalize());
                }
            }
        }
        SubmitOutcome {
            accepted: true,
            replies,
        }
    }

    fn finalize(&mut self) -> Vec<String> {
        let artifacts = GeneratedArtifacts::from_draft(&self.draft);
        let instructions = script::instructions(&self.draft.microsite_address());
        info!(
            session_id = %self.id,
            username = %artifacts.username,
            "interview complete, card generated"
        );
        self.record(
            EventType::InterviewCompleted,
            json!({ "username": artifacts.username }),
        );
        self.record(
            EventType::CardGenerated,
            json!({
                "username": artifacts.username,
                "card_chars": artifacts.card_chars(),
                "condensed_bio_chars": artifacts.condensed_bio_chars(),
            }),
        );
        self.artifacts = Some(artifacts);

        self.say(DelayKind::Finalize, script::CARD_READY);
        self.say(DelayKind::Finalize, instructions.clone());
        vec![script::CARD_READY.to_string(), instructions]
    }

    fn say(&mut self, kind: DelayKind, text: impl Into<String>) {
        self.pause(kind);
        self.transcript.push(TranscriptEntry::new(Speaker::Bot, text));
    }

    fn pause(&mut self, kind: DelayKind) {
        let duration = self.schedule.duration(kind);
        self.delay.pause(duration);
    }

    fn record(&self, event_type: EventType, details: serde_json::Value) {
        if let Some(log) = &self.events {
            if let Err(err) = log.record(self.id, event_type, details) {
                warn!(session_id = %self.id, error = %err, "failed to record interview event");
            }
        }
    }
}

impl Default for InterviewSession<SleepDelay> {
    fn default() -> Self {
        Self::new(DelaySchedule::default(), SleepDelay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::delay::NoDelay;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingDelay {
        pauses: Vec<Duration>,
    }

    impl TypingDelay for RecordingDelay {
        fn pause(&mut self, duration: Duration) {
            self.pauses.push(duration);
        }
    }

    const SCRIPTED: [&str; 8] = [
        "Siti",
        "Photographer",
        "Penang",
        "Evenings",
        "+60123456789",
        "I take photos of events",
        "Events, Portraits",
        "skip",
    ];

    #[test]
    fn scripted_answers_walk_every_step_once() {
        let mut session = InterviewSession::new(DelaySchedule::instant(), NoDelay);
        let mut visited = vec![session.step()];
        for answer in SCRIPTED {
            let outcome = session.submit(answer);
            assert!(outcome.accepted, "answer {answer} rejected");
            visited.push(session.step());
        }
        let numbers: Vec<Option<u8>> = visited.iter().map(|step| step.number()).collect();
        assert_eq!(
            numbers,
            vec![
                Some(1),
                Some(2),
                Some(3),
                Some(4),
                Some(5),
                Some(6),
                Some(7),
                Some(8),
                None
            ]
        );
        assert!(session.is_complete());
        assert_eq!(
            session.draft().bio,
            "Creative photographer capturing vibrant moments in Penang."
        );
        assert_eq!(session.draft().services, vec!["Events", "Portraits"]);
    }

    #[test]
    fn completion_exposes_artifacts_and_instructions() {
        let mut session = InterviewSession::new(DelaySchedule::instant(), NoDelay);
        let mut last = SubmitOutcome::default();
        for answer in SCRIPTED {
            last = session.submit(answer);
        }
        let artifacts = session.artifacts().expect("artifacts after completion");
        assert_eq!(artifacts.username, "siti");
        assert!(artifacts.card_text.contains("siti.agentos.my.id"));
        assert_eq!(last.replies[0], script::CARD_READY);
        assert!(last.replies[1].ends_with("Visit your microsite: siti.agentos.my.id"));
        assert_eq!(session.current_prompt(), Some(last.replies[1].as_str()));
    }

    #[test]
    fn blank_answers_leave_the_session_in_place() {
        let mut session = InterviewSession::new(DelaySchedule::instant(), NoDelay);
        let outcome = session.submit("  ");
        assert!(!outcome.accepted);
        assert!(outcome.replies.is_empty());
        assert_eq!(session.step(), InterviewStep::AwaitingName);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.current_prompt(), Some(script::GREETING));
    }

    #[test]
    fn input_after_completion_is_ignored() {
        let mut session = InterviewSession::new(DelaySchedule::instant(), NoDelay);
        for answer in SCRIPTED {
            session.submit(answer);
        }
        let transcript_len = session.transcript().len();
        let outcome = session.submit("Another name");
        assert!(!outcome.accepted);
        assert_eq!(session.transcript().len(), transcript_len);
        assert_eq!(session.draft().name, "Siti");
    }

    #[test]
    fn pauses_follow_the_schedule() {
        let schedule = DelaySchedule {
            prompt: Duration::from_millis(15),
            suggestion: Duration::from_millis(10),
            services_after_suggestion: Duration::from_millis(30),
            upload_notice: Duration::from_millis(20),
            finalize: Duration::from_millis(25),
        };
        let mut session = InterviewSession::new(schedule, RecordingDelay::default());
        for answer in &SCRIPTED[..5] {
            session.submit(answer);
        }
        session.submit("I sell cars");
        session.submit("Sedans");
        session.submit("photos attached");
        let pauses: Vec<u64> = session
            .delay()
            .pauses
            .iter()
            .map(|d| d.as_millis() as u64)
            .collect();
        assert_eq!(pauses, vec![15, 15, 15, 15, 15, 10, 30, 15, 15, 20, 25, 25]);
        assert_eq!(
            session.draft().bio,
            "Trusted car dealer offering premium vehicles in Penang."
        );
    }

    #[test]
    fn user_answers_are_recorded_trimmed() {
        let mut session = InterviewSession::new(DelaySchedule::instant(), NoDelay);
        session.submit("  Siti  ");
        let user_lines: Vec<&str> = session
            .transcript()
            .iter()
            .filter(|entry| entry.speaker == Speaker::User)
            .map(|entry| entry.text.as_str())
            .collect();
        assert_eq!(user_lines, vec!["Siti"]);
    }
}
