use super::super::IntegrationHarness;
use agentos::interview::{InterviewSession, NoDelay};
use agentos::profiles::{Attachment, ProfileField};
use agentos::{CardWorkspace, FormCollector};
use std::path::PathBuf;

pub struct CardFixture {
    harness: IntegrationHarness,
    pub workspace: CardWorkspace,
}

impl CardFixture {
    pub fn new() -> Self {
        let harness = IntegrationHarness::new();
        let workspace = harness.card_workspace();
        Self { harness, workspace }
    }

    pub fn root(&self) -> PathBuf {
        self.harness.workspace_path().to_path_buf()
    }

    /// Interview with pauses skipped, logging to the workspace event log.
    pub fn interview(&self) -> InterviewSession<NoDelay> {
        self.workspace.interview(NoDelay)
    }

    /// Form with every required field filled for Jane Doe.
    pub fn filled_form(&self) -> FormCollector {
        let mut form = self.workspace.form();
        for (field, value) in [
            (ProfileField::Name, "Jane Doe"),
            (ProfileField::Role, "Consultant"),
            (ProfileField::City, "KL"),
            (ProfileField::Availability, "9-5"),
            (ProfileField::Whatsapp, "+60111"),
            (ProfileField::Bio, "Helps businesses grow."),
            (ProfileField::Services, "Strategy, Coaching"),
        ] {
            form.set_field(field, value);
        }
        form
    }
}

pub fn png(name: &str, seed: u8) -> Attachment {
    Attachment::new(name, "image/png", vec![0x89, b'P', b'N', b'G', seed])
}

/// Answers for a full interview ending with "skip".
pub const SITI_ANSWERS: &[&str] = &[
    "Siti Nur Ahmad",
    "Student Photographer",
    "Penang",
    "Evenings & weekends",
    "+60-123-456-789",
    "I take photos at events.",
    "Event Photography, Portrait Sessions, Photo Editing",
    "skip",
];
