//! Text artifacts rendered from a completed profile draft.
//!
//! Rendering is a pure function of the draft: same input, byte-identical
//! output. Callers gate on `ProfileDraft::validate` first.

mod card;
mod share;

pub use card::{render_card, render_condensed_bio};
pub use share::{whatsapp_chat_link, whatsapp_share_link};

use serde::{Deserialize, Serialize};

use crate::profiles::{ProfileDraft, ValidationReport};

/// Card text and condensed bio produced together at finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifacts {
    pub username: String,
    pub card_text: String,
    pub condensed_bio: String,
}

impl GeneratedArtifacts {
    pub fn from_draft(draft: &ProfileDraft) -> Self {
        Self {
            username: draft.username(),
            card_text: render_card(draft),
            condensed_bio: render_condensed_bio(draft),
        }
    }

    /// Renders only when the draft satisfies every required-field check.
    pub fn try_from_draft(draft: &ProfileDraft) -> Result<Self, ValidationReport> {
        draft.validate()?;
        Ok(Self::from_draft(draft))
    }

    pub fn card_chars(&self) -> usize {
        self.card_text.chars().count()
    }

    pub fn condensed_bio_chars(&self) -> usize {
        self.condensed_bio.chars().count()
    }

    pub fn share_link(&self) -> String {
        whatsapp_share_link(&self.card_text)
    }
}
