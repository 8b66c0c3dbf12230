//! Form-mode collector: every field editable at once, generation gated on
//! completeness. No refinement happens on this path.

use tracing::debug;

use crate::generation::GeneratedArtifacts;
use crate::profiles::{Attachment, ProfileDraft, ProfileField, ValidationReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Editing,
    Display(GeneratedArtifacts),
}

#[derive(Debug, Clone)]
pub struct FormCollector {
    draft: ProfileDraft,
    /// Services exactly as typed; the draft holds the parsed list.
    services_raw: String,
    mode: FormMode,
}

impl Default for FormCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl FormCollector {
    pub fn new() -> Self {
        Self {
            draft: ProfileDraft::new(),
            services_raw: String::new(),
            mode: FormMode::Editing,
        }
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        self.draft.set_field(field, &value);
        if field == ProfileField::Services {
            self.services_raw = value;
        }
    }

    /// Current input value, with services shown as typed.
    pub fn field_value(&self, field: ProfileField) -> &str {
        self.draft.field(field).unwrap_or(&self.services_raw)
    }

    /// Adds image attachments; others are dropped, as is anything past the
    /// photo cap. Returns how many photos the form now holds.
    pub fn add_photos<I>(&mut self, photos: I) -> usize
    where
        I: IntoIterator<Item = Attachment>,
    {
        self.draft
            .push_photos(photos.into_iter().filter(Attachment::is_image));
        self.draft.photos().len()
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<Attachment> {
        self.draft.remove_photo(index)
    }

    pub fn photos(&self) -> &[Attachment] {
        self.draft.photos()
    }

    pub fn validation(&self) -> Result<(), ValidationReport> {
        self.draft.validate()
    }

    pub fn is_valid(&self) -> bool {
        self.validation().is_ok()
    }

    /// Renders both artifacts and switches to display mode. Returns `None`
    /// and stays in editing mode while any required field is missing.
    pub fn generate(&mut self) -> Option<&GeneratedArtifacts> {
        match GeneratedArtifacts::try_from_draft(&self.draft) {
            Ok(artifacts) => {
                self.mode = FormMode::Display(artifacts);
                self.artifacts()
            }
            Err(report) => {
                debug!(%report, "form generate declined");
                None
            }
        }
    }

    pub fn artifacts(&self) -> Option<&GeneratedArtifacts> {
        match &self.mode {
            FormMode::Display(artifacts) => Some(artifacts),
            FormMode::Editing => None,
        }
    }

    pub fn is_displaying(&self) -> bool {
        matches!(self.mode, FormMode::Display(_))
    }

    /// Back to editing with every value kept.
    pub fn edit(&mut self) {
        self.mode = FormMode::Editing;
    }

    pub fn microsite_path(&self) -> String {
        self.draft.microsite_path()
    }

    pub fn share_link(&self) -> Option<String> {
        self.artifacts().map(GeneratedArtifacts::share_link)
    }
}
