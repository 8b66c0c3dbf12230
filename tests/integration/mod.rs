use agentos::CardWorkspace;
use std::path::Path;
use tempfile::TempDir;

pub struct IntegrationHarness {
    workspace: TempDir,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        Self { workspace }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn card_workspace(&self) -> CardWorkspace {
        CardWorkspace::open_at(self.workspace.path())
            .expect("failed to open card workspace for tests")
    }
}

mod card_export;
mod form_publish;
mod interview_flow;
mod microsite_render;
mod relay_echo;
pub mod support;
