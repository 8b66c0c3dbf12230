pub mod events;
pub mod form;
pub mod generation;
pub mod interview;
pub mod microsite;
pub mod profiles;
pub mod publish;
pub mod relay;
pub mod storage;
pub mod workspace;

// Re-export commonly used types for convenience.
pub use events::{EventLog, EventType, SessionEvent};
pub use form::FormCollector;
pub use generation::GeneratedArtifacts;
pub use interview::{InterviewSession, InterviewStep};
pub use profiles::{Attachment, ProfileDraft, ProfileField};
pub use publish::{publish, PublishedCard};
pub use workspace::{AppConfig, CardWorkspace, WorkspacePaths};
