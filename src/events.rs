//! Append-only JSONL audit trail of card sessions.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workspace::WorkspacePaths;

pub const EVENTS_FILE_NAME: &str = "events.jsonl";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    InterviewStarted,
    AnswerRecorded,
    InterviewCompleted,
    CardGenerated,
    ProfilePublished,
    CardExported,
    RelayForwarded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub event_id: Uuid,
    pub session_id: Uuid,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub details: serde_json::Value,
}

/// Handle on the events file. Cloning shares the path, not an open handle.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn for_workspace(paths: &WorkspacePaths) -> Self {
        Self::at(paths.logs_dir.join(EVENTS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, event: &SessionEvent) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed creating log directory {:?}", parent))?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed opening event log {:?}", self.path))?;
        file.write_all(serde_json::to_string(event)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    pub fn record(
        &self,
        session_id: Uuid,
        event_type: EventType,
        details: serde_json::Value,
    ) -> Result<Uuid> {
        let event = SessionEvent {
            event_id: Uuid::new_v4(),
            session_id,
            event_type,
            timestamp: Utc::now(),
            details,
        };
        self.append(&event)?;
        Ok(event.event_id)
    }

    pub fn load(&self) -> Result<Vec<SessionEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed reading event log {:?}", self.path))?;
        let mut events = Vec::new();
        for line in data.lines().filter(|l| !l.trim().is_empty()) {
            let event: SessionEvent = serde_json::from_str(line)
                .with_context(|| format!("Malformed event in {:?}", self.path))?;
            events.push(event);
        }
        Ok(events)
    }

    pub fn for_session(&self, session_id: Uuid) -> Result<Vec<SessionEvent>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|event| event.session_id == session_id)
            .collect())
    }
}
