//! Session event log
//!
//! Records playback and moderation state changes so a front end can show
//! what happened during the session.

use crate::types::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Session event types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Play { video_id: String },
    Stop { video_id: String },
    Pause { video_id: String },
    Resume { video_id: String },
    Flag { video_id: String, reason: String },
    Unflag { video_id: String },
}

/// Event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEventRecord {
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    /// Monotonic per session, starting at 1
    pub sequence: u64,
    #[serde(flatten)]
    pub event: SessionEvent,
}

/// Bounded in-memory event history
#[derive(Debug, Clone)]
pub struct EventLog {
    session_id: SessionId,
    sequence: u64,
    records: VecDeque<SessionEventRecord>,
    capacity: usize,
    enabled: bool,
}

impl EventLog {
    pub fn new(session_id: SessionId, capacity: usize, enabled: bool) -> Self {
        Self {
            session_id,
            sequence: 0,
            records: VecDeque::new(),
            capacity,
            enabled,
        }
    }

    /// Append an event, dropping the oldest past capacity
    pub fn record(&mut self, event: SessionEvent) {
        if !self.enabled || self.capacity == 0 {
            return;
        }

        self.sequence += 1;
        debug!(sequence = self.sequence, event = ?event, "Session event");

        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(SessionEventRecord {
            session_id: self.session_id,
            timestamp: Utc::now(),
            sequence: self.sequence,
            event,
        });
    }

    /// Events oldest first
    pub fn records(&self) -> impl Iterator<Item = &SessionEventRecord> {
        self.records.iter()
    }
}
