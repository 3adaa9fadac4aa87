//! Outbound session notifications
//!
//! The core only decides *that* something must be told to the actor's live
//! session; encoding and delivery belong to the network layer. Components
//! push notification values into an injected sink.

use crate::core::types::ClassId;
use serde::{Deserialize, Serialize};

/// Subtracted from the awakened class id to derive the class-change
/// presentation effect id broadcast to nearby actors.
pub const CLASS_CHANGE_PRESENTATION_OFFSET: u16 = 119;

/// One notification destined for the actor's session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionNotification {
    /// Prompt the actor to ascend into `target`; `passive` offers come from
    /// login-time eligibility detection rather than the quest path
    AscensionOffer { target: ClassId, passive: bool },
    /// Introductory cinematic cue paired with a passive offer
    IntroCinematic,
    /// Class-change presentation effect after a committed ascension
    ClassChanged { presentation_id: u16 },
    /// Full actor-info refresh after the class commit
    ActorInfoRefresh,
    /// The known-skill list changed (or may have); resend it
    SkillListRefresh,
}

/// Receiver for outbound notifications
pub trait NotificationSink {
    fn push(&mut self, note: SessionNotification);
}

/// Sink that records everything pushed, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub notes: Vec<SessionNotification>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, note: &SessionNotification) -> bool {
        self.notes.contains(note)
    }
}

impl NotificationSink for RecordingSink {
    fn push(&mut self, note: SessionNotification) {
        self.notes.push(note);
    }
}
