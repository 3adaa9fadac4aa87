//! Known-skill records and the display-level encoding

use crate::core::types::SkillId;
use serde::{Deserialize, Serialize};

/// Display levels above this value carry an enchant sub-level in their
/// last two digits (e.g. 115 = base skill enchanted to +15).
pub const MAX_PLAIN_LEVEL: u16 = 99;

/// A skill as the actor currently knows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub id: SkillId,
    pub display_level: u16,
}

impl SkillRecord {
    pub fn new(id: SkillId, display_level: u16) -> Self {
        Self { id, display_level }
    }

    /// The enchant sub-level encoded in the display level, if any
    pub fn enchant_sublevel(&self) -> Option<u16> {
        if self.display_level > MAX_PLAIN_LEVEL {
            Some(self.display_level % 100)
        } else {
            None
        }
    }

    /// True when the display level carries an enchant sub-level
    pub fn is_enchanted(&self) -> bool {
        self.enchant_sublevel().is_some()
    }
}
