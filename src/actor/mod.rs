//! Per-actor mutable state
//!
//! One `Actor` models the slice of a connected character this core reads and
//! writes: class identity, session flags and the live skill set. The skill
//! map is mutated only by an orchestrated transition or an integrity check;
//! the caller's command context serializes those per actor.

pub mod skills;

pub use skills::{SkillRecord, MAX_PLAIN_LEVEL};

use crate::core::types::{ActorId, ClassId, ClassTier, ClientVariant, SkillId, SubclassKind};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A character as seen by the ascension core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub class: ClassId,
    pub tier: ClassTier,
    pub level: u16,
    pub subclass: SubclassKind,
    pub client_variant: ClientVariant,
    /// Active transformation effect (shapeshift buff)
    pub transformed: bool,
    /// An awakening sequence has been offered and accepted but not committed
    pub awakening_pending: bool,
    skills: AHashMap<SkillId, SkillRecord>,
}

impl Actor {
    pub fn new(class: ClassId, tier: ClassTier, level: u16) -> Self {
        Self {
            id: ActorId::new(),
            class,
            tier,
            level,
            subclass: SubclassKind::Base,
            client_variant: ClientVariant::Standard,
            transformed: false,
            awakening_pending: false,
            skills: AHashMap::new(),
        }
    }

    /// Insert or replace a known skill
    pub fn learn_skill(&mut self, record: SkillRecord) {
        self.skills.insert(record.id, record);
    }

    /// Remove a skill from the live set, returning the old record if known
    pub fn forget_skill(&mut self, id: SkillId) -> Option<SkillRecord> {
        self.skills.remove(&id)
    }

    pub fn knows(&self, id: SkillId) -> bool {
        self.skills.contains_key(&id)
    }

    pub fn skill(&self, id: SkillId) -> Option<&SkillRecord> {
        self.skills.get(&id)
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillRecord> {
        self.skills.values()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    /// Known skill ids in ascending order, for stable iteration
    pub fn skill_ids_sorted(&self) -> Vec<SkillId> {
        let mut ids: Vec<SkillId> = self.skills.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Commit a new class identity
    pub fn set_class(&mut self, class: ClassId, tier: ClassTier) {
        self.class = class;
        self.tier = tier;
    }
}
