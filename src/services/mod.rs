//! Collaborator seams for persistence and item grants
//!
//! Both traits are synchronous and fallible; callers log failures and keep
//! going (no rollback of in-memory state). The in-memory implementations
//! back the demo binary and tests.

use crate::actor::SkillRecord;
use crate::core::error::Result;
use crate::core::types::{ActorId, ItemId, SkillId};
use ahash::AHashMap;

/// Grants items into an actor's inventory
pub trait ItemGrants {
    fn grant(&mut self, actor: ActorId, item: ItemId, count: u64) -> Result<()>;
}

/// Writes skill changes through to persisted storage
pub trait SkillPersistence {
    fn store_skill(&mut self, actor: ActorId, record: SkillRecord) -> Result<()>;
    fn delete_skill(&mut self, actor: ActorId, skill: SkillId) -> Result<()>;
}

/// One recorded item grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantEntry {
    pub actor: ActorId,
    pub item: ItemId,
    pub count: u64,
}

/// In-memory item ledger
#[derive(Debug, Clone, Default)]
pub struct MemoryItemLedger {
    pub grants: Vec<GrantEntry>,
}

impl MemoryItemLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_granted(&self, item: ItemId) -> u64 {
        self.grants
            .iter()
            .filter(|g| g.item == item)
            .map(|g| g.count)
            .sum()
    }
}

impl ItemGrants for MemoryItemLedger {
    fn grant(&mut self, actor: ActorId, item: ItemId, count: u64) -> Result<()> {
        self.grants.push(GrantEntry { actor, item, count });
        Ok(())
    }
}

/// In-memory skill store
#[derive(Debug, Clone, Default)]
pub struct MemorySkillStore {
    stored: AHashMap<(ActorId, SkillId), u16>,
    pub deletions: Vec<(ActorId, SkillId)>,
}

impl MemorySkillStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored_level(&self, actor: ActorId, skill: SkillId) -> Option<u16> {
        self.stored.get(&(actor, skill)).copied()
    }
}

impl SkillPersistence for MemorySkillStore {
    fn store_skill(&mut self, actor: ActorId, record: SkillRecord) -> Result<()> {
        self.stored.insert((actor, record.id), record.display_level);
        Ok(())
    }

    fn delete_skill(&mut self, actor: ActorId, skill: SkillId) -> Result<()> {
        self.stored.remove(&(actor, skill));
        self.deletions.push((actor, skill));
        Ok(())
    }
}
