//! Skill-set resolution for class transitions
//!
//! Decides, for one actor and one class transition, which known skills are
//! kept, which are removed, and which are newly granted. Three rule sources
//! feed the final keep-set: the general keep list, the per-pair maintain
//! list (or, in repair mode, the per-class check list plus the full awaken
//! roster), and the target's bonus pair. Skills outside the class-skill
//! universe are never touched.

use crate::actor::{Actor, SkillRecord};
use crate::core::config::AscensionPolicy;
use crate::core::types::{ClassId, SkillId};
use crate::services::SkillPersistence;
use crate::session::{NotificationSink, SessionNotification};
use crate::skillbook::SkillBook;
use crate::tables::ClassAscensionTable;
use ahash::{AHashMap, AHashSet};

/// Which rule-set variant a resolution uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// A real class transition from source to target
    Transition,
    /// Login / sub-specialization repair of an already-awakened actor
    Repair,
}

/// Planned fate of one skill id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillChange {
    Keep,
    Remove,
    Add { level: u16 },
}

/// Resolved per-skill decisions for one transition
#[derive(Debug, Clone, Default)]
pub struct MigrationPlan {
    changes: AHashMap<SkillId, SkillChange>,
}

impl MigrationPlan {
    pub fn change(&self, id: SkillId) -> Option<SkillChange> {
        self.changes.get(&id).copied()
    }

    pub fn removals(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.changes.iter().filter_map(|(id, change)| match change {
            SkillChange::Remove => Some(*id),
            _ => None,
        })
    }

    pub fn additions(&self) -> impl Iterator<Item = (SkillId, u16)> + '_ {
        self.changes.iter().filter_map(|(id, change)| match change {
            SkillChange::Add { level } => Some((*id, *level)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Apply every decision to the actor's live skill set.
    ///
    /// Deletions reach persisted storage only under the
    /// `persist_skill_deletion` policy flag; additions are always stored.
    /// Collaborator failures are logged and tallied, never rolled back.
    /// A skill-list refresh is requested whether or not anything changed.
    pub fn apply(
        &self,
        actor: &mut Actor,
        policy: &AscensionPolicy,
        store: &mut impl SkillPersistence,
        sink: &mut impl NotificationSink,
    ) -> AppliedChanges {
        let mut applied = AppliedChanges::default();

        for id in self.removals() {
            if actor.forget_skill(id).is_none() {
                continue;
            }
            applied.removed.push(id);
            if policy.persist_skill_deletion {
                if let Err(e) = store.delete_skill(actor.id, id) {
                    tracing::warn!("Failed to delete skill {:?} from store: {}", id, e);
                    applied.persistence_failures += 1;
                }
            }
        }

        for (id, level) in self.additions() {
            let record = SkillRecord::new(id, level);
            actor.learn_skill(record);
            applied.granted.push(id);
            if let Err(e) = store.store_skill(actor.id, record) {
                tracing::warn!("Failed to store skill {:?}: {}", id, e);
                applied.persistence_failures += 1;
            }
        }

        applied.removed.sort_unstable();
        applied.granted.sort_unstable();

        sink.push(SessionNotification::SkillListRefresh);
        applied
    }
}

/// What an applied plan actually did
#[derive(Debug, Clone, Default)]
pub struct AppliedChanges {
    pub removed: Vec<SkillId>,
    pub granted: Vec<SkillId>,
    pub persistence_failures: u32,
}

/// Computes migration plans from the static rule tables
pub struct SkillSetResolver<'a> {
    book: &'a SkillBook,
    table: &'a ClassAscensionTable,
    policy: &'a AscensionPolicy,
}

impl<'a> SkillSetResolver<'a> {
    pub fn new(
        book: &'a SkillBook,
        table: &'a ClassAscensionTable,
        policy: &'a AscensionPolicy,
    ) -> Self {
        Self { book, table, policy }
    }

    /// Resolve keep/remove/add decisions for `actor` moving from `source`
    /// to `target`. In repair mode source and target are the actor's
    /// current class.
    pub fn resolve(
        &self,
        actor: &Actor,
        source: ClassId,
        target: ClassId,
        mode: ResolveMode,
    ) -> MigrationPlan {
        let keep_set = self.keep_set(source, target, mode);

        // Legacy shard behavior: repair never removes from a transformed
        // actor. Behind a policy switch, see AscensionPolicy.
        let suppress_removal = mode == ResolveMode::Repair
            && actor.transformed
            && self.policy.retain_skills_while_transformed;

        let mut changes = AHashMap::with_capacity(actor.skill_count() + 2);
        for record in actor.skills() {
            if !self.book.in_class_universe(record.id) {
                continue;
            }
            let change = if !keep_set.contains(&record.id) && !suppress_removal {
                SkillChange::Remove
            } else {
                SkillChange::Keep
            };
            changes.insert(record.id, change);
        }

        // The target's bonus pair always ends up known at base level,
        // overriding any removal mark. Re-adding at the same level is a
        // no-op once applied.
        if let Some(pair) = self.table.bonus_skills(target) {
            for id in pair.ids() {
                changes.insert(
                    id,
                    SkillChange::Add {
                        level: self.book.base_level(id),
                    },
                );
            }
        }

        MigrationPlan { changes }
    }

    fn keep_set(&self, source: ClassId, target: ClassId, mode: ResolveMode) -> AHashSet<SkillId> {
        let mut keep: AHashSet<SkillId> = self.book.general_keep().collect();
        match mode {
            ResolveMode::Transition => {
                keep.extend(self.book.maintained(source, target));
            }
            ResolveMode::Repair => {
                keep.extend(self.book.awaken_check(target));
                keep.extend(self.book.awaken_roster(target));
            }
        }
        keep
    }
}
