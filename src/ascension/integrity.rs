//! Login-time skill integrity repair
//!
//! An awakened actor's skill set can drift: leftover pre-ascension skills
//! from interrupted transitions, or grants from a sub-specialization swap.
//! On session start and on sub-specialization change this check re-applies
//! the awaken keep rules and re-grants the bonus pair. Safe to run any
//! number of times.

use crate::actor::Actor;
use crate::ascension::resolver::{ResolveMode, SkillSetResolver};
use crate::core::config::AscensionPolicy;
use crate::core::types::{ClassId, SkillId};
use crate::services::SkillPersistence;
use crate::session::NotificationSink;
use crate::skillbook::SkillBook;
use crate::tables::ClassAscensionTable;
use serde::Serialize;

/// What a repair pass did
#[derive(Debug, Clone, Serialize)]
pub struct RepairReport {
    pub class: ClassId,
    pub removed: Vec<SkillId>,
    pub regranted: Vec<SkillId>,
    pub persistence_failures: u32,
}

/// Re-applies awaken skill rules to an already-awakened actor
pub struct LoginIntegrityChecker<'a> {
    table: &'a ClassAscensionTable,
    book: &'a SkillBook,
    policy: &'a AscensionPolicy,
}

impl<'a> LoginIntegrityChecker<'a> {
    pub fn new(
        table: &'a ClassAscensionTable,
        book: &'a SkillBook,
        policy: &'a AscensionPolicy,
    ) -> Self {
        Self { table, book, policy }
    }

    /// Repair the actor's skill set against its current awakened class.
    ///
    /// Returns `None` without touching anything when the class is not
    /// awakened. Always re-grants the bonus pair and requests a skill-list
    /// refresh, even when nothing drifted.
    pub fn repair(
        &self,
        actor: &mut Actor,
        sink: &mut impl NotificationSink,
        store: &mut impl SkillPersistence,
    ) -> Option<RepairReport> {
        if !self.table.is_awakened(actor.class) {
            return None;
        }

        let plan = SkillSetResolver::new(self.book, self.table, self.policy).resolve(
            actor,
            actor.class,
            actor.class,
            ResolveMode::Repair,
        );
        let applied = plan.apply(actor, self.policy, store, sink);

        if !applied.removed.is_empty() {
            tracing::info!(
                "Integrity repair removed {} drifted skill(s) from actor {:?}",
                applied.removed.len(),
                actor.id
            );
        }

        Some(RepairReport {
            class: actor.class,
            removed: applied.removed,
            regranted: applied.granted,
            persistence_failures: applied.persistence_failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::SkillRecord;
    use crate::core::types::ClassTier;
    use crate::services::MemorySkillStore;
    use crate::session::{RecordingSink, SessionNotification};
    use crate::skillbook::SkillMeta;

    fn book() -> SkillBook {
        let mut book = SkillBook::new();
        book.insert_class_skill(SkillId(500), SkillMeta::plain(1));
        book.insert_class_skill(SkillId(501), SkillMeta::plain(1));
        book.insert_class_skill(SkillId(12000), SkillMeta::plain(1));
        book.insert_class_skill(SkillId(11999), SkillMeta::plain(1));
        // 500 is on the class-146 roster; 501 is drift
        book.add_awaken_roster(ClassId(146), SkillId(500));
        book
    }

    fn checker_fixture() -> (ClassAscensionTable, SkillBook, AscensionPolicy) {
        (
            ClassAscensionTable::standard().unwrap(),
            book(),
            AscensionPolicy::default(),
        )
    }

    #[test]
    fn test_noop_for_non_awakened_actor() {
        let (table, book, policy) = checker_fixture();
        let checker = LoginIntegrityChecker::new(&table, &book, &policy);

        let mut actor = Actor::new(ClassId(90), ClassTier::Third, 86);
        actor.learn_skill(SkillRecord::new(SkillId(501), 1));

        let mut sink = RecordingSink::new();
        let mut store = MemorySkillStore::new();
        assert!(checker.repair(&mut actor, &mut sink, &mut store).is_none());
        assert!(actor.knows(SkillId(501)));
        assert!(sink.notes.is_empty());
    }

    #[test]
    fn test_repair_removes_drift_and_regrants_pair() {
        let (table, book, policy) = checker_fixture();
        let checker = LoginIntegrityChecker::new(&table, &book, &policy);

        let mut actor = Actor::new(ClassId(146), ClassTier::Awakened, 99);
        actor.learn_skill(SkillRecord::new(SkillId(500), 4));
        actor.learn_skill(SkillRecord::new(SkillId(501), 2));

        let mut sink = RecordingSink::new();
        let mut store = MemorySkillStore::new();
        let report = checker.repair(&mut actor, &mut sink, &mut store).unwrap();

        assert_eq!(report.removed, vec![SkillId(501)]);
        assert_eq!(report.regranted, vec![SkillId(11999), SkillId(12000)]);
        assert!(actor.knows(SkillId(500)));
        assert!(!actor.knows(SkillId(501)));
        assert!(actor.knows(SkillId(12000)));
        assert!(sink.contains(&SessionNotification::SkillListRefresh));
    }

    #[test]
    fn test_transformed_actor_keeps_everything() {
        let (table, book, policy) = checker_fixture();
        let checker = LoginIntegrityChecker::new(&table, &book, &policy);

        let mut actor = Actor::new(ClassId(146), ClassTier::Awakened, 99);
        actor.learn_skill(SkillRecord::new(SkillId(501), 2));
        actor.transformed = true;

        let mut sink = RecordingSink::new();
        let mut store = MemorySkillStore::new();
        let report = checker.repair(&mut actor, &mut sink, &mut store).unwrap();

        assert!(report.removed.is_empty());
        assert!(actor.knows(SkillId(501)));
        // Bonus pair re-grant and refresh still happen
        assert_eq!(report.regranted, vec![SkillId(11999), SkillId(12000)]);
        assert!(sink.contains(&SessionNotification::SkillListRefresh));
    }

    #[test]
    fn test_repair_is_idempotent() {
        let (table, book, policy) = checker_fixture();
        let checker = LoginIntegrityChecker::new(&table, &book, &policy);

        let mut actor = Actor::new(ClassId(146), ClassTier::Awakened, 99);
        actor.learn_skill(SkillRecord::new(SkillId(500), 4));
        actor.learn_skill(SkillRecord::new(SkillId(501), 2));

        let mut sink = RecordingSink::new();
        let mut store = MemorySkillStore::new();
        checker.repair(&mut actor, &mut sink, &mut store).unwrap();
        let after_once = actor.skill_ids_sorted();

        let report = checker.repair(&mut actor, &mut sink, &mut store).unwrap();
        assert_eq!(actor.skill_ids_sorted(), after_once);
        assert!(report.removed.is_empty());
        // The pair re-grant repeats every pass
        assert_eq!(report.regranted.len(), 2);
    }
}
