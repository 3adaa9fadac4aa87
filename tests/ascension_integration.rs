//! Integration tests for the full ascension sequence

use class_ascension::actor::{Actor, SkillRecord};
use class_ascension::ascension::{
    AscensionOrchestrator, AscensionOutcome, CONVERSION_CURRENCY,
};
use class_ascension::core::config::AscensionPolicy;
use class_ascension::core::error::{AscensionError, Result};
use class_ascension::core::types::{ActorId, ClassId, ClassTier, ItemId, SkillId};
use class_ascension::services::{
    ItemGrants, MemoryItemLedger, MemorySkillStore, SkillPersistence,
};
use class_ascension::session::{RecordingSink, SessionNotification};
use class_ascension::skillbook::{SkillBook, SkillMeta};
use class_ascension::tables::{
    ClassAscensionTable, ConversionTables, EnchantGrade, RewardKits,
};

struct Fixture {
    table: ClassAscensionTable,
    book: SkillBook,
    conversion: ConversionTables,
    rewards: RewardKits,
    policy: AscensionPolicy,
}

impl Fixture {
    fn new() -> Self {
        let mut book = SkillBook::new();
        // Third-tier skills
        book.insert_class_skill(SkillId(400), SkillMeta::enchantable(10, EnchantGrade::Grade30));
        book.insert_class_skill(SkillId(401), SkillMeta::plain(3));
        book.insert_class_skill(SkillId(402), SkillMeta::plain(1));
        // Universal skill
        book.insert_common_skill(SkillId(1216), SkillMeta::plain(1));
        // Bonus pairs
        let table = ClassAscensionTable::standard().unwrap();
        for class in 139..=146u16 {
            let pair = table.bonus_skills(ClassId(class)).unwrap();
            for id in pair.ids() {
                book.insert_class_skill(id, SkillMeta::plain(1));
            }
        }
        book.add_general_keep(SkillId(402));
        book.add_maintained(ClassId(88), ClassId(140), SkillId(401));

        Self {
            table,
            book,
            conversion: ConversionTables::standard().unwrap(),
            rewards: RewardKits::standard().unwrap(),
            policy: AscensionPolicy::default(),
        }
    }

    fn orchestrator(&self) -> AscensionOrchestrator<'_> {
        AscensionOrchestrator::new(
            &self.table,
            &self.book,
            &self.conversion,
            &self.rewards,
            &self.policy,
        )
    }
}

/// Scenario: tier-3 class 90 at level 85+ on a base subclass gets a login
/// offer targeting class 139.
#[test]
fn test_login_offer_targets_mapped_class() {
    let fx = Fixture::new();
    let actor = Actor::new(ClassId(90), ClassTier::Third, 85);

    let mut sink = RecordingSink::new();
    let target = fx.orchestrator().offer_on_login(&actor, &mut sink);

    assert_eq!(target, Some(ClassId(139)));
    assert_eq!(
        sink.notes,
        vec![
            SessionNotification::IntroCinematic,
            SessionNotification::AscensionOffer {
                target: ClassId(139),
                passive: true,
            },
        ]
    );
}

/// Scenario: a +15 enchant on a grade-30 skill is worth 4 currency on the
/// standard client, and ascending resets the skill to its base level.
#[test]
fn test_enchant_conversion_through_ascension() {
    let fx = Fixture::new();
    let mut actor = Actor::new(ClassId(88), ClassTier::Third, 86);
    actor.learn_skill(SkillRecord::new(SkillId(400), 115));

    let mut sink = RecordingSink::new();
    let mut items = MemoryItemLedger::new();
    let mut store = MemorySkillStore::new();
    let outcome = fx
        .orchestrator()
        .ascend(&mut actor, &mut sink, &mut items, &mut store);

    let report = outcome.report().expect("ascension completes");
    assert_eq!(report.currency_awarded, 4);
    assert_eq!(report.enchants_stripped, vec![SkillId(400)]);
    assert_eq!(items.total_granted(CONVERSION_CURRENCY), 4);

    // 400 was stripped to base level, then removed by migration (not on
    // any keep list); its last stored level is the base level
    assert!(!actor.knows(SkillId(400)));
    assert_eq!(store.stored_level(actor.id, SkillId(400)), Some(10));
}

/// Scenario: a forced 88 -> 140 transition grants the 140 bonus pair and
/// issues the 140 reward kit.
#[test]
fn test_forced_transition_grants_pair_and_kit() {
    let fx = Fixture::new();
    let mut actor = Actor::new(ClassId(88), ClassTier::Third, 86);
    actor.learn_skill(SkillRecord::new(SkillId(401), 3));

    let mut sink = RecordingSink::new();
    let mut items = MemoryItemLedger::new();
    let mut store = MemorySkillStore::new();
    let outcome = fx.orchestrator().ascend_forced(
        &mut actor,
        ClassId(88),
        ClassId(140),
        &mut sink,
        &mut items,
        &mut store,
    );

    let report = outcome.report().unwrap();
    assert_eq!(report.skills_granted, vec![SkillId(10499), SkillId(10500)]);
    assert!(actor.knows(SkillId(10500)));
    assert!(actor.knows(SkillId(10499)));

    assert_eq!(items.total_granted(ItemId(32265)), 1);
    assert_eq!(items.total_granted(ItemId(33742)), 1);
    assert_eq!(report.rewards_issued, 2);
    assert_eq!(report.reward_failures, 0);
}

/// The hard ordering contract: conversion before migration before commit
/// before rewards, reflected in the notification stream and item ledger.
#[test]
fn test_side_effect_ordering() {
    let fx = Fixture::new();
    let mut actor = Actor::new(ClassId(88), ClassTier::Third, 86);
    actor.learn_skill(SkillRecord::new(SkillId(400), 115));
    actor.learn_skill(SkillRecord::new(SkillId(401), 3));

    let mut sink = RecordingSink::new();
    let mut items = MemoryItemLedger::new();
    let mut store = MemorySkillStore::new();
    fx.orchestrator()
        .ascend(&mut actor, &mut sink, &mut items, &mut store);

    assert_eq!(
        sink.notes,
        vec![
            SessionNotification::SkillListRefresh,
            SessionNotification::ActorInfoRefresh,
            SessionNotification::ClassChanged { presentation_id: 21 },
        ]
    );

    // Conversion currency lands before the reward kit
    let granted: Vec<ItemId> = items.grants.iter().map(|g| g.item).collect();
    assert_eq!(
        granted,
        vec![CONVERSION_CURRENCY, ItemId(32265), ItemId(33742)]
    );
}

#[test]
fn test_migration_keeps_maintained_and_universal_skills() {
    let fx = Fixture::new();
    let mut actor = Actor::new(ClassId(88), ClassTier::Third, 86);
    actor.learn_skill(SkillRecord::new(SkillId(400), 12));
    actor.learn_skill(SkillRecord::new(SkillId(401), 3));
    actor.learn_skill(SkillRecord::new(SkillId(402), 1));
    actor.learn_skill(SkillRecord::new(SkillId(1216), 1));

    let mut sink = RecordingSink::new();
    let mut items = MemoryItemLedger::new();
    let mut store = MemorySkillStore::new();
    let outcome = fx
        .orchestrator()
        .ascend(&mut actor, &mut sink, &mut items, &mut store);

    let report = outcome.report().unwrap();
    assert_eq!(report.skills_removed, vec![SkillId(400)]);

    // Maintained for the 88 -> 140 pair, at its original level
    assert_eq!(actor.skill(SkillId(401)).unwrap().display_level, 3);
    // General keep list
    assert!(actor.knows(SkillId(402)));
    // Outside the class universe entirely
    assert!(actor.knows(SkillId(1216)));
}

#[test]
fn test_ineligible_actor_is_untouched() {
    let fx = Fixture::new();
    let mut actor = Actor::new(ClassId(88), ClassTier::Second, 86);
    actor.learn_skill(SkillRecord::new(SkillId(400), 115));

    let mut sink = RecordingSink::new();
    let mut items = MemoryItemLedger::new();
    let mut store = MemorySkillStore::new();
    let outcome = fx
        .orchestrator()
        .ascend(&mut actor, &mut sink, &mut items, &mut store);

    assert!(matches!(outcome, AscensionOutcome::Ineligible));
    assert_eq!(actor.class, ClassId(88));
    assert_eq!(actor.skill(SkillId(400)).unwrap().display_level, 115);
    assert!(sink.notes.is_empty());
    assert!(items.grants.is_empty());
}

/// Collaborator failure never rolls back in-memory state; it is tallied.
#[test]
fn test_persistence_failure_is_tallied_not_fatal() {
    struct FailingStore;

    impl SkillPersistence for FailingStore {
        fn store_skill(&mut self, _actor: ActorId, _record: SkillRecord) -> Result<()> {
            Err(AscensionError::Persistence("store down".into()))
        }
        fn delete_skill(&mut self, _actor: ActorId, _skill: SkillId) -> Result<()> {
            Err(AscensionError::Persistence("store down".into()))
        }
    }

    let fx = Fixture::new();
    let mut actor = Actor::new(ClassId(88), ClassTier::Third, 86);
    actor.learn_skill(SkillRecord::new(SkillId(400), 115));

    let mut sink = RecordingSink::new();
    let mut items = MemoryItemLedger::new();
    let mut store = FailingStore;
    let outcome = fx
        .orchestrator()
        .ascend(&mut actor, &mut sink, &mut items, &mut store);

    let report = outcome.report().expect("sequence still completes");
    // One failed de-enchant store, two failed bonus-skill stores
    assert_eq!(report.persistence_failures, 3);
    assert_eq!(actor.class, ClassId(140));
    assert!(actor.knows(SkillId(10500)));
    // Currency and rewards still went out
    assert_eq!(items.total_granted(CONVERSION_CURRENCY), 4);
    assert_eq!(items.total_granted(ItemId(32265)), 1);
}

/// Item-grant failure is reported without aborting later grants.
#[test]
fn test_reward_failure_is_tallied() {
    struct RejectingLedger {
        reject: ItemId,
        inner: MemoryItemLedger,
    }

    impl ItemGrants for RejectingLedger {
        fn grant(&mut self, actor: ActorId, item: ItemId, count: u64) -> Result<()> {
            if item == self.reject {
                return Err(AscensionError::Persistence("inventory full".into()));
            }
            self.inner.grant(actor, item, count)
        }
    }

    let fx = Fixture::new();
    let mut actor = Actor::new(ClassId(88), ClassTier::Third, 86);

    let mut sink = RecordingSink::new();
    let mut items = RejectingLedger {
        reject: ItemId(32265),
        inner: MemoryItemLedger::new(),
    };
    let mut store = MemorySkillStore::new();
    let outcome = fx
        .orchestrator()
        .ascend(&mut actor, &mut sink, &mut items, &mut store);

    let report = outcome.report().unwrap();
    assert_eq!(report.rewards_issued, 1);
    assert_eq!(report.reward_failures, 1);
    assert_eq!(items.inner.total_granted(ItemId(33742)), 1);
}

/// Every class in the mapping domain completes an ascension into a class
/// with a bonus pair and a reward kit.
#[test]
fn test_every_eligible_class_completes() {
    let fx = Fixture::new();
    for class in fx.table.eligible_classes().collect::<Vec<_>>() {
        let mut actor = Actor::new(class, ClassTier::Third, 86);
        let mut sink = RecordingSink::new();
        let mut items = MemoryItemLedger::new();
        let mut store = MemorySkillStore::new();

        let outcome = fx
            .orchestrator()
            .ascend(&mut actor, &mut sink, &mut items, &mut store);
        let report = outcome.report().expect("every mapped class ascends");

        assert_eq!(actor.tier, ClassTier::Awakened);
        assert_eq!(report.skills_granted.len(), 2);
        assert_eq!(report.rewards_issued, 2);
    }
}
