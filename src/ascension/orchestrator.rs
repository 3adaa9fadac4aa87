//! End-to-end ascension sequencing
//!
//! Drives one actor through eligibility check, enchant conversion, skill
//! migration, class commit and reward issuance, in that order. Once past
//! the entry guard the sequence runs to completion with no compensation:
//! collaborator failures are logged and tallied in the report, and the
//! login integrity check is the recovery path.

use crate::actor::Actor;
use crate::ascension::conversion::EnchantConversionCalculator;
use crate::ascension::resolver::{ResolveMode, SkillSetResolver};
use crate::core::config::AscensionPolicy;
use crate::core::types::{ClassId, ClassTier, SkillId, SubclassKind};
use crate::services::{ItemGrants, SkillPersistence};
use crate::session::{NotificationSink, SessionNotification, CLASS_CHANGE_PRESENTATION_OFFSET};
use crate::skillbook::SkillBook;
use crate::tables::{ClassAscensionTable, ConversionTables, RewardKits};
use serde::Serialize;

/// Minimum actor level for a login-time ascension offer
pub const MIN_ASCENSION_LEVEL: u16 = 85;

/// How an ascension attempt ended
#[derive(Debug, Clone)]
pub enum AscensionOutcome {
    /// Actor's tier is below the entry guard; nothing happened
    Ineligible,
    /// No table mapping for the actor's class; nothing happened
    NoMapping,
    Completed(AscensionReport),
}

impl AscensionOutcome {
    pub fn report(&self) -> Option<&AscensionReport> {
        match self {
            AscensionOutcome::Completed(report) => Some(report),
            _ => None,
        }
    }
}

/// Step-by-step record of a committed ascension
#[derive(Debug, Clone, Serialize)]
pub struct AscensionReport {
    pub origin: ClassId,
    pub target: ClassId,
    pub currency_awarded: u64,
    pub enchants_stripped: Vec<SkillId>,
    pub skills_removed: Vec<SkillId>,
    pub skills_granted: Vec<SkillId>,
    pub rewards_issued: u32,
    pub reward_failures: u32,
    pub persistence_failures: u32,
}

/// Sequences the full class ascension of one actor
pub struct AscensionOrchestrator<'a> {
    table: &'a ClassAscensionTable,
    book: &'a SkillBook,
    conversion: &'a ConversionTables,
    rewards: &'a RewardKits,
    policy: &'a AscensionPolicy,
}

impl<'a> AscensionOrchestrator<'a> {
    pub fn new(
        table: &'a ClassAscensionTable,
        book: &'a SkillBook,
        conversion: &'a ConversionTables,
        rewards: &'a RewardKits,
        policy: &'a AscensionPolicy,
    ) -> Self {
        Self {
            table,
            book,
            conversion,
            rewards,
            policy,
        }
    }

    /// Ascend an actor along the table mapping for its current class.
    pub fn ascend(
        &self,
        actor: &mut Actor,
        sink: &mut impl NotificationSink,
        items: &mut impl ItemGrants,
        store: &mut impl SkillPersistence,
    ) -> AscensionOutcome {
        if !actor.tier.meets_ascension_floor() {
            return AscensionOutcome::Ineligible;
        }
        let Some(target) = self.table.lookup(actor.class) else {
            tracing::debug!(
                "No ascension mapping for class {}; caller bypassed eligibility",
                actor.class.0
            );
            return AscensionOutcome::NoMapping;
        };
        AscensionOutcome::Completed(self.run(actor, actor.class, target, sink, items, store))
    }

    /// Operator-forced transition with an explicit origin/target pair,
    /// bypassing the table lookup. The tier guard still applies.
    pub fn ascend_forced(
        &self,
        actor: &mut Actor,
        origin: ClassId,
        target: ClassId,
        sink: &mut impl NotificationSink,
        items: &mut impl ItemGrants,
        store: &mut impl SkillPersistence,
    ) -> AscensionOutcome {
        if !actor.tier.meets_ascension_floor() {
            return AscensionOutcome::Ineligible;
        }
        AscensionOutcome::Completed(self.run(actor, origin, target, sink, items, store))
    }

    /// Passive eligibility announcement at session start. Emits the intro
    /// cinematic and an offer when the policy allows it and the actor
    /// qualifies; returns the offered target.
    pub fn offer_on_login(
        &self,
        actor: &Actor,
        sink: &mut impl NotificationSink,
    ) -> Option<ClassId> {
        if !self.policy.offer_on_login {
            return None;
        }
        if !actor.tier.meets_ascension_floor() || actor.level < MIN_ASCENSION_LEVEL {
            return None;
        }
        if actor.awakening_pending {
            return None;
        }
        if !matches!(actor.subclass, SubclassKind::Base | SubclassKind::Double) {
            return None;
        }
        let target = self.table.lookup(actor.class)?;

        sink.push(SessionNotification::IntroCinematic);
        sink.push(SessionNotification::AscensionOffer {
            target,
            passive: true,
        });
        Some(target)
    }

    /// Direct (quest-path) offer; no cinematic, no login gating.
    pub fn offer_direct(
        &self,
        actor: &Actor,
        sink: &mut impl NotificationSink,
    ) -> Option<ClassId> {
        if !actor.tier.meets_ascension_floor() {
            return None;
        }
        let target = self.table.lookup(actor.class)?;
        sink.push(SessionNotification::AscensionOffer {
            target,
            passive: false,
        });
        Some(target)
    }

    fn run(
        &self,
        actor: &mut Actor,
        origin: ClassId,
        target: ClassId,
        sink: &mut impl NotificationSink,
        items: &mut impl ItemGrants,
        store: &mut impl SkillPersistence,
    ) -> AscensionReport {
        tracing::info!(
            "Ascending actor {:?}: class {} -> {}",
            actor.id,
            origin.0,
            target.0
        );

        // 1. Enchant conversion
        let conversion = EnchantConversionCalculator::new(self.book, self.conversion)
            .convert(actor, items, store);

        // 2. Skill migration
        let plan = SkillSetResolver::new(self.book, self.table, self.policy).resolve(
            actor,
            origin,
            target,
            ResolveMode::Transition,
        );
        let applied = plan.apply(actor, self.policy, store, sink);

        // 3. Class commit
        actor.set_class(target, ClassTier::Awakened);
        actor.awakening_pending = false;
        sink.push(SessionNotification::ActorInfoRefresh);
        sink.push(SessionNotification::ClassChanged {
            presentation_id: target.0.saturating_sub(CLASS_CHANGE_PRESENTATION_OFFSET),
        });

        // 4. Reward issuance
        let mut rewards_issued = 0u32;
        let mut reward_failures = 0u32;
        if let Some(kit) = self.rewards.kit(target) {
            for reward in kit {
                match items.grant(actor.id, reward.item, u64::from(reward.count)) {
                    Ok(()) => rewards_issued += 1,
                    Err(e) => {
                        tracing::warn!("Failed to issue reward {:?}: {}", reward.item, e);
                        reward_failures += 1;
                    }
                }
            }
        } else {
            tracing::warn!("No reward kit for awakened class {}", target.0);
        }

        AscensionReport {
            origin,
            target,
            currency_awarded: conversion.currency,
            enchants_stripped: conversion.stripped,
            skills_removed: applied.removed,
            skills_granted: applied.granted,
            rewards_issued,
            reward_failures,
            persistence_failures: conversion.persistence_failures + applied.persistence_failures,
        }
    }
}
