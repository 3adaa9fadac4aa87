//! Enchant-to-currency conversion
//!
//! Before a class transition, every enchanted skill the actor knows is
//! worth a table-driven amount of conversion currency. `preview` tallies
//! without touching anything; `convert` strips the enchants back to base
//! level and grants the currency.

use crate::actor::{Actor, SkillRecord};
use crate::core::types::{ItemId, SkillId};
use crate::services::{ItemGrants, SkillPersistence};
use crate::skillbook::SkillBook;
use crate::tables::ConversionTables;

/// Currency item granted for converted enchants
pub const CONVERSION_CURRENCY: ItemId = ItemId(30306);

/// What a committing conversion did
#[derive(Debug, Clone, Default)]
pub struct ConversionOutcome {
    /// Total currency tallied (granted only when positive)
    pub currency: u64,
    /// Skills reset to their base level, ascending
    pub stripped: Vec<SkillId>,
    pub persistence_failures: u32,
}

/// Tallies and strips skill enchantments against the yield tables
pub struct EnchantConversionCalculator<'a> {
    book: &'a SkillBook,
    tables: &'a ConversionTables,
}

impl<'a> EnchantConversionCalculator<'a> {
    pub fn new(book: &'a SkillBook, tables: &'a ConversionTables) -> Self {
        Self { book, tables }
    }

    /// The currency this actor's enchants are worth. Pure; repeated calls
    /// return the same total until the skill set changes.
    pub fn preview(&self, actor: &Actor) -> u64 {
        self.tally(actor).0
    }

    /// Strip every enchanted skill to its base level and grant the tallied
    /// currency (when positive). Returns the same total `preview` would.
    pub fn convert(
        &self,
        actor: &mut Actor,
        items: &mut impl ItemGrants,
        store: &mut impl SkillPersistence,
    ) -> ConversionOutcome {
        let (currency, mut enchanted) = self.tally(actor);
        enchanted.sort_unstable();

        let mut outcome = ConversionOutcome {
            currency,
            ..ConversionOutcome::default()
        };

        for id in enchanted {
            let record = SkillRecord::new(id, self.book.base_level(id));
            actor.learn_skill(record);
            outcome.stripped.push(id);
            if let Err(e) = store.store_skill(actor.id, record) {
                tracing::warn!("Failed to store de-enchanted skill {:?}: {}", id, e);
                outcome.persistence_failures += 1;
            }
        }

        if currency > 0 {
            if let Err(e) = items.grant(actor.id, CONVERSION_CURRENCY, currency) {
                tracing::warn!("Failed to grant {} conversion currency: {}", currency, e);
                outcome.persistence_failures += 1;
            }
        }

        outcome
    }

    /// Sum the yields of every enchanted, enchantable skill; also collects
    /// which skills carried an enchant.
    fn tally(&self, actor: &Actor) -> (u64, Vec<SkillId>) {
        let mut total = 0u64;
        let mut enchanted = Vec::new();

        for record in actor.skills() {
            let Some(sublevel) = record.enchant_sublevel() else {
                continue;
            };
            let grade = self.book.enchant_grade(record.id);
            let Some(table) = self.tables.select(grade, actor.client_variant) else {
                continue;
            };
            total += table.yield_at(sublevel);
            enchanted.push(record.id);
        }

        (total, enchanted)
    }
}
