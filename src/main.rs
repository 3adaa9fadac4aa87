//! Ascension demo driver
//!
//! Builds the static tables and a small sample skill book, runs one actor
//! through the login offer and the full ascension sequence, and prints the
//! step report as JSON. Useful for eyeballing rule changes without a shard.

use class_ascension::actor::{Actor, SkillRecord};
use class_ascension::ascension::{AscensionOrchestrator, LoginIntegrityChecker};
use class_ascension::core::config::AscensionPolicy;
use class_ascension::core::error::Result;
use class_ascension::core::types::{ClassId, ClassTier, ClientVariant, SkillId};
use class_ascension::services::{MemoryItemLedger, MemorySkillStore};
use class_ascension::session::RecordingSink;
use class_ascension::skillbook::{SkillBook, SkillMeta};
use class_ascension::tables::{
    ClassAscensionTable, ConversionTables, EnchantGrade, RewardKits,
};

use clap::Parser;
use std::path::PathBuf;

/// Run one sample actor through the ascension pipeline
#[derive(Parser, Debug)]
#[command(name = "ascension_demo")]
#[command(about = "Drive a sample actor through class ascension and print the report")]
struct Args {
    /// Third-tier class id of the demo actor
    #[arg(long, default_value_t = 90)]
    class: u16,

    /// Actor level
    #[arg(long, default_value_t = 86)]
    level: u16,

    /// Use the alternate-client enchant yield tables
    #[arg(long)]
    alternate_client: bool,

    /// Force this target class instead of the table mapping
    #[arg(long)]
    force_target: Option<u16>,

    /// Run the login integrity repair after ascending
    #[arg(long)]
    repair: bool,

    /// Policy TOML file (defaults apply when omitted)
    #[arg(long)]
    policy: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("class_ascension=debug")
        .init();

    let args = Args::parse();

    let policy = match &args.policy {
        Some(path) => AscensionPolicy::from_toml(&std::fs::read_to_string(path)?)?,
        None => AscensionPolicy::default(),
    };

    let table = ClassAscensionTable::standard()?;
    let conversion = ConversionTables::standard()?;
    let rewards = RewardKits::standard()?;
    let book = sample_skill_book(&table);

    let mut actor = Actor::new(ClassId(args.class), ClassTier::Third, args.level);
    if args.alternate_client {
        actor.client_variant = ClientVariant::Alternate;
    }
    for record in sample_known_skills() {
        actor.learn_skill(record);
    }
    tracing::info!(
        "Demo actor: class {}, level {}, {} known skills",
        actor.class.0,
        actor.level,
        actor.skill_count()
    );

    let orchestrator = AscensionOrchestrator::new(&table, &book, &conversion, &rewards, &policy);
    let mut sink = RecordingSink::new();
    let mut items = MemoryItemLedger::new();
    let mut store = MemorySkillStore::new();

    if let Some(target) = orchestrator.offer_on_login(&actor, &mut sink) {
        tracing::info!("Login offer targets class {}", target.0);
    }

    let outcome = match args.force_target {
        Some(target) => orchestrator.ascend_forced(
            &mut actor,
            ClassId(args.class),
            ClassId(target),
            &mut sink,
            &mut items,
            &mut store,
        ),
        None => orchestrator.ascend(&mut actor, &mut sink, &mut items, &mut store),
    };

    match outcome.report() {
        Some(report) => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        None => {
            tracing::warn!("Ascension did not run: {:?}", outcome);
            return Ok(());
        }
    }

    if args.repair {
        let checker = LoginIntegrityChecker::new(&table, &book, &policy);
        if let Some(report) = checker.repair(&mut actor, &mut sink, &mut store) {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    tracing::info!(
        "Final class {}, {} notifications, {} item grants",
        actor.class.0,
        sink.notes.len(),
        items.grants.len()
    );
    Ok(())
}

/// Enough metadata to exercise every rule path with the default actor
fn sample_skill_book(table: &ClassAscensionTable) -> SkillBook {
    let mut book = SkillBook::new();

    // Third-tier combat skills the demo actor knows
    book.insert_class_skill(SkillId(400), SkillMeta::enchantable(10, EnchantGrade::Grade30));
    book.insert_class_skill(SkillId(401), SkillMeta::enchantable(8, EnchantGrade::Grade15));
    book.insert_class_skill(SkillId(402), SkillMeta::plain(3));
    book.insert_class_skill(SkillId(403), SkillMeta::plain(1));

    // A universal skill that migration must never touch
    book.insert_common_skill(SkillId(1216), SkillMeta::plain(1));

    // Bonus pairs for every awakened class
    for class in 139..=146u16 {
        if let Some(pair) = table.bonus_skills(ClassId(class)) {
            for id in pair.ids() {
                book.insert_class_skill(id, SkillMeta::plain(1));
                book.add_awaken_roster(ClassId(class), id);
            }
        }
    }

    // 402 survives any transition; 403 survives the shipped demo pairs
    book.add_general_keep(SkillId(402));
    for (source, target) in [(90u16, 139u16), (88, 140)] {
        book.add_maintained(ClassId(source), ClassId(target), SkillId(403));
    }

    book
}

fn sample_known_skills() -> Vec<SkillRecord> {
    vec![
        // Grade-30 skill enchanted to +15
        SkillRecord::new(SkillId(400), 115),
        // Grade-15 skill enchanted to +10
        SkillRecord::new(SkillId(401), 110),
        SkillRecord::new(SkillId(402), 3),
        SkillRecord::new(SkillId(403), 1),
        SkillRecord::new(SkillId(1216), 1),
    ]
}
