//! Skill metadata repository
//!
//! Holds everything the resolvers need to know about skills that is not
//! per-actor state: enchant grades, base levels, the class-skill universe
//! and the three keep-rule sources (general keep list, per-pair maintain
//! lists, per-class awaken check lists and rosters). Populated once at
//! startup from static game data, read-only afterwards.

use crate::core::types::{ClassId, SkillId};
use crate::tables::EnchantGrade;
use ahash::{AHashMap, AHashSet};

/// Static metadata for one skill
#[derive(Debug, Clone, Copy)]
pub struct SkillMeta {
    pub base_level: u16,
    pub enchant_grade: EnchantGrade,
}

impl SkillMeta {
    pub fn plain(base_level: u16) -> Self {
        Self {
            base_level,
            enchant_grade: EnchantGrade::None,
        }
    }

    pub fn enchantable(base_level: u16, grade: EnchantGrade) -> Self {
        Self {
            base_level,
            enchant_grade: grade,
        }
    }
}

/// All skill metadata consumed by the ascension core
#[derive(Debug, Clone, Default)]
pub struct SkillBook {
    meta: AHashMap<SkillId, SkillMeta>,
    /// Skills granted by any third-tier class; the only skills migration
    /// and repair may remove. Universal and transformation skills stay out.
    class_universe: AHashSet<SkillId>,
    /// Skills that survive every migration, regardless of class pair
    general_keep: AHashSet<SkillId>,
    /// Skills allowed to survive a specific source -> target migration
    maintain: AHashMap<(ClassId, ClassId), AHashSet<SkillId>>,
    /// Per-class additions to the login repair keep-set
    awaken_check: AHashMap<ClassId, AHashSet<SkillId>>,
    /// Every skill an awakened class can learn
    awaken_roster: AHashMap<ClassId, AHashSet<SkillId>>,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class-granted skill (member of the removal universe)
    pub fn insert_class_skill(&mut self, id: SkillId, meta: SkillMeta) {
        self.meta.insert(id, meta);
        self.class_universe.insert(id);
    }

    /// Register a skill outside the class universe (universal, transformation)
    pub fn insert_common_skill(&mut self, id: SkillId, meta: SkillMeta) {
        self.meta.insert(id, meta);
    }

    pub fn add_general_keep(&mut self, id: SkillId) {
        self.general_keep.insert(id);
    }

    pub fn add_maintained(&mut self, source: ClassId, target: ClassId, id: SkillId) {
        self.maintain.entry((source, target)).or_default().insert(id);
    }

    pub fn add_awaken_check(&mut self, class: ClassId, id: SkillId) {
        self.awaken_check.entry(class).or_default().insert(id);
    }

    pub fn add_awaken_roster(&mut self, class: ClassId, id: SkillId) {
        self.awaken_roster.entry(class).or_default().insert(id);
    }

    /// Base (unenchanted) level; 1 for skills without metadata
    pub fn base_level(&self, id: SkillId) -> u16 {
        self.meta.get(&id).map(|m| m.base_level).unwrap_or(1)
    }

    /// Max enchant grade; `None` grade for skills without metadata
    pub fn enchant_grade(&self, id: SkillId) -> EnchantGrade {
        self.meta
            .get(&id)
            .map(|m| m.enchant_grade)
            .unwrap_or(EnchantGrade::None)
    }

    pub fn in_class_universe(&self, id: SkillId) -> bool {
        self.class_universe.contains(&id)
    }

    pub fn general_keep(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.general_keep.iter().copied()
    }

    pub fn maintained(&self, source: ClassId, target: ClassId) -> impl Iterator<Item = SkillId> + '_ {
        self.maintain
            .get(&(source, target))
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn awaken_check(&self, class: ClassId) -> impl Iterator<Item = SkillId> + '_ {
        self.awaken_check
            .get(&class)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn awaken_roster(&self, class: ClassId) -> impl Iterator<Item = SkillId> + '_ {
        self.awaken_roster
            .get(&class)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}
