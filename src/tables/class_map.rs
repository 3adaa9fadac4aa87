//! Static class ascension mapping
//!
//! Every third-tier class maps to exactly one awakened class, and every
//! awakened class carries a pair of bonus skills granted on entry. The
//! table is built once at startup and only read afterwards.

use crate::core::error::{AscensionError, Result};
use crate::core::types::{ClassId, SkillId};
use ahash::AHashMap;

/// Third-tier class id -> awakened class id.
///
/// Awakened classes span 139..=146; each gathers the third-tier classes of
/// its combat role across every race.
const ASCENSION_MAP: &[(u16, u16)] = &[
    // 139 - guardian knights
    (90, 139),
    (91, 139),
    (99, 139),
    (106, 139),
    // 140 - heavy warriors
    (89, 140),
    (88, 140),
    (113, 140),
    (114, 140),
    (118, 140),
    (131, 140),
    // 141 - rogues
    (93, 141),
    (101, 141),
    (108, 141),
    (117, 141),
    // 142 - archers
    (92, 142),
    (102, 142),
    (109, 142),
    (134, 142),
    // 143 - wizards
    (94, 143),
    (95, 143),
    (103, 143),
    (110, 143),
    (132, 143),
    (133, 143),
    // 144 - enchanters
    (98, 144),
    (116, 144),
    (115, 144),
    (100, 144),
    (107, 144),
    (136, 144),
    // 145 - summoners
    (96, 145),
    (104, 145),
    (111, 145),
    // 146 - healers
    (97, 146),
    (105, 146),
    (112, 146),
];

/// Awakened class id -> (first, second) bonus skill
const BONUS_PAIRS: &[(u16, u32, u32)] = &[
    (139, 10250, 10249),
    (140, 10500, 10499),
    (141, 10750, 10749),
    (142, 11000, 10999),
    (143, 11249, 11247),
    (144, 11750, 11749),
    (145, 11500, 11499),
    (146, 12000, 11999),
];

/// The two skills granted automatically on entering an awakened class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusSkillPair {
    pub first: SkillId,
    pub second: SkillId,
}

impl BonusSkillPair {
    pub fn ids(&self) -> [SkillId; 2] {
        [self.first, self.second]
    }
}

/// Immutable pre-ascension -> awakened class mapping plus bonus pairs
#[derive(Debug, Clone)]
pub struct ClassAscensionTable {
    forward: AHashMap<ClassId, ClassId>,
    bonus: AHashMap<ClassId, BonusSkillPair>,
}

impl ClassAscensionTable {
    /// Build the shipped table. Fails fatally on malformed entries.
    pub fn standard() -> Result<Self> {
        Self::from_entries(ASCENSION_MAP, BONUS_PAIRS)
    }

    fn from_entries(map: &[(u16, u16)], pairs: &[(u16, u32, u32)]) -> Result<Self> {
        let mut forward = AHashMap::with_capacity(map.len());
        for &(source, target) in map {
            if forward
                .insert(ClassId(source), ClassId(target))
                .is_some()
            {
                return Err(AscensionError::Config(format!(
                    "Duplicate ascension mapping for class {}",
                    source
                )));
            }
        }

        let mut bonus = AHashMap::with_capacity(pairs.len());
        for &(class, first, second) in pairs {
            if first == second {
                return Err(AscensionError::Config(format!(
                    "Bonus pair for class {} repeats skill {}",
                    class, first
                )));
            }
            if bonus
                .insert(
                    ClassId(class),
                    BonusSkillPair {
                        first: SkillId(first),
                        second: SkillId(second),
                    },
                )
                .is_some()
            {
                return Err(AscensionError::Config(format!(
                    "Duplicate bonus pair for class {}",
                    class
                )));
            }
        }

        // Every reachable awakened class must carry a bonus pair
        for target in forward.values() {
            if !bonus.contains_key(target) {
                return Err(AscensionError::Config(format!(
                    "Awakened class {} has no bonus skill pair",
                    target.0
                )));
            }
        }

        Ok(Self { forward, bonus })
    }

    /// The awakened class a pre-ascension class maps to.
    ///
    /// `None` for classes outside the eligible domain; callers guard.
    pub fn lookup(&self, class: ClassId) -> Option<ClassId> {
        self.forward.get(&class).copied()
    }

    /// Bonus skills for an awakened class, `None` if the class is not awakened
    pub fn bonus_skills(&self, awakened: ClassId) -> Option<&BonusSkillPair> {
        self.bonus.get(&awakened)
    }

    pub fn is_awakened(&self, class: ClassId) -> bool {
        self.bonus.contains_key(&class)
    }

    /// All pre-ascension classes in the mapping domain
    pub fn eligible_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.forward.keys().copied()
    }

    pub fn domain_len(&self) -> usize {
        self.forward.len()
    }
}
