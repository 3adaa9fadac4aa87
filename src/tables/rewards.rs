//! Completion reward kits, one per awakened class

use crate::core::error::{AscensionError, Result};
use crate::core::types::{ClassId, ItemId};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Awakened class id -> ordered (item, count) grants issued on completion
const REWARD_KITS: &[(u16, &[(u32, u32)])] = &[
    (139, &[(32264, 1), (33735, 1)]),
    (140, &[(32265, 1), (33742, 1)]),
    (141, &[(32266, 1), (33722, 1)]),
    (142, &[(32267, 1), (33763, 1)]),
    (143, &[(32268, 1), (33732, 1)]),
    (144, &[(32270, 1), (33727, 1)]),
    (145, &[(32269, 1), (33740, 1)]),
    (146, &[(32271, 1), (33726, 1)]),
];

/// One item grant inside a reward kit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardItem {
    pub item: ItemId,
    pub count: u32,
}

/// Immutable per-class reward kits
#[derive(Debug, Clone)]
pub struct RewardKits {
    kits: AHashMap<ClassId, Vec<RewardItem>>,
}

impl RewardKits {
    /// Build the shipped kits. Fails fatally on malformed entries.
    pub fn standard() -> Result<Self> {
        Self::from_entries(REWARD_KITS)
    }

    fn from_entries(entries: &[(u16, &[(u32, u32)])]) -> Result<Self> {
        let mut kits = AHashMap::with_capacity(entries.len());
        for &(class, items) in entries {
            if items.is_empty() {
                return Err(AscensionError::Config(format!(
                    "Empty reward kit for class {}",
                    class
                )));
            }
            let kit: Vec<RewardItem> = items
                .iter()
                .map(|&(item, count)| RewardItem {
                    item: ItemId(item),
                    count,
                })
                .collect();
            if kits.insert(ClassId(class), kit).is_some() {
                return Err(AscensionError::Config(format!(
                    "Duplicate reward kit for class {}",
                    class
                )));
            }
        }
        Ok(Self { kits })
    }

    /// Kit for an awakened class, in issue order
    pub fn kit(&self, class: ClassId) -> Option<&[RewardItem]> {
        self.kits.get(&class).map(|kit| kit.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_awakened_class_has_a_kit() {
        let kits = RewardKits::standard().unwrap();
        for class in 139..=146 {
            let kit = kits.kit(ClassId(class)).expect("kit per awakened class");
            assert_eq!(kit.len(), 2);
        }
    }

    #[test]
    fn test_kit_contents_and_order() {
        let kits = RewardKits::standard().unwrap();
        let kit = kits.kit(ClassId(140)).unwrap();
        assert_eq!(
            kit,
            &[
                RewardItem { item: ItemId(32265), count: 1 },
                RewardItem { item: ItemId(33742), count: 1 },
            ]
        );
    }

    #[test]
    fn test_no_kit_for_ordinary_class() {
        let kits = RewardKits::standard().unwrap();
        assert!(kits.kit(ClassId(90)).is_none());
    }

    #[test]
    fn test_duplicate_kit_rejected() {
        static KIT: &[(u32, u32)] = &[(1, 1)];
        assert!(RewardKits::from_entries(&[(139, KIT), (139, KIT)]).is_err());
    }

    #[test]
    fn test_empty_kit_rejected() {
        static EMPTY: &[(u32, u32)] = &[];
        assert!(RewardKits::from_entries(&[(139, EMPTY)]).is_err());
    }
}
