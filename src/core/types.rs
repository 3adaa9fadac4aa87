//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connected actor (player character)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

/// Character class identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub u16);

/// Skill identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillId(pub u32);

/// Item template identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Class progression tier
///
/// Classes advance Base -> First -> Second -> Third; ascension upgrades a
/// Third-tier class into an Awakened one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ClassTier {
    Base = 0,
    First = 1,
    Second = 2,
    Third = 3,
    Awakened = 4,
}

impl ClassTier {
    /// Returns true if this tier clears the ascension entry guard (tier >= 3)
    pub fn meets_ascension_floor(&self) -> bool {
        (*self as u8) >= (ClassTier::Third as u8)
    }
}

/// Which sub-specialization slot the actor is currently playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubclassKind {
    Base,
    Double,
    Awakened,
}

/// Client build flavor; the alternate build uses different enchant-yield tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientVariant {
    Standard,
    Alternate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_id_equality() {
        let a = ClassId(90);
        let b = ClassId(90);
        let c = ClassId(139);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_skill_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<SkillId, &str> = HashMap::new();
        map.insert(SkillId(10500), "bonus");
        assert_eq!(map.get(&SkillId(10500)), Some(&"bonus"));
    }

    #[test]
    fn test_tier_ascension_floor() {
        assert!(!ClassTier::Base.meets_ascension_floor());
        assert!(!ClassTier::First.meets_ascension_floor());
        assert!(!ClassTier::Second.meets_ascension_floor());
        assert!(ClassTier::Third.meets_ascension_floor());
        assert!(ClassTier::Awakened.meets_ascension_floor());
    }
}
