//! Static rule tables, built once at startup and read-only afterwards

pub mod class_map;
pub mod conversion;
pub mod rewards;

pub use class_map::{BonusSkillPair, ClassAscensionTable};
pub use conversion::{ConversionTable, ConversionTables, EnchantGrade};
pub use rewards::{RewardItem, RewardKits};
