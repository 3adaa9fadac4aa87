//! Core types, errors and configuration

pub mod config;
pub mod error;
pub mod types;

pub use config::AscensionPolicy;
pub use error::{AscensionError, Result};
pub use types::{ActorId, ClassId, ClassTier, ClientVariant, ItemId, SkillId, SubclassKind};
