//! Externally configured ascension policy flags
//!
//! All toggles that operators set per shard are collected here. The static
//! rule tables themselves are not configurable; see the `tables` module.

use crate::core::error::{AscensionError, Result};

/// Operator policy for the ascension subsystem
#[derive(Debug, Clone)]
pub struct AscensionPolicy {
    /// Broadcast an ascension offer whenever eligibility is detected at
    /// session start, instead of waiting for the quest path.
    pub offer_on_login: bool,

    /// When a migrated-away skill is removed from the live skill set, also
    /// delete its history from persisted storage.
    pub persist_skill_deletion: bool,

    /// Skip every skill removal during login repair while the actor has an
    /// active transformation.
    ///
    /// Inherited shard behavior: the legacy repair path never removed a
    /// skill from a transformed character. Kept switchable pending product
    /// review (see DESIGN.md) rather than silently corrected.
    pub retain_skills_while_transformed: bool,
}

impl Default for AscensionPolicy {
    fn default() -> Self {
        Self {
            offer_on_login: true,
            persist_skill_deletion: false,
            retain_skills_while_transformed: true,
        }
    }
}

impl AscensionPolicy {
    /// Parse policy flags from a TOML document.
    ///
    /// Missing keys keep their defaults, so an empty document is valid.
    pub fn from_toml(content: &str) -> Result<Self> {
        let value: toml::Value = content
            .parse()
            .map_err(|e| AscensionError::Config(format!("Invalid policy TOML: {}", e)))?;

        let mut policy = Self::default();
        if let Some(table) = value.get("ascension").and_then(|v| v.as_table()) {
            if let Some(flag) = table.get("offer_on_login").and_then(|v| v.as_bool()) {
                policy.offer_on_login = flag;
            }
            if let Some(flag) = table.get("persist_skill_deletion").and_then(|v| v.as_bool()) {
                policy.persist_skill_deletion = flag;
            }
            if let Some(flag) = table
                .get("retain_skills_while_transformed")
                .and_then(|v| v.as_bool())
            {
                policy.retain_skills_while_transformed = flag;
            }
        }
        Ok(policy)
    }
}
