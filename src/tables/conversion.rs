//! Enchant-to-currency yield tables
//!
//! Four tables keyed by (max enchant grade, client variant). The index is
//! the enchant sub-level, clamped to the last entry; the value is the
//! currency yield for converting that enchant away.

use crate::core::error::{AscensionError, Result};
use crate::core::types::ClientVariant;
use serde::{Deserialize, Serialize};

/// Maximum enchant depth a skill supports, from skill metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnchantGrade {
    None,
    Grade15,
    Grade30,
}

const YIELD_15_STANDARD: &[u32] = &[0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 3, 3, 3, 6, 8, 11];

const YIELD_15_ALTERNATE: &[u32] = &[0, 0, 0, 0, 1, 1, 2, 3, 4, 5, 7, 9, 10, 19, 24, 35];

const YIELD_30_STANDARD: &[u32] = &[
    0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 5, 6, 6, 7, 8, 9, 9, 10, 11, 13, 14, 15, 19,
    21, 25,
];

const YIELD_30_ALTERNATE: &[u32] = &[
    0, 0, 0, 0, 1, 1, 2, 3, 4, 5, 6, 7, 9, 10, 12, 13, 15, 17, 19, 22, 24, 27, 29, 32, 35, 42,
    45, 48, 63, 70, 83,
];

/// One ordered yield table
#[derive(Debug, Clone)]
pub struct ConversionTable {
    yields: &'static [u32],
}

impl ConversionTable {
    fn validated(yields: &'static [u32]) -> Result<Self> {
        if yields.is_empty() {
            return Err(AscensionError::Config("Empty yield table".into()));
        }
        for window in yields.windows(2) {
            if window[1] < window[0] {
                return Err(AscensionError::Config(format!(
                    "Yield table not monotonic: {} after {}",
                    window[1], window[0]
                )));
            }
        }
        Ok(Self { yields })
    }

    /// Yield for a sub-level; indexes past the end clamp to the last entry
    pub fn yield_at(&self, sublevel: u16) -> u64 {
        let index = (sublevel as usize).min(self.yields.len() - 1);
        u64::from(self.yields[index])
    }

    pub fn len(&self) -> usize {
        self.yields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.yields.is_empty()
    }
}

/// All four yield tables, selected by grade and client variant
#[derive(Debug, Clone)]
pub struct ConversionTables {
    grade15_standard: ConversionTable,
    grade15_alternate: ConversionTable,
    grade30_standard: ConversionTable,
    grade30_alternate: ConversionTable,
}

impl ConversionTables {
    /// Build the shipped tables. Fails fatally on malformed data.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            grade15_standard: ConversionTable::validated(YIELD_15_STANDARD)?,
            grade15_alternate: ConversionTable::validated(YIELD_15_ALTERNATE)?,
            grade30_standard: ConversionTable::validated(YIELD_30_STANDARD)?,
            grade30_alternate: ConversionTable::validated(YIELD_30_ALTERNATE)?,
        })
    }

    /// Table for a grade/variant combination; `None` for unenchantable skills
    pub fn select(&self, grade: EnchantGrade, variant: ClientVariant) -> Option<&ConversionTable> {
        match (grade, variant) {
            (EnchantGrade::None, _) => None,
            (EnchantGrade::Grade15, ClientVariant::Standard) => Some(&self.grade15_standard),
            (EnchantGrade::Grade15, ClientVariant::Alternate) => Some(&self.grade15_alternate),
            (EnchantGrade::Grade30, ClientVariant::Standard) => Some(&self.grade30_standard),
            (EnchantGrade::Grade30, ClientVariant::Alternate) => Some(&self.grade30_alternate),
        }
    }
}
