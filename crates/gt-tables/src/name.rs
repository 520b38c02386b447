//! Table name parsing.
//!
//! A correction table name is `<family><letter>`: the family is every character
//! but the last and names the ambient column the table is indexed against; the
//! last character is the coefficient slot the table contributes to.
//!
//! Names starting with `T` are temperature probes. They are indexed against
//! temperature alone and do not contribute to any coefficient.

use crate::error::{TableError, TableResult};
use gt_core::CoefficientIndex;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableName {
    raw: String,
    family: String,
    index: CoefficientIndex,
}

impl TableName {
    pub fn parse(name: &str) -> TableResult<Self> {
        let mut chars = name.chars();
        let last = chars.next_back().ok_or_else(|| TableError::MalformedName {
            name: name.to_string(),
            reason: "name is empty".to_string(),
        })?;
        let family = chars.as_str();
        if family.is_empty() {
            return Err(TableError::MalformedName {
                name: name.to_string(),
                reason: "missing family prefix before the coefficient letter".to_string(),
            });
        }
        let index = CoefficientIndex::from_letter(last).map_err(|e| TableError::MalformedName {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            raw: name.to_string(),
            family: family.to_string(),
            index,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Ambient column the table is indexed against.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn index(&self) -> CoefficientIndex {
        self.index
    }

    /// Temperature-only table; evaluated but never folded into a coefficient.
    pub fn is_temperature_probe(&self) -> bool {
        self.raw.starts_with('T')
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for TableName {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
