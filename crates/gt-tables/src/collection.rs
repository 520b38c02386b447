//! Table collections.
//!
//! Two levels: group key (a data source, e.g. one workbook) → table name →
//! table. Both levels keep insertion order, which is the natural iteration
//! order used by the coefficient engine. Names are parsed on insertion, so a
//! collection never holds a table whose name cannot be routed to a coefficient.

use crate::ambient::{AmbientConditions, TEMPERATURE};
use crate::error::{TableError, TableResult};
use crate::name::TableName;
use crate::table::Table;
use tracing::debug;

/// Named tables from one source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableGroup {
    tables: Vec<(TableName, Table)>,
}

impl TableGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `name` and add the table; rejects malformed and duplicate names.
    pub fn insert(&mut self, name: &str, table: Table) -> TableResult<()> {
        let parsed = TableName::parse(name)?;
        if self.tables.iter().any(|(n, _)| n == &parsed) {
            return Err(TableError::Duplicate {
                what: "table name",
                key: name.to_string(),
            });
        }
        self.tables.push((parsed, table));
        Ok(())
    }

    pub fn with(mut self, name: &str, table: Table) -> TableResult<Self> {
        self.insert(name, table)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TableName, &Table)> {
        self.tables.iter().map(|(n, t)| (n, t))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCollection {
    groups: Vec<(String, TableGroup)>,
}

impl TableCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_group(&mut self, key: impl Into<String>, group: TableGroup) -> TableResult<()> {
        let key = key.into();
        if self.group(&key).is_some() {
            return Err(TableError::Duplicate {
                what: "table group",
                key,
            });
        }
        self.groups.push((key, group));
        Ok(())
    }

    pub fn with_group(mut self, key: impl Into<String>, group: TableGroup) -> TableResult<Self> {
        self.insert_group(key, group)?;
        Ok(self)
    }

    pub fn group(&self, key: &str) -> Option<&TableGroup> {
        self.groups.iter().find(|(k, _)| k == key).map(|(_, g)| g)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &TableGroup)> {
        self.groups.iter().map(|(k, g)| (k.as_str(), g))
    }

    /// Every table, group by group, in natural order.
    pub fn tables(&self) -> impl Iterator<Item = (&str, &TableName, &Table)> {
        self.groups
            .iter()
            .flat_map(|(k, g)| g.iter().map(move |(n, t)| (k.as_str(), n, t)))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn table_count(&self) -> usize {
        self.groups.iter().map(|(_, g)| g.len()).sum()
    }

    /// New collection with only `keys`, in the order given.
    pub fn subset(&self, keys: &[&str]) -> TableResult<Self> {
        let mut out = Self::new();
        for key in keys {
            let group = self.group(key).ok_or_else(|| TableError::MissingGroup {
                group: key.to_string(),
            })?;
            out.insert_group(*key, group.clone())?;
        }
        Ok(out)
    }

    /// Ambient columns needed to evaluate every table: `T` plus the family of
    /// each non-probe table, deduplicated in first-use order.
    pub fn required_columns(&self) -> Vec<String> {
        let mut cols = vec![TEMPERATURE.to_string()];
        for (_, name, _) in self.tables() {
            if !name.is_temperature_probe() && !cols.iter().any(|c| c == name.family()) {
                cols.push(name.family().to_string());
            }
        }
        cols
    }

    /// Check that `ambient` carries every column this collection needs.
    pub fn check_ambient(&self, ambient: &AmbientConditions) -> TableResult<()> {
        let required = self.required_columns();
        debug!(columns = ?required, rows = ambient.len(), "checking ambient columns");
        match required.into_iter().find(|c| !ambient.has_column(c)) {
            Some(column) => Err(TableError::MissingColumn { column }),
            None => Ok(()),
        }
    }
}
