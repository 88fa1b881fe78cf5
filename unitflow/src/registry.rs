//! Unit registry: the flat unit-name -> definition cache
//!
//! All groups are flattened into one map keyed by unit name. The group is
//! kept on each entry for selective clearing and cross-group rejection.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};
use unitflow_core::{ConvertError, Result};

use crate::{UnitDefinition, UnitTable};

/// A loaded unit: its definition plus the group that owns it
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub group: String,
    pub definition: UnitDefinition,
}

/// Registry of loaded units
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every unit of `table`; later duplicates win
    pub fn from_table(table: &UnitTable) -> Self {
        let mut registry = Self::new();
        for (group, units) in table.iter() {
            for (name, definition) in units.iter() {
                registry.insert(group, name, definition);
            }
        }
        registry
    }

    /// Merge a table into the registry, returning how many entries were written.
    ///
    /// Without `overwrite`, the first already-registered name fails the load
    /// with `DuplicateUnit`; entries written before it stay loaded.
    pub fn load(&mut self, table: &UnitTable, overwrite: bool) -> Result<usize> {
        let mut written = 0;
        for (group, units) in table.iter() {
            for (name, definition) in units.iter() {
                if !overwrite && self.entries.contains_key(name) {
                    debug!(unit = name, group, written, "duplicate unit, load stopped");
                    return Err(ConvertError::duplicate_unit(name));
                }
                self.insert(group, name, definition);
                written += 1;
            }
        }
        debug!(written, overwrite, total = self.entries.len(), "units loaded");
        Ok(written)
    }

    fn insert(&mut self, group: &str, name: &str, definition: &UnitDefinition) {
        trace!(unit = name, group, "register unit");
        self.entries.insert(name.to_string(), RegistryEntry {
            group: group.to_string(),
            definition: definition.clone(),
        });
    }

    /// Remove one group's units, or everything when `group` is `None`.
    /// Returns the number of removed entries.
    pub fn clear(&mut self, group: Option<&str>) -> usize {
        let before = self.entries.len();
        match group {
            Some(group) => self.entries.retain(|_, entry| entry.group != group),
            None => self.entries.clear(),
        }
        let removed = before - self.entries.len();
        debug!(group = group.unwrap_or("*"), removed, "units cleared");
        removed
    }

    pub fn has(&self, unit: &str) -> bool {
        self.entries.contains_key(unit)
    }

    pub fn get(&self, unit: &str) -> Option<&RegistryEntry> {
        self.entries.get(unit)
    }

    /// Look up a unit, failing on empty or unknown names
    pub fn verify(&self, unit: &str) -> Result<&RegistryEntry> {
        if unit.is_empty() {
            return Err(ConvertError::UnitNotSpecified);
        }
        self.get(unit).ok_or_else(|| ConvertError::unit_not_recognized(unit))
    }

    /// Display label: the unit's label, its own name, or "" when unknown
    pub fn display(&self, unit: &str) -> String {
        match self.get(unit) {
            Some(entry) => entry.definition.display.clone().unwrap_or_else(|| unit.to_string()),
            None => String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct group names, sorted
    pub fn groups(&self) -> Vec<&str> {
        self.entries.values()
            .map(|entry| entry.group.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Unit names of one group, sorted
    pub fn units_in(&self, group: &str) -> Vec<&str> {
        let mut units: Vec<&str> = self.entries.iter()
            .filter(|(_, entry)| entry.group == group)
            .map(|(name, _)| name.as_str())
            .collect();
        units.sort_unstable();
        units
    }
}
