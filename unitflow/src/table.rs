//! Unit tables: group name -> unit name -> definition
//!
//! Tables are ordered (group, then unit name) so that loading them is
//! deterministic, including how far a failed load got.

use std::collections::BTreeMap;

use serde::Deserialize;
use unitflow_core::{ConvertError, Result};

use crate::UnitDefinition;

/// The unit definitions of one group, keyed by unit name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct UnitGroup {
    units: BTreeMap<String, UnitDefinition>,
}

impl UnitGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(mut self, name: impl Into<String>, definition: UnitDefinition) -> Self {
        self.insert(name, definition);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, definition: UnitDefinition) {
        self.units.insert(name.into(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&UnitDefinition> {
        self.units.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UnitDefinition)> {
        self.units.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// A group-keyed collection of unit definitions
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct UnitTable {
    groups: BTreeMap<String, UnitGroup>,
}

impl UnitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table of linear units from JSON:
    /// `{"power": {"kW": {}, "MW": {"factor": 1000}}}`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConvertError::invalid_table(e.to_string()))
    }

    pub fn with_group(mut self, name: impl Into<String>, group: UnitGroup) -> Self {
        self.groups.insert(name.into(), group);
        self
    }

    pub fn group(&self, name: &str) -> Option<&UnitGroup> {
        self.groups.get(name)
    }

    /// Group names in load order
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(|s| s.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UnitGroup)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// Total number of unit definitions across all groups
    pub fn unit_count(&self) -> usize {
        self.groups.values().map(UnitGroup::len).sum()
    }

    /// A table holding only the named groups; fails on the first unknown one
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<UnitTable> {
        let mut selected = UnitTable::new();
        for name in names {
            let name = name.as_ref();
            let group = self.group(name).ok_or_else(|| ConvertError::unknown_group(name))?;
            selected.groups.insert(name.to_string(), group.clone());
        }
        Ok(selected)
    }
}

/// What `load` accepts: a whole table, or group names resolved against a library
#[derive(Debug, Clone)]
pub enum UnitSource {
    Table(UnitTable),
    Group(String),
    Groups(Vec<String>),
}

impl UnitSource {
    /// Turn this source into a concrete table
    pub fn resolve(self, library: &UnitTable) -> Result<UnitTable> {
        match self {
            UnitSource::Table(table) => Ok(table),
            UnitSource::Group(name) => library.select(&[name]),
            UnitSource::Groups(names) => library.select(names.as_slice()),
        }
    }

    /// Short label for log output
    pub fn kind(&self) -> &'static str {
        match self {
            UnitSource::Table(_) => "table",
            UnitSource::Group(_) => "group",
            UnitSource::Groups(_) => "groups",
        }
    }
}

impl From<UnitTable> for UnitSource {
    fn from(table: UnitTable) -> Self {
        UnitSource::Table(table)
    }
}

impl From<&UnitTable> for UnitSource {
    fn from(table: &UnitTable) -> Self {
        UnitSource::Table(table.clone())
    }
}

impl From<&str> for UnitSource {
    fn from(group: &str) -> Self {
        UnitSource::Group(group.to_string())
    }
}

impl From<String> for UnitSource {
    fn from(group: String) -> Self {
        UnitSource::Group(group)
    }
}

impl From<&[&str]> for UnitSource {
    fn from(groups: &[&str]) -> Self {
        UnitSource::Groups(groups.iter().map(|g| g.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for UnitSource {
    fn from(groups: [&str; N]) -> Self {
        UnitSource::Groups(groups.iter().map(|g| g.to_string()).collect())
    }
}

impl From<Vec<String>> for UnitSource {
    fn from(groups: Vec<String>) -> Self {
        UnitSource::Groups(groups)
    }
}
