//! The complete, ordered set of known migration units.

use crate::error::{RunnerError, RunnerResult};
use crate::traits::{MigrationUnit, UnitSource};
use std::collections::BTreeMap;
use std::sync::Arc;
use tm_core::Version;

/// Every discoverable unit keyed by version identifier
#[derive(Clone, Default)]
pub struct Catalog {
    units: BTreeMap<Version, Arc<dyn MigrationUnit>>,
}

impl Catalog {
    /// Discover all units from `source`. There is no partial catalog: any
    /// discovery failure or duplicate identifier fails the load.
    pub async fn load(source: &dyn UnitSource) -> RunnerResult<Self> {
        let units = source.discover().await?;
        let catalog = Self::from_units(units)?;
        log::debug!(
            "Loaded {} migration(s) from {}",
            catalog.len(),
            source.describe()
        );
        Ok(catalog)
    }

    /// Build a catalog from already-discovered units
    pub fn from_units(units: Vec<Arc<dyn MigrationUnit>>) -> RunnerResult<Self> {
        let mut map: BTreeMap<Version, Arc<dyn MigrationUnit>> = BTreeMap::new();
        for unit in units {
            let version = unit.version();
            if version.is_zero() {
                return Err(RunnerError::InvalidVersionOutput {
                    unit: unit.location(),
                    output: version.to_string(),
                });
            }
            if let Some(existing) = map.get(&version) {
                return Err(RunnerError::DuplicateVersion {
                    version,
                    first: existing.location(),
                    second: unit.location(),
                });
            }
            map.insert(version, unit);
        }
        Ok(Self { units: map })
    }

    /// All version identifiers, ascending
    pub fn list(&self) -> Vec<Version> {
        self.units.keys().copied().collect()
    }

    /// Look up a unit by identifier
    pub fn get(&self, version: Version) -> RunnerResult<&Arc<dyn MigrationUnit>> {
        self.units
            .get(&version)
            .ok_or(RunnerError::UnknownVersion { version })
    }

    /// Units in ascending version order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn MigrationUnit>> {
        self.units.values()
    }

    /// Newest identifier, if any
    pub fn latest(&self) -> Option<Version> {
        self.units.keys().next_back().copied()
    }

    /// Number of units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True when no units were found
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.units.keys()).finish()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
