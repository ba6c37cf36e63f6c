//! Scenario files: the static archetype table, map bounds, and run settings.
//!
//! Archetype parameters arrive as an already-structured record table; the
//! core treats them as validated input data, never as parsed text. Loading
//! replaces any notion of process-wide mutable constants: every map and
//! archetype set is built from an explicit `Scenario` value.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::archetype::HouseArchetype;
use crate::error::ModelError;
use crate::map::MapModel;

fn default_house_count() -> u32 {
    20
}

fn default_retry_cap() -> u32 {
    1000
}

fn default_max_ring_index() -> u32 {
    20
}

fn default_colour() -> String {
    "grey".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default = "default_house_count")]
    pub house_count: u32,
    #[serde(default = "default_retry_cap")]
    pub retry_cap: u32,
    /// Upper bound (exclusive) on ring indices in every archetype's table.
    #[serde(default = "default_max_ring_index")]
    pub max_ring_index: u32,
    pub map: MapArea,
    pub archetypes: Vec<ArchetypeConfig>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MapArea {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchetypeConfig {
    pub name: String,
    pub frequency: f64,
    pub unit_value: f64,
    pub footprint: Footprint,
    pub base_ring: u32,
    pub ring_increment: f64,
    #[serde(default = "default_colour")]
    pub colour: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Scenario::from_yaml(&data).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

impl Scenario {
    pub fn from_yaml(data: &str) -> Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(data)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        if self.archetypes.is_empty() {
            bail!("scenario must define at least one archetype");
        }
        let mut seen = Vec::new();
        for archetype in &self.archetypes {
            if seen.contains(&&archetype.name) {
                bail!("archetype '{}' defined more than once", archetype.name);
            }
            seen.push(&archetype.name);
        }
        if self.map.width <= 0.0 || self.map.height <= 0.0 {
            bail!(
                "map area must be positive, got {} x {}",
                self.map.width,
                self.map.height
            );
        }
        Ok(())
    }

    /// Builds every archetype, eagerly deriving its ring table.
    pub fn build_archetypes(&self) -> Result<Vec<Arc<HouseArchetype>>, ModelError> {
        self.archetypes
            .iter()
            .map(|config| {
                HouseArchetype::new(
                    config.name.clone(),
                    config.frequency,
                    config.unit_value,
                    (config.footprint.width, config.footprint.height),
                    config.base_ring,
                    config.ring_increment,
                    self.max_ring_index,
                    config.colour.clone(),
                )
                .map(Arc::new)
            })
            .collect()
    }

    /// An empty map over the scenario's buildable area.
    pub fn build_map(&self) -> Result<MapModel, ModelError> {
        Ok(MapModel::with_area(self.map.width, self.map.height)?.with_retry_cap(self.retry_cap))
    }

    /// Expands the frequency weights into a concrete list of archetypes to
    /// place: `round(frequency * house_count)` instances each, most valuable
    /// archetype first so the large houses claim space before the map fills.
    pub fn build_plan(&self, archetypes: &[Arc<HouseArchetype>]) -> Vec<Arc<HouseArchetype>> {
        let mut by_value: Vec<&Arc<HouseArchetype>> = archetypes.iter().collect();
        by_value.sort_by(|a, b| {
            b.unit_value()
                .partial_cmp(&a.unit_value())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut plan = Vec::with_capacity(self.house_count as usize);
        for archetype in by_value {
            let n = (archetype.frequency() * f64::from(self.house_count)).round() as usize;
            plan.extend(std::iter::repeat_with(|| Arc::clone(archetype)).take(n));
        }
        plan
    }

    pub fn house_count(&self, override_count: Option<u32>) -> u32 {
        override_count.unwrap_or(self.house_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "\
name: minimal
seed: 7
map:
  width: 60
  height: 60
archetypes:
  - name: Cabin
    frequency: 1.0
    unit_value: 120000
    footprint: { width: 6, height: 5 }
    base_ring: 1
    ring_increment: 0.02
";

    #[test]
    fn parses_with_defaults() {
        let scenario = Scenario::from_yaml(MINIMAL).unwrap();
        assert_eq!(scenario.house_count, 20);
        assert_eq!(scenario.retry_cap, 1000);
        assert_eq!(scenario.max_ring_index, 20);
        assert_eq!(scenario.archetypes[0].colour, "grey");
    }

    #[test]
    fn duplicate_archetype_names_are_rejected() {
        let duplicated = format!(
            "{MINIMAL}  - name: Cabin\n    frequency: 0.0\n    unit_value: 1000\n    \
             footprint: {{ width: 2, height: 2 }}\n    base_ring: 1\n    ring_increment: 0.01\n"
        );
        assert!(Scenario::from_yaml(&duplicated).is_err());
    }

    #[test]
    fn plan_is_weighted_and_ordered_by_value() {
        let yaml = "\
name: split
seed: 1
house_count: 10
map:
  width: 100
  height: 100
archetypes:
  - name: Small
    frequency: 0.7
    unit_value: 100000
    footprint: { width: 5, height: 5 }
    base_ring: 1
    ring_increment: 0.02
  - name: Large
    frequency: 0.3
    unit_value: 500000
    footprint: { width: 9, height: 9 }
    base_ring: 2
    ring_increment: 0.05
";
        let scenario = Scenario::from_yaml(yaml).unwrap();
        let archetypes = scenario.build_archetypes().unwrap();
        let plan = scenario.build_plan(&archetypes);
        assert_eq!(plan.len(), 10);
        assert_eq!(plan[0].name(), "Large");
        assert_eq!(plan.iter().filter(|a| a.name() == "Large").count(), 3);
        assert_eq!(plan.iter().filter(|a| a.name() == "Small").count(), 7);
    }
}
