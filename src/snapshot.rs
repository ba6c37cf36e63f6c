//! Read-only export of a placed map for external renderers.
//!
//! The core never draws anything. It hands a renderer, per house, two
//! rectangles and a colour tag; axis scaling to the map bounds is the
//! renderer's problem. The snapshot is that boundary, serialized.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use thiserror::Error;

use crate::geometry::{Coordinate, Rectangle};
use crate::map::MapModel;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct MapSnapshot {
    pub scenario: String,
    pub map_width: f64,
    pub map_height: f64,
    pub house_count: usize,
    pub total_value: f64,
    pub houses: Vec<HouseSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct HouseSnapshot {
    pub archetype: String,
    pub colour: String,
    pub origin: Coordinate,
    pub additional_rings: usize,
    pub boundary: Rectangle,
    pub ring_boundary: Rectangle,
    pub value: f64,
}

impl MapSnapshot {
    pub fn capture(map: &MapModel, scenario: &str) -> Self {
        let houses = map
            .houses()
            .iter()
            .map(|house| HouseSnapshot {
                archetype: house.archetype().name().to_string(),
                colour: house.archetype().colour().to_string(),
                origin: house.origin(),
                additional_rings: house.additional_rings(),
                boundary: *house.boundary(),
                ring_boundary: *house.ring_boundary(),
                value: house.value(),
            })
            .collect();
        Self {
            scenario: scenario.to_string(),
            map_width: map.bounds().width(),
            map_height: map.bounds().height(),
            house_count: map.house_count(),
            total_value: map.total_value(),
            houses,
        }
    }
}

pub struct SnapshotWriter {
    output_dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Writes the snapshot as pretty JSON named after the scenario and
    /// returns the file path.
    pub fn write(&self, snapshot: &MapSnapshot) -> Result<PathBuf, SnapshotError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}.json", snapshot.scenario));
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, json)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::HouseArchetype;
    use crate::map::PlacementPolicy;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;

    #[test]
    fn capture_mirrors_the_map() {
        let archetype = Arc::new(
            HouseArchetype::new(
                "Family",
                0.60,
                285_000.0,
                (8.0, 8.0),
                2,
                0.03,
                20,
                "red",
            )
            .unwrap(),
        );
        let mut map = MapModel::with_area(160.0, 180.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        map.add_house(
            &archetype,
            1,
            PlacementPolicy::fixed(Coordinate::new(20.0, 30.0)),
            &mut rng,
        )
        .unwrap();

        let snapshot = MapSnapshot::capture(&map, "unit");
        assert_eq!(snapshot.house_count, 1);
        assert_eq!(snapshot.total_value, 293_550.0);
        assert_eq!(snapshot.houses[0].colour, "red");
        assert_eq!(snapshot.houses[0].ring_boundary.width(), 14.0);
    }
}
