use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ringplot::{map::PlacementPolicy, Coordinate, ScenarioLoader};

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn scenario_path() -> PathBuf {
    PathBuf::from("scenarios/suburb.yaml")
}

#[test]
fn scenario_loader_reads_fixture() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    assert_eq!(scenario.name, "suburb");
    assert_eq!(scenario.archetypes.len(), 3);
    assert_eq!(scenario.map.width, 160.0);
    assert_eq!(scenario.map.height, 180.0);
    let total_frequency: f64 = scenario.archetypes.iter().map(|a| a.frequency).sum();
    assert!((total_frequency - 1.0).abs() < 1e-9);
}

#[test]
fn family_ring_table_matches_known_values() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let archetypes = scenario.build_archetypes().unwrap();
    let family = archetypes
        .iter()
        .find(|a| a.name() == "Family")
        .expect("fixture defines the Family archetype");

    let base = family.ring(0).unwrap();
    assert_eq!((base.x, base.y), (12.0, 12.0));
    assert_eq!(base.area, 80.0);
    assert_eq!(base.value, 0.0);
    assert_eq!(base.cum_area, 144.0);
    assert_eq!(base.cum_value, 285_000.0);

    let grown = family.ring(1).unwrap();
    assert_eq!((grown.x, grown.y), (14.0, 14.0));
    assert_eq!(grown.area, 52.0);
    assert_eq!(grown.value, 8_550.0);
    assert_eq!(grown.cum_area, 196.0);
    assert_eq!(grown.cum_value, 293_550.0);
}

#[test]
fn every_archetype_table_is_strictly_increasing() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    for archetype in scenario.build_archetypes().unwrap() {
        for pair in archetype.rings().rows().windows(2) {
            assert!(pair[1].cum_area > pair[0].cum_area, "{}", archetype.name());
            assert!(pair[1].cum_value > pair[0].cum_value, "{}", archetype.name());
        }
    }
}

#[test]
fn total_value_sums_each_house_at_its_chosen_ring() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let archetypes = scenario.build_archetypes().unwrap();
    let family = archetypes
        .iter()
        .find(|a| a.name() == "Family")
        .unwrap();
    let mut map = scenario.build_map().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    assert_eq!(map.total_value(), 0.0, "empty map is worth nothing");

    map.add_house(
        family,
        0,
        PlacementPolicy::fixed(Coordinate::new(10.0, 10.0)),
        &mut rng,
    )
    .unwrap();
    map.add_house(
        family,
        1,
        PlacementPolicy::fixed(Coordinate::new(40.0, 40.0)),
        &mut rng,
    )
    .unwrap();

    assert_eq!(map.total_value(), 285_000.0 + 293_550.0);
}
