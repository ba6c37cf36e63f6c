use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use ringplot::{
    map::PlacementPolicy,
    rng::RngManager,
    scenario::ScenarioLoader,
    snapshot::{MapSnapshot, SnapshotWriter},
    ModelError,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Ring-based land valuation and placement runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/suburb.yaml")]
    scenario: PathBuf,

    /// Override the number of houses to place
    #[arg(long)]
    houses: Option<u32>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print each archetype's ring valuation table
    #[arg(long)]
    print_rings: bool,

    /// Directory to write a JSON snapshot of the placed map
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let archetypes = scenario.build_archetypes()?;

    if cli.print_rings {
        for archetype in &archetypes {
            println!("\n{}", archetype.name());
            println!("{}", archetype.rings());
        }
    }

    let mut map = scenario.build_map()?;
    let mut rng = RngManager::new(cli.seed.unwrap_or(scenario.seed));
    let plan = scenario.build_plan(&archetypes);
    let count = scenario.house_count(cli.houses) as usize;

    let mut rejected = 0_usize;
    for archetype in plan.iter().take(count) {
        let placed = map.add_house(
            archetype,
            0,
            PlacementPolicy::random_non_colliding(),
            rng.stream("placement"),
        );
        match placed {
            Ok(_) => {}
            // A full map is an outcome, not a crash: report it at the end.
            Err(ModelError::PlacementExhausted { .. }) => rejected += 1,
            Err(err) => return Err(err.into()),
        }
    }

    println!(
        "Scenario '{}': placed {} of {} houses, {} rejected for lack of space.",
        scenario.name,
        map.house_count(),
        count,
        rejected
    );
    println!("Total map value: {:.0}", map.total_value());

    if let Some(dir) = cli.snapshot_dir {
        let snapshot = MapSnapshot::capture(&map, &scenario.name);
        let path = SnapshotWriter::new(dir).write(&snapshot)?;
        println!("Snapshot written to {}", path.display());
    }

    Ok(())
}
