pub mod archetype;
pub mod error;
pub mod geometry;
pub mod house;
pub mod map;
pub mod ring;
pub mod rng;
pub mod scenario;
pub mod snapshot;

pub use archetype::HouseArchetype;
pub use error::ModelError;
pub use geometry::{Coordinate, Rectangle, Vector};
pub use house::HouseInstance;
pub use map::{CollisionMode, MapModel, OriginMode, PlacementPolicy, PlacementReceipt};
pub use ring::{Ring, RingTable};
pub use scenario::{Scenario, ScenarioLoader};
