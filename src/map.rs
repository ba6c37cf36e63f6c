//! The bounded map, placement policies, and aggregate valuation.

use std::sync::Arc;

use rand::Rng;

use crate::archetype::HouseArchetype;
use crate::error::ModelError;
use crate::geometry::{Coordinate, Rectangle, Vector};
use crate::house::HouseInstance;
use crate::ring::Ring;

/// Default bound on the candidate loop under [`CollisionMode::RejectOverlap`].
pub const DEFAULT_RETRY_CAP: u32 = 1000;

/// How a placement request chooses its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OriginMode {
    /// Use the given origin as-is.
    Fixed(Coordinate),
    /// Draw uniformly from the range that keeps the full ring boundary
    /// inside the map, rounded to the nearest 0.5 unit.
    Random,
}

/// Whether a placement request tolerates footprint collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionMode {
    /// Commit unconditionally, even when footprints overlap.
    AllowOverlap,
    /// Only commit a candidate whose footprint stays inside the map and
    /// clear of every committed footprint.
    RejectOverlap,
}

/// Structured placement policy, one tag per axis of behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementPolicy {
    pub origin: OriginMode,
    pub collision: CollisionMode,
}

impl PlacementPolicy {
    pub fn fixed(origin: Coordinate) -> Self {
        Self {
            origin: OriginMode::Fixed(origin),
            collision: CollisionMode::AllowOverlap,
        }
    }

    pub fn fixed_non_colliding(origin: Coordinate) -> Self {
        Self {
            origin: OriginMode::Fixed(origin),
            collision: CollisionMode::RejectOverlap,
        }
    }

    pub fn random(collision: CollisionMode) -> Self {
        Self {
            origin: OriginMode::Random,
            collision,
        }
    }

    pub fn random_non_colliding() -> Self {
        Self::random(CollisionMode::RejectOverlap)
    }
}

/// Outcome of a committed placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementReceipt {
    /// Position of the new instance in placement order.
    pub index: usize,
    /// Candidates drawn before one validated, 1 for a first-try commit.
    pub attempts: u32,
}

/// A bounded buildable area holding committed house instances in placement
/// order.
///
/// Each `add_house` request passes through propose / validate / commit and
/// either commits exactly one instance or reports exactly one error. The
/// no-overlap invariant is best-effort: it holds for everything committed
/// under [`CollisionMode::RejectOverlap`], while the permissive mode is kept
/// as a selectable behaviour.
#[derive(Debug)]
pub struct MapModel {
    bounds: Rectangle,
    houses: Vec<HouseInstance>,
    retry_cap: u32,
}

impl MapModel {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            houses: Vec::new(),
            retry_cap: DEFAULT_RETRY_CAP,
        }
    }

    /// Buildable area of `width` x `height` anchored at the origin.
    pub fn with_area(width: f64, height: f64) -> Result<Self, ModelError> {
        Ok(Self::new(Rectangle::new(
            Coordinate::new(0.0, 0.0),
            width,
            height,
        )?))
    }

    pub fn with_retry_cap(mut self, retry_cap: u32) -> Self {
        self.retry_cap = retry_cap.max(1);
        self
    }

    pub fn bounds(&self) -> &Rectangle {
        &self.bounds
    }

    pub fn houses(&self) -> &[HouseInstance] {
        &self.houses
    }

    pub fn house_count(&self) -> usize {
        self.houses.len()
    }

    /// Places one house according to `policy`.
    ///
    /// Under [`CollisionMode::RejectOverlap`] candidates are drawn until one
    /// validates or the retry cap is exhausted; a fixed origin is a single
    /// candidate. Under [`CollisionMode::AllowOverlap`] the first proposal
    /// commits unconditionally.
    pub fn add_house<R: Rng>(
        &mut self,
        archetype: &Arc<HouseArchetype>,
        additional_rings: usize,
        policy: PlacementPolicy,
        rng: &mut R,
    ) -> Result<PlacementReceipt, ModelError> {
        let ring = *archetype.ring(additional_rings)?;

        match policy.collision {
            CollisionMode::AllowOverlap => {
                let origin = self.propose_origin(archetype, &ring, policy.origin, rng)?;
                let house = HouseInstance::place(Arc::clone(archetype), origin, additional_rings)?;
                Ok(self.commit(house, 1))
            }
            CollisionMode::RejectOverlap => {
                let mut attempts = 0;
                while attempts < self.retry_cap {
                    attempts += 1;
                    let origin = self.propose_origin(archetype, &ring, policy.origin, rng)?;
                    let candidate =
                        HouseInstance::place(Arc::clone(archetype), origin, additional_rings)?;
                    if self.validates(&candidate) {
                        return Ok(self.commit(candidate, attempts));
                    }
                    // A fixed origin cannot improve on retry.
                    if matches!(policy.origin, OriginMode::Fixed(_)) {
                        break;
                    }
                }
                Err(ModelError::PlacementExhausted { attempts })
            }
        }
    }

    /// Total map value: the sum over committed instances of the chosen
    /// ring's cumulative value. Zero for an empty map.
    pub fn total_value(&self) -> f64 {
        self.houses.iter().map(HouseInstance::value).sum()
    }

    fn propose_origin<R: Rng>(
        &self,
        archetype: &HouseArchetype,
        ring: &Ring,
        mode: OriginMode,
        rng: &mut R,
    ) -> Result<Coordinate, ModelError> {
        match mode {
            OriginMode::Fixed(origin) => Ok(origin),
            OriginMode::Random => self.random_origin(archetype, ring, rng),
        }
    }

    /// Draws an origin whose entire ring boundary fits inside the map, at a
    /// deliberate granularity of 0.5 units. Rounding at an interval edge is
    /// clamped back so the containment guarantee survives.
    fn random_origin<R: Rng>(
        &self,
        archetype: &HouseArchetype,
        ring: &Ring,
        rng: &mut R,
    ) -> Result<Coordinate, ModelError> {
        let ring_width = f64::from(ring.index);
        let low = self
            .bounds
            .origin()
            .translate(Vector::new(ring_width, ring_width));
        let high_x = self.bounds.origin().x + self.bounds.width()
            - ring_width
            - archetype.footprint_width();
        let high_y = self.bounds.origin().y + self.bounds.height()
            - ring_width
            - archetype.footprint_height();
        if high_x < low.x || high_y < low.y {
            return Err(ModelError::NoFeasiblePlacement {
                archetype: archetype.name().to_string(),
            });
        }
        let x = round_to_half(rng.gen_range(low.x..=high_x)).clamp(low.x, high_x);
        let y = round_to_half(rng.gen_range(low.y..=high_y)).clamp(low.y, high_y);
        Ok(Coordinate::new(x, y))
    }

    fn validates(&self, candidate: &HouseInstance) -> bool {
        self.bounds.contains(candidate.boundary())
            && self
                .houses
                .iter()
                .all(|placed| !placed.boundary().overlaps(candidate.boundary()))
    }

    fn commit(&mut self, house: HouseInstance, attempts: u32) -> PlacementReceipt {
        self.houses.push(house);
        PlacementReceipt {
            index: self.houses.len() - 1,
            attempts,
        }
    }
}

fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}
