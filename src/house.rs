//! Placed house instances with derived boundary geometry.

use std::sync::Arc;

use crate::archetype::HouseArchetype;
use crate::error::ModelError;
use crate::geometry::{Coordinate, Rectangle, Vector};
use crate::ring::Ring;

/// A house placed on the map: a shared archetype, an origin, and the number
/// of additional rings allocated beyond the base ring.
///
/// The footprint boundary and ring boundary are views derived from that
/// state. They are recomputed whenever the origin changes and can never be
/// mutated independently.
#[derive(Debug, Clone)]
pub struct HouseInstance {
    archetype: Arc<HouseArchetype>,
    origin: Coordinate,
    additional_rings: usize,
    boundary: Rectangle,
    ring_boundary: Rectangle,
}

impl HouseInstance {
    /// Places a house of `archetype` at `origin` with `additional_rings`
    /// rings beyond the base. Fails if the offset exceeds the archetype's
    /// ring table.
    pub fn place(
        archetype: Arc<HouseArchetype>,
        origin: Coordinate,
        additional_rings: usize,
    ) -> Result<Self, ModelError> {
        let ring = *archetype.ring(additional_rings)?;
        let (boundary, ring_boundary) = derive_boundaries(&archetype, origin, &ring);
        Ok(Self {
            archetype,
            origin,
            additional_rings,
            boundary,
            ring_boundary,
        })
    }

    /// Shifts the origin by `vector` and recomputes both boundaries.
    pub fn translate(&mut self, vector: Vector) {
        self.move_to(self.origin.translate(vector));
    }

    /// Replaces the origin and recomputes both boundaries. No other state
    /// changes.
    pub fn move_to(&mut self, origin: Coordinate) {
        self.origin = origin;
        let (boundary, ring_boundary) = derive_boundaries(&self.archetype, origin, self.ring());
        self.boundary = boundary;
        self.ring_boundary = ring_boundary;
    }

    pub fn archetype(&self) -> &Arc<HouseArchetype> {
        &self.archetype
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn additional_rings(&self) -> usize {
        self.additional_rings
    }

    /// The ring row this instance is valued at.
    pub fn ring(&self) -> &Ring {
        // The offset was bounds-checked at placement and never changes.
        &self.archetype.rings().rows()[self.additional_rings]
    }

    /// The house's own rectangular area.
    pub fn boundary(&self) -> &Rectangle {
        &self.boundary
    }

    /// The outer extent of the allocated ring zone, centred on the footprint.
    pub fn ring_boundary(&self) -> &Rectangle {
        &self.ring_boundary
    }

    /// This house's contribution to the map total: unit value plus all ring
    /// increments accrued up to and including the chosen ring.
    pub fn value(&self) -> f64 {
        self.ring().cum_value
    }
}

fn derive_boundaries(
    archetype: &HouseArchetype,
    origin: Coordinate,
    ring: &Ring,
) -> (Rectangle, Rectangle) {
    let boundary = Rectangle::from_validated(
        origin,
        archetype.footprint_width(),
        archetype.footprint_height(),
    );
    // The ring band is `index` units wide on every side, so its origin sits
    // diagonally below-left of the house origin.
    let ring_width = f64::from(ring.index);
    let ring_origin = origin.translate(Vector::new(-ring_width, -ring_width));
    let ring_boundary = Rectangle::from_validated(ring_origin, ring.x, ring.y);
    (boundary, ring_boundary)
}
