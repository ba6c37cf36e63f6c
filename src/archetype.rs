//! Static house archetypes and their derived valuation tables.

use crate::error::ModelError;
use crate::ring::{Ring, RingTable};

/// Static parameters of one house kind, plus the [`RingTable`] derived from
/// them once at construction. Read-only afterwards; placed instances share
/// it through an `Arc` and never outlive-own it.
#[derive(Debug, Clone)]
pub struct HouseArchetype {
    name: String,
    frequency: f64,
    unit_value: f64,
    footprint_width: f64,
    footprint_height: f64,
    base_ring: u32,
    ring_increment: f64,
    colour: String,
    rings: RingTable,
}

impl HouseArchetype {
    /// Validates the static parameters and eagerly builds the ring table for
    /// ring indices `[base_ring, max_ring_index)`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        frequency: f64,
        unit_value: f64,
        footprint: (f64, f64),
        base_ring: u32,
        ring_increment: f64,
        max_ring_index: u32,
        colour: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if !(0.0..=1.0).contains(&frequency) {
            return Err(ModelError::Configuration(format!(
                "'{name}': frequency must lie in [0, 1], got {frequency}"
            )));
        }
        if !(0.0..=1.0).contains(&ring_increment) {
            return Err(ModelError::Configuration(format!(
                "'{name}': ring increment must lie in [0, 1], got {ring_increment}"
            )));
        }
        let (footprint_width, footprint_height) = footprint;
        let rings = RingTable::build(
            footprint_width,
            footprint_height,
            unit_value,
            base_ring,
            ring_increment,
            max_ring_index,
        )?;
        Ok(Self {
            name,
            frequency,
            unit_value,
            footprint_width,
            footprint_height,
            base_ring,
            ring_increment,
            colour: colour.into(),
            rings,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Probability weight used when drawing up a build plan. Weights across
    /// all archetypes should sum to one; this is not enforced.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn unit_value(&self) -> f64 {
        self.unit_value
    }

    pub fn footprint_width(&self) -> f64 {
        self.footprint_width
    }

    pub fn footprint_height(&self) -> f64 {
        self.footprint_height
    }

    pub fn footprint_area(&self) -> f64 {
        self.footprint_width * self.footprint_height
    }

    /// Value density of the bare footprint, before any rings.
    pub fn land_value(&self) -> f64 {
        self.unit_value / self.footprint_area()
    }

    pub fn base_ring(&self) -> u32 {
        self.base_ring
    }

    pub fn ring_increment(&self) -> f64 {
        self.ring_increment
    }

    /// Presentation tag for external renderers; never used in computation.
    pub fn colour(&self) -> &str {
        &self.colour
    }

    pub fn rings(&self) -> &RingTable {
        &self.rings
    }

    /// Ring row for the given additional-ring offset; 0 selects the base ring.
    pub fn ring(&self, additional_rings: usize) -> Result<&Ring, ModelError> {
        self.rings.get(additional_rings)
    }
}
