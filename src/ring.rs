//! Concentric ring valuation table.
//!
//! Every house archetype owns one table. Row `i` describes the geometry and
//! marginal value of allocating `i` additional rings beyond the archetype's
//! base ring; the base ring itself is inseparable from the house and yields
//! no value of its own.

use std::fmt;

use serde::Serialize;

use crate::error::ModelError;

/// One concentric band of minimum-distance land around a house footprint.
///
/// `area` and `value` are the increments this band adds on top of everything
/// inside it; the `cum_*` fields are the running totals including this band.
/// Land values keep full precision here and are only rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ring {
    /// Ring index, which is also the band width in map units.
    pub index: u32,
    /// Outer extent along x: `2 * index + footprint width`.
    pub x: f64,
    /// Outer extent along y: `2 * index + footprint height`.
    pub y: f64,
    pub area: f64,
    pub value: f64,
    pub land_value: f64,
    pub cum_area: f64,
    pub cum_value: f64,
    pub cum_land_value: f64,
}

/// Immutable table of rings in strictly increasing index order, with no gaps.
/// Offset `i` into the table means "`i` additional rings beyond the base".
#[derive(Debug, Clone, PartialEq)]
pub struct RingTable {
    base_ring: u32,
    rows: Vec<Ring>,
}

impl RingTable {
    /// Builds the table for ring indices `[base_ring, max_ring_index)`.
    ///
    /// Cumulative area is seeded with the footprint area and cumulative value
    /// with the unit value, so the base ring row already carries the house
    /// itself in its totals.
    pub fn build(
        footprint_width: f64,
        footprint_height: f64,
        unit_value: f64,
        base_ring: u32,
        ring_increment: f64,
        max_ring_index: u32,
    ) -> Result<Self, ModelError> {
        if footprint_width <= 0.0 || footprint_height <= 0.0 {
            return Err(ModelError::Configuration(format!(
                "footprint must be positive, got {footprint_width} x {footprint_height}"
            )));
        }
        if unit_value <= 0.0 {
            return Err(ModelError::Configuration(format!(
                "unit value must be positive, got {unit_value}"
            )));
        }
        if base_ring < 1 {
            return Err(ModelError::Configuration(
                "base ring must be at least 1, a zero-width ring degenerates the geometry".into(),
            ));
        }
        if max_ring_index <= base_ring {
            return Err(ModelError::Configuration(format!(
                "max ring index {max_ring_index} must exceed base ring {base_ring}"
            )));
        }

        let mut cum_area = footprint_width * footprint_height;
        let mut cum_value = unit_value;
        let mut rows = Vec::with_capacity((max_ring_index - base_ring) as usize);

        for index in base_ring..max_ring_index {
            let x = 2.0 * f64::from(index) + footprint_width;
            let y = 2.0 * f64::from(index) + footprint_height;
            let area = x * y - cum_area;
            if area <= 0.0 {
                return Err(ModelError::DegenerateRing { ring: index, area });
            }
            // The base ring belongs to the house, so it yields no value.
            let value = if index == base_ring {
                0.0
            } else {
                ring_increment * unit_value
            };
            cum_area += area;
            cum_value += value;
            rows.push(Ring {
                index,
                x,
                y,
                area,
                value,
                land_value: value / area,
                cum_area,
                cum_value,
                cum_land_value: cum_value / cum_area,
            });
        }

        Ok(Self { base_ring, rows })
    }

    pub fn base_ring(&self) -> u32 {
        self.base_ring
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Ring] {
        &self.rows
    }

    /// Row lookup by additional-ring offset.
    pub fn get(&self, offset: usize) -> Result<&Ring, ModelError> {
        self.rows
            .get(offset)
            .ok_or(ModelError::RingIndexOutOfRange {
                offset,
                len: self.rows.len(),
            })
    }
}

impl fmt::Display for RingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(104);
        writeln!(f, "{rule}")?;
        for ring in &self.rows {
            writeln!(
                f,
                "| ring: {:2}   x: {:5.1}   y: {:5.1}   area: {:7.1}  landValue: {:7.1}  \
                 cumArea: {:8.1}  cumValue: {:9.0}   cumLandValue: {:5.0} |",
                ring.index,
                ring.x,
                ring.y,
                ring.area,
                ring.land_value,
                ring.cum_area,
                ring.cum_value,
                ring.cum_land_value,
            )?;
        }
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family_table() -> RingTable {
        RingTable::build(8.0, 8.0, 285_000.0, 2, 0.03, 5).unwrap()
    }

    #[test]
    fn base_ring_row_carries_the_house() {
        let table = family_table();
        let row = table.get(0).unwrap();
        assert_eq!(row.index, 2);
        assert_eq!(row.x, 12.0);
        assert_eq!(row.y, 12.0);
        assert_eq!(row.area, 144.0 - 64.0);
        assert_eq!(row.value, 0.0);
        assert_eq!(row.cum_area, 144.0);
        assert_eq!(row.cum_value, 285_000.0);
    }

    #[test]
    fn first_additional_ring_yields_the_increment() {
        let table = family_table();
        let row = table.get(1).unwrap();
        assert_eq!(row.index, 3);
        assert_eq!(row.x, 14.0);
        assert_eq!(row.y, 14.0);
        assert_eq!(row.area, 196.0 - 144.0);
        assert_eq!(row.value, 0.03 * 285_000.0);
        assert_eq!(row.cum_area, 196.0);
        assert_eq!(row.cum_value, 293_550.0);
    }

    #[test]
    fn cumulative_totals_increase_strictly() {
        let table = RingTable::build(10.0, 7.5, 399_000.0, 3, 0.04, 20).unwrap();
        for pair in table.rows().windows(2) {
            assert_eq!(pair[1].index, pair[0].index + 1, "no gaps in ring order");
            assert!(pair[1].cum_area > pair[0].cum_area);
            assert!(pair[1].cum_value > pair[0].cum_value);
        }
    }

    #[test]
    fn base_ring_zero_is_rejected() {
        let result = RingTable::build(8.0, 8.0, 285_000.0, 0, 0.03, 5);
        assert!(matches!(result, Err(ModelError::Configuration(_))));
        assert!(RingTable::build(8.0, 8.0, 285_000.0, 1, 0.03, 5).is_ok());
    }

    #[test]
    fn table_must_span_at_least_one_ring() {
        let result = RingTable::build(8.0, 8.0, 285_000.0, 4, 0.03, 4);
        assert!(matches!(result, Err(ModelError::Configuration(_))));
    }

    #[test]
    fn offset_beyond_table_fails() {
        let table = family_table();
        assert_eq!(table.len(), 3);
        assert!(matches!(
            table.get(3),
            Err(ModelError::RingIndexOutOfRange { offset: 3, len: 3 })
        ));
    }
}
