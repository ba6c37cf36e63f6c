//! Axis-aligned geometry value types shared by the whole model.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A point on the map. Translation returns a new value, it never mutates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(self, vector: Vector) -> Coordinate {
        Coordinate::new(self.x + vector.dx, self.y + vector.dy)
    }
}

/// Displacement applied to a [`Coordinate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Axis-aligned box anchored at its lower-left corner.
///
/// Invariant: width and height are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rectangle {
    origin: Coordinate,
    width: f64,
    height: f64,
}

impl Rectangle {
    pub fn new(origin: Coordinate, width: f64, height: f64) -> Result<Self, ModelError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(ModelError::InvalidDimensions { width, height });
        }
        Ok(Self {
            origin,
            width,
            height,
        })
    }

    /// Constructor for derived views whose dimensions were validated upstream
    /// (archetype footprints and ring extents are checked at table build).
    pub(crate) fn from_validated(origin: Coordinate, width: f64, height: f64) -> Self {
        debug_assert!(width > 0.0 && height > 0.0);
        Self {
            origin,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// The corner opposite the origin.
    pub fn far_corner(&self) -> Coordinate {
        self.origin.translate(Vector::new(self.width, self.height))
    }

    /// True when both x- and y-intervals intersect with positive length.
    /// Rectangles that merely share an edge or a corner do not overlap.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        let a = self.far_corner();
        let b = other.far_corner();
        self.origin.x < b.x && other.origin.x < a.x && self.origin.y < b.y && other.origin.y < a.y
    }

    /// True when `other` lies fully inside `self`. Touching the border counts
    /// as inside, so a house whose ring reaches the map edge is still valid.
    pub fn contains(&self, other: &Rectangle) -> bool {
        let a = self.far_corner();
        let b = other.far_corner();
        other.origin.x >= self.origin.x
            && other.origin.y >= self.origin.y
            && b.x <= a.x
            && b.y <= a.y
    }
}
