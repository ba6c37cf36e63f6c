use thiserror::Error;

/// Failures produced by the valuation and placement model.
///
/// Every variant is terminal for the operation that raised it; the only
/// internal retry is the bounded candidate loop behind
/// [`PlacementExhausted`](ModelError::PlacementExhausted).
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid archetype configuration: {0}")]
    Configuration(String),

    #[error("rectangle dimensions must be positive, got {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("ring {ring} has non-positive incremental area {area}")]
    DegenerateRing { ring: u32, area: f64 },

    #[error("additional-ring offset {offset} outside table of {len} rings")]
    RingIndexOutOfRange { offset: usize, len: usize },

    #[error("map too small to place '{archetype}' with its ring boundary inside the bounds")]
    NoFeasiblePlacement { archetype: String },

    #[error("no non-colliding placement found after {attempts} attempts")]
    PlacementExhausted { attempts: u32 },
}
