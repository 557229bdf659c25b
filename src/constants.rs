//! Centralized constants for the mood-map crate
//!
//! Values shared between the projection, the cluster engine and the caller
//! layers live here so the modules agree on them.

/// Map projection constants
pub mod projection {
    /// Side of the projected world square in map units (2^28)
    pub const WORLD_SIZE: f64 = 268_435_456.0;

    /// Latitude limit of the Web Mercator projection in degrees
    pub const MAX_LATITUDE: f64 = 85.051_128_78;
}

/// Cluster engine constants
pub mod cluster {
    /// Number of cell columns in every grid
    pub const COLUMN_COUNT: usize = 3;

    /// Number of marker slots per cell
    pub const SLOT_COUNT: usize = 3;

    /// Cell width as a fraction of viewport width
    pub const CELL_WIDTH_RATIO: f64 = 0.5;

    /// Cell height as a fraction of viewport width
    pub const CELL_HEIGHT_RATIO: f64 = 0.7;

    /// Largest bucket that is shown without reduction
    pub const PASS_THROUGH_LIMIT: usize = 7;

    /// Most cell rows a grid may have; taller viewports are rejected
    pub const MAX_ROW_COUNT: usize = 10_001;

    /// Divisor from square side to slot radius, so three circles fit the square
    pub const SLOT_RADIUS_DIVISOR: f64 = 3.931_851_652_58;

    /// Offset of the two shifted slots, in slot radii
    pub const SLOT_OFFSET_FACTOR: f64 = 1.52;

    /// Debug overlay inset, as a fraction of the shorter cell side
    pub const OVERLAY_INSET_DIVISOR: f64 = 70.0;
}

/// Demo data settings
pub mod demo {
    /// Projected units of viewport width per demo post
    pub const POST_SPACING: f64 = 1500.0;

    /// Most demo posts generated in one request
    pub const MAX_POSTS: usize = 10_000;
}
