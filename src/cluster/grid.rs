//! Cluster cell grid and marker slots
//!
//! The viewport is covered by a fixed three-column grid whose cell size is
//! derived from the viewport width alone, so cluster shape follows the
//! horizontal zoom level. Each cell offers three slot positions where
//! synthetic markers can sit without overlapping.

use crate::constants::cluster::{
    COLUMN_COUNT, MAX_ROW_COUNT, OVERLAY_INSET_DIVISOR, SLOT_COUNT, SLOT_OFFSET_FACTOR,
    SLOT_RADIUS_DIVISOR,
};
use crate::error::{Error, Result};
use crate::geo::{MapPoint, MapRect, Viewport};
use serde::{Deserialize, Serialize};

/// Number of cell rows for a viewport
///
/// Always odd and at least 3, so one row straddles the vertical midpoint.
/// Fails with `InvalidViewport` when the grid would need more than
/// `MAX_ROW_COUNT` rows.
pub fn vertical_count(viewport: &Viewport, cell_height: f64) -> Result<usize> {
    let rows = (viewport.height / cell_height / 2.0).floor() * 2.0 + 3.0;
    if !rows.is_finite() || rows > MAX_ROW_COUNT as f64 {
        return Err(Error::InvalidViewport(format!(
            "Viewport {}x{} would need more than {} cell rows",
            viewport.width, viewport.height, MAX_ROW_COUNT
        )));
    }
    Ok(rows as usize)
}

/// Compute the grid of cluster cells covering a viewport
///
/// Cells are returned column-major: every row of column 0, then column 1,
/// then column 2. Assignment takes the first containing cell in this order.
///
/// The viewport must have a positive size.
pub fn cell_grid(
    viewport: &Viewport,
    width_ratio: f64,
    height_ratio: f64,
) -> Result<Vec<MapRect>> {
    let cell_width = viewport.width * width_ratio;
    let cell_height = viewport.width * height_ratio;
    let rows = vertical_count(viewport, cell_height)?;
    let columns = COLUMN_COUNT;

    let mid_x = viewport.mid_x();
    let mid_y = viewport.mid_y();

    let mut cells = Vec::with_capacity(columns * rows);
    for x in 0..columns {
        for y in 0..rows {
            let origin = MapPoint::new(
                mid_x - cell_width * (columns as f64 - 2.0 * x as f64) / 2.0,
                mid_y - cell_height * (rows as f64 - 2.0 * y as f64) / 2.0,
            );
            cells.push(MapRect::with_origin(origin, cell_width, cell_height));
        }
    }
    Ok(cells)
}

/// The three marker slots of a cell ("three-circle points")
///
/// Computed on the cell's centered inscribed square. Circles of radius `r`
/// around the slots tile the square without overlap; the layout is
/// deliberately asymmetric.
pub fn slot_positions(cell: &MapRect) -> [MapPoint; SLOT_COUNT] {
    let square = if cell.width != cell.height {
        cell.middle_square()
    } else {
        *cell
    };

    let side = square.width.min(square.height);
    let r = side / SLOT_RADIUS_DIVISOR;
    let p = SLOT_OFFSET_FACTOR * r;

    [
        MapPoint::new(square.min_x() + r, square.min_y() + r),
        MapPoint::new(square.max_x() - r, square.min_y() + p),
        MapPoint::new(square.min_x() + p, square.max_y() - r),
    ]
}

/// Debug overlay for one cell: its inset outline plus its slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellOverlay {
    /// The cell rectangle
    pub rect: MapRect,
    /// Closed polyline tracing the slightly inset cell
    pub outline: Vec<MapPoint>,
    /// Marker slot positions
    pub slots: [MapPoint; SLOT_COUNT],
}

impl CellOverlay {
    pub fn new(cell: &MapRect) -> Self {
        let inset = (cell.width / OVERLAY_INSET_DIVISOR).min(cell.height / OVERLAY_INSET_DIVISOR);
        Self {
            rect: *cell,
            outline: cell.inset_by(inset, inset).outline(),
            slots: slot_positions(cell),
        }
    }
}
