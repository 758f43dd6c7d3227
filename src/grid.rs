//! The static puzzle description: dimensions, black cells, and zones.

use std::num::NonZero;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::location::{Coord, Dimension, Location};

/// Reasons a [`Grid`] cannot be constructed.
///
/// Construction is the only validation point: a [`Grid`] that exists is in range, so
/// [`encode`](crate::encode::encode) never has to re-check its input.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum GridError {
    /// A dimension was zero.
    #[error("grid dimensions must be positive")]
    ZeroDimension,
    /// A black cell or zone member lies outside `[0, width) x [0, height)`.
    #[error("cell ({0}, {1}) is out of bounds", .cell.0, .cell.1)]
    OutOfBounds {
        /// The offending coordinate.
        cell: Location,
    },
    /// A zone contains no cells. An empty zone can never hold its balloon and stone.
    #[error("zone {index} is empty")]
    EmptyZone {
        /// Position of the zone in the zone list.
        index: usize,
    },
    /// The same cell appears twice in one zone.
    #[error("zone {index} lists cell ({0}, {1}) twice", .cell.0, .cell.1)]
    DuplicateCell {
        /// Position of the zone in the zone list.
        index: usize,
        /// The repeated coordinate.
        cell: Location,
    },
}

/// An immutable Dosun Fuwari grid: `width x height` cells, some black, partitioned into zones.
///
/// Zones are kept in the order given; clause emission order (and so DIMACS file order) follows it.
/// Whether the zones actually partition the non-black cells is not enforced; overlapping or
/// non-covering zones simply encode to a formula with the corresponding meaning.
///
/// Serialization round-trips through the JSON grid format:
/// `{"width": w, "height": h, "blacks": [[x, y], ...], "zones": [[[x, y], ...], ...]}`,
/// with full validation on deserialization.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(try_from = "RawGrid", into = "RawGrid")]
pub struct Grid {
    dims: (Dimension, Dimension),
    blacks: Vec<Location>,
    zones: Vec<Vec<Location>>,
}

impl Grid {
    /// Construct and validate a grid. See [`GridError`] for the rejection conditions.
    pub fn new(
        width: Coord,
        height: Coord,
        blacks: Vec<Location>,
        zones: Vec<Vec<Location>>,
    ) -> Result<Self, GridError> {
        let dims = match (NonZero::new(width), NonZero::new(height)) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(GridError::ZeroDimension),
        };

        for cell in blacks.iter() {
            if !cell.in_bounds(dims) {
                return Err(GridError::OutOfBounds { cell: *cell });
            }
        }

        for (index, zone) in zones.iter().enumerate() {
            if zone.is_empty() {
                return Err(GridError::EmptyZone { index });
            }
            for (pos, cell) in zone.iter().enumerate() {
                if !cell.in_bounds(dims) {
                    return Err(GridError::OutOfBounds { cell: *cell });
                }
                if zone[..pos].contains(cell) {
                    return Err(GridError::DuplicateCell { index, cell: *cell });
                }
            }
        }

        Ok(Self { dims, blacks, zones })
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> Coord {
        self.dims.0.get()
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> Coord {
        self.dims.1.get()
    }

    /// Both dimensions at once, `(width, height)`, in the form [`Numbering::new`](crate::Numbering::new)
    /// and [`decode`](crate::decode::decode) take them.
    #[inline]
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// The black cells, in the order given at construction.
    pub fn blacks(&self) -> &[Location] {
        &self.blacks
    }

    /// The zones, in the order given at construction.
    pub fn zones(&self) -> &[Vec<Location>] {
        &self.zones
    }

    /// Whether the cell at `location` is black.
    pub fn is_black(&self, location: Location) -> bool {
        self.blacks.contains(&location)
    }
}

/// The JSON grid format, before validation. [`Grid`] serde goes through this mirror.
#[derive(Clone, Deserialize, Serialize)]
struct RawGrid {
    width: Coord,
    height: Coord,
    blacks: Vec<[Coord; 2]>,
    zones: Vec<Vec<[Coord; 2]>>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Self::new(
            raw.width,
            raw.height,
            raw.blacks.into_iter().map(Location::from).collect(),
            raw.zones
                .into_iter()
                .map(|zone| zone.into_iter().map(Location::from).collect())
                .collect(),
        )
    }
}

impl From<Grid> for RawGrid {
    fn from(grid: Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            blacks: grid.blacks.into_iter().map(<[Coord; 2]>::from).collect(),
            zones: grid
                .zones
                .into_iter()
                .map(|zone| zone.into_iter().map(<[Coord; 2]>::from).collect())
                .collect(),
        }
    }
}
