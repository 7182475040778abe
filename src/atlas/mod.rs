//! Fixed 2x2 atlas composition.
//!
//! Four cells are pasted into fixed quadrants of a square RGBA raster.
//! There is no packing: every cell is the same size and every quadrant
//! position is known up front.

mod builder;
pub mod cell;

pub use builder::{AtlasBuilder, CloudAtlas};
pub use cell::{prepare_cell, PreparedCell};

/// Largest atlas edge length the builder accepts.
pub const MAX_ATLAS_SIZE: u32 = 16384;

/// One quadrant of the 2x2 atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// All quadrants in build order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Position of this quadrant in `ALL`.
    pub fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }

    /// Pixel offset of the quadrant's top-left corner.
    pub fn offset(self, cell_size: u32) -> (u32, u32) {
        match self {
            Quadrant::TopLeft => (0, 0),
            Quadrant::TopRight => (cell_size, 0),
            Quadrant::BottomLeft => (0, cell_size),
            Quadrant::BottomRight => (cell_size, cell_size),
        }
    }
}
