//! Tile-scoped scratch buffers reused across tiles of one extraction.
use crate::transform::CoefficientGrid;

/// Sample, coefficient and column buffers sized for one tile shape.
///
/// Every buffer is overwritten per tile; nothing carries over between tiles.
#[derive(Clone, Debug)]
pub struct TileWorkspace {
    pub(crate) samples: Vec<f64>,
    pub(crate) coefficients: CoefficientGrid,
    pub(crate) column: Vec<f64>,
}

impl TileWorkspace {
    pub fn new(tile_height: usize, tile_width: usize) -> Self {
        Self {
            samples: vec![0.0; tile_height * tile_width],
            coefficients: CoefficientGrid::zeros(tile_height, tile_width),
            column: Vec::with_capacity(tile_height),
        }
    }

    /// Coefficients of the most recently processed tile, after quantization.
    pub fn coefficients(&self) -> &CoefficientGrid {
        &self.coefficients
    }
}
