//! Parameters of the block-DCT descriptor.
//!
//! Defaults match the common handwriting setup: 8×8 tiles, ten zig-zag
//! coefficients per tile, table quantization, exact tile grids only.

use crate::error::DescriptorError;
use crate::tiles::BoundaryPolicy;
use crate::transform::TransformBackend;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockDctParams {
    /// Tile height in pixels (>= 1).
    pub tile_height: usize,
    /// Tile width in pixels (>= 1).
    pub tile_width: usize,
    /// Coefficients kept per tile, in zig-zag order (<= tile area).
    pub output_length: usize,
    /// Quantize coefficients before the scan. Only square tiles are
    /// quantized; non-square tiles are scanned unquantized.
    pub quantize: bool,
    /// Handling of tiles that overhang the image.
    pub boundary: BoundaryPolicy,
    /// Transform evaluation strategy.
    pub backend: TransformBackend,
}

impl Default for BlockDctParams {
    fn default() -> Self {
        Self {
            tile_height: 8,
            tile_width: 8,
            output_length: 10,
            quantize: true,
            boundary: BoundaryPolicy::Reject,
            backend: TransformBackend::Fast,
        }
    }
}

impl BlockDctParams {
    /// Unquantized parameters for `tile_height × tile_width` tiles keeping
    /// `output_length` coefficients each.
    pub fn new(tile_height: usize, tile_width: usize, output_length: usize) -> Self {
        Self {
            tile_height,
            tile_width,
            output_length,
            quantize: false,
            ..Default::default()
        }
    }

    pub fn with_quantize(mut self, quantize: bool) -> Self {
        self.quantize = quantize;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_backend(mut self, backend: TransformBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Samples per tile, `None` if the product overflows `usize`.
    #[inline]
    pub fn tile_area(&self) -> Option<usize> {
        self.tile_height.checked_mul(self.tile_width)
    }

    /// True when the tile is square and quantization is enabled.
    #[inline]
    pub fn quantizes_tiles(&self) -> bool {
        self.quantize && self.tile_height == self.tile_width
    }

    /// Check the caller contract independent of any image.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        let invalid = DescriptorError::InvalidTileSize {
            height: self.tile_height,
            width: self.tile_width,
        };
        if self.tile_height == 0 || self.tile_width == 0 {
            return Err(invalid);
        }
        let capacity = self.tile_area().ok_or(invalid)?;
        if self.output_length > capacity {
            return Err(DescriptorError::OutputLengthExceedsTile {
                requested: self.output_length,
                capacity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflowing_tile_area_is_an_invalid_tile_size() {
        let params = BlockDctParams::new(usize::MAX / 2, 4, 1);
        assert_eq!(params.tile_area(), None);
        assert_eq!(
            params.validate(),
            Err(DescriptorError::InvalidTileSize {
                height: usize::MAX / 2,
                width: 4
            })
        );
    }

    #[test]
    fn non_square_quantized_params_are_valid() {
        let params = BlockDctParams::new(4, 8, 5).with_quantize(true);
        assert_eq!(params.validate(), Ok(()));
        assert!(!params.quantizes_tiles());
        assert!(BlockDctParams::default().quantizes_tiles());
    }
}
