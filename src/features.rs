//! Facade over the descriptor families computed from one image.
//!
//! Every family reads the same [`IntensitySource`]. Only the block-DCT family
//! lives in this crate; [`DescriptorKind`] is the dispatch point for callers
//! that select families from configuration.

use crate::descriptor::{BlockDctExtractor, BlockDctParams};
use crate::error::DescriptorError;
use crate::image::IntensitySource;
use serde::{Deserialize, Serialize};

/// Descriptor family with its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorKind {
    BlockDct(BlockDctParams),
}

impl DescriptorKind {
    pub fn name(&self) -> &'static str {
        match self {
            DescriptorKind::BlockDct(_) => "block_dct",
        }
    }

    /// Values produced per image of `width × height`, if the configuration
    /// accepts that size.
    pub fn output_len(&self, width: usize, height: usize) -> Result<usize, DescriptorError> {
        match self {
            DescriptorKind::BlockDct(params) => {
                params.validate()?;
                let grid = crate::tiles::TileGrid::new(
                    width,
                    height,
                    params.tile_height,
                    params.tile_width,
                    params.boundary,
                )?;
                Ok(grid.len() * params.output_length)
            }
        }
    }
}

/// Borrowed image plus the descriptor entry points.
pub struct Features<'a, I: IntensitySource + Sync + ?Sized> {
    image: &'a I,
}

impl<'a, I: IntensitySource + Sync + ?Sized> Features<'a, I> {
    pub fn new(image: &'a I) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &'a I {
        self.image
    }

    /// Block-DCT coefficients, `output_length` per tile in raster order.
    pub fn block_dct(&self, params: BlockDctParams) -> Result<Vec<f64>, DescriptorError> {
        BlockDctExtractor::new(params)?.features(self.image)
    }

    pub fn compute(&self, kind: &DescriptorKind) -> Result<Vec<f64>, DescriptorError> {
        match kind {
            DescriptorKind::BlockDct(params) => self.block_dct(*params),
        }
    }
}
