//! Block-DCT descriptor extraction.
//!
//! The extractor walks the tile raster of an image (strip by strip, left to
//! right), transforms each tile with the unnormalized DCT-II, optionally
//! quantizes the coefficients, and appends the first `output_length`
//! zig-zag coefficients of the tile to the feature vector.
//!
//! Tiles are independent. With the `parallel` feature they are processed on
//! the rayon pool, each worker with its own [`TileWorkspace`]; results are
//! reassembled by tile index so the output is identical to the sequential
//! path.

pub mod params;
pub mod workspace;

#[cfg(test)]
mod tests;

pub use params::BlockDctParams;
pub use workspace::TileWorkspace;

use crate::error::DescriptorError;
use crate::image::IntensitySource;
use crate::quantize::{quantize, QuantizeOutcome};
use crate::tiles::{Tile, TileGrid};
use crate::transform::SpectralTransform;
use crate::zigzag::ZigZagOrder;
use log::{debug, warn};
use serde::Serialize;
use std::time::Instant;

/// Feature vector plus a summary of how it was produced.
#[derive(Clone, Debug, Serialize)]
pub struct DescriptorReport {
    /// `output_length` values per tile, tiles in raster order.
    pub features: Vec<f64>,
    /// Number of tile strips.
    pub tile_rows: usize,
    /// Tiles per strip.
    pub tile_cols: usize,
    pub output_length: usize,
    /// Quantization was requested and the tiles are square.
    pub quantized: bool,
    /// True if trailing tiles were clamped or padded.
    pub partial_tiles: bool,
    /// Tiles whose dynamic normalization was skipped for lack of AC energy.
    pub degenerate_tiles: usize,
    pub elapsed_ms: f64,
}

impl DescriptorReport {
    pub fn tile_count(&self) -> usize {
        self.tile_rows * self.tile_cols
    }

    /// The slice of `features` contributed by tile `index`.
    pub fn tile_features(&self, index: usize) -> &[f64] {
        let start = index * self.output_length;
        &self.features[start..start + self.output_length]
    }
}

struct TileRun {
    features: Vec<f64>,
    degenerate: usize,
}

/// Block-DCT extractor with the transform plan and scan order prepared for
/// one tile shape. Reusable across images.
#[derive(Debug)]
pub struct BlockDctExtractor {
    params: BlockDctParams,
    transform: SpectralTransform,
    zigzag: ZigZagOrder,
}

impl BlockDctExtractor {
    pub fn new(params: BlockDctParams) -> Result<Self, DescriptorError> {
        params.validate()?;
        Ok(Self {
            transform: SpectralTransform::new(
                params.tile_height,
                params.tile_width,
                params.backend,
            ),
            zigzag: ZigZagOrder::new(params.tile_height, params.tile_width),
            params,
        })
    }

    pub fn params(&self) -> &BlockDctParams {
        &self.params
    }

    /// Fresh scratch buffers sized for this extractor's tiles.
    pub fn workspace(&self) -> TileWorkspace {
        TileWorkspace::new(self.params.tile_height, self.params.tile_width)
    }

    /// Tile raster for `image` under the configured boundary policy.
    pub fn tile_grid<I: IntensitySource + ?Sized>(
        &self,
        image: &I,
    ) -> Result<TileGrid, DescriptorError> {
        TileGrid::new(
            image.width(),
            image.height(),
            self.params.tile_height,
            self.params.tile_width,
            self.params.boundary,
        )
    }

    /// Feature vector only.
    pub fn features<I: IntensitySource + Sync + ?Sized>(
        &self,
        image: &I,
    ) -> Result<Vec<f64>, DescriptorError> {
        Ok(self.extract(image)?.features)
    }

    /// Extract the descriptor, in parallel when the `parallel` feature is on.
    pub fn extract<I: IntensitySource + Sync + ?Sized>(
        &self,
        image: &I,
    ) -> Result<DescriptorReport, DescriptorError> {
        let start = Instant::now();
        let grid = self.tile_grid(image)?;
        #[cfg(feature = "parallel")]
        let run = self.run_parallel(image, &grid)?;
        #[cfg(not(feature = "parallel"))]
        let run = self.run_sequential(image, &grid)?;
        Ok(self.report(&grid, run, start))
    }

    /// Extract the descriptor on the calling thread.
    pub fn extract_sequential<I: IntensitySource + ?Sized>(
        &self,
        image: &I,
    ) -> Result<DescriptorReport, DescriptorError> {
        let start = Instant::now();
        let grid = self.tile_grid(image)?;
        let run = self.run_sequential(image, &grid)?;
        Ok(self.report(&grid, run, start))
    }

    /// Sample, transform, quantize and scan one tile, appending its
    /// coefficients to `out`. Returns the quantization outcome, if the tile
    /// was quantized.
    pub fn process_tile<I: IntensitySource + ?Sized>(
        &self,
        image: &I,
        grid: &TileGrid,
        tile: Tile,
        workspace: &mut TileWorkspace,
        out: &mut Vec<f64>,
    ) -> Result<Option<QuantizeOutcome>, DescriptorError> {
        grid.sample(image, tile, &mut workspace.samples);
        self.transform.forward(
            &workspace.samples,
            &mut workspace.coefficients,
            &mut workspace.column,
        );
        let outcome = if self.params.quantizes_tiles() {
            Some(quantize(
                &mut workspace.coefficients,
                self.params.output_length,
            ))
        } else {
            None
        };
        self.zigzag.scan_into(
            workspace.coefficients.as_slice(),
            self.params.output_length,
            out,
        )?;
        Ok(outcome)
    }

    fn run_sequential<I: IntensitySource + ?Sized>(
        &self,
        image: &I,
        grid: &TileGrid,
    ) -> Result<TileRun, DescriptorError> {
        let mut workspace = self.workspace();
        let mut features = Vec::with_capacity(grid.len() * self.params.output_length);
        let mut degenerate = 0usize;
        for tile in grid.iter() {
            let outcome = self.process_tile(image, grid, tile, &mut workspace, &mut features)?;
            if outcome == Some(QuantizeOutcome::Degenerate) {
                degenerate += 1;
            }
        }
        Ok(TileRun {
            features,
            degenerate,
        })
    }

    #[cfg(feature = "parallel")]
    fn run_parallel<I: IntensitySource + Sync + ?Sized>(
        &self,
        image: &I,
        grid: &TileGrid,
    ) -> Result<TileRun, DescriptorError> {
        use rayon::prelude::*;

        let per_tile = (0..grid.len())
            .into_par_iter()
            .map_init(
                || self.workspace(),
                |workspace, index| -> Result<(Vec<f64>, bool), DescriptorError> {
                    let mut out = Vec::with_capacity(self.params.output_length);
                    let outcome =
                        self.process_tile(image, grid, grid.tile(index), workspace, &mut out)?;
                    Ok((out, outcome == Some(QuantizeOutcome::Degenerate)))
                },
            )
            .collect::<Result<Vec<_>, DescriptorError>>()?;

        let mut features = Vec::with_capacity(grid.len() * self.params.output_length);
        let mut degenerate = 0usize;
        for (values, is_degenerate) in per_tile {
            features.extend_from_slice(&values);
            degenerate += usize::from(is_degenerate);
        }
        Ok(TileRun {
            features,
            degenerate,
        })
    }

    fn report(&self, grid: &TileGrid, run: TileRun, start: Instant) -> DescriptorReport {
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        if grid.is_empty() {
            warn!(
                "BlockDct: image {}x{} holds no {}x{} tiles, descriptor is empty",
                grid.image_width, grid.image_height, grid.tile_height, grid.tile_width
            );
        }
        let partial_tiles = grid.has_partial_tiles();
        if partial_tiles {
            debug!(
                "BlockDct: trailing tiles of {}x{} image sampled with {:?}",
                grid.image_width, grid.image_height, grid.policy
            );
        }
        debug!(
            "BlockDct: {}x{} tiles of {}x{} -> {} values ({:?}, quantize={}, degenerate={}) in {:.3} ms",
            grid.rows,
            grid.cols,
            grid.tile_height,
            grid.tile_width,
            run.features.len(),
            self.transform.backend(),
            self.params.quantizes_tiles(),
            run.degenerate,
            elapsed_ms
        );
        DescriptorReport {
            features: run.features,
            tile_rows: grid.rows,
            tile_cols: grid.cols,
            output_length: self.params.output_length,
            quantized: self.params.quantizes_tiles(),
            partial_tiles,
            degenerate_tiles: run.degenerate,
            elapsed_ms,
        }
    }
}

/// One-shot block-DCT descriptor with exact tile grids and the fast backend.
///
/// Returns `tile_rows × tile_cols × output_length` values in tile-raster order.
pub fn compute_block_transform_descriptor<I: IntensitySource + Sync + ?Sized>(
    image: &I,
    tile_height: usize,
    tile_width: usize,
    output_length: usize,
    quantize: bool,
) -> Result<Vec<f64>, DescriptorError> {
    let params =
        BlockDctParams::new(tile_height, tile_width, output_length).with_quantize(quantize);
    BlockDctExtractor::new(params)?.features(image)
}
