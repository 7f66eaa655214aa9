//! Raster of non-overlapping tiles over an image and per-tile sampling.
//!
//! Tiles are visited row-major: a full horizontal strip of tiles left to right,
//! then the next strip down. When the tile size does not divide the image the
//! [`BoundaryPolicy`] decides between rejecting the configuration and sampling
//! the trailing partial tiles with clamped or padded reads.
use crate::error::DescriptorError;
use crate::image::IntensitySource;
use serde::{Deserialize, Serialize};

/// Handling of tiles that extend past the right or bottom image edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Tile size must divide the image; anything else is an error.
    #[default]
    Reject,
    /// Out-of-image samples repeat the last column/row.
    Clamp,
    /// Out-of-image samples read this constant intensity.
    Pad(f32),
}

/// One tile of the grid. `row0`/`col0` are image coordinates of its top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub index: usize,
    pub row0: usize,
    pub col0: usize,
}

/// Geometry of the tile raster for one image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGrid {
    pub image_width: usize,
    pub image_height: usize,
    pub tile_height: usize,
    pub tile_width: usize,
    /// Number of tile strips (vertical count).
    pub rows: usize,
    /// Tiles per strip (horizontal count).
    pub cols: usize,
    pub policy: BoundaryPolicy,
}

impl TileGrid {
    pub fn new(
        image_width: usize,
        image_height: usize,
        tile_height: usize,
        tile_width: usize,
        policy: BoundaryPolicy,
    ) -> Result<Self, DescriptorError> {
        if tile_height == 0 || tile_width == 0 {
            return Err(DescriptorError::InvalidTileSize {
                height: tile_height,
                width: tile_width,
            });
        }
        let divides = image_height % tile_height == 0 && image_width % tile_width == 0;
        if !divides && policy == BoundaryPolicy::Reject {
            return Err(DescriptorError::TileGridMismatch {
                image_width,
                image_height,
                tile_width,
                tile_height,
            });
        }
        Ok(Self {
            image_width,
            image_height,
            tile_height,
            tile_width,
            rows: image_height.div_ceil(tile_height),
            cols: image_width.div_ceil(tile_width),
            policy,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn tile_area(&self) -> usize {
        self.tile_height * self.tile_width
    }

    /// True if at least one tile extends past the image.
    pub fn has_partial_tiles(&self) -> bool {
        self.rows * self.tile_height != self.image_height
            || self.cols * self.tile_width != self.image_width
    }

    /// Tile at raster position `index`.
    pub fn tile(&self, index: usize) -> Tile {
        debug_assert!(index < self.len());
        Tile {
            index,
            row0: (index / self.cols) * self.tile_height,
            col0: (index % self.cols) * self.tile_width,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.len()).map(move |i| self.tile(i))
    }

    /// Read `tile`'s samples into `out` (row-major, `tile_height × tile_width`).
    pub fn sample<I: IntensitySource + ?Sized>(&self, image: &I, tile: Tile, out: &mut [f64]) {
        let (th, tw) = (self.tile_height, self.tile_width);
        assert_eq!(out.len(), th * tw, "sample buffer does not match tile");
        let last_x = self.image_width.saturating_sub(1);
        let last_y = self.image_height.saturating_sub(1);

        for (ty, row) in out.chunks_exact_mut(tw).enumerate() {
            let y = tile.row0 + ty;
            for (tx, dst) in row.iter_mut().enumerate() {
                let x = tile.col0 + tx;
                let inside = x < self.image_width && y < self.image_height;
                *dst = if inside {
                    image.intensity(x, y) as f64
                } else {
                    match self.policy {
                        BoundaryPolicy::Pad(fill) => fill as f64,
                        // `new` only admits exact grids under `Reject`.
                        BoundaryPolicy::Clamp | BoundaryPolicy::Reject => {
                            image.intensity(x.min(last_x), y.min(last_y)) as f64
                        }
                    }
                };
            }
        }
    }
}
