//! Caller-contract violations reported by the descriptor pipeline.

/// Reasons a descriptor extraction is rejected before any tile is processed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DescriptorError {
    /// Tile height or width is zero, or the tile area overflows.
    InvalidTileSize { height: usize, width: usize },
    /// More coefficients requested per tile than the tile holds.
    OutputLengthExceedsTile { requested: usize, capacity: usize },
    /// Tile size does not divide the image and the boundary policy rejects
    /// partial tiles.
    TileGridMismatch {
        image_width: usize,
        image_height: usize,
        tile_width: usize,
        tile_height: usize,
    },
}

impl std::fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DescriptorError::InvalidTileSize { height, width } => {
                write!(f, "invalid tile size {height}x{width} (sides must be ≥1 with a representable area)")
            }
            DescriptorError::OutputLengthExceedsTile {
                requested,
                capacity,
            } => write!(
                f,
                "requested {requested} coefficients per tile but a tile only has {capacity}"
            ),
            DescriptorError::TileGridMismatch {
                image_width,
                image_height,
                tile_width,
                tile_height,
            } => write!(
                f,
                "image {image_width}x{image_height} is not a multiple of tile {tile_width}x{tile_height}"
            ),
        }
    }
}

impl std::error::Error for DescriptorError {}
