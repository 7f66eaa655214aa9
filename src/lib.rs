#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod descriptor;
pub mod error;
pub mod features;
pub mod image;

// Pipeline stages – public for tools and tests that drive one stage at a time.
pub mod config;
pub mod quantize;
pub mod tiles;
pub mod transform;
pub mod zigzag;

// --- High-level re-exports -------------------------------------------------

pub use crate::descriptor::{
    compute_block_transform_descriptor, BlockDctExtractor, BlockDctParams, DescriptorReport,
};
pub use crate::error::DescriptorError;
pub use crate::features::{DescriptorKind, Features};
pub use crate::tiles::BoundaryPolicy;
pub use crate::transform::TransformBackend;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::image::{ImageF32, ImageU8, IntensitySource};
    pub use crate::{
        BlockDctExtractor, BlockDctParams, BoundaryPolicy, DescriptorError, TransformBackend,
    };
}
