//! Grayscale image buffers and the intensity interface read by the descriptor.
pub mod f32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::traits::{ImageView, ImageViewMut, IntensitySource, Rows};
pub use self::u8::ImageU8;
