//! Unnormalized separable 2D DCT-II over one tile.
//!
//! Coefficients follow the FFTW `REDFT10` scale on each axis:
//!
//! `Y[k] = 2 Σ_{j=0}^{n-1} x[j] cos(π (2j + 1) k / (2n))`
//!
//! applied along rows, then along columns. A constant tile of value `c` and
//! size `h × w` therefore has `DC = 4·c·h·w` and zero AC terms. The reference
//! quantization table is tuned to this scale.
//!
//! Two interchangeable backends:
//! - `Fast`: planned DCT-II per axis via `rustdct`, O(n log n) per line.
//! - `Direct`: basis projection `C_h · X · C_wᵀ` with `nalgebra`.
use nalgebra::DMatrix;
use rustdct::{Dct2, DctPlanner, TransformType2And3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::Arc;

/// Per-axis gain from `rustdct`'s DCT-II (`Σ …`) to the `2 Σ …` convention.
const AXIS_GAIN: f64 = 2.0;

/// Algorithm used to evaluate the transform. Both produce the same values up
/// to floating-point rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformBackend {
    #[default]
    Fast,
    Direct,
}

/// `height × width` transform coefficients in row-major order. `[0][0]` is DC.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientGrid {
    height: usize,
    width: usize,
    data: Vec<f64>,
}

impl CoefficientGrid {
    pub fn zeros(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            data: vec![0.0; height * width],
        }
    }

    pub fn from_row_major(height: usize, width: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            height * width,
            "coefficient buffer does not match {height}x{width}"
        );
        Self {
            height,
            width,
            data,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    #[inline]
    pub fn is_square(&self) -> bool {
        self.height == self.width
    }
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: f64) {
        self.data[row * self.width + col] = v;
    }
    #[inline]
    pub fn dc(&self) -> f64 {
        self.data[0]
    }
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

enum Plan {
    Fast {
        // `None` for length-1 axes, where the DCT-II is the identity.
        rows: Option<Arc<dyn TransformType2And3<f64>>>,
        cols: Option<Arc<dyn TransformType2And3<f64>>>,
    },
    Direct {
        basis_h: DMatrix<f64>,
        basis_w_t: DMatrix<f64>,
    },
}

/// Transform planned for one tile shape; reused across every tile.
pub struct SpectralTransform {
    height: usize,
    width: usize,
    backend: TransformBackend,
    plan: Plan,
}

impl SpectralTransform {
    pub fn new(height: usize, width: usize, backend: TransformBackend) -> Self {
        assert!(
            height > 0 && width > 0,
            "transform requires a non-empty tile, got {height}x{width}"
        );
        let plan = match backend {
            TransformBackend::Fast => {
                let mut planner = DctPlanner::new();
                let mut plan_axis = |n: usize| (n > 1).then(|| planner.plan_dct2(n));
                let rows = plan_axis(width);
                let cols = plan_axis(height);
                Plan::Fast { rows, cols }
            }
            TransformBackend::Direct => Plan::Direct {
                basis_h: dct2_basis(height),
                basis_w_t: dct2_basis(width).transpose(),
            },
        };
        Self {
            height,
            width,
            backend,
            plan,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn backend(&self) -> TransformBackend {
        self.backend
    }

    /// Transform `samples` (row-major, `height × width`) into `grid`.
    ///
    /// `column` is scratch space for the column pass and is resized as needed.
    pub fn forward(&self, samples: &[f64], grid: &mut CoefficientGrid, column: &mut Vec<f64>) {
        let (h, w) = (self.height, self.width);
        assert_eq!(samples.len(), h * w, "sample buffer does not match tile");
        assert!(
            grid.height == h && grid.width == w,
            "coefficient grid {}x{} does not match tile {h}x{w}",
            grid.height,
            grid.width
        );

        match &self.plan {
            Plan::Fast { rows, cols } => {
                let out = grid.as_mut_slice();
                out.copy_from_slice(samples);
                if let Some(dct) = rows {
                    for row in out.chunks_exact_mut(w) {
                        dct.process_dct2(row);
                    }
                }
                if let Some(dct) = cols {
                    column.clear();
                    column.resize(h, 0.0);
                    for x in 0..w {
                        for (y, c) in column.iter_mut().enumerate() {
                            *c = out[y * w + x];
                        }
                        dct.process_dct2(column.as_mut_slice());
                        for (y, &c) in column.iter().enumerate() {
                            out[y * w + x] = c;
                        }
                    }
                }
                let gain = AXIS_GAIN * AXIS_GAIN;
                for v in out.iter_mut() {
                    *v *= gain;
                }
            }
            Plan::Direct { basis_h, basis_w_t } => {
                let x = DMatrix::from_row_slice(h, w, samples);
                let y = basis_h * x * basis_w_t;
                let out = grid.as_mut_slice();
                for r in 0..h {
                    for c in 0..w {
                        out[r * w + c] = y[(r, c)];
                    }
                }
            }
        }
    }

    /// Convenience wrapper allocating a fresh grid.
    pub fn transform(&self, samples: &[f64]) -> CoefficientGrid {
        let mut grid = CoefficientGrid::zeros(self.height, self.width);
        let mut column = Vec::with_capacity(self.height);
        self.forward(samples, &mut grid, &mut column);
        grid
    }
}

impl std::fmt::Debug for SpectralTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectralTransform")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("backend", &self.backend)
            .finish()
    }
}

/// `n × n` DCT-II basis; row `k` holds `2 cos(π (2j + 1) k / 2n)` over `j`.
fn dct2_basis(n: usize) -> DMatrix<f64> {
    let denom = (2 * n) as f64;
    DMatrix::from_fn(n, n, |k, j| {
        AXIS_GAIN * (PI * (2 * j + 1) as f64 * k as f64 / denom).cos()
    })
}
