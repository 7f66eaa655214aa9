//! Coefficient quantization for square tiles.
//!
//! Non-square grids are left unquantized.
//!
//! Two regimes, selected by tile side `b` and coefficients kept per tile `s`:
//!
//! - `b > 8 && s > 8`: dynamic normalization. Every coefficient, DC included,
//!   is divided by the largest AC magnitude of the tile. A tile without AC
//!   energy (uniform ink or paper) is left untouched; AC magnitudes at the
//!   level of transform rounding noise count as no energy.
//! - otherwise: each coefficient `(k, l)` inside the top-left 8×8 block is
//!   divided by the reference luminance divisor at `(k, l)`, DC included.
//!   Coefficients outside that block have no divisor and keep their value;
//!   the first eight zig-zag positions never reach them.
use crate::transform::CoefficientGrid;
use log::trace;

/// AC magnitudes at or below `DEGENERATE_AC_RATIO · max(|DC|, 1)` are
/// rounding noise of the transform, not signal.
pub const DEGENERATE_AC_RATIO: f64 = 1e-12;

/// Side of the reference quantization table.
pub const TABLE_SIDE: usize = 8;

/// Reference luminance quantization divisors, row-major.
pub static QUANTIZATION_TABLE: [[f64; TABLE_SIDE]; TABLE_SIDE] = [
    [16.0, 11.0, 10.0, 16.0, 24.0, 40.0, 51.0, 61.0],
    [12.0, 12.0, 14.0, 19.0, 26.0, 58.0, 60.0, 55.0],
    [14.0, 13.0, 16.0, 24.0, 40.0, 57.0, 69.0, 56.0],
    [14.0, 17.0, 22.0, 29.0, 51.0, 87.0, 80.0, 62.0],
    [18.0, 22.0, 37.0, 56.0, 68.0, 109.0, 103.0, 77.0],
    [24.0, 35.0, 55.0, 64.0, 81.0, 104.0, 113.0, 92.0],
    [49.0, 64.0, 78.0, 87.0, 103.0, 121.0, 120.0, 101.0],
    [72.0, 92.0, 95.0, 98.0, 112.0, 100.0, 103.0, 99.0],
];

/// Which rule was applied to a tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuantizeOutcome {
    /// Divided by the reference table.
    Table,
    /// Divided by the largest AC magnitude.
    Normalized { max_ac: f64 },
    /// Normalization regime, but every AC magnitude was zero, i.e. at or
    /// below `DEGENERATE_AC_RATIO · max(|DC|, 1)`. The grid is unchanged.
    Degenerate,
    /// Non-square grid; no rule applies and the grid is unchanged.
    NotSquare,
}

/// True when a `side × side` tile keeping `output_length` coefficients is
/// normalized dynamically instead of divided by the table.
#[inline]
pub fn uses_dynamic_normalization(side: usize, output_length: usize) -> bool {
    side > TABLE_SIDE && output_length > TABLE_SIDE
}

/// Quantize `grid` in place.
pub fn quantize(grid: &mut CoefficientGrid, output_length: usize) -> QuantizeOutcome {
    if !grid.is_square() {
        trace!(
            "quantize: {}x{} tile is not square, left unquantized",
            grid.height(),
            grid.width()
        );
        return QuantizeOutcome::NotSquare;
    }
    let side = grid.width();

    if uses_dynamic_normalization(side, output_length) {
        let max_ac = grid
            .as_slice()
            .iter()
            .skip(1)
            .fold(0.0f64, |m, v| m.max(v.abs()));
        let noise_floor = DEGENERATE_AC_RATIO * grid.dc().abs().max(1.0);
        if max_ac <= noise_floor {
            trace!("quantize: {side}x{side} tile has no AC energy, normalization skipped");
            return QuantizeOutcome::Degenerate;
        }
        debug_assert!(max_ac.is_finite() && max_ac > 0.0, "division by {max_ac}");
        for v in grid.as_mut_slice() {
            *v /= max_ac;
        }
        return QuantizeOutcome::Normalized { max_ac };
    }

    let limit = side.min(TABLE_SIDE);
    for (k, divisors) in QUANTIZATION_TABLE.iter().enumerate().take(limit) {
        for (l, &q) in divisors.iter().enumerate().take(limit) {
            let v = grid.get(k, l);
            grid.set(k, l, v / q);
        }
    }
    QuantizeOutcome::Table
}
