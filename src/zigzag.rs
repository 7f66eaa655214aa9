//! Anti-diagonal zig-zag scan over a `height × width` coefficient grid.
//!
//! The scan starts at DC and sweeps each anti-diagonal in alternating
//! direction, first along the top row. For a 3×3 grid the visited positions
//! are `(0,0) (0,1) (1,0) (2,0) (1,1) (0,2) (1,2) (2,1) (2,2)`; for 8×8 this is
//! the JPEG order. Rectangular grids are supported.
use crate::error::DescriptorError;
use crate::transform::CoefficientGrid;

/// Zig-zag order for one grid shape, stored as row-major indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZigZagOrder {
    height: usize,
    width: usize,
    order: Vec<usize>,
}

impl ZigZagOrder {
    pub fn new(height: usize, width: usize) -> Self {
        let total = height * width;
        let mut order = Vec::with_capacity(total);
        if total == 0 {
            return Self {
                height,
                width,
                order,
            };
        }

        // 1-based cursor: `x` is the column (≤ width), `y` the row (≤ height).
        let (mut x, mut y) = (1usize, 1usize);
        for _ in 0..total {
            order.push((y - 1) * width + (x - 1));
            if (x + y) % 2 == 0 {
                // up-right
                if x < width {
                    x += 1;
                } else {
                    y += 2;
                }
                if y > 1 {
                    y -= 1;
                }
            } else {
                // down-left
                if y < height {
                    y += 1;
                } else {
                    x += 2;
                }
                if x > 1 {
                    x -= 1;
                }
            }
        }

        Self {
            height,
            width,
            order,
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
        self.order.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Row-major indices in scan order.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.order
    }

    /// `(row, col)` positions in scan order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.order.iter().map(move |&i| (i / self.width, i % self.width))
    }

    /// Append the first `output_length` coefficients of `coefficients`
    /// (row-major, matching this order's shape) to `out`.
    pub fn scan_into(
        &self,
        coefficients: &[f64],
        output_length: usize,
        out: &mut Vec<f64>,
    ) -> Result<(), DescriptorError> {
        if output_length > self.order.len() {
            return Err(DescriptorError::OutputLengthExceedsTile {
                requested: output_length,
                capacity: self.order.len(),
            });
        }
        assert_eq!(
            coefficients.len(),
            self.order.len(),
            "coefficient buffer does not match {}x{} scan",
            self.height,
            self.width
        );
        out.extend(self.order[..output_length].iter().map(|&i| coefficients[i]));
        Ok(())
    }

    /// First `output_length` coefficients of `grid` in scan order.
    pub fn scan(
        &self,
        grid: &CoefficientGrid,
        output_length: usize,
    ) -> Result<Vec<f64>, DescriptorError> {
        let mut out = Vec::with_capacity(output_length.min(self.order.len()));
        self.scan_into(grid.as_slice(), output_length, &mut out)?;
        Ok(out)
    }
}

/// One-shot zig-zag linearization of `grid`, truncated to `output_length`.
pub fn zigzag(grid: &CoefficientGrid, output_length: usize) -> Result<Vec<f64>, DescriptorError> {
    ZigZagOrder::new(grid.height(), grid.width()).scan(grid, output_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_ZIGZAG: [usize; 64] = [
        0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, 12, 19, 26, 33, 40, 48, 41, 34,
        27, 20, 13, 6, 7, 14, 21, 28, 35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44,
        51, 58, 59, 52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
    ];

    #[test]
    fn three_by_three_order_is_pinned() {
        let order = ZigZagOrder::new(3, 3);
        let positions: Vec<_> = order.positions().collect();
        assert_eq!(
            positions,
            vec![
                (0, 0),
                (0, 1),
                (1, 0),
                (2, 0),
                (1, 1),
                (0, 2),
                (1, 2),
                (2, 1),
                (2, 2)
            ]
        );

        let grid = CoefficientGrid::from_row_major(
            3,
            3,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
        );
        let values = zigzag(&grid, 9).expect("full scan");
        assert_eq!(values, vec![1.0, 2.0, 4.0, 7.0, 5.0, 3.0, 6.0, 8.0, 9.0]);
    }

    #[test]
    fn eight_by_eight_matches_jpeg() {
        assert_eq!(ZigZagOrder::new(8, 8).indices(), &JPEG_ZIGZAG[..]);
    }

    #[test]
    fn rectangular_orders_follow_alternating_diagonals() {
        for (h, w) in [(2, 4), (4, 2), (1, 5), (5, 1), (3, 7), (6, 4), (1, 1)] {
            let order = ZigZagOrder::new(h, w);
            let positions: Vec<_> = order.positions().collect();
            assert_eq!(positions.len(), h * w, "{h}x{w}");

            let mut seen = vec![false; h * w];
            for &(r, c) in &positions {
                assert!(r < h && c < w, "{h}x{w}: ({r},{c}) out of bounds");
                assert!(!seen[r * w + c], "{h}x{w}: ({r},{c}) visited twice");
                seen[r * w + c] = true;
            }

            for pair in positions.windows(2) {
                let (d0, d1) = (pair[0].0 + pair[0].1, pair[1].0 + pair[1].1);
                assert!(d1 == d0 || d1 == d0 + 1, "{h}x{w}: diagonal jump {pair:?}");
                if d1 == d0 {
                    // Odd diagonals run down-left, even diagonals up-right.
                    let (dr, dc) = if d0 % 2 == 1 { (1, -1) } else { (-1, 1) };
                    assert_eq!(
                        (
                            pair[1].0 as isize - pair[0].0 as isize,
                            pair[1].1 as isize - pair[0].1 as isize
                        ),
                        (dr, dc),
                        "{h}x{w}: {pair:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn truncates_to_requested_length() {
        let grid = CoefficientGrid::from_row_major(2, 2, vec![10.0, 20.0, 30.0, 40.0]);
        assert_eq!(zigzag(&grid, 0).expect("empty"), Vec::<f64>::new());
        assert_eq!(zigzag(&grid, 3).expect("prefix"), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn over_long_request_is_a_contract_violation() {
        for (h, w) in [(1, 1), (3, 3), (4, 6), (8, 8)] {
            let grid = CoefficientGrid::zeros(h, w);
            assert_eq!(
                zigzag(&grid, h * w + 1),
                Err(DescriptorError::OutputLengthExceedsTile {
                    requested: h * w + 1,
                    capacity: h * w
                })
            );
        }
    }
}
