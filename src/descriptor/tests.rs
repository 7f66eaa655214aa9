use super::*;
use crate::image::ImageF32;
use crate::quantize::QUANTIZATION_TABLE;
use crate::tiles::BoundaryPolicy;
use crate::transform::{CoefficientGrid, TransformBackend};
use crate::zigzag::zigzag;

fn stroke_image(width: usize, height: usize) -> ImageF32 {
    // White page with a dark diagonal stroke.
    let mut img = ImageF32::filled(width, height, 1.0);
    for y in 0..height {
        for x in 0..width {
            if (x as isize - y as isize).abs() <= 1 {
                img.set(x, y, 0.1);
            }
        }
    }
    img
}

#[test]
fn single_tile_matches_manual_pipeline() {
    let img = stroke_image(8, 8);
    let extractor =
        BlockDctExtractor::new(BlockDctParams::new(8, 8, 12).with_quantize(true)).expect("params");
    let report = extractor.extract_sequential(&img).expect("exact grid");
    assert_eq!(report.features.len(), 12);

    let samples: Vec<f64> = img.data.iter().map(|&v| v as f64).collect();
    let mut grid = SpectralTransform::new(8, 8, TransformBackend::Direct).transform(&samples);
    for k in 0..8 {
        for l in 0..8 {
            let v = grid.get(k, l);
            grid.set(k, l, v / QUANTIZATION_TABLE[k][l]);
        }
    }
    let expected = zigzag(&grid, 12).expect("scan");
    for (a, e) in report.features.iter().zip(&expected) {
        assert!((a - e).abs() < 1e-9, "{a} vs {e}");
    }
}

#[test]
fn workspace_holds_last_tile_coefficients() {
    let img = ImageF32::filled(4, 4, 0.5);
    let extractor = BlockDctExtractor::new(BlockDctParams::new(4, 4, 3)).expect("params");
    let grid = extractor.tile_grid(&img).expect("exact grid");
    let mut ws = extractor.workspace();
    let mut out = Vec::new();
    let outcome = extractor
        .process_tile(&img, &grid, grid.tile(0), &mut ws, &mut out)
        .expect("tile");
    assert_eq!(outcome, None);
    assert_eq!(out.len(), 3);
    // 4 · 0.5 · 16
    assert!((ws.coefficients().dc() - 32.0).abs() < 1e-9);
    assert!((out[0] - 32.0).abs() < 1e-9);
    assert!(out[1].abs() < 1e-9 && out[2].abs() < 1e-9);
}

#[test]
fn uniform_tiles_are_counted_as_degenerate() {
    // Left tile blank, right tile carries a stroke.
    let mut img = ImageF32::filled(32, 16, 1.0);
    for y in 0..16 {
        img.set(24, y, 0.0);
    }
    let extractor =
        BlockDctExtractor::new(BlockDctParams::new(16, 16, 20).with_quantize(true)).expect("params");
    let report = extractor.extract_sequential(&img).expect("exact grid");
    assert_eq!(report.tile_count(), 2);
    assert_eq!(report.degenerate_tiles, 1);

    let blank = report.tile_features(0);
    assert!((blank[0] - 4.0 * 256.0).abs() < 1e-9, "unscaled DC, got {}", blank[0]);
    assert!(blank[1..].iter().all(|v| v.abs() < 1e-9));

    let stroke = report.tile_features(1);
    let max_ac = stroke[1..].iter().fold(0.0f64, |m, v| m.max(v.abs()));
    assert!(max_ac <= 1.0 + 1e-12);
    assert!(stroke.iter().all(|v| v.is_finite()));
}

#[test]
fn report_describes_the_grid() {
    let img = stroke_image(20, 12);
    let params = BlockDctParams::new(8, 8, 5).with_boundary(BoundaryPolicy::Pad(1.0));
    let report = BlockDctExtractor::new(params)
        .expect("params")
        .extract_sequential(&img)
        .expect("padded grid");
    assert_eq!((report.tile_rows, report.tile_cols), (2, 3));
    assert!(report.partial_tiles);
    assert!(!report.quantized);
    assert_eq!(report.features.len(), 6 * 5);
    assert!(report.elapsed_ms >= 0.0);
}

#[test]
fn invalid_parameters_fail_before_extraction() {
    assert_eq!(
        BlockDctExtractor::new(BlockDctParams::new(0, 8, 1)).err(),
        Some(DescriptorError::InvalidTileSize {
            height: 0,
            width: 8
        })
    );
    assert_eq!(
        BlockDctExtractor::new(BlockDctParams::new(2, 3, 7)).err(),
        Some(DescriptorError::OutputLengthExceedsTile {
            requested: 7,
            capacity: 6
        })
    );
    assert_eq!(
        BlockDctExtractor::new(BlockDctParams::new(usize::MAX, 2, 1)).err(),
        Some(DescriptorError::InvalidTileSize {
            height: usize::MAX,
            width: 2
        })
    );
}

#[test]
fn backends_produce_matching_descriptors() {
    let img = stroke_image(24, 24);
    let fast = BlockDctParams::new(12, 12, 30).with_quantize(true);
    let direct = fast.with_backend(TransformBackend::Direct);
    let a = BlockDctExtractor::new(fast)
        .expect("params")
        .extract_sequential(&img)
        .expect("grid")
        .features;
    let b = BlockDctExtractor::new(direct)
        .expect("params")
        .extract_sequential(&img)
        .expect("grid")
        .features;
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert!((x - y).abs() <= 1e-6 * x.abs().max(1.0), "{x} vs {y}");
    }
}

#[test]
fn rectangular_tile_scan_order() {
    let grid = CoefficientGrid::from_row_major(2, 3, vec![0.0, 1.0, 5.0, 2.0, 4.0, 6.0]);
    assert_eq!(
        zigzag(&grid, 6).expect("scan"),
        vec![0.0, 1.0, 2.0, 4.0, 5.0, 6.0]
    );
}
