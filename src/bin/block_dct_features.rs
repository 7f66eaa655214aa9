use block_dct::config::load_config;
use block_dct::image::io::{load_grayscale_image, write_json_file};
use block_dct::BlockDctExtractor;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let extractor = BlockDctExtractor::new(config.descriptor).map_err(|e| e.to_string())?;
    let report = extractor
        .extract(&gray.as_view())
        .map_err(|e| format!("{}: {e}", config.input.display()))?;

    let params = extractor.params();
    let summary = FeatureSummary {
        width: gray.width(),
        height: gray.height(),
        tile_height: params.tile_height,
        tile_width: params.tile_width,
        tile_rows: report.tile_rows,
        tile_cols: report.tile_cols,
        output_length: report.output_length,
        quantize: report.quantized,
        degenerate_tiles: report.degenerate_tiles,
        elapsed_ms: report.elapsed_ms,
        feature_count: report.features.len(),
        features: report.features,
    };
    write_json_file(&config.output.features_json, &summary)?;

    println!(
        "Saved {} features ({}x{} tiles) to {}",
        summary.feature_count,
        summary.tile_rows,
        summary.tile_cols,
        config.output.features_json.display()
    );

    Ok(())
}

fn usage() -> String {
    "Usage: block_dct_features <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureSummary {
    width: usize,
    height: usize,
    tile_height: usize,
    tile_width: usize,
    tile_rows: usize,
    tile_cols: usize,
    output_length: usize,
    quantize: bool,
    degenerate_tiles: usize,
    elapsed_ms: f64,
    feature_count: usize,
    features: Vec<f64>,
}
