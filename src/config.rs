//! JSON configuration for the `block_dct_features` tool.
use crate::descriptor::BlockDctParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct DescriptorToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub descriptor: BlockDctParams,
    pub output: DescriptorOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct DescriptorOutputConfig {
    pub features_json: PathBuf,
}

pub fn parse_config(text: &str) -> Result<DescriptorToolConfig, String> {
    serde_json::from_str(text).map_err(|e| format!("Failed to parse config: {e}"))
}

pub fn load_config(path: &Path) -> Result<DescriptorToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
