//! CLI command implementations.

pub mod batch;
pub mod migrate;
pub mod process;

use std::path::Path;

use setl_core::SetlConfig;

/// Load configuration from `--config` or fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SetlConfig> {
    match config_path {
        Some(path) => Ok(SetlConfig::from_file(Path::new(path))?),
        None => Ok(SetlConfig::default()),
    }
}
