pub mod batch;
pub mod config;
pub mod extract;
pub mod layouts;
pub mod lines;
pub mod output;

use std::path::Path;

use tracing::debug;

use orderlines_core::models::config::OrderLinesConfig;

/// Load the config named by `-c`, else the user config file if present,
/// else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<OrderLinesConfig> {
    if let Some(path) = config_path {
        return Ok(OrderLinesConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        return Ok(OrderLinesConfig::from_file(&default_path)?);
    }

    Ok(OrderLinesConfig::default())
}
