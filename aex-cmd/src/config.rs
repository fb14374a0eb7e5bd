use aex_resolve::{AnchorEntity, ResolverConfig};
use aex_view::ViewConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything tunable about a run. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub anchor: AnchorEntity,
    pub view: ViewConfig,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: Config = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config {}", path.display()))?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}
