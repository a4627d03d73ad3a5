//! `ruleclaw config` — show the effective configuration.

use std::path::Path;

use ruleclaw_config::AppConfig;

pub fn run(config: &AppConfig, path: &Path) {
    let source = if path.exists() { "loaded" } else { "not found, using defaults" };
    println!("# {} ({source})", path.display());
    println!("{}", config.to_toml());
}
