//! `strata init`: write the default configuration.

use crate::config::generate_default_config;
use anyhow::Result;
use std::path::Path;

/// Write the default config at `path`, refusing to overwrite unless forced.
pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    generate_default_config(path)?;
    tracing::info!("generated default config at {}", path.display());
    println!("Wrote {}", path.display());
    Ok(())
}
