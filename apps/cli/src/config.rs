//! Configuration resolution for the CLI.
//!
//! Resolves strata.toml in priority order:
//! 1. `--config <path>` flag (explicit override)
//! 2. `{cwd}/strata.toml` (workspace config)
//! 3. `~/.config/strata/strata.toml` (global default)
//!
//! If none exists, the built-in default is used. `strata init` writes it.

use anyhow::{Context, Result};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config directory name under platform config dir.
pub const CONFIG_DIR: &str = "strata";
/// Config file name.
pub const CONFIG_FILE: &str = "strata.toml";

/// Default config written by `strata init`.
pub const DEFAULT_CONFIG: &str = r#"models = ["Invoice", "Partner"]

[modules]
load = ["sale", "contacts", "surcharge", "double", "stamp"]
"#;

/// Top-level CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Models declared before any module loads.
    #[serde(default)]
    pub models: Vec<CompactString>,
    /// Modules to load.
    #[serde(default)]
    pub modules: ModulesConfig,
}

/// Module loading configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    /// Built-in modules, in load order. Later modules stack on earlier ones.
    pub load: Vec<CompactString>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models: vec!["Invoice".into(), "Partner".into()],
            modules: ModulesConfig {
                load: ["sale", "contacts", "surcharge", "double", "stamp"]
                    .into_iter()
                    .map(CompactString::from)
                    .collect(),
            },
        }
    }
}

impl Config {
    /// Parse a config from TOML.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).context("invalid strata config")
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("parsing {}", path.display()))
    }
}

/// Resolve the config following the priority chain.
pub fn resolve_config(config_flag: Option<&Path>) -> Result<Config> {
    // 1. Explicit --config flag.
    if let Some(path) = config_flag {
        return Config::load(path);
    }

    // 2. Workspace config: {cwd}/strata.toml
    let workspace_path = PathBuf::from(CONFIG_FILE);
    if workspace_path.exists() {
        tracing::debug!("using workspace config {}", workspace_path.display());
        return Config::load(&workspace_path);
    }

    // 3. Global default.
    let global_path = global_config_path();
    if global_path.exists() {
        tracing::debug!("using global config {}", global_path.display());
        return Config::load(&global_path);
    }

    tracing::debug!("no config file found, using built-in default");
    Ok(Config::default())
}

/// Path to the global default config.
pub fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the default config at the given path.
pub fn generate_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config to {}", path.display()))?;
    Ok(())
}
