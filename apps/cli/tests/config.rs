//! Configuration tests.

use strata_cli::config::{
    Config, DEFAULT_CONFIG, generate_default_config, resolve_config,
};

#[test]
fn default_config_matches_template() {
    let parsed = Config::from_toml(DEFAULT_CONFIG).unwrap();
    assert_eq!(parsed, Config::default());
}

#[test]
fn parse_minimal_config() {
    let config = Config::from_toml(r#"models = ["Invoice"]"#).unwrap();
    assert_eq!(config.models, ["Invoice"]);
    assert!(config.modules.load.is_empty());
}

#[test]
fn parse_module_order() {
    let config = Config::from_toml(
        r#"
models = ["Invoice"]

[modules]
load = ["sale", "double", "surcharge"]
"#,
    )
    .unwrap();
    let order: Vec<_> = config.modules.load.iter().map(|m| m.as_str()).collect();
    assert_eq!(order, ["sale", "double", "surcharge"]);
}

#[test]
fn reject_malformed_config() {
    assert!(Config::from_toml("models = \"Invoice\"").is_err());
}

#[test]
fn load_from_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strata.toml");
    std::fs::write(&path, "models = [\"Partner\"]\n").unwrap();

    let config = resolve_config(Some(path.as_path())).unwrap();
    assert_eq!(config.models, ["Partner"]);
}

#[test]
fn missing_flag_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = resolve_config(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn generate_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("strata.toml");
    generate_default_config(&path).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config, Config::default());
}
