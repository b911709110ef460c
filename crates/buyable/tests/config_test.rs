use buyable::BuyableConfig;
use std::fs;
use tempfile::TempDir;

#[test]
fn loads_settings_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("buyable.toml");
    fs::write(
        &path,
        r#"
default_spec = "standard"
cascade_specs = false

[morph_map]
product = "shop::Product"
"#,
    )
    .unwrap();

    let config = BuyableConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.default_spec, "standard");
    assert!(!config.cascade_specs);
    assert_eq!(config.morph_map().alias_for("shop::Product"), "product");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = BuyableConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
    assert_eq!(config.default_spec, "default");
    assert!(config.cascade_specs);
    assert!(config.morph_map.is_none());
}

#[test]
fn malformed_file_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("buyable.toml");
    fs::write(&path, "cascade_specs = \"sometimes\"").unwrap();

    let err = BuyableConfig::load(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, buyable::BuyableError::Config(_)));
}
