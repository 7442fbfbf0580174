use figment::Jail;
use lgo_config::{ConfigError, LgoConfig};
use lgo_core::enums::Language;
use pretty_assertions::assert_eq;
use std::path::Path;

#[test]
fn project_toml_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lichensgo")?;
        jail.create_file(
            ".lichensgo/config.toml",
            r#"
[store]
database_path = "data/survey.duckdb"
ecology_csv = "data/lichen_ecology.csv"

[indices]
vdl_divisor = 3.0
cache_ttl_secs = 30

[general]
language = "en"
default_limit = 50
"#,
        )?;

        let config = LgoConfig::load_from(Path::new(".")).expect("config loads");
        assert_eq!(config.store.database_path, "data/survey.duckdb");
        assert_eq!(
            config.store.ecology_csv().as_deref(),
            Some(Path::new("data/lichen_ecology.csv"))
        );
        assert!((config.indices.vdl_divisor - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.indices.cache_ttl_secs, 30);
        assert_eq!(config.general.language, Language::En);
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lichensgo")?;
        jail.create_file(
            ".lichensgo/config.toml",
            r#"
[indices]
click_tolerance = 0.001
"#,
        )?;

        let config = LgoConfig::load_from(Path::new(".")).expect("config loads");
        assert!((config.indices.click_tolerance - 0.001).abs() < f64::EPSILON);
        assert_eq!(config.indices.cache_ttl_secs, 120);
        assert_eq!(config.store.database_path, ".lichensgo/lichensgo.duckdb");
        Ok(())
    });
}

#[test]
fn invalid_divisor_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lichensgo")?;
        jail.create_file(
            ".lichensgo/config.toml",
            r#"
[indices]
vdl_divisor = 0.0
"#,
        )?;

        let err = LgoConfig::load_from(Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lichensgo")?;
        jail.create_file(".lichensgo/config.toml", "[general]\nlanguage = 3\n")?;

        let err = LgoConfig::load_from(Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}

#[test]
fn figment_chain_accepts_extra_providers() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lichensgo")?;
        jail.create_file(
            ".lichensgo/config.toml",
            r#"
[general]
default_limit = 5
"#,
        )?;

        let config: LgoConfig = LgoConfig::figment_in(Path::new("."))
            .merge(("general.language", "en"))
            .extract()?;
        assert_eq!(config.general.default_limit, 5);
        assert_eq!(config.general.language, Language::En);
        Ok(())
    });
}
