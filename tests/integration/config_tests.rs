use bagdupe::actions::DeleteMethod;
use bagdupe::config::{Config, ENV_PREFIX};
use bagdupe::manifest::{HashAlgorithm, MalformedLinePolicy};
use bagdupe::output::OutputFormat;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config.algorithm, None);
    assert_eq!(config.malformed_lines, MalformedLinePolicy::Skip);
    assert_eq!(config.output, OutputFormat::Text);
}

#[test]
fn test_config_load_from_env() {
    std::env::set_var("BAGDUPE_MALFORMED_LINES", "fail");
    std::env::set_var("BAGDUPE_DELETE_METHOD", "trash");

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.malformed_lines, MalformedLinePolicy::Fail);
    assert_eq!(config.delete_method, DeleteMethod::Trash);

    std::env::remove_var("BAGDUPE_MALFORMED_LINES");
    std::env::remove_var("BAGDUPE_DELETE_METHOD");
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bagdupe.toml");
    fs::write(&path, "algorithm = \"sha256\"\noutput = \"script\"\n").unwrap();

    let figment = Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&path));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.algorithm, Some(HashAlgorithm::Sha256));
    assert_eq!(config.output, OutputFormat::Script);
    assert_eq!(config.delete_method, DeleteMethod::Permanent);
}

#[test]
fn test_config_unknown_algorithm_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bagdupe.toml");
    fs::write(&path, "algorithm = \"crc32\"\n").unwrap();

    let figment = Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&path));
    assert!(figment.extract::<Config>().is_err());
}

#[test]
fn test_config_toml_rendering() {
    let config = Config {
        algorithm: Some(HashAlgorithm::Sha512),
        ..Config::default()
    };
    let rendered = config.to_toml_string().unwrap();

    assert!(rendered.contains("algorithm = \"sha512\""));
    assert!(rendered.contains("malformed_lines = \"skip\""));
    assert!(!Config::default().to_toml_string().unwrap().contains("algorithm"));
}
