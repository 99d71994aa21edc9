use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_defaults_when_no_config_file() {
    let dir = tempdir().unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.version_file, "version.state");
    assert_eq!(config.migrations_dir, "migrations");
    assert_eq!(config.interpreter, vec!["sh".to_string()]);
    assert_eq!(config.extension, "sh");
    assert!(config.template.is_none());
}

#[test]
fn test_load_partial_config_fills_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("tidemark.yml"),
        "migrations_dir: db/migrations\ninterpreter: []\n",
    )
    .unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "db/migrations");
    assert!(config.interpreter.is_empty());
    assert_eq!(config.version_file, "version.state");
}

#[test]
fn test_yaml_extension_is_found() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("tidemark.yaml"), "version_file: state/v\n").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.version_file, "state/v");
    assert_eq!(
        config.version_file_path(dir.path()),
        dir.path().join("state/v")
    );
}

#[test]
fn test_unknown_field_is_rejected() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("tidemark.yml"), "versoin_file: typo\n").unwrap();

    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParse(_)));
}

#[test]
fn test_empty_migrations_dir_is_invalid() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("tidemark.yml"), "migrations_dir: \"\"\n").unwrap();

    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_dotted_extension_is_invalid() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("tidemark.yml"), "extension: .py\n").unwrap();

    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("use 'py'"));
}

#[test]
fn test_explicit_missing_path_is_not_found() {
    let dir = tempdir().unwrap();
    let err = Config::load(&dir.path().join("custom.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_template_path_is_project_relative() {
    let config = Config {
        template: Some("templates/unit.sh.j2".to_string()),
        ..Config::default()
    };
    let root = Path::new("/srv/project");
    assert_eq!(
        config.template_path(root),
        Some(PathBuf::from("/srv/project/templates/unit.sh.j2"))
    );
}
