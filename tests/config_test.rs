// tests/config_test.rs
use branch_aware_ci::config::{
    init_config, load_config, load_config_file, resolve_config_path, save_config, ConfigSource,
    PolicyConfig,
};
use branch_aware_ci::BranchCiError;
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, TempDir};

#[test]
fn test_load_default_config() {
    let config = PolicyConfig::default();
    assert_eq!(config.environments.len(), 3);
    assert!(config.environments.contains_key("production"));
    assert!(config.environments.contains_key("staging"));
    assert!(config.environments.contains_key("development"));
    assert_eq!(
        config.policies.auto_deploy_branches,
        vec!["main", "master", "staging"]
    );
}

#[test]
fn test_load_toml_fixture() {
    let config = load_config_file(Path::new("tests/fixtures/policy.toml"))
        .expect("Failed to load test config");
    assert_eq!(config.branch_mappings.len(), 3);
    assert_eq!(
        config.environments["production"].variables.get("REGION"),
        Some(&"eu-west-1".to_string())
    );
    assert!(!config.environments["preview"].requires_approval);
    assert!(config.policies.require_code_review);
}

#[test]
fn test_load_yaml_fixture() {
    let config = load_config_file(Path::new("tests/fixtures/policy.yml"))
        .expect("Failed to load test config");
    assert_eq!(config.branch_mappings[0].pattern, "release/*");
    assert!(!config.policies.require_tests);
    assert_eq!(config.policies.auto_deploy_branches, vec!["develop"]);
}

#[test]
fn test_load_from_temp_file_with_yaml_extension() {
    let mut temp_file = Builder::new().suffix(".yaml").tempfile().unwrap();
    let yaml_content = r#"
branch_mappings:
  - pattern: main
    environment: production
    priority: 1
"#;
    temp_file.write_all(yaml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config_file(temp_file.path()).unwrap();
    assert_eq!(config.branch_mappings[0].environment, "production");
    assert!(config.environments.is_empty());
}

#[test]
fn test_broken_file_is_config_error() {
    let err = load_config_file(Path::new("tests/fixtures/broken.toml")).unwrap_err();
    assert!(matches!(err, BranchCiError::Config(_)));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(load_config(Some(&missing), dir.path()).is_err());
}

#[test]
fn test_search_order_prefers_toml() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".branchci.yml"), "branch_mappings: []\n").unwrap();
    std::fs::write(dir.path().join(".branchci.toml"), "branch_mappings = []\n").unwrap();

    assert_eq!(
        resolve_config_path(None, dir.path()),
        Some(dir.path().join(".branchci.toml"))
    );
}

#[test]
fn test_search_finds_github_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".github")).unwrap();
    std::fs::write(
        dir.path().join(".github/branchci.yaml"),
        "policies:\n  require_tests: true\n",
    )
    .unwrap();

    let (config, source) = load_config(None, dir.path()).unwrap();
    assert_eq!(
        source,
        ConfigSource::File(dir.path().join(".github/branchci.yaml"))
    );
    assert!(config.policies.require_tests);
    assert!(config.branch_mappings.is_empty());
}

#[test]
fn test_explicit_path_wins_over_search() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".branchci.toml"), "branch_mappings = []\n").unwrap();
    let explicit = Path::new("tests/fixtures/policy.yml");

    assert_eq!(
        resolve_config_path(Some(explicit), dir.path()),
        Some(explicit.to_path_buf())
    );
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/dir/branchci.yml");
    save_config(&PolicyConfig::default(), &path).unwrap();

    let loaded = load_config_file(&path).unwrap();
    assert_eq!(loaded, PolicyConfig::default());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".branchci.toml");

    init_config(&path, false).unwrap();
    assert_eq!(load_config_file(&path).unwrap(), PolicyConfig::default());

    let err = init_config(&path, false).unwrap_err();
    assert!(err.to_string().contains("already exists"));

    init_config(&path, true).unwrap();
}
