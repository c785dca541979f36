use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BranchCiError, Result};

/// File name written by `--init` when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".branchci.toml";

/// Candidate config files, relative to the search root, in lookup order.
const CONFIG_SEARCH_PATHS: &[&str] = &[
    ".branchci.toml",
    ".branchci.yml",
    ".branchci.yaml",
    ".github/branchci.yml",
    ".github/branchci.yaml",
];

/// File name looked up in the user configuration directory.
const USER_CONFIG_FILE: &str = "branchci.toml";

/// Represents the complete policy configuration.
///
/// Contains the deployment environments, the prioritized branch mappings and the global policies.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,

    #[serde(default)]
    pub branch_mappings: Vec<BranchMapping>,

    #[serde(default)]
    pub policies: PolicySettings,
}

/// Settings for a single deployment environment.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub requires_approval: bool,

    /// Branch patterns allowed to deploy here; empty means any branch.
    #[serde(default)]
    pub allowed_branches: Vec<String>,

    #[serde(default)]
    pub notify_on_deploy: bool,

    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

/// Maps a branch pattern to a target environment and its actions.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BranchMapping {
    pub pattern: String,

    pub environment: String,

    #[serde(default)]
    pub actions: Vec<String>,

    #[serde(default)]
    pub priority: i32,
}

impl BranchMapping {
    pub fn new(pattern: &str, environment: &str, actions: &[&str], priority: i32) -> Self {
        BranchMapping {
            pattern: pattern.to_string(),
            environment: environment.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
            priority,
        }
    }
}

/// Global policies applied after mapping and environment resolution.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct PolicySettings {
    #[serde(default)]
    pub require_tests: bool,

    #[serde(default)]
    pub require_code_review: bool,

    #[serde(default)]
    pub blocked_branch_patterns: Vec<String>,

    #[serde(default)]
    pub auto_deploy_branches: Vec<String>,
}

fn environment(
    name: &str,
    requires_approval: bool,
    allowed_branches: &[&str],
    notify_on_deploy: bool,
) -> EnvironmentConfig {
    let mut variables = BTreeMap::new();
    variables.insert("ENV".to_string(), name.to_string());

    EnvironmentConfig {
        name: name.to_string(),
        requires_approval,
        allowed_branches: allowed_branches.iter().map(|b| b.to_string()).collect(),
        notify_on_deploy,
        variables,
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let mut environments = BTreeMap::new();
        environments.insert(
            "production".to_string(),
            environment("production", true, &["main", "master"], true),
        );
        environments.insert(
            "staging".to_string(),
            environment("staging", false, &["staging", "develop"], true),
        );
        environments.insert(
            "development".to_string(),
            environment(
                "development",
                false,
                &["feature/*", "bugfix/*", "hotfix/*"],
                false,
            ),
        );

        PolicyConfig {
            environments,
            branch_mappings: vec![
                BranchMapping::new("main", "production", &["deploy", "notify"], 100),
                BranchMapping::new("master", "production", &["deploy", "notify"], 100),
                BranchMapping::new("staging", "staging", &["deploy", "notify"], 90),
                BranchMapping::new("develop", "staging", &["deploy"], 80),
                BranchMapping::new("release/*", "staging", &["deploy", "test"], 85),
                BranchMapping::new("feature/*", "development", &["test"], 50),
                BranchMapping::new("bugfix/*", "development", &["test"], 50),
                BranchMapping::new("hotfix/*", "staging", &["test", "deploy"], 70),
            ],
            policies: PolicySettings {
                require_tests: true,
                require_code_review: false,
                blocked_branch_patterns: Vec::new(),
                auto_deploy_branches: vec![
                    "main".to_string(),
                    "master".to_string(),
                    "staging".to_string(),
                ],
            },
        }
    }
}

/// Serialization format of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Parses a config document in the given format.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<PolicyConfig> {
    match format {
        ConfigFormat::Toml => toml::from_str(content)
            .map_err(|e| BranchCiError::config(format!("failed to parse TOML: {}", e))),
        ConfigFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| BranchCiError::config(format!("failed to parse YAML: {}", e))),
    }
}

/// Finds the config file to use.
///
/// Looks in the following order:
/// 1. Custom path provided as parameter
/// 2. `.branchci.toml`, `.branchci.yml`, `.branchci.yaml`, `.github/branchci.yml`,
///    `.github/branchci.yaml` under `search_root`
/// 3. `branchci.toml` in the user config directory
///
/// # Returns
/// * `Some(path)` - First candidate that exists (an explicit path is returned as-is)
/// * `None` - Nothing found; callers fall back to defaults
pub fn resolve_config_path(config_path: Option<&Path>, search_root: &Path) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    CONFIG_SEARCH_PATHS
        .iter()
        .map(|candidate| search_root.join(candidate))
        .find(|candidate| candidate.is_file())
        .or_else(|| {
            dirs::config_dir()
                .map(|dir| dir.join(USER_CONFIG_FILE))
                .filter(|candidate| candidate.is_file())
        })
}

/// Loads a config file, picking the parser from its extension.
pub fn load_config_file(path: &Path) -> Result<PolicyConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        BranchCiError::config(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse_config(&content, ConfigFormat::from_path(path)).map_err(|e| match e {
        BranchCiError::Config(msg) => {
            BranchCiError::config(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Loads configuration from file or returns defaults.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `search_root` - Directory searched for the conventional file names
///
/// # Returns
/// * `Ok((PolicyConfig, ConfigSource))` - Loaded or default configuration and its origin
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(
    config_path: Option<&Path>,
    search_root: &Path,
) -> Result<(PolicyConfig, ConfigSource)> {
    match resolve_config_path(config_path, search_root) {
        Some(path) => {
            let config = load_config_file(&path)?;
            tracing::info!(path = %path.display(), "loaded policy configuration");
            Ok((config, ConfigSource::File(path)))
        }
        None => {
            tracing::info!("no configuration file found, using defaults");
            Ok((PolicyConfig::default(), ConfigSource::Defaults))
        }
    }
}

/// Serializes a config in the given format.
pub fn render_config(config: &PolicyConfig, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| BranchCiError::config(format!("failed to serialize TOML: {}", e))),
        ConfigFormat::Yaml => serde_yaml::to_string(config)
            .map_err(|e| BranchCiError::config(format!("failed to serialize YAML: {}", e))),
    }
}

/// Writes a config file, creating parent directories as needed.
pub fn save_config(config: &PolicyConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let content = render_config(config, ConfigFormat::from_path(path))?;
    fs::write(path, content)?;
    Ok(())
}

/// Writes the default configuration to `path`.
///
/// Refuses to touch an existing file unless `overwrite` is set.
pub fn init_config(path: &Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(BranchCiError::config(format!(
            "config file already exists: {}",
            path.display()
        )));
    }

    save_config(&PolicyConfig::default(), path)?;
    tracing::info!(path = %path.display(), "wrote default configuration");
    Ok(())
}
