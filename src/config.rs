use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    headers::HeaderSet,
    session::{DEFAULT_FILE_NAME, SessionOptions},
    signature::SignatureRegistry,
};

pub const CONFIG_FILE_NAME: &str = ".potgenrc.json";

pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub function_names: SignatureRegistry,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default)]
    pub headers: HeaderSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            function_names: SignatureRegistry::default(),
            file_name: default_file_name(),
            headers: HeaderSet::default(),
            base_directory: None,
            includes: Vec::new(),
            ignores: default_ignores(),
            source_root: default_source_root(),
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Reject settings that would only fail later, mid-extraction.
    ///
    /// Checks glob patterns in `ignores` and `includes` (includes without
    /// wildcards are literal paths), the `plural-forms` header and `fileName`.
    pub fn validate(&self) -> Result<()> {
        let globs = self.ignores.iter().map(|p| ("ignores", p)).chain(
            self.includes
                .iter()
                .filter(|p| p.contains('*') || p.contains('?'))
                .map(|p| ("includes", p)),
        );
        for (field, pattern) in globs {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in '{}': \"{}\"", field, pattern))?;
        }

        self.headers
            .with_defaults()
            .nplurals()
            .context("Invalid 'headers' in config")?;

        if self.file_name.trim().is_empty() {
            anyhow::bail!("'fileName' must not be empty");
        }

        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            function_names: self.function_names.clone(),
            file_name: self.file_name.clone(),
            headers: self.headers.clone(),
            base_directory: self.base_directory.clone(),
        }
    }
}

/// Configuration written by `potgen init`.
///
/// Same as the defaults, except references are made relative to the
/// directory potgen runs in.
pub fn default_config_json() -> Result<String> {
    let config = Config {
        base_directory: Some(".".to_string()),
        ..Default::default()
    };
    serde_json::to_string_pretty(&config).context("Failed to serialize default config")
}

/// Nearest `.potgenrc.json` at or above `start_dir`.
///
/// The search stops at the first directory containing `.git`.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let start = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    for dir in start.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

pub struct ConfigLoadResult {
    pub config: Config,
    /// Config file the settings came from; `None` means built-in defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    let Some(path) = find_config_file(start_dir) else {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        });
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(ConfigLoadResult {
        config,
        path: Some(path),
    })
}
