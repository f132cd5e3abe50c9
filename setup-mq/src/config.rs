use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default: DefaultConfig,

    #[serde(default)]
    pub tool: ToolConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct DefaultConfig {
    /// Root of the tool cache
    pub tool_cache: Option<String>,

    /// Directory auxiliary tools are installed into
    pub bin_dir: Option<String>,
}

/// The primary tool and the GitHub repository publishing it
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ToolConfig {
    #[serde(default = "default_tool_name")]
    pub name: String,

    #[serde(default = "default_owner")]
    pub owner: String,

    #[serde(default = "default_repo")]
    pub repo: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            name: default_tool_name(),
            owner: default_owner(),
            repo: default_repo(),
        }
    }
}

fn default_tool_name() -> String {
    "mq".to_string()
}

fn default_owner() -> String {
    "harehare".to_string()
}

fn default_repo() -> String {
    "mq".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("setup-mq.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/setup-mq.toml"))
    }

    /// Fill options not given on the command line or environment
    pub fn merge_with_args(&self, args: &mut crate::cli::Args) {
        if args.tool_cache.is_none() {
            args.tool_cache = self.default.tool_cache.clone();
        }

        if args.bin_dir.is_none() {
            args.bin_dir = self.default.bin_dir.clone();
        }
    }
}
