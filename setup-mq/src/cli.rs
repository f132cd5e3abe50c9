use clap::Parser;
use std::path::PathBuf;

use crate::utils::expand_home;

#[derive(Parser, Debug, Clone)]
#[clap(
    name = "setup-mq",
    version,
    about = "Install mq and its companion tools from GitHub Releases",
    long_about = None
)]
pub struct Args {
    /// Version of mq to install (e.g., v0.1.0, 0.1.0, latest or *)
    #[clap(long, env = "INPUT_VERSION", default_value = "")]
    pub tool_version: String,

    /// Token used for GitHub API requests
    #[clap(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Comma-separated companion tools to install (e.g., "lsp, check")
    #[clap(long, env = "INPUT_BINS")]
    pub bins: Option<String>,

    /// Operating system (linux, windows, macos)
    #[clap(long, env = "RUNNER_OS", default_value = std::env::consts::OS)]
    pub os: String,

    /// CPU architecture (x64, arm64)
    #[clap(long, env = "RUNNER_ARCH", default_value = std::env::consts::ARCH)]
    pub arch: String,

    /// Tool cache directory
    #[clap(long, env = "RUNNER_TOOL_CACHE")]
    pub tool_cache: Option<String>,

    /// Directory companion tools are installed into
    #[clap(long)]
    pub bin_dir: Option<String>,

    /// File that receives directories to add to PATH for later steps
    #[clap(long, env = "GITHUB_PATH")]
    pub path_file: Option<PathBuf>,

    /// Skip the tool cache and run tools from their download directory
    #[clap(long, env = "ACT", value_parser = clap::builder::FalseyValueParser::new())]
    pub sandboxed: bool,

    /// Emit workflow command annotations for warnings and errors
    #[clap(long, env = "GITHUB_ACTIONS", value_parser = clap::builder::FalseyValueParser::new())]
    pub annotate: bool,

    /// GitHub API base URL
    #[clap(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Configuration file path
    #[clap(long, default_value = ".config/setup-mq.toml")]
    pub config: PathBuf,

    /// Enable verbose output
    #[clap(long)]
    pub verbose: bool,
}

impl Args {
    /// Companion tool names, trimmed, with empty entries dropped
    pub fn aux_tools(&self) -> Vec<String> {
        self.bins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Get the tool cache root, expanding ~
    pub fn tool_cache_dir(&self) -> PathBuf {
        match self.tool_cache.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => expand_home(path),
            None => directories::ProjectDirs::from("", "", "setup-mq")
                .map(|dirs| dirs.cache_dir().join("tool-cache"))
                .unwrap_or_else(|| std::env::temp_dir().join("setup-mq").join("tool-cache")),
        }
    }

    /// Get the companion tool directory, defaulting to `~/.<tool>/bin`
    pub fn bin_dir(&self, tool_name: &str) -> PathBuf {
        match self.bin_dir.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => expand_home(path),
            None => expand_home(&format!("~/.{tool_name}/bin")),
        }
    }
}
