use futures_util::future::join_all;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::Args;
use crate::config::ToolConfig;
use crate::error::{Result, SetupError};
use crate::host::Host;
use crate::materialize::Materializer;
use crate::platform::Platform;
use crate::release::Resolver;
use crate::version::VersionIntent;

/// Everything one run needs to know, gathered from arguments and configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub tool: ToolConfig,
    pub os: String,
    pub arch: String,
    pub version: String,
    pub aux_tools: Vec<String>,
    pub bin_dir: PathBuf,
}

impl Settings {
    pub fn new(args: &Args, tool: ToolConfig) -> Self {
        Self {
            os: args.os.clone(),
            arch: args.arch.clone(),
            version: args.tool_version.clone(),
            aux_tools: args.aux_tools(),
            bin_dir: args.bin_dir(&tool.name),
            tool,
        }
    }

    /// Repository and asset name of a companion tool, e.g. `lsp` -> `mq-lsp`
    pub fn aux_name(&self, name: &str) -> String {
        let prefix = format!("{}-", self.tool.name);
        if name.starts_with(&prefix) {
            name.to_string()
        } else {
            format!("{prefix}{name}")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// The host platform has no published builds; nothing was attempted
    Unsupported,
    Failed,
}

pub struct Installer {
    settings: Settings,
    resolver: Resolver,
    materializer: Materializer,
    host: Arc<dyn Host>,
}

impl Installer {
    pub fn new(
        settings: Settings,
        resolver: Resolver,
        materializer: Materializer,
        host: Arc<dyn Host>,
    ) -> Self {
        Self {
            settings,
            resolver,
            materializer,
            host,
        }
    }

    /// Install the primary tool, then the companion tools. Errors that
    /// escape are reported to the host as a failed run.
    pub async fn run(&self) -> RunStatus {
        match self.install().await {
            Ok(status) => status,
            Err(e) => {
                let message = e.to_string();
                if message.is_empty() {
                    self.host.set_failed("Unknown error occurred");
                } else {
                    self.host.set_failed(&message);
                }
                RunStatus::Failed
            }
        }
    }

    async fn install(&self) -> Result<RunStatus> {
        let platform = match Platform::detect(&self.settings.os, &self.settings.arch) {
            Ok(platform) => platform,
            Err(e @ SetupError::UnsupportedPlatform { .. }) => {
                self.host.error(&e.to_string());
                return Ok(RunStatus::Unsupported);
            }
            Err(e) => return Err(e),
        };

        self.install_primary(platform).await?;

        if !self.settings.aux_tools.is_empty() {
            self.install_aux_tools(platform).await?;
        }

        Ok(RunStatus::Completed)
    }

    async fn install_primary(&self, platform: Platform) -> Result<()> {
        let tool = &self.settings.tool;
        let intent = VersionIntent::parse(&self.settings.version);

        tracing::info!("Installing {} ({}) for {}", tool.name, intent, platform);

        let release = self
            .resolver
            .resolve(&tool.owner, &tool.repo, &tool.name, platform, &intent)
            .await?;

        // A release without a build for this platform is not a failure
        let Some(path) = self
            .materializer
            .materialize(&tool.name, &release, platform)
            .await?
        else {
            self.host.info(&format!(
                "Not Found {} version {} for {}",
                tool.name, intent, platform
            ));
            return Ok(());
        };

        self.host.add_path(&path)?;
        self.host.info(&format!(
            "Setting up {} version {} for {}",
            tool.name,
            release.version.as_deref().unwrap_or_default(),
            platform
        ));
        Ok(())
    }

    async fn install_aux_tools(&self, platform: Platform) -> Result<()> {
        let bin_dir = &self.settings.bin_dir;
        fs::create_dir_all(bin_dir)?;
        self.host.add_path(bin_dir)?;

        let installs = self
            .settings
            .aux_tools
            .iter()
            .map(|name| self.install_aux_tool(name, platform, bin_dir));
        join_all(installs).await;

        Ok(())
    }

    /// Failures stay local to the tool and are reported as warnings
    async fn install_aux_tool(&self, name: &str, platform: Platform, bin_dir: &Path) {
        let full_name = self.settings.aux_name(name);
        let owner = &self.settings.tool.owner;

        let installed = async {
            let release = self
                .resolver
                .resolve(owner, &full_name, &full_name, platform, &VersionIntent::Latest)
                .await?;
            let path = self
                .materializer
                .materialize_into(&full_name, &release, platform, bin_dir)
                .await?;
            Ok::<_, SetupError>(path.map(|path| (path, release.version.unwrap_or_default())))
        }
        .await;

        match installed {
            Ok(Some((path, version))) => self.host.info(&format!(
                "Installed {} {} to {}",
                full_name,
                version,
                path.display()
            )),
            Ok(None) => self.host.warning(&format!(
                "Not Found {} for {}",
                full_name, platform
            )),
            Err(e) => self
                .host
                .warning(&format!("Failed to install {}: {}", full_name, e)),
        }
    }
}
