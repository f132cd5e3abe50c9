use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::ToolCache;
use crate::error::Result;
use crate::platform::Platform;
use crate::release::ResolvedRelease;
use crate::utils;

/// Fetches a URL into a local temporary file
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<tempfile::NamedTempFile>;
}

/// Turns resolved releases into executables on disk.
pub struct Materializer {
    downloader: Arc<dyn Downloader>,
    cache: Arc<dyn ToolCache>,
    sandboxed: bool,
}

impl Materializer {
    /// With `sandboxed` set, freshly downloaded tools are left in their
    /// staging directory and never written to the cache.
    pub fn new(downloader: Arc<dyn Downloader>, cache: Arc<dyn ToolCache>, sandboxed: bool) -> Self {
        Self {
            downloader,
            cache,
            sandboxed,
        }
    }

    /// Install `tool_name` through the tool cache and return the directory
    /// containing its executable, or `None` when the release has nothing to
    /// install for this platform.
    pub async fn materialize(
        &self,
        tool_name: &str,
        release: &ResolvedRelease,
        platform: Platform,
    ) -> Result<Option<PathBuf>> {
        let (Some(version), Some(url)) = (release.version.as_deref(), release.url.as_deref())
        else {
            return Ok(None);
        };

        if let Some(cached) = self.cache.find(tool_name, version, platform.arch) {
            tracing::info!("Using cached {} {} from {}", tool_name, version, cached.display());
            return Ok(Some(cached));
        }

        let downloaded = self.downloader.download(url).await?;
        let staging = tempfile::Builder::new()
            .prefix(&format!("{tool_name}-"))
            .tempdir()?;
        utils::install_executable(
            downloaded.path(),
            staging.path(),
            &platform.executable_name(tool_name),
        )?;

        if self.sandboxed {
            tracing::info!("Sandboxed run, skipping tool cache for {}", tool_name);
            return Ok(Some(staging.keep()));
        }

        let path = self
            .cache
            .store(staging.path(), tool_name, version, platform.arch)?;
        Ok(Some(path))
    }

    /// Install `tool_name` directly into `dir`, bypassing the cache, and
    /// return the path of the executable.
    pub async fn materialize_into(
        &self,
        tool_name: &str,
        release: &ResolvedRelease,
        platform: Platform,
        dir: &Path,
    ) -> Result<Option<PathBuf>> {
        let Some(url) = release.url.as_deref().filter(|_| release.version.is_some()) else {
            return Ok(None);
        };

        let downloaded = self.downloader.download(url).await?;
        let path =
            utils::install_executable(downloaded.path(), dir, &platform.executable_name(tool_name))?;
        Ok(Some(path))
    }
}
