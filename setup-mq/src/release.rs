use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{Result, SetupError};
use crate::platform::Platform;
use crate::version::VersionIntent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag_name: String,
    pub assets: Vec<ReleaseAsset>,
}

/// Outcome of a release lookup that reached the feed.
///
/// Transport and API failures are reported through `Err` instead, so callers
/// can tell "the feed has no such release" apart from "the feed is unreachable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Release),
    NotFound { message: String },
}

/// A versioned release feed, such as the GitHub releases of a repository
#[async_trait]
pub trait ReleaseFeed: Send + Sync {
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Lookup>;

    async fn release_by_tag(&self, owner: &str, repo: &str, tag: &str) -> Result<Lookup>;
}

/// Release tag and download URL picked for one platform.
///
/// A missing URL means the release exists but publishes nothing for the
/// platform. That is a normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRelease {
    pub version: Option<String>,
    pub url: Option<String>,
}

impl ResolvedRelease {
    fn select(release: &Release, asset_name: &str) -> Self {
        Self {
            version: Some(release.tag_name.clone()),
            url: find_asset(release, asset_name).map(|asset| asset.url.clone()),
        }
    }
}

/// Find the asset whose name is exactly `asset_name`; the first match wins
pub fn find_asset<'a>(release: &'a Release, asset_name: &str) -> Option<&'a ReleaseAsset> {
    release.assets.iter().find(|asset| asset.name == asset_name)
}

pub struct Resolver {
    feed: Arc<dyn ReleaseFeed>,
}

impl Resolver {
    pub fn new(feed: Arc<dyn ReleaseFeed>) -> Self {
        Self { feed }
    }

    /// Resolve the release and platform asset for `owner/repo`.
    ///
    /// Explicit versions are looked up as `v`-prefixed tags first and retried
    /// once without the prefix. When neither tag exists the result is
    /// `SetupError::TagNotFound`.
    pub async fn resolve(
        &self,
        owner: &str,
        repo: &str,
        asset_base_name: &str,
        platform: Platform,
        intent: &VersionIntent,
    ) -> Result<ResolvedRelease> {
        let asset_name = platform.asset_name(asset_base_name);

        let release = match intent {
            VersionIntent::Latest => {
                tracing::info!(
                    "No specific version provided. Fetching latest release for {}/{}",
                    owner,
                    repo
                );
                match self.feed.latest_release(owner, repo).await? {
                    Lookup::Found(release) => {
                        tracing::info!("Latest release is {}", release.tag_name);
                        release
                    }
                    Lookup::NotFound { message } => {
                        return Err(SetupError::ReleaseNotFound {
                            owner: owner.to_string(),
                            repo: repo.to_string(),
                            message,
                        })
                    }
                }
            }
            VersionIntent::Explicit {
                prefixed,
                unprefixed,
            } => {
                tracing::info!("Fetching release information for {}/{} {}", owner, repo, prefixed);
                self.release_by_tags(owner, repo, prefixed, unprefixed).await?
            }
        };

        tracing::info!("Searching {} for asset {}", release.tag_name, asset_name);
        let resolved = ResolvedRelease::select(&release, &asset_name);
        if resolved.url.is_none() {
            tracing::debug!(
                "Release {} has no asset named {} (available: {})",
                release.tag_name,
                asset_name,
                release
                    .assets
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        Ok(resolved)
    }

    async fn release_by_tags(
        &self,
        owner: &str,
        repo: &str,
        prefixed: &str,
        unprefixed: &str,
    ) -> Result<Release> {
        if let Lookup::Found(release) = self.feed.release_by_tag(owner, repo, prefixed).await? {
            return Ok(release);
        }

        tracing::info!("Tag {} not found, retrying with {}", prefixed, unprefixed);
        match self.feed.release_by_tag(owner, repo, unprefixed).await? {
            Lookup::Found(release) => Ok(release),
            Lookup::NotFound { message } => Err(SetupError::TagNotFound {
                tag: unprefixed.to_string(),
                owner: owner.to_string(),
                repo: repo.to_string(),
                message,
            }),
        }
    }
}
