use async_trait::async_trait;
use futures_util::StreamExt;
use octocrab::Octocrab;
use reqwest::Client;
use std::io::Write;

use crate::error::{Result, SetupError};
use crate::materialize::Downloader;
use crate::release::{Lookup, Release, ReleaseAsset, ReleaseFeed};

pub struct GitHubClient {
    octocrab: Octocrab,
    http_client: Client,
}

impl GitHubClient {
    /// Build a client, authenticating with `token` or `GITHUB_TOKEN` when set.
    /// `api_url` points the release queries at a GitHub Enterprise server.
    pub fn new(token: Option<String>, api_url: Option<&str>) -> Result<Self> {
        let token = token
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()));

        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        if let Some(api_url) = api_url {
            builder = builder.base_uri(api_url)?;
        }
        let octocrab = builder.build()?;

        let http_client = Client::builder()
            .user_agent("setup-mq")
            .connect_timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            octocrab,
            http_client,
        })
    }
}

impl From<octocrab::models::repos::Release> for Release {
    fn from(release: octocrab::models::repos::Release) -> Self {
        Self {
            tag_name: release.tag_name,
            assets: release
                .assets
                .into_iter()
                .map(|asset| ReleaseAsset {
                    name: asset.name,
                    url: asset.browser_download_url.to_string(),
                })
                .collect(),
        }
    }
}

/// Map a releases API response onto a lookup outcome; 404 means "no such release"
fn into_lookup(
    response: std::result::Result<octocrab::models::repos::Release, octocrab::Error>,
) -> Result<Lookup> {
    match response {
        Ok(release) => Ok(Lookup::Found(release.into())),
        Err(octocrab::Error::GitHub { source, .. }) => match source.status_code.as_u16() {
            404 => Ok(Lookup::NotFound {
                message: source.message,
            }),
            status => Err(SetupError::GitHubResponse {
                status,
                message: source.message,
            }),
        },
        Err(e) => Err(SetupError::GitHubApi(e)),
    }
}

#[async_trait]
impl ReleaseFeed for GitHubClient {
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Lookup> {
        tracing::debug!("Fetching latest release for {}/{}", owner, repo);
        into_lookup(self.octocrab.repos(owner, repo).releases().get_latest().await)
    }

    async fn release_by_tag(&self, owner: &str, repo: &str, tag: &str) -> Result<Lookup> {
        tracing::debug!("Fetching release '{}' for {}/{}", tag, owner, repo);
        into_lookup(
            self.octocrab
                .repos(owner, repo)
                .releases()
                .get_by_tag(tag)
                .await,
        )
    }
}

#[async_trait]
impl Downloader for GitHubClient {
    async fn download(&self, url: &str) -> Result<tempfile::NamedTempFile> {
        tracing::info!("Downloading {}", url);

        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(SetupError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let mut temp_file = tempfile::Builder::new().prefix("setup-mq-").tempfile()?;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            temp_file.write_all(&chunk?)?;
        }
        temp_file.flush()?;

        Ok(temp_file)
    }
}
