use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("GitHub API error: {}", error_chain(.0))]
    GitHubApi(#[from] octocrab::Error),

    #[error("GitHub API error: HTTP {status} - {message}")]
    GitHubResponse { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not supported platform {os}-{arch}. Supported: linux, windows, macos on x64 or arm64")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("Latest release not found in {owner}/{repo}: {message}")]
    ReleaseNotFound {
        owner: String,
        repo: String,
        message: String,
    },

    #[error("Release {tag} not found in {owner}/{repo}: {message}")]
    TagNotFound {
        tag: String,
        owner: String,
        repo: String,
        message: String,
    },

    #[error("Failed to download {url}: HTTP {status} - {message}")]
    DownloadFailed {
        url: String,
        status: u16,
        message: String,
    },

    #[error("Installation failed: {message}. Path: {path}")]
    Installation { message: String, path: String },
}

pub type Result<T> = std::result::Result<T, SetupError>;

/// octocrab's own messages are bare variant names; the causes carry the detail
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
