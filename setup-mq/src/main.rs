use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use setup_mq::cache::DirToolCache;
use setup_mq::cli::Args;
use setup_mq::config::Config;
use setup_mq::github::GitHubClient;
use setup_mq::host::{ActionsHost, Host};
use setup_mq::installer::{Installer, RunStatus, Settings};
use setup_mq::materialize::Materializer;
use setup_mq::release::Resolver;

#[tokio::main]
async fn main() -> ExitCode {
    let mut args = Args::parse();

    // Initialize tracing; RUST_LOG takes precedence over --verbose
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let host = Arc::new(ActionsHost::new(args.path_file.clone(), args.annotate));

    let installer = match build_installer(&mut args, host.clone()) {
        Ok(installer) => installer,
        Err(e) => {
            host.set_failed(&format!("{e:#}"));
            return ExitCode::FAILURE;
        }
    };

    let status = installer.run().await;
    if status == RunStatus::Failed || host.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn build_installer(args: &mut Args, host: Arc<ActionsHost>) -> Result<Installer> {
    let config_path = if args.config.exists() {
        args.config.clone()
    } else {
        Config::default_path()
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    config.merge_with_args(args);

    let client = Arc::new(
        GitHubClient::new(args.github_token.clone(), args.api_url.as_deref())
            .context("Failed to create GitHub client")?,
    );
    let cache = Arc::new(DirToolCache::new(args.tool_cache_dir()));
    tracing::debug!("Using tool cache at {}", cache.root().display());

    let materializer = Materializer::new(client.clone(), cache, args.sandboxed);
    let settings = Settings::new(args, config.tool);

    Ok(Installer::new(
        settings,
        Resolver::new(client),
        materializer,
        host,
    ))
}
