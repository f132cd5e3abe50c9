//! # setup-mq
//!
//! Installs the `mq` command line tool, and optionally its companion tools,
//! from GitHub releases into a CI job or a local machine.
//!
//! ## Overview
//!
//! A run validates the host platform, resolves a release of `harehare/mq`
//! (latest, or a specific tag with or without the `v` prefix), downloads the
//! asset built for the platform, stores it in a tool cache keyed by
//! (tool, version, architecture) and puts it on `PATH`. Companion tools
//! listed in `bins` are resolved from `harehare/mq-<name>` concurrently and
//! installed into one shared bin directory.
//!
//! ## Usage
//!
//! ```bash
//! # Install latest release
//! setup-mq
//!
//! # Install specific version with companion tools
//! setup-mq --tool-version v0.1.0 --bins "lsp, check"
//! ```
//!
//! Inside a workflow the same options are read from `INPUT_VERSION`,
//! `INPUT_BINS`, `RUNNER_OS`, `RUNNER_ARCH`, `RUNNER_TOOL_CACHE` and
//! `GITHUB_PATH`.

/// On-disk tool cache
pub mod cache;

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Configuration file handling
pub mod config;

/// Error types and error handling utilities
pub mod error;

/// GitHub API client for release lookups and asset downloads
pub mod github;

/// Host integration: search path, status messages, failure signalling
pub mod host;

/// Run orchestration for the primary and companion tools
pub mod installer;

/// Download, install and cache resolved releases
pub mod materialize;

/// Supported platforms and their release asset names
pub mod platform;

/// Release lookup and asset selection
pub mod release;

/// File helpers for installing executables
pub mod utils;

/// Version string normalization
pub mod version;
