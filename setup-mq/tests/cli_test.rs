use clap::Parser;
use setup_mq::cli::Args;
use setup_mq::version::VersionIntent;
use std::path::PathBuf;

fn parse(extra: &[&str]) -> Args {
    let mut argv = vec!["setup-mq", "--os", "linux", "--arch", "x64"];
    argv.extend_from_slice(extra);
    Args::parse_from(argv)
}

#[test]
fn test_parse_version() {
    let args = parse(&["--tool-version", "v0.1.0"]);
    assert_eq!(args.tool_version, "v0.1.0");
    assert_eq!(
        VersionIntent::parse(&args.tool_version),
        VersionIntent::Explicit {
            prefixed: "v0.1.0".to_string(),
            unprefixed: "0.1.0".to_string(),
        }
    );
}

#[test]
fn test_parse_wildcard_version() {
    let args = parse(&["--tool-version", "*"]);
    assert_eq!(VersionIntent::parse(&args.tool_version), VersionIntent::Latest);
}

#[test]
fn test_aux_tools_are_trimmed() {
    let args = parse(&["--bins", " foo, bar ,, baz"]);
    assert_eq!(args.aux_tools(), vec!["foo", "bar", "baz"]);
}

#[test]
fn test_aux_tools_empty() {
    let args = parse(&["--bins", " , "]);
    assert!(args.aux_tools().is_empty());
}

#[test]
fn test_platform_override() {
    let args = Args::parse_from(["setup-mq", "--os", "macos", "--arch", "arm64"]);
    assert_eq!(args.os, "macos");
    assert_eq!(args.arch, "arm64");
}

#[test]
fn test_sandboxed_flag() {
    assert!(parse(&["--sandboxed"]).sandboxed);
}

#[test]
fn test_sandboxed_from_environment() {
    // ACT is process-wide, so every case lives in this one test
    std::env::set_var("ACT", "true");
    assert!(parse(&[]).sandboxed);

    for falsey in ["false", "0", "no", "off"] {
        std::env::set_var("ACT", falsey);
        assert!(!parse(&[]).sandboxed, "ACT={falsey}");
    }

    std::env::remove_var("ACT");
    assert!(!parse(&[]).sandboxed);
}

#[test]
fn test_bin_dir_expansion() {
    let args = parse(&["--bin-dir", "~/tools/bin"]);
    let bin_dir = args.bin_dir("mq");
    assert!(!bin_dir.to_string_lossy().starts_with('~'));
    assert!(bin_dir.ends_with("tools/bin"));
}

#[test]
fn test_bin_dir_default() {
    let args = parse(&[]);
    assert!(args.bin_dir("mq").ends_with(".mq/bin"));
}

#[test]
fn test_tool_cache_absolute_path() {
    let args = parse(&["--tool-cache", "/opt/hostedtoolcache"]);
    assert_eq!(args.tool_cache_dir(), PathBuf::from("/opt/hostedtoolcache"));
}
