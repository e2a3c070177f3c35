//! Unit tests for CLI commands

use crate::cli::{Cli, Commands};
use clap::Parser;

#[test]
fn test_evaluate_defaults() {
    let cli = Cli::try_parse_from(["cors-filter", "evaluate"]).unwrap();

    match cli.command {
        Commands::Evaluate {
            config,
            method,
            path,
            origin,
            skip_paths,
            ..
        } => {
            assert!(config.is_none());
            assert_eq!(method, "GET");
            assert_eq!(path, "/");
            assert!(origin.is_none());
            assert!(skip_paths.is_empty());
        }
        Commands::Defaults => panic!("Expected Evaluate command"),
    }
}

#[test]
fn test_evaluate_with_flags() {
    let cli = Cli::try_parse_from([
        "cors-filter",
        "evaluate",
        "--config",
        "cors.yaml",
        "--method",
        "OPTIONS",
        "--origin",
        "localhost",
        "--request-headers",
        "X-OriginalRequest",
        "--skip-path",
        "/health",
        "--skip-path",
        "/metrics",
    ])
    .unwrap();

    match cli.command {
        Commands::Evaluate {
            config,
            method,
            origin,
            request_headers,
            skip_paths,
            ..
        } => {
            assert_eq!(config.unwrap().to_string_lossy(), "cors.yaml");
            assert_eq!(method, "OPTIONS");
            assert_eq!(origin.as_deref(), Some("localhost"));
            assert_eq!(request_headers.as_deref(), Some("X-OriginalRequest"));
            assert_eq!(skip_paths, vec!["/health", "/metrics"]);
        }
        Commands::Defaults => panic!("Expected Evaluate command"),
    }
}

#[test]
fn test_defaults_command_parses() {
    let cli = Cli::try_parse_from(["cors-filter", "defaults"]).unwrap();
    assert!(matches!(cli.command, Commands::Defaults));
}

#[test]
fn test_unknown_command_fails() {
    assert!(Cli::try_parse_from(["cors-filter", "serve"]).is_err());
}
