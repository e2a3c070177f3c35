//! # CLI Module
//!
//! Command-line access to the CORS filter, for checking a policy file without
//! wiring it into a server.
//!
//! ## Commands
//!
//! ### `evaluate`
//!
//! Run a synthetic request through the filter and print status, headers and
//! whether the wrapped handler ran:
//!
//! ```bash
//! cors-filter evaluate --config cors.yaml --method OPTIONS \
//!     --origin https://app.example.com --request-headers X-Custom
//! ```
//!
//! Options:
//! - `--config <FILE>` - Policy file (YAML/JSON, also `CORS_CONFIG`); defaults when omitted
//! - `--method <METHOD>` / `--path <PATH>` - Request line (default `GET /`)
//! - `--origin`, `--request-headers`, `--request-method` - CORS request headers
//! - `--skip-path <PATH>` - Bypass CORS for this path (repeatable)
//!
//! ### `defaults`
//!
//! Print the default policy as YAML, a starting point for a policy file.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use cors_filter::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{evaluate, run_cli, Cli, Commands, Evaluation, Probe};
