use clap::Parser;
use cors_filter::cli::{run_cli, Cli};
use cors_filter::logging::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging_with_config(&LogConfig::from_env())?;
    run_cli(Cli::parse())
}
