pub mod cli;
pub mod commands;
pub mod config;
pub mod legend;

use std::ffi::OsString;

use clap::Parser;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting vista CLI"
  );
  debug!(overrides = cli.overrides.len(), "parsed overrides");

  let mut cfg = config::Config::load(
    cli.config.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .overrides
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  )?;

  let stdout = std::io::stdout();
  let mut out = stdout.lock();
  commands::dispatch(
    &cfg,
    cli.command,
    &mut out
  )?;

  info!("done");
  Ok(())
}
