use std::io::Write;

use anyhow::Context;
use tracing::{
  debug,
  info
};
use vista_gui_shared::{
  LegendAction,
  LegendOptions,
  LegendState
};

use crate::cli::{
  Command,
  LegendArgs
};
use crate::config::Config;
use crate::legend;

#[tracing::instrument(skip_all)]
pub fn dispatch<W: Write>(
  cfg: &Config,
  command: Command,
  out: &mut W
) -> anyhow::Result<()> {
  match command {
    | Command::Config => {
      show_config(cfg, out)
    }
    | Command::Info => show_info(cfg, out),
    | Command::Legend(args) => {
      run_legend(cfg, args, out)
    }
  }
}

fn show_config<W: Write>(
  cfg: &Config,
  out: &mut W
) -> anyhow::Result<()> {
  let snapshot = cfg.snapshot()?;
  serde_json::to_writer_pretty(
    &mut *out, &snapshot
  )
  .context(
    "failed to encode config snapshot"
  )?;
  writeln!(out)?;
  Ok(())
}

fn show_info<W: Write>(
  cfg: &Config,
  out: &mut W
) -> anyhow::Result<()> {
  match cfg.information()? {
    | Some(markup) => {
      out.write_all(
        markup.as_str().as_bytes()
      )?;
    }
    | None => {
      info!(
        "no information configured"
      );
    }
  }
  Ok(())
}

fn run_legend<W: Write>(
  cfg: &Config,
  args: LegendArgs,
  out: &mut W
) -> anyhow::Result<()> {
  let start = if args.from_config {
    cfg.legend().clone()
  } else if let Some(raw) =
    args.from.as_deref()
  {
    legend::parse_options_json(raw)?
  } else {
    LegendState::Hidden
  };

  let actions = args
    .actions
    .iter()
    .map(|raw| {
      legend::parse_action(raw)
        .with_context(|| {
          format!(
            "invalid action `{raw}`"
          )
        })
    })
    .collect::<anyhow::Result<
      Vec<LegendAction>
    >>()?;
  debug!(
    start = ?start,
    actions = actions.len(),
    "replaying legend actions"
  );

  let result: Option<LegendOptions> =
    legend::replay(start, &actions)
      .into();
  if args.pretty {
    serde_json::to_writer_pretty(
      &mut *out, &result
    )?;
  } else {
    serde_json::to_writer(
      &mut *out, &result
    )?;
  }
  writeln!(out)?;
  Ok(())
}
