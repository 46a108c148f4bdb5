use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  trace
};
use vista_gui_shared::{
  LegendAction,
  LegendMode,
  LegendOptions,
  LegendPosition,
  LegendState,
  LegendValue
};

/// Parses one editor action as written
/// on the command line: `show`, `hide`,
/// `position=<key>`, `mode=<key>`,
/// `toggle=<key>`,
/// `values=<key,key,...>`.
pub fn parse_action(
  raw: &str
) -> anyhow::Result<LegendAction> {
  let raw = raw.trim();
  match raw {
    | "show" => {
      return Ok(
        LegendAction::SetVisible(true)
      );
    }
    | "hide" => {
      return Ok(
        LegendAction::SetVisible(false)
      );
    }
    | _ => {}
  }

  let (name, arg) = raw
    .split_once('=')
    .ok_or_else(|| {
      anyhow!(
        "invalid legend action: {raw}"
      )
    })?;
  let arg = arg.trim();

  match name.trim() {
    | "position" => {
      LegendPosition::from_key(arg)
        .map(LegendAction::SetPosition)
        .ok_or_else(|| {
          anyhow!(
            "unknown legend position: \
             {arg}"
          )
        })
    }
    | "mode" => {
      LegendMode::from_key(arg)
        .map(LegendAction::SetMode)
        .ok_or_else(|| {
          anyhow!(
            "unknown legend mode: {arg}"
          )
        })
    }
    | "toggle" => {
      parse_value(arg)
        .map(LegendAction::ToggleValue)
    }
    | "values" => {
      parse_value_list(arg)
        .map(LegendAction::SetValues)
    }
    | other => {
      Err(anyhow!(
        "unknown legend action: {other}"
      ))
    }
  }
}

pub fn parse_value(
  raw: &str
) -> anyhow::Result<LegendValue> {
  LegendValue::from_key(raw.trim())
    .ok_or_else(|| {
      let known: Vec<&str> =
        LegendValue::all()
          .iter()
          .map(|v| v.as_key())
          .collect();
      anyhow!(
        "unknown legend value: {raw} \
         (expected one of {})",
        known.join(", ")
      )
    })
}

/// Comma-separated value keys; an
/// empty string is an empty list.
pub fn parse_value_list(
  raw: &str
) -> anyhow::Result<Vec<LegendValue>> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|token| !token.is_empty())
    .map(parse_value)
    .collect()
}

/// Decodes a legend options record;
/// `null` means hidden.
pub fn parse_options_json(
  raw: &str
) -> anyhow::Result<LegendState> {
  let options: Option<LegendOptions> =
    serde_json::from_str(raw).context(
      "invalid legend options JSON"
    )?;
  Ok(options.into())
}

/// Feeds `actions` through the editor
/// transitions, in order.
#[tracing::instrument(skip_all, fields(actions = actions.len()))]
pub fn replay(
  start: LegendState,
  actions: &[LegendAction]
) -> LegendState {
  actions.iter().fold(
    start,
    |state, action| {
      if !state
        .is_enabled(action.control())
      {
        debug!(?action, control = ?action.control(), "control disabled; ignoring action");
        return state;
      }
      let next =
        state.apply(action.clone());
      trace!(?action, ?next, "applied legend action");
      next
    }
  )
}
