use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow,
  bail
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};
use vista_gui_shared::{
  FrontendConfigDto,
  LegendMode,
  LegendPosition,
  LegendState,
  TrustedMarkup
};

use crate::legend::parse_value_list;

pub const CONFIG_ENV: &str =
  "VISTA_CONFIG";

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct FrontendSection {
  /// Inline markup shown on the home
  /// view.
  pub information:      Option<String>,
  /// File holding the markup, relative
  /// to the config file.
  pub information_file: Option<PathBuf>
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct PanelSection {
  pub legend: LegendState
}

#[derive(
  Debug, Clone, Default, Deserialize,
)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
  frontend: FrontendSection,
  panel:    PanelSection
}

#[derive(Debug, Clone, Default)]
pub struct Config {
  pub frontend:    FrontendSection,
  pub panel:       PanelSection,
  pub loaded_from: Option<PathBuf>
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSnapshot {
  pub information: Option<TrustedMarkup>,
  pub legend:      LegendState,
  pub loaded_from: Option<PathBuf>
}

impl Config {
  #[tracing::instrument(skip(
    override_path
  ))]
  pub fn load(
    override_path: Option<&Path>
  ) -> anyhow::Result<Self> {
    let Some(path) =
      resolve_config_path(override_path)?
    else {
      warn!(
        "no config file found; using \
         defaults"
      );
      return Ok(Self::default());
    };

    let path = expand_tilde(&path);
    info!(config = %path.display(), "loading config");
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    Self::from_toml_str(&text, Some(path))
  }

  pub fn from_toml_str(
    text: &str,
    loaded_from: Option<PathBuf>
  ) -> anyhow::Result<Self> {
    let file: ConfigFile =
      toml::from_str(text).with_context(
        || match &loaded_from {
          | Some(path) => {
            format!(
              "invalid config file {}",
              path.display()
            )
          }
          | None => {
            "invalid config".to_string()
          }
        }
      )?;

    debug!(
      has_information = file.frontend.information.is_some(),
      has_information_file = file.frontend.information_file.is_some(),
      legend_visible = file.panel.legend.is_visible(),
      "parsed config"
    );

    Ok(Self {
      frontend: file.frontend,
      panel: file.panel,
      loaded_from
    })
  }

  /// Applies `KEY=VALUE` overrides in
  /// order. Legend keys are normalized
  /// after each step, so set the
  /// position before the mode.
  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      debug!(key = %key, value = %value, "applying override");
      let value = value.trim();
      match key.trim() {
        | "frontend.information" => {
          self.frontend.information =
            non_empty(value)
              .map(str::to_string);
        }
        | "frontend.information_file" => {
          self
            .frontend
            .information_file =
            non_empty(value)
              .map(PathBuf::from);
        }
        | "panel.legend.position" => {
          let position = non_empty(value)
            .map(|raw| {
              LegendPosition::from_key(raw)
                .ok_or_else(|| {
                  anyhow!(
                    "unknown legend \
                     position: {raw}"
                  )
                })
            })
            .transpose()?;
          let mut options = self
            .panel
            .legend
            .to_options()
            .unwrap_or_default();
          options.position = position;
          self.panel.legend =
            options.into();
        }
        | "panel.legend.mode" => {
          let mode = non_empty(value)
            .map(|raw| {
              LegendMode::from_key(raw)
                .ok_or_else(|| {
                  anyhow!(
                    "unknown legend \
                     mode: {raw}"
                  )
                })
            })
            .transpose()?;
          let mut options = self
            .panel
            .legend
            .to_options()
            .unwrap_or_default();
          options.mode = mode;
          self.panel.legend =
            options.into();
        }
        | "panel.legend.values" => {
          let values =
            parse_value_list(value)?;
          let mut options = self
            .panel
            .legend
            .to_options()
            .unwrap_or_default();
          options.values = values;
          self.panel.legend =
            options.into();
        }
        | other => {
          bail!(
            "unknown config key: \
             {other}"
          );
        }
      }
    }
    Ok(())
  }

  /// Markup for the information
  /// section. Inline text takes
  /// precedence over the file.
  #[tracing::instrument(skip(self))]
  pub fn information(
    &self
  ) -> anyhow::Result<Option<TrustedMarkup>>
  {
    if let Some(markup) = self
      .frontend
      .information
      .clone()
      .and_then(TrustedMarkup::trust)
    {
      if let Some(file) =
        &self.frontend.information_file
      {
        warn!(
          file = %file.display(),
          "both information and \
           information_file are set; \
           using inline information"
        );
      }
      return Ok(Some(markup));
    }

    let Some(file) =
      &self.frontend.information_file
    else {
      return Ok(None);
    };

    let path = self.resolve_relative(file);
    debug!(file = %path.display(), "reading information file");
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read information \
             file {}",
            path.display()
          )
        })?;
    Ok(TrustedMarkup::trust(text))
  }

  pub fn legend(&self) -> &LegendState {
    &self.panel.legend
  }

  pub fn frontend_dto(
    &self
  ) -> anyhow::Result<FrontendConfigDto>
  {
    Ok(FrontendConfigDto {
      information: self.information()?,
      legend:      self.panel.legend.clone()
    })
  }

  pub fn snapshot(
    &self
  ) -> anyhow::Result<ConfigSnapshot> {
    Ok(ConfigSnapshot {
      information: self.information()?,
      legend:      self.panel.legend.clone(),
      loaded_from: self.loaded_from.clone()
    })
  }

  fn resolve_relative(
    &self,
    path: &Path
  ) -> PathBuf {
    let expanded = expand_tilde(path);
    if expanded.is_absolute() {
      return expanded;
    }
    let base_dir = self
      .loaded_from
      .as_deref()
      .and_then(Path::parent)
      .map(Path::to_path_buf)
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });
    base_dir.join(expanded)
  }
}

#[tracing::instrument(skip(
  override_path
))]
pub fn resolve_config_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(config_env) =
    std::env::var(CONFIG_ENV)
  {
    let trimmed = config_env.trim();
    if trimmed == "/dev/null" {
      return Ok(None);
    }
    if !trimmed.is_empty() {
      return Ok(Some(PathBuf::from(
        trimmed
      )));
    }
  }

  let config_dir = dirs::config_dir()
    .ok_or_else(|| {
      anyhow!(
        "cannot determine config \
         directory"
      )
    })?;
  let candidate = config_dir
    .join("vista")
    .join("vista.toml");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn non_empty(value: &str) -> Option<&str> {
  if value.is_empty() {
    None
  } else {
    Some(value)
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod config_tests {
  use vista_gui_shared::LegendValue;

  use super::*;

  fn overrides(
    pairs: &[(&str, &str)]
  ) -> Vec<(String, String)> {
    pairs
      .iter()
      .map(|(k, v)| {
        (k.to_string(), v.to_string())
      })
      .collect()
  }

  #[test]
  fn parses_frontend_and_panel_sections()
  {
    let cfg = Config::from_toml_str(
      r#"
[frontend]
information = "<p>Welcome</p>"

[panel.legend]
position = "right"
mode = "table"
values = ["sum", "min"]
"#,
      None
    )
    .expect("parse config");

    assert_eq!(
      cfg
        .information()
        .expect("information")
        .map(TrustedMarkup::into_string),
      Some("<p>Welcome</p>".to_string())
    );
    assert_eq!(
      cfg.legend().position(),
      Some(LegendPosition::Right)
    );
    assert_eq!(cfg.legend().values(), &[
      LegendValue::Sum,
      LegendValue::Min
    ]);
  }

  #[test]
  fn empty_sections_mean_defaults() {
    let cfg =
      Config::from_toml_str("", None)
        .expect("parse config");
    assert_eq!(
      cfg.information().expect("info"),
      None
    );
    assert_eq!(
      cfg.legend(),
      &LegendState::Hidden
    );
  }

  #[test]
  fn empty_information_is_absent() {
    let cfg = Config::from_toml_str(
      "[frontend]\ninformation = \"\"\n",
      None
    )
    .expect("parse config");
    assert_eq!(
      cfg.information().expect("info"),
      None
    );
  }

  #[test]
  fn unknown_keys_are_rejected() {
    let err = Config::from_toml_str(
      "[frontend]\nbanner = \"x\"\n",
      None
    )
    .expect_err("unknown key");
    assert!(
      format!("{err:#}")
        .contains("invalid config")
    );
  }

  #[test]
  fn misspelled_legend_keys_are_rejected(
  ) {
    let err = Config::from_toml_str(
      "[panel.legend]\nposition = \"bottom\"\nmdoe = \"table\"\n",
      None
    )
    .expect_err("unknown legend key");
    let message = format!("{err:#}");
    assert!(
      message.contains("invalid config")
    );
    assert!(message.contains("mdoe"));
  }

  #[test]
  fn legend_overrides_are_normalized() {
    let mut cfg = Config::default();
    cfg
      .apply_overrides(overrides(&[
        ("panel.legend.mode", "table"),
      ]))
      .expect("apply mode");
    assert_eq!(
      cfg.legend(),
      &LegendState::Hidden
    );

    cfg
      .apply_overrides(overrides(&[
        ("panel.legend.position", "bottom"),
        ("panel.legend.mode", "table"),
        ("panel.legend.values", "max, sum,max"),
      ]))
      .expect("apply legend");
    assert_eq!(cfg.legend().values(), &[
      LegendValue::Max,
      LegendValue::Sum
    ]);

    cfg
      .apply_overrides(overrides(&[
        ("panel.legend.mode", "list"),
      ]))
      .expect("apply list");
    assert!(cfg.legend().values().is_empty());

    cfg
      .apply_overrides(overrides(&[
        ("panel.legend.position", ""),
      ]))
      .expect("hide");
    assert_eq!(
      cfg.legend(),
      &LegendState::Hidden
    );
  }

  #[test]
  fn bad_overrides_fail() {
    let mut cfg = Config::default();
    assert!(
      cfg
        .apply_overrides(overrides(&[(
          "panel.legend.position",
          "left"
        )]))
        .is_err()
    );
    assert!(
      cfg
        .apply_overrides(overrides(&[(
          "frontend.title",
          "x"
        )]))
        .is_err()
    );
  }
}
