mod legend;
mod markup;

pub use legend::{
  LegendAction,
  LegendControl,
  LegendLayout,
  LegendMode,
  LegendOptions,
  LegendPosition,
  LegendState,
  LegendValue,
  LegendValues
};
pub use markup::TrustedMarkup;
use serde::{
  Deserialize,
  Serialize
};

/// Frontend configuration handed from
/// the host to the UI.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct FrontendConfigDto {
  #[serde(default)]
  pub information: Option<TrustedMarkup>,
  #[serde(default)]
  pub legend:      LegendState
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct UiLogArg {
  pub event:  String,
  pub detail: String
}

#[cfg(test)]
mod dto_tests {
  use super::*;

  #[test]
  fn frontend_config_defaults_when_fields_missing(
  ) {
    let dto: FrontendConfigDto =
      serde_json::from_str("{}")
        .expect("decode");
    assert_eq!(
      dto,
      FrontendConfigDto::default()
    );
    assert_eq!(dto.information, None);
    assert_eq!(
      dto.legend,
      LegendState::Hidden
    );
  }

  #[test]
  fn frontend_config_wire_shape() {
    let dto = FrontendConfigDto {
      information: TrustedMarkup::trust(
        "<em>hi</em>"
      ),
      legend:      LegendState::shown()
    };
    assert_eq!(
      serde_json::to_value(&dto)
        .expect("encode"),
      serde_json::json!({
        "information": "<em>hi</em>",
        "legend": { "position": "bottom" }
      })
    );
  }
}
