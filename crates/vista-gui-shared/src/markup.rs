use serde::{
  Deserialize,
  Serialize
};

/// Raw HTML the embedding application
/// vouches for. It is inserted into the
/// page without escaping, so only build
/// one from a trusted source.
///
/// Never empty.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(
  try_from = "String",
  into = "String"
)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
  /// Returns `None` for an empty
  /// string.
  pub fn trust(
    raw: impl Into<String>
  ) -> Option<Self> {
    let raw = raw.into();
    if raw.is_empty() {
      None
    } else {
      Some(Self(raw))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_string(self) -> String {
    self.0
  }
}

impl TryFrom<String> for TrustedMarkup {
  type Error = &'static str;

  fn try_from(
    raw: String
  ) -> Result<Self, Self::Error> {
    Self::trust(raw).ok_or(
      "trusted markup cannot be empty"
    )
  }
}

impl From<TrustedMarkup> for String {
  fn from(markup: TrustedMarkup) -> Self {
    markup.0
  }
}

#[cfg(test)]
mod markup_tests {
  use super::*;

  #[test]
  fn empty_markup_is_absent() {
    assert_eq!(
      TrustedMarkup::trust(""),
      None
    );
    assert!(
      serde_json::from_str::<TrustedMarkup>(
        "\"\""
      )
      .is_err()
    );
  }

  #[test]
  fn markup_is_kept_verbatim() {
    let raw =
      "<p>Ops on call: <b>#infra</b> &amp; friends</p>\n";
    let markup = TrustedMarkup::trust(raw)
      .expect("non-empty markup");
    assert_eq!(markup.as_str(), raw);

    let encoded =
      serde_json::to_string(&markup)
        .expect("serialize");
    let decoded: TrustedMarkup =
      serde_json::from_str(&encoded)
        .expect("deserialize");
    assert_eq!(decoded.into_string(), raw);
  }
}
