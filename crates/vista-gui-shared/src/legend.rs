use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
  #[default]
  Bottom,
  Right
}

impl LegendPosition {
  pub fn all() -> [Self; 2] {
    [Self::Bottom, Self::Right]
  }

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Bottom => "bottom",
      | Self::Right => "right"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::Bottom => "Bottom",
      | Self::Right => "Right"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    match key {
      | "bottom" => Some(Self::Bottom),
      | "right" => Some(Self::Right),
      | _ => None
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
#[serde(rename_all = "lowercase")]
pub enum LegendMode {
  #[default]
  List,
  Table
}

impl LegendMode {
  pub fn all() -> [Self; 2] {
    [Self::List, Self::Table]
  }

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::List => "list",
      | Self::Table => "table"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::List => "List",
      | Self::Table => "Table"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    match key {
      | "list" => Some(Self::List),
      | "table" => Some(Self::Table),
      | _ => None
    }
  }
}

/// Calculation shown in a table legend
/// column.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(rename_all = "kebab-case")]
pub enum LegendValue {
  First,
  FirstNumber,
  Last,
  LastNumber,
  Mean,
  Sum,
  Min,
  Max
}

impl LegendValue {
  pub fn all() -> [Self; 8] {
    [
      Self::First,
      Self::FirstNumber,
      Self::Last,
      Self::LastNumber,
      Self::Mean,
      Self::Sum,
      Self::Min,
      Self::Max
    ]
  }

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::First => "first",
      | Self::FirstNumber => {
        "first-number"
      }
      | Self::Last => "last",
      | Self::LastNumber => {
        "last-number"
      }
      | Self::Mean => "mean",
      | Self::Sum => "sum",
      | Self::Min => "min",
      | Self::Max => "max"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::First => "First",
      | Self::FirstNumber => "First *",
      | Self::Last => "Last",
      | Self::LastNumber => "Last *",
      | Self::Mean => "Avg",
      | Self::Sum => "Sum",
      | Self::Min => "Min",
      | Self::Max => "Max"
    }
  }

  pub fn description(
    self
  ) -> &'static str {
    match self {
      | Self::First => "First value",
      | Self::FirstNumber => {
        "First numeric value"
      }
      | Self::Last => "Last value",
      | Self::LastNumber => {
        "Last numeric value"
      }
      | Self::Mean => {
        "Average of all values"
      }
      | Self::Sum => {
        "The sum of all values"
      }
      | Self::Min => "Minimum value",
      | Self::Max => "Maximum value"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    Self::all()
      .into_iter()
      .find(|value| {
        value.as_key() == key
      })
  }
}

/// Serialized legend options, as stored
/// in panel configuration.
///
/// Any combination of fields can be
/// decoded; convert into [`LegendState`]
/// to get the normalized form.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(deny_unknown_fields)]
pub struct LegendOptions {
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub position: Option<LegendPosition>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub mode:     Option<LegendMode>,
  #[serde(
    default,
    deserialize_with = "null_as_empty",
    skip_serializing_if = "Vec::is_empty"
  )]
  pub values:   Vec<LegendValue>
}

/// `values: null` reads as no values.
fn null_as_empty<'de, D>(
  deserializer: D
) -> Result<Vec<LegendValue>, D::Error>
where
  D: Deserializer<'de>
{
  Ok(
    Option::<Vec<LegendValue>>::deserialize(
      deserializer
    )?
    .unwrap_or_default()
  )
}

/// Ordered set of selected values.
/// Order is selection order.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct LegendValues(
  Vec<LegendValue>
);

impl LegendValues {
  pub fn as_slice(
    &self
  ) -> &[LegendValue] {
    &self.0
  }

  pub fn contains(
    &self,
    value: LegendValue
  ) -> bool {
    self.0.contains(&value)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Appends `value` when missing,
  /// removes it otherwise.
  pub fn toggled(
    &self,
    value: LegendValue
  ) -> Self {
    let mut next = self.0.clone();
    if let Some(idx) = next
      .iter()
      .position(|v| *v == value)
    {
      next.remove(idx);
    } else {
      next.push(value);
    }
    Self(next)
  }
}

impl FromIterator<LegendValue>
  for LegendValues
{
  fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = LegendValue>
  {
    let mut values = Vec::new();
    for value in iter {
      if !values.contains(&value) {
        values.push(value);
      }
    }
    Self(values)
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub enum LegendLayout {
  /// No mode chosen yet; displays as
  /// a list.
  #[default]
  Unset,
  List,
  Table(LegendValues)
}

impl LegendLayout {
  pub fn mode(
    &self
  ) -> Option<LegendMode> {
    match self {
      | Self::Unset => None,
      | Self::List => {
        Some(LegendMode::List)
      }
      | Self::Table(_) => {
        Some(LegendMode::Table)
      }
    }
  }

  fn with_mode(
    &self,
    mode: LegendMode
  ) -> Self {
    match (self, mode) {
      | (
        Self::Table(values),
        LegendMode::Table
      ) => Self::Table(values.clone()),
      | (_, LegendMode::Table) => {
        Self::Table(
          LegendValues::default()
        )
      }
      | (_, LegendMode::List) => {
        Self::List
      }
    }
  }
}

/// Legend configuration of a panel.
///
/// Serializes as `Option<LegendOptions>`:
/// a hidden legend is `null`.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(
  from = "Option<LegendOptions>",
  into = "Option<LegendOptions>"
)]
pub enum LegendState {
  #[default]
  Hidden,
  Visible {
    position: LegendPosition,
    layout:   LegendLayout
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum LegendControl {
  Show,
  Position,
  Mode,
  Values
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegendAction {
  SetVisible(bool),
  SetPosition(LegendPosition),
  SetMode(LegendMode),
  ToggleValue(LegendValue),
  /// Replaces the whole selection;
  /// duplicates keep their first
  /// occurrence.
  SetValues(Vec<LegendValue>)
}

impl LegendAction {
  pub fn control(
    &self
  ) -> LegendControl {
    match self {
      | Self::SetVisible(_) => {
        LegendControl::Show
      }
      | Self::SetPosition(_) => {
        LegendControl::Position
      }
      | Self::SetMode(_) => {
        LegendControl::Mode
      }
      | Self::ToggleValue(_)
      | Self::SetValues(_) => {
        LegendControl::Values
      }
    }
  }
}

impl LegendState {
  /// State right after the "Show"
  /// switch is turned on.
  pub fn shown() -> Self {
    Self::Visible {
      position: LegendPosition::default(),
      layout:   LegendLayout::Unset
    }
  }

  pub fn is_visible(&self) -> bool {
    matches!(self, Self::Visible { .. })
  }

  pub fn position(
    &self
  ) -> Option<LegendPosition> {
    match self {
      | Self::Hidden => None,
      | Self::Visible {
        position,
        ..
      } => Some(*position)
    }
  }

  pub fn mode(
    &self
  ) -> Option<LegendMode> {
    match self {
      | Self::Hidden => None,
      | Self::Visible {
        layout,
        ..
      } => layout.mode()
    }
  }

  pub fn values(
    &self
  ) -> &[LegendValue] {
    match self {
      | Self::Visible {
        layout: LegendLayout::Table(values),
        ..
      } => values.as_slice(),
      | _ => &[]
    }
  }

  pub fn is_enabled(
    &self,
    control: LegendControl
  ) -> bool {
    match control {
      | LegendControl::Show => true,
      | LegendControl::Position
      | LegendControl::Mode => {
        self.is_visible()
      }
      | LegendControl::Values => {
        self.mode()
          == Some(LegendMode::Table)
      }
    }
  }

  /// Computes the state that follows
  /// `action`. Actions on a disabled
  /// control return an unchanged copy.
  pub fn apply(
    &self,
    action: LegendAction
  ) -> Self {
    if !self.is_enabled(action.control())
    {
      return self.clone();
    }

    match (self, action) {
      | (
        _,
        LegendAction::SetVisible(false)
      ) => Self::Hidden,
      | (
        Self::Hidden,
        LegendAction::SetVisible(true)
      ) => Self::shown(),
      | (
        Self::Visible {
          layout,
          ..
        },
        LegendAction::SetPosition(
          position
        )
      ) => Self::Visible {
        position,
        layout: layout.clone()
      },
      | (
        Self::Visible {
          position,
          layout
        },
        LegendAction::SetMode(mode)
      ) => Self::Visible {
        position: *position,
        layout:   layout.with_mode(mode)
      },
      | (
        Self::Visible {
          position,
          layout: LegendLayout::Table(values)
        },
        LegendAction::ToggleValue(value)
      ) => Self::Visible {
        position: *position,
        layout:   LegendLayout::Table(
          values.toggled(value)
        )
      },
      | (
        Self::Visible {
          position,
          layout: LegendLayout::Table(_)
        },
        LegendAction::SetValues(values)
      ) => Self::Visible {
        position: *position,
        layout:   LegendLayout::Table(
          values.into_iter().collect()
        )
      },
      | _ => self.clone()
    }
  }

  pub fn to_options(
    &self
  ) -> Option<LegendOptions> {
    match self {
      | Self::Hidden => None,
      | Self::Visible {
        position,
        layout
      } => Some(LegendOptions {
        position: Some(*position),
        mode:     layout.mode(),
        values:   self.values().to_vec()
      })
    }
  }
}

impl From<LegendOptions> for LegendState {
  fn from(options: LegendOptions) -> Self {
    let Some(position) = options.position
    else {
      return Self::Hidden;
    };

    let layout = match options.mode {
      | None => LegendLayout::Unset,
      | Some(LegendMode::List) => {
        LegendLayout::List
      }
      | Some(LegendMode::Table) => {
        LegendLayout::Table(
          options
            .values
            .into_iter()
            .collect()
        )
      }
    };

    Self::Visible {
      position,
      layout
    }
  }
}

impl From<Option<LegendOptions>>
  for LegendState
{
  fn from(
    options: Option<LegendOptions>
  ) -> Self {
    options
      .map(Self::from)
      .unwrap_or_default()
  }
}

impl From<LegendState>
  for Option<LegendOptions>
{
  fn from(state: LegendState) -> Self {
    state.to_options()
  }
}
