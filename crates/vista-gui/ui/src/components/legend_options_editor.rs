use tracing::debug;
use vista_gui_shared::{
  LegendAction,
  LegendControl,
  LegendMode,
  LegendPosition,
  LegendState,
  LegendValue
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  Callback,
  Event,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct LegendOptionsEditorProps {
  pub value:     LegendState,
  pub on_change: Callback<LegendState>
}

/// Controlled editor: every enabled
/// interaction emits the complete next
/// state.
#[function_component(LegendOptionsEditor)]
pub fn legend_options_editor(
  props: &LegendOptionsEditorProps
) -> Html {
  let value = &props.value;

  let dispatch = {
    let value = props.value.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |action: LegendAction| {
        if !value
          .is_enabled(action.control())
        {
          debug!(?action, "legend control disabled; ignoring");
          return;
        }
        on_change
          .emit(value.apply(action));
      }
    )
  };

  let on_show_change = {
    let dispatch = dispatch.clone();
    Callback::from(move |e: Event| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      dispatch.emit(
        LegendAction::SetVisible(
          input.checked()
        )
      );
    })
  };

  let on_position_change = {
    let dispatch = dispatch.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      if let Some(position) =
        LegendPosition::from_key(
          &select.value()
        )
      {
        dispatch.emit(
          LegendAction::SetPosition(
            position
          )
        );
      }
    })
  };

  let on_mode_change = {
    let dispatch = dispatch.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      if let Some(mode) =
        LegendMode::from_key(
          &select.value()
        )
      {
        dispatch.emit(
          LegendAction::SetMode(mode)
        );
      }
    })
  };

  let position_enabled = value
    .is_enabled(LegendControl::Position);
  let mode_enabled = value
    .is_enabled(LegendControl::Mode);
  let values_enabled = value
    .is_enabled(LegendControl::Values);
  let shown_position =
    value.position().unwrap_or_default();
  let shown_mode =
    value.mode().unwrap_or_default();

  html! {
      <div class="legend-options-editor">
          <div class="field">
              <label for="legend-show">{ "Show" }</label>
              <input
                  id="legend-show"
                  type="checkbox"
                  role="switch"
                  checked={value.is_visible()}
                  onchange={on_show_change}
              />
          </div>

          <div class="field">
              <label for="legend-position">{ "Position" }</label>
              <select id="legend-position" disabled={!position_enabled} onchange={on_position_change}>
                  {
                      for LegendPosition::all().into_iter().map(|position| html! {
                          <option value={position.as_key()} selected={position == shown_position}>
                              { position.label() }
                          </option>
                      })
                  }
              </select>
          </div>

          <div class="field">
              <label for="legend-mode">{ "Mode" }</label>
              <select id="legend-mode" disabled={!mode_enabled} onchange={on_mode_change}>
                  {
                      for LegendMode::all().into_iter().map(|mode| html! {
                          <option value={mode.as_key()} selected={mode == shown_mode}>
                              { mode.label() }
                          </option>
                      })
                  }
              </select>
          </div>

          <div class="field">
              <span id="legend-values-label">{ "Values" }</span>
              <div>
                  <div
                      role="listbox"
                      aria-labelledby="legend-values-label"
                      aria-multiselectable="true"
                      aria-disabled={(!values_enabled).to_string()}
                      class={classes!("legend-values", (!values_enabled).then_some("disabled"))}
                  >
                      {
                          for LegendValue::all().into_iter().map(|option| {
                              let selected = value.values().contains(&option);
                              let dispatch = dispatch.clone();
                              html! {
                                  <button
                                      type="button"
                                      role="option"
                                      aria-selected={selected.to_string()}
                                      class={classes!("legend-value", selected.then_some("selected"))}
                                      disabled={!values_enabled}
                                      onclick={move |_| dispatch.emit(LegendAction::ToggleValue(option))}
                                  >
                                      <span class="legend-value-label">{ option.label() }</span>
                                      <span class="legend-value-description">{ option.description() }</span>
                                  </button>
                              }
                          })
                      }
                  </div>
                  <div class="legend-values-summary">{ selected_summary(value) }</div>
              </div>
          </div>
      </div>
  }
}

/// Selected value labels, in selection
/// order.
fn selected_summary(
  state: &LegendState
) -> String {
  if state.values().is_empty() {
    return "No values selected"
      .to_string();
  }
  state
    .values()
    .iter()
    .map(|value| value.label())
    .collect::<Vec<_>>()
    .join(", ")
}
