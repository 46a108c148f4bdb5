mod storage;

use tracing::warn;
use vista_gui_shared::{
  FrontendConfigDto,
  LegendState,
  TrustedMarkup
};
use yew::{
  Callback,
  ContextProvider,
  Html,
  MouseEvent,
  function_component,
  hook,
  html,
  use_context,
  use_effect_with,
  use_state
};

use crate::api;
use crate::components::{
  InformationSection,
  LegendOptionsEditor
};

/// Information markup from the
/// frontend config context.
#[hook]
pub fn use_information()
-> Option<TrustedMarkup> {
  use_context::<FrontendConfigDto>()
    .and_then(|config| {
      config.information
    })
}

#[function_component(App)]
pub fn app() -> Html {
  let frontend =
    use_state(FrontendConfigDto::default);
  // Saved edits win over the configured
  // legend.
  let saved_legend =
    use_state(storage::load_panel_legend);

  {
    let frontend = frontend.clone();
    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          match api::fetch_frontend_config()
            .await
          {
            | Ok(config) => {
              frontend.set(config)
            }
            | Err(err) => {
              warn!(error = %err, "failed to load frontend config");
            }
          }
        }
      );
      || ()
    });
  }

  let legend: LegendState = (*saved_legend)
    .clone()
    .unwrap_or_else(|| {
      frontend.legend.clone()
    });

  let on_legend_change = {
    let saved_legend =
      saved_legend.clone();
    Callback::from(
      move |next: LegendState| {
        storage::save_panel_legend(&next);
        api::log_ui_event(
          "legend_change",
          serde_json::to_string(&next)
            .unwrap_or_default()
        );
        saved_legend.set(Some(next));
      }
    )
  };

  let on_reset_legend = {
    let saved_legend =
      saved_legend.clone();
    Callback::from(move |_: MouseEvent| {
      storage::clear_panel_legend();
      api::log_ui_event(
        "legend_reset",
        String::new()
      );
      saved_legend.set(None);
    })
  };

  let on_reload = {
    let frontend = frontend.clone();
    Callback::from(move |_: MouseEvent| {
      let frontend = frontend.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match api::reload_frontend_config()
            .await
          {
            | Ok(config) => {
              frontend.set(config)
            }
            | Err(err) => {
              warn!(error = %err, "failed to reload frontend config");
            }
          }
        }
      );
    })
  };

  let preview =
    serde_json::to_string_pretty(&legend)
      .unwrap_or_default();

  html! {
      <ContextProvider<FrontendConfigDto> context={(*frontend).clone()}>
          <main class="home">
              <InformationSection />
              <section class="panel">
                  <div class="header">
                      <span>{ "Legend" }</span>
                      <span>
                          <button class="btn" onclick={on_reset_legend}>{ "Reset" }</button>
                          <button class="btn" onclick={on_reload}>{ "Reload config" }</button>
                      </span>
                  </div>
                  <LegendOptionsEditor value={legend} on_change={on_legend_change} />
                  <pre class="legend-preview">{ preview }</pre>
              </section>
          </main>
      </ContextProvider<FrontendConfigDto>>
  }
}
