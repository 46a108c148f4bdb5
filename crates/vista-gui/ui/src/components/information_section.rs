use vista_gui_shared::TrustedMarkup;
use yew::{
  AttrValue,
  Html,
  function_component,
  html
};

use crate::app::use_information;

/// Displayed only when the frontend
/// config carries information markup.
#[function_component(InformationSection)]
pub fn information_section() -> Html {
  let information = use_information();
  information_card(information.as_ref())
}

fn information_card(
  information: Option<&TrustedMarkup>
) -> Html {
  let Some(markup) = information else {
    return html! {};
  };

  let body = Html::from_html_unchecked(
    AttrValue::from(
      markup.as_str().to_string()
    )
  );

  html! {
      <section class="information-section">
          <div class="information-title">
              <span class="information-icon" aria-hidden="true">{ "ⓘ" }</span>
              <h2>{ "Information" }</h2>
          </div>
          <div class="panel">
              <div class="card-content">{ body }</div>
          </div>
      </section>
  }
}
