use gloo::storage::errors::StorageError;
use gloo::storage::{
  LocalStorage,
  Storage
};
use tracing::warn;
use vista_gui_shared::LegendState;

const PANEL_LEGEND_STORAGE_KEY: &str =
  "vista.panel.legend";

/// `None` when nothing was saved yet; a
/// saved hidden legend is
/// `Some(Hidden)`.
pub(super) fn load_panel_legend()
-> Option<LegendState> {
  match LocalStorage::get::<LegendState>(
    PANEL_LEGEND_STORAGE_KEY
  ) {
    | Ok(state) => Some(state),
    | Err(StorageError::KeyNotFound(
      _
    )) => None,
    | Err(err) => {
      warn!(error = %err, "discarding unreadable saved legend");
      None
    }
  }
}

pub(super) fn save_panel_legend(
  state: &LegendState
) {
  if let Err(err) = LocalStorage::set(
    PANEL_LEGEND_STORAGE_KEY,
    state
  ) {
    warn!(error = %err, "failed to save legend");
  }
}

pub(super) fn clear_panel_legend() {
  LocalStorage::delete(
    PANEL_LEGEND_STORAGE_KEY
  );
}
