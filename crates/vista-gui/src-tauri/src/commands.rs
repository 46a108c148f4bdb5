use tauri::State;
use tracing::{info, instrument};
use vista_gui_shared::{FrontendConfigDto, UiLogArg};

use crate::state::AppState;

fn err_to_string(err: anyhow::Error) -> String {
    format!("{err:#}")
}

#[tauri::command]
#[instrument(skip(state))]
pub async fn frontend_config(state: State<'_, AppState>) -> Result<FrontendConfigDto, String> {
    state.frontend_config().map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state))]
pub async fn frontend_config_reload(
    state: State<'_, AppState>,
) -> Result<FrontendConfigDto, String> {
    state.reload().map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(args), fields(event = %args.event))]
pub async fn ui_log(args: UiLogArg) -> Result<(), String> {
    info!(event = %args.event, detail = %args.detail, "ui interaction");
    Ok(())
}
