use serde::{Serialize, de::DeserializeOwned};
use tauri_wasm::{args, invoke};
use tracing::warn;
use vista_gui_shared::{FrontendConfigDto, UiLogArg};

#[derive(Serialize)]
struct NoArgs {}

#[derive(Serialize)]
struct UiLogPayload {
    args: UiLogArg,
}

pub async fn invoke_tauri<R, A>(cmd: &str, args_payload: &A) -> Result<R, String>
where
    R: DeserializeOwned,
    A: Serialize + ?Sized,
{
    let payload = args(args_payload).map_err(|e| format!("failed to encode args: {e}"))?;
    let value = invoke(cmd)
        .with_args(payload)
        .await
        .map_err(|e| format!("invoke error: {e:?}"))?;

    serde_wasm_bindgen::from_value(value).map_err(|e| format!("decode error: {e}"))
}

pub async fn fetch_frontend_config() -> Result<FrontendConfigDto, String> {
    invoke_tauri("frontend_config", &NoArgs {}).await
}

pub async fn reload_frontend_config() -> Result<FrontendConfigDto, String> {
    invoke_tauri("frontend_config_reload", &NoArgs {}).await
}

/// Fire-and-forget interaction log on the host side.
pub fn log_ui_event(event: &str, detail: String) {
    let payload = UiLogPayload {
        args: UiLogArg {
            event: event.to_string(),
            detail,
        },
    };
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = invoke_tauri::<(), _>("ui_log", &payload).await {
            warn!(error = %err, event = %payload.args.event, "failed to forward ui log");
        }
    });
}
