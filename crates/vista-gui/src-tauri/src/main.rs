mod commands;
mod state;

use anyhow::Context;
use tracing::{
  error,
  info,
  warn
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
  EnvFilter,
  fmt
};

const LOG_DIR_ENV: &str =
  "VISTA_LOG_DIR";

fn init_tracing() -> WorkerGuard {
  let filter =
    EnvFilter::try_from_default_env()
      .or_else(|_| {
        EnvFilter::try_new(
          "info,vista_gui_tauri=debug,\
           vista_core=debug"
        )
      })
      .unwrap_or_else(|_| {
        EnvFilter::new("info")
      });

  let log_dir = std::env::var_os(
    LOG_DIR_ENV
  )
  .map(std::path::PathBuf::from)
  .unwrap_or_else(|| {
    std::env::temp_dir().join("vista")
  });
  let (file_writer, guard) =
    tracing_appender::non_blocking(
      tracing_appender::rolling::daily(
        &log_dir,
        "vista-gui.log"
      )
    );

  let _ =
    tracing_subscriber::registry()
      .with(filter)
      .with(
        fmt::layer()
          .with_target(true)
          .with_line_number(true)
      )
      .with(
        fmt::layer()
          .with_ansi(false)
          .with_writer(file_writer)
      )
      .try_init();

  info!(log_dir = %log_dir.display(), "file logging enabled");
  guard
}

fn main() {
  let _log_guard = init_tracing();

  info!("starting Vista GUI backend");

  let state =
    match state::AppState::new()
      .context(
        "failed to initialize app \
         state"
      ) {
      | Ok(state) => state,
      | Err(err) => {
        error!(error = %format!("{err:#}"), "initialization failed");
        std::process::exit(1);
      }
    };

  let result = tauri::Builder::default()
    .setup(|app| {
      install_signal_handlers(
        app.handle().clone()
      );
      Ok(())
    })
    .manage(state)
    .invoke_handler(
      tauri::generate_handler![
        commands::frontend_config,
        commands::frontend_config_reload,
        commands::ui_log,
      ]
    )
    .run(tauri::generate_context!());

  if let Err(err) = result {
    error!(error = %err, "Vista GUI backend stopped with an error");
    std::process::exit(1);
  }
}

fn install_signal_handlers(
  app_handle: tauri::AppHandle
) {
  tauri::async_runtime::spawn(
    exit_on_signal(
      wait_for_shutdown_signal(),
      move |code| app_handle.exit(code)
    )
  );
}

/// Waits for `signal`, then asks the
/// app to exit with status 0.
async fn exit_on_signal<S, E>(
  signal: S,
  exit: E
) where
  S: Future<Output = ()>,
  E: FnOnce(i32)
{
  signal.await;
  warn!(
    "received shutdown signal; \
     exiting application"
  );
  exit(0);
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
  use tokio::signal::unix::{
    SignalKind,
    signal
  };

  let mut sigterm = match signal(
    SignalKind::terminate()
  ) {
    | Ok(stream) => stream,
    | Err(error) => {
      error!(
        %error,
        "failed to register SIGTERM \
         handler; falling back to \
         ctrl_c"
      );
      let _ =
        tokio::signal::ctrl_c().await;
      return;
    }
  };

  tokio::select! {
    _ = tokio::signal::ctrl_c() => {}
    _ = sigterm.recv() => {}
  }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
  if let Err(error) =
    tokio::signal::ctrl_c().await
  {
    error!(
      %error,
      "failed waiting for ctrl_c \
       signal"
    );
  }
}

#[cfg(test)]
mod shutdown_tests {
  use std::sync::Arc;

  use parking_lot::Mutex;

  use super::*;

  fn recorder() -> (
    Arc<Mutex<Option<i32>>>,
    impl FnOnce(i32)
  ) {
    let code = Arc::new(Mutex::new(None));
    let seen = Arc::clone(&code);
    (code, move |status| {
      *seen.lock() = Some(status);
    })
  }

  #[test]
  fn exits_cleanly_once_signalled() {
    let (code, exit) = recorder();
    tauri::async_runtime::block_on(
      exit_on_signal(
        std::future::ready(()),
        exit
      )
    );
    assert_eq!(*code.lock(), Some(0));
  }

  #[test]
  fn keeps_running_until_signalled() {
    let (code, exit) = recorder();
    tauri::async_runtime::block_on(
      async move {
        tokio::select! {
          biased;
          _ = exit_on_signal(std::future::pending::<()>(), exit) => {}
          _ = std::future::ready(()) => {}
        }
      }
    );
    assert_eq!(*code.lock(), None);
  }
}
