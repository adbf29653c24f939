#[cfg(desktop)]
mod shortcut;
mod tray;

use tauri::{AppHandle, Manager, WindowEvent};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tracing_subscriber::EnvFilter;

use streamlay_core::{OverlayManager, OverlayState, TauriBackend};

pub use tray::{CONTROL_WINDOW_LABEL, open_control_window};

const DEFAULT_LOG_FILTER: &str = "streamlay_runtime=info,streamlay_core=info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // A subscriber may already be installed when embedded in another host.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Run `f` against the overlay registry, logging instead of failing when the
/// lock is poisoned.
pub(crate) fn with_overlays<T>(
    app: &AppHandle,
    f: impl FnOnce(&mut OverlayManager<TauriBackend>) -> T,
) -> Option<T> {
    let state = app.state::<OverlayState>();
    match state.0.lock() {
        Ok(mut manager) => Some(f(&mut manager)),
        Err(e) => {
            tracing::error!(error = %e, "overlay registry lock poisoned");
            None
        }
    }
}

/// Park every overlay, or bring them all back when they are already parked.
pub(crate) fn toggle_overlays(app: &AppHandle) {
    with_overlays(app, |manager| {
        if manager.all_hidden() {
            let shown = manager.show_all();
            tracing::info!(shown, "toggled overlays visible");
        } else {
            let hidden = manager.hide_all();
            tracing::info!(hidden, "toggled overlays hidden");
        }
    });
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_tracing();
    tracing::info!("starting Streamlay");

    let builder = tauri::Builder::default();
    #[cfg(desktop)]
    let builder = builder.plugin(tauri_plugin_global_shortcut::Builder::new().build());

    builder
        .plugin(streamlay_core::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            tray::setup_tray(app)?;

            #[cfg(desktop)]
            {
                if let Err(e) = shortcut::register_toggle_shortcut(app.handle()) {
                    tracing::warn!(error = %e, "failed to register toggle shortcut");
                }
            }

            open_control_window(app.handle())?;
            Ok(())
        })
        .on_window_event(|window, event| {
            if let WindowEvent::CloseRequested { api, .. } = event {
                // Overlays close normally; only the control window asks first.
                if window.label() == CONTROL_WINDOW_LABEL {
                    api.prevent_close();

                    let window_clone = window.clone();
                    window
                        .dialog()
                        .message("What would you like to do?")
                        .title("Close Streamlay")
                        .kind(MessageDialogKind::Info)
                        .buttons(MessageDialogButtons::OkCancelCustom(
                            "Minimize to Tray".to_string(),
                            "Quit App".to_string(),
                        ))
                        .show(move |minimize| {
                            if minimize {
                                let _ = window_clone.hide();
                            } else {
                                window_clone.app_handle().exit(0);
                            }
                        });
                }
            }
        })
        .run(tauri::generate_context!())
        .expect("error running Streamlay")
}
