use tauri::{AppHandle, Manager};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, ShortcutState};

use streamlay_core::RuntimeConfig;

/// Bind the configured shortcut to hide/show every overlay at once.
pub fn register_toggle_shortcut(app: &AppHandle) -> Result<(), tauri_plugin_global_shortcut::Error> {
    let config = app.state::<RuntimeConfig>();
    let Some(shortcut) = config.toggle_shortcut.as_deref() else {
        tracing::info!("toggle shortcut disabled");
        return Ok(());
    };

    app.global_shortcut()
        .on_shortcut(shortcut, |app, _shortcut, event| {
            if event.state() == ShortcutState::Pressed {
                crate::toggle_overlays(app);
            }
        })?;

    tracing::info!(shortcut, "toggle shortcut registered");
    Ok(())
}
