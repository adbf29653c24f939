pub mod commands;
pub mod config;
pub mod error;
pub mod geometry;
pub mod overlay;
pub mod preset;

pub use commands::*;
pub use config::RuntimeConfig;
pub use error::*;
pub use overlay::*;
pub use preset::*;

use std::sync::Mutex;
use tauri::{
    Manager, RunEvent, Wry,
    plugin::{Builder, TauriPlugin},
};

pub fn init() -> TauriPlugin<Wry> {
    Builder::<Wry, ()>::new("streamlay")
        .invoke_handler(tauri::generate_handler![
            commands::create_overlays,
            commands::list_overlays,
            commands::show_overlay,
            commands::hide_overlay,
            commands::destroy_overlay,
            commands::show_all_overlays,
            commands::hide_all_overlays,
            commands::destroy_all_overlays,
            // Preset Commands
            commands::preset_list,
            commands::preset_save,
            commands::preset_delete,
            commands::preset_launch
        ])
        .setup(|app, _api| {
            let config = RuntimeConfig::from_env();

            let data_dir = match &config.data_dir {
                Some(dir) => dir.clone(),
                None => app.path().app_data_dir()?,
            };
            let presets = PresetStore::in_dir(&data_dir)?;
            app.manage(PresetState(Mutex::new(presets)));

            let backend = TauriBackend::new(app.app_handle().clone());
            let manager = OverlayManager::new(backend, config.offscreen_margin);
            app.manage(OverlayState(Mutex::new(manager)));

            tracing::info!(?config, "streamlay core initialized");
            app.manage(config);

            Ok(())
        })
        .on_event(|app, event| {
            if let RunEvent::Exit = event {
                let state = app.state::<OverlayState>();
                match state.0.lock() {
                    Ok(mut manager) => {
                        let closed = manager.destroy_all();
                        tracing::info!(closed, "closed overlays on exit");
                    }
                    Err(e) => tracing::error!(error = %e, "overlay registry lock poisoned"),
                };
            }
        })
        .build()
}
