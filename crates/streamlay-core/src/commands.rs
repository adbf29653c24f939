use std::sync::Mutex;
use tauri::{State, command};

use crate::{
    overlay::{OverlayConfig, OverlayManager, OverlayOutcome, OverlaySummary, TauriBackend},
    preset::{Preset, PresetMap, PresetStore},
};

pub struct OverlayState(pub Mutex<OverlayManager<TauriBackend>>);
pub struct PresetState(pub Mutex<PresetStore>);

// Window creation from a synchronous command runs on the main thread and
// deadlocks on Windows, so the spawning commands are async.
#[command]
pub async fn create_overlays(
    state: State<'_, OverlayState>,
    configs: Vec<OverlayConfig>,
) -> Result<Vec<String>, String> {
    let mut manager = state.0.lock().map_err(|e| e.to_string())?;
    Ok(manager.create(configs))
}

#[command]
pub fn list_overlays(state: State<'_, OverlayState>) -> Result<Vec<OverlaySummary>, String> {
    let mut manager = state.0.lock().map_err(|e| e.to_string())?;
    Ok(manager.list_overlays())
}

#[command]
pub fn show_overlay(state: State<'_, OverlayState>, id: String) -> Result<OverlayOutcome, String> {
    let mut manager = state.0.lock().map_err(|e| e.to_string())?;
    Ok(manager.show(&id).into())
}

#[command]
pub fn hide_overlay(state: State<'_, OverlayState>, id: String) -> Result<OverlayOutcome, String> {
    let mut manager = state.0.lock().map_err(|e| e.to_string())?;
    Ok(manager.hide(&id).into())
}

#[command]
pub fn destroy_overlay(
    state: State<'_, OverlayState>,
    id: String,
) -> Result<OverlayOutcome, String> {
    let mut manager = state.0.lock().map_err(|e| e.to_string())?;
    Ok(manager.destroy(&id).into())
}

#[command]
pub fn show_all_overlays(state: State<'_, OverlayState>) -> Result<usize, String> {
    let mut manager = state.0.lock().map_err(|e| e.to_string())?;
    Ok(manager.show_all())
}

#[command]
pub fn hide_all_overlays(state: State<'_, OverlayState>) -> Result<usize, String> {
    let mut manager = state.0.lock().map_err(|e| e.to_string())?;
    Ok(manager.hide_all())
}

#[command]
pub fn destroy_all_overlays(state: State<'_, OverlayState>) -> Result<usize, String> {
    let mut manager = state.0.lock().map_err(|e| e.to_string())?;
    Ok(manager.destroy_all())
}

// ============================================
// Preset Commands
// ============================================

#[command]
pub fn preset_list(state: State<'_, PresetState>) -> Result<PresetMap, String> {
    let store = state.0.lock().map_err(|e| e.to_string())?;
    Ok(store.list())
}

#[command]
pub fn preset_save(
    state: State<'_, PresetState>,
    name: String,
    preset: Preset,
) -> Result<PresetMap, String> {
    let store = state.0.lock().map_err(|e| e.to_string())?;
    store.save(&name, &preset).map_err(|e| e.to_string())
}

#[command]
pub fn preset_delete(state: State<'_, PresetState>, name: String) -> Result<PresetMap, String> {
    let store = state.0.lock().map_err(|e| e.to_string())?;
    store.delete(&name).map_err(|e| e.to_string())
}

#[command]
pub async fn preset_launch(
    presets: State<'_, PresetState>,
    overlays: State<'_, OverlayState>,
    name: String,
) -> Result<Vec<String>, String> {
    let preset = {
        let store = presets.0.lock().map_err(|e| e.to_string())?;
        store.get(&name).map_err(|e| e.to_string())?
    };

    tracing::info!(preset = %name, overlays = preset.urls.len(), "launching preset");
    let mut manager = overlays.0.lock().map_err(|e| e.to_string())?;
    Ok(manager.create(preset.urls))
}
