use std::collections::BTreeMap;

use crate::{
    Error,
    geometry::{DisplayLayout, offscreen_origin, placement},
    overlay::{OverlayConfig, OverlaySummary, OverlayWindow, WindowBackend, WindowSpec},
};

/// Registry of live overlay windows, keyed by a process-unique id.
///
/// Ids come from a counter starting at 1 and are never reused, even after the
/// overlay they named is gone.
pub struct OverlayManager<B: WindowBackend> {
    backend: B,
    windows: BTreeMap<u64, OverlayWindow<B::Handle>>,
    next_id: u64,
    offscreen_margin: f64,
}

impl<B: WindowBackend> OverlayManager<B> {
    pub fn new(backend: B, offscreen_margin: i32) -> Self {
        Self {
            backend,
            windows: BTreeMap::new(),
            next_id: 1,
            offscreen_margin: f64::from(offscreen_margin),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Spawn one overlay per config. Entries without a URL or whose window
    /// fails to open are logged and skipped.
    pub fn create(&mut self, configs: Vec<OverlayConfig>) -> Vec<String> {
        let mut ids = Vec::with_capacity(configs.len());

        for config in configs {
            if config.url.trim().is_empty() {
                tracing::warn!("skipping overlay config with an empty url");
                continue;
            }

            let url = config.url.clone();
            match self.spawn_overlay(config) {
                Ok(id) => ids.push(id),
                Err(e) => tracing::error!(%url, error = %e, "failed to spawn overlay"),
            }
        }

        ids
    }

    pub fn spawn_overlay(&mut self, config: OverlayConfig) -> Result<String, Error> {
        let key = self.next_id;
        self.next_id += 1;
        let id = key.to_string();

        let layout = self.layout();
        let rect = placement(&config, &layout.work_area());

        let spec = WindowSpec {
            url: config.url.trim().to_string(),
            rect,
            click_through: config.click_through,
            always_on_top: config.always_on_top,
        };

        tracing::debug!(%id, ?rect, "opening overlay window");
        let handle = self.backend.open(&id, &spec)?;

        let hidden = config.hide_from_desktop;
        if hidden {
            let (x, y) = offscreen_origin(
                &layout.virtual_bounds(),
                rect.width,
                self.offscreen_margin,
            );
            tracing::debug!(%id, x, y, "parking overlay off-screen");
            if let Err(e) = self.backend.move_to(&handle, x, y) {
                self.discard(&id, &handle);
                return Err(e);
            }
        }

        if let Err(e) = self.backend.show(&handle) {
            self.discard(&id, &handle);
            return Err(e);
        }

        tracing::info!(%id, url = %spec.url, hidden, "overlay created");
        self.windows.insert(
            key,
            OverlayWindow {
                handle,
                config: OverlayConfig {
                    url: spec.url,
                    ..config
                },
                hidden,
            },
        );
        Ok(id)
    }

    /// Live overlays ordered by id. Entries whose window is already gone are
    /// dropped first.
    pub fn list_overlays(&mut self) -> Vec<OverlaySummary> {
        self.prune_closed();
        self.windows
            .iter()
            .map(|(key, overlay)| OverlaySummary {
                id: key.to_string(),
                url: overlay.config.url.clone(),
                hidden: overlay.hidden,
            })
            .collect()
    }

    /// Bring an overlay back to the origin and make it visible.
    pub fn show(&mut self, id: &str) -> Result<(), Error> {
        let key = self.live_key(id)?;
        let Some(overlay) = self.windows.get_mut(&key) else {
            return Err(Error::OverlayNotFound(id.to_string()));
        };

        self.backend.move_to(&overlay.handle, 0.0, 0.0)?;
        self.backend.show(&overlay.handle)?;
        overlay.hidden = false;

        tracing::info!(%id, "overlay shown");
        Ok(())
    }

    /// Park an overlay left of the virtual desktop. The window keeps
    /// rendering.
    pub fn hide(&mut self, id: &str) -> Result<(), Error> {
        let key = self.live_key(id)?;
        let bounds = self.layout().virtual_bounds();
        let margin = self.offscreen_margin;
        let Some(overlay) = self.windows.get_mut(&key) else {
            return Err(Error::OverlayNotFound(id.to_string()));
        };

        let width = self.backend.outer_width(&overlay.handle)?;
        let (x, y) = offscreen_origin(&bounds, width, margin);
        self.backend.move_to(&overlay.handle, x, y)?;
        overlay.hidden = true;

        tracing::info!(%id, x, y, "overlay hidden");
        Ok(())
    }

    /// Close the window if it is still open. The entry is removed either way.
    pub fn destroy(&mut self, id: &str) -> Result<(), Error> {
        let overlay = parse_key(id)
            .and_then(|key| self.windows.remove(&key))
            .ok_or_else(|| Error::OverlayNotFound(id.to_string()))?;

        if !self.backend.is_open(&overlay.handle) {
            return Err(Error::OverlayNotFound(id.to_string()));
        }

        if let Err(e) = self.backend.close(&overlay.handle) {
            tracing::warn!(%id, error = %e, "failed to close overlay window");
        }

        tracing::info!(%id, "overlay destroyed");
        Ok(())
    }

    /// Drop an entry without touching its window. Called when the window
    /// closed on its own.
    pub fn forget(&mut self, id: &str) -> bool {
        let removed = parse_key(id)
            .and_then(|key| self.windows.remove(&key))
            .is_some();
        if removed {
            tracing::info!(%id, "overlay window closed");
        }
        removed
    }

    pub fn has_overlay(&self, id: &str) -> bool {
        parse_key(id)
            .and_then(|key| self.windows.get(&key))
            .is_some_and(|overlay| self.backend.is_open(&overlay.handle))
    }

    pub fn show_all(&mut self) -> usize {
        self.for_each_id(|manager, id| manager.show(id))
    }

    pub fn hide_all(&mut self) -> usize {
        self.for_each_id(|manager, id| manager.hide(id))
    }

    pub fn destroy_all(&mut self) -> usize {
        self.for_each_id(|manager, id| manager.destroy(id))
    }

    /// True when every live overlay is parked off-screen.
    pub fn all_hidden(&mut self) -> bool {
        self.prune_closed();
        !self.windows.is_empty() && self.windows.values().all(|overlay| overlay.hidden)
    }

    fn for_each_id(&mut self, mut op: impl FnMut(&mut Self, &str) -> Result<(), Error>) -> usize {
        let ids: Vec<String> = self.windows.keys().map(u64::to_string).collect();
        let mut affected = 0;
        for id in ids {
            match op(self, &id) {
                Ok(()) => affected += 1,
                Err(e) => tracing::debug!(%id, error = %e, "bulk overlay operation skipped"),
            }
        }
        affected
    }

    /// Resolve an id to a live entry. A stale entry is removed and reported
    /// exactly like an unknown id.
    fn live_key(&mut self, id: &str) -> Result<u64, Error> {
        let key = parse_key(id).ok_or_else(|| Error::OverlayNotFound(id.to_string()))?;
        let overlay = self
            .windows
            .get(&key)
            .ok_or_else(|| Error::OverlayNotFound(id.to_string()))?;

        if !self.backend.is_open(&overlay.handle) {
            self.windows.remove(&key);
            return Err(Error::OverlayNotFound(id.to_string()));
        }

        Ok(key)
    }

    /// Close a window that never made it into the registry.
    fn discard(&self, id: &str, handle: &B::Handle) {
        if let Err(e) = self.backend.close(handle) {
            tracing::warn!(%id, error = %e, "failed to close half-created overlay window");
        }
    }

    fn prune_closed(&mut self) {
        let backend = &self.backend;
        self.windows
            .retain(|_, overlay| backend.is_open(&overlay.handle));
    }

    fn layout(&self) -> DisplayLayout {
        self.backend.displays().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to query displays, using fallback geometry");
            DisplayLayout::default()
        })
    }
}

/// Only the exact ids handed out by `spawn_overlay` resolve, so `"01"` or
/// `" 1"` do not alias overlay `"1"`.
fn parse_key(id: &str) -> Option<u64> {
    id.parse::<u64>()
        .ok()
        .filter(|key| key.to_string() == id)
}
