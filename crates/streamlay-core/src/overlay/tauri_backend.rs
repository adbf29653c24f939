use tauri::{
    AppHandle, LogicalPosition, Manager, Monitor, WebviewUrl, WebviewWindow, WebviewWindowBuilder,
    WindowEvent,
    utils::config::BackgroundThrottlingPolicy,
    webview::PageLoadEvent,
    window::Color,
};
use url::Url;

use crate::{
    Error, OverlayState,
    geometry::{DisplayLayout, Rect},
    overlay::{WindowBackend, WindowSpec, platform::apply_overlay_style, resolve_url},
};

pub const OVERLAY_LABEL_PREFIX: &str = "overlay-";

pub fn overlay_label(id: &str) -> String {
    format!("{}{}", OVERLAY_LABEL_PREFIX, id)
}

pub fn overlay_id_from_label(label: &str) -> Option<&str> {
    label.strip_prefix(OVERLAY_LABEL_PREFIX)
}

/// Overlay windows backed by Tauri webview windows.
pub struct TauriBackend {
    app: AppHandle,
}

impl TauriBackend {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    /// A window that closes on its own (OS close, crash, app shutdown) must
    /// leave the registry too. The removal runs on the async runtime so it
    /// never waits on a lock held by whoever closed the window.
    fn install_close_hook(&self, window: &WebviewWindow, id: &str) {
        let app = self.app.clone();
        let id = id.to_string();
        window.on_window_event(move |event| {
            if let WindowEvent::Destroyed = event {
                let app = app.clone();
                let id = id.clone();
                tauri::async_runtime::spawn(async move {
                    let state = app.state::<OverlayState>();
                    match state.0.lock() {
                        Ok(mut manager) => {
                            manager.forget(&id);
                        }
                        Err(e) => tracing::error!(%id, error = %e, "overlay registry lock poisoned"),
                    };
                });
            }
        });
    }
}

impl WindowBackend for TauriBackend {
    type Handle = WebviewWindow;

    fn open(&self, id: &str, spec: &WindowSpec) -> Result<WebviewWindow, Error> {
        let label = overlay_label(id);

        // A bad URL still gets a window; it just stays blank.
        let url = match resolve_url(&spec.url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(%id, url = %spec.url, error = %e, "overlay url failed to load");
                Url::parse("about:blank").map_err(|e| Error::WindowCreation(e.to_string()))?
            }
        };

        let window = WebviewWindowBuilder::new(&self.app, &label, WebviewUrl::External(url))
            .title(format!("Streamlay overlay {}", id))
            .inner_size(spec.rect.width, spec.rect.height)
            .position(spec.rect.x, spec.rect.y)
            .decorations(false)
            .transparent(true)
            .background_color(Color(0, 0, 0, 0))
            .always_on_top(spec.always_on_top)
            .skip_taskbar(true)
            .resizable(false)
            .shadow(false)
            .focused(false)
            // Parked overlays must keep rendering.
            .background_throttling(BackgroundThrottlingPolicy::Disabled)
            .visible(false)
            .on_page_load(|window, payload| match payload.event() {
                PageLoadEvent::Started => {
                    tracing::debug!(label = window.label(), url = %payload.url(), "overlay page loading")
                }
                PageLoadEvent::Finished => {
                    tracing::debug!(label = window.label(), url = %payload.url(), "overlay page loaded")
                }
            })
            .build()
            .map_err(|e| Error::WindowCreation(e.to_string()))?;

        if let Err(e) = apply_overlay_style(&window, spec.always_on_top, spec.click_through) {
            let _ = window.destroy();
            return Err(e);
        }

        if spec.click_through {
            window.set_ignore_cursor_events(true)?;
            window.set_focusable(false)?;
        }

        self.install_close_hook(&window, id);
        Ok(window)
    }

    fn close(&self, handle: &WebviewWindow) -> Result<(), Error> {
        handle.close()?;
        Ok(())
    }

    fn is_open(&self, handle: &WebviewWindow) -> bool {
        self.app.get_webview_window(handle.label()).is_some()
    }

    fn move_to(&self, handle: &WebviewWindow, x: f64, y: f64) -> Result<(), Error> {
        handle.set_position(LogicalPosition::new(x, y))?;
        Ok(())
    }

    fn show(&self, handle: &WebviewWindow) -> Result<(), Error> {
        handle.show()?;
        Ok(())
    }

    fn outer_width(&self, handle: &WebviewWindow) -> Result<f64, Error> {
        let scale = handle.scale_factor()?;
        Ok(handle.outer_size()?.to_logical::<f64>(scale).width)
    }

    fn displays(&self) -> Result<DisplayLayout, Error> {
        let monitors = self
            .app
            .available_monitors()?
            .iter()
            .map(monitor_rect)
            .collect();
        let primary_work_area = self.app.primary_monitor()?.as_ref().map(work_area_rect);

        Ok(DisplayLayout {
            primary_work_area,
            monitors,
        })
    }
}

fn monitor_rect(monitor: &Monitor) -> Rect {
    let scale = monitor.scale_factor();
    let position = monitor.position().to_logical::<f64>(scale);
    let size = monitor.size().to_logical::<f64>(scale);
    Rect::new(position.x, position.y, size.width, size.height)
}

fn work_area_rect(monitor: &Monitor) -> Rect {
    let scale = monitor.scale_factor();
    let area = monitor.work_area();
    let position = area.position.to_logical::<f64>(scale);
    let size = area.size.to_logical::<f64>(scale);
    Rect::new(position.x, position.y, size.width, size.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_ids() {
        assert_eq!(overlay_label("7"), "overlay-7");
        assert_eq!(overlay_id_from_label("overlay-7"), Some("7"));
        assert_eq!(overlay_id_from_label("control"), None);
    }
}
