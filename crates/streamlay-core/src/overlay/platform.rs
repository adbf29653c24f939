//! Platform-specific overlay window styling
//!
//! Tauri covers decorations, transparency and the basic always-on-top flag.
//! This module adds what it does not:
//! - macOS: floating window level and visibility on every Space
//! - Windows: tool-window style (no taskbar / Alt+Tab entry) and true
//!   click-through via layered transparent windows

use tauri::WebviewWindow;

use crate::Error;

/// Apply native overlay styling to a freshly built window.
pub fn apply_overlay_style(
    window: &WebviewWindow,
    always_on_top: bool,
    click_through: bool,
) -> Result<(), Error> {
    tracing::debug!(
        label = window.label(),
        always_on_top,
        click_through,
        "applying overlay style"
    );

    #[cfg(target_os = "macos")]
    style_macos(window, always_on_top, click_through)?;

    #[cfg(target_os = "windows")]
    style_windows(window, always_on_top, click_through)?;

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        // Tauri's own flags are all there is on Linux.
        let _ = (window, always_on_top, click_through);
    }

    Ok(())
}

#[cfg(target_os = "macos")]
fn style_macos(window: &WebviewWindow, always_on_top: bool, click_through: bool) -> Result<(), Error> {
    use objc2::rc::Retained;
    use objc2_app_kit::{NSFloatingWindowLevel, NSWindow, NSWindowCollectionBehavior};

    let ns_window_ptr = window
        .ns_window()
        .map_err(|e| Error::WindowCreation(format!("Failed to get NSWindow handle: {}", e)))?;

    // SAFETY: the pointer stays valid while the Tauri window exists; retaining
    // keeps it alive for the duration of this call.
    let ns_window: Retained<NSWindow> = unsafe { Retained::retain(ns_window_ptr as *mut NSWindow) }
        .ok_or_else(|| Error::WindowCreation("NSWindow pointer was null".to_string()))?;

    if always_on_top {
        ns_window.setLevel(NSFloatingWindowLevel);
    }

    if click_through {
        ns_window.setIgnoresMouseEvents(true);
        ns_window.setAcceptsMouseMovedEvents(false);
        ns_window.setHasShadow(false);
    }

    // Stream overlays follow the user across Spaces and next to fullscreen apps,
    // and stay out of Cmd+Tab.
    ns_window.setCollectionBehavior(
        NSWindowCollectionBehavior::CanJoinAllSpaces
            | NSWindowCollectionBehavior::Stationary
            | NSWindowCollectionBehavior::IgnoresCycle
            | NSWindowCollectionBehavior::FullScreenAuxiliary,
    );

    Ok(())
}

#[cfg(target_os = "windows")]
fn style_windows(window: &WebviewWindow, always_on_top: bool, click_through: bool) -> Result<(), Error> {
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{
        GWL_EXSTYLE, GetWindowLongPtrW, HWND_TOPMOST, SWP_NOMOVE, SWP_NOSIZE, SetWindowLongPtrW,
        SetWindowPos, WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_EX_TRANSPARENT,
    };

    let hwnd = window
        .hwnd()
        .map_err(|e| Error::WindowCreation(format!("Failed to get HWND handle: {}", e)))?;

    unsafe {
        let hwnd = HWND(hwnd.0);

        let mut ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
        ex_style |= WS_EX_TOOLWINDOW.0 as isize;
        if click_through {
            ex_style |= WS_EX_LAYERED.0 as isize;
            ex_style |= WS_EX_TRANSPARENT.0 as isize;
        }
        SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex_style);

        if always_on_top {
            SetWindowPos(
                hwnd,
                Some(HWND_TOPMOST),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE,
            )
            .map_err(|e| Error::WindowCreation(format!("Failed to raise overlay: {}", e)))?;
        }
    }

    Ok(())
}
