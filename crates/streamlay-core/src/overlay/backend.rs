//! The seam between the overlay registry and the windowing toolkit.
//!
//! `OverlayManager` only talks to windows through this trait. The Tauri
//! implementation lives in `tauri_backend`; tests use the in-memory fake below.

use crate::{
    Error,
    geometry::{DisplayLayout, Rect},
};

/// Everything needed to open one overlay window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub url: String,
    pub rect: Rect,
    pub click_through: bool,
    pub always_on_top: bool,
}

pub trait WindowBackend {
    type Handle;

    /// Open a borderless, transparent window. It starts hidden; the registry
    /// positions it and then calls `show`.
    fn open(&self, id: &str, spec: &WindowSpec) -> Result<Self::Handle, Error>;

    fn close(&self, handle: &Self::Handle) -> Result<(), Error>;

    /// False once the window has been closed by any party.
    fn is_open(&self, handle: &Self::Handle) -> bool;

    fn move_to(&self, handle: &Self::Handle, x: f64, y: f64) -> Result<(), Error>;

    fn show(&self, handle: &Self::Handle) -> Result<(), Error>;

    fn outer_width(&self, handle: &Self::Handle) -> Result<f64, Error>;

    fn displays(&self) -> Result<DisplayLayout, Error>;
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct FakeWindow {
        pub id: String,
        pub spec: WindowSpec,
        pub x: f64,
        pub y: f64,
        pub visible: bool,
        pub open: bool,
    }

    /// In-memory toolkit. Handles are indexes into `windows`.
    pub struct FakeBackend {
        pub layout: DisplayLayout,
        pub windows: RefCell<Vec<FakeWindow>>,
        pub fail_urls: Vec<String>,
        /// Windows for these URLs open but refuse to be shown.
        pub fail_show_urls: Vec<String>,
    }

    impl FakeBackend {
        pub fn new(layout: DisplayLayout) -> Self {
            Self {
                layout,
                windows: RefCell::new(Vec::new()),
                fail_urls: Vec::new(),
                fail_show_urls: Vec::new(),
            }
        }

        pub fn window(&self, handle: usize) -> FakeWindow {
            self.windows.borrow()[handle].clone()
        }

        /// Simulates the user closing the window from outside the registry.
        pub fn close_externally(&self, handle: usize) {
            self.windows.borrow_mut()[handle].open = false;
        }

        fn with_open<T>(
            &self,
            handle: usize,
            f: impl FnOnce(&mut FakeWindow) -> T,
        ) -> Result<T, Error> {
            let mut windows = self.windows.borrow_mut();
            match windows.get_mut(handle) {
                Some(window) if window.open => Ok(f(window)),
                Some(window) => Err(Error::OverlayNotFound(window.id.clone())),
                None => Err(Error::OverlayNotFound(handle.to_string())),
            }
        }
    }

    impl WindowBackend for FakeBackend {
        type Handle = usize;

        fn open(&self, id: &str, spec: &WindowSpec) -> Result<usize, Error> {
            if self.fail_urls.contains(&spec.url) {
                return Err(Error::WindowCreation(id.to_string()));
            }
            let mut windows = self.windows.borrow_mut();
            windows.push(FakeWindow {
                id: id.to_string(),
                spec: spec.clone(),
                x: spec.rect.x,
                y: spec.rect.y,
                visible: false,
                open: true,
            });
            Ok(windows.len() - 1)
        }

        fn close(&self, handle: &usize) -> Result<(), Error> {
            self.with_open(*handle, |w| w.open = false)
        }

        fn is_open(&self, handle: &usize) -> bool {
            self.windows
                .borrow()
                .get(*handle)
                .map(|w| w.open)
                .unwrap_or(false)
        }

        fn move_to(&self, handle: &usize, x: f64, y: f64) -> Result<(), Error> {
            self.with_open(*handle, |w| {
                w.x = x;
                w.y = y;
            })
        }

        fn show(&self, handle: &usize) -> Result<(), Error> {
            let refused = self.with_open(*handle, |w| self.fail_show_urls.contains(&w.spec.url))?;
            if refused {
                return Err(Error::WindowCreation(handle.to_string()));
            }
            self.with_open(*handle, |w| w.visible = true)
        }

        fn outer_width(&self, handle: &usize) -> Result<f64, Error> {
            self.with_open(*handle, |w| w.spec.rect.width)
        }

        fn displays(&self) -> Result<DisplayLayout, Error> {
            Ok(self.layout.clone())
        }
    }
}
