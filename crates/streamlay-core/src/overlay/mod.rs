pub mod backend;
pub mod manager;
pub mod platform;
pub mod tauri_backend;
pub mod window;

pub use backend::{WindowBackend, WindowSpec};
pub use manager::OverlayManager;
pub use tauri_backend::TauriBackend;
pub use window::*;
