use tauri::{
    App, AppHandle, Manager, WebviewUrl, WebviewWindowBuilder,
    menu::{MenuBuilder, MenuItemBuilder, PredefinedMenuItem},
    tray::TrayIconEvent,
};

pub const CONTROL_WINDOW_LABEL: &str = "control";

/// Id of the tray icon declared under `app.trayIcon` in tauri.conf.json.
const TRAY_ID: &str = "main";

pub fn setup_tray(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let show_all = MenuItemBuilder::with_id("show_all", "Show All Overlays").build(app)?;
    let hide_all = MenuItemBuilder::with_id("hide_all", "Hide All Overlays").build(app)?;
    let destroy_all = MenuItemBuilder::with_id("destroy_all", "Close All Overlays").build(app)?;
    let separator = PredefinedMenuItem::separator(app)?;
    let control = MenuItemBuilder::with_id("control", "Open Control Panel...").build(app)?;
    let quit = MenuItemBuilder::with_id("quit", "Quit Streamlay").build(app)?;

    let menu = MenuBuilder::new(app)
        .item(&show_all)
        .item(&hide_all)
        .item(&destroy_all)
        .item(&separator)
        .item(&control)
        .item(&quit)
        .build()?;

    let Some(tray) = app.handle().tray_by_id(TRAY_ID) else {
        tracing::warn!("tray icon {} is not configured", TRAY_ID);
        return Ok(());
    };

    tray.set_menu(Some(menu))?;
    tray.on_menu_event(|app, event| {
        handle_menu_event(app, event.id.as_ref());
    });
    tray.on_tray_icon_event(|tray, event| {
        if let TrayIconEvent::DoubleClick { .. } = event {
            if let Err(e) = open_control_window(tray.app_handle()) {
                tracing::error!(error = %e, "failed to open control window");
            }
        }
    });

    Ok(())
}

/// Opens the control window, or focuses it if already open
pub fn open_control_window(app: &AppHandle) -> Result<(), tauri::Error> {
    if let Some(window) = app.get_webview_window(CONTROL_WINDOW_LABEL) {
        window.show()?;
        window.set_focus()?;
        return Ok(());
    }

    let _window = WebviewWindowBuilder::new(
        app,
        CONTROL_WINDOW_LABEL,
        WebviewUrl::App("index.html".into()),
    )
    .title("Streamlay")
    .inner_size(600.0, 650.0)
    .min_inner_size(480.0, 420.0)
    .center()
    .decorations(true)
    .resizable(true)
    .visible(true)
    .build()?;

    Ok(())
}

fn handle_menu_event(app: &AppHandle, id: &str) {
    match id {
        "show_all" => {
            crate::with_overlays(app, |manager| manager.show_all());
        }
        "hide_all" => {
            crate::with_overlays(app, |manager| manager.hide_all());
        }
        "destroy_all" => {
            crate::with_overlays(app, |manager| manager.destroy_all());
        }
        "control" => {
            if let Err(e) = open_control_window(app) {
                tracing::error!(error = %e, "failed to open control window");
            }
        }
        "quit" => {
            app.exit(0);
        }
        _ => {}
    }
}
