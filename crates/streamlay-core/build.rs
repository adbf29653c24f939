const COMMANDS: &[&str] = &[
    "create_overlays",
    "list_overlays",
    "show_overlay",
    "hide_overlay",
    "destroy_overlay",
    "show_all_overlays",
    "hide_all_overlays",
    "destroy_all_overlays",
    "preset_list",
    "preset_save",
    "preset_delete",
    "preset_launch",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
