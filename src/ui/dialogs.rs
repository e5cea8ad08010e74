use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

pub fn show_completed_dialog(window: Option<&adw::ApplicationWindow>, moves: u32, elapsed_secs: u32) {
    let dialog = adw::AlertDialog::new(
        Some("Completed!"),
        Some(&format!("Moves: {moves}\nTime: {elapsed_secs} seconds")),
    );
    dialog.add_response("ok", "OK");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(window);
}

pub fn show_about_dialog(app: &adw::Application) {
    let dialog = adw::AboutDialog::builder()
        .application_name("Memory Match")
        .application_icon("io.github.memorymatch.MemoryMatch")
        .version(env!("CARGO_PKG_VERSION"))
        .comments("Flip two cards at a time and find every pair.")
        .build();
    dialog.add_legal_section("Memory Match", None, gtk::License::MitX11, None);
    dialog.present(app.active_window().as_ref());
}
