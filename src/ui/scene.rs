use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use libadwaita as adw;

use super::board::build_board_grid;
use super::hud::{update_info, update_pairs};
use super::state::UiState;
use crate::config::Theme;

pub(super) fn rebuild_board(state: &Rc<RefCell<UiState>>) {
    let board_container = state.borrow().board_container.clone();
    let Some(board_container) = board_container else {
        return;
    };

    while let Some(child) = board_container.first_child() {
        board_container.remove(&child);
    }
    let grid = build_board_grid(state);
    board_container.append(&grid);

    let st = state.borrow();
    let session = st.game().state().session();
    update_info(&st, session.move_count(), session.elapsed_secs());
    update_pairs(&st);
    if let Some(window) = &st.window {
        // Let the window shrink back when going to a smaller grid.
        window.set_default_size(-1, -1);
    }
}

pub(super) fn apply_theme(st: &UiState) {
    let style_manager = adw::StyleManager::default();
    let scheme = match st.prefs.theme {
        Theme::Dark => adw::ColorScheme::ForceDark,
        Theme::Light => adw::ColorScheme::ForceLight,
    };
    style_manager.set_color_scheme(scheme);

    if let Some(window) = &st.window {
        match st.prefs.theme {
            Theme::Dark => {
                window.remove_css_class("theme-light");
                window.add_css_class("theme-dark");
            }
            Theme::Light => {
                window.remove_css_class("theme-dark");
                window.add_css_class("theme-light");
            }
        }
    }
}
