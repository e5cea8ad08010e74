use gtk4 as gtk;
use gtk4::prelude::*;

use super::state::UiState;
use crate::config::Level;

const LEVEL_CLASSES: [&str; 3] = ["level-easy", "level-medium", "level-hard"];

pub(super) fn info_text(moves: u32, elapsed_secs: u32) -> String {
    format!("Moves: {moves} | Time: {elapsed_secs}s")
}

pub(super) fn pairs_text(matched: usize, remaining: usize) -> String {
    format!("Pairs: {matched} found | {remaining} left")
}

pub(super) fn update_info(st: &UiState, moves: u32, elapsed_secs: u32) {
    if let Some(label) = &st.info_label {
        label.set_text(&info_text(moves, elapsed_secs));
    }
}

pub(super) fn update_pairs(st: &UiState) {
    let deck = st.game().state().deck();
    if let Some(label) = &st.pairs_label {
        label.set_text(&pairs_text(deck.pairs_matched(), deck.pairs_remaining()));
    }
}

pub(super) fn sound_label(enabled: bool) -> &'static str {
    if enabled { "🔊" } else { "🔇" }
}

pub(super) fn tint_level_select(select: &gtk::DropDown, level: Level) {
    for class in LEVEL_CLASSES {
        select.remove_css_class(class);
    }
    select.add_css_class(LEVEL_CLASSES[level.index() as usize]);
}
