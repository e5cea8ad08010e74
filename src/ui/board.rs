use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::pango;
use gtk4::prelude::*;

use super::app::dispatch;
use super::state::UiState;
use crate::game::{CardFace, CardState, GameEvent};

pub const CARD_GAP: i32 = 8;
pub const BOARD_MARGIN: i32 = 10;

const CORNER_RADIUS: f64 = 7.5;

const PICTOGRAMS: [&str; 32] = [
    "🐶", "🐱", "🦊", "🐼", "🐨", "🐯", "🦁", "🐸", "🐵", "🦄", "🐝", "🦋", "🐢", "🐙", "🦀", "🐬",
    "🍎", "🍋", "🍉", "🍇", "🍓", "🍒", "🥝", "🥑", "⚽", "🏀", "🎲", "🎸", "🚀", "🌙", "⛵", "🎈",
];

pub fn face_label(face: CardFace) -> String {
    match face {
        CardFace::Image(n) => PICTOGRAMS
            .get(usize::from(n).saturating_sub(1))
            .map(|glyph| glyph.to_string())
            .unwrap_or_else(|| face.to_string()),
        CardFace::Number(n) => n.to_string(),
    }
}

fn rounded_rect(cr: &gtk::cairo::Context, width: f64, height: f64, radius: f64) {
    cr.new_sub_path();
    cr.arc(width - radius, radius, radius, -PI / 2.0, 0.0);
    cr.arc(width - radius, height - radius, radius, 0.0, PI / 2.0);
    cr.arc(radius, height - radius, radius, PI / 2.0, PI);
    cr.arc(radius, radius, radius, PI, 1.5 * PI);
    cr.close_path();
}

fn draw_card(cr: &gtk::cairo::Context, width: i32, height: i32, face: CardFace, state: CardState) {
    let (w, h) = (f64::from(width), f64::from(height));
    cr.set_antialias(gtk::cairo::Antialias::Best);

    let hidden = state == CardState::Hidden;
    let (r, g, b) = match (hidden, face) {
        (true, _) => (0.25, 0.25, 0.25),
        (false, CardFace::Number(_)) => (46.0 / 255.0, 204.0 / 255.0, 113.0 / 255.0),
        (false, CardFace::Image(_)) => (236.0 / 255.0, 240.0 / 255.0, 241.0 / 255.0),
    };
    let alpha = if state == CardState::Matched { 0.55 } else { 1.0 };
    rounded_rect(cr, w, h, CORNER_RADIUS.min(w / 2.0).min(h / 2.0));
    cr.set_source_rgba(r, g, b, alpha);
    if cr.fill().is_err() {
        return;
    }

    let text = if hidden { "?".to_string() } else { face_label(face) };
    let layout = pangocairo::functions::create_layout(cr);
    let mut font_desc = pango::FontDescription::new();
    match (hidden, face) {
        (false, CardFace::Image(_)) => {
            font_desc.set_family("Noto Color Emoji, Apple Color Emoji, Segoe UI Emoji, sans");
        }
        _ => {
            font_desc.set_family("Cantarell, Noto Sans, Arial, sans");
            font_desc.set_weight(pango::Weight::Bold);
        }
    }
    let min_dim = w.min(h);
    font_desc.set_size((min_dim * 0.4 * f64::from(pango::SCALE)) as i32);
    layout.set_font_description(Some(&font_desc));
    layout.set_text(&text);

    cr.set_source_rgba(1.0, 1.0, 1.0, alpha);
    let (text_width, text_height) = layout.pixel_size();
    cr.move_to(
        (w - f64::from(text_width)) / 2.0,
        (h - f64::from(text_height)) / 2.0,
    );
    pangocairo::functions::show_layout(cr, &layout);
}

pub fn build_board_grid(state: &Rc<RefCell<UiState>>) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.add_css_class("memory-board");
    grid.set_row_spacing(CARD_GAP as u32);
    grid.set_column_spacing(CARD_GAP as u32);
    grid.set_margin_top(BOARD_MARGIN);
    grid.set_margin_bottom(BOARD_MARGIN);
    grid.set_margin_start(BOARD_MARGIN);
    grid.set_margin_end(BOARD_MARGIN);
    grid.set_halign(gtk::Align::Center);
    grid.set_valign(gtk::Align::Center);

    let (side, card_pixels, card_count) = {
        let st = state.borrow();
        let config = st.game().config();
        (
            i32::from(config.grid.side()),
            config.grid.card_pixels(),
            st.game().state().deck().len(),
        )
    };

    let mut buttons = Vec::with_capacity(card_count);
    for index in 0..card_count {
        let button = gtk::Button::builder().css_classes(vec!["memory-card"]).build();
        button.set_size_request(card_pixels, card_pixels);
        button.set_focus_on_click(false);

        let drawing_area = gtk::DrawingArea::builder()
            .content_width(card_pixels)
            .content_height(card_pixels)
            .build();
        let state_draw = Rc::downgrade(state);
        drawing_area.set_draw_func(move |_, cr, width, height| {
            let Some(state) = state_draw.upgrade() else {
                return;
            };
            let Ok(st) = state.try_borrow() else {
                return;
            };
            if let Some(card) = st.game().state().deck().get(index) {
                draw_card(cr, width, height, card.face(), card.state());
            }
        });
        button.set_child(Some(&drawing_area));

        let state_click = state.clone();
        button.connect_clicked(move |_| {
            dispatch(&state_click, GameEvent::SelectCard(index));
        });

        let index = index as i32;
        grid.attach(&button, index % side, index / side, 1, 1);
        buttons.push(button);
    }

    state.borrow_mut().grid_buttons = buttons;
    grid
}

pub fn refresh_card(st: &UiState, position: usize) {
    let Some(button) = st.grid_buttons.get(position) else {
        return;
    };
    match st.game().state().deck().state(position) {
        Some(CardState::Matched) => {
            button.remove_css_class("revealed");
            button.add_css_class("matched");
            button.set_sensitive(false);
        }
        Some(CardState::Revealed) => button.add_css_class("revealed"),
        Some(CardState::Hidden) | None => {
            button.remove_css_class("revealed");
            button.remove_css_class("matched");
            button.set_sensitive(true);
        }
    }
    if let Some(child) = button.child() {
        child.queue_draw();
    }
}
