use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Once;

use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;
use tracing::{debug, warn};

use super::audio::SoundCue;
use super::board::refresh_card;
use super::dialogs::{show_about_dialog, show_completed_dialog};
use super::hud::{info_text, pairs_text, sound_label, tint_level_select, update_info, update_pairs};
use super::scene::{apply_theme, rebuild_board};
use super::state::UiState;
use crate::config::{DisplayMode, Level};
use crate::game::{GameEvent, Signal};

const APP_ID: &str = "io.github.memorymatch.MemoryMatch";
const RESOURCE_PREFIX: &str = "/io/github/memorymatch/MemoryMatch";
const PREFERENCES_FILE_NAME: &str = "preferences.json";
const SOUNDS_DIR_VAR: &str = "MEMORY_MATCH_SOUNDS";

pub(super) fn dispatch(state: &Rc<RefCell<UiState>>, event: GameEvent) {
    let signals = state.borrow_mut().runtime.dispatch(event);
    for signal in signals {
        present(state, signal);
    }
}

fn present(state: &Rc<RefCell<UiState>>, signal: Signal) {
    if let Some(cue) = SoundCue::for_signal(&signal) {
        state.borrow_mut().sounds.play(cue);
    }

    match signal {
        Signal::BoardReset { grid, mode, epoch } => {
            debug!(grid = grid.side(), mode = mode.name(), epoch, "rebuilding board");
            rebuild_board(state);
        }
        Signal::Flip { position, .. } => refresh_card(&state.borrow(), position),
        Signal::Match { first, second } => {
            let st = state.borrow();
            refresh_card(&st, first);
            refresh_card(&st, second);
            update_pairs(&st);
        }
        Signal::Conceal { first, second } => {
            let st = state.borrow();
            refresh_card(&st, first);
            refresh_card(&st, second);
        }
        Signal::Mismatch { .. } => {}
        Signal::SessionUpdated {
            moves,
            elapsed_secs,
        } => update_info(&state.borrow(), moves, elapsed_secs),
        Signal::Completed {
            moves,
            elapsed_secs,
        } => {
            update_info(&state.borrow(), moves, elapsed_secs);
            let window = state.borrow().window.clone();
            show_completed_dialog(window.as_ref(), moves, elapsed_secs);
        }
    }
}

fn restart_game(state: &Rc<RefCell<UiState>>) {
    let config = *state.borrow().game().config();
    dispatch(
        state,
        GameEvent::NewGame {
            grid: config.grid,
            mode: config.mode,
        },
    );
}

fn change_level(state: &Rc<RefCell<UiState>>, level: Level) {
    {
        let mut st = state.borrow_mut();
        st.prefs.level = level;
        st.save_prefs();
    }
    dispatch(state, GameEvent::SetGridSize(level.grid_size()));
}

fn change_mode(state: &Rc<RefCell<UiState>>, mode: DisplayMode) {
    {
        let mut st = state.borrow_mut();
        st.prefs.mode = mode;
        st.save_prefs();
    }
    dispatch(state, GameEvent::SetDisplayMode(mode));
}

fn toggle_theme(state: &Rc<RefCell<UiState>>) {
    let mut st = state.borrow_mut();
    st.prefs.theme = st.prefs.theme.toggled();
    apply_theme(&st);
    st.save_prefs();
}

fn toggle_sound(state: &Rc<RefCell<UiState>>) {
    let mut st = state.borrow_mut();
    let enabled = !st.sounds.is_enabled();
    st.sounds.set_enabled(enabled);
    st.prefs.sound_on = enabled;
    if let Some(button) = &st.sound_button {
        button.set_label(sound_label(enabled));
    }
    st.save_prefs();
}

fn mode_index(mode: DisplayMode) -> u32 {
    DisplayMode::ALL
        .iter()
        .position(|candidate| *candidate == mode)
        .unwrap_or_default() as u32
}

fn mode_from_index(index: u32) -> DisplayMode {
    DisplayMode::ALL
        .get(index as usize)
        .copied()
        .unwrap_or_default()
}

fn preferences_path() -> PathBuf {
    glib::user_config_dir()
        .join("memory-match")
        .join(PREFERENCES_FILE_NAME)
}

fn sounds_dir() -> PathBuf {
    std::env::var_os(SOUNDS_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sounds"))
}

pub fn run() -> glib::ExitCode {
    glib::set_prgname(Some("memory-match"));
    let app = adw::Application::builder().application_id(APP_ID).build();
    app.connect_activate(build_window);
    app.run()
}

fn build_window(app: &adw::Application) {
    load_css();

    let state = UiState::new_shared(preferences_path(), sounds_dir());
    let prefs = state.borrow().prefs.clone();

    let new_game_action = SimpleAction::new("new-game", None);
    new_game_action.connect_activate({
        let state = state.clone();
        move |_, _| restart_game(&state)
    });
    app.add_action(&new_game_action);

    let about_action = SimpleAction::new("about", None);
    about_action.connect_activate({
        let app = app.clone();
        move |_, _| show_about_dialog(&app)
    });
    app.add_action(&about_action);

    let quit_action = SimpleAction::new("quit", None);
    quit_action.connect_activate({
        let app = app.clone();
        move |_, _| app.quit()
    });
    app.add_action(&quit_action);
    app.set_accels_for_action("app.new-game", &["<Control>n"]);
    app.set_accels_for_action("app.quit", &["<Control>q"]);

    let info_label = gtk::Label::new(Some(&info_text(0, 0)));
    info_label.add_css_class("info-label");

    let pairs_label = gtk::Label::new(Some(&pairs_text(0, prefs.level.grid_size().pair_count())));
    pairs_label.add_css_class("pairs-label");

    let level_select = gtk::DropDown::from_strings(&Level::ALL.map(Level::name));
    level_select.set_selected(prefs.level.index());
    tint_level_select(&level_select, prefs.level);
    level_select.connect_selected_notify({
        let state = state.clone();
        move |select| {
            let level = Level::from_index(select.selected());
            tint_level_select(select, level);
            change_level(&state, level);
        }
    });

    let mode_select = gtk::DropDown::from_strings(&DisplayMode::ALL.map(DisplayMode::name));
    mode_select.add_css_class("mode-select");
    mode_select.set_selected(mode_index(prefs.mode));
    mode_select.connect_selected_notify({
        let state = state.clone();
        move |select| change_mode(&state, mode_from_index(select.selected()))
    });

    let theme_button = gtk::Button::with_label("Theme");
    theme_button.add_css_class("theme-button");
    theme_button.connect_clicked({
        let state = state.clone();
        move |_| toggle_theme(&state)
    });

    let sound_button = gtk::Button::with_label(sound_label(prefs.sound_on));
    sound_button.add_css_class("sound-button");
    sound_button.set_tooltip_text(Some("Sound"));
    sound_button.connect_clicked({
        let state = state.clone();
        move |_| toggle_sound(&state)
    });

    let restart_button = gtk::Button::with_label("Restart");
    restart_button.add_css_class("restart-button");
    restart_button.set_tooltip_text(Some("New Game"));
    restart_button.connect_clicked({
        let state = state.clone();
        move |_| restart_game(&state)
    });

    let controls = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    controls.add_css_class("controls");
    controls.set_halign(gtk::Align::Center);
    controls.set_margin_top(8);
    controls.set_margin_start(8);
    controls.set_margin_end(8);
    controls.append(&info_label);
    controls.append(&pairs_label);
    controls.append(&level_select);
    controls.append(&mode_select);
    controls.append(&theme_button);
    controls.append(&sound_button);
    controls.append(&restart_button);

    let board_container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_container.set_hexpand(true);
    board_container.set_vexpand(true);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 0);
    content.append(&controls);
    content.append(&board_container);

    let menu_model = gio::Menu::new();
    menu_model.append(Some("New Game"), Some("app.new-game"));
    menu_model.append(Some("About Memory Match"), Some("app.about"));
    menu_model.append(Some("Quit"), Some("app.quit"));
    let menu_button = gtk::MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&menu_model)
        .build();

    let title = gtk::Label::new(None);
    title.set_markup("<b>Memory Match</b>");
    let header = adw::HeaderBar::builder().title_widget(&title).build();
    header.pack_end(&menu_button);

    let toolbar = adw::ToolbarView::new();
    toolbar.add_top_bar(&header);
    toolbar.set_content(Some(&content));

    let win = adw::ApplicationWindow::builder()
        .application(app)
        .title("Memory Match")
        .icon_name(APP_ID)
        .content(&toolbar)
        .build();
    win.add_css_class("app-window");

    win.connect_close_request({
        let state = state.clone();
        move |_| {
            state.borrow().save_prefs();
            glib::Propagation::Proceed
        }
    });

    {
        let mut st = state.borrow_mut();
        st.window = Some(win.clone());
        st.info_label = Some(info_label);
        st.board_container = Some(board_container);
        st.pairs_label = Some(pairs_label);
        st.sound_button = Some(sound_button);
        apply_theme(&st);
    }
    rebuild_board(&state);

    win.present();
}

fn load_css() {
    static RESOURCES_INIT: Once = Once::new();
    RESOURCES_INIT.call_once(|| {
        if let Err(err) = gio::resources_register_include!("memory-match.gresource") {
            warn!(error = %err, "failed to register embedded resources");
        }
    });

    let Some(display) = gtk::gdk::Display::default() else {
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_resource(&format!("{RESOURCE_PREFIX}/style.css"));
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
