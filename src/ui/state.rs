use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gtk4 as gtk;
use gtk4::glib;
use libadwaita as adw;
use tracing::{trace, warn};

use crate::config::Preferences;
use crate::game::{ConcealTask, Game, GameEvent};
use crate::runtime::{Runtime, Scheduler};

use super::app::dispatch;
use super::audio::SoundBoard;

pub struct GlibScheduler {
    shell: Weak<RefCell<UiState>>,
    clock: Option<glib::SourceId>,
}

impl GlibScheduler {
    fn new(shell: Weak<RefCell<UiState>>) -> Self {
        GlibScheduler { shell, clock: None }
    }
}

impl Scheduler for GlibScheduler {
    fn schedule_conceal(&mut self, task: ConcealTask, delay: Duration) {
        let shell = self.shell.clone();
        glib::timeout_add_local_once(delay, move || {
            if let Some(state) = shell.upgrade() {
                dispatch(&state, GameEvent::ConcealDue(task));
            }
        });
    }

    fn start_clock(&mut self, interval: Duration) {
        self.stop_clock();
        let shell = self.shell.clone();
        let handle = glib::timeout_add_local(interval, move || {
            let Some(state) = shell.upgrade() else {
                return glib::ControlFlow::Break;
            };
            dispatch(&state, GameEvent::ClockTick);
            glib::ControlFlow::Continue
        });
        self.clock = Some(handle);
    }

    fn stop_clock(&mut self) {
        if let Some(handle) = self.clock.take() {
            trace!("stopping play clock");
            handle.remove();
        }
    }
}

pub struct UiState {
    pub runtime: Runtime<GlibScheduler>,
    pub prefs: Preferences,
    pub prefs_path: PathBuf,
    pub sounds: SoundBoard,

    pub window: Option<adw::ApplicationWindow>,
    pub info_label: Option<gtk::Label>,
    pub board_container: Option<gtk::Box>,
    pub pairs_label: Option<gtk::Label>,
    pub sound_button: Option<gtk::Button>,
    pub grid_buttons: Vec<gtk::Button>,
}

impl UiState {
    pub fn new_shared(prefs_path: PathBuf, sounds_dir: PathBuf) -> Rc<RefCell<Self>> {
        let prefs = Preferences::load_or_default(&prefs_path);
        Rc::new_cyclic(|weak| {
            let game = Game::new(prefs.game_config());
            let mut sounds = SoundBoard::new(sounds_dir);
            sounds.set_enabled(prefs.sound_on);
            RefCell::new(UiState {
                runtime: Runtime::new(game, GlibScheduler::new(weak.clone())),
                prefs,
                prefs_path,
                sounds,
                window: None,
                info_label: None,
                board_container: None,
                pairs_label: None,
                sound_button: None,
                grid_buttons: Vec::new(),
            })
        })
    }

    pub fn game(&self) -> &Game {
        self.runtime.game()
    }

    pub fn save_prefs(&self) {
        if let Err(err) = self.prefs.save(&self.prefs_path) {
            warn!(error = %err, "could not save preferences");
        }
    }
}
