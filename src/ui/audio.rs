use std::collections::HashMap;
use std::path::PathBuf;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::game::Signal;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Flip,
    Match,
    Wrong,
    Win,
}

impl SoundCue {
    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::Flip => "flip.wav",
            SoundCue::Match => "match.wav",
            SoundCue::Wrong => "wrong.wav",
            SoundCue::Win => "win.wav",
        }
    }

    pub fn for_signal(signal: &Signal) -> Option<Self> {
        match signal {
            Signal::Flip { .. } => Some(SoundCue::Flip),
            Signal::Match { .. } => Some(SoundCue::Match),
            Signal::Mismatch { .. } => Some(SoundCue::Wrong),
            Signal::Completed { .. } => Some(SoundCue::Win),
            _ => None,
        }
    }
}

pub struct SoundBoard {
    dir: PathBuf,
    enabled: bool,
    streams: HashMap<SoundCue, Option<gtk::MediaFile>>,
}

impl SoundBoard {
    pub fn new(dir: PathBuf) -> Self {
        SoundBoard {
            dir,
            enabled: true,
            streams: HashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn play(&mut self, cue: SoundCue) {
        if !self.enabled {
            return;
        }
        let dir = &self.dir;
        let stream = self.streams.entry(cue).or_insert_with(|| {
            let path = dir.join(cue.file_name());
            if !path.is_file() {
                warn!(path = %path.display(), "sound file missing");
                return None;
            }
            Some(gtk::MediaFile::for_filename(&path))
        });
        let Some(stream) = stream else {
            return;
        };
        if let Some(err) = stream.error() {
            warn!(cue = cue.file_name(), error = %err, "sound failed to load");
            return;
        }
        stream.seek(0);
        stream.play();
    }
}
