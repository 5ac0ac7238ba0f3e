//! Audio cues and playback
//!
//! The game raises cues; `AudioManager` maps them onto sound handles and
//! hands them to a `Mixer` owned by the platform. Playback is
//! fire-and-forget and channel selection is the mixer's business.

use crate::assets::{Assets, SoundHandle};
use crate::config::GameConfig;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Menu button accepted
    Button,
    /// Hazard struck the player
    Hit,
    /// Hazard dodged and recycled
    Arrow,
    /// Fruit collected
    Fruit,
    /// Background music loop
    Music,
}

impl Cue {
    /// Whether this cue loops until stopped
    pub fn looped(self) -> bool {
        matches!(self, Cue::Music)
    }
}

/// Platform playback backend
pub trait Mixer {
    /// Start playing `sound` on some free channel
    fn play(&mut self, sound: SoundHandle, volume: f32, looped: bool);
    /// Whether `sound` is currently playing as a loop
    fn is_looping(&self, sound: SoundHandle) -> bool;
    /// Change the volume of a playing loop
    fn set_volume(&mut self, sound: SoundHandle, volume: f32);
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    hit: Option<SoundHandle>,
    button: Option<SoundHandle>,
    arrow: Option<SoundHandle>,
    fruit: Option<SoundHandle>,
    music: Option<SoundHandle>,
    music_volume: f32,
    effect_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(assets: &Assets, config: &GameConfig) -> Self {
        Self {
            hit: assets.snd_hit,
            button: assets.snd_button,
            arrow: assets.snd_arrow,
            fruit: assets.snd_fruit,
            music: assets.snd_music,
            music_volume: config.music_volume.clamp(0.0, 1.0),
            effect_volume: config.effect_volume.clamp(0.0, 1.0),
            muted: false,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn handle(&self, cue: Cue) -> Option<SoundHandle> {
        match cue {
            Cue::Button => self.button,
            Cue::Hit => self.hit,
            Cue::Arrow => self.arrow,
            Cue::Fruit => self.fruit,
            Cue::Music => self.music,
        }
    }

    fn volume(&self, cue: Cue) -> f32 {
        if self.muted {
            0.0
        } else if cue.looped() {
            self.music_volume
        } else {
            self.effect_volume
        }
    }

    /// Play a cue. Missing sounds are silently skipped; a loop that is
    /// already running only gets its volume refreshed.
    pub fn play(&self, cue: Cue, mixer: &mut dyn Mixer) {
        let Some(sound) = self.handle(cue) else { return };
        let vol = self.volume(cue);
        if cue.looped() {
            if mixer.is_looping(sound) {
                mixer.set_volume(sound, vol);
            } else {
                mixer.play(sound, vol, true);
            }
        } else {
            mixer.play(sound, vol, false);
        }
    }

    /// Play a batch of cues in order
    pub fn play_all(&self, cues: impl IntoIterator<Item = Cue>, mixer: &mut dyn Mixer) {
        for cue in cues {
            self.play(cue, mixer);
        }
    }
}
