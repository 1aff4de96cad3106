//! Audio cue state machine over the playback-backend boundary.
//!
//! The backend is the external collaborator: it owns device init and buffer
//! decoding and exposes only load/play/stop/volume. This module owns the
//! policy — which discrete user actions start and stop which loop — and
//! degrades gracefully when a sound file is missing: the cue state machine
//! keeps running, the action just has no audible feedback.

use std::path::{Path, PathBuf};

pub type SoundHandle = usize;

pub trait AudioBackend {
    fn load_sound(&mut self, path: &Path) -> Result<SoundHandle, String>;
    fn play(&mut self, handle: SoundHandle, looping: bool);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
}

/// Backend stub for builds without an audio device: validates paths at load
/// time and logs playback at debug level.
pub struct NullAudioBackend {
    loaded: Vec<PathBuf>,
}

impl NullAudioBackend {
    pub fn new() -> Self {
        Self { loaded: Vec::new() }
    }
}

impl Default for NullAudioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for NullAudioBackend {
    fn load_sound(&mut self, path: &Path) -> Result<SoundHandle, String> {
        if !path.exists() {
            return Err(format!("Failed to open sound file: {}", path.display()));
        }
        self.loaded.push(path.to_path_buf());
        Ok(self.loaded.len() - 1)
    }

    fn play(&mut self, handle: SoundHandle, looping: bool) {
        log::debug!(
            "Audio play: {:?} (loop: {looping})",
            self.loaded.get(handle)
        );
    }

    fn stop(&mut self) {
        log::debug!("Audio stop");
    }

    fn set_volume(&mut self, volume: f32) {
        log::debug!("Audio volume: {volume}");
    }
}

pub struct AudioCues {
    backend: Box<dyn AudioBackend>,
    rain_sound: Option<SoundHandle>,
    spin_sound: Option<SoundHandle>,
    rain_playing: bool,
    spin_playing: bool,
}

impl AudioCues {
    pub fn new(mut backend: Box<dyn AudioBackend>, rain_path: &Path, spin_path: &Path) -> Self {
        let rain_sound = match backend.load_sound(rain_path) {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::error!("Failed to load rain sound: {err}");
                None
            }
        };
        let spin_sound = match backend.load_sound(spin_path) {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::error!("Failed to load spin sound: {err}");
                None
            }
        };

        Self {
            backend,
            rain_sound,
            spin_sound,
            rain_playing: false,
            spin_playing: false,
        }
    }

    /// Called on the rain toggle pulse with the new enabled state.
    pub fn rain_toggled(&mut self, enabled: bool) {
        if enabled && !self.rain_playing {
            if let Some(handle) = self.rain_sound {
                self.backend.play(handle, true);
            }
            self.rain_playing = true;
        } else if !enabled && self.rain_playing {
            self.backend.stop();
            self.rain_playing = false;
        }
    }

    /// Called every frame with whether any actor is actively spinning; the
    /// loop starts on the rising edge and stops on the falling edge.
    pub fn spin_active(&mut self, active: bool) {
        if active && !self.spin_playing {
            if let Some(handle) = self.spin_sound {
                self.backend.play(handle, true);
            }
            self.spin_playing = true;
        } else if !active && self.spin_playing {
            self.backend.stop();
            self.spin_playing = false;
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.backend.set_volume(volume.clamp(0.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Play(SoundHandle, bool),
        Stop,
    }

    struct RecordingBackend {
        calls: Rc<RefCell<Vec<Call>>>,
        fail_loads: bool,
        next_handle: SoundHandle,
    }

    impl AudioBackend for RecordingBackend {
        fn load_sound(&mut self, path: &Path) -> Result<SoundHandle, String> {
            if self.fail_loads {
                return Err(format!("Failed to open sound file: {}", path.display()));
            }
            let handle = self.next_handle;
            self.next_handle += 1;
            Ok(handle)
        }

        fn play(&mut self, handle: SoundHandle, looping: bool) {
            self.calls.borrow_mut().push(Call::Play(handle, looping));
        }

        fn stop(&mut self) {
            self.calls.borrow_mut().push(Call::Stop);
        }

        fn set_volume(&mut self, _volume: f32) {}
    }

    fn cues(fail_loads: bool) -> (AudioCues, Rc<RefCell<Vec<Call>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let backend = RecordingBackend {
            calls: calls.clone(),
            fail_loads,
            next_handle: 0,
        };
        let cues = AudioCues::new(
            Box::new(backend),
            Path::new("rain.wav"),
            Path::new("spin.wav"),
        );
        (cues, calls)
    }

    #[test]
    fn rain_toggle_plays_looping_then_stops() {
        let (mut cues, calls) = cues(false);
        cues.rain_toggled(true);
        cues.rain_toggled(false);
        assert_eq!(*calls.borrow(), vec![Call::Play(0, true), Call::Stop]);
    }

    #[test]
    fn repeated_rain_on_does_not_restart() {
        let (mut cues, calls) = cues(false);
        cues.rain_toggled(true);
        cues.rain_toggled(true);
        assert_eq!(*calls.borrow(), vec![Call::Play(0, true)]);
    }

    #[test]
    fn spin_cue_fires_on_edges_only() {
        let (mut cues, calls) = cues(false);
        // Held for several frames, then released.
        cues.spin_active(true);
        cues.spin_active(true);
        cues.spin_active(true);
        cues.spin_active(false);
        cues.spin_active(false);
        assert_eq!(*calls.borrow(), vec![Call::Play(1, true), Call::Stop]);
    }

    #[test]
    fn missing_sounds_degrade_to_silent_state_machine() {
        let (mut cues, calls) = cues(true);
        cues.rain_toggled(true);
        cues.spin_active(true);
        cues.spin_active(false);
        // No play calls, but the falling edge still issues the stop.
        assert_eq!(*calls.borrow(), vec![Call::Stop]);
    }
}
