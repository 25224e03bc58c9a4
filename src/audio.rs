//! Audio system using rodio
//!
//! Sound effects are decoded once and replayed from memory. Anything that
//! fails to load (file, codec, output device) is logged and its playback
//! becomes a no-op; audio never stops the demo.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, Cursor};
use std::path::Path;

use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use thiserror::Error;

use crate::settings::Settings;
use crate::sim::SimEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits the arena wall
    Bounce,
    /// Ball hits the orbiting target
    Interact,
}

impl SoundEffect {
    /// The effect a simulation event should trigger
    pub fn for_event(event: &SimEvent) -> Self {
        match event {
            SimEvent::Bounce => SoundEffect::Bounce,
            SimEvent::TargetHit { .. } => SoundEffect::Interact,
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("failed to read sound file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode sound: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("failed to start playback: {0}")]
    Play(#[from] rodio::PlayError),
    #[error("audio output is unavailable")]
    NoOutput,
}

type SoundBuffer = Buffered<Decoder<Cursor<Vec<u8>>>>;

/// The voices to start for one frame's events, in event order
///
/// Every event gets its own voice, up to `max_per_effect` voices of each
/// effect per frame. A thousand balls can bounce in the same frame.
pub fn frame_voices<'a>(
    events: impl IntoIterator<Item = &'a SimEvent>,
    max_per_effect: usize,
) -> Vec<SoundEffect> {
    let mut started: HashMap<SoundEffect, usize> = HashMap::new();
    events
        .into_iter()
        .map(SoundEffect::for_event)
        .filter(|effect| {
            let count = started.entry(*effect).or_insert(0);
            *count += 1;
            *count <= max_per_effect
        })
        .collect()
}

/// Audio manager for the demos
pub struct AudioManager {
    /// Keeps the device open; dropping it silences everything
    output: Option<(OutputStream, OutputStreamHandle)>,
    sounds: HashMap<SoundEffect, SoundBuffer>,
    music: Option<Sink>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    max_voices_per_frame: usize,
}

impl AudioManager {
    /// Open the default output device (audio disabled if there is none)
    pub fn new(settings: &Settings) -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(e) => {
                log::warn!("{} - audio disabled", AudioError::from(e));
                None
            }
        };
        Self::with_output(output, settings)
    }

    /// A manager with no output device; every call is a no-op
    pub fn silent(settings: &Settings) -> Self {
        Self::with_output(None, settings)
    }

    fn with_output(output: Option<(OutputStream, OutputStreamHandle)>, settings: &Settings) -> Self {
        let mut manager = Self {
            output,
            sounds: HashMap::new(),
            music: None,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: settings.muted,
            max_voices_per_frame: settings.max_voices_per_frame,
        };
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.apply_music_volume();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.apply_music_volume();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_music_volume();
    }

    /// Effective sound effect volume
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    fn apply_music_volume(&self) {
        if let Some(sink) = &self.music {
            sink.set_volume(self.effective_music_volume());
        }
    }

    /// Decode a sound file into memory and bind it to `effect`
    ///
    /// Failures are logged; the effect then plays nothing.
    pub fn load_sound(&mut self, effect: SoundEffect, path: &Path) -> bool {
        match decode_sound(path) {
            Ok(sound) => {
                log::info!("Loaded {:?} sound from {}", effect, path.display());
                self.sounds.insert(effect, sound);
                true
            }
            Err(e) => {
                log::warn!("Failed to load sound {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Queue looping background music (paused until [`play_music_looping`])
    ///
    /// [`play_music_looping`]: AudioManager::play_music_looping
    pub fn load_music(&mut self, path: &Path) -> bool {
        match self.open_music(path) {
            Ok(sink) => {
                log::info!("Loaded background music from {}", path.display());
                self.music = Some(sink);
                self.apply_music_volume();
                true
            }
            Err(e) => {
                log::warn!("Failed to load background music {}: {}", path.display(), e);
                false
            }
        }
    }

    fn open_music(&self, path: &Path) -> Result<Sink, AudioError> {
        let (_, handle) = self.output.as_ref().ok_or(AudioError::NoOutput)?;
        let decoder = Decoder::new(BufReader::new(File::open(path)?))?;
        let sink = Sink::try_new(handle)?;
        sink.pause();
        sink.append(decoder.repeat_infinite());
        Ok(sink)
    }

    /// Start (or resume) the background music loop
    pub fn play_music_looping(&self) {
        match &self.music {
            Some(sink) => {
                sink.play();
                log::info!("Background music is playing");
            }
            None => log::debug!("No background music loaded"),
        }
    }

    /// Play a sound effect (fire-and-forget)
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }
        let Some((_, handle)) = &self.output else {
            return;
        };
        let Some(sound) = self.sounds.get(&effect) else {
            return;
        };

        if let Err(e) = handle.play_raw(sound.clone().amplify(vol).convert_samples()) {
            log::warn!("Failed to play {:?}: {}", effect, AudioError::from(e));
        }
    }

    /// Play the sounds for one frame's simulation events
    pub fn play_events(&self, events: &[SimEvent]) {
        for effect in frame_voices(events, self.max_voices_per_frame) {
            self.play(effect);
        }
    }
}

fn decode_sound(path: &Path) -> Result<SoundBuffer, AudioError> {
    let bytes = fs::read(path)?;
    Ok(Decoder::new(Cursor::new(bytes))?.buffered())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_voice_per_event() {
        let events = [
            SimEvent::Bounce,
            SimEvent::TargetHit { total: 1 },
            SimEvent::Bounce,
            SimEvent::TargetHit { total: 2 },
        ];
        assert_eq!(
            frame_voices(&events, 8),
            vec![
                SoundEffect::Bounce,
                SoundEffect::Interact,
                SoundEffect::Bounce,
                SoundEffect::Interact,
            ]
        );
        assert!(frame_voices(std::iter::empty::<&SimEvent>(), 8).is_empty());
    }

    #[test]
    fn test_voices_capped_per_effect() {
        let mut events = vec![SimEvent::Bounce; 50];
        events.push(SimEvent::TargetHit { total: 1 });

        let voices = frame_voices(&events, 4);
        let bounces = voices.iter().filter(|e| **e == SoundEffect::Bounce).count();
        assert_eq!(bounces, 4);
        // The cap on bounces does not starve other effects
        assert_eq!(voices.last(), Some(&SoundEffect::Interact));

        assert!(frame_voices(&events, 0).is_empty());
    }

    #[test]
    fn test_volume_math() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.8,
            music_volume: 2.0,
            ..Settings::default()
        };
        let mut audio = AudioManager::silent(&settings);
        assert!(!audio.is_enabled());
        assert!((audio.effective_sfx_volume() - 0.4).abs() < 1e-6);
        // Clamped to 1.0
        assert!((audio.effective_music_volume() - 0.5).abs() < 1e-6);

        audio.set_muted(true);
        assert_eq!(audio.effective_sfx_volume(), 0.0);
        assert_eq!(audio.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_missing_files_are_no_ops() {
        let mut audio = AudioManager::silent(&Settings::default());
        assert!(!audio.load_sound(SoundEffect::Bounce, Path::new("missing.wav")));
        assert!(!audio.load_music(Path::new("missing.mp3")));
        audio.play(SoundEffect::Bounce);
        audio.play_events(&[SimEvent::Bounce]);
        audio.play_music_looping();
    }
}
