use dot_engine::SoundEvent;
use serde::Serialize;

/// Sound cue ids understood by the host's audio player.
pub mod sounds {
    use dot_engine::SoundEvent;

    pub const MUSIC_PLAY: SoundEvent = SoundEvent(1);
    pub const MUSIC_PAUSE: SoundEvent = SoundEvent(2);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicConfig {
    /// Playback volume in [0, 1], handed to the host with the view.
    pub volume: f32,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self { volume: 0.5 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicState {
    Paused,
    Playing,
    /// The browser refused to start playback without a user gesture.
    Blocked,
}

/// Background track controller.
///
/// Playback itself lives on the host. This side only asks for play/pause
/// through sound events and learns the outcome from the host's reports.
#[derive(Debug, Clone)]
pub struct Music {
    config: MusicConfig,
    state: MusicState,
}

impl Music {
    pub fn new(config: MusicConfig) -> Self {
        Self { config, state: MusicState::Paused }
    }

    /// Ask for playback as soon as the page loads.
    pub fn request_autoplay(&self) -> SoundEvent {
        sounds::MUSIC_PLAY
    }

    /// Host reports that playback started.
    pub fn on_started(&mut self) {
        self.state = MusicState::Playing;
    }

    /// Host reports that playback was refused.
    pub fn on_blocked(&mut self) {
        if self.state != MusicState::Playing {
            log::warn!("music autoplay blocked, waiting for a user gesture");
        }
        self.state = MusicState::Blocked;
    }

    /// Any user gesture is a chance to get past the autoplay policy.
    pub fn on_interaction(&self) -> Option<SoundEvent> {
        (self.state != MusicState::Playing).then_some(sounds::MUSIC_PLAY)
    }

    /// The music button. Pausing takes effect at once; playing waits for the
    /// host to confirm.
    pub fn toggle(&mut self) -> SoundEvent {
        if self.state == MusicState::Playing {
            self.state = MusicState::Paused;
            sounds::MUSIC_PAUSE
        } else {
            sounds::MUSIC_PLAY
        }
    }

    pub fn state(&self) -> MusicState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == MusicState::Playing
    }

    pub fn volume(&self) -> f32 {
        self.config.volume
    }

    pub fn icon(&self) -> &'static str {
        if self.is_playing() {
            "🔊"
        } else {
            "🔇"
        }
    }
}

impl Default for Music {
    fn default() -> Self {
        Self::new(MusicConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_at_half_volume() {
        let music = Music::default();
        assert_eq!(music.state(), MusicState::Paused);
        assert_eq!(music.volume(), 0.5);
        assert_eq!(music.icon(), "🔇");
        assert_eq!(music.request_autoplay(), sounds::MUSIC_PLAY);
    }

    #[test]
    fn host_reports_drive_state() {
        let mut music = Music::default();
        music.on_blocked();
        assert_eq!(music.state(), MusicState::Blocked);
        music.on_started();
        assert_eq!(music.state(), MusicState::Playing);
        assert_eq!(music.icon(), "🔊");
    }

    #[test]
    fn interaction_retries_only_when_silent() {
        let mut music = Music::default();
        music.on_blocked();
        assert_eq!(music.on_interaction(), Some(sounds::MUSIC_PLAY));
        music.on_started();
        assert_eq!(music.on_interaction(), None);
    }

    #[test]
    fn toggle_pauses_then_requests_play() {
        let mut music = Music::default();
        music.on_started();

        assert_eq!(music.toggle(), sounds::MUSIC_PAUSE);
        assert_eq!(music.state(), MusicState::Paused);

        assert_eq!(music.toggle(), sounds::MUSIC_PLAY);
        // Still paused until the host confirms.
        assert_eq!(music.state(), MusicState::Paused);
    }
}
