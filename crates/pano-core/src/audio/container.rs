use super::gesture::GestureLatch;
use super::position::position_label;
use super::source::AudioSource;
use crate::tour::BackgroundAudioInfo;
use std::sync::mpsc::Sender;

/// Reported by a container every time it starts or stops being audible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackStateChanged {
    pub container_id: String,
    pub is_playing: bool,
}

/// Playback state of one background-audio pack.
///
/// A container never touches its siblings. Every audible/silent transition
/// is announced on the owner's channel and the owner decides what else has
/// to happen.
pub struct AudioContainer<S> {
    info: BackgroundAudioInfo,
    source: S,
    gesture: GestureLatch,
    events: Sender<PlaybackStateChanged>,
    is_playing: bool,
    pending_play: bool,
}

impl<S: AudioSource> AudioContainer<S> {
    pub fn new(
        info: BackgroundAudioInfo,
        source: S,
        gesture: GestureLatch,
        events: Sender<PlaybackStateChanged>,
    ) -> Self {
        Self {
            info,
            source,
            gesture,
            events,
            is_playing: false,
            pending_play: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn info(&self) -> &BackgroundAudioInfo {
        &self.info
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Playback was requested before a user gesture and is waiting for one.
    pub fn wants_to_play(&self) -> bool {
        self.pending_play
    }

    pub fn play(&mut self) {
        if !self.gesture.is_granted() {
            log::debug!("[audio] {} waits for a user gesture", self.info.id);
            self.pending_play = true;
            return;
        }
        self.pending_play = false;
        if !self.source.is_ready() {
            log::debug!("[audio] {} not ready, play ignored", self.info.id);
            return;
        }
        if self.is_playing {
            return;
        }
        self.source.play();
        self.set_playing(true);
    }

    pub fn pause(&mut self) {
        self.pending_play = false;
        if !self.is_playing {
            return;
        }
        self.source.pause();
        self.set_playing(false);
    }

    /// Pause and rewind; used when the owner abandons this pack.
    pub fn stop(&mut self) {
        self.pause();
        self.source.seek(0.0);
    }

    /// Start (or resume) the pack's track. A finished track starts over.
    /// `manual` only shows up in the log; both paths go through [`play`](Self::play).
    pub fn play_next(&mut self, manual: bool) {
        log::debug!("[audio] {} play next (manual={})", self.info.id, manual);
        if self.source.has_ended() {
            self.source.seek(0.0);
        }
        self.play();
    }

    /// Honour a play request that was parked until the gesture arrived.
    pub fn on_gesture_granted(&mut self) {
        if self.pending_play {
            self.play();
        }
    }

    /// The asset ran to its end: rewind and report silence.
    pub fn on_ended(&mut self) {
        self.source.seek(0.0);
        if self.is_playing {
            self.set_playing(false);
        }
    }

    /// The asset broke while audible: stop it where it is and report silence.
    pub fn on_failed(&mut self) {
        self.pending_play = false;
        if !self.is_playing {
            return;
        }
        self.source.pause();
        self.set_playing(false);
    }

    pub fn position(&self) -> f64 {
        self.source.position()
    }

    pub fn position_label(&self) -> String {
        position_label(self.source.position(), self.info.duration)
    }

    fn set_playing(&mut self, is_playing: bool) {
        self.is_playing = is_playing;
        // owner gone means the viewer is being torn down
        _ = self.events.send(PlaybackStateChanged {
            container_id: self.info.id.clone(),
            is_playing,
        });
    }
}
