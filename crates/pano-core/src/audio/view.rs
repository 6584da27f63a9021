use super::container::{AudioContainer, PlaybackStateChanged};
use super::gesture::GestureLatch;
use super::source::{AudioFactory, AudioSource};
use crate::tour::BackgroundAudioInfo;
use fnv::FnvHashMap;
use std::sync::mpsc::{channel, Receiver, Sender};

/// The play/pause affordance as seen by the audio view.
pub trait PlayPauseUi {
    /// Sound is audible; offer "pause".
    fn set_pause_icon(&mut self);
    /// Sound is silent; offer "play".
    fn set_play_icon(&mut self);
    fn set_visible(&mut self, visible: bool);
}

/// Single authority over which background-audio pack is audible.
///
/// Packs are created lazily per audio id and live for the whole session.
/// At most one of them is playing after every public call returns.
pub struct BackgroundAudioView<F: AudioFactory, U> {
    factory: F,
    ui: U,
    packs: FnvHashMap<String, AudioContainer<F::Source>>,
    current: Option<String>,
    gesture: GestureLatch,
    debounce_armed: bool,
    events_tx: Sender<PlaybackStateChanged>,
    events_rx: Receiver<PlaybackStateChanged>,
}

impl<F: AudioFactory, U: PlayPauseUi> BackgroundAudioView<F, U> {
    pub fn new(factory: F, ui: U) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            factory,
            ui,
            packs: FnvHashMap::default(),
            current: None,
            gesture: GestureLatch::new(),
            debounce_armed: false,
            events_tx,
            events_rx,
        }
    }

    /// Swap the background sound for the state being entered.
    pub fn set_sound(&mut self, audio_info: Option<&BackgroundAudioInfo>) {
        self.ui.set_visible(audio_info.is_some());

        let Some(info) = audio_info else {
            if let Some(id) = self.current.take() {
                log::info!("[audio] stop {} (state has no sound)", id);
                if let Some(pack) = self.packs.get_mut(&id) {
                    pack.stop();
                }
            }
            self.drain_events();
            self.ui.set_play_icon();
            return;
        };

        if self.current.as_deref() == Some(info.id.as_str()) {
            return;
        }

        if let Some(prev) = self.current.take() {
            if let Some(pack) = self.packs.get_mut(&prev) {
                pack.stop();
            }
        }
        log::info!("[audio] switch to {}", info.id);
        self.current = Some(info.id.clone());
        self.get_or_create(info).play_next(false);
        self.drain_events();
        if !self.is_audible() {
            self.ui.set_play_icon();
        }
    }

    pub fn toggle_play_pause(&mut self) {
        let Some(playing) = self.current_pack().map(AudioContainer::is_playing) else {
            return;
        };
        if playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn play(&mut self) {
        if let Some(pack) = self.current_pack_mut() {
            pack.play_next(true);
        }
        self.drain_events();
    }

    pub fn pause(&mut self) {
        let Some(pack) = self.current_pack_mut() else {
            return;
        };
        pack.pause();
        self.drain_events();
        self.ui.set_play_icon();
    }

    /// Click on the play/pause affordance. The click itself counts as the
    /// user gesture; when it is the first one and the current pack was
    /// waiting for it, starting that pack is all the click does.
    pub fn on_play_pause_clicked(&mut self) {
        let was_waiting = self
            .current_pack()
            .map(AudioContainer::wants_to_play)
            .unwrap_or(false);
        if self.grant_gesture() && was_waiting {
            return;
        }
        self.toggle_play_pause();
    }

    /// Pointer-down on the scene. Returns true when the caller should arm
    /// the debounce timer that ends in [`grant_gesture`](Self::grant_gesture).
    pub fn on_pointer_down(&mut self) -> bool {
        if self.gesture.is_granted() || self.debounce_armed {
            return false;
        }
        self.debounce_armed = true;
        true
    }

    /// Latch the session gesture flag and start a pack that was waiting for
    /// it. Returns true only on the call that flipped the latch.
    pub fn grant_gesture(&mut self) -> bool {
        if !self.gesture.grant() {
            return false;
        }
        log::info!("[gesture] user gesture detected, autoplay unlocked");
        if let Some(pack) = self.current_pack_mut() {
            pack.on_gesture_granted();
        }
        self.drain_events();
        true
    }

    pub fn gesture_granted(&self) -> bool {
        self.gesture.is_granted()
    }

    /// Periodic housekeeping: notices a finished or broken track and
    /// returns the position label of the current pack, if any.
    pub fn refresh(&mut self) -> Option<String> {
        let pack = self.current_pack_mut()?;
        if pack.is_playing() && pack.source().has_failed() {
            log::warn!("[audio] {} failed while playing", pack.id());
            pack.on_failed();
        } else if pack.is_playing() && pack.source().has_ended() {
            log::debug!("[audio] {} reached its end", pack.id());
            pack.on_ended();
        }
        let label = pack.position_label();
        self.drain_events();
        Some(label)
    }

    pub fn is_audible(&self) -> bool {
        self.current_pack()
            .map(AudioContainer::is_playing)
            .unwrap_or(false)
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_pack(&self) -> Option<&AudioContainer<F::Source>> {
        self.current.as_ref().and_then(|id| self.packs.get(id))
    }

    pub fn pack(&self, id: &str) -> Option<&AudioContainer<F::Source>> {
        self.packs.get(id)
    }

    pub fn pack_count(&self) -> usize {
        self.packs.len()
    }

    pub fn playing_count(&self) -> usize {
        self.packs.values().filter(|p| p.is_playing()).count()
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    fn current_pack_mut(&mut self) -> Option<&mut AudioContainer<F::Source>> {
        let id = self.current.as_ref()?;
        self.packs.get_mut(id)
    }

    fn get_or_create(&mut self, info: &BackgroundAudioInfo) -> &mut AudioContainer<F::Source> {
        let factory = &mut self.factory;
        let gesture = &self.gesture;
        let events = &self.events_tx;
        self.packs.entry(info.id.clone()).or_insert_with(|| {
            log::debug!("[audio] new pack {} ({})", info.id, info.src);
            AudioContainer::new(
                info.clone(),
                factory.create(info),
                gesture.clone(),
                events.clone(),
            )
        })
    }

    fn pause_all_except(&mut self, id: &str) {
        for pack in self.packs.values_mut().filter(|p| p.id() != id) {
            pack.pause();
        }
    }

    fn pause_all(&mut self) {
        for pack in self.packs.values_mut() {
            pack.pause();
        }
    }

    // Pausing in response to a message can queue further messages, so keep
    // going until the channel is empty. Pausing a silent pack sends nothing.
    fn drain_events(&mut self) {
        while let Ok(ev) = self.events_rx.try_recv() {
            let is_current = self.current.as_deref() == Some(ev.container_id.as_str());
            match (is_current, ev.is_playing) {
                (true, true) => {
                    self.pause_all_except(&ev.container_id);
                    self.ui.set_pause_icon();
                }
                (true, false) => {
                    self.pause_all();
                    self.ui.set_play_icon();
                }
                (false, true) => {
                    log::debug!("[audio] {} is not current, pausing it", ev.container_id);
                    if let Some(pack) = self.packs.get_mut(&ev.container_id) {
                        pack.pause();
                    }
                }
                (false, false) => {}
            }
        }
    }
}
