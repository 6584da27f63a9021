// Host-side tests for background audio orchestration.
// Audio assets and the play/pause affordance are replaced by recorders.

use pano_core::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Play,
    Pause,
    Seek(f64),
}

#[derive(Default)]
struct AssetState {
    calls: Vec<Call>,
    failed: bool,
    buffering: bool,
    ended: bool,
    position: f64,
}

type Assets = Rc<RefCell<HashMap<String, AssetState>>>;

struct FakeSource {
    id: String,
    assets: Assets,
}

impl FakeSource {
    fn with<R>(&self, f: impl FnOnce(&mut AssetState) -> R) -> R {
        let mut assets = self.assets.borrow_mut();
        f(assets.entry(self.id.clone()).or_default())
    }
}

impl AudioSource for FakeSource {
    fn is_ready(&self) -> bool {
        self.with(|a| !a.failed && !a.buffering)
    }
    fn has_failed(&self) -> bool {
        self.with(|a| a.failed)
    }
    fn play(&mut self) {
        self.with(|a| a.calls.push(Call::Play));
    }
    fn pause(&mut self) {
        self.with(|a| a.calls.push(Call::Pause));
    }
    fn position(&self) -> f64 {
        self.with(|a| a.position)
    }
    fn seek(&mut self, seconds: f64) {
        self.with(|a| {
            a.position = seconds;
            a.ended = false;
            a.calls.push(Call::Seek(seconds));
        });
    }
    fn has_ended(&self) -> bool {
        self.with(|a| a.ended)
    }
}

struct FakeFactory {
    assets: Assets,
}

impl AudioFactory for FakeFactory {
    type Source = FakeSource;

    fn create(&mut self, info: &BackgroundAudioInfo) -> FakeSource {
        FakeSource {
            id: info.id.clone(),
            assets: self.assets.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct FakeUi {
    visible: bool,
    showing_pause: bool,
}

impl PlayPauseUi for FakeUi {
    fn set_pause_icon(&mut self) {
        self.showing_pause = true;
    }
    fn set_play_icon(&mut self) {
        self.showing_pause = false;
    }
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

fn info(id: &str) -> BackgroundAudioInfo {
    BackgroundAudioInfo {
        id: id.to_string(),
        src: format!("{id}.mp3"),
        duration: 120.0,
    }
}

fn make_view() -> (BackgroundAudioView<FakeFactory, FakeUi>, Assets) {
    let assets: Assets = Rc::default();
    let view = BackgroundAudioView::new(
        FakeFactory {
            assets: assets.clone(),
        },
        FakeUi::default(),
    );
    (view, assets)
}

fn calls(assets: &Assets, id: &str) -> Vec<Call> {
    assets
        .borrow()
        .get(id)
        .map(|a| a.calls.clone())
        .unwrap_or_default()
}

fn plays(assets: &Assets, id: &str) -> usize {
    calls(assets, id).iter().filter(|c| **c == Call::Play).count()
}

#[test]
fn sound_waits_for_gesture_then_switches_packs() {
    let (mut view, assets) = make_view();

    view.set_sound(Some(&info("A1")));
    let a1 = view.pack("A1").expect("pack created on first use");
    assert!(!a1.is_playing());
    assert!(a1.wants_to_play());
    assert_eq!(plays(&assets, "A1"), 0);
    assert!(view.ui().visible);

    assert!(view.grant_gesture());
    assert!(view.pack("A1").unwrap().is_playing());
    assert_eq!(plays(&assets, "A1"), 1);
    assert!(view.ui().showing_pause);

    view.set_sound(Some(&info("A2")));
    assert!(!view.pack("A1").unwrap().is_playing());
    assert!(view.pack("A2").unwrap().is_playing());
    assert_eq!(view.current_id(), Some("A2"));
    assert_eq!(view.playing_count(), 1);
}

#[test]
fn at_most_one_pack_plays_over_arbitrary_sequences() {
    let (mut view, _assets) = make_view();
    let script: [Option<&str>; 12] = [
        Some("a"),
        Some("b"),
        Some("b"),
        None,
        Some("c"),
        Some("a"),
        None,
        None,
        Some("a"),
        Some("c"),
        Some("b"),
        Some("a"),
    ];
    for (i, step) in script.iter().enumerate() {
        if i == 2 {
            view.grant_gesture();
        }
        let audio = step.map(info);
        view.set_sound(audio.as_ref());
        assert!(view.playing_count() <= 1, "step {step:?}");
        if i == 4 {
            view.toggle_play_pause();
            assert!(view.playing_count() <= 1);
        }
    }
    assert_eq!(view.pack_count(), 3);
    assert_eq!(view.current_id(), Some("a"));
    assert!(view.is_audible());
}

#[test]
fn re_entering_same_sound_touches_nothing() {
    let (mut view, assets) = make_view();
    view.grant_gesture();
    view.set_sound(Some(&info("A1")));
    let before = calls(&assets, "A1");
    assert_eq!(before, vec![Call::Play]);

    view.set_sound(Some(&info("A1")));
    assert_eq!(calls(&assets, "A1"), before);
    assert!(view.pack("A1").unwrap().is_playing());
}

#[test]
fn no_sound_stops_and_rewinds_current_pack() {
    let (mut view, assets) = make_view();
    view.grant_gesture();
    view.set_sound(Some(&info("A1")));
    assets.borrow_mut().get_mut("A1").unwrap().position = 42.0;

    view.set_sound(None);
    let a1 = view.pack("A1").unwrap();
    assert!(!a1.is_playing());
    assert_eq!(a1.position(), 0.0);
    assert_eq!(calls(&assets, "A1"), vec![Call::Play, Call::Pause, Call::Seek(0.0)]);
    assert!(!view.ui().visible);
    assert_eq!(view.current_id(), None);
}

#[test]
fn toggling_without_current_pack_is_a_no_op() {
    let (mut view, assets) = make_view();
    view.toggle_play_pause();
    view.play();
    view.pause();
    view.on_play_pause_clicked();
    assert_eq!(view.pack_count(), 0);
    assert!(assets.borrow().is_empty());
    assert_eq!(view.current_id(), None);
}

#[test]
fn toggle_pauses_and_resumes_current_pack() {
    let (mut view, assets) = make_view();
    view.grant_gesture();
    view.set_sound(Some(&info("A1")));

    view.toggle_play_pause();
    assert!(!view.is_audible());
    assert!(!view.ui().showing_pause);

    view.toggle_play_pause();
    assert!(view.is_audible());
    assert!(view.ui().showing_pause);
    assert_eq!(calls(&assets, "A1"), vec![Call::Play, Call::Pause, Call::Play]);
}

#[test]
fn first_click_on_affordance_starts_waiting_pack() {
    let (mut view, _assets) = make_view();
    view.set_sound(Some(&info("A1")));
    assert!(!view.is_audible());

    view.on_play_pause_clicked();
    assert!(view.gesture_granted());
    assert!(view.is_audible());

    view.on_play_pause_clicked();
    assert!(!view.is_audible());
}

#[test]
fn pointer_down_arms_debounce_once() {
    let (mut view, _assets) = make_view();
    assert!(view.on_pointer_down());
    assert!(!view.on_pointer_down());
    assert!(!view.gesture_granted());

    assert!(view.grant_gesture());
    assert!(!view.grant_gesture());
    assert!(!view.on_pointer_down());
}

#[test]
fn gesture_does_not_wake_abandoned_pack() {
    let (mut view, assets) = make_view();
    view.set_sound(Some(&info("A1")));
    view.set_sound(Some(&info("A2")));
    assert!(!view.pack("A1").unwrap().wants_to_play());

    view.grant_gesture();
    assert_eq!(plays(&assets, "A1"), 0);
    assert!(view.pack("A2").unwrap().is_playing());
}

#[test]
fn failed_asset_stays_silent() {
    let (mut view, assets) = make_view();
    assets.borrow_mut().entry("bad".into()).or_default().failed = true;
    view.grant_gesture();

    view.set_sound(Some(&info("bad")));
    view.play();
    assert!(!view.is_audible());
    assert_eq!(plays(&assets, "bad"), 0);
    assert!(!view.ui().showing_pause);
}

#[test]
fn asset_breaking_mid_playback_reports_silence() {
    let (mut view, assets) = make_view();
    view.grant_gesture();
    view.set_sound(Some(&info("A1")));
    assert!(view.is_audible());
    assert!(view.ui().showing_pause);

    assets.borrow_mut().get_mut("A1").unwrap().failed = true;
    for _ in 0..3 {
        view.refresh();
    }
    assert!(!view.is_audible());
    assert!(!view.ui().showing_pause);
    assert_eq!(calls(&assets, "A1"), vec![Call::Play, Call::Pause]);

    view.toggle_play_pause();
    assert!(!view.is_audible());
    assert_eq!(plays(&assets, "A1"), 1);
}

#[test]
fn play_before_data_arrives_is_dropped_not_queued() {
    let (mut view, assets) = make_view();
    assets.borrow_mut().entry("A1".into()).or_default().buffering = true;
    view.grant_gesture();

    view.set_sound(Some(&info("A1")));
    assert!(!view.is_audible());

    assets.borrow_mut().get_mut("A1").unwrap().buffering = false;
    view.refresh();
    assert!(!view.is_audible());
    assert_eq!(plays(&assets, "A1"), 0);

    view.toggle_play_pause();
    assert!(view.is_audible());
    assert_eq!(plays(&assets, "A1"), 1);
}

#[test]
fn finished_track_flips_to_play_icon_and_restarts() {
    let (mut view, assets) = make_view();
    view.grant_gesture();
    view.set_sound(Some(&info("A1")));
    {
        let mut a = assets.borrow_mut();
        let a1 = a.get_mut("A1").unwrap();
        a1.ended = true;
        a1.position = 120.0;
    }

    assert_eq!(view.refresh().as_deref(), Some("0:00/2:00"));
    assert!(!view.is_audible());
    assert!(!view.ui().showing_pause);

    view.toggle_play_pause();
    assert!(view.is_audible());
    assert_eq!(plays(&assets, "A1"), 2);
}

#[test]
fn refresh_reports_position_of_current_pack() {
    let (mut view, assets) = make_view();
    assert_eq!(view.refresh(), None);
    view.grant_gesture();
    view.set_sound(Some(&info("A1")));
    assets.borrow_mut().get_mut("A1").unwrap().position = 65.4;
    assert_eq!(view.refresh().as_deref(), Some("1:05/2:00"));
}

#[test]
fn container_reports_every_transition_once() {
    let (tx, rx) = std::sync::mpsc::channel();
    let gesture = GestureLatch::new();
    let assets: Assets = Rc::default();
    let source = FakeSource {
        id: "solo".into(),
        assets: assets.clone(),
    };
    let mut pack = AudioContainer::new(info("solo"), source, gesture.clone(), tx);

    pack.play();
    assert!(rx.try_recv().is_err());
    gesture.grant();
    pack.on_gesture_granted();
    pack.play();
    pack.pause();
    pack.pause();

    let got: Vec<bool> = rx.try_iter().map(|e| e.is_playing).collect();
    assert_eq!(got, vec![true, false]);
    assert_eq!(calls(&assets, "solo"), vec![Call::Play, Call::Pause]);
}

#[test]
fn manual_and_automatic_starts_share_the_gesture_gate() {
    let (tx, _rx) = std::sync::mpsc::channel();
    let gesture = GestureLatch::new();
    let assets: Assets = Rc::default();
    let mut pack = AudioContainer::new(
        info("solo"),
        FakeSource {
            id: "solo".into(),
            assets: assets.clone(),
        },
        gesture.clone(),
        tx,
    );

    pack.play_next(true);
    assert!(pack.wants_to_play());
    assert!(!pack.is_playing());
    pack.play_next(false);
    assert!(pack.wants_to_play());
    assert_eq!(plays(&assets, "solo"), 0);

    gesture.grant();
    pack.play_next(true);
    assert!(pack.is_playing());
    assert_eq!(plays(&assets, "solo"), 1);
}
