use crate::audio::MediaFactory;
use crate::engine::EngineScene;
use crate::ui::{DomPlayPause, GroupMenu};
use pano_core::{BackgroundAudioView, MarkerTarget, Navigator, Tour};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub struct Viewer {
    pub nav: Navigator<EngineScene>,
    pub audio: BackgroundAudioView<MediaFactory, DomPlayPause>,
    pub group_menu: GroupMenu,
}

pub type SharedViewer = Rc<RefCell<Viewer>>;

impl Viewer {
    pub fn new(tour: Rc<Tour>, scene: EngineScene, ui: DomPlayPause) -> Self {
        Self {
            nav: Navigator::new(tour, scene),
            audio: BackgroundAudioView::new(MediaFactory, ui),
            group_menu: GroupMenu::default(),
        }
    }
}

/// Move to `target_id`: drop the old markers, load the image, then build
/// title, markers and background sound for the new state.
pub fn go_to_image(viewer: &SharedViewer, target_id: String) {
    let viewer = viewer.clone();
    spawn_local(async move {
        let (ticket, load) = {
            let mut v = viewer.borrow_mut();
            let ticket = match v.nav.begin(&target_id) {
                Ok(t) => t,
                Err(e) => {
                    log::error!("[nav] broken tour: {}", e);
                    return;
                }
            };
            let load = v.nav.backend().engine().load_texture(&ticket.url);
            (ticket, load)
        };

        let texture = match JsFuture::from(load).await {
            Ok(t) => Some(t),
            Err(e) => {
                log::warn!("[nav] cannot load {}: {:?}", ticket.url, e);
                None
            }
        };

        let mut v = viewer.borrow_mut();
        let Viewer { nav, audio, .. } = &mut *v;
        if let Some(state) = nav.finish(ticket, texture) {
            audio.set_sound(state.background_audio.as_ref());
        }
    });
}

/// Marker clicked in the scene.
pub fn on_marker_picked(viewer: &SharedViewer, document: &web::Document, handle: u32) {
    let target = viewer.borrow().nav.target_of(&handle).cloned();
    match target {
        Some(MarkerTarget::State(id)) => go_to_image(viewer, id),
        Some(MarkerTarget::Group { title, state_ids }) => {
            let tour = viewer.borrow().nav.tour().clone();
            let for_pick = viewer.clone();
            let mut v = viewer.borrow_mut();
            v.group_menu.show(document, &tour, &title, &state_ids, move |id| {
                go_to_image(&for_pick, id)
            });
        }
        None => log::debug!("[nav] pick on retired marker {}", handle),
    }
}
