use pano_core::{AudioFactory, AudioSource, BackgroundAudioInfo};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Background track backed by an `<audio>` element.
///
/// Ready once the element has buffered enough to play on and has not hit a
/// media error. A missing element (construction failed) is never ready. A
/// rejected `play()` promise marks the source failed until the next start,
/// unless a later play/pause already superseded it.
pub struct MediaSource {
    id: String,
    el: Option<web::HtmlAudioElement>,
    refused: Rc<Cell<bool>>,
    attempt: Rc<Cell<u32>>,
}

impl AudioSource for MediaSource {
    fn is_ready(&self) -> bool {
        self.el.as_ref().is_some_and(|el| {
            el.error().is_none() && el.ready_state() >= web::HtmlMediaElement::HAVE_FUTURE_DATA
        })
    }

    fn has_failed(&self) -> bool {
        self.refused.get() || self.el.as_ref().map_or(true, |el| el.error().is_some())
    }

    fn play(&mut self) {
        let Some(el) = &self.el else {
            return;
        };
        self.refused.set(false);
        let n = self.attempt.get().wrapping_add(1);
        self.attempt.set(n);
        match el.play() {
            Ok(promise) => {
                let id = self.id.clone();
                let refused = self.refused.clone();
                let attempt = self.attempt.clone();
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        // a pause in between rejects with AbortError
                        if attempt.get() == n {
                            log::warn!("[audio] {} refused to start: {:?}", id, e);
                            refused.set(true);
                        }
                    }
                });
            }
            Err(e) => {
                log::warn!("[audio] {} play error: {:?}", self.id, e);
                self.refused.set(true);
            }
        }
    }

    fn pause(&mut self) {
        self.attempt.set(self.attempt.get().wrapping_add(1));
        if let Some(el) = &self.el {
            _ = el.pause();
        }
    }

    fn position(&self) -> f64 {
        self.el.as_ref().map(|el| el.current_time()).unwrap_or(0.0)
    }

    fn seek(&mut self, seconds: f64) {
        if let Some(el) = &self.el {
            el.set_current_time(seconds);
        }
    }

    fn has_ended(&self) -> bool {
        self.el.as_ref().is_some_and(|el| el.ended())
    }
}

#[derive(Default)]
pub struct MediaFactory;

impl AudioFactory for MediaFactory {
    type Source = MediaSource;

    fn create(&mut self, info: &BackgroundAudioInfo) -> MediaSource {
        let el = match web::HtmlAudioElement::new_with_src(&info.src) {
            Ok(el) => {
                el.set_preload("auto");
                Some(el)
            }
            Err(e) => {
                log::warn!("[audio] cannot create element for {}: {:?}", info.src, e);
                None
            }
        };
        MediaSource {
            id: info.id.clone(),
            el,
            refused: Rc::default(),
            attempt: Rc::default(),
        }
    }
}
