use crate::viewer::SharedViewer;
use instant::Instant;
use pano_core::{marker_spin, POSITION_REFRESH_MS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Cosmetic per-frame work: marker spin and the elapsed-time label.
pub struct FrameContext {
    pub viewer: SharedViewer,
    pub started: Instant,
    pub last_refresh: Instant,
}

impl FrameContext {
    pub fn new(viewer: SharedViewer) -> Self {
        let now = Instant::now();
        Self {
            viewer,
            started: now,
            last_refresh: now,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        // a click handler may hold the viewer; skip this frame then
        let Ok(mut v) = self.viewer.try_borrow_mut() else {
            return;
        };
        let elapsed = (now - self.started).as_secs_f32();
        v.nav.spin_markers(marker_spin(elapsed));

        if (now - self.last_refresh).as_secs_f64() * 1000.0 >= POSITION_REFRESH_MS {
            self.last_refresh = now;
            if let Some(label) = v.audio.refresh() {
                v.audio.ui().set_position_text(&label);
            }
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
