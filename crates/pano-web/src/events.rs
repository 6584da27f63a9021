use crate::constants::PLAY_PAUSE_BUTTON_ID;
use crate::dom;
use crate::viewer::{self, SharedViewer};
use pano_core::GESTURE_DEBOUNCE_MS;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_input_handlers(
    canvas: &web::HtmlCanvasElement,
    document: &web::Document,
    viewer: &SharedViewer,
) {
    wire_pointerdown(canvas, viewer);
    wire_play_pause_click(document, viewer);
    wire_marker_picks(document, viewer);
}

// A pointer-down on the scene becomes the autoplay gesture once it settles.
fn wire_pointerdown(canvas: &web::HtmlCanvasElement, viewer: &SharedViewer) {
    let viewer = viewer.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        if !viewer.borrow_mut().audio.on_pointer_down() {
            return;
        }
        let viewer = viewer.clone();
        dom::set_timeout(GESTURE_DEBOUNCE_MS, move || {
            viewer.borrow_mut().audio.grant_gesture();
        });
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_play_pause_click(document: &web::Document, viewer: &SharedViewer) {
    let viewer = viewer.clone();
    dom::add_click_listener(document, PLAY_PAUSE_BUTTON_ID, move || {
        viewer.borrow_mut().audio.on_play_pause_clicked();
    });
}

fn wire_marker_picks(document: &web::Document, viewer: &SharedViewer) {
    let for_pick = viewer.clone();
    let document = document.clone();
    let closure = Closure::wrap(Box::new(move |handle: u32| {
        viewer::on_marker_picked(&for_pick, &document, handle);
    }) as Box<dyn FnMut(u32)>);
    viewer
        .borrow()
        .nav
        .backend()
        .engine()
        .on_marker_picked(closure.as_ref().unchecked_ref());
    closure.forget();
}
