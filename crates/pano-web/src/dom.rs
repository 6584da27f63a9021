use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn html_element(document: &web::Document, element_id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    handler: impl FnMut() + 'static,
) {
    match document.get_element_by_id(element_id) {
        Some(el) => on_click(&el, handler),
        None => log::warn!("[init] missing #{}", element_id),
    }
}

/// Page-lifetime click handler.
pub fn on_click(el: &web::Element, handler: impl FnMut() + 'static) {
    click_listener(el, handler).forget();
}

/// Click handler owned by the caller; the listener stops working once the
/// returned closure is dropped, so drop it only together with `el`.
pub fn click_listener(
    el: &web::Element,
    mut handler: impl FnMut() + 'static,
) -> Closure<dyn FnMut()> {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure
}

/// One-shot timer; the callback is dropped after it fires.
pub fn set_timeout(millis: i32, handler: impl FnOnce() + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::once_into_js(handler);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.unchecked_ref(),
        millis,
    ) {
        log::warn!("setTimeout failed: {:?}", e);
    }
}

#[inline]
pub fn set_visible(el: &web::HtmlElement, visible: bool) {
    let cl = el.class_list();
    if visible {
        _ = cl.remove_1("hidden");
        _ = el.style().remove_property("display");
    } else {
        _ = cl.add_1("hidden");
        // fallback for pages without the CSS class
        _ = el.style().set_property("display", "none");
    }
}
