use crate::constants::{GROUP_MENU_ID, PLAY_PAUSE_BUTTON_ID, POSITION_LABEL_ID};
use crate::dom;
use pano_core::{PlayPauseUi, Tour, PAUSE_ICON, PLAY_ICON};
use wasm_bindgen::closure::Closure;
use web_sys as web;

/// Play/pause affordance made of a button and an elapsed-time label.
pub struct DomPlayPause {
    button: Option<web::HtmlElement>,
    position: Option<web::HtmlElement>,
}

impl DomPlayPause {
    pub fn new(document: &web::Document) -> Self {
        let button = dom::html_element(document, PLAY_PAUSE_BUTTON_ID);
        if button.is_none() {
            log::warn!("[init] no #{} on the page", PLAY_PAUSE_BUTTON_ID);
        }
        Self {
            button,
            position: dom::html_element(document, POSITION_LABEL_ID),
        }
    }

    pub fn set_position_text(&self, text: &str) {
        if let Some(el) = &self.position {
            el.set_text_content(Some(text));
        }
    }
}

impl PlayPauseUi for DomPlayPause {
    fn set_pause_icon(&mut self) {
        if let Some(el) = &self.button {
            el.set_text_content(Some(PAUSE_ICON));
        }
    }

    fn set_play_icon(&mut self) {
        if let Some(el) = &self.button {
            el.set_text_content(Some(PLAY_ICON));
        }
    }

    fn set_visible(&mut self, visible: bool) {
        for el in [&self.button, &self.position].into_iter().flatten() {
            dom::set_visible(el, visible);
        }
    }
}

/// Chooser shown for group links. The entries are rebuilt on every open;
/// their click handlers live here and are released with the old entries.
#[derive(Default)]
pub struct GroupMenu {
    listeners: Vec<Closure<dyn FnMut()>>,
}

impl GroupMenu {
    /// Fill the chooser with one button per member state and show it.
    /// `on_pick` receives the chosen state id; the menu hides itself first.
    pub fn show(
        &mut self,
        document: &web::Document,
        tour: &Tour,
        title: &str,
        state_ids: &[String],
        on_pick: impl Fn(String) + Clone + 'static,
    ) {
        let Some(menu) = dom::html_element(document, GROUP_MENU_ID) else {
            log::warn!("[nav] no #{} for group link {}", GROUP_MENU_ID, title);
            return;
        };
        menu.set_inner_html("");
        self.listeners.clear();

        if let Ok(header) = document.create_element("h3") {
            header.set_text_content(Some(title));
            _ = menu.append_child(&header);
        }
        for id in state_ids {
            let Ok(entry) = document.create_element("button") else {
                continue;
            };
            entry.set_text_content(Some(tour.title_of(id)));
            let menu_for_click = menu.clone();
            let target = id.clone();
            let pick = on_pick.clone();
            self.listeners.push(dom::click_listener(&entry, move || {
                dom::set_visible(&menu_for_click, false);
                pick(target.clone());
            }));
            _ = menu.append_child(&entry);
        }
        if let Ok(close) = document.create_element("button") {
            close.set_text_content(Some("\u{2715}"));
            _ = close.set_attribute("class", "close");
            let menu_for_close = menu.clone();
            self.listeners.push(dom::click_listener(&close, move || {
                dom::set_visible(&menu_for_close, false)
            }));
            _ = menu.append_child(&close);
        }
        log::debug!("[nav] group menu {} with {} entries", title, state_ids.len());
        dom::set_visible(&menu, true);
    }
}
