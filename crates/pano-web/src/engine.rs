//! Binding to the page-provided panorama engine.
//!
//! The page loads a 3D engine (photo dome, marker meshes, picking, camera)
//! and exposes it as a global `PanoramaEngine` class. Everything rendering
//! related happens on that side; this module only forwards the navigator's
//! requests to it.

use pano_core::{MarkerSpec, Rotation, SceneBackend};
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    pub type PanoramaEngine;

    #[wasm_bindgen(constructor, catch)]
    pub fn new(
        canvas: &web::HtmlCanvasElement,
        dome_resolution: u32,
        dome_size: f32,
    ) -> Result<PanoramaEngine, JsValue>;

    /// Resolves with an opaque texture handle, rejects when the image fails.
    #[wasm_bindgen(method, js_name = loadTexture)]
    pub fn load_texture(this: &PanoramaEngine, url: &str) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = setPhoto)]
    pub fn set_photo(this: &PanoramaEngine, texture: &JsValue, x: f32, y: f32, z: f32, w: f32);

    #[wasm_bindgen(method, js_name = createMarker)]
    pub fn create_marker(
        this: &PanoramaEngine,
        label: &str,
        x: f32,
        y: f32,
        z: f32,
        size: f32,
    ) -> u32;

    #[wasm_bindgen(method, js_name = disposeMarker)]
    pub fn dispose_marker(this: &PanoramaEngine, handle: u32);

    #[wasm_bindgen(method, js_name = setMarkerSpin)]
    pub fn set_marker_spin(this: &PanoramaEngine, handle: u32, radians: f32);

    /// `callback(handle)` is invoked when a marker is clicked.
    #[wasm_bindgen(method, js_name = onMarkerPicked)]
    pub fn on_marker_picked(this: &PanoramaEngine, callback: &js_sys::Function);

    #[wasm_bindgen(method, js_name = setLogo)]
    pub fn set_logo(this: &PanoramaEngine, url: &str);
}

/// [`SceneBackend`] over the JS engine plus the document title.
pub struct EngineScene {
    engine: PanoramaEngine,
    document: web::Document,
}

impl EngineScene {
    pub fn new(engine: PanoramaEngine, document: web::Document) -> Self {
        Self { engine, document }
    }

    pub fn engine(&self) -> &PanoramaEngine {
        &self.engine
    }
}

impl SceneBackend for EngineScene {
    type Marker = u32;
    type Texture = JsValue;

    fn create_marker(&mut self, spec: &MarkerSpec) -> u32 {
        let p = spec.position;
        self.engine.create_marker(&spec.label, p.x, p.y, p.z, spec.size)
    }

    fn dispose_marker(&mut self, marker: u32) {
        self.engine.dispose_marker(marker);
    }

    fn set_marker_spin(&mut self, marker: &u32, radians: f32) {
        self.engine.set_marker_spin(*marker, radians);
    }

    fn apply_image(&mut self, texture: JsValue, rotation: Rotation) {
        let Rotation { x, y, z, w } = rotation;
        self.engine.set_photo(&texture, x, y, z, w);
    }

    fn set_title(&mut self, title: &str) {
        self.document.set_title(title);
    }
}
