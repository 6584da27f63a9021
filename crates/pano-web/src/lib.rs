#![cfg(target_arch = "wasm32")]
use pano_core::{Tour, PHOTO_DOME_RESOLUTION, PHOTO_DOME_SIZE};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod engine;
mod events;
mod fetch;
mod frame;
mod ui;
mod viewer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pano-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Without configuration and tour there is nothing to show.
    let config = match fetch::fetch_configuration(constants::CONFIG_URL).await {
        Ok(c) => c,
        Err(e) => {
            log::warn!("[init] can't get configuration: {:#}", e);
            return Ok(());
        }
    };
    let tour = match fetch::fetch_tour(&config).await {
        Ok(t) => t,
        Err(e) => {
            log::warn!("[init] can't get scene description: {:#}", e);
            return Ok(());
        }
    };
    report_problems(&tour);

    if let Some(title) = &config.title {
        document.set_title(title);
    }

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let engine = engine::PanoramaEngine::new(&canvas, PHOTO_DOME_RESOLUTION, PHOTO_DOME_SIZE)
        .map_err(|e| anyhow::anyhow!("engine init: {:?}", e))?;
    if let Some(logo) = &config.logo_url {
        engine.set_logo(logo);
        apply_brand_logo(&document, logo);
    }

    let tour = Rc::new(tour);
    let first = tour.first_state_id().to_string();
    let shared: viewer::SharedViewer = Rc::new(RefCell::new(viewer::Viewer::new(
        tour,
        engine::EngineScene::new(engine, document.clone()),
        ui::DomPlayPause::new(&document),
    )));
    shared.borrow_mut().audio.set_sound(None);

    events::wire_input_handlers(&canvas, &document, &shared);
    frame::start_loop(Rc::new(RefCell::new(frame::FrameContext::new(
        shared.clone(),
    ))));

    viewer::go_to_image(&shared, first);
    Ok(())
}

fn report_problems(tour: &Tour) {
    let problems = tour.validate();
    if problems.is_empty() {
        log::info!("[tour] {} states", tour.states().len());
        return;
    }
    for p in &problems {
        log::warn!("[tour] {}", p);
    }
}

fn apply_brand_logo(document: &web::Document, url: &str) {
    if let Some(img) = document
        .get_element_by_id(constants::BRAND_LOGO_ID)
        .and_then(|el| el.dyn_into::<web::HtmlImageElement>().ok())
    {
        img.set_src(url);
    }
}
