#![cfg(target_arch = "wasm32")]
use noel_core::{memories::MEMORIES, LetterStep, Scene, SceneConfig, ViewSettings, Viewport};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use frame::FrameContext;

/// Everything that must be released on unmount. Field order is drop order:
/// the frame loop stops first, then listeners go, then the GPU state.
struct App {
    _frame_loop: frame::LoopHandle,
    _listeners: Vec<dom::Listener>,
    _frame_ctx: Rc<RefCell<FrameContext>>,
    scene: Rc<RefCell<Scene>>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    // Set when unmount() arrives while init is still awaiting the GPU.
    static UNMOUNT_REQUESTED: Cell<bool> = const { Cell::new(false) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("noel-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn load_config(window: &web::Window) -> SceneConfig {
    let query = window.location().search().unwrap_or_default();
    match SceneConfig::from_query(&query) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("[config] {e}; using defaults");
            SceneConfig::default()
        }
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);

    let scene = match Scene::new(load_config(&window)) {
        Ok(scene) => scene,
        Err(e) => {
            log::warn!("[config] {e}; using defaults");
            Scene::new(SceneConfig::default())?
        }
    };

    let (w, h) = dom::viewport_css_size()
        .unwrap_or((canvas.client_width() as f32, canvas.client_height() as f32));
    let view = ViewSettings::new(Viewport::new(w, h));
    log::info!("[view] {:?} at {}x{}", view.preset, w, h);

    // Without WebGPU the scene and overlay still run; nothing is drawn.
    let gpu = match render::GpuState::new(&canvas, &scene).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    };
    if UNMOUNT_REQUESTED.with(|u| u.replace(false)) {
        log::info!("[init] unmounted before ready; aborting");
        return Ok(());
    }

    overlay::layout_memory_cards(&document);
    let scene = Rc::new(RefCell::new(scene));
    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        scene: scene.clone(),
        gpu,
        canvas: canvas.clone(),
        view,
        overlay: overlay::OverlayView::new(document.clone()),
        started: Instant::now(),
    }));

    let mut listeners = events::wire_input_handlers(events::InputWiring {
        window: window.clone(),
        document: document.clone(),
        canvas,
        scene: scene.clone(),
    });
    listeners.extend(overlay::wire_overlay(&document, &scene));
    {
        // Weak so a resize after teardown is a no-op.
        let ctx = Rc::downgrade(&frame_ctx);
        listeners.extend(dom::Listener::new(&window, "resize", move |_| {
            if let Some(ctx) = ctx.upgrade() {
                ctx.borrow_mut().resize();
            }
        }));
    }

    let frame_loop = frame::start_loop(frame_ctx.clone());
    APP.with(|app| {
        *app.borrow_mut() = Some(App {
            _frame_loop: frame_loop,
            _listeners: listeners,
            _frame_ctx: frame_ctx,
            scene,
        })
    });
    log::info!("[init] ready");
    Ok(())
}

/// Tear everything down: stop the loop, remove listeners, free GPU buffers.
#[wasm_bindgen]
pub fn unmount() {
    match APP.with(|app| app.borrow_mut().take()) {
        Some(app) => {
            drop(app);
            log::info!("[unmount] done");
        }
        None => UNMOUNT_REQUESTED.with(|u| u.set(true)),
    }
}

/// Current letter step as the overlay sees it.
#[wasm_bindgen]
pub fn letter_step() -> String {
    APP.with(|app| {
        app.borrow()
            .as_ref()
            .map(|a| a.scene.borrow().letter_step())
            .unwrap_or(LetterStep::Hidden)
            .as_str()
            .to_string()
    })
}

/// The memory table as plain JS objects, for overlays that build their own
/// cards.
#[wasm_bindgen]
pub fn memories() -> js_sys::Array {
    let out = js_sys::Array::new();
    for m in MEMORIES.iter() {
        let obj = js_sys::Object::new();
        let fields: [(&str, JsValue); 6] = [
            ("id", m.id.into()),
            ("url", m.url.into()),
            ("x", m.x_percent.into()),
            ("y", m.y_percent.into()),
            ("rotation", m.rotation_deg.into()),
            ("delay", m.animation_delay_sec().into()),
        ];
        for (key, value) in fields {
            let _ = js_sys::Reflect::set(&obj, &key.into(), &value);
        }
        out.push(&obj);
    }
    out
}
