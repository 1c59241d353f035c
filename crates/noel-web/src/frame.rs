use crate::dom;
use crate::overlay::OverlayView;
use crate::render;
use instant::Instant;
use noel_core::{Scene, ViewSettings, Viewport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Rc<RefCell<Scene>>,
    pub gpu: Option<render::GpuState>,
    pub canvas: web::HtmlCanvasElement,
    pub view: ViewSettings,
    pub overlay: OverlayView,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let elapsed = self.started.elapsed().as_secs_f32();
        let cmd = self.scene.borrow_mut().step(elapsed);
        let scene = self.scene.borrow();

        self.overlay.sync(cmd.letter, scene.letter().selected_memory());

        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            match gpu.render(&scene, &cmd, &self.view) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[gpu] surface lost or outdated; reconfiguring");
                    gpu.reconfigure();
                }
                Err(e) => log::error!("[gpu] render error: {:?}", e),
            }
        }
    }

    /// Recompute backing size, camera and point scale from the window.
    pub fn resize(&mut self) {
        dom::sync_canvas_backing_size(&self.canvas);
        if let Some((w, h)) = dom::viewport_css_size() {
            let view = ViewSettings::new(Viewport::new(w, h));
            if view.preset != self.view.preset {
                log::info!("[view] {:?} -> {:?}", self.view.preset, view.preset);
            }
            self.view = view;
        }
    }
}

/// Running requestAnimationFrame loop. Dropping the handle cancels the
/// pending frame and releases the tick closure.
pub struct LoopHandle {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to its own cell.
        self.tick.borrow_mut().take();
    }
}

fn request_frame(
    tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: &Cell<Option<i32>>,
) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone()))
    else {
        return;
    };
    pending.set(w.request_animation_frame(cb.unchecked_ref()).ok());
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let pending_clone = pending.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_clone.set(None);
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &pending_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &pending);
    LoopHandle { tick, pending }
}
