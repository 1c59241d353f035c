use crate::dom::Listener;
use crate::input;
use noel_core::{GestureOutcome, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct InputWiring {
    pub window: web::Window,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<Scene>>,
}

fn log_outcome(source: &str, outcome: GestureOutcome) {
    match outcome {
        GestureOutcome::Tap => log::info!("[{source}] tap"),
        GestureOutcome::Drag => log::debug!("[{source}] drag"),
        GestureOutcome::Ignored => {}
    }
}

/// Mouse and touch listeners feeding the pointer classifier.
///
/// Press and touch start are taken on the canvas only; moves are tracked on
/// the window and releases on the document so a drag that leaves the canvas
/// still ends cleanly.
pub fn wire_input_handlers(w: InputWiring) -> Vec<Listener> {
    let mut listeners = Vec::new();

    // mousedown
    {
        let scene = w.scene.clone();
        listeners.extend(Listener::new(&w.canvas, "mousedown", move |ev| {
            if let Some(m) = input::as_mouse(&ev) {
                let p = input::mouse_client_px(m);
                scene.borrow_mut().pointer_down(p.x, p.y);
            }
        }));
    }

    // mousemove
    {
        let scene = w.scene.clone();
        listeners.extend(Listener::new(&w.window, "mousemove", move |ev| {
            if let Some(m) = input::as_mouse(&ev) {
                let p = input::mouse_client_px(m);
                scene.borrow_mut().pointer_move(p.x, p.y);
            }
        }));
    }

    // mouseup
    {
        let scene = w.scene.clone();
        listeners.extend(Listener::new(&w.document, "mouseup", move |_| {
            let outcome = scene.borrow_mut().pointer_up();
            log_outcome("mouse", outcome);
        }));
    }

    // touchstart / touchmove / touchend; non-passive so the page never
    // scrolls or zooms and no compatibility mouse events follow.
    {
        let scene = w.scene.clone();
        listeners.extend(Listener::active(&w.canvas, "touchstart", move |ev| {
            ev.prevent_default();
            if let Some(p) = input::as_touch(&ev).and_then(input::first_touch_px) {
                scene.borrow_mut().touch_start(p.x, p.y);
            }
        }));
    }
    {
        let scene = w.scene.clone();
        listeners.extend(Listener::active(&w.canvas, "touchmove", move |ev| {
            ev.prevent_default();
            if let Some(p) = input::as_touch(&ev).and_then(input::first_touch_px) {
                scene.borrow_mut().touch_move(p.x, p.y);
            }
        }));
    }
    {
        let scene = w.scene.clone();
        listeners.extend(Listener::active(&w.canvas, "touchend", move |ev| {
            ev.prevent_default();
            let outcome = scene.borrow_mut().touch_end();
            log_outcome("touch", outcome);
        }));
    }

    listeners
}
