//! Bridge to the overlay markup: writes the letter step and modal state to
//! the DOM and feeds overlay taps back into the scene.

use crate::constants::*;
use crate::dom::{self, Listener};
use crate::input;
use noel_core::{memories, LetterStep, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Last overlay state written to the DOM.
pub struct OverlayView {
    document: web::Document,
    applied: Option<(LetterStep, Option<u32>)>,
}

impl OverlayView {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            applied: None,
        }
    }

    /// Touch the DOM only when the step or modal selection changed.
    pub fn sync(&mut self, step: LetterStep, selected: Option<u32>) {
        if self.applied == Some((step, selected)) {
            return;
        }
        if self.applied.map(|(s, _)| s) != Some(step) {
            apply_letter_step(&self.document, step);
        }
        apply_modal(&self.document, selected);
        self.applied = Some((step, selected));
    }
}

fn apply_letter_step(document: &web::Document, step: LetterStep) {
    if let Some(body) = document.body() {
        let _ = body.set_attribute(LETTER_STEP_ATTR, step.as_str());
    }
    let opened = matches!(step, LetterStep::Opening | LetterStep::Opened);
    dom::set_hidden(document, SMALL_LETTER_ID, step != LetterStep::Small);
    dom::set_hidden(document, OPENED_LETTER_ID, !opened);
    if let Some(el) = document.get_element_by_id(OPENED_LETTER_ID) {
        let _ = el
            .class_list()
            .toggle_with_force(OPENING_CLASS, step == LetterStep::Opening);
    }
    dom::set_hidden(document, MESSAGE_PAGE_ID, step != LetterStep::Message);
    dom::set_hidden(document, MEMORIES_ID, !step.memories_visible());
}

fn apply_modal(document: &web::Document, selected: Option<u32>) {
    match selected.and_then(memories::find) {
        Some(m) => {
            if let Some(img) = document
                .get_element_by_id(IMAGE_MODAL_IMG_ID)
                .and_then(|el| el.dyn_into::<web::HtmlImageElement>().ok())
            {
                img.set_src(m.url);
            }
            dom::set_hidden(document, IMAGE_MODAL_ID, false);
        }
        None => dom::set_hidden(document, IMAGE_MODAL_ID, true),
    }
}

/// Place every `[data-memory-id]` card from the memory table.
pub fn layout_memory_cards(document: &web::Document) {
    let Ok(cards) = document.query_selector_all(MEMORY_CARD_SELECTOR) else {
        return;
    };
    for i in 0..cards.length() {
        let Some(card) = cards.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let Some(m) = card
            .get_attribute(MEMORY_ID_ATTR)
            .and_then(|id| id.parse().ok())
            .and_then(memories::find)
        else {
            log::warn!("[overlay] card without a known {MEMORY_ID_ATTR}");
            continue;
        };
        let style = format!(
            "left:{}%;top:{}%;transform:translate(-50%,-50%) rotate({}deg);animation-delay:{}s",
            m.x_percent,
            m.y_percent,
            m.rotation_deg,
            m.animation_delay_sec()
        );
        let _ = card.set_attribute("style", &style);
    }
}

/// Click listeners for the envelope, letter, backdrops, cards and modal.
pub fn wire_overlay(document: &web::Document, scene: &Rc<RefCell<Scene>>) -> Vec<Listener> {
    let mut listeners = Vec::new();

    {
        let scene = scene.clone();
        listeners.extend(dom::click_listener(document, SMALL_LETTER_ID, move || {
            scene.borrow_mut().tap_envelope();
        }));
    }
    {
        let scene = scene.clone();
        listeners.extend(dom::click_listener(document, LETTER_PAPER_ID, move || {
            scene.borrow_mut().tap_letter();
        }));
    }
    for backdrop in [LETTER_BACKDROP_ID, MESSAGE_BACKDROP_ID] {
        let scene = scene.clone();
        listeners.extend(dom::click_listener(document, backdrop, move || {
            scene.borrow_mut().tap_backdrop();
        }));
    }

    // Cards are matched by delegation on their container.
    if let Some(container) = document.get_element_by_id(MEMORIES_ID) {
        let scene = scene.clone();
        listeners.extend(Listener::new(&container, "click", move |ev| {
            if let Some(id) = input::memory_id_from_event(&ev, MEMORY_CARD_SELECTOR, MEMORY_ID_ATTR) {
                if !scene.borrow_mut().open_memory(id) {
                    log::debug!("[overlay] memory {id} not available");
                }
            }
        }));
    }

    // Clicks inside the modal content do not close it; only the modal
    // background or the close button do.
    if let Some(modal) = document.get_element_by_id(IMAGE_MODAL_ID) {
        let scene = scene.clone();
        listeners.extend(Listener::new(&modal, "click", move |ev| {
            let on_background = ev
                .target()
                .and_then(|t| t.dyn_into::<web::Element>().ok())
                .is_some_and(|el| el.id() == IMAGE_MODAL_ID);
            if on_background {
                scene.borrow_mut().close_memory();
            }
        }));
    }
    {
        let scene = scene.clone();
        listeners.extend(dom::click_listener(document, IMAGE_MODAL_CLOSE_ID, move || {
            scene.borrow_mut().close_memory();
        }));
    }

    listeners
}
