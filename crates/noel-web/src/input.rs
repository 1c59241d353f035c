use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

// Gesture thresholds are in CSS pixels, so client coordinates are enough.

#[inline]
pub fn mouse_client_px(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Position of the first active touch, if any.
#[inline]
pub fn first_touch_px(ev: &web::TouchEvent) -> Option<Vec2> {
    let t = ev.touches().get(0)?;
    Some(Vec2::new(t.client_x() as f32, t.client_y() as f32))
}

#[inline]
pub fn as_mouse(ev: &web::Event) -> Option<&web::MouseEvent> {
    ev.dyn_ref::<web::MouseEvent>()
}

#[inline]
pub fn as_touch(ev: &web::Event) -> Option<&web::TouchEvent> {
    ev.dyn_ref::<web::TouchEvent>()
}

/// Memory id carried by the clicked card, if the event started inside one.
pub fn memory_id_from_event(ev: &web::Event, card_selector: &str, attr: &str) -> Option<u32> {
    let target = ev.target()?.dyn_into::<web::Element>().ok()?;
    let card = target.closest(card_selector).ok()??;
    card.get_attribute(attr)?.parse().ok()
}
