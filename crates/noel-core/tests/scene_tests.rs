// Host-side integration tests for the frame step, gestures and the letter flow.

use noel_core::{
    DispersionController, GestureOutcome, LetterMachine, LetterStep, Scene, SceneConfig,
    TransitionCause, ViewPreset, ViewSettings, Viewport,
};

const DT: f32 = 1.0 / 60.0;

fn make_scene() -> Scene {
    let cfg = SceneConfig {
        seed: Some(42),
        ..SceneConfig::default()
    };
    Scene::new(cfg).expect("default config is valid")
}

fn tap(scene: &mut Scene) -> GestureOutcome {
    scene.pointer_down(200.0, 200.0);
    scene.pointer_up()
}

#[test]
fn amount_is_monotonic_and_clamped() {
    let mut d = DispersionController::default();
    d.toggle();
    let mut prev = d.amount();
    for _ in 0..200 {
        let a = d.step();
        assert!(a >= prev && (0.0..=1.0).contains(&a));
        prev = a;
    }
    assert!((prev - 1.0).abs() < 1e-3);

    d.toggle();
    for _ in 0..50 {
        let a = d.step();
        assert!(a <= prev && (0.0..=1.0).contains(&a));
        prev = a;
    }
}

#[test]
fn hysteresis_band_does_not_flicker() {
    let mut m = LetterMachine::default();
    assert!(m.on_dispersion(0.45).is_none());
    let t = m.on_dispersion(0.51).expect("rising edge");
    assert_eq!(t.cause, TransitionCause::DispersionRising);
    for a in [0.49, 0.31, 0.45, 0.35, 0.5, 0.3] {
        assert!(m.on_dispersion(a).is_none(), "amount {a} changed state");
        assert_eq!(m.step(), LetterStep::Small);
    }
    let t = m.on_dispersion(0.29).expect("falling edge");
    assert_eq!(t.to, LetterStep::Hidden);
}

#[test]
fn tap_toggles_once_drag_never_touch_always() {
    let mut s = make_scene();
    assert_eq!(tap(&mut s), GestureOutcome::Tap);
    assert!(s.dispersion().dispersed());

    s.pointer_down(100.0, 100.0);
    s.pointer_move(140.0, 100.0);
    assert_eq!(s.pointer_up(), GestureOutcome::Drag);
    assert!(s.dispersion().dispersed());

    // Release with no press, e.g. a document-level mouseup after a drag off-canvas.
    assert_eq!(s.pointer_up(), GestureOutcome::Ignored);
    assert!(s.dispersion().dispersed());

    s.touch_start(10.0, 10.0);
    s.touch_move(80.0, 80.0);
    assert_eq!(s.touch_end(), GestureOutcome::Tap);
    assert!(!s.dispersion().dispersed());
}

#[test]
fn scripted_letter_sequence() {
    let mut s = make_scene();
    let mut t = 0.0;
    let mut run = |s: &mut Scene, frames: usize| {
        for _ in 0..frames {
            t += DT;
            s.step(t);
        }
    };

    run(&mut s, 5);
    assert_eq!(s.letter_step(), LetterStep::Hidden);

    tap(&mut s);
    run(&mut s, 30);
    assert_eq!(s.letter_step(), LetterStep::Small);

    let opening = s.tap_envelope().expect("envelope accepted");
    assert_eq!(opening.to, LetterStep::Opening);
    run(&mut s, 30);
    assert_eq!(s.letter_step(), LetterStep::Opening);
    run(&mut s, 30);
    assert_eq!(s.letter_step(), LetterStep::Opened);

    assert_eq!(s.tap_letter().map(|t| t.to), Some(LetterStep::Message));
    assert_eq!(s.tap_backdrop().map(|t| t.to), Some(LetterStep::Small));

    // Reassembling hides the letter again.
    tap(&mut s);
    run(&mut s, 60);
    assert_eq!(s.letter_step(), LetterStep::Hidden);
}

#[test]
fn frame_commands_report_transitions() {
    let mut s = make_scene();
    tap(&mut s);
    let mut t = 0.0;
    let mut seen = Vec::new();
    for _ in 0..20 {
        t += DT;
        let cmd = s.step(t);
        assert_eq!(cmd.letter, s.letter_step());
        seen.extend(cmd.transitions);
    }
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].from, LetterStep::Hidden);
    assert_eq!(seen[0].to, LetterStep::Small);
}

#[test]
fn backdrop_tap_while_opening_cancels_open() {
    let mut s = make_scene();
    tap(&mut s);
    let mut t = 0.0;
    for _ in 0..30 {
        t += DT;
        s.step(t);
    }
    s.tap_envelope();
    s.tap_backdrop();
    for _ in 0..120 {
        t += DT;
        s.step(t);
    }
    assert_eq!(s.letter_step(), LetterStep::Small);
}

#[test]
fn memory_modal_follows_letter_visibility() {
    let mut s = make_scene();
    assert!(!s.open_memory(2));
    tap(&mut s);
    let mut t = 0.0;
    for _ in 0..30 {
        t += DT;
        s.step(t);
    }
    assert!(s.open_memory(2));
    assert_eq!(s.letter().selected_memory(), Some(2));
    s.close_memory();
    assert_eq!(s.letter().selected_memory(), None);
}

#[test]
fn buffers_keep_their_length_across_steps() {
    let mut s = make_scene();
    let lens = (s.tree().len(), s.star().len(), s.snow().len());
    tap(&mut s);
    let mut t = 0.0;
    for _ in 0..100 {
        t += DT;
        s.step(t);
    }
    assert_eq!(lens, (s.tree().len(), s.star().len(), s.snow().len()));
}

#[test]
fn viewport_presets() {
    let cases = [
        (1440.0, 900.0, ViewPreset::Desktop, 12.0, 1.0),
        (700.0, 360.0, ViewPreset::MobileLandscape, 13.0, 2.5),
        (375.0, 812.0, ViewPreset::MobilePortrait, 16.0, 2.5),
    ];
    for (w, h, preset, eye_z, mult) in cases {
        let v = ViewSettings::new(Viewport::new(w, h));
        assert_eq!(v.preset, preset);
        assert_eq!(v.camera.eye.z, eye_z);
        assert_eq!(v.size_multiplier, mult);
    }
}
