//! The owned simulation context and its per-frame step.
//!
//! A `Scene` holds every piece of mutable state: point clouds, snow,
//! dispersion, the active pointer gesture and the letter machine. Front ends
//! forward input to it, call [`Scene::step`] once per display refresh and
//! draw whatever the buffers hold afterwards.

use crate::config::SceneConfig;
use crate::constants::ROTATION_SETTLE_THRESHOLD;
use crate::dispersion::DispersionController;
use crate::error::ConfigError;
use crate::generator::{generate_star, generate_tree, PointCloud};
use crate::gesture::{GestureOutcome, PointerClassifier};
use crate::letter::{LetterMachine, LetterStep, Transition};
use crate::snow::SnowField;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

/// What a front end has to do after a step.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameCommands {
    /// Scene clock in seconds, published to the shader `time` uniform.
    pub time: f32,
    pub amount: f32,
    /// Tree (pitch, yaw) in radians. The star and snow are not rotated.
    pub tree_rotation: Vec2,
    pub letter: LetterStep,
    /// Letter transitions fired during this step, oldest first.
    pub transitions: SmallVec<[Transition; 2]>,
}

pub struct Scene {
    config: SceneConfig,
    tree: PointCloud,
    star: PointCloud,
    snow: SnowField,
    dispersion: DispersionController,
    classifier: PointerClassifier,
    letter: LetterMachine,
    rotation: Vec2,
    elapsed: f32,
    frames: u64,
}

impl Scene {
    /// Build a scene, seeding from `config.seed` or from entropy.
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let tree = generate_tree(&config.tree, rng);
        let star = generate_star(&config.tree, &config.star, rng);
        let snow = SnowField::generate(&config.snow, rng);
        log::info!(
            "[scene] tree={} star={} snow={} points",
            tree.len(),
            star.len(),
            snow.len()
        );
        Ok(Self {
            dispersion: DispersionController::new(config.motion.easing),
            classifier: PointerClassifier::new(config.motion.drag_threshold_px),
            letter: LetterMachine::new(config.motion.letter_open_delay_sec),
            tree,
            star,
            snow,
            config,
            rotation: Vec2::ZERO,
            elapsed: 0.0,
            frames: 0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn tree(&self) -> &PointCloud {
        &self.tree
    }

    pub fn star(&self) -> &PointCloud {
        &self.star
    }

    pub fn snow(&self) -> &SnowField {
        &self.snow
    }

    pub fn dispersion(&self) -> &DispersionController {
        &self.dispersion
    }

    pub fn letter(&self) -> &LetterMachine {
        &self.letter
    }

    pub fn letter_step(&self) -> LetterStep {
        self.letter.step()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn tree_rotation(&self) -> Vec2 {
        self.rotation
    }

    // ---------------- Pointer input ----------------

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.classifier.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.classifier.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) -> GestureOutcome {
        let outcome = self.classifier.pointer_up();
        self.apply_gesture(outcome)
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.classifier.pointer_down(x, y);
    }

    pub fn touch_move(&mut self, x: f32, y: f32) {
        self.classifier.pointer_move(x, y);
    }

    pub fn touch_end(&mut self) -> GestureOutcome {
        let outcome = self.classifier.touch_end();
        self.apply_gesture(outcome)
    }

    fn apply_gesture(&mut self, outcome: GestureOutcome) -> GestureOutcome {
        if outcome.is_tap() {
            self.dispersion.toggle();
        } else if outcome == GestureOutcome::Drag {
            log::debug!("[gesture] drag released, no toggle");
        }
        outcome
    }

    // ---------------- Overlay taps ----------------

    pub fn tap_envelope(&mut self) -> Option<Transition> {
        self.letter.tap_envelope(self.elapsed)
    }

    pub fn tap_letter(&mut self) -> Option<Transition> {
        self.letter.tap_letter()
    }

    pub fn tap_backdrop(&mut self) -> Option<Transition> {
        self.letter.tap_backdrop()
    }

    pub fn open_memory(&mut self, id: u32) -> bool {
        self.letter.open_memory(id)
    }

    pub fn close_memory(&mut self) {
        self.letter.close_memory();
    }

    // ---------------- Frame step ----------------

    /// Advance the simulation to `elapsed` seconds since start.
    ///
    /// The clock never runs backwards; an earlier `elapsed` reuses the last
    /// value. Buffer lengths are fixed, so every write lands in place.
    pub fn step(&mut self, elapsed: f32) -> FrameCommands {
        if elapsed.is_finite() && elapsed > self.elapsed {
            self.elapsed = elapsed;
        }
        let t = self.elapsed;
        self.frames += 1;

        let amount = self.dispersion.step();

        let mut transitions = SmallVec::new();
        transitions.extend(self.letter.on_dispersion(amount));
        transitions.extend(self.letter.poll(t));

        self.tree.update(t, amount);
        self.star.update(t, amount);

        if amount < ROTATION_SETTLE_THRESHOLD {
            self.rotation = Vec2::new(0.0, t * self.config.motion.idle_yaw_speed);
        } else {
            self.rotation *= self.config.motion.rotation_decay;
        }

        self.snow.step();

        FrameCommands {
            time: t,
            amount,
            tree_rotation: self.rotation,
            letter: self.letter.step(),
            transitions,
        }
    }
}
