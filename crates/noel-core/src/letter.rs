//! Letter overlay state machine.
//!
//! `Hidden → Small` and back follow the dispersion amount through a
//! hysteresis band; everything past `Small` is driven by taps on the overlay
//! plus one timed step from `Opening` to `Opened`. Time is the scene clock
//! in seconds, so a pending step can never outlive the scene.

use crate::constants::{LETTER_HIDE_THRESHOLD, LETTER_SHOW_THRESHOLD};
use crate::memories;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LetterStep {
    #[default]
    Hidden,
    Small,
    Opening,
    Opened,
    Message,
}

impl LetterStep {
    pub fn as_str(self) -> &'static str {
        match self {
            LetterStep::Hidden => "hidden",
            LetterStep::Small => "small",
            LetterStep::Opening => "opening",
            LetterStep::Opened => "opened",
            LetterStep::Message => "message",
        }
    }

    /// Floating memory cards show once the tree has burst.
    #[inline]
    pub fn memories_visible(self) -> bool {
        self != LetterStep::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransitionCause {
    DispersionRising,
    DispersionFalling,
    EnvelopeTap,
    OpenTimeout,
    LetterTap,
    BackdropTap,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: LetterStep,
    pub to: LetterStep,
    pub cause: TransitionCause,
}

#[derive(Clone, Debug)]
pub struct LetterMachine {
    step: LetterStep,
    open_delay: f32,
    open_deadline: Option<f32>,
    selected_memory: Option<u32>,
}

impl LetterMachine {
    pub fn new(open_delay: f32) -> Self {
        Self {
            step: LetterStep::Hidden,
            open_delay,
            open_deadline: None,
            selected_memory: None,
        }
    }

    #[inline]
    pub fn step(&self) -> LetterStep {
        self.step
    }

    #[inline]
    pub fn selected_memory(&self) -> Option<u32> {
        self.selected_memory
    }

    /// Seconds on the scene clock at which `Opening` turns into `Opened`.
    pub fn open_deadline(&self) -> Option<f32> {
        self.open_deadline
    }

    fn go(&mut self, to: LetterStep, cause: TransitionCause) -> Option<Transition> {
        let t = Transition {
            from: self.step,
            to,
            cause,
        };
        self.step = to;
        if to != LetterStep::Opening {
            self.open_deadline = None;
        }
        if to == LetterStep::Hidden {
            self.selected_memory = None;
        }
        log::info!("[letter] {:?} -> {:?} ({:?})", t.from, t.to, t.cause);
        Some(t)
    }

    /// Hysteresis rule: rise above the show threshold while hidden, fall
    /// below the hide threshold while small.
    pub fn on_dispersion(&mut self, amount: f32) -> Option<Transition> {
        match self.step {
            LetterStep::Hidden if amount > LETTER_SHOW_THRESHOLD => {
                self.go(LetterStep::Small, TransitionCause::DispersionRising)
            }
            LetterStep::Small if amount < LETTER_HIDE_THRESHOLD => {
                self.go(LetterStep::Hidden, TransitionCause::DispersionFalling)
            }
            _ => None,
        }
    }

    pub fn tap_envelope(&mut self, now: f32) -> Option<Transition> {
        if self.step != LetterStep::Small {
            return None;
        }
        let t = self.go(LetterStep::Opening, TransitionCause::EnvelopeTap);
        self.open_deadline = Some(now + self.open_delay);
        t
    }

    /// Fire the timed `Opening → Opened` step once its deadline has passed.
    pub fn poll(&mut self, now: f32) -> Option<Transition> {
        match self.open_deadline {
            Some(deadline) if self.step == LetterStep::Opening && now >= deadline => {
                self.go(LetterStep::Opened, TransitionCause::OpenTimeout)
            }
            _ => None,
        }
    }

    pub fn tap_letter(&mut self) -> Option<Transition> {
        if self.step != LetterStep::Opened {
            return None;
        }
        self.go(LetterStep::Message, TransitionCause::LetterTap)
    }

    pub fn tap_backdrop(&mut self) -> Option<Transition> {
        match self.step {
            LetterStep::Opening | LetterStep::Opened | LetterStep::Message => {
                self.go(LetterStep::Small, TransitionCause::BackdropTap)
            }
            _ => None,
        }
    }

    /// Open the image modal for a memory card. Only visible cards can be
    /// opened.
    pub fn open_memory(&mut self, id: u32) -> bool {
        if !self.step.memories_visible() || memories::find(id).is_none() {
            return false;
        }
        self.selected_memory = Some(id);
        true
    }

    pub fn close_memory(&mut self) {
        self.selected_memory = None;
    }
}

impl Default for LetterMachine {
    fn default() -> Self {
        Self::new(crate::constants::LETTER_OPEN_DELAY_SEC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> LetterMachine {
        let mut m = LetterMachine::default();
        m.on_dispersion(0.6);
        assert_eq!(m.step(), LetterStep::Small);
        m
    }

    #[test]
    fn taps_out_of_order_are_ignored() {
        let mut m = LetterMachine::default();
        assert_eq!(m.tap_envelope(0.0), None);
        assert_eq!(m.tap_letter(), None);
        assert_eq!(m.tap_backdrop(), None);
        let mut m = small();
        assert_eq!(m.tap_letter(), None);
        assert_eq!(m.tap_backdrop(), None);
        assert_eq!(m.step(), LetterStep::Small);
    }

    #[test]
    fn open_timeout_waits_for_deadline() {
        let mut m = small();
        m.tap_envelope(10.0);
        let deadline = m.open_deadline().expect("deadline set");
        assert!((deadline - 10.8).abs() < 1e-5);
        assert_eq!(m.poll(10.5), None);
        let t = m.poll(deadline).expect("opened");
        assert_eq!(t.cause, TransitionCause::OpenTimeout);
        assert_eq!(m.step(), LetterStep::Opened);
        assert_eq!(m.open_deadline(), None);
    }

    #[test]
    fn backdrop_during_opening_cancels_timer() {
        let mut m = small();
        m.tap_envelope(1.0);
        m.tap_backdrop();
        assert_eq!(m.step(), LetterStep::Small);
        assert_eq!(m.poll(5.0), None);
        assert_eq!(m.step(), LetterStep::Small);
    }

    #[test]
    fn letter_states_ignore_dispersion() {
        let mut m = small();
        m.tap_envelope(0.0);
        assert_eq!(m.on_dispersion(0.0), None);
        assert_eq!(m.step(), LetterStep::Opening);
    }

    #[test]
    fn memory_modal_requires_visible_cards() {
        let mut m = LetterMachine::default();
        assert!(!m.open_memory(1));
        let mut m = small();
        assert!(m.open_memory(3));
        assert_eq!(m.selected_memory(), Some(3));
        assert!(!m.open_memory(42));
        assert_eq!(m.selected_memory(), Some(3));
        m.on_dispersion(0.1);
        assert_eq!(m.step(), LetterStep::Hidden);
        assert_eq!(m.selected_memory(), None);
    }
}
