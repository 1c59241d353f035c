/// Dispersed flag plus the eased blend amount that follows it.
///
/// `amount` starts at 0 and moves a fixed fraction of the remaining distance
/// toward `dispersed ? 1 : 0` on every [`step`](Self::step), so it never
/// jumps and never leaves [0, 1].
#[derive(Clone, Debug)]
pub struct DispersionController {
    dispersed: bool,
    amount: f32,
    easing: f32,
}

impl DispersionController {
    pub fn new(easing: f32) -> Self {
        Self {
            dispersed: false,
            amount: 0.0,
            easing: easing.clamp(f32::EPSILON, 1.0),
        }
    }

    #[inline]
    pub fn dispersed(&self) -> bool {
        self.dispersed
    }

    #[inline]
    pub fn amount(&self) -> f32 {
        self.amount
    }

    #[inline]
    pub fn target(&self) -> f32 {
        if self.dispersed {
            1.0
        } else {
            0.0
        }
    }

    /// Flip the flag; `amount` only follows on the next steps.
    pub fn toggle(&mut self) -> bool {
        self.dispersed = !self.dispersed;
        log::info!(
            "[dispersion] toggled dispersed={} amount={:.3}",
            self.dispersed,
            self.amount
        );
        self.dispersed
    }

    pub fn step(&mut self) -> f32 {
        let target = self.target();
        self.amount = (self.amount + (target - self.amount) * self.easing).clamp(0.0, 1.0);
        self.amount
    }
}

impl Default for DispersionController {
    fn default() -> Self {
        Self::new(crate::constants::DISPERSION_EASING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_does_not_move_amount() {
        let mut d = DispersionController::default();
        assert!(d.toggle());
        assert_eq!(d.amount(), 0.0);
        assert_eq!(d.target(), 1.0);
        d.step();
        assert!((d.amount() - 0.08).abs() < 1e-6);
    }

    #[test]
    fn idle_controller_stays_at_rest() {
        let mut d = DispersionController::default();
        for _ in 0..50 {
            d.step();
        }
        assert_eq!(d.amount(), 0.0);
    }
}
