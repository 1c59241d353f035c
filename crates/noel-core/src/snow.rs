use crate::config::SnowConfig;
use crate::constants::*;
use glam::Vec3;
use rand::Rng;

/// Endless column of falling points. Flakes fall by a fixed per-frame
/// speed and wrap from the floor back to the ceiling.
#[derive(Clone, Debug)]
pub struct SnowField {
    positions: Box<[Vec3]>,
    speeds: Box<[f32]>,
    floor_y: f32,
    ceiling_y: f32,
}

impl SnowField {
    pub fn generate<R: Rng + ?Sized>(cfg: &SnowConfig, rng: &mut R) -> Self {
        let n = cfg.count as usize;
        let mut positions = Vec::with_capacity(n);
        let mut speeds = Vec::with_capacity(n);
        for _ in 0..n {
            positions.push(Vec3::new(
                (rng.gen::<f32>() - 0.5) * SNOW_SPREAD,
                rng.gen::<f32>() * SNOW_SPAWN_SPAN_Y + SNOW_SPAWN_MIN_Y,
                (rng.gen::<f32>() - 0.5) * SNOW_SPREAD,
            ));
            speeds.push(SNOW_SPEED_MIN + rng.gen::<f32>() * SNOW_SPEED_SPAN);
        }
        Self {
            positions: positions.into_boxed_slice(),
            speeds: speeds.into_boxed_slice(),
            floor_y: cfg.floor_y,
            ceiling_y: cfg.ceiling_y,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn speeds(&self) -> &[f32] {
        &self.speeds
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        for (p, speed) in self.positions.iter_mut().zip(self.speeds.iter()) {
            p.y -= speed;
            if p.y < self.floor_y {
                p.y = self.ceiling_y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn flakes_wrap_to_ceiling_and_keep_xz() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut snow = SnowField::generate(&SnowConfig::default(), &mut rng);
        let before: Vec<Vec3> = snow.positions().to_vec();
        // Slowest flake needs (spawn max - floor) / min speed frames to wrap once.
        for _ in 0..2000 {
            snow.step();
        }
        for (a, b) in before.iter().zip(snow.positions()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.z, b.z);
            assert!(b.y >= SNOW_FLOOR_Y && b.y <= SNOW_CEILING_Y);
        }
        assert_eq!(snow.len(), SNOW_COUNT as usize);
    }

    #[test]
    fn speeds_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(12);
        let snow = SnowField::generate(&SnowConfig::default(), &mut rng);
        assert!(snow
            .speeds()
            .iter()
            .all(|&s| (SNOW_SPEED_MIN..=SNOW_SPEED_MIN + SNOW_SPEED_SPAN).contains(&s)));
    }
}
