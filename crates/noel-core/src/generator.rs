//! Procedural point clouds for the tree canopy, trunk and star.
//!
//! Point counts depend only on the configuration; the random source only
//! decides where points land and how they look. Each cloud is stored as a
//! structure of arrays with index identity, sized once and never resized.

use crate::config::{StarConfig, TreeConfig};
use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Per-point attributes uploaded once to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointAttributes {
    pub color: [f32; 3],
    pub size: f32,
    pub brightness: f32,
}

/// Per-axis idle oscillation: angular speed (rad/s) and amplitude.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Oscillation {
    pub speed: Vec3,
    pub amplitude: Vec3,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorBucket {
    Green,
    Gold,
    Red,
    Blue,
}

impl ColorBucket {
    /// Map a uniform sample in [0, 1) onto the weighted buckets.
    pub fn from_sample(u: f32) -> Self {
        if u < COLOR_THRESHOLDS[0] {
            ColorBucket::Green
        } else if u < COLOR_THRESHOLDS[1] {
            ColorBucket::Gold
        } else if u < COLOR_THRESHOLDS[2] {
            ColorBucket::Red
        } else {
            ColorBucket::Blue
        }
    }

    pub fn color<R: Rng + ?Sized>(self, rng: &mut R) -> [f32; 3] {
        match self {
            ColorBucket::Green => {
                let i = 0.85 + rng.gen::<f32>() * 0.15;
                [0.15 * i, (0.6 + rng.gen::<f32>() * 0.4) * i, 0.15 * i]
            }
            ColorBucket::Gold => {
                let i = 0.9 + rng.gen::<f32>() * 0.1;
                [i, (0.84 + rng.gen::<f32>() * 0.15) * i, 0.1 * i]
            }
            ColorBucket::Red => {
                let i = 0.9 + rng.gen::<f32>() * 0.1;
                [i, 0.15 * i, 0.1 * i]
            }
            ColorBucket::Blue => {
                let i = 0.85 + rng.gen::<f32>() * 0.15;
                [0.4 * i, (0.6 + rng.gen::<f32>() * 0.3) * i, i]
            }
        }
    }
}

/// Index of the size bucket for a uniform sample in [0, 1).
#[inline]
pub fn size_bucket(u: f32) -> usize {
    SIZE_THRESHOLDS
        .iter()
        .position(|&t| u < t)
        .unwrap_or(SIZE_THRESHOLDS.len() - 1)
}

fn sample_size<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let [lo, hi] = SIZE_RANGES[size_bucket(rng.gen())];
    lo + rng.gen::<f32>() * (hi - lo)
}

/// Number of canopy points in band `layer` (never below the minimum).
pub fn canopy_layer_count(tree: &TreeConfig, layer: u32) -> u32 {
    let ratio = layer as f64 / tree.layers.max(1) as f64;
    let tapered = (tree.points_per_layer as f64 * (1.0 - ratio * LAYER_COUNT_TAPER)).floor();
    (tapered.max(0.0) as u32).max(MIN_POINTS_PER_LAYER)
}

pub fn canopy_point_count(tree: &TreeConfig) -> usize {
    (0..tree.layers)
        .map(|l| canopy_layer_count(tree, l) as usize)
        .sum()
}

pub fn tree_point_count(tree: &TreeConfig) -> usize {
    canopy_point_count(tree) + tree.trunk_points as usize
}

/// Five spokes plus ten outline edges, each sampled with both endpoints.
pub fn star_point_count(star: &StarConfig) -> usize {
    15 * (star.samples_per_edge as usize + 1)
}

/// A fixed-size point set with its idle motion and dispersion endpoints.
#[derive(Clone, Debug)]
pub struct PointCloud {
    original: Box<[Vec3]>,
    current: Box<[Vec3]>,
    targets: Box<[Vec3]>,
    attributes: Box<[PointAttributes]>,
    oscillation: Box<[Oscillation]>,
    jitter: Vec3,
}

impl PointCloud {
    #[inline]
    pub fn len(&self) -> usize {
        self.original.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Positions as of the last [`PointCloud::update`].
    pub fn positions(&self) -> &[Vec3] {
        &self.current
    }

    pub fn original_positions(&self) -> &[Vec3] {
        &self.original
    }

    pub fn dispersion_targets(&self) -> &[Vec3] {
        &self.targets
    }

    pub fn attributes(&self) -> &[PointAttributes] {
        &self.attributes
    }

    pub fn oscillations(&self) -> &[Oscillation] {
        &self.oscillation
    }

    pub fn jitter(&self) -> Vec3 {
        self.jitter
    }

    /// Idle position of point `i` at time `t`.
    pub fn idle_position(&self, i: usize, t: f32) -> Vec3 {
        idle_position(self.original[i], &self.oscillation[i], self.jitter, t)
    }

    /// Recompute every current position: idle jitter blended toward the
    /// dispersion target by `amount`.
    pub fn update(&mut self, t: f32, amount: f32) {
        let jitter = self.jitter;
        for (((cur, orig), osc), target) in self
            .current
            .iter_mut()
            .zip(self.original.iter())
            .zip(self.oscillation.iter())
            .zip(self.targets.iter())
        {
            let idle = idle_position(*orig, osc, jitter, t);
            *cur = idle.lerp(*target, amount);
        }
    }
}

#[inline]
fn idle_position(orig: Vec3, osc: &Oscillation, jitter: Vec3, t: f32) -> Vec3 {
    let a = osc.amplitude * jitter;
    Vec3::new(
        orig.x + (t * osc.speed.x).sin() * a.x,
        orig.y + (t * osc.speed.y + 1.0).sin() * a.y,
        orig.z + (t * osc.speed.z).cos() * a.z,
    )
}

/// Uniform point in the dispersion box centred on the origin.
pub fn dispersion_target<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen::<f32>() - 0.5,
        rng.gen::<f32>() - 0.5,
        rng.gen::<f32>() - 0.5,
    ) * DISPERSION_EXTENT
}

struct CloudBuilder {
    positions: Vec<Vec3>,
    attributes: Vec<PointAttributes>,
    oscillation: Vec<Oscillation>,
}

impl CloudBuilder {
    fn with_capacity(n: usize) -> Self {
        Self {
            positions: Vec::with_capacity(n),
            attributes: Vec::with_capacity(n),
            oscillation: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, position: Vec3, attributes: PointAttributes, oscillation: Oscillation) {
        self.positions.push(position);
        self.attributes.push(attributes);
        self.oscillation.push(oscillation);
    }

    fn finish<R: Rng + ?Sized>(self, jitter: Vec3, rng: &mut R) -> PointCloud {
        let targets: Vec<Vec3> = (0..self.positions.len())
            .map(|_| dispersion_target(rng))
            .collect();
        let original = self.positions.into_boxed_slice();
        PointCloud {
            current: original.clone(),
            original,
            targets: targets.into_boxed_slice(),
            attributes: self.attributes.into_boxed_slice(),
            oscillation: self.oscillation.into_boxed_slice(),
            jitter,
        }
    }
}

fn canopy_oscillation<R: Rng + ?Sized>(rng: &mut R) -> Oscillation {
    let freq = 0.5 + rng.gen::<f32>() * 3.0;
    let amp = 0.3 + rng.gen::<f32>() * 1.2;
    let mut speed = || (rng.gen::<f32>() - 0.2) * 2.0 * freq;
    Oscillation {
        speed: Vec3::new(speed(), speed(), speed()),
        amplitude: Vec3::new(amp, amp * 0.8, amp),
    }
}

fn star_oscillation<R: Rng + ?Sized>(rng: &mut R) -> Oscillation {
    let freq = 0.3 + rng.gen::<f32>() * 0.5;
    let amp = 0.2 + rng.gen::<f32>() * 0.3;
    let sx = (rng.gen::<f32>() - 0.5) * freq;
    let sy = (rng.gen::<f32>() - 0.5) * freq;
    let sz = (rng.gen::<f32>() - 0.5) * 0.5 * freq;
    Oscillation {
        speed: Vec3::new(sx, sy, sz),
        amplitude: Vec3::new(amp * 0.5, amp * 0.5, amp * 0.2),
    }
}

/// Canopy bands followed by the trunk ring.
pub fn generate_tree<R: Rng + ?Sized>(tree: &TreeConfig, rng: &mut R) -> PointCloud {
    let mut b = CloudBuilder::with_capacity(tree_point_count(tree));
    let half_h = tree.height / 2.0;

    for layer in 0..tree.layers {
        let ratio = layer as f32 / tree.layers as f32;
        let y = ratio * tree.height - half_h;
        let radius = tree.base_radius * (1.0 - ratio * LAYER_RADIUS_TAPER);
        let count = canopy_layer_count(tree, layer);
        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU + (rng.gen::<f32>() - 0.5) * LAYER_ANGLE_JITTER;
            let r = radius * (1.0 - LAYER_RADIUS_JITTER / 2.0 + rng.gen::<f32>() * LAYER_RADIUS_JITTER);
            let position = Vec3::new(angle.cos() * r, y, angle.sin() * r);
            let brightness = 0.7 + rng.gen::<f32>() * 0.5;
            let color = ColorBucket::from_sample(rng.gen()).color(rng);
            let size = sample_size(rng);
            let oscillation = canopy_oscillation(rng);
            b.push(
                position,
                PointAttributes {
                    color,
                    size,
                    brightness,
                },
                oscillation,
            );
        }
    }

    let trunk_osc = Oscillation {
        speed: Vec3::splat(0.5),
        amplitude: Vec3::new(0.2, 0.1, 0.2),
    };
    for _ in 0..tree.trunk_points {
        let angle = rng.gen::<f32>() * TAU;
        let y = -half_h - rng.gen::<f32>() * TRUNK_DEPTH;
        b.push(
            Vec3::new(angle.cos() * TRUNK_RADIUS, y, angle.sin() * TRUNK_RADIUS),
            PointAttributes {
                color: TRUNK_COLOR,
                size: TRUNK_SIZE,
                brightness: TRUNK_BRIGHTNESS,
            },
            trunk_osc,
        );
    }

    log::debug!(
        "[generator] tree: {} canopy + {} trunk points",
        b.positions.len() - tree.trunk_points as usize,
        tree.trunk_points
    );
    b.finish(TREE_JITTER, rng)
}

/// Wireframe outline of the five-pointed star: centre spokes, then the
/// outer/inner zig-zag, each segment sampled with both endpoints.
pub fn star_outline(center: Vec3, star: &StarConfig) -> Vec<Vec3> {
    let vertex = |k: f32, radius: f32| {
        let angle = k * TAU / 5.0 + FRAC_PI_2;
        center + Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
    };
    let outer: [Vec3; 5] = std::array::from_fn(|i| vertex(i as f32, star.outer_radius));
    let inner: [Vec3; 5] = std::array::from_fn(|i| vertex(i as f32 + 0.5, star.inner_radius));

    let edges = star.samples_per_edge.max(1);
    let mut points = Vec::with_capacity(star_point_count(star));
    let mut segment = |from: Vec3, to: Vec3| {
        for j in 0..=edges {
            points.push(from.lerp(to, j as f32 / edges as f32));
        }
    };
    for o in outer {
        segment(center, o);
    }
    for i in 0..5 {
        segment(outer[i], inner[i]);
        segment(inner[i], outer[(i + 1) % 5]);
    }
    points
}

pub fn generate_star<R: Rng + ?Sized>(
    tree: &TreeConfig,
    star: &StarConfig,
    rng: &mut R,
) -> PointCloud {
    let center = Vec3::new(0.0, tree.height / 2.0 + star.offset, 0.0);
    let outline = star_outline(center, star);
    let mut b = CloudBuilder::with_capacity(outline.len());
    for p in outline {
        let oscillation = star_oscillation(rng);
        b.push(
            p,
            PointAttributes {
                color: STAR_COLOR,
                size: STAR_SIZE,
                brightness: STAR_BRIGHTNESS,
            },
            oscillation,
        );
    }
    b.finish(STAR_JITTER, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bucket_thresholds_are_half_open() {
        assert_eq!(ColorBucket::from_sample(0.0), ColorBucket::Green);
        assert_eq!(ColorBucket::from_sample(0.3999), ColorBucket::Green);
        assert_eq!(ColorBucket::from_sample(0.40), ColorBucket::Gold);
        assert_eq!(ColorBucket::from_sample(0.70), ColorBucket::Red);
        assert_eq!(ColorBucket::from_sample(0.95), ColorBucket::Blue);
        assert_eq!(size_bucket(0.0), 0);
        assert_eq!(size_bucket(0.25), 1);
        assert_eq!(size_bucket(0.74), 2);
        assert_eq!(size_bucket(0.999), 3);
    }

    #[test]
    fn exact_band_counts_are_not_floored_down() {
        let tree = TreeConfig::default();
        // 70 * (1 - 0.25 * 0.8) and 70 * (1 - 0.5 * 0.8) land on integers.
        assert_eq!(canopy_layer_count(&tree, 25), 56);
        assert_eq!(canopy_layer_count(&tree, 50), 42);
        assert_eq!(canopy_point_count(&tree), 4179);
    }

    #[test]
    fn star_outline_starts_at_center_and_hits_top_vertex() {
        let star = StarConfig::default();
        let center = Vec3::new(0.0, 5.7, 0.0);
        let pts = star_outline(center, &star);
        assert_eq!(pts.len(), star_point_count(&star));
        assert_eq!(pts[0], center);
        // First spoke ends on the upward outer vertex.
        let top = pts[star.samples_per_edge as usize];
        assert!((top - (center + Vec3::Y * star.outer_radius)).length() < 1e-5);
        assert!(pts.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn update_with_zero_amount_stays_near_original() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut cloud = generate_tree(&TreeConfig::default(), &mut rng);
        cloud.update(12.5, 0.0);
        let max_jitter = cloud.jitter() * 1.5; // amplitudes are below 1.5
        for (cur, orig) in cloud.positions().iter().zip(cloud.original_positions()) {
            let d = (*cur - *orig).abs();
            assert!(d.x <= max_jitter.x + 1e-5 && d.y <= max_jitter.y + 1e-5 && d.z <= max_jitter.z + 1e-5);
        }
    }

    #[test]
    fn update_with_full_amount_lands_on_targets() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut cloud = generate_star(&TreeConfig::default(), &StarConfig::default(), &mut rng);
        cloud.update(3.0, 1.0);
        for (cur, target) in cloud.positions().iter().zip(cloud.dispersion_targets()) {
            assert!((*cur - *target).length() < 1e-4);
        }
    }
}
