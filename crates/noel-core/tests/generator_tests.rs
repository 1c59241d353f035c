// Host-side integration tests for point generation and snow.

use noel_core::generator::{
    canopy_layer_count, canopy_point_count, generate_star, generate_tree, star_point_count,
    tree_point_count,
};
use noel_core::{SceneConfig, SnowField, StarConfig, TreeConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn counts_depend_only_on_configuration() {
    let tree = TreeConfig::default();
    let star = StarConfig::default();
    for seed in [0, 1, 99, 12345] {
        let mut r = rng(seed);
        assert_eq!(generate_tree(&tree, &mut r).len(), tree_point_count(&tree));
        assert_eq!(generate_star(&tree, &star, &mut r).len(), star_point_count(&star));
    }
}

#[test]
fn default_tree_matches_layer_sum() {
    let tree = TreeConfig {
        layers: 100,
        points_per_layer: 70,
        trunk_points: 40,
        ..TreeConfig::default()
    };
    let expected: usize = (0..100)
        .map(|layer| {
            let ratio = layer as f64 / 100.0;
            ((70.0 * (1.0 - ratio * 0.8)).floor() as usize).max(8)
        })
        .sum();
    assert_eq!(canopy_point_count(&tree), expected);
    assert_eq!(tree_point_count(&tree), expected + 40);
    assert_eq!(canopy_layer_count(&tree, 0), 70);
    assert_eq!(star_point_count(&StarConfig::default()), 315);
}

#[test]
fn degenerate_bands_still_get_minimum_points() {
    let tree = TreeConfig {
        points_per_layer: 0,
        layers: 3,
        trunk_points: 0,
        ..TreeConfig::default()
    };
    let cloud = generate_tree(&tree, &mut rng(3));
    assert_eq!(cloud.len(), 24);
}

// Classify a canopy color back into its bucket from channel ratios.
fn bucket_of(c: [f32; 3]) -> usize {
    if c[2] > c[0] {
        3
    } else if c[0] < 0.2 {
        0
    } else if c[1] / c[0] < 0.2 {
        2
    } else {
        1
    }
}

#[test]
fn canopy_colors_converge_to_bucket_weights() {
    let tree = TreeConfig {
        layers: 200,
        points_per_layer: 200,
        trunk_points: 0,
        ..TreeConfig::default()
    };
    let cloud = generate_tree(&tree, &mut rng(2024));
    let mut counts = [0usize; 4];
    for a in cloud.attributes() {
        counts[bucket_of(a.color)] += 1;
    }
    let n = cloud.len() as f32;
    let expected = [0.40, 0.30, 0.25, 0.05];
    for (count, want) in counts.iter().zip(expected) {
        let got = *count as f32 / n;
        assert!((got - want).abs() < 0.02, "bucket fraction {got} vs {want}");
    }
}

#[test]
fn dispersion_targets_stay_inside_box() {
    let cfg = SceneConfig::default();
    let cloud = generate_tree(&cfg.tree, &mut rng(8));
    for t in cloud.dispersion_targets() {
        assert!(t.x >= -25.0 && t.x < 25.0);
        assert!(t.y >= -20.0 && t.y < 20.0);
        assert!(t.z >= -10.0 && t.z < 10.0);
    }
}

#[test]
fn full_dispersion_reaches_targets() {
    let cfg = SceneConfig::default();
    let mut star = generate_star(&cfg.tree, &cfg.star, &mut rng(5));
    star.update(3.0, 1.0);
    for (p, t) in star.positions().iter().zip(star.dispersion_targets()) {
        assert!(p.distance(*t) < 1e-4);
    }
    star.update(3.0, 0.0);
    for (i, p) in star.positions().iter().enumerate() {
        assert!(p.distance(star.idle_position(i, 3.0)) < 1e-5);
    }
}

#[test]
fn snow_wraps_and_keeps_its_length() {
    let cfg = SceneConfig::default();
    let mut snow = SnowField::generate(&cfg.snow, &mut rng(11));
    let n = snow.len();
    for _ in 0..2000 {
        snow.step();
        assert!(snow.positions().iter().all(|p| p.y >= -10.0 && p.y < 20.0));
    }
    assert_eq!(snow.len(), n);
}
