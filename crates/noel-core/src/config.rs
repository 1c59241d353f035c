//! Scene configuration.
//!
//! `SceneConfig::default()` reproduces the shipped greeting. The web front end
//! may override a few knobs from the page query string (`?seed=7&layers=60`),
//! which is handy for debugging on slow devices.

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct TreeConfig {
    pub height: f32,
    pub base_radius: f32,
    pub layers: u32,
    pub points_per_layer: u32,
    pub trunk_points: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            height: TREE_HEIGHT,
            base_radius: TREE_BASE_RADIUS,
            layers: TREE_LAYERS,
            points_per_layer: TREE_POINTS_PER_LAYER,
            trunk_points: TRUNK_POINTS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StarConfig {
    pub outer_radius: f32,
    pub inner_radius: f32,
    /// Height of the star centre above the canopy apex.
    pub offset: f32,
    pub samples_per_edge: u32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            outer_radius: STAR_OUTER_RADIUS,
            inner_radius: STAR_INNER_RADIUS,
            offset: STAR_OFFSET,
            samples_per_edge: STAR_SAMPLES_PER_EDGE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnowConfig {
    pub count: u32,
    pub floor_y: f32,
    pub ceiling_y: f32,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            count: SNOW_COUNT,
            floor_y: SNOW_FLOOR_Y,
            ceiling_y: SNOW_CEILING_Y,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    /// Fraction of the remaining distance `amount` covers each frame.
    pub easing: f32,
    pub idle_yaw_speed: f32,
    pub rotation_decay: f32,
    pub drag_threshold_px: f32,
    pub letter_open_delay_sec: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            easing: DISPERSION_EASING,
            idle_yaw_speed: IDLE_YAW_SPEED,
            rotation_decay: ROTATION_DECAY,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            letter_open_delay_sec: LETTER_OPEN_DELAY_SEC,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneConfig {
    pub tree: TreeConfig,
    pub star: StarConfig,
    pub snow: SnowConfig,
    pub motion: MotionConfig,
    /// Fixed seed for reproducible layouts; `None` draws one from entropy.
    pub seed: Option<u64>,
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn unit_open(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("tree.height", self.tree.height)?;
        positive("tree.base_radius", self.tree.base_radius)?;
        positive("star.outer_radius", self.star.outer_radius)?;
        positive("star.inner_radius", self.star.inner_radius)?;
        if self.star.inner_radius >= self.star.outer_radius {
            return Err(ConfigError::StarRadii {
                inner: self.star.inner_radius,
                outer: self.star.outer_radius,
            });
        }
        if !(self.snow.ceiling_y > self.snow.floor_y) {
            return Err(ConfigError::NotPositive {
                field: "snow.ceiling_y - snow.floor_y",
                value: self.snow.ceiling_y - self.snow.floor_y,
            });
        }
        unit_open("motion.easing", self.motion.easing)?;
        unit_open("motion.rotation_decay", self.motion.rotation_decay)?;
        positive("motion.drag_threshold_px", self.motion.drag_threshold_px)?;
        positive("motion.letter_open_delay_sec", self.motion.letter_open_delay_sec)?;
        Ok(())
    }

    /// Apply `key=value` overrides from a URL query string (leading `?`
    /// optional). Unknown keys are ignored; malformed values are rejected.
    pub fn from_query(query: &str) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let invalid = || ConfigError::InvalidQueryValue {
                key: key.to_string(),
                value: value.to_string(),
            };
            match key {
                "seed" => cfg.seed = Some(value.parse().map_err(|_| invalid())?),
                "layers" => cfg.tree.layers = value.parse().map_err(|_| invalid())?,
                "per_layer" => cfg.tree.points_per_layer = value.parse().map_err(|_| invalid())?,
                "trunk" => cfg.tree.trunk_points = value.parse().map_err(|_| invalid())?,
                "snow" => cfg.snow.count = value.parse().map_err(|_| invalid())?,
                _ => log::debug!("ignoring query parameter {key}"),
            }
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SceneConfig::default().validate(), Ok(()));
    }

    #[test]
    fn query_overrides_known_keys() {
        let cfg = SceneConfig::from_query("?seed=42&layers=60&per_layer=30&trunk=10&snow=0")
            .expect("valid query");
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.tree.layers, 60);
        assert_eq!(cfg.tree.points_per_layer, 30);
        assert_eq!(cfg.tree.trunk_points, 10);
        assert_eq!(cfg.snow.count, 0);
    }

    #[test]
    fn query_ignores_unknown_keys_and_empty_pairs() {
        let cfg = SceneConfig::from_query("utm_source=mail&&seed=1").unwrap();
        assert_eq!(cfg.seed, Some(1));
        assert_eq!(cfg.tree, TreeConfig::default());
    }

    #[test]
    fn query_rejects_malformed_numbers() {
        let err = SceneConfig::from_query("layers=lots").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidQueryValue {
                key: "layers".into(),
                value: "lots".into()
            }
        );
        assert!(SceneConfig::from_query("seed=-3").is_err());
    }

    #[test]
    fn validate_rejects_bad_easing_and_star() {
        let mut cfg = SceneConfig::default();
        cfg.motion.easing = 1.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::OutOfUnitRange { field: "motion.easing", .. })
        ));

        let mut cfg = SceneConfig::default();
        cfg.star.inner_radius = 2.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::StarRadii { .. })));

        let mut cfg = SceneConfig::default();
        cfg.tree.height = f32::NAN;
        assert!(matches!(cfg.validate(), Err(ConfigError::NotPositive { .. })));
    }
}
