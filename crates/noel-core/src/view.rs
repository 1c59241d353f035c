//! Viewport-dependent camera and point sizing.
//!
//! These types avoid platform APIs; the web frontend feeds them the window's
//! CSS size on load and on every resize and reads back matrices.

use crate::constants::*;
use glam::{EulerRot, Mat4, Vec2, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT_PX
    }

    #[inline]
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewPreset {
    Desktop,
    MobileLandscape,
    MobilePortrait,
}

impl ViewPreset {
    pub fn for_viewport(viewport: Viewport) -> Self {
        match (viewport.is_mobile(), viewport.is_portrait()) {
            (true, true) => ViewPreset::MobilePortrait,
            (true, false) => ViewPreset::MobileLandscape,
            _ => ViewPreset::Desktop,
        }
    }

    pub fn eye(self) -> Vec3 {
        match self {
            ViewPreset::Desktop => DESKTOP_EYE,
            ViewPreset::MobileLandscape => MOBILE_LANDSCAPE_EYE,
            ViewPreset::MobilePortrait => MOBILE_PORTRAIT_EYE,
        }
    }

    /// Point sprites are enlarged on small screens.
    pub fn size_multiplier(self) -> f32 {
        match self {
            ViewPreset::Desktop => DESKTOP_SIZE_MULTIPLIER,
            ViewPreset::MobileLandscape | ViewPreset::MobilePortrait => MOBILE_SIZE_MULTIPLIER,
        }
    }
}

/// Right-handed perspective camera looking down -Z from `eye`.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            eye: ViewPreset::for_viewport(viewport).eye(),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect: viewport.aspect(),
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye, self.forward, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Everything the renderer needs from the viewport, recomputed as a whole.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSettings {
    pub viewport: Viewport,
    pub preset: ViewPreset,
    pub camera: Camera,
    pub size_multiplier: f32,
}

impl ViewSettings {
    pub fn new(viewport: Viewport) -> Self {
        let preset = ViewPreset::for_viewport(viewport);
        Self {
            viewport,
            preset,
            camera: Camera::for_viewport(viewport),
            size_multiplier: preset.size_multiplier(),
        }
    }
}

/// Model matrix for the tree's (pitch, yaw) rotation.
pub fn rotation_matrix(rotation: Vec2) -> Mat4 {
    Mat4::from_euler(EulerRot::XYZ, rotation.x, rotation.y, 0.0)
}
