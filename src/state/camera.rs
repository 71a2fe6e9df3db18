// Orbit camera for the garden scene. Distance is clamped to 5..20 and the
// eye never dips below the ground plane.
use std::f64::consts::FRAC_PI_2;

use crate::scene::math::Vec3;

pub const MIN_DISTANCE: f64 = 5.0;
pub const MAX_DISTANCE: f64 = 20.0;
pub const MIN_POLAR: f64 = 0.05;
pub const MAX_POLAR: f64 = FRAC_PI_2;
pub const FOV_Y_DEG: f64 = 50.0;
/// Radians of orbit per dragged pixel.
const DRAG_SPEED: f64 = 0.008;

#[derive(Debug, Clone)]
pub struct Camera {
    /// Angle around the y axis, measured from +z towards +x.
    pub yaw: f64,
    /// Angle down from straight overhead.
    pub polar: f64,
    pub distance: f64,
    pub target: Vec3,
    pub dragging: bool,
    pub last_x: f64,
    pub last_y: f64,
}

impl Default for Camera {
    /// Starts at (10, 8, 10) looking at the origin.
    fn default() -> Self {
        let eye = Vec3::new(10.0, 8.0, 10.0);
        let distance = eye.length();
        Self {
            yaw: eye.x.atan2(eye.z),
            polar: (eye.y / distance).acos(),
            distance,
            target: Vec3::ZERO,
            dragging: false,
            last_x: 0.0,
            last_y: 0.0,
        }
    }
}

impl Camera {
    pub fn eye(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        self.target + Vec3::new(sp * sy, cp, sp * cy) * self.distance
    }

    pub fn orbit(&mut self, dx_px: f64, dy_px: f64) {
        self.yaw -= dx_px * DRAG_SPEED;
        self.polar = (self.polar - dy_px * DRAG_SPEED).clamp(MIN_POLAR, MAX_POLAR);
    }

    /// `factor` < 1 moves closer.
    pub fn zoom(&mut self, factor: f64) {
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.dragging = true;
        self.last_x = x;
        self.last_y = y;
    }

    pub fn drag_to(&mut self, x: f64, y: f64) {
        if !self.dragging {
            return;
        }
        let (dx, dy) = (x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        self.orbit(dx, dy);
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }
}
