//! Perspective projection from world space onto the canvas, plus screen-space
//! picking of trees.

use crate::model::TreeId;

use super::composer::TreeVisual;
use super::math::Vec3;

const NEAR: f64 = 0.1;

/// A projected point: canvas pixels plus view depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

/// Camera basis and viewport, built once per frame.
#[derive(Clone, Debug)]
pub struct Projector {
    eye: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    focal_px: f64,
    half_w: f64,
    half_h: f64,
}

impl Projector {
    pub fn new(eye: Vec3, target: Vec3, fov_y_deg: f64, width: f64, height: f64) -> Self {
        let forward = (target - eye).normalize();
        let mut right = forward.cross(&Vec3::UP);
        if right.length() < 1e-9 {
            // looking straight down: any horizontal right vector works
            right = Vec3::new(1.0, 0.0, 0.0);
        }
        let right = right.normalize();
        let up = right.cross(&forward);
        let half_h = height * 0.5;
        let focal_px = half_h / (fov_y_deg.to_radians() * 0.5).tan();
        Self { eye, right, up, forward, focal_px, half_w: width * 0.5, half_h }
    }

    /// `None` for points behind the near plane.
    pub fn project(&self, p: Vec3) -> Option<ScreenPoint> {
        let v = p - self.eye;
        let depth = v.dot(&self.forward);
        if depth <= NEAR {
            return None;
        }
        let k = self.focal_px / depth;
        Some(ScreenPoint {
            x: self.half_w + v.dot(&self.right) * k,
            y: self.half_h - v.dot(&self.up) * k,
            depth,
        })
    }

    /// On-screen size in pixels of a world length seen at `depth`.
    pub fn pixels_at(&self, world_len: f64, depth: f64) -> f64 {
        world_len * self.focal_px / depth
    }
}

/// The nearest tree whose projected bounding circle contains the click.
pub fn pick_tree(visuals: &[TreeVisual], projector: &Projector, sx: f64, sy: f64) -> Option<TreeId> {
    let mut best: Option<(TreeId, f64)> = None;
    for v in visuals {
        let (center, radius) = v.bounds();
        let Some(sp) = projector.project(center) else { continue };
        let r_px = projector.pixels_at(radius, sp.depth);
        let dx = sx - sp.x;
        let dy = sy - sp.y;
        if dx * dx + dy * dy > r_px * r_px {
            continue;
        }
        match best {
            Some((_, d)) if d <= sp.depth => {}
            _ => best = Some((v.id, sp.depth)),
        }
    }
    best.map(|(id, _)| id)
}
