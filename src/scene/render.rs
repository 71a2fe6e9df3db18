//! Draws the garden onto a 2D canvas: sky, ground, shadows, then tree parts
//! back to front.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::model::TreeId;

use super::composer::{
    self, Part, Shape, SwayRole, TreeVisual, GROUND_COLOR, GROUND_HALF_EXTENT,
    FOLIAGE_SWAY_FACTOR,
};
use super::math::Vec3;
use super::projection::{Projector, ScreenPoint};

const GROUND_TILE: f64 = 2.0;
const RING_SEGMENTS: usize = 20;

/// One part of one tree, resolved to world space for this frame.
struct Placed {
    shape: Shape,
    center: Vec3,
    axis: Vec3,
    scale: f64,
    color: &'static str,
    opacity: f64,
    depth: f64,
}

fn place(v: &TreeVisual, part: &Part, time_secs: f64, projector: &Projector) -> Option<Placed> {
    let base = composer::sway_angle(time_secs, v.origin.x);
    let angle = match part.sway {
        SwayRole::Trunk => base,
        SwayRole::Foliage => base * FOLIAGE_SWAY_FACTOR,
        SwayRole::Still => 0.0,
    };
    let center = v.origin + part.offset * v.scale;
    let depth = projector.project(center)?.depth;
    Some(Placed {
        shape: part.shape,
        center,
        axis: Vec3::UP.rotate_z(angle),
        scale: v.scale,
        color: part.color,
        opacity: part.opacity,
        depth,
    })
}

pub fn draw_scene(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    projector: &Projector,
    visuals: &[TreeVisual],
    selected: Option<TreeId>,
    time_secs: f64,
) {
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_global_alpha(1.0);
    draw_sky(ctx, width, height);
    draw_ground(ctx, projector);
    for v in visuals {
        if ground_ring(ctx, projector, v.origin, 0.9 * v.scale) {
            ctx.set_fill_style_str("rgba(0,0,0,0.18)");
            ctx.fill();
        }
    }
    if let Some(v) = selected.and_then(|id| visuals.iter().find(|v| v.id == id)) {
        if ground_ring(ctx, projector, v.origin, 1.4 * v.scale) {
            ctx.set_stroke_style_str("#facc15");
            ctx.set_line_width(3.0);
            ctx.stroke();
        }
    }

    let mut placed: Vec<Placed> = visuals
        .iter()
        .flat_map(|v| v.parts.iter().filter_map(move |p| place(v, p, time_secs, projector)))
        .collect();
    placed.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    for p in &placed {
        draw_part(ctx, projector, p);
    }
    ctx.set_global_alpha(1.0);
}

fn draw_sky(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    let grad = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
    grad.add_color_stop(0.0, "#7ec8f0").ok();
    grad.add_color_stop(1.0, "#e3f4fb").ok();
    ctx.set_fill_style_canvas_gradient(&grad);
    ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_ground(ctx: &CanvasRenderingContext2d, projector: &Projector) {
    let n = (2.0 * GROUND_HALF_EXTENT / GROUND_TILE) as usize;
    ctx.set_fill_style_str(GROUND_COLOR);
    ctx.set_stroke_style_str("rgba(0,0,0,0.06)");
    ctx.set_line_width(1.0);
    for i in 0..n {
        for j in 0..n {
            let x0 = -GROUND_HALF_EXTENT + i as f64 * GROUND_TILE;
            let z0 = -GROUND_HALF_EXTENT + j as f64 * GROUND_TILE;
            let corners = [
                Vec3::new(x0, 0.0, z0),
                Vec3::new(x0 + GROUND_TILE, 0.0, z0),
                Vec3::new(x0 + GROUND_TILE, 0.0, z0 + GROUND_TILE),
                Vec3::new(x0, 0.0, z0 + GROUND_TILE),
            ];
            // tiles crossing the near plane are skipped rather than clipped
            let projected: Option<Vec<ScreenPoint>> =
                corners.iter().map(|c| projector.project(*c)).collect();
            let Some(pts) = projected else { continue };
            trace_polygon(ctx, &pts);
            ctx.fill();
            ctx.stroke();
        }
    }
}

/// Traces a flat circle on the ground. Returns false if it is off-camera.
fn ground_ring(ctx: &CanvasRenderingContext2d, projector: &Projector, center: Vec3, radius: f64) -> bool {
    let pts: Option<Vec<ScreenPoint>> = (0..RING_SEGMENTS)
        .map(|k| {
            let a = k as f64 / RING_SEGMENTS as f64 * 2.0 * PI;
            projector.project(center + Vec3::new(a.cos() * radius, 0.01, a.sin() * radius))
        })
        .collect();
    match pts {
        Some(pts) => {
            trace_polygon(ctx, &pts);
            true
        }
        None => false,
    }
}

fn trace_polygon(ctx: &CanvasRenderingContext2d, pts: &[ScreenPoint]) {
    ctx.begin_path();
    for (i, p) in pts.iter().enumerate() {
        if i == 0 {
            ctx.move_to(p.x, p.y);
        } else {
            ctx.line_to(p.x, p.y);
        }
    }
    ctx.close_path();
}

fn draw_part(ctx: &CanvasRenderingContext2d, projector: &Projector, p: &Placed) {
    ctx.set_global_alpha(p.opacity);
    ctx.set_fill_style_str(p.color);
    match p.shape {
        Shape::Sphere { radius } => {
            let Some(c) = projector.project(p.center) else { return };
            let r = projector.pixels_at(radius * p.scale, c.depth);
            ctx.begin_path();
            ctx.arc(c.x, c.y, r, 0.0, 2.0 * PI).ok();
            ctx.fill();
            // soft highlight towards the light
            ctx.set_fill_style_str("rgba(255,255,255,0.10)");
            ctx.begin_path();
            ctx.arc(c.x - r * 0.3, c.y - r * 0.3, r * 0.55, 0.0, 2.0 * PI).ok();
            ctx.fill();
        }
        Shape::Cylinder { top_radius, bottom_radius, height } => {
            let half = p.axis * (height * p.scale * 0.5);
            let (Some(b), Some(t)) = (projector.project(p.center - half), projector.project(p.center + half))
            else {
                return;
            };
            let rb = projector.pixels_at(bottom_radius * p.scale, b.depth);
            let rt = projector.pixels_at(top_radius * p.scale, t.depth);
            let (nx, ny) = screen_normal(&b, &t);
            ctx.begin_path();
            ctx.move_to(b.x - nx * rb, b.y - ny * rb);
            ctx.line_to(b.x + nx * rb, b.y + ny * rb);
            ctx.line_to(t.x + nx * rt, t.y + ny * rt);
            ctx.line_to(t.x - nx * rt, t.y - ny * rt);
            ctx.close_path();
            ctx.fill();
        }
        Shape::Cone { radius, height } => {
            let half = p.axis * (height * p.scale * 0.5);
            let (Some(b), Some(apex)) = (projector.project(p.center - half), projector.project(p.center + half))
            else {
                return;
            };
            let r = projector.pixels_at(radius * p.scale, b.depth);
            let (nx, ny) = screen_normal(&b, &apex);
            ctx.begin_path();
            ctx.move_to(b.x - nx * r, b.y - ny * r);
            ctx.line_to(apex.x, apex.y);
            ctx.line_to(b.x + nx * r, b.y + ny * r);
            ctx.close_path();
            ctx.fill();
            ctx.begin_path();
            ctx.ellipse(b.x, b.y, r, r * 0.25, ny.atan2(nx), 0.0, 2.0 * PI).ok();
            ctx.fill();
        }
    }
}

/// Unit screen vector perpendicular to the segment `a -> b`.
fn screen_normal(a: &ScreenPoint, b: &ScreenPoint) -> (f64, f64) {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-9 { (1.0, 0.0) } else { (-dy / len, dx / len) }
}
