//! Maps trees to what the scene draws for them.
//!
//! Everything in here is a pure table lookup: stage to scale, species to
//! palette and foliage shape, health to the warning marker. The part layout
//! is in unscaled tree-local units with the trunk base at the origin.

use crate::model::{GrowthStage, Species, Tree, TreeId};

use super::math::Vec3;

pub const SWAY_AMPLITUDE: f64 = 0.02;
pub const FOLIAGE_SWAY_FACTOR: f64 = 1.5;

pub const GROUND_HALF_EXTENT: f64 = 10.0;
pub const GROUND_COLOR: &str = "#90EE90";
pub const WARNING_COLOR: &str = "#ff4444";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub trunk: &'static str,
    pub leaves: &'static str,
    pub leaves_secondary: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoliageShape {
    Cone,
    Rounded,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Upright cylinder centered on its offset.
    Cylinder { top_radius: f64, bottom_radius: f64, height: f64 },
    /// Upright cone centered on its offset, apex up.
    Cone { radius: f64, height: f64 },
    Sphere { radius: f64 },
}

/// Which per-frame sway a part follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwayRole {
    Trunk,
    Foliage,
    Still,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Part {
    pub shape: Shape,
    pub offset: Vec3,
    pub color: &'static str,
    pub opacity: f64,
    pub sway: SwayRole,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeVisual {
    pub id: TreeId,
    pub origin: Vec3,
    pub scale: f64,
    pub foliage: FoliageShape,
    pub parts: Vec<Part>,
    pub warning: bool,
}

impl TreeVisual {
    /// Center and radius of a sphere enclosing the scaled tree, for picking.
    pub fn bounds(&self) -> (Vec3, f64) {
        let center = self.origin + Vec3::new(0.0, 2.0 * self.scale, 0.0);
        (center, 1.6 * self.scale)
    }
}

pub fn stage_scale(stage: GrowthStage) -> f64 {
    match stage {
        GrowthStage::Seedling => 0.3,
        GrowthStage::Sapling => 0.6,
        GrowthStage::Young => 0.8,
        GrowthStage::Mature => 1.0,
        GrowthStage::Ancient => 1.3,
    }
}

/// Scale for a stage given by name; unknown names get the mature scale.
/// Stages reach the view as typed values, so only tests go through names.
#[cfg(test)]
pub fn scale_for_label(label: &str) -> f64 {
    match label.parse::<GrowthStage>() {
        Ok(stage) => stage_scale(stage),
        Err(_) => stage_scale(GrowthStage::Mature),
    }
}

pub fn palette(species: Species) -> Palette {
    match species {
        Species::Oak => Palette { trunk: "#4A3728", leaves: "#2D5016", leaves_secondary: "#3D6B1F" },
        Species::Pine => Palette { trunk: "#3D2F1F", leaves: "#1B4D1B", leaves_secondary: "#0F3B0F" },
        Species::Cherry => Palette { trunk: "#5D4037", leaves: "#FFB3BA", leaves_secondary: "#FF8A95" },
        Species::Maple => Palette { trunk: "#6D4C28", leaves: "#B8860B", leaves_secondary: "#DAA520" },
    }
}

/// Palette for a species given by name; unknown names get the oak palette.
pub fn palette_for_label(label: &str) -> Palette {
    palette(label.parse::<Species>().unwrap_or(Species::Oak))
}

pub fn foliage_shape(species: Species) -> FoliageShape {
    match species {
        Species::Pine => FoliageShape::Cone,
        Species::Oak | Species::Cherry | Species::Maple => FoliageShape::Rounded,
    }
}

pub fn needs_warning(health: f64, threshold: f64) -> bool {
    health < threshold
}

/// Sway angle in radians at `time_secs` for a tree standing at `x`.
pub fn sway_angle(time_secs: f64, x: f64) -> f64 {
    (time_secs + x).sin() * SWAY_AMPLITUDE
}

pub fn compose_tree(tree: &Tree, warning_health: f64) -> TreeVisual {
    let colors = palette(tree.species);
    let foliage = foliage_shape(tree.species);
    let part = |shape, offset: [f64; 3], color, opacity, sway| Part {
        shape,
        offset: Vec3::from_array(offset),
        color,
        opacity,
        sway,
    };

    let mut parts = vec![part(
        Shape::Cylinder { top_radius: 0.08, bottom_radius: 0.18, height: 2.2 },
        [0.0, 1.0, 0.0],
        colors.trunk,
        1.0,
        SwayRole::Trunk,
    )];
    match foliage {
        FoliageShape::Cone => {
            parts.push(part(Shape::Cone { radius: 1.2, height: 2.5 }, [0.0, 3.2, 0.0], colors.leaves, 1.0, SwayRole::Foliage));
            parts.push(part(Shape::Cone { radius: 1.0, height: 1.8 }, [0.0, 2.5, 0.0], colors.leaves_secondary, 1.0, SwayRole::Still));
            parts.push(part(Shape::Cone { radius: 0.8, height: 1.4 }, [0.0, 1.8, 0.0], colors.leaves, 1.0, SwayRole::Still));
        }
        FoliageShape::Rounded => {
            parts.push(part(Shape::Sphere { radius: 1.3 }, [0.0, 2.8, 0.0], colors.leaves, 1.0, SwayRole::Foliage));
            parts.push(part(Shape::Sphere { radius: 0.8 }, [0.3, 2.4, 0.2], colors.leaves_secondary, 0.9, SwayRole::Still));
            parts.push(part(Shape::Sphere { radius: 0.7 }, [-0.2, 2.6, -0.3], colors.leaves_secondary, 0.8, SwayRole::Still));
        }
    }
    let warning = needs_warning(tree.health, warning_health);
    if warning {
        parts.push(part(Shape::Sphere { radius: 0.1 }, [0.0, 3.5, 0.0], WARNING_COLOR, 1.0, SwayRole::Still));
    }

    TreeVisual {
        id: tree.id,
        origin: Vec3::from_array(tree.position),
        scale: stage_scale(tree.growth_stage),
        foliage,
        parts,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn tree(species: Species, stage: GrowthStage, health: f64) -> Tree {
        Tree {
            id: TreeId::new(),
            species,
            age: 1.0,
            health,
            position: [1.0, 0.0, -2.0],
            last_watered: Utc::now(),
            growth_stage: stage,
            photo_url: None,
        }
    }

    #[test]
    fn test_every_stage_has_a_scale() {
        let scales: Vec<f64> = GrowthStage::ALL.iter().map(|s| stage_scale(*s)).collect();
        assert_eq!(scales, vec![0.3, 0.6, 0.8, 1.0, 1.3]);
        for s in GrowthStage::ALL {
            assert_eq!(scale_for_label(s.label()), stage_scale(s));
        }
    }

    #[test]
    fn test_unknown_stage_label_gets_mature_scale() {
        assert_eq!(scale_for_label("elderly"), 1.0);
        assert_eq!(scale_for_label(""), 1.0);
    }

    #[test]
    fn test_unknown_species_label_gets_oak_palette() {
        assert_eq!(palette_for_label("baobab"), palette(Species::Oak));
        assert_eq!(palette_for_label("cherry").leaves, "#FFB3BA");
    }

    #[test]
    fn test_only_pine_is_conical() {
        for sp in Species::ALL {
            let expected = if sp == Species::Pine { FoliageShape::Cone } else { FoliageShape::Rounded };
            assert_eq!(foliage_shape(sp), expected);
        }
    }

    #[test]
    fn test_warning_marker_below_threshold() {
        let sick = compose_tree(&tree(Species::Oak, GrowthStage::Young, 49.0), 50.0);
        assert!(sick.warning);
        assert_eq!(sick.parts.last().unwrap().color, WARNING_COLOR);
        assert_eq!(sick.parts.len(), 5);

        let fine = compose_tree(&tree(Species::Oak, GrowthStage::Young, 50.0), 50.0);
        assert!(!fine.warning);
        assert_eq!(fine.parts.len(), 4);
    }

    #[test]
    fn test_pine_parts_are_cones() {
        let v = compose_tree(&tree(Species::Pine, GrowthStage::Ancient, 90.0), 50.0);
        assert_eq!(v.scale, 1.3);
        assert!(matches!(v.parts[0].shape, Shape::Cylinder { .. }));
        assert!(v.parts[1..].iter().all(|p| matches!(p.shape, Shape::Cone { .. })));
        assert_eq!(v.parts[1].sway, SwayRole::Foliage);
    }

    #[test]
    fn test_visual_follows_position() {
        let v = compose_tree(&tree(Species::Maple, GrowthStage::Seedling, 90.0), 50.0);
        assert_eq!(v.origin, Vec3::new(1.0, 0.0, -2.0));
        let (c, r) = v.bounds();
        assert!((c.y - 0.6).abs() < 1e-9);
        assert!((r - 0.48).abs() < 1e-9);
    }

    #[test]
    fn test_sway_is_small_and_phase_shifted() {
        for i in 0..100 {
            let t = i as f64 * 0.37;
            assert!(sway_angle(t, 0.0).abs() <= SWAY_AMPLITUDE);
        }
        assert!(sway_angle(0.0, 0.0).abs() < 1e-12);
        assert!((sway_angle(0.0, std::f64::consts::FRAC_PI_2) - SWAY_AMPLITUDE).abs() < 1e-12);
    }
}
