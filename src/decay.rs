//! Per-tick health decay and growth.
//!
//! The interval that drives this lives in the app root; everything here is a
//! pure function of the tree, the tick time and the config.

use chrono::{DateTime, Utc};

use crate::config::GardenConfig;
use crate::model::{GrowthStage, Tree};

const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Fractional days between `since` and `now`. Negative spans count as zero.
pub fn days_between(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let ms = (now - since).num_milliseconds() as f64;
    (ms / MS_PER_DAY).max(0.0)
}

/// Health lost in one tick after `days_dry` days without water.
pub fn decay_for(days_dry: f64, cfg: &GardenConfig) -> f64 {
    if days_dry > cfg.grace_days {
        (days_dry * cfg.decay_per_day).min(cfg.max_decay_per_tick)
    } else {
        0.0
    }
}

pub fn tick_tree(tree: &mut Tree, now: DateTime<Utc>, cfg: &GardenConfig) {
    let decay = decay_for(days_between(tree.last_watered, now), cfg);
    tree.health = (tree.health - decay).clamp(cfg.min_health, cfg.max_health);
    tree.age += cfg.age_per_tick;
    // stages only move forward
    tree.growth_stage = tree.growth_stage.max(GrowthStage::for_age(tree.age));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Species, TreeId};
    use chrono::Duration;

    fn tree(health: f64, age: f64, stage: GrowthStage, last_watered: DateTime<Utc>) -> Tree {
        Tree {
            id: TreeId::new(),
            species: Species::Cherry,
            age,
            health,
            position: [0.0, 0.0, 0.0],
            last_watered,
            growth_stage: stage,
            photo_url: None,
        }
    }

    #[test]
    fn test_no_decay_within_grace() {
        let cfg = GardenConfig::default();
        assert_eq!(decay_for(0.0, &cfg), 0.0);
        assert_eq!(decay_for(1.0, &cfg), 0.0);
        assert!((decay_for(1.5, &cfg) - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_decay_is_capped() {
        let cfg = GardenConfig::default();
        assert_eq!(decay_for(6.0, &cfg), 30.0);
        assert_eq!(decay_for(100.0, &cfg), 30.0);
    }

    #[test]
    fn test_days_between() {
        let now = Utc::now();
        assert!((days_between(now - Duration::hours(12), now) - 0.5).abs() < 1e-9);
        assert_eq!(days_between(now + Duration::hours(1), now), 0.0);
    }

    #[test]
    fn test_three_days_dry_from_full() {
        let cfg = GardenConfig::default();
        let now = Utc::now();
        let mut t = tree(100.0, 0.0, GrowthStage::Seedling, now - Duration::days(3));
        tick_tree(&mut t, now, &cfg);
        assert!((t.health - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_floor_at_min_health() {
        let cfg = GardenConfig::default();
        let now = Utc::now();
        let mut t = tree(20.0, 0.0, GrowthStage::Seedling, now - Duration::days(10));
        tick_tree(&mut t, now, &cfg);
        assert_eq!(t.health, 10.0);
        tick_tree(&mut t, now, &cfg);
        assert_eq!(t.health, 10.0);
    }

    #[test]
    fn test_age_grows_regardless_of_health() {
        let cfg = GardenConfig::default();
        let now = Utc::now();
        let mut t = tree(10.0, 4.0, GrowthStage::Sapling, now - Duration::days(30));
        for _ in 0..10 {
            tick_tree(&mut t, now, &cfg);
        }
        assert!((t.age - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_stage_advances_but_never_regresses() {
        let cfg = GardenConfig::default();
        let now = Utc::now();
        let mut t = tree(100.0, 2.95, GrowthStage::Seedling, now);
        tick_tree(&mut t, now, &cfg);
        assert_eq!(t.growth_stage, GrowthStage::Sapling);

        let mut old = tree(100.0, 1.0, GrowthStage::Ancient, now);
        tick_tree(&mut old, now, &cfg);
        assert_eq!(old.growth_stage, GrowthStage::Ancient);
    }
}
