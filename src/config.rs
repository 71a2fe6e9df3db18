//! Tunables for the simulation and the view.
//!
//! Defaults reproduce the demo behaviour. A JSON object stored under
//! [`STORAGE_KEY`] in localStorage overrides any subset of the fields.

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const STORAGE_KEY: &str = "vg_config";

const MIN_TIMER_MS: u32 = 100;
/// Largest delay browser timers accept without wrapping.
const MAX_TIMER_MS: u32 = i32::MAX as u32;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Wall-clock period of the decay/growth ticker.
    pub tick_interval_ms: u32,
    /// Days without water before decay starts.
    pub grace_days: f64,
    pub decay_per_day: f64,
    /// Upper bound on health lost in a single tick.
    pub max_decay_per_tick: f64,
    pub min_health: f64,
    pub max_health: f64,
    pub water_boost: f64,
    /// Days of age added per tick.
    pub age_per_tick: f64,
    /// Trees below this health get the warning marker.
    pub warning_health: f64,
    /// Trees above this health count as healthy in the stats strip.
    pub healthy_threshold: f64,
    pub toast_ms: u32,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10_000,
            grace_days: 1.0,
            decay_per_day: 5.0,
            max_decay_per_tick: 30.0,
            min_health: 10.0,
            max_health: 100.0,
            water_boost: 20.0,
            age_per_tick: 0.1,
            warning_health: 50.0,
            healthy_threshold: 70.0,
            toast_ms: 3_000,
        }
    }
}

impl GardenConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: GardenConfig = serde_json::from_str(raw)?;
        Ok(cfg.sanitized())
    }

    /// Keeps the health band well-formed and timer delays in browser range
    /// whatever the override said.
    fn sanitized(mut self) -> Self {
        if self.min_health > self.max_health {
            std::mem::swap(&mut self.min_health, &mut self.max_health);
        }
        self.tick_interval_ms = self.tick_interval_ms.clamp(MIN_TIMER_MS, MAX_TIMER_MS);
        self.toast_ms = self.toast_ms.clamp(MIN_TIMER_MS, MAX_TIMER_MS);
        self.max_decay_per_tick = self.max_decay_per_tick.max(0.0);
        self.age_per_tick = self.age_per_tick.max(0.0);
        self
    }

    /// Reads the override from localStorage, falling back to defaults.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => match Self::from_json(&raw) {
                Ok(cfg) => {
                    log::info!("loaded config override from '{}'", STORAGE_KEY);
                    cfg
                }
                Err(e) => {
                    log::warn!("ignoring '{}': {}", STORAGE_KEY, e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let cfg = GardenConfig::from_json(r#"{"tick_interval_ms": 2000}"#).unwrap();
        assert_eq!(cfg.tick_interval_ms, 2000);
        assert_eq!(cfg.decay_per_day, 5.0);
        assert_eq!(cfg.min_health, 10.0);
    }

    #[test]
    fn test_inverted_health_band_is_fixed() {
        let cfg = GardenConfig::from_json(r#"{"min_health": 90, "max_health": 20}"#).unwrap();
        assert_eq!(cfg.min_health, 20.0);
        assert_eq!(cfg.max_health, 90.0);
    }

    #[test]
    fn test_tiny_interval_is_raised() {
        let cfg = GardenConfig::from_json(r#"{"tick_interval_ms": 0}"#).unwrap();
        assert_eq!(cfg.tick_interval_ms, 100);
    }

    #[test]
    fn test_huge_timer_delays_are_capped() {
        let cfg = GardenConfig::from_json(r#"{"tick_interval_ms": 3000000000, "toast_ms": 4294967295}"#)
            .unwrap();
        assert_eq!(cfg.tick_interval_ms, i32::MAX as u32);
        assert_eq!(cfg.toast_ms, i32::MAX as u32);
        assert!(i32::try_from(cfg.tick_interval_ms).unwrap() > 0);
        assert!(i32::try_from(cfg.toast_ms).unwrap() > 0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(GardenConfig::from_json("not json").is_err());
    }
}
