//! Tunables for every effect, loadable from JSON.
//!
//! Every section falls back to its defaults, so a config file only needs the
//! values it changes:
//!
//! ```json
//! { "explosion": { "threshold": 3 }, "simulation": { "seed": 7 } }
//! ```

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::sim::{
    BouncerParams, DebrisParams, ExplosionParams, FragmentOptions, ParticleParams,
    StarfieldParams,
};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Fixed simulation rate; velocities are expressed per step at this rate
    pub step_hz: f32,
    /// Upper bound on catch-up steps after a slow frame
    pub max_steps_per_frame: u32,
    /// Seed for every random source; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            step_hz: 60.0,
            max_steps_per_frame: 4,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub fragment: FragmentOptions,
    pub debris: DebrisParams,
    pub particles: ParticleParams,
    pub bouncer: BouncerParams,
    pub explosion: ExplosionParams,
    pub starfield: StarfieldParams,
    pub simulation: SimulationParams,
}

impl SimConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        log::info!("loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(text).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=FragmentOptions::MAX_GRID_SIZE).contains(&self.fragment.grid_size) {
            bail!(
                "fragment.grid_size must be in [1, {}], got {}",
                FragmentOptions::MAX_GRID_SIZE,
                self.fragment.grid_size
            );
        }
        if !(self.fragment.seam > 0.0 && self.fragment.seam <= 1.0) {
            bail!("fragment.seam must be in (0, 1], got {}", self.fragment.seam);
        }
        for (name, damping) in [
            ("debris.damping", self.debris.damping),
            ("particles.damping", self.particles.damping),
        ] {
            if !(0.0..=1.0).contains(&damping) {
                bail!("{} must be in [0, 1], got {}", name, damping);
            }
        }
        if self.particles.min_speed < 0.0 || self.particles.min_speed > self.particles.max_speed {
            bail!(
                "particle speed range is empty: [{}, {}]",
                self.particles.min_speed,
                self.particles.max_speed
            );
        }
        if self.particles.lifetime <= 0.0 || self.particles.decay <= 0.0 {
            bail!("particles.lifetime and particles.decay must be positive");
        }
        if self.bouncer.palette.is_empty() {
            bail!("bouncer.palette must contain at least one color");
        }
        if self.bouncer.boundary <= 0.0 {
            bail!("bouncer.boundary must be positive");
        }
        if self.explosion.threshold == 0 {
            bail!("explosion.threshold must be at least 1");
        }
        if self.simulation.step_hz <= 0.0 {
            bail!("simulation.step_hz must be positive");
        }
        Ok(())
    }

    /// Independent random stream per consumer, reproducible when seeded
    pub fn rng(&self, stream: u64) -> StdRng {
        match self.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream.wrapping_mul(0x9e37_79b9_7f4a_7c15))),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn defaults_are_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = SimConfig::from_json(r#"{ "explosion": { "threshold": 3 } }"#).unwrap();
        assert_eq!(config.explosion.threshold, 3);
        assert_eq!(config.explosion.scale_factor, 1.5);
        assert_eq!(config.fragment.grid_size, 3);
        assert_eq!(config.particles.count, 20);
    }

    #[test]
    fn zero_grid_is_rejected() {
        let err = SimConfig::from_json(r#"{ "fragment": { "grid_size": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("grid_size"));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let mut config = SimConfig::default();
        config.fragment.grid_size = 1700;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("grid_size"));

        config.fragment.grid_size = FragmentOptions::MAX_GRID_SIZE;
        config.validate().unwrap();
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(SimConfig::from_json(r#"{ "bouncer": { "palette": [] } }"#).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SimConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn seeded_streams_are_reproducible_and_distinct() {
        let config = SimConfig::from_json(r#"{ "simulation": { "seed": 7 } }"#).unwrap();
        let a: u64 = config.rng(1).gen();
        let b: u64 = config.rng(1).gen();
        let c: u64 = config.rng(2).gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn serialized_config_reloads() {
        let config = SimConfig::default();
        let reloaded = SimConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(config, reloaded);
    }
}
