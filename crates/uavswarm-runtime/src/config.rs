//! Simulation parameters.
//!
//! Every field has a documented default, so a partially written config
//! file (or none at all) still yields a runnable simulation. Validation
//! happens once, in [`SimulationConfig::validate`], before anything is
//! allocated.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use uavswarm_agents::policy::PolicyConfig;
use uavswarm_core::area::Area;
use uavswarm_core::autopilot::SpeedProfile;
use uavswarm_core::error::{ConfigError, Result};
use uavswarm_core::status::FlightEnvelope;
use uavswarm_core::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    pub width: f64,
    pub height: f64,
    /// Edge length of one scan cell.
    pub granularity: f64,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            width: 2000.0,
            height: 1000.0,
            granularity: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub min_speed: f64,
    pub max_speed: f64,
    pub max_accel: f64,
    pub max_decel: f64,
    pub initial_speed: f64,
    /// Radians per tick.
    pub max_heading_change: f64,
    /// Radians, 0 = east.
    pub initial_heading: f64,
    pub speed_profile: SpeedProfile,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            min_speed: 0.0,
            max_speed: 10.0,
            max_accel: 1.0,
            max_decel: 1.0,
            initial_speed: 0.0,
            max_heading_change: 0.1,
            initial_heading: FRAC_PI_2,
            speed_profile: SpeedProfile::Instant,
        }
    }
}

impl FlightConfig {
    pub fn envelope(&self) -> FlightEnvelope {
        FlightEnvelope {
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            max_accel: self.max_accel,
            max_decel: self.max_decel,
            max_heading_change: self.max_heading_change,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScentConfig {
    /// Ticks between decay steps.
    pub evaporation_frequency: u64,
    /// Freshness lost per decay step.
    pub evaporation_speed: f64,
    /// Initial staleness of every cell, and the stale-cell threshold.
    pub too_old: f64,
    /// Ticks between knowledge exchanges of the distributed field.
    pub exchange_frequency: u64,
    /// Radius, in cells, of one exchange around the sender.
    pub merge_radius_cells: u32,
}

impl Default for ScentConfig {
    fn default() -> Self {
        Self {
            evaporation_frequency: 2,
            evaporation_speed: 0.01,
            too_old: 20.0,
            exchange_frequency: 100,
            merge_radius_cells: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub agent_count: u32,
    /// Ticks between two decisions of the same UAV.
    pub decision_frequency: u32,
    pub wireless_range: f64,
    pub max_ticks: u64,
    /// Ticks before scent deposits and decay start.
    pub warmup_ticks: u64,
    /// Ticks between two metric samples during `run`.
    pub stats_every: u64,
    pub area: AreaConfig,
    pub base: Position,
    pub flight: FlightConfig,
    pub scent: ScentConfig,
    pub policy: PolicyConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            agent_count: 15,
            decision_frequency: 10,
            wireless_range: 400.0,
            max_ticks: 5000,
            warmup_ticks: 500,
            stats_every: 100,
            area: AreaConfig::default(),
            base: Position::new(1000.0, 0.0),
            flight: FlightConfig::default(),
            scent: ScentConfig::default(),
            policy: PolicyConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Check every parameter and build the area they describe.
    pub fn validate(&self) -> Result<Area> {
        let area = Area::sized(self.area.width, self.area.height, self.area.granularity)?;

        let g = self.policy.angular_granularity;
        if g == 0 || 360 % g != 0 {
            return Err(ConfigError::AngularGranularity(g));
        }
        if self.decision_frequency == 0 {
            return Err(ConfigError::ZeroDecisionFrequency);
        }
        if self.agent_count == 0 {
            return Err(ConfigError::NoAgents);
        }
        if self.policy.horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }

        let f = &self.flight;
        if !(f.min_speed >= 0.0
            && f.max_speed > 0.0
            && f.min_speed <= f.max_speed
            && f.initial_speed >= f.min_speed
            && f.initial_speed <= f.max_speed)
        {
            return Err(ConfigError::InvalidSpeedLimits {
                min: f.min_speed,
                max: f.max_speed,
                initial: f.initial_speed,
            });
        }
        if !(f.max_heading_change > 0.0 && f.max_heading_change <= TAU) {
            return Err(ConfigError::InvalidHeadingChange(f.max_heading_change));
        }
        positive("max_accel", f.max_accel)?;
        positive("max_decel", f.max_decel)?;

        positive("wireless_range", self.wireless_range)?;
        positive("repulsion_radius", self.policy.repulsion_radius)?;
        positive("too_old", self.scent.too_old)?;
        if !(self.scent.evaporation_speed >= 0.0) {
            return Err(ConfigError::NonPositive {
                what: "evaporation_speed",
                value: self.scent.evaporation_speed,
            });
        }
        if self.scent.evaporation_frequency == 0 {
            return Err(ConfigError::ZeroEvaporationFrequency);
        }
        if self.scent.exchange_frequency == 0 {
            return Err(ConfigError::ZeroExchangeFrequency);
        }

        if !area.contains(&self.base) {
            return Err(ConfigError::BaseOutsideArea {
                x: self.base.x,
                y: self.base.y,
            });
        }
        Ok(area)
    }
}

fn positive(what: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { what, value })
    }
}
