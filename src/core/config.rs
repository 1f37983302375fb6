use crate::core::GravityType;
use crate::error::PhysicsError;
use crate::Result;

use std::time::Duration;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for the physics simulation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Wall-clock spacing between scheduled ticks; also the simulated time step
    pub tick_interval: Duration,

    /// The type of gravity in the simulation
    pub gravity: GravityType,

    /// Slack on both segment parameters when intersecting a sweep with an edge
    pub intersection_padding: f32,

    /// Outward velocity added along the contact normal after every slide
    pub slide_bias: f32,

    /// Outward displacement added along the contact normal before re-sweeping
    pub escape_nudge: f32,

    /// Weight kept on the previous tick-duration prediction when a new sample arrives
    pub prediction_smoothing: f32,

    /// Number of observed ticks before the duration prediction starts adapting
    pub prediction_warmup_ticks: u32,

    /// The scheduler sleeps coarsely until this long before the next tick boundary
    pub sleep_margin: Duration,

    /// Sleep granularity used to spin out the final part of each interval
    pub spin_granularity: Duration,
}

impl SimulationConfig {
    /// Simulated seconds advanced per tick
    pub fn time_step(&self) -> f32 {
        self.tick_interval.as_secs_f32()
    }

    /// Checks that every parameter is usable
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval.is_zero() {
            return Err(PhysicsError::InvalidParameter("tick interval must be non-zero".to_string()));
        }
        if self.spin_granularity.is_zero() {
            return Err(PhysicsError::InvalidParameter("spin granularity must be non-zero".to_string()));
        }
        if !self.gravity.acceleration().is_finite() {
            return Err(PhysicsError::InvalidParameter("gravity must be finite".to_string()));
        }

        let non_negative = [
            ("intersection padding", self.intersection_padding),
            ("slide bias", self.slide_bias),
            ("escape nudge", self.escape_nudge),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PhysicsError::InvalidParameter(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..1.0).contains(&self.prediction_smoothing) {
            return Err(PhysicsError::InvalidParameter(format!(
                "prediction smoothing must lie in [0, 1), got {}",
                self.prediction_smoothing
            )));
        }

        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(10),
            gravity: GravityType::default(),
            intersection_padding: 0.05,
            slide_bias: 1.0 / 8.0,
            escape_nudge: 1.0 / 16.0,
            prediction_smoothing: 0.875,
            prediction_warmup_ticks: 5,
            sleep_margin: Duration::from_millis(2),
            spin_granularity: Duration::from_millis(1),
        }
    }
}
