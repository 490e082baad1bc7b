//! Validation Pipeline
//!
//! Each submitted reading runs through three stages in order:
//!
//! 1. absolute range check
//! 2. correlation check against the current gear's envelope
//! 3. outlier check against the last accepted reading
//!
//! The first failing stage aborts the submission. Only readings that pass all
//! three stages enter the history window.

use crate::error::{ConfigError, MotionAnomaly, ValidationError};
use dashboard_protocol::{Gear, Reading, Transmission};
use ring_buffer::RingBuffer;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Validation thresholds, fixed for the lifetime of a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Transmission type the gear reports are checked against
    pub transmission: Transmission,
    /// Absolute speed bounds (km/h, inclusive)
    pub speed_range: (i32, i32),
    /// Maximum speed change from the last accepted reading (km/h)
    pub max_speed_delta: i32,
    /// Number of accepted readings kept for outlier detection
    pub history_len: usize,
    /// Acceleration magnitude separating "steady" from "notable change"
    pub acceleration_threshold: f32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            transmission: Transmission::Automatic,
            speed_range: (-20, 350),
            max_speed_delta: 5,
            history_len: 5,
            acceleration_threshold: 5.0,
        }
    }
}

impl ValidationConfig {
    /// Default thresholds for an automatic transmission
    pub fn automatic() -> Self {
        Self::default()
    }

    /// Default thresholds for a manual transmission
    pub fn manual() -> Self {
        Self {
            transmission: Transmission::Manual,
            ..Self::default()
        }
    }

    /// Reject thresholds the pipeline cannot work with
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.history_len == 0 {
            return Err(ConfigError::ZeroHistoryLen);
        }
        let (min, max) = self.speed_range;
        if min > max {
            return Err(ConfigError::InvertedSpeedRange { min, max });
        }
        if self.max_speed_delta < 0 {
            return Err(ConfigError::NegativeSpeedDelta(self.max_speed_delta));
        }
        // NaN or negative would silently disable both motion rules
        let threshold = self.acceleration_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidAccelerationThreshold(threshold));
        }
        Ok(())
    }
}

/// Submission counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub accepted: u64,
    pub rejected: u64,
}

/// Stateful validation pipeline.
///
/// Not internally synchronized: callers feeding one pipeline from several
/// sources must serialize calls to [`submit`](Self::submit).
#[derive(Debug, Clone)]
pub struct ValidationPipeline {
    config: ValidationConfig,
    history: RingBuffer<Reading>,
    stats: PipelineStats,
}

impl ValidationPipeline {
    /// Create a new pipeline, rejecting unusable thresholds
    pub fn try_new(config: ValidationConfig) -> Result<Self, ConfigError> {
        config.check()?;
        Ok(Self::new(config))
    }

    /// Create a new pipeline with an empty history window.
    ///
    /// Panics if `config.history_len` is zero; use [`try_new`](Self::try_new)
    /// for thresholds that come from outside the program.
    pub fn new(config: ValidationConfig) -> Self {
        info!(
            transmission = %config.transmission,
            history_len = config.history_len,
            "Creating validation pipeline"
        );
        Self {
            history: RingBuffer::new(config.history_len),
            config,
            stats: PipelineStats::default(),
        }
    }

    /// Run a reading through all stages; on success it is appended to the
    /// history window and handed back for display.
    pub fn submit(&mut self, reading: Reading) -> Result<Reading, ValidationError> {
        let outcome = self
            .check_range(&reading)
            .and_then(|()| self.check_correlation(&reading))
            .and_then(|()| self.check_history(&reading));

        match outcome {
            Ok(()) => {
                self.history.push(reading);
                self.stats.accepted += 1;
                debug!(
                    speed = reading.speed,
                    rpm = reading.rpm,
                    gear = %reading.gear,
                    "Reading accepted"
                );
                Ok(reading)
            }
            Err(err) => {
                self.stats.rejected += 1;
                debug!(kind = err.kind(), "Reading rejected: {}", err);
                Err(err)
            }
        }
    }

    /// Stage 1: absolute speed bounds and engine state
    pub fn check_range(&self, reading: &Reading) -> Result<(), ValidationError> {
        let (min, max) = self.config.speed_range;
        if reading.speed < min || reading.speed > max {
            return Err(ValidationError::SpeedOutOfRange {
                speed: reading.speed,
                min,
                max,
            });
        }

        if reading.speed != 0 && !reading.engine_started {
            return Err(ValidationError::EngineNotRunning {
                speed: reading.speed,
            });
        }

        Ok(())
    }

    /// Stage 2: gear applicability, gear envelope, and motion plausibility
    pub fn check_correlation(&self, reading: &Reading) -> Result<(), ValidationError> {
        let gear = reading.gear;
        let envelope = gear.envelope();

        if !envelope.applies_to(self.config.transmission) {
            return Err(ValidationError::TransmissionMismatch {
                gear,
                transmission: self.config.transmission,
            });
        }

        if !envelope.contains_speed(reading.speed) {
            return Err(ValidationError::GearSpeedMismatch {
                gear,
                speed: reading.speed,
            });
        }

        if !envelope.contains_rpm(reading.rpm) {
            return Err(ValidationError::GearRpmMismatch {
                gear,
                rpm: reading.rpm,
            });
        }

        if gear == Gear::N {
            return Ok(());
        }

        let rpm_mid = envelope.rpm_midpoint();
        let speed_mid = envelope.speed_midpoint();
        let accel = reading.acceleration.abs();
        let threshold = self.config.acceleration_threshold;

        if accel < threshold && reading.rpm > rpm_mid && reading.speed < speed_mid {
            return Err(ValidationError::ImplausibleMotionState {
                gear,
                anomaly: MotionAnomaly::HighRpmLowSpeed,
            });
        }

        if accel > threshold && reading.rpm < rpm_mid && reading.speed > speed_mid {
            return Err(ValidationError::ImplausibleMotionState {
                gear,
                anomaly: MotionAnomaly::LowRpmHighSpeed,
            });
        }

        Ok(())
    }

    /// Stage 3: speed delta against the most recently accepted reading
    pub fn check_history(&self, reading: &Reading) -> Result<(), ValidationError> {
        let Some(last) = self.history.latest() else {
            return Ok(());
        };

        if (reading.speed - last.speed).abs() > self.config.max_speed_delta {
            return Err(ValidationError::OutlierSpeed {
                speed: reading.speed,
                last: last.speed,
                max_delta: self.config.max_speed_delta,
            });
        }

        Ok(())
    }

    /// Accepted readings, oldest first
    pub fn history(&self) -> &RingBuffer<Reading> {
        &self.history
    }

    /// Speeds of the accepted readings, oldest first
    pub fn history_speeds(&self) -> Vec<i32> {
        self.history.iter().map(|r| r.speed).collect()
    }

    /// Most recently accepted reading
    pub fn last_accepted(&self) -> Option<&Reading> {
        self.history.latest()
    }

    /// Drop all history, e.g. after the ignition cycles
    pub fn reset_history(&mut self) {
        info!("Clearing validation history");
        self.history.clear();
    }

    pub fn transmission(&self) -> Transmission {
        self.config.transmission
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
