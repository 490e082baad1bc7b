//! Validation Error Types

use dashboard_protocol::{Gear, ParseError, Transmission};
use std::fmt;
use thiserror::Error;

/// Which motion plausibility rule a reading violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionAnomaly {
    /// Engine above mid-range, road speed below mid-range, no notable acceleration
    HighRpmLowSpeed,
    /// Engine below mid-range, road speed above mid-range, notable acceleration
    LowRpmHighSpeed,
}

impl fmt::Display for MotionAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionAnomaly::HighRpmLowSpeed => f.write_str("high RPM, low speed, no notable change"),
            MotionAnomaly::LowRpmHighSpeed => f.write_str("low RPM, high speed, notable change"),
        }
    }
}

/// Errors raised by the validation stages
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Speed outside the absolute envelope
    #[error("The speed is out of range: {speed} km/h not in [{min}, {max}]")]
    SpeedOutOfRange { speed: i32, min: i32, max: i32 },

    /// Vehicle moving while the engine is off
    #[error("Engine is not running while speed is {speed} km/h")]
    EngineNotRunning { speed: i32 },

    /// Gear cannot be reported by the configured transmission
    #[error("Invalid gear {gear} for the selected transmission type ({transmission})")]
    TransmissionMismatch {
        gear: Gear,
        transmission: Transmission,
    },

    /// Speed outside the current gear's envelope
    #[error("Speed {speed} km/h does not correlate to the current gear {gear}")]
    GearSpeedMismatch { gear: Gear, speed: i32 },

    /// RPM outside the current gear's envelope
    #[error("RPM {rpm} does not correlate to the current gear {gear}")]
    GearRpmMismatch { gear: Gear, rpm: i32 },

    /// Speed, RPM and acceleration do not describe a plausible motion state
    #[error("Implausible motion state in gear {gear}: {anomaly}")]
    ImplausibleMotionState { gear: Gear, anomaly: MotionAnomaly },

    /// Speed jumped too far from the last accepted reading
    #[error("Outlier speed value based on history: {speed} km/h vs last accepted {last} km/h (max delta {max_delta})")]
    OutlierSpeed { speed: i32, last: i32, max_delta: i32 },
}

impl ValidationError {
    /// Stable identifier of the error kind, for logs and counters
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::SpeedOutOfRange { .. } => "range_violation",
            ValidationError::EngineNotRunning { .. } => "engine_not_running",
            ValidationError::TransmissionMismatch { .. } => "transmission_mismatch",
            ValidationError::GearSpeedMismatch { .. } => "gear_speed_mismatch",
            ValidationError::GearRpmMismatch { .. } => "gear_rpm_mismatch",
            ValidationError::ImplausibleMotionState { .. } => "implausible_motion_state",
            ValidationError::OutlierSpeed { .. } => "outlier_speed",
        }
    }
}

/// Thresholds a pipeline cannot be built with
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// History window must hold at least one reading
    #[error("history_len must be at least 1")]
    ZeroHistoryLen,

    /// Lower speed bound above the upper one
    #[error("speed_range is inverted: [{min}, {max}]")]
    InvertedSpeedRange { min: i32, max: i32 },

    /// Allowed speed delta below zero
    #[error("max_speed_delta must not be negative, got {0}")]
    NegativeSpeedDelta(i32),

    /// NaN, infinite, or negative acceleration threshold
    #[error("acceleration_threshold must be a finite, non-negative number, got {0}")]
    InvalidAccelerationThreshold(f32),
}

/// Anything that can stop a raw record from reaching the display
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DashboardError {
    /// Stable identifier of the error kind, for logs and counters
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::Parse(ParseError::InputMissing) => "input_missing",
            DashboardError::Parse(ParseError::FieldCountMismatch { .. }) => "field_count_mismatch",
            DashboardError::Parse(ParseError::NumericParse { .. }) => "numeric_parse",
            DashboardError::Parse(ParseError::UnknownGear(_)) => "unknown_gear",
            DashboardError::Validation(err) => err.kind(),
        }
    }
}
