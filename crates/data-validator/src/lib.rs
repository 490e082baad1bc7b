//! Dashboard Data Validation
//!
//! Rejects physically implausible or inconsistent telemetry before it reaches
//! the dashboard: absolute range checks, gear/transmission correlation checks,
//! and outlier rejection against a short history of accepted readings.

mod dashboard;
mod error;
mod validator;

pub use dashboard::{CarDashboard, DisplayUnit};
pub use error::{ConfigError, DashboardError, MotionAnomaly, ValidationError};
pub use validator::{PipelineStats, ValidationConfig, ValidationPipeline};

pub use dashboard_protocol::{Gear, GearEnvelope, ParseError, Reading, Transmission};
