//! Dashboard Telemetry Protocol
//!
//! Data model shared by the validation pipeline and the display side:
//! the [`Reading`] sample, the closed [`Gear`] enumeration with its static
//! [`GearEnvelope`] table, and parsing of the pipe-delimited wire format.

mod error;
pub mod gear;
mod reading;

pub use error::ParseError;
pub use gear::{lookup, Gear, GearEnvelope, Transmission};
pub use reading::{Reading, FIELD_COUNT, FIELD_SEPARATOR};
