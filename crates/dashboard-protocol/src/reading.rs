//! Telemetry Reading and Wire Format Parsing
//!
//! Wire format: `speed|rpm|acceleration|gear|headlightsOn|lowOilLevel|engineStarted`

use crate::error::ParseError;
use crate::gear::Gear;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Field separator of the wire format
pub const FIELD_SEPARATOR: char = '|';

/// Number of fields in one wire record
pub const FIELD_COUNT: usize = 7;

/// A single telemetry sample as reported by the vehicle sensors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Vehicle speed (km/h, negative while reversing)
    pub speed: i32,
    /// Engine speed (RPM)
    pub rpm: i32,
    /// Longitudinal acceleration (negative when decelerating)
    pub acceleration: f32,
    /// Currently engaged gear
    pub gear: Gear,
    pub headlights_on: bool,
    pub low_oil_level: bool,
    pub engine_started: bool,
}

impl Reading {
    /// Parse a raw dashboard record.
    ///
    /// The field count is checked before any field is interpreted, so a short
    /// record reports [`ParseError::FieldCountMismatch`] rather than a numeric
    /// error. Trailing empty fields are dropped before counting, so a record
    /// ending in `|` is measured without them. Boolean fields are permissive:
    /// only a case-insensitive `true` yields `true`, anything else is `false`.
    pub fn parse(raw: Option<&str>) -> Result<Self, ParseError> {
        let raw = raw.ok_or(ParseError::InputMissing)?;

        let mut fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
        while fields.len() > 1 && fields.last() == Some(&"") {
            fields.pop();
        }
        if fields.len() != FIELD_COUNT {
            debug!(fields = fields.len(), "Rejecting record with wrong field count");
            return Err(ParseError::FieldCountMismatch {
                expected: FIELD_COUNT,
                actual: fields.len(),
            });
        }

        Ok(Self {
            speed: parse_number("speed", fields[0])?,
            rpm: parse_number("rpm", fields[1])?,
            acceleration: parse_number("acceleration", fields[2])?,
            gear: fields[3].parse()?,
            headlights_on: parse_flag(fields[4]),
            low_oil_level: parse_flag(fields[5]),
            engine_started: parse_flag(fields[6]),
        })
    }
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::NumericParse {
        field,
        value: value.to_string(),
    })
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

impl FromStr for Reading {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(Some(s))
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}|{}|{}",
            self.speed,
            self.rpm,
            self.acceleration,
            self.gear,
            self.headlights_on,
            self.low_oil_level,
            self.engine_started
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_record() {
        let reading: Reading = "100|3200|2.3|D|true|false|true".parse().unwrap();
        assert_eq!(reading.speed, 100);
        assert_eq!(reading.rpm, 3200);
        assert!((reading.acceleration - 2.3).abs() < 1e-6);
        assert_eq!(reading.gear, Gear::D);
        assert!(reading.headlights_on);
        assert!(!reading.low_oil_level);
        assert!(reading.engine_started);
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(Reading::parse(None), Err(ParseError::InputMissing));
    }

    #[test]
    fn test_field_count_checked_first() {
        // Six fields, first one would also fail numeric parsing
        let err = Reading::parse(Some("3200|2.3|D|true|false|true")).unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldCountMismatch {
                expected: 7,
                actual: 6
            }
        );

        let err = "x|1|2|3|4|5|6|7".parse::<Reading>().unwrap_err();
        assert!(matches!(err, ParseError::FieldCountMismatch { actual: 8, .. }));

        // Missing last field hidden behind a trailing separator
        let err = Reading::parse(Some("100|3200|2.3|D|true|false|")).unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldCountMismatch {
                expected: 7,
                actual: 6
            }
        );
        let err = Reading::parse(Some("100|3200|2.3|D|||")).unwrap_err();
        assert!(matches!(err, ParseError::FieldCountMismatch { actual: 4, .. }));
    }

    #[test]
    fn test_trailing_separator_ignored() {
        let reading = Reading::parse(Some("100|3200|2.3|D|true|false|true|")).unwrap();
        assert_eq!(reading.speed, 100);
        assert!(reading.engine_started);
        assert!("100|3200|2.3|D|true|false|true||".parse::<Reading>().is_ok());
    }

    #[test]
    fn test_speed_not_numeric() {
        for raw in [
            "20ABC|3200|2.3|D|true|false|true",
            "|3200|2.3|D|true|false|true",
            "100.34|3200|2.3|D|true|false|true",
            "2147483648|3200|2.3|D|true|false|true",
        ] {
            let err = raw.parse::<Reading>().unwrap_err();
            assert!(
                matches!(err, ParseError::NumericParse { field: "speed", .. }),
                "{raw}: {err:?}"
            );
        }
    }

    #[test]
    fn test_acceleration_not_numeric() {
        let err = "10|3200|fast|D|true|false|true".parse::<Reading>().unwrap_err();
        assert!(matches!(err, ParseError::NumericParse { field: "acceleration", .. }));
    }

    #[test]
    fn test_unknown_gear() {
        let err = "10|3200|0.5|X|true|false|true".parse::<Reading>().unwrap_err();
        assert_eq!(err, ParseError::UnknownGear("X".into()));
    }

    #[test]
    fn test_gear_and_flags_case_insensitive() {
        let reading: Reading = "0|900|0|n|TRUE|True|yes".parse().unwrap();
        assert_eq!(reading.gear, Gear::N);
        assert!(reading.headlights_on);
        assert!(reading.low_oil_level);
        // permissive: anything but "true" is false
        assert!(!reading.engine_started);
    }

    #[test]
    fn test_display_is_wire_format() {
        let raw = "-20|2400|-1.2|R|true|false|true";
        let reading: Reading = raw.parse().unwrap();
        assert_eq!(reading.to_string(), raw);
    }

    #[test]
    fn test_json_uses_gear_token() {
        let reading: Reading = "60|2000|0|4|false|false|true".parse().unwrap();
        let json = serde_json::to_value(reading).unwrap();
        assert_eq!(json["gear"], "4");
        assert_eq!(json["speed"], 60);
    }
}
