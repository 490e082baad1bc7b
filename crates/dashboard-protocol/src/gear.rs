//! Gear Definitions and Physical Envelopes
//!
//! Every gear maps to exactly one [`GearEnvelope`] describing which
//! transmission types may report it and which speed/RPM values are
//! physically reachable while it is engaged.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transmission type of the vehicle feeding the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    /// Automatic gearbox (P/R/N/D plus low gears)
    #[default]
    Automatic,
    /// Manual gearbox (R/N plus gears 1-6)
    Manual,
}

impl Transmission {
    /// Whether this is an automatic transmission
    pub fn is_automatic(&self) -> bool {
        matches!(self, Transmission::Automatic)
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transmission::Automatic => f.write_str("automatic"),
            Transmission::Manual => f.write_str("manual"),
        }
    }
}

/// Gear position reported by the gearbox sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Gear {
    /// Park
    #[serde(rename = "P")]
    P = 0,
    /// Reverse
    #[serde(rename = "R")]
    R = 1,
    /// Neutral
    #[serde(rename = "N")]
    N = 2,
    /// Drive
    #[serde(rename = "D")]
    D = 3,
    #[serde(rename = "1")]
    First = 4,
    #[serde(rename = "2")]
    Second = 5,
    #[serde(rename = "3")]
    Third = 6,
    #[serde(rename = "4")]
    Fourth = 7,
    #[serde(rename = "5")]
    Fifth = 8,
    #[serde(rename = "6")]
    Sixth = 9,
}

/// Speed/RPM bounds and transmission applicability of a single gear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GearEnvelope {
    /// Gear can be reported by an automatic transmission
    pub applicable_to_automatic: bool,
    /// Gear can be reported by a manual transmission
    pub applicable_to_manual: bool,
    /// Inclusive speed bounds (km/h)
    pub speed_range: (i32, i32),
    /// Inclusive engine speed bounds (RPM)
    pub rpm_range: (i32, i32),
}

const fn envelope(auto: bool, manual: bool, speed: (i32, i32), rpm: (i32, i32)) -> GearEnvelope {
    GearEnvelope {
        applicable_to_automatic: auto,
        applicable_to_manual: manual,
        speed_range: speed,
        rpm_range: rpm,
    }
}

/// Envelope table, indexed by `Gear as usize`
static GEAR_ENVELOPES: [GearEnvelope; 10] = [
    envelope(true, false, (0, 0), (0, 8000)),      // P
    envelope(true, true, (-20, 0), (850, 8000)),   // R
    envelope(true, true, (0, 0), (800, 8000)),     // N
    envelope(true, false, (0, 350), (800, 8000)),  // D
    envelope(true, true, (0, 70), (850, 8000)),    // 1
    envelope(true, true, (0, 110), (900, 8000)),   // 2
    envelope(false, true, (20, 140), (950, 8000)), // 3
    envelope(false, true, (35, 170), (1000, 8000)), // 4
    envelope(false, true, (45, 240), (1050, 8000)), // 5
    envelope(false, true, (60, 350), (1100, 8000)), // 6
];

impl Gear {
    /// All gears in table order
    pub const ALL: [Gear; 10] = [
        Gear::P,
        Gear::R,
        Gear::N,
        Gear::D,
        Gear::First,
        Gear::Second,
        Gear::Third,
        Gear::Fourth,
        Gear::Fifth,
        Gear::Sixth,
    ];

    /// Wire token for this gear
    pub fn token(&self) -> &'static str {
        match self {
            Gear::P => "P",
            Gear::R => "R",
            Gear::N => "N",
            Gear::D => "D",
            Gear::First => "1",
            Gear::Second => "2",
            Gear::Third => "3",
            Gear::Fourth => "4",
            Gear::Fifth => "5",
            Gear::Sixth => "6",
        }
    }

    /// Physical envelope of this gear
    pub fn envelope(&self) -> &'static GearEnvelope {
        &GEAR_ENVELOPES[*self as usize]
    }
}

impl FromStr for Gear {
    type Err = ParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Gear::ALL
            .iter()
            .copied()
            .find(|gear| gear.token().eq_ignore_ascii_case(token))
            .ok_or_else(|| ParseError::UnknownGear(token.to_string()))
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Look up the envelope of the gear named by `token` (case-insensitive)
pub fn lookup(token: &str) -> Result<&'static GearEnvelope, ParseError> {
    token.parse::<Gear>().map(|gear| gear.envelope())
}

impl GearEnvelope {
    /// Whether the gear may be reported by the given transmission type
    pub fn applies_to(&self, transmission: Transmission) -> bool {
        match transmission {
            Transmission::Automatic => self.applicable_to_automatic,
            Transmission::Manual => self.applicable_to_manual,
        }
    }

    /// Whether `speed` lies within the inclusive speed bounds
    pub fn contains_speed(&self, speed: i32) -> bool {
        speed >= self.speed_range.0 && speed <= self.speed_range.1
    }

    /// Whether `rpm` lies within the inclusive RPM bounds
    pub fn contains_rpm(&self, rpm: i32) -> bool {
        rpm >= self.rpm_range.0 && rpm <= self.rpm_range.1
    }

    /// Midpoint of the speed range (truncating integer division)
    pub fn speed_midpoint(&self) -> i32 {
        (self.speed_range.0 + self.speed_range.1) / 2
    }

    /// Midpoint of the RPM range (truncating integer division)
    pub fn rpm_midpoint(&self) -> i32 {
        (self.rpm_range.0 + self.rpm_range.1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_gear_has_its_own_envelope() {
        for (idx, gear) in Gear::ALL.iter().enumerate() {
            assert_eq!(*gear as usize, idx);
            assert!(std::ptr::eq(gear.envelope(), &GEAR_ENVELOPES[idx]));
        }
    }

    #[test]
    fn test_lookup_case_insensitive() {
        assert_eq!("d".parse::<Gear>().unwrap(), Gear::D);
        assert_eq!("p".parse::<Gear>().unwrap(), Gear::P);
        assert_eq!("4".parse::<Gear>().unwrap(), Gear::Fourth);
        assert_eq!(lookup("r").unwrap().speed_range, (-20, 0));
    }

    #[test]
    fn test_lookup_unknown_gear() {
        assert_eq!(lookup("7"), Err(ParseError::UnknownGear("7".into())));
        assert!(matches!(lookup(""), Err(ParseError::UnknownGear(_))));
        assert!(matches!(lookup("DD"), Err(ParseError::UnknownGear(_))));
    }

    #[test]
    fn test_transmission_applicability() {
        assert!(Gear::P.envelope().applies_to(Transmission::Automatic));
        assert!(!Gear::P.envelope().applies_to(Transmission::Manual));
        assert!(Gear::R.envelope().applies_to(Transmission::Manual));
        assert!(!Gear::Sixth.envelope().applies_to(Transmission::Automatic));
    }

    #[test]
    fn test_midpoints() {
        // R: speed (-20, 0), rpm (850, 8000)
        let reverse = Gear::R.envelope();
        assert_eq!(reverse.speed_midpoint(), -10);
        assert_eq!(reverse.rpm_midpoint(), 4425);

        let drive = Gear::D.envelope();
        assert_eq!(drive.speed_midpoint(), 175);
        assert_eq!(drive.rpm_midpoint(), 4400);

        // 5: speed (45, 240) truncates 142.5 down
        assert_eq!(Gear::Fifth.envelope().speed_midpoint(), 142);
    }

    #[test]
    fn test_envelope_bounds_inclusive() {
        let third = Gear::Third.envelope();
        assert!(third.contains_speed(20));
        assert!(third.contains_speed(140));
        assert!(!third.contains_speed(19));
        assert!(third.contains_rpm(950));
        assert!(!third.contains_rpm(8001));
    }
}
