//! # Reference orbits
//!
//! Ready-made element sets for demonstrations and regression tests:
//!
//! - [`OrbitPreset`] – one representative orbit per near-Earth asteroid group
//!   (Amor, Apollo, Aten, Atira), with a known period so they can be animated.
//! - [`planets`] – the eight planets at J2000 (JPL "approximate positions of the
//!   planets" table). No period is attached, so propagating them yields their
//!   static epoch position.
//!
//! Values are kept in the upstream feed format ([`OrbitalRecord`], decimal strings in
//! degrees and days) and go through the same boundary conversion as live data.
use std::{fmt, str::FromStr};

use crate::{
    constants::{AstronomicalUnit, EARTH_APHELION_AU, EARTH_PERIHELION_AU, NEO_MAX_PERIHELION_AU},
    orbital_elements::OrbitalElements,
    orbital_record::OrbitalRecord,
    orbitrack_errors::OrbitrackError,
};

/// Near-Earth object group, following the usual a / q / Q boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeoClass {
    /// Orbit entirely inside Earth's (a < 1 AU, Q < 0.983 AU).
    Atira,
    /// Earth-crossing, mostly inside (a < 1 AU, Q > 0.983 AU).
    Aten,
    /// Earth-crossing (a > 1 AU, q < 1.017 AU).
    Apollo,
    /// Earth-approaching from outside (a > 1 AU, 1.017 < q < 1.3 AU).
    Amor,
    /// Not a near-Earth orbit.
    Other,
}

impl NeoClass {
    /// Classify an orbit from its semi-major axis, perihelion and aphelion distances (AU).
    pub fn classify(
        semi_major_axis: AstronomicalUnit,
        perihelion: AstronomicalUnit,
        aphelion: AstronomicalUnit,
    ) -> Self {
        if semi_major_axis < 1.0 {
            if aphelion < EARTH_PERIHELION_AU {
                NeoClass::Atira
            } else {
                NeoClass::Aten
            }
        } else if perihelion < EARTH_APHELION_AU {
            NeoClass::Apollo
        } else if perihelion < NEO_MAX_PERIHELION_AU {
            NeoClass::Amor
        } else {
            NeoClass::Other
        }
    }
}

impl fmt::Display for NeoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NeoClass::Atira => "Atira",
            NeoClass::Aten => "Aten",
            NeoClass::Apollo => "Apollo",
            NeoClass::Amor => "Amor",
            NeoClass::Other => "Other",
        };
        write!(f, "{name}")
    }
}

/// Representative orbit of each near-Earth asteroid group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitPreset {
    Amor,
    Apollo,
    Aten,
    Atira,
}

impl OrbitPreset {
    pub const ALL: [OrbitPreset; 4] = [
        OrbitPreset::Amor,
        OrbitPreset::Apollo,
        OrbitPreset::Aten,
        OrbitPreset::Atira,
    ];

    /// Preset in the upstream feed format.
    pub fn record(&self) -> OrbitalRecord {
        // (a, e, i, Ω, ω, T)
        let (a, e, i, node, peri, period) = match self {
            OrbitPreset::Amor => ("1.2", "0.15", "10", "180", "90", "450"),
            OrbitPreset::Apollo => ("1.5", "0.5", "15", "120", "180", "680"),
            OrbitPreset::Aten => ("0.9", "0.2", "5", "240", "270", "310"),
            OrbitPreset::Atira => ("0.8", "0.1", "20", "60", "0", "255"),
        };
        OrbitalRecord::new(a, e, i, node, peri, "0", period)
    }

    /// Preset as validated [`OrbitalElements`].
    pub fn elements(&self) -> Result<OrbitalElements, OrbitrackError> {
        OrbitalElements::try_from(&self.record())
    }

    /// Group the preset is meant to illustrate.
    pub fn neo_class(&self) -> NeoClass {
        match self {
            OrbitPreset::Amor => NeoClass::Amor,
            OrbitPreset::Apollo => NeoClass::Apollo,
            OrbitPreset::Aten => NeoClass::Aten,
            OrbitPreset::Atira => NeoClass::Atira,
        }
    }
}

impl FromStr for OrbitPreset {
    type Err = OrbitrackError;

    /// Case-insensitive lookup by group name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amor" => Ok(OrbitPreset::Amor),
            "apollo" => Ok(OrbitPreset::Apollo),
            "aten" => Ok(OrbitPreset::Aten),
            "atira" => Ok(OrbitPreset::Atira),
            _ => Err(OrbitrackError::UnknownPreset(s.to_string())),
        }
    }
}

/// A planet and its J2000 orbital elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub name: &'static str,
    pub elements: OrbitalElements,
}

// name, a, e, i, Ω, ω
const PLANET_TABLE: [(&str, &str, &str, &str, &str, &str); 8] = [
    ("Mercury", "0.387098", "0.205630", "7.00487", "48.33167", "29.12420"),
    ("Venus", "0.723332", "0.006772", "3.39458", "76.68069", "54.85229"),
    ("Earth", "1.000000", "0.0167086", "0.00005", "-11.26064", "114.20783"),
    ("Mars", "1.523679", "0.09340062", "1.849726", "49.558093", "286.502390"),
    ("Jupiter", "5.2044", "0.0489", "1.303", "100.46", "273.87"),
    ("Saturn", "9.5826", "0.0565", "2.485", "113.66", "339.39"),
    ("Uranus", "19.2184", "0.0457", "0.772", "74.00", "96.99"),
    ("Neptune", "30.11", "0.0113", "1.770", "131.78", "276.34"),
];

/// The eight planets, innermost first.
///
/// Mean anomaly and period are left empty, as in the source table, so each planet
/// sits at its perihelion and is not animated.
pub fn planets() -> Result<Vec<Planet>, OrbitrackError> {
    PLANET_TABLE
        .iter()
        .map(|&(name, a, e, i, node, peri)| {
            let record = OrbitalRecord::new(a, e, i, node, peri, "", "");
            Ok(Planet {
                name,
                elements: OrbitalElements::try_from(&record)?,
            })
        })
        .collect()
}
