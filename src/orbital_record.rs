//! # Upstream orbital-element records
//!
//! Orbit feeds deliver elements as decimal **strings**, with angles in **degrees**
//! and the period in **days**. [`OrbitalRecord`] mirrors that shape, and its
//! conversion into [`OrbitalElements`] is the single place where text is parsed
//! and degrees are turned into radians.
//!
//! ## Conversion rules
//!
//! - every field is trimmed, then parsed as `f64`;
//! - `mean_anomaly` and `orbital_period` may be empty: they default to `0`
//!   (epoch at perihelion, unknown period → static position);
//! - the other fields are mandatory, an empty or malformed value gives
//!   [`OrbitrackError::ParseElement`];
//! - the resulting elements are validated by [`OrbitalElements::new`].
//!
//! ## CSV feeds
//!
//! [`read_orbital_records`] reads a headed CSV stream whose column names match the
//! record fields:
//!
//! ```text
//! semi_major_axis,eccentricity,inclination,ascending_node_longitude,perihelion_argument,mean_anomaly,orbital_period
//! 1.5,0.5,15,120,180,0,680
//! ```
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{constants::RADEG, orbital_elements::OrbitalElements, orbitrack_errors::OrbitrackError};

/// Raw orbital elements as provided by an upstream feed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrbitalRecord {
    /// a (AU)
    pub semi_major_axis: String,
    /// e
    pub eccentricity: String,
    /// i (degrees)
    pub inclination: String,
    /// Ω (degrees)
    pub ascending_node_longitude: String,
    /// ω (degrees)
    pub perihelion_argument: String,
    /// M₀ (degrees)
    #[serde(default)]
    pub mean_anomaly: String,
    /// T (days)
    #[serde(default)]
    pub orbital_period: String,
}

impl OrbitalRecord {
    pub fn new(
        semi_major_axis: &str,
        eccentricity: &str,
        inclination: &str,
        ascending_node_longitude: &str,
        perihelion_argument: &str,
        mean_anomaly: &str,
        orbital_period: &str,
    ) -> Self {
        OrbitalRecord {
            semi_major_axis: semi_major_axis.to_string(),
            eccentricity: eccentricity.to_string(),
            inclination: inclination.to_string(),
            ascending_node_longitude: ascending_node_longitude.to_string(),
            perihelion_argument: perihelion_argument.to_string(),
            mean_anomaly: mean_anomaly.to_string(),
            orbital_period: orbital_period.to_string(),
        }
    }
}

fn parse_field(field: &str, value: &str) -> Result<f64, OrbitrackError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| OrbitrackError::ParseElement {
            field: field.to_string(),
            value: value.to_string(),
        })
}

fn parse_optional_field(field: &str, value: &str) -> Result<f64, OrbitrackError> {
    if value.trim().is_empty() {
        Ok(0.0)
    } else {
        parse_field(field, value)
    }
}

impl TryFrom<&OrbitalRecord> for OrbitalElements {
    type Error = OrbitrackError;

    fn try_from(record: &OrbitalRecord) -> Result<Self, Self::Error> {
        let a = parse_field("semi_major_axis", &record.semi_major_axis)?;
        let e = parse_field("eccentricity", &record.eccentricity)?;
        let i = parse_field("inclination", &record.inclination)?;
        let node = parse_field("ascending_node_longitude", &record.ascending_node_longitude)?;
        let peri = parse_field("perihelion_argument", &record.perihelion_argument)?;
        let m0 = parse_optional_field("mean_anomaly", &record.mean_anomaly)?;
        let period = parse_optional_field("orbital_period", &record.orbital_period)?;

        OrbitalElements::new(
            a,
            e,
            i * RADEG,
            node * RADEG,
            peri * RADEG,
            m0 * RADEG,
            period,
        )
    }
}

impl TryFrom<OrbitalRecord> for OrbitalElements {
    type Error = OrbitrackError;

    fn try_from(record: OrbitalRecord) -> Result<Self, Self::Error> {
        OrbitalElements::try_from(&record)
    }
}

/// Read orbital records from a headed CSV stream.
///
/// Arguments
/// ---------
/// * `reader` – any byte source (file, HTTP body, in-memory buffer).
///
/// Return
/// ------
/// * The records in stream order. Values are not parsed yet; convert each one with
///   `OrbitalElements::try_from(&record)`.
/// * [`OrbitrackError::CsvError`] on malformed CSV or missing mandatory columns.
pub fn read_orbital_records<R: Read>(reader: R) -> Result<Vec<OrbitalRecord>, OrbitrackError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<OrbitalRecord>()
        .map(|record| record.map_err(OrbitrackError::from))
        .collect()
}
