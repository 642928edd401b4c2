//! # Classical orbital elements
//!
//! This module defines [`OrbitalElements`], the validated, immutable element set
//! consumed by every computation of the crate.
//!
//! ## Elements
//!
//! 1. **a** – Semi-major axis (AU)
//! 2. **e** – Eccentricity (unitless), `0 ≤ e < 1`
//! 3. **i** – Inclination (radians)
//! 4. **Ω** – Longitude of ascending node (radians)
//! 5. **ω** – Argument of perihelion (radians)
//! 6. **M₀** – Mean anomaly at epoch (radians)
//! 7. **T** – Orbital period (days); `T ≤ 0` means "unknown" and disables time propagation
//!
//! ## Units
//!
//! Angles are stored in **radians**. Degree inputs go through
//! [`OrbitalElements::from_degrees`] (or [`crate::orbital_record::OrbitalRecord`]) so that
//! the conversion happens exactly once.
//!
//! ## Immutability
//!
//! Fields are private and only set through validating constructors. Editing an
//! element (e.g. [`OrbitalElements::with_eccentricity`]) returns a new instance.
use std::fmt;

use crate::{
    constants::{AstronomicalUnit, Days, Degree, Radian, DPI, RADEG, SECONDS_PER_DAY},
    orbitrack_errors::OrbitrackError,
    presets::NeoClass,
};

/// Keplerian elements of a closed heliocentric orbit, plus its period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    semi_major_axis: AstronomicalUnit,
    eccentricity: f64,
    inclination: Radian,
    ascending_node_longitude: Radian,
    perihelion_argument: Radian,
    mean_anomaly_at_epoch: Radian,
    orbital_period: Days,
}

fn check_finite(name: &str, value: f64) -> Result<(), OrbitrackError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OrbitrackError::NonFiniteElement(format!("{name} = {value}")))
    }
}

impl OrbitalElements {
    /// Build a validated element set (angles in radians).
    ///
    /// Arguments
    /// ---------
    /// * `semi_major_axis` – a (AU), finite and `> 0`.
    /// * `eccentricity` – e, `0 ≤ e < 1`.
    /// * `inclination` – i (rad).
    /// * `ascending_node_longitude` – Ω (rad).
    /// * `perihelion_argument` – ω (rad).
    /// * `mean_anomaly_at_epoch` – M₀ (rad).
    /// * `orbital_period` – T (days); any finite value, `≤ 0` selects the static fallback.
    ///
    /// Errors
    /// ------
    /// * [`OrbitrackError::InvalidSemiMajorAxis`], [`OrbitrackError::InvalidEccentricity`]
    ///   or [`OrbitrackError::NonFiniteElement`].
    pub fn new(
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        inclination: Radian,
        ascending_node_longitude: Radian,
        perihelion_argument: Radian,
        mean_anomaly_at_epoch: Radian,
        orbital_period: Days,
    ) -> Result<Self, OrbitrackError> {
        if !(semi_major_axis.is_finite() && semi_major_axis > 0.0) {
            return Err(OrbitrackError::InvalidSemiMajorAxis(semi_major_axis));
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(OrbitrackError::InvalidEccentricity(eccentricity));
        }
        check_finite("inclination", inclination)?;
        check_finite("ascending_node_longitude", ascending_node_longitude)?;
        check_finite("perihelion_argument", perihelion_argument)?;
        check_finite("mean_anomaly_at_epoch", mean_anomaly_at_epoch)?;
        check_finite("orbital_period", orbital_period)?;

        Ok(Self {
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude,
            perihelion_argument,
            mean_anomaly_at_epoch,
            orbital_period,
        })
    }

    /// Same as [`OrbitalElements::new`] with the four angles given in degrees.
    pub fn from_degrees(
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        inclination: Degree,
        ascending_node_longitude: Degree,
        perihelion_argument: Degree,
        mean_anomaly_at_epoch: Degree,
        orbital_period: Days,
    ) -> Result<Self, OrbitrackError> {
        Self::new(
            semi_major_axis,
            eccentricity,
            inclination * RADEG,
            ascending_node_longitude * RADEG,
            perihelion_argument * RADEG,
            mean_anomaly_at_epoch * RADEG,
            orbital_period,
        )
    }

    pub fn semi_major_axis(&self) -> AstronomicalUnit {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination(&self) -> Radian {
        self.inclination
    }

    pub fn ascending_node_longitude(&self) -> Radian {
        self.ascending_node_longitude
    }

    pub fn perihelion_argument(&self) -> Radian {
        self.perihelion_argument
    }

    pub fn mean_anomaly_at_epoch(&self) -> Radian {
        self.mean_anomaly_at_epoch
    }

    pub fn orbital_period(&self) -> Days {
        self.orbital_period
    }

    /// New element set with a different eccentricity.
    pub fn with_eccentricity(&self, eccentricity: f64) -> Result<Self, OrbitrackError> {
        Self::new(
            self.semi_major_axis,
            eccentricity,
            self.inclination,
            self.ascending_node_longitude,
            self.perihelion_argument,
            self.mean_anomaly_at_epoch,
            self.orbital_period,
        )
    }

    /// New element set with a different mean anomaly at epoch (radians).
    pub fn with_mean_anomaly(&self, mean_anomaly_at_epoch: Radian) -> Result<Self, OrbitrackError> {
        Self::new(
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            self.ascending_node_longitude,
            self.perihelion_argument,
            mean_anomaly_at_epoch,
            self.orbital_period,
        )
    }

    /// New element set with a different orbital period (days).
    pub fn with_orbital_period(&self, orbital_period: Days) -> Result<Self, OrbitrackError> {
        Self::new(
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            self.ascending_node_longitude,
            self.perihelion_argument,
            self.mean_anomaly_at_epoch,
            orbital_period,
        )
    }

    /// Perihelion distance `q = a(1 − e)` (AU).
    pub fn perihelion_distance(&self) -> AstronomicalUnit {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Aphelion distance `Q = a(1 + e)` (AU).
    pub fn aphelion_distance(&self) -> AstronomicalUnit {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Semi-minor axis `b = a·√(1 − e²)` (AU).
    pub fn semi_minor_axis(&self) -> AstronomicalUnit {
        self.semi_major_axis * (1.0 - self.eccentricity.powi(2)).sqrt()
    }

    /// Mean motion `n = 2π / T` in rad/s, or `None` when the period is unknown (`T ≤ 0`).
    pub fn mean_motion(&self) -> Option<f64> {
        if self.orbital_period > 0.0 {
            Some(DPI / (self.orbital_period * SECONDS_PER_DAY))
        } else {
            None
        }
    }

    /// Near-Earth object class of this orbit.
    pub fn neo_class(&self) -> NeoClass {
        NeoClass::classify(
            self.semi_major_axis,
            self.perihelion_distance(),
            self.aphelion_distance(),
        )
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rad_to_deg = 1.0 / RADEG;
        writeln!(f, "Orbital Elements")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6} AU",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6} rad ({:.6}°)",
            self.inclination,
            self.inclination * rad_to_deg
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6} rad ({:.6}°)",
            self.ascending_node_longitude,
            self.ascending_node_longitude * rad_to_deg
        )?;
        writeln!(
            f,
            "  ω   (argument of perihelion) = {:.6} rad ({:.6}°)",
            self.perihelion_argument,
            self.perihelion_argument * rad_to_deg
        )?;
        writeln!(
            f,
            "  M₀  (mean anomaly at epoch) = {:.6} rad ({:.6}°)",
            self.mean_anomaly_at_epoch,
            self.mean_anomaly_at_epoch * rad_to_deg
        )?;
        write!(
            f,
            "  T   (orbital period)        = {:.3} days",
            self.orbital_period
        )
    }
}
