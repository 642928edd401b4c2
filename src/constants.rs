//! # Constants and type definitions for Orbitrack
//!
//! This module centralizes the **conversion factors**, **numerical defaults** and
//! **common type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Kepler solver and path sampler defaults
//! - Heliocentric distance thresholds used to classify near-Earth orbits
//! - Core type aliases ([`Radian`], [`Degree`], [`Position`], …)

use nalgebra::Vector3;

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, one full revolution in radians
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

// -------------------------------------------------------------------------------------------------
// Numerical defaults
// -------------------------------------------------------------------------------------------------

/// Default absolute tolerance on successive eccentric anomaly estimates
pub const KEPLER_TOLERANCE: f64 = 1e-12;

/// Default iteration cap of the Kepler solver
pub const KEPLER_MAX_ITERATIONS: usize = 100;

/// Default number of segments of a sampled orbit path
pub const DEFAULT_PATH_POINTS: usize = 200;

/// Default number of paths kept by a `PathCache`
pub const DEFAULT_PATH_CACHE_CAPACITY: usize = 64;

// -------------------------------------------------------------------------------------------------
// Near-Earth object thresholds
// -------------------------------------------------------------------------------------------------

/// Earth perihelion distance (AU)
pub const EARTH_PERIHELION_AU: f64 = 0.983;

/// Earth aphelion distance (AU)
pub const EARTH_APHELION_AU: f64 = 1.017;

/// Upper perihelion bound of a near-Earth object (AU)
pub const NEO_MAX_PERIHELION_AU: f64 = 1.3;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Duration in days
pub type Days = f64;

/// Cartesian position in the reference frame, same unit as the semi-major axis.
pub type Position = Vector3<f64>;
