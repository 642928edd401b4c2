//! # Orbital state evaluation
//!
//! Maps a mean anomaly on a given orbit to a Cartesian position in the reference
//! frame:
//!
//! 1. solve Kepler's equation for the eccentric anomaly `E`
//!    ([`crate::kepler::KeplerSolver`]);
//! 2. place the body in the perifocal frame (x towards perihelion):
//!    `x = a(cos E − e)`, `y = a·√(1 − e²)·sin E`, `z = 0`;
//! 3. rotate into the reference frame with
//!    [`perifocal_to_reference`](crate::ref_system::perifocal_to_reference).
//!
//! For a circular orbit (`e = 0`) the distance to the focus is `a` whatever the
//! argument of perihelion, which falls out of the formulas without special casing.
use nalgebra::Vector3;

use crate::{
    constants::{AstronomicalUnit, Position, Radian},
    kepler::{principal_angle, KeplerSolution, KeplerSolver},
    orbital_elements::OrbitalElements,
    propagator::Propagator,
    ref_system::perifocal_to_reference,
};

/// Position on the orbit together with the Kepler solve that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalState {
    /// Reference-frame position (same unit as the semi-major axis).
    pub position: Position,
    /// Mean anomaly used for the evaluation (radians, before reduction).
    pub mean_anomaly: Radian,
    /// Kepler solve details, including the convergence flag.
    pub kepler: KeplerSolution,
}

impl OrbitalState {
    /// Heliocentric distance `|r|`.
    pub fn distance(&self) -> AstronomicalUnit {
        self.position.norm()
    }

    /// Eccentric anomaly folded into `[0, 2π)`.
    pub fn eccentric_anomaly(&self) -> Radian {
        principal_angle(self.kepler.eccentric_anomaly)
    }

    /// `false` when the Kepler solver stopped at its iteration cap.
    pub fn is_converged(&self) -> bool {
        self.kepler.converged
    }
}

/// Position in the perifocal frame for a given eccentric anomaly.
///
/// Arguments
/// ---------
/// * `semi_major_axis` – a.
/// * `eccentricity` – e, `0 ≤ e < 1`.
/// * `eccentric_anomaly` – E (radians).
pub fn perifocal_position(
    semi_major_axis: AstronomicalUnit,
    eccentricity: f64,
    eccentric_anomaly: Radian,
) -> Position {
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    Vector3::new(
        semi_major_axis * (cos_e - eccentricity),
        semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt() * sin_e,
        0.0,
    )
}

/// Evaluate the orbital state at a mean anomaly.
///
/// Arguments
/// ---------
/// * `elements` – validated orbital elements.
/// * `solver` – Kepler solver settings.
/// * `mean_anomaly` – radians; `None` uses the mean anomaly at epoch.
///
/// Return
/// ------
/// * A fresh [`OrbitalState`]. Non-convergence is reported through
///   [`OrbitalState::is_converged`]; the position is the best estimate.
pub fn state_at_anomaly(
    elements: &OrbitalElements,
    solver: &KeplerSolver,
    mean_anomaly: Option<Radian>,
) -> OrbitalState {
    let mean_anomaly = mean_anomaly.unwrap_or(elements.mean_anomaly_at_epoch());
    let kepler = solver.solve_elliptic(elements.eccentricity(), mean_anomaly);

    let perifocal = perifocal_position(
        elements.semi_major_axis(),
        elements.eccentricity(),
        kepler.eccentric_anomaly,
    );
    let rotation = perifocal_to_reference(
        elements.inclination(),
        elements.ascending_node_longitude(),
        elements.perihelion_argument(),
    );

    OrbitalState {
        position: rotation * perifocal,
        mean_anomaly,
        kepler,
    }
}

/// Position at a mean anomaly with the default solver settings.
///
/// `None` evaluates the epoch position. A solve that stops at the iteration cap
/// is logged with `log::warn!`; use [`state_at_anomaly`] to inspect it instead.
pub fn position_at_anomaly(elements: &OrbitalElements, mean_anomaly: Option<Radian>) -> Position {
    Propagator::default().position_at_anomaly(elements, mean_anomaly)
}
