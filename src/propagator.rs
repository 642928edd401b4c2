//! # Time-domain propagation
//!
//! The [`Propagator`] is the façade a host application talks to. It wires the
//! numerical settings ([`PropagationParams`]) into the three operations of the
//! crate:
//!
//! - [`Propagator::position_at_anomaly`] – position for a given mean anomaly;
//! - [`Propagator::position_at_time`] – position after an elapsed wall-clock time,
//!   scaled by a simulation speed multiplier;
//! - [`Propagator::sample_path`] – closed polyline of one full revolution.
//!
//! ## Time model
//!
//! With the period `T` in days, the mean motion is `n = 2π / (86400·T)` rad/s and
//!
//! ```text
//! M(t) = (M₀ + n · t · speed) mod 2π
//! ```
//!
//! The remainder keeps the sign of its argument, so negative `t · speed` runs the
//! body backwards along its orbit. A zero multiplier freezes it at `M₀`.
//!
//! If `T ≤ 0` the period is unknown and the epoch position is returned
//! unchanged.
//!
//! ## Diagnostics
//!
//! A Kepler solve that stops at its iteration cap is logged with `log::warn!`
//! and the best estimate is still returned, so an animation keeps running.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering::Greater;

use crate::{
    constants::{
        Position, Radian, DEFAULT_PATH_POINTS, KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE,
    },
    kepler::{reduce_mean_anomaly, KeplerSolver},
    orbit_path::{sample_path_with, OrbitPath},
    orbital_elements::OrbitalElements,
    orbital_state::{state_at_anomaly, OrbitalState},
    orbitrack_errors::OrbitrackError,
};

/// Numerical settings of the propagator.
///
/// Defaults
/// --------
/// * `kepler_tolerance`: 1e-12
/// * `kepler_max_iterations`: 100
/// * `path_points`: 200
///
/// See also
/// --------
/// * [`PropagationParams::builder`] – validated construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropagationParams {
    /// Absolute stop criterion on successive eccentric anomaly estimates.
    pub kepler_tolerance: f64,
    /// Iteration cap of the Kepler solver.
    pub kepler_max_iterations: usize,
    /// Number of segments of a sampled path (the path has one more point).
    pub path_points: usize,
}

impl PropagationParams {
    /// Equivalent to [`PropagationParams::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Fluent builder with validation.
    ///
    /// ```rust
    /// use orbitrack::propagator::PropagationParams;
    ///
    /// let params = PropagationParams::builder()
    ///     .kepler_tolerance(1e-10)
    ///     .path_points(720)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.kepler_max_iterations, 100);
    /// ```
    pub fn builder() -> PropagationParamsBuilder {
        PropagationParamsBuilder::new()
    }

    /// Check settings that did not go through the builder (e.g. deserialized ones).
    ///
    /// Validation rules
    /// ----------------
    /// * `kepler_tolerance` finite and `> 0`.
    /// * `kepler_max_iterations ≥ 1`.
    /// * `path_points ≥ 1`.
    pub fn validate(&self) -> Result<(), OrbitrackError> {
        if !finite_gt0(self.kepler_tolerance) {
            return Err(OrbitrackError::InvalidPropagationParameter(
                "kepler_tolerance must be finite and > 0".into(),
            ));
        }
        if self.kepler_max_iterations == 0 {
            return Err(OrbitrackError::InvalidPropagationParameter(
                "kepler_max_iterations must be >= 1".into(),
            ));
        }
        if self.path_points == 0 {
            return Err(OrbitrackError::InvalidPropagationParameter(
                "path_points must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Kepler solver configured with these settings.
    pub fn kepler_solver(&self) -> KeplerSolver {
        KeplerSolver::new(self.kepler_tolerance, self.kepler_max_iterations)
    }
}

impl Default for PropagationParams {
    fn default() -> Self {
        PropagationParams {
            kepler_tolerance: KEPLER_TOLERANCE,
            kepler_max_iterations: KEPLER_MAX_ITERATIONS,
            path_points: DEFAULT_PATH_POINTS,
        }
    }
}

/// Return true iff x > 0.0, finite, and comparable (i.e., not NaN).
#[inline]
fn finite_gt0(x: f64) -> bool {
    x.is_finite() && x.partial_cmp(&0.0) == Some(Greater)
}

/// Builder for [`PropagationParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct PropagationParamsBuilder {
    params: PropagationParams,
}

impl PropagationParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: PropagationParams::default(),
        }
    }

    pub fn kepler_tolerance(mut self, v: f64) -> Self {
        self.params.kepler_tolerance = v;
        self
    }
    pub fn kepler_max_iterations(mut self, v: usize) -> Self {
        self.params.kepler_max_iterations = v;
        self
    }
    pub fn path_points(mut self, v: usize) -> Self {
        self.params.path_points = v;
        self
    }

    /// Finalize the builder; see [`PropagationParams::validate`] for the rules.
    pub fn build(self) -> Result<PropagationParams, OrbitrackError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// Mean anomaly reached after `elapsed_seconds · speed_multiplier` seconds of motion.
///
/// Return
/// ------
/// * `Some(M)` with `M = (M₀ + n·t·speed) mod 2π` (sign-preserving remainder).
/// * `None` if the orbital period is unknown (`T ≤ 0`).
pub fn mean_anomaly_at_time(
    elements: &OrbitalElements,
    elapsed_seconds: f64,
    speed_multiplier: f64,
) -> Option<Radian> {
    elements.mean_motion().map(|n| {
        reduce_mean_anomaly(
            elements.mean_anomaly_at_epoch() + n * elapsed_seconds * speed_multiplier,
        )
    })
}

/// Façade over the Kepler solver, state evaluator and path sampler.
///
/// A `Propagator` only carries immutable settings: it can be shared freely across
/// threads and every call is independent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Propagator {
    params: PropagationParams,
    solver: KeplerSolver,
}

impl Propagator {
    /// Propagator using `params`, rejected if [`PropagationParams::validate`] fails.
    pub fn new(params: PropagationParams) -> Result<Self, OrbitrackError> {
        params.validate()?;
        Ok(Propagator {
            params,
            solver: params.kepler_solver(),
        })
    }

    pub fn params(&self) -> &PropagationParams {
        &self.params
    }

    fn checked(&self, state: OrbitalState, elements: &OrbitalElements) -> OrbitalState {
        if !state.kepler.converged {
            log::warn!(
                "Kepler solver did not converge (e = {}, M = {}): {} iterations, last correction {:e}",
                elements.eccentricity(),
                state.mean_anomaly,
                state.kepler.iterations,
                state.kepler.last_correction
            );
        }
        state
    }

    /// Full state at a mean anomaly (`None` → mean anomaly at epoch).
    pub fn state_at_anomaly(
        &self,
        elements: &OrbitalElements,
        mean_anomaly: Option<Radian>,
    ) -> OrbitalState {
        self.checked(
            state_at_anomaly(elements, &self.solver, mean_anomaly),
            elements,
        )
    }

    /// Position at a mean anomaly (`None` → mean anomaly at epoch).
    pub fn position_at_anomaly(
        &self,
        elements: &OrbitalElements,
        mean_anomaly: Option<Radian>,
    ) -> Position {
        self.state_at_anomaly(elements, mean_anomaly).position
    }

    /// Full state after `elapsed_seconds` of simulated time at `speed_multiplier`.
    ///
    /// Falls back to the epoch state when the period is unknown.
    pub fn state_at_time(
        &self,
        elements: &OrbitalElements,
        elapsed_seconds: f64,
        speed_multiplier: f64,
    ) -> OrbitalState {
        let mean_anomaly = mean_anomaly_at_time(elements, elapsed_seconds, speed_multiplier);
        if mean_anomaly.is_none() {
            log::trace!(
                "orbital period {} days is not positive, using epoch position",
                elements.orbital_period()
            );
        }
        self.state_at_anomaly(elements, mean_anomaly)
    }

    /// Position after `elapsed_seconds` of simulated time at `speed_multiplier`.
    ///
    /// Arguments
    /// ---------
    /// * `elements` – orbit to propagate.
    /// * `elapsed_seconds` – wall-clock time since the epoch (may be negative).
    /// * `speed_multiplier` – time scale; `< 0` reverses the motion, `0` freezes it.
    pub fn position_at_time(
        &self,
        elements: &OrbitalElements,
        elapsed_seconds: f64,
        speed_multiplier: f64,
    ) -> Position {
        self.state_at_time(elements, elapsed_seconds, speed_multiplier)
            .position
    }

    /// Sample one revolution with the configured number of segments.
    pub fn sample_path(&self, elements: &OrbitalElements) -> Result<OrbitPath, OrbitrackError> {
        self.sample_path_with_points(elements, self.params.path_points)
    }

    /// Sample one revolution with `num_points` segments (`num_points + 1` points).
    pub fn sample_path_with_points(
        &self,
        elements: &OrbitalElements,
        num_points: usize,
    ) -> Result<OrbitPath, OrbitrackError> {
        let path = sample_path_with(elements, &self.solver, num_points)?;
        if path.degraded_points() > 0 {
            log::warn!(
                "{} of {} path points use a non-converged Kepler solution (e = {})",
                path.degraded_points(),
                path.len(),
                elements.eccentricity()
            );
        }
        Ok(path)
    }
}

/// Position after `elapsed_seconds · speed_multiplier` with the default settings.
pub fn position_at_time(
    elements: &OrbitalElements,
    elapsed_seconds: f64,
    speed_multiplier: f64,
) -> Position {
    Propagator::default().position_at_time(elements, elapsed_seconds, speed_multiplier)
}
