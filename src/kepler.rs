//! # Elliptic Kepler equation
//!
//! Solves `M = E − e·sin(E)` for the eccentric anomaly `E` of a closed orbit
//! (`0 ≤ e < 1`).
//!
//! ## Method
//!
//! 1. The mean anomaly is reduced with a truncated remainder (`M % 2π`). The sign of
//!    the input is preserved, so a negative mean anomaly yields a negative reduced
//!    angle and the returned eccentric anomaly follows the same convention. It is
//!    **not** forced into `[0, 2π)`.
//! 2. The starting point is the third-order series inversion of Kepler's equation
//!    `E₀ = M + (e − e³/2 + (e² + 3/2·e³·cos M)·cos M)·sin M`.
//! 3. Each step applies the third-order (Danby) correction
//!    `δ₃ = −f / (f′ + δ₂f″/2 + δ₂²f‴/6)` where `δ₂` is the Halley step, with
//!    `sin E` and `cos E` evaluated once per step.
//! 4. The loop stops once `|Eₙ₊₁ − Eₙ| ≤ tolerance`, or after `max_iterations`.
//!    Hitting the cap is reported through [`KeplerSolution::converged`], never as
//!    an error. The iterate with the smallest residual `|E − e·sin E − M|` is
//!    returned in that case, so a step that diverges near `e → 1` cannot leak out.
//!
//! ## See also
//!
//! * [`crate::orbital_state`] – consumes the eccentric anomaly.
//! * [`crate::propagator::PropagationParams`] – where tolerance and iteration cap are configured.
use crate::{
    constants::{Radian, DPI, KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE},
    orbitrack_errors::OrbitrackError,
};

/// Outcome of a Kepler equation solve.
///
/// The eccentric anomaly is always the solver's best estimate. `converged == false`
/// means the iteration cap was reached before the tolerance was met; the anomaly is
/// then the iterate with the smallest residual, which may not be the last one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly E (radians), same reduced-angle convention as the mean anomaly.
    pub eccentric_anomaly: Radian,
    /// Number of correction steps performed.
    pub iterations: usize,
    /// Absolute change of E at the last step.
    pub last_correction: f64,
    /// Whether `last_correction` met the tolerance.
    pub converged: bool,
}

impl KeplerSolution {
    /// Residual of Kepler's equation `E − e·sin(E) − M` for the reduced mean anomaly.
    pub fn residual(&self, eccentricity: f64, mean_anomaly: Radian) -> f64 {
        let e = self.eccentric_anomaly;
        e - eccentricity * e.sin() - reduce_mean_anomaly(mean_anomaly)
    }
}

/// Reduce a mean anomaly modulo 2π, keeping the sign of the input.
///
/// `reduce_mean_anomaly(-1.0) == -1.0` and `reduce_mean_anomaly(DPI + 1.0) ≈ 1.0`.
#[inline]
pub fn reduce_mean_anomaly(mean_anomaly: Radian) -> Radian {
    mean_anomaly % DPI
}

/// Angle folded into `[0, 2π)`, for display of anomalies that may be negative.
#[inline]
pub fn principal_angle(angle: Radian) -> Radian {
    // rem_euclid rounds tiny negative angles up to exactly 2π
    let folded = angle.rem_euclid(DPI);
    if folded >= DPI {
        0.0
    } else {
        folded
    }
}

/// Third-order series inversion of Kepler's equation, used as starting point.
#[inline]
fn initial_guess(eccentricity: f64, mean_anomaly: Radian) -> Radian {
    let e = eccentricity;
    let e2 = e * e;
    let e3 = e2 * e;
    let (sin_m, cos_m) = mean_anomaly.sin_cos();

    mean_anomaly + (-0.5 * e3 + e + (e2 + 1.5 * cos_m * e3) * cos_m) * sin_m
}

/// Kepler equation solver with a configurable tolerance and iteration cap.
///
/// The solver is a plain value: it holds no state between calls and every call
/// with the same arguments returns the same [`KeplerSolution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        KeplerSolver {
            tolerance: KEPLER_TOLERANCE,
            max_iterations: KEPLER_MAX_ITERATIONS,
        }
    }
}

impl KeplerSolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        KeplerSolver {
            tolerance,
            max_iterations,
        }
    }

    /// Solve Kepler's equation after checking that the orbit is elliptic.
    ///
    /// Arguments
    /// ---------
    /// * `eccentricity` – must satisfy `0 ≤ e < 1`.
    /// * `mean_anomaly` – any real number (radians).
    ///
    /// Return
    /// ------
    /// * The [`KeplerSolution`], or [`OrbitrackError::InvalidEccentricity`] for e outside `[0, 1)`.
    pub fn solve(
        &self,
        eccentricity: f64,
        mean_anomaly: Radian,
    ) -> Result<KeplerSolution, OrbitrackError> {
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(OrbitrackError::InvalidEccentricity(eccentricity));
        }
        Ok(self.solve_elliptic(eccentricity, mean_anomaly))
    }

    /// Solve Kepler's equation for an eccentricity already known to be in `[0, 1)`.
    ///
    /// Callers holding validated [`crate::orbital_elements::OrbitalElements`] go through
    /// this entry point. Results for e outside `[0, 1)` are meaningless.
    pub(crate) fn solve_elliptic(&self, eccentricity: f64, mean_anomaly: Radian) -> KeplerSolution {
        let e = eccentricity;
        let m = reduce_mean_anomaly(mean_anomaly);

        let mut ecc_anom = initial_guess(e, m);
        let mut correction = f64::INFINITY;
        let mut iterations = 0;

        // Smallest |f(E)| seen so far and its iterate, returned if the cap is hit.
        let mut best = (f64::INFINITY, ecc_anom);

        while iterations < self.max_iterations {
            let (sin_e, cos_e) = ecc_anom.sin_cos();

            // -f'(E), e·sin(E) = f''(E), and -f(E)
            let neg_fp = -1.0 + e * cos_e;
            let e_sin = e * sin_e;
            let neg_f = -ecc_anom + e_sin + m;

            if neg_f.abs() < best.0 {
                best = (neg_f.abs(), ecc_anom);
            }

            // Halley step (sign flipped), then the third-order correction
            let halley = neg_f / (0.5 * neg_f * e_sin / neg_fp + neg_fp);
            let next =
                ecc_anom - neg_f / ((0.5 * sin_e - cos_e * halley / 6.0) * e * halley + neg_fp);

            correction = (ecc_anom - next).abs();
            ecc_anom = next;
            iterations += 1;

            if correction <= self.tolerance {
                return KeplerSolution {
                    eccentric_anomaly: ecc_anom,
                    iterations,
                    last_correction: correction,
                    converged: true,
                };
            }
        }

        let last_residual = (ecc_anom - e * ecc_anom.sin() - m).abs();
        if last_residual < best.0 {
            best = (last_residual, ecc_anom);
        }

        KeplerSolution {
            eccentric_anomaly: best.1,
            iterations,
            last_correction: correction,
            converged: false,
        }
    }
}

/// Solve Kepler's equation `M = E − e·sin(E)` with the default iteration cap.
///
/// Arguments
/// ---------
/// * `eccentricity` – `0 ≤ e < 1`.
/// * `mean_anomaly` – any real number (radians); reduced with a sign-preserving `% 2π`.
/// * `tolerance` – absolute stop criterion on successive estimates (default [`KEPLER_TOLERANCE`]).
///
/// Return
/// ------
/// * A [`KeplerSolution`]; check [`KeplerSolution::converged`] before trusting it blindly.
/// * [`OrbitrackError::InvalidEccentricity`] if `e` is outside `[0, 1)`.
pub fn solve_kepler_equation(
    eccentricity: f64,
    mean_anomaly: Radian,
    tolerance: f64,
) -> Result<KeplerSolution, OrbitrackError> {
    KeplerSolver::new(tolerance, KEPLER_MAX_ITERATIONS).solve(eccentricity, mean_anomaly)
}

#[cfg(test)]
mod kepler_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_principal_angle() {
        assert_abs_diff_eq!(principal_angle(-1.0), DPI - 1.0, epsilon = 1e-15);
        assert_eq!(principal_angle(1.0), 1.0);
        assert_abs_diff_eq!(principal_angle(3.0 * DPI + 0.5), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_reduce_mean_anomaly_keeps_sign() {
        assert_eq!(reduce_mean_anomaly(-1.0), -1.0);
        assert_eq!(reduce_mean_anomaly(1.0), 1.0);
        assert_abs_diff_eq!(reduce_mean_anomaly(DPI + 1.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(reduce_mean_anomaly(-DPI - 1.0), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_circular_orbit_is_identity() {
        let solver = KeplerSolver::default();
        for m in [0.0, 0.3, 1.0, PI, 4.0, 6.0] {
            let sol = solver.solve(0.0, m).unwrap();
            assert!(sol.converged);
            assert_abs_diff_eq!(sol.eccentric_anomaly, m, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_mean_anomaly_gives_zero() {
        for e in [0.0, 0.1, 0.5, 0.9, 0.99] {
            let sol = solve_kepler_equation(e, 0.0, KEPLER_TOLERANCE).unwrap();
            assert_eq!(sol.eccentric_anomaly, 0.0);
            assert_eq!(sol.iterations, 1);
            assert!(sol.converged);
        }
    }

    #[test]
    fn test_known_solution() {
        // e = 0.5, E = π/2  =>  M = π/2 − 0.5
        let sol = solve_kepler_equation(0.5, PI / 2.0 - 0.5, KEPLER_TOLERANCE).unwrap();
        assert!(sol.converged);
        assert_abs_diff_eq!(sol.eccentric_anomaly, PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_apsides_are_fixed_points() {
        let solver = KeplerSolver::default();
        let sol = solver.solve(0.7, PI).unwrap();
        assert!(sol.converged);
        assert_abs_diff_eq!(sol.eccentric_anomaly, PI, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_mean_anomaly_stays_negative() {
        let sol = solve_kepler_equation(0.3, -1.0, KEPLER_TOLERANCE).unwrap();
        assert!(sol.converged);
        assert!(sol.eccentric_anomaly < 0.0);
        assert_abs_diff_eq!(sol.residual(0.3, -1.0), 0.0, epsilon = 1e-12);

        // Odd symmetry of Kepler's equation
        let pos = solve_kepler_equation(0.3, 1.0, KEPLER_TOLERANCE).unwrap();
        assert_abs_diff_eq!(sol.eccentric_anomaly, -pos.eccentric_anomaly, epsilon = 1e-12);
    }

    #[test]
    fn test_large_mean_anomaly_is_reduced() {
        let m = 1.2;
        let base = solve_kepler_equation(0.4, m, KEPLER_TOLERANCE).unwrap();
        let wrapped = solve_kepler_equation(0.4, m + 3.0 * DPI, KEPLER_TOLERANCE).unwrap();
        assert_abs_diff_eq!(
            base.eccentric_anomaly,
            wrapped.eccentric_anomaly,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_deterministic() {
        let solver = KeplerSolver::default();
        let a = solver.solve(0.83, 2.1).unwrap();
        let b = solver.solve(0.83, 2.1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_eccentricity() {
        let solver = KeplerSolver::default();
        assert_eq!(
            solver.solve(1.0, 0.5),
            Err(OrbitrackError::InvalidEccentricity(1.0))
        );
        assert_eq!(
            solver.solve(-0.1, 0.5),
            Err(OrbitrackError::InvalidEccentricity(-0.1))
        );
        assert!(solver.solve(f64::NAN, 0.5).is_err());
    }

    #[test]
    fn test_iteration_cap_is_flagged() {
        let solver = KeplerSolver::new(1e-15, 1);
        let sol = solver.solve(0.9, 0.5).unwrap();
        assert!(!sol.converged);
        assert_eq!(sol.iterations, 1);
        assert!(sol.eccentric_anomaly.is_finite());
        assert!(sol.last_correction > 1e-15);
    }

    #[test]
    fn test_principal_angle_never_reaches_two_pi() {
        assert_eq!(principal_angle(-1e-17), 0.0);
        assert!((0.0..DPI).contains(&principal_angle(-1e-17)));
        assert!((0.0..DPI).contains(&principal_angle(-DPI)));
    }

    #[test]
    fn test_capped_solve_returns_least_residual() {
        let e = 0.999999;
        let solver = KeplerSolver::new(1e-15, 3);

        for m in [6.283e-4, DPI - 4.4e-3] {
            let sol = solver.solve(e, m).unwrap();
            let guess = initial_guess(e, m);
            let guess_residual = (guess - e * guess.sin() - m).abs();

            assert!(!sol.converged, "M = {m}");
            assert!(sol.eccentric_anomaly.is_finite());
            assert!(sol.residual(e, m).abs() <= guess_residual);
        }
    }

    #[test]
    fn test_near_parabolic_never_returns_diverged_iterate() {
        let e = 0.999999;
        let solver = KeplerSolver::default();

        for k in 0..20_011 {
            let m = k as f64 * DPI / 20_011.0;
            let sol = solver.solve(e, m).unwrap();
            let guess = initial_guess(e, m);
            let guess_residual = (guess - e * guess.sin() - m).abs();

            assert!(sol.eccentric_anomaly.is_finite(), "M = {m}");
            if sol.converged {
                assert!(sol.residual(e, m).abs() < 1e-9, "M = {m}");
            } else {
                assert!(sol.residual(e, m).abs() <= guess_residual, "M = {m}");
            }
        }
    }
}
