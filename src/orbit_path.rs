//! # Orbit path sampling
//!
//! Discretizes one revolution for display: the `j`-th point sits at mean anomaly
//! `(j / N)·2π`, `j = 0..=N`, so a path of `N` segments holds `N + 1` points and
//! its last point coincides with the first (M = 0 and M = 2π are the same place).
//!
//! Sampling uniformly in **mean** anomaly means points crowd near aphelion, where
//! the body moves slowest; this mirrors what the animation shows.
use std::io::Write;

use itertools::Itertools;

use crate::{
    constants::{AstronomicalUnit, Position, DEFAULT_PATH_POINTS, DPI},
    kepler::KeplerSolver,
    orbital_elements::OrbitalElements,
    orbital_state::state_at_anomaly,
    orbitrack_errors::OrbitrackError,
    propagator::Propagator,
};

/// Ordered positions covering one full orbit, both ends included.
///
/// Built once per element set and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPath {
    points: Vec<Position>,
    degraded_points: usize,
}

impl OrbitPath {
    pub fn points(&self) -> &[Position] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.points.iter()
    }

    pub fn first(&self) -> Option<&Position> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Position> {
        self.points.last()
    }

    /// Number of points computed from a non-converged Kepler solution.
    pub fn degraded_points(&self) -> usize {
        self.degraded_points
    }

    /// Whether the first and last points are within `epsilon` of each other.
    pub fn is_closed(&self, epsilon: f64) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => (first - last).norm() <= epsilon,
            _ => false,
        }
    }

    /// Length of the polyline (AU); approaches the ellipse perimeter as the
    /// number of points grows.
    pub fn perimeter(&self) -> AstronomicalUnit {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| (b - a).norm())
            .sum()
    }

    /// Write the path as CSV with an `x,y,z` header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), OrbitrackError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["x", "y", "z"])?;
        for p in &self.points {
            csv_writer.write_record(&[p.x.to_string(), p.y.to_string(), p.z.to_string()])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl IntoIterator for OrbitPath {
    type Item = Position;
    type IntoIter = std::vec::IntoIter<Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrbitPath {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Sample one revolution with an explicit Kepler solver.
///
/// Arguments
/// ---------
/// * `elements` – orbit to sample.
/// * `solver` – Kepler solver settings.
/// * `num_points` – number of segments `N ≥ 1`; the path has `N + 1` points.
///
/// Errors
/// ------
/// * [`OrbitrackError::InvalidPathResolution`] if `num_points == 0`.
pub fn sample_path_with(
    elements: &OrbitalElements,
    solver: &KeplerSolver,
    num_points: usize,
) -> Result<OrbitPath, OrbitrackError> {
    if num_points == 0 {
        return Err(OrbitrackError::InvalidPathResolution(num_points));
    }

    let mut degraded_points = 0;
    let points = (0..=num_points)
        .map(|j| {
            let mean_anomaly = (j as f64 / num_points as f64) * DPI;
            let state = state_at_anomaly(elements, solver, Some(mean_anomaly));
            if !state.kepler.converged {
                degraded_points += 1;
            }
            state.position
        })
        .collect::<Vec<_>>();

    log::debug!(
        "sampled orbit path: {} points, a = {}, e = {}",
        points.len(),
        elements.semi_major_axis(),
        elements.eccentricity()
    );

    Ok(OrbitPath {
        points,
        degraded_points,
    })
}

/// Sample one revolution with the default solver settings.
///
/// `num_points` defaults to 200 when `None`. Points computed from a capped Kepler
/// solve are counted in [`OrbitPath::degraded_points`] and logged.
pub fn sample_path(
    elements: &OrbitalElements,
    num_points: Option<usize>,
) -> Result<OrbitPath, OrbitrackError> {
    Propagator::default()
        .sample_path_with_points(elements, num_points.unwrap_or(DEFAULT_PATH_POINTS))
}

#[cfg(test)]
mod orbit_path_test {
    use super::*;
    use crate::orbital_state::position_at_anomaly;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn elements() -> OrbitalElements {
        OrbitalElements::from_degrees(1.2, 0.15, 10.0, 180.0, 90.0, 0.0, 450.0).unwrap()
    }

    #[test]
    fn test_point_count_and_closure() {
        let path = sample_path(&elements(), None).unwrap();
        assert_eq!(path.len(), 201);
        assert!(!path.is_empty());
        assert!(path.is_closed(1e-9));
        assert_eq!(path.degraded_points(), 0);

        let path = sample_path(&elements(), Some(1)).unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_points_follow_mean_anomaly_grid() {
        let elem = elements();
        let path = sample_path(&elem, Some(4)).unwrap();
        assert_eq!(path.points()[0], position_at_anomaly(&elem, Some(0.0)));
        assert_eq!(path.points()[2], position_at_anomaly(&elem, Some(PI)));
    }

    #[test]
    fn test_zero_points_is_rejected() {
        assert_eq!(
            sample_path(&elements(), Some(0)),
            Err(OrbitrackError::InvalidPathResolution(0))
        );
    }

    #[test]
    fn test_identical_inputs_identical_paths() {
        let a = sample_path(&elements(), Some(64)).unwrap();
        let b = sample_path(&elements(), Some(64)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_circle_perimeter() {
        let circle = OrbitalElements::new(1.0, 0.0, 0.3, 0.2, 0.1, 0.0, 365.25).unwrap();
        let path = sample_path(&circle, Some(2000)).unwrap();
        assert_relative_eq!(path.perimeter(), 2.0 * PI, epsilon = 1e-5);
    }

    #[test]
    fn test_iterators() {
        let path = sample_path(&elements(), Some(10)).unwrap();
        assert_eq!((&path).into_iter().count(), 11);
        assert_eq!(path.iter().count(), 11);
        let owned: Vec<Position> = path.clone().into_iter().collect();
        assert_eq!(owned.as_slice(), path.points());
    }

    #[test]
    fn test_write_csv() {
        let path = sample_path(&elements(), Some(3)).unwrap();
        let mut buffer = Vec::new();
        path.write_csv(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "x,y,z");

        let first: Vec<f64> = lines[1]
            .split(',')
            .map(|v| v.parse::<f64>().unwrap())
            .collect();
        assert_relative_eq!(first[0], path.points()[0].x);
        assert_relative_eq!(first[1], path.points()[0].y);
        assert_relative_eq!(first[2], path.points()[0].z);
    }
}
