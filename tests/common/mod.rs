#![allow(dead_code)]
use approx::assert_relative_eq;
use orbitrack::{constants::Position, orbital_elements::OrbitalElements};

pub fn assert_position_close(actual: &Position, expected: &Position, epsilon: f64) {
    assert_relative_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_relative_eq!(actual.y, expected.y, epsilon = epsilon);
    assert_relative_eq!(actual.z, expected.z, epsilon = epsilon);
}

pub fn assert_elements_close(actual: &OrbitalElements, expected: &OrbitalElements, epsilon: f64) {
    assert_relative_eq!(
        actual.semi_major_axis(),
        expected.semi_major_axis(),
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.eccentricity(),
        expected.eccentricity(),
        epsilon = epsilon
    );
    assert_relative_eq!(actual.inclination(), expected.inclination(), epsilon = epsilon);
    assert_relative_eq!(
        actual.ascending_node_longitude(),
        expected.ascending_node_longitude(),
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.perihelion_argument(),
        expected.perihelion_argument(),
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.mean_anomaly_at_epoch(),
        expected.mean_anomaly_at_epoch(),
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.orbital_period(),
        expected.orbital_period(),
        epsilon = epsilon
    );
}
