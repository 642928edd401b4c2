use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::Radian;

/// Coordinate axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

/// Elementary rotation matrix of angle `alpha` about one coordinate axis.
///
/// The rotation is active (right-handed): `rotmt(π/2, Z) · x̂ = ŷ`.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in radians.
/// * `axis`: axis to rotate about.
///
/// Return
/// ------
/// * The 3×3 rotation matrix.
pub fn rotmt(alpha: Radian, axis: RotationAxis) -> Matrix3<f64> {
    let axis = match axis {
        RotationAxis::X => Vector3::x_axis(),
        RotationAxis::Y => Vector3::y_axis(),
        RotationAxis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotation from the perifocal frame to the reference frame.
///
/// Builds `R = R_z(Ω) · R_x(i) · R_z(ω)`: the argument of perihelion rotates the
/// ellipse inside its own plane, the inclination tilts that plane about the line
/// of nodes, and the ascending node longitude orients the line of nodes in the
/// reference plane. Changing the product order gives a different (wrong) orbit
/// orientation.
///
/// Arguments
/// ---------
/// * `inclination`: i (radians).
/// * `ascending_node_longitude`: Ω (radians).
/// * `perihelion_argument`: ω (radians).
///
/// See also
/// --------
/// * [`rotmt`] – elementary rotations used for each factor.
/// * [`crate::orbital_state::state_at_anomaly`] – applies this rotation to the perifocal position.
pub fn perifocal_to_reference(
    inclination: Radian,
    ascending_node_longitude: Radian,
    perihelion_argument: Radian,
) -> Matrix3<f64> {
    rotmt(ascending_node_longitude, RotationAxis::Z)
        * rotmt(inclination, RotationAxis::X)
        * rotmt(perihelion_argument, RotationAxis::Z)
}
