use nalgebra::{UnitQuaternion, Vector3};

/// Zero the body-local lateral (Y) component of a world-frame linear
/// velocity, leaving the local forward (X) and vertical (Z) components
/// unchanged.
///
/// The result replaces the body's linear velocity for the tick, a direct
/// velocity override rather than a corrective force. `attitude` is assumed
/// to be a valid unit quaternion; no renormalization is performed.
pub fn suppress_lateral_velocity(
    attitude: &UnitQuaternion<f64>,
    velocity_world: &Vector3<f64>,
) -> Vector3<f64> {
    let mut velocity_body = attitude.inverse_transform_vector(velocity_world);
    velocity_body.y = 0.;
    attitude.transform_vector(&velocity_body)
}
