use nalgebra::{UnitQuaternion, Vector3};

/// Gains of the force/torque model.
#[derive(Debug, Clone, Copy)]
pub struct ThrustModel {
    /// Quadratic thrust gain along the body forward (X) axis.
    pub thrust_gain: f64,
    /// World-Z scale applied to the vertical force command.
    pub vertical_gain: f64,
    /// Proportional gain damping the angular velocity on all three axes.
    pub angular_damping: f64,
}

impl Default for ThrustModel {
    fn default() -> Self {
        Self {
            thrust_gain: 2.0,
            vertical_gain: 0.15,
            angular_damping: 10.0,
        }
    }
}

impl ThrustModel {
    /// Longitudinal thrust for a signed velocity setpoint (in m/s).
    /// Sign follows the setpoint, magnitude grows quadratically, so reverse
    /// thrust is symmetric but scaled by speed.
    pub fn propulsion_force(&self, velocity: f64) -> f64 {
        self.thrust_gain * velocity.abs() * velocity
    }

    /// Calculate the world-frame force and torque for one tick.
    ///
    /// Thrust acts purely along the body's local forward (X) axis and is
    /// rotated into the world frame by `attitude`. The vertical command maps
    /// to a world-Z force independent of attitude. The torque is a pure
    /// damper driving the world angular velocity toward zero; there is no
    /// setpoint tracking.
    pub fn force_torque(
        &self,
        propulsion_velocity: f64,
        vertical_force: f64,
        attitude: &UnitQuaternion<f64>,
        angular_velocity: &Vector3<f64>,
    ) -> (Vector3<f64>, Vector3<f64>) {
        let thrust_body = Vector3::new(self.propulsion_force(propulsion_velocity), 0., 0.);
        let thrust_world = attitude.transform_vector(&thrust_body);
        let buoyancy_world = Vector3::new(0., 0., vertical_force * self.vertical_gain);

        let force_world = thrust_world + buoyancy_world;
        let torque_world = angular_velocity * -self.angular_damping;
        (force_world, torque_world)
    }
}
