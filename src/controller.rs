use embedded_time::{duration::Microseconds, Clock};
use log::debug;
use nalgebra::{UnitQuaternion, Vector3};

use crate::{suppress_lateral_velocity, CommandTimeout, Commands, Error, ThrustModel};

/// Read-only snapshot of the controlled body for one tick, supplied by the
/// host physics engine.
#[derive(Debug, Clone, Copy)]
pub struct BodyState {
    /// Body-to-world rotation.
    pub attitude: UnitQuaternion<f64>,
    /// Angular velocity in the world frame (rad/s).
    pub angular_velocity: Vector3<f64>,
    /// Linear velocity in the world frame (m/s).
    pub linear_velocity: Vector3<f64>,
    /// Center of mass offset in the body frame (m).
    pub center_of_mass: Vector3<f64>,
}

/// Everything the control law hands back to the engine for one tick.
/// Produced fresh every tick and immediately consumed.
#[derive(Debug, Clone, Copy)]
pub struct ControlOutput {
    /// Total applied force in the world frame.
    pub force_world: Vector3<f64>,
    /// Body-local point the force is applied at (the center of mass offset,
    /// so the force itself introduces no spurious torque).
    pub application_point_body: Vector3<f64>,
    /// Damping torque in the world frame.
    pub torque_world: Vector3<f64>,
    /// World-frame linear velocity that replaces the body's velocity.
    pub corrected_linear_velocity_world: Vector3<f64>,
}

/// Engine-side seam for the controlled rigid body.
///
/// A thin adapter in the host integration layer implements this against the
/// engine's body handle and registers [`Controller::update`] with the
/// engine's per-tick callback mechanism.
pub trait RigidBody {
    /// The current body state, or `None` while the body is unavailable.
    fn state(&mut self) -> Option<BodyState>;

    /// Apply a world-frame force at a body-local point.
    fn apply_force_at(&mut self, force_world: Vector3<f64>, point_body: Vector3<f64>);

    /// Apply a world-frame torque.
    fn apply_torque(&mut self, torque_world: Vector3<f64>);

    /// Replace the body's world-frame linear velocity.
    fn set_linear_velocity(&mut self, velocity_world: Vector3<f64>);
}

/// The per-tick control law: command fail-safe, force/torque model, and
/// lateral velocity constraint, driven once per engine tick.
pub struct Controller<C> {
    pub commands: Commands,
    pub timeout: CommandTimeout,
    pub model: ThrustModel,
    clock: C,
}

impl<C> Controller<C>
where
    C: Clock<T = u32>,
{
    pub fn new(clock: C, commands: Commands) -> Self {
        Self {
            commands,
            timeout: CommandTimeout::default(),
            model: ThrustModel::default(),
            clock,
        }
    }

    /// Run one control tick against a body state snapshot.
    ///
    /// Reads the clock and the command state, applies the staleness
    /// fail-safe, and computes the force, torque, and corrected velocity to
    /// hand back to the engine.
    pub fn tick(&self, body: &BodyState) -> Result<ControlOutput, Error> {
        let now = self.micros_since_epoch()?;
        let snapshot = self.commands.snapshot();
        let propulsion = self.timeout.effective_propulsion(&snapshot, now);

        let (force_world, torque_world) = self.model.force_torque(
            propulsion,
            snapshot.vertical_force,
            &body.attitude,
            &body.angular_velocity,
        );
        let corrected = suppress_lateral_velocity(&body.attitude, &body.linear_velocity);

        Ok(ControlOutput {
            force_world,
            application_point_body: body.center_of_mass,
            torque_world,
            corrected_linear_velocity_world: corrected,
        })
    }

    /// Per-tick entry point for the host engine's update callback.
    ///
    /// A missing body skips the tick entirely: no computation, no engine
    /// calls, retried naturally on the next tick.
    pub fn update<B: RigidBody>(&self, body: &mut B) -> Result<(), Error> {
        let state = match body.state() {
            Some(state) => state,
            None => {
                debug!("controlled body unavailable, skipping tick");
                return Ok(());
            }
        };

        let output = self.tick(&state)?;

        body.apply_force_at(output.force_world, output.application_point_body);
        body.apply_torque(output.torque_world);
        body.set_linear_velocity(output.corrected_linear_velocity_world);
        Ok(())
    }

    fn micros_since_epoch(&self) -> Result<Microseconds<u32>, Error> {
        let instant = self.clock.try_now()?;
        Microseconds::try_from(instant.duration_since_epoch()).map_err(Into::into)
    }
}
