//! # auv-control
//! A per-tick control law for underwater vehicles: two scalar setpoints
//! (propulsion velocity and vertical force) become a world-frame force and
//! damping torque on a single rigid body, with a command-staleness fail-safe
//! and a lateral-velocity constraint.
//!
//! # Components
//! [`Commands`] is the shared command state fed by the message transport.
//!
//! [`CommandTimeout`] zeroes the effective propulsion command when it goes
//! stale.
//!
//! [`ThrustModel`] maps the setpoints and body state to a force and torque.
//!
//! [`suppress_lateral_velocity`] removes the body-local lateral velocity
//! component.
//!
//! [`Controller`] ties these together once per engine tick through the
//! [`RigidBody`] seam; the host engine supplies the tick cadence, the body
//! state, and an [`embedded_time::Clock`].

pub mod command;
pub use command::{CommandSnapshot, Commands};

pub mod constraint;
pub use constraint::suppress_lateral_velocity;

pub mod controller;
pub use controller::{BodyState, ControlOutput, Controller, RigidBody};

mod error;
pub use error::Error;

pub mod failsafe;
pub use failsafe::CommandTimeout;

pub mod thrust;
pub use thrust::ThrustModel;
