use embedded_time::duration::Microseconds;
use std::sync::{Arc, Mutex};

/// A consistent view of the command state taken for one control tick.
#[derive(Debug, Clone, Copy)]
pub struct CommandSnapshot {
    /// Signed propulsion velocity setpoint (m/s).
    pub propulsion_velocity: f64,
    /// Signed vertical auxiliary force setpoint.
    pub vertical_force: f64,
    /// Arrival time of the last propulsion setpoint.
    pub last_propulsion_update: Microseconds<u32>,
}

#[derive(Debug)]
struct CommandState {
    propulsion_velocity: f64,
    vertical_force: f64,
    last_propulsion_update: Microseconds<u32>,
}

/// Cloneable handle to the command state shared between the message
/// transport and the control tick.
///
/// The transport side delivers setpoints from its own threads; the tick side
/// reads them with [`snapshot`](Commands::snapshot), which always observes a
/// paired (value, timestamp) state, never a torn update.
#[derive(Debug, Clone)]
pub struct Commands {
    state: Arc<Mutex<CommandState>>,
}

impl Commands {
    /// Create the command state with zeroed setpoints, stamped at `now`.
    pub fn new(now: Microseconds<u32>) -> Self {
        Self {
            state: Arc::new(Mutex::new(CommandState {
                propulsion_velocity: 0.,
                vertical_force: 0.,
                last_propulsion_update: now,
            })),
        }
    }

    /// Deliver a propulsion velocity setpoint (in m/s) stamped at `now`.
    ///
    /// The stored arrival time never moves backward: a delivery carrying an
    /// older stamp updates the value but keeps the newer timestamp.
    pub fn set_propulsion(&self, value: f64, now: Microseconds<u32>) {
        let mut state = self.state.lock().unwrap();
        state.propulsion_velocity = value;
        if now.0 > state.last_propulsion_update.0 {
            state.last_propulsion_update = now;
        }
    }

    /// Deliver a vertical force setpoint.
    pub fn set_vertical(&self, value: f64) {
        self.state.lock().unwrap().vertical_force = value;
    }

    /// Take a consistent (value, timestamp) view of the command state for
    /// one control tick.
    pub fn snapshot(&self) -> CommandSnapshot {
        let state = self.state.lock().unwrap();
        CommandSnapshot {
            propulsion_velocity: state.propulsion_velocity,
            vertical_force: state.vertical_force,
            last_propulsion_update: state.last_propulsion_update,
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_time::duration::Microseconds;

    use super::Commands;

    #[test]
    fn starts_zeroed_at_construction_time() {
        let commands = Commands::new(Microseconds::new(42));
        let snapshot = commands.snapshot();
        assert_eq!(snapshot.propulsion_velocity, 0.);
        assert_eq!(snapshot.vertical_force, 0.);
        assert_eq!(snapshot.last_propulsion_update, Microseconds::new(42u32));
    }

    #[test]
    fn deliveries_update_value_and_stamp() {
        let commands = Commands::new(Microseconds::new(0));
        commands.set_propulsion(1.5, Microseconds::new(1_000));
        commands.set_vertical(-3.);

        let snapshot = commands.snapshot();
        assert_eq!(snapshot.propulsion_velocity, 1.5);
        assert_eq!(snapshot.vertical_force, -3.);
        assert_eq!(snapshot.last_propulsion_update, Microseconds::new(1_000u32));
    }

    #[test]
    fn arrival_time_never_moves_backward() {
        let commands = Commands::new(Microseconds::new(0));
        commands.set_propulsion(1., Microseconds::new(5_000));
        commands.set_propulsion(2., Microseconds::new(4_000));

        let snapshot = commands.snapshot();
        assert_eq!(snapshot.propulsion_velocity, 2.);
        assert_eq!(snapshot.last_propulsion_update, Microseconds::new(5_000u32));
    }

    #[test]
    fn clones_share_state() {
        let commands = Commands::new(Microseconds::new(0));
        let transport_side = commands.clone();
        transport_side.set_propulsion(0.7, Microseconds::new(10));
        assert_eq!(commands.snapshot().propulsion_velocity, 0.7);
    }
}
