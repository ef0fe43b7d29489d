use embedded_time::duration::Microseconds;
use log::debug;

use crate::CommandSnapshot;

/// Fail-safe on the propulsion channel: when no fresh setpoint has arrived
/// within the threshold, the effective command for the tick is forced to
/// zero. The stored command is left untouched and the next fresh delivery
/// recovers normal operation.
#[derive(Debug, Clone, Copy)]
pub struct CommandTimeout {
    pub threshold: Microseconds<u32>,
}

impl Default for CommandTimeout {
    fn default() -> Self {
        Self {
            threshold: Microseconds::new(100_000),
        }
    }
}

impl CommandTimeout {
    /// Whether the last arrival is older than the threshold.
    /// Strict comparison: exactly at the boundary is still fresh. A stamp
    /// ahead of `now` counts as fresh.
    pub fn is_stale(&self, last: Microseconds<u32>, now: Microseconds<u32>) -> bool {
        match now.0.checked_sub(last.0) {
            Some(elapsed) => elapsed > self.threshold.0,
            None => false,
        }
    }

    /// The propulsion command to use for this tick.
    pub fn effective_propulsion(&self, snapshot: &CommandSnapshot, now: Microseconds<u32>) -> f64 {
        if self.is_stale(snapshot.last_propulsion_update, now) {
            debug!(
                "propulsion command stale (last update at {} us), forcing to zero",
                snapshot.last_propulsion_update.0
            );
            0.
        } else {
            snapshot.propulsion_velocity
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_time::duration::Microseconds;

    use super::CommandTimeout;
    use crate::Commands;

    #[test]
    fn fresh_below_threshold() {
        let timeout = CommandTimeout::default();
        assert!(!timeout.is_stale(Microseconds::new(0), Microseconds::new(99_999)));
    }

    #[test]
    fn fresh_exactly_at_threshold() {
        let timeout = CommandTimeout::default();
        assert!(!timeout.is_stale(Microseconds::new(0), Microseconds::new(100_000)));
    }

    #[test]
    fn stale_past_threshold() {
        let timeout = CommandTimeout::default();
        assert!(timeout.is_stale(Microseconds::new(0), Microseconds::new(100_001)));
    }

    #[test]
    fn stamp_ahead_of_now_is_fresh() {
        let timeout = CommandTimeout::default();
        assert!(!timeout.is_stale(Microseconds::new(2_000_000), Microseconds::new(0)));
    }

    #[test]
    fn stale_command_is_zeroed_for_the_tick() {
        let timeout = CommandTimeout::default();
        let commands = Commands::new(Microseconds::new(0));
        commands.set_propulsion(2., Microseconds::new(0));

        // Last command at t = 0, queried at t = 0.2 s.
        let snapshot = commands.snapshot();
        assert_eq!(
            timeout.effective_propulsion(&snapshot, Microseconds::new(200_000)),
            0.
        );
        // The stored value survives for the next fresh delivery to replace.
        assert_eq!(commands.snapshot().propulsion_velocity, 2.);
    }

    #[test]
    fn fresh_command_passes_through() {
        let timeout = CommandTimeout::default();
        let commands = Commands::new(Microseconds::new(0));
        commands.set_propulsion(-1.25, Microseconds::new(50_000));

        let snapshot = commands.snapshot();
        assert_eq!(
            timeout.effective_propulsion(&snapshot, Microseconds::new(120_000)),
            -1.25
        );
    }
}
