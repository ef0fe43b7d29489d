use auv_control::{BodyState, Commands, Controller, RigidBody};
use embedded_time::{duration::Microseconds, rate::Fraction, Clock, Instant};
use nalgebra::{UnitQuaternion, Vector3};
use std::time::Duration;

/// Wall clock reporting microseconds since program start. The u32 time base
/// wraps after about 71 minutes; this demo runs for just over a second.
struct SimClock {
    start: std::time::Instant,
}

impl SimClock {
    fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    fn now_micros(&self) -> Microseconds<u32> {
        Microseconds::new(self.start.elapsed().as_micros() as u32)
    }
}

impl Clock for SimClock {
    type T = u32;

    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000);

    fn try_now(&self) -> Result<Instant<Self>, embedded_time::clock::Error> {
        Ok(Instant::new(self.now_micros().0))
    }
}

/// Toy rigid body integrating the applied force with unit mass.
struct SimBody {
    state: BodyState,
    mass: f64,
}

impl SimBody {
    fn new() -> Self {
        Self {
            state: BodyState {
                attitude: UnitQuaternion::from_euler_angles(0., 0., 0.4),
                angular_velocity: Vector3::new(0., 0., 0.2),
                linear_velocity: Vector3::zeros(),
                center_of_mass: Vector3::new(0.05, 0., 0.),
            },
            mass: 1.,
        }
    }

    fn integrate(&mut self, force: Vector3<f64>, dt: f64) {
        self.state.linear_velocity += force * (dt / self.mass);
    }
}

impl RigidBody for SimBody {
    fn state(&mut self) -> Option<BodyState> {
        Some(self.state)
    }

    fn apply_force_at(&mut self, force_world: Vector3<f64>, _point_body: Vector3<f64>) {
        self.integrate(force_world, 0.02);
    }

    fn apply_torque(&mut self, torque_world: Vector3<f64>) {
        self.state.angular_velocity += torque_world * 0.02;
    }

    fn set_linear_velocity(&mut self, velocity_world: Vector3<f64>) {
        self.state.linear_velocity = velocity_world;
    }
}

#[tokio::main]
async fn main() {
    let clock = SimClock::new();
    let commands = Commands::new(clock.now_micros());

    // Transport side: deliver setpoints at 20 Hz for half a second, then go
    // silent so the staleness fail-safe takes over.
    let transport = commands.clone();
    let sender_start = std::time::Instant::now();
    tokio::spawn(async move {
        for _ in 0..10 {
            let now = Microseconds::new(sender_start.elapsed().as_micros() as u32);
            transport.set_propulsion(2., now);
            transport.set_vertical(10.);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    });

    let controller = Controller::new(clock, commands);
    let mut body = SimBody::new();

    // Engine side: 50 Hz tick loop.
    for tick in 0..60 {
        controller.update(&mut body).expect("control tick failed");

        if tick % 10 == 0 {
            println!(
                "t={:>4} ms  velocity=({:+.3}, {:+.3}, {:+.3})  angular=({:+.3}, {:+.3}, {:+.3})",
                tick * 20,
                body.state.linear_velocity.x,
                body.state.linear_velocity.y,
                body.state.linear_velocity.z,
                body.state.angular_velocity.x,
                body.state.angular_velocity.y,
                body.state.angular_velocity.z,
            );
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
