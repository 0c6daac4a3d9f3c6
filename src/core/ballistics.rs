use super::error::{SimError, SimResult, ensure_in_range, ensure_positive};
use super::trajectory::{SampleWindow, Trajectory, TrajectorySample};

pub const EARTH_GRAVITY_MPS2: f64 = 9.81;

pub const MIN_ANGLE_DEG: f64 = 0.0;
pub const MAX_ANGLE_DEG: f64 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchInputs {
    pub angle_deg: f64,
    pub speed_mps: f64,
    pub height_m: f64,
}

impl LaunchInputs {
    pub fn new(angle_deg: f64, speed_mps: f64, height_m: f64) -> Self {
        Self {
            angle_deg,
            speed_mps,
            height_m,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        ensure_in_range("angle", self.angle_deg, MIN_ANGLE_DEG, MAX_ANGLE_DEG)?;
        ensure_positive("velocity", self.speed_mps)?;
        ensure_in_range("height", self.height_m, 0.0, f64::MAX)?;
        Ok(())
    }

    pub fn velocity_components(&self) -> (f64, f64) {
        let theta = self.angle_deg.to_radians();
        (self.speed_mps * theta.cos(), self.speed_mps * theta.sin())
    }
}

/// Closed-form projectile kinematics under a constant gravity field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryModel {
    gravity_mps2: f64,
}

impl Default for TrajectoryModel {
    fn default() -> Self {
        Self::earth()
    }
}

impl TrajectoryModel {
    pub fn new(gravity_mps2: f64) -> SimResult<Self> {
        ensure_positive("gravity", gravity_mps2)?;
        Ok(Self { gravity_mps2 })
    }

    pub fn earth() -> Self {
        Self {
            gravity_mps2: EARTH_GRAVITY_MPS2,
        }
    }

    pub fn gravity_mps2(&self) -> f64 {
        self.gravity_mps2
    }

    pub fn sample_at(&self, inputs: LaunchInputs, time_s: f64) -> TrajectorySample {
        let (vx, vy) = inputs.velocity_components();
        TrajectorySample {
            time_s,
            x_m: vx * time_s,
            y_m: inputs.height_m + (vy * time_s) - (0.5 * self.gravity_mps2 * time_s * time_s),
            vx_mps: vx,
            vy_mps: vy - (self.gravity_mps2 * time_s),
        }
    }

    /// Samples `t = i * dt` over `[0, t_max)` without stopping at the ground.
    pub fn simulate(&self, inputs: LaunchInputs, window: SampleWindow) -> SimResult<Trajectory> {
        inputs.validate()?;
        window.validate()?;

        let samples = (0..window.sample_count())
            .map(|i| self.sample_at(inputs, window.time_at(i)))
            .collect();
        Ok(Trajectory::from_samples(samples))
    }

    /// Horizontal distance covered when the projectile returns to `y = 0`.
    ///
    /// Returns 0 when no real landing time exists. Used as a cheap
    /// reachability probe before running a search.
    pub fn max_range(&self, speed_mps: f64, angle_deg: f64, height_m: f64) -> f64 {
        let theta = angle_deg.to_radians();
        let term = speed_mps * theta.sin();
        let disc = (term * term) + (2.0 * self.gravity_mps2 * height_m);
        if disc < 0.0 {
            return 0.0;
        }
        let t_flight = (term + disc.sqrt()) / self.gravity_mps2;
        speed_mps * theta.cos() * t_flight
    }

    pub fn flight_time_and_range(&self, inputs: LaunchInputs) -> SimResult<(f64, f64)> {
        inputs.validate()?;

        let (_, vy) = inputs.velocity_components();
        let disc = vy * vy + 2.0 * self.gravity_mps2 * inputs.height_m;
        if disc < 0.0 {
            return Err(SimError::invalid(
                "height",
                inputs.height_m,
                format!("no real landing time: vy^2 + 2*g*h is negative ({disc})"),
            ));
        }

        let t_land = (vy + disc.sqrt()) / self.gravity_mps2;
        let landing = self.sample_at(inputs, t_land);
        Ok((t_land, landing.x_m))
    }

    /// Highest point of the flight (launch height for a flat shot).
    pub fn apex_height(&self, inputs: LaunchInputs) -> f64 {
        let (_, vy) = inputs.velocity_components();
        inputs.height_m + (vy.max(0.0) * vy.max(0.0)) / (2.0 * self.gravity_mps2)
    }

    pub fn landing_point(&self, inputs: LaunchInputs) -> SimResult<(f64, f64)> {
        let (t_land, _) = self.flight_time_and_range(inputs)?;
        Ok(self.sample_at(inputs, t_land).position())
    }

    /// Evenly spaced samples from launch to the analytic landing time.
    pub fn sample_flight(&self, inputs: LaunchInputs, samples: usize) -> SimResult<Trajectory> {
        let (t_land, _) = self.flight_time_and_range(inputs)?;
        let sample_count = samples.max(2);
        let points = (0..=sample_count)
            .map(|i| {
                let t = (i as f64 * t_land) / sample_count as f64;
                self.sample_at(inputs, t)
            })
            .collect();
        Ok(Trajectory::from_samples(points))
    }
}
