use super::error::{SimResult, ensure_in_range, ensure_positive};

pub const DEFAULT_T_MAX_S: f64 = 10.0;
pub const DEFAULT_DT_S: f64 = 0.05;
pub const MAX_SAMPLE_COUNT: usize = 1_000_000;

/// Fixed sampling horizon for `TrajectoryModel::simulate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleWindow {
    pub t_max_s: f64,
    pub dt_s: f64,
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self {
            t_max_s: DEFAULT_T_MAX_S,
            dt_s: DEFAULT_DT_S,
        }
    }
}

impl SampleWindow {
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive("t_max", self.t_max_s)?;
        ensure_positive("dt", self.dt_s)?;
        ensure_in_range(
            "sample count",
            (self.t_max_s / self.dt_s).ceil(),
            1.0,
            MAX_SAMPLE_COUNT as f64,
        )?;
        Ok(())
    }

    /// Number of times `i * dt` that fall inside the half-open `[0, t_max)`.
    pub fn sample_count(&self) -> usize {
        (self.t_max_s / self.dt_s).ceil() as usize
    }

    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.dt_s
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub x_m: f64,
    pub y_m: f64,
    pub vx_mps: f64,
    pub vy_mps: f64,
}

impl TrajectorySample {
    pub fn position(&self) -> (f64, f64) {
        (self.x_m, self.y_m)
    }

    pub fn is_above_ground(&self) -> bool {
        self.y_m >= 0.0
    }
}

/// Time-ordered samples of one simulated flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn from_samples(samples: Vec<TrajectorySample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&TrajectorySample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(TrajectorySample::position).collect()
    }

    pub fn above_ground(&self) -> impl Iterator<Item = &TrajectorySample> {
        self.samples.iter().filter(|s| s.is_above_ground())
    }

    /// Highest sampled `y`, or `None` for an empty trajectory.
    pub fn peak(&self) -> Option<&TrajectorySample> {
        self.samples
            .iter()
            .max_by(|a, b| a.y_m.total_cmp(&b.y_m))
    }
}
