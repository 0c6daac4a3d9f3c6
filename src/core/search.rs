//! Brute-force launch parameter search.
//!
//! One launch parameter is fixed and the other is swept over an evenly spaced
//! grid. Each candidate flight is scored by its closest sampled approach to
//! the target. Two gates decide feasibility. An analytic range probe runs
//! before any simulation, and an acceptance threshold is applied to the best
//! miss afterwards.

use super::ballistics::{LaunchInputs, TrajectoryModel};
use super::error::{SimResult, ensure_in_range, ensure_positive};
use super::trajectory::{SampleWindow, Trajectory};

pub const DEFAULT_CANDIDATE_COUNT: usize = 15;
pub const MAX_CANDIDATE_COUNT: usize = 10_000;
pub const DEFAULT_VELOCITY_BOUNDS_MPS: (f64, f64) = (5.0, 100.0);
pub const DEFAULT_ANGLE_BOUNDS_DEG: (f64, f64) = (5.0, 85.0);
pub const DEFAULT_PROBE_SPEED_MPS: f64 = 200.0;
pub const DEFAULT_PROBE_ANGLE_DEG: f64 = 45.0;
pub const DEFAULT_ACCEPTANCE_MISS_M: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub x_m: f64,
    pub y_m: f64,
}

impl Target {
    pub fn new(x_m: f64, y_m: f64) -> Self {
        Self { x_m, y_m }
    }

    pub fn distance_to(&self, x_m: f64, y_m: f64) -> f64 {
        (x_m - self.x_m).hypot(y_m - self.y_m)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    FixAngleFindVelocity,
    FixVelocityFindAngle,
}

impl SearchMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::FixAngleFindVelocity => "Fix Angle, Find Velocity",
            Self::FixVelocityFindAngle => "Fix Velocity, Find Angle",
        }
    }

    pub fn candidate_label(self, candidate: f64) -> String {
        match self {
            Self::FixAngleFindVelocity => format!("v0={candidate:.2} m/s"),
            Self::FixVelocityFindAngle => format!("θ={candidate:.1}°"),
        }
    }

    /// Short launch description, free parameter rounded like the attempt log.
    pub fn shot_label(self, inputs: LaunchInputs) -> String {
        match self {
            Self::FixAngleFindVelocity => {
                format!("θ={}°, v0={:.2}", inputs.angle_deg, inputs.speed_mps)
            }
            Self::FixVelocityFindAngle => {
                format!("θ={:.1}°, v0={}", inputs.angle_deg, inputs.speed_mps)
            }
        }
    }

    /// Launch inputs for one candidate of the free parameter.
    pub fn launch_inputs(self, fixed_value: f64, candidate: f64, height_m: f64) -> LaunchInputs {
        match self {
            Self::FixAngleFindVelocity => LaunchInputs::new(fixed_value, candidate, height_m),
            Self::FixVelocityFindAngle => LaunchInputs::new(candidate, fixed_value, height_m),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    pub candidate_count: usize,
    pub velocity_bounds_mps: (f64, f64),
    pub angle_bounds_deg: (f64, f64),
    pub probe_speed_mps: f64,
    pub probe_angle_deg: f64,
    pub acceptance_miss_m: f64,
    pub window: SampleWindow,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidate_count: DEFAULT_CANDIDATE_COUNT,
            velocity_bounds_mps: DEFAULT_VELOCITY_BOUNDS_MPS,
            angle_bounds_deg: DEFAULT_ANGLE_BOUNDS_DEG,
            probe_speed_mps: DEFAULT_PROBE_SPEED_MPS,
            probe_angle_deg: DEFAULT_PROBE_ANGLE_DEG,
            acceptance_miss_m: DEFAULT_ACCEPTANCE_MISS_M,
            window: SampleWindow::default(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> SimResult<()> {
        ensure_in_range(
            "candidate count",
            self.candidate_count as f64,
            1.0,
            MAX_CANDIDATE_COUNT as f64,
        )?;
        let (v_lo, v_hi) = self.velocity_bounds_mps;
        ensure_positive("minimum candidate velocity", v_lo)?;
        ensure_in_range("maximum candidate velocity", v_hi, v_lo, f64::MAX)?;
        let (a_lo, a_hi) = self.angle_bounds_deg;
        ensure_in_range("minimum candidate angle", a_lo, 0.0, 90.0)?;
        ensure_in_range("maximum candidate angle", a_hi, a_lo, 90.0)?;
        ensure_positive("probe velocity", self.probe_speed_mps)?;
        ensure_in_range("probe angle", self.probe_angle_deg, 0.0, 90.0)?;
        ensure_in_range("acceptance threshold", self.acceptance_miss_m, 0.0, f64::MAX)?;
        self.window.validate()
    }

    pub fn candidates(&self, mode: SearchMode) -> Vec<f64> {
        let (lo, hi) = match mode {
            SearchMode::FixAngleFindVelocity => self.velocity_bounds_mps,
            SearchMode::FixVelocityFindAngle => self.angle_bounds_deg,
        };
        linspace(lo, hi, self.candidate_count)
    }
}

/// `count` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Closest sampled approach to `target`, ignoring samples below ground.
///
/// Returns `f64::INFINITY` when no sample has `y >= 0`.
pub fn evaluate_distance(trajectory: &Trajectory, target: Target) -> f64 {
    trajectory
        .above_ground()
        .map(|s| target.distance_to(s.x_m, s.y_m))
        .fold(f64::INFINITY, f64::min)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Attempt {
    pub candidate: f64,
    pub miss_m: f64,
    pub trajectory: Trajectory,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BestShot {
    pub inputs: LaunchInputs,
    pub trajectory: Trajectory,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
    Hit,
    /// The range probe could not reach `target.x`; nothing was simulated.
    OutOfRange { max_range_m: f64 },
    /// Every candidate missed by more than the acceptance threshold.
    MissTooLarge,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub mode: SearchMode,
    pub verdict: Verdict,
    pub best: Option<BestShot>,
    pub miss_distance_m: f64,
    pub attempts: Vec<Attempt>,
}

impl SearchResult {
    pub fn feasible(&self) -> bool {
        self.verdict == Verdict::Hit
    }

    pub fn best_parameters(&self) -> Option<LaunchInputs> {
        self.best.as_ref().map(|best| best.inputs)
    }

    pub fn best_trajectory(&self) -> Option<&Trajectory> {
        self.best.as_ref().map(|best| &best.trajectory)
    }

    /// `(candidate, miss)` pairs in evaluation order.
    pub fn attempt_log(&self) -> Vec<(f64, f64)> {
        self.attempts
            .iter()
            .map(|attempt| (attempt.candidate, attempt.miss_m))
            .collect()
    }
}

pub struct TargetSearch {
    model: TrajectoryModel,
    config: SearchConfig,
}

impl TargetSearch {
    pub fn new(model: TrajectoryModel, config: SearchConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { model, config })
    }

    pub fn model(&self) -> &TrajectoryModel {
        &self.model
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn validate_request(
        &self,
        mode: SearchMode,
        fixed_value: f64,
        height_m: f64,
        target: Target,
    ) -> SimResult<()> {
        match mode {
            SearchMode::FixAngleFindVelocity => {
                ensure_in_range("fixed angle", fixed_value, 0.0, 90.0)?;
            }
            SearchMode::FixVelocityFindAngle => {
                ensure_positive("fixed velocity", fixed_value)?;
            }
        }
        ensure_in_range("height", height_m, 0.0, f64::MAX)?;
        ensure_in_range("target x", target.x_m, f64::MIN, f64::MAX)?;
        ensure_in_range("target y", target.y_m, f64::MIN, f64::MAX)?;
        Ok(())
    }

    /// Best-case reach used to reject targets before any simulation runs.
    pub fn probe_range(&self, mode: SearchMode, fixed_value: f64, height_m: f64) -> f64 {
        match mode {
            SearchMode::FixAngleFindVelocity => {
                self.model
                    .max_range(self.config.probe_speed_mps, fixed_value, height_m)
            }
            SearchMode::FixVelocityFindAngle => {
                self.model
                    .max_range(fixed_value, self.config.probe_angle_deg, height_m)
            }
        }
    }

    pub fn search(
        &self,
        mode: SearchMode,
        fixed_value: f64,
        height_m: f64,
        target: Target,
    ) -> SimResult<SearchResult> {
        self.validate_request(mode, fixed_value, height_m, target)?;

        let max_range_m = self.probe_range(mode, fixed_value, height_m);
        if target.x_m > max_range_m {
            return Ok(SearchResult {
                mode,
                verdict: Verdict::OutOfRange { max_range_m },
                best: None,
                miss_distance_m: f64::INFINITY,
                attempts: Vec::new(),
            });
        }

        let mut attempts = Vec::with_capacity(self.config.candidate_count);
        let mut best_idx: Option<usize> = None;
        let mut best_miss = f64::INFINITY;

        for candidate in self.config.candidates(mode) {
            let inputs = mode.launch_inputs(fixed_value, candidate, height_m);
            let trajectory = self.model.simulate(inputs, self.config.window)?;
            let miss_m = evaluate_distance(&trajectory, target);
            if miss_m < best_miss {
                best_miss = miss_m;
                best_idx = Some(attempts.len());
            }
            attempts.push(Attempt {
                candidate,
                miss_m,
                trajectory,
            });
        }

        let accepted = best_idx.filter(|_| best_miss <= self.config.acceptance_miss_m);
        let (verdict, best) = match accepted {
            Some(idx) => {
                let attempt = &attempts[idx];
                let best = BestShot {
                    inputs: mode.launch_inputs(fixed_value, attempt.candidate, height_m),
                    trajectory: attempt.trajectory.clone(),
                };
                (Verdict::Hit, Some(best))
            }
            None => (Verdict::MissTooLarge, None),
        };

        Ok(SearchResult {
            mode,
            verdict,
            best,
            miss_distance_m: best_miss,
            attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        SearchConfig, SearchMode, Target, TargetSearch, Verdict, evaluate_distance, linspace,
    };
    use crate::core::ballistics::TrajectoryModel;
    use crate::core::trajectory::{SampleWindow, Trajectory, TrajectorySample};

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn point(x_m: f64, y_m: f64) -> TrajectorySample {
        TrajectorySample {
            time_s: 0.0,
            x_m,
            y_m,
            vx_mps: 0.0,
            vy_mps: 0.0,
        }
    }

    fn default_search() -> TargetSearch {
        TargetSearch::new(TrajectoryModel::earth(), SearchConfig::default()).unwrap()
    }

    #[test]
    fn linspace_includes_both_endpoints() {
        let values = linspace(5.0, 100.0, 15);
        assert_eq!(values.len(), 15);
        assert_eq!(values[0], 5.0);
        assert_close(values[14], 100.0, 1e-12);
        assert_close(values[1] - values[0], 95.0 / 14.0, 1e-12);
        assert_eq!(linspace(5.0, 85.0, 1), vec![5.0]);
        assert!(linspace(5.0, 85.0, 0).is_empty());
    }

    #[test]
    fn distance_ignores_samples_below_ground() {
        let trajectory = Trajectory::from_samples(vec![point(10.0, -0.5), point(0.0, 4.0)]);
        let miss = evaluate_distance(&trajectory, Target::new(10.0, 0.0));
        assert_close(miss, 10.0_f64.hypot(4.0), 1e-12);
    }

    #[test]
    fn distance_is_infinite_when_fully_underground() {
        let trajectory = Trajectory::from_samples(vec![point(0.0, -0.1), point(1.0, -3.0)]);
        assert_eq!(
            evaluate_distance(&trajectory, Target::new(0.0, 0.0)),
            f64::INFINITY
        );
        assert_eq!(
            evaluate_distance(&Trajectory::default(), Target::new(0.0, 0.0)),
            f64::INFINITY
        );
    }

    #[test]
    fn ground_level_sample_counts() {
        let trajectory = Trajectory::from_samples(vec![point(0.0, 0.0)]);
        assert_eq!(evaluate_distance(&trajectory, Target::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn out_of_range_target_skips_simulation() {
        let result = default_search()
            .search(SearchMode::FixAngleFindVelocity, 45.0, 0.0, Target::new(5000.0, 0.0))
            .unwrap();

        assert!(!result.feasible());
        assert!(result.attempts.is_empty());
        assert!(result.best.is_none());
        match result.verdict {
            // 200 m/s at 45 degrees reaches about 4077 m.
            Verdict::OutOfRange { max_range_m } => assert!(max_range_m < 5000.0),
            other => panic!("unexpected verdict {other:?}"),
        }
    }

    #[test]
    fn fixed_velocity_probe_uses_best_angle() {
        let search = default_search();
        // 10 m/s reaches about 10.19 m on flat ground at 45 degrees.
        let result = search
            .search(SearchMode::FixVelocityFindAngle, 10.0, 0.0, Target::new(11.0, 0.0))
            .unwrap();
        assert!(matches!(result.verdict, Verdict::OutOfRange { .. }));
    }

    #[test]
    fn unreachable_height_reports_miss_too_large() {
        let result = default_search()
            .search(SearchMode::FixVelocityFindAngle, 10.0, 0.0, Target::new(2.0, 90.0))
            .unwrap();

        assert_eq!(result.verdict, Verdict::MissTooLarge);
        assert_eq!(result.attempts.len(), 15);
        assert!(result.best.is_none());
        assert!(result.miss_distance_m > 1.0);
        assert!(result.miss_distance_m.is_finite());
    }

    #[test]
    fn target_on_candidate_sample_is_found_exactly() {
        let search = default_search();
        let candidates = search.config().candidates(SearchMode::FixVelocityFindAngle);
        let chosen_angle = candidates[6];
        let inputs = SearchMode::FixVelocityFindAngle.launch_inputs(30.0, chosen_angle, 2.0);
        let trajectory = search
            .model()
            .simulate(inputs, search.config().window)
            .unwrap();
        let on_path = trajectory.samples()[20];
        assert!(on_path.y_m >= 0.0);

        let result = search
            .search(
                SearchMode::FixVelocityFindAngle,
                30.0,
                2.0,
                Target::new(on_path.x_m, on_path.y_m),
            )
            .unwrap();

        assert!(result.feasible());
        assert_close(result.miss_distance_m, 0.0, 1e-9);
        let best = result.best_parameters().expect("best shot");
        assert_eq!(best.angle_deg, chosen_angle);
        assert_eq!(best.speed_mps, 30.0);
        assert_eq!(result.best_trajectory(), Some(&trajectory));
    }

    #[test]
    fn attempt_log_follows_candidate_order() {
        let search = default_search();
        let result = search
            .search(SearchMode::FixAngleFindVelocity, 45.0, 1.0, Target::new(30.0, 5.0))
            .unwrap();
        let log = result.attempt_log();
        let expected = search.config().candidates(SearchMode::FixAngleFindVelocity);
        assert_eq!(log.len(), expected.len());
        for ((candidate, miss), want) in log.iter().zip(expected) {
            assert_eq!(*candidate, want);
            assert!(*miss >= result.miss_distance_m);
        }
    }

    #[test]
    fn ties_keep_the_first_candidate() {
        // Every straight-up launch starts on the target, so all candidates miss by zero.
        let search = default_search();
        let result = search
            .search(SearchMode::FixAngleFindVelocity, 90.0, 0.0, Target::new(0.0, 0.0))
            .unwrap();
        assert!(result.feasible());
        assert_eq!(result.attempts.len(), 15);
        assert!(result.attempts.iter().all(|attempt| attempt.miss_m == 0.0));
        assert_eq!(result.best_parameters().unwrap().speed_mps, 5.0);
    }

    #[test]
    fn threshold_is_configurable() {
        let strict = SearchConfig {
            acceptance_miss_m: 0.0,
            ..SearchConfig::default()
        };
        let search = TargetSearch::new(TrajectoryModel::earth(), strict).unwrap();
        let result = search
            .search(SearchMode::FixAngleFindVelocity, 45.0, 1.0, Target::new(30.3, 5.1))
            .unwrap();
        assert_eq!(result.verdict, Verdict::MissTooLarge);
        assert_eq!(result.attempts.len(), 15);
    }

    #[test]
    fn miss_equal_to_threshold_is_accepted() {
        let exact = SearchConfig {
            acceptance_miss_m: 0.0,
            ..SearchConfig::default()
        };
        let search = TargetSearch::new(TrajectoryModel::earth(), exact).unwrap();
        let result = search
            .search(SearchMode::FixAngleFindVelocity, 90.0, 0.0, Target::new(0.0, 0.0))
            .unwrap();
        assert_eq!(result.miss_distance_m, 0.0);
        assert_eq!(result.verdict, Verdict::Hit);
        assert!(result.best.is_some());
    }

    #[test]
    fn rejects_invalid_requests() {
        let search = default_search();
        let err = search
            .search(SearchMode::FixAngleFindVelocity, 95.0, 0.0, Target::new(10.0, 0.0))
            .expect_err("angle above 90 must fail");
        assert!(err.is_invalid_parameter());

        let err = search
            .search(SearchMode::FixVelocityFindAngle, -3.0, 0.0, Target::new(10.0, 0.0))
            .expect_err("negative velocity must fail");
        assert!(err.is_invalid_parameter());

        let err = search
            .search(SearchMode::FixVelocityFindAngle, 20.0, 0.0, Target::new(f64::NAN, 0.0))
            .expect_err("NaN target must fail");
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SearchConfig {
            candidate_count: 0,
            ..SearchConfig::default()
        };
        assert!(TargetSearch::new(TrajectoryModel::earth(), config).is_err());

        let config = SearchConfig {
            candidate_count: usize::MAX,
            ..SearchConfig::default()
        };
        let err = TargetSearch::new(TrajectoryModel::earth(), config)
            .err()
            .expect("oversized grid must fail");
        assert!(err.is_invalid_parameter());

        let config = SearchConfig {
            window: SampleWindow {
                t_max_s: 10.0,
                dt_s: 1e-300,
            },
            ..SearchConfig::default()
        };
        assert!(TargetSearch::new(TrajectoryModel::earth(), config).is_err());

        let config = SearchConfig {
            angle_bounds_deg: (60.0, 30.0),
            ..SearchConfig::default()
        };
        assert!(TargetSearch::new(TrajectoryModel::earth(), config).is_err());
    }
}
