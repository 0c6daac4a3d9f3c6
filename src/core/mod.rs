pub mod ballistics;
pub mod dataset;
pub mod error;
pub mod search;
pub mod trajectory;
pub mod window;

pub use ballistics::{EARTH_GRAVITY_MPS2, LaunchInputs, TrajectoryModel};
pub use error::{SimError, SimResult};
pub use search::{SearchConfig, SearchMode, SearchResult, Target, TargetSearch, Verdict};
pub use trajectory::{SampleWindow, Trajectory, TrajectorySample};
