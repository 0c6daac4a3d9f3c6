//! Synthetic landing-point samples for fitting an inverse launch model.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::ballistics::{LaunchInputs, TrajectoryModel};
use super::error::SimResult;

pub const DEFAULT_ROW_COUNT: usize = 5000;
pub const DEFAULT_SEED: u64 = 42;
pub const DATASET_ANGLE_RANGE_DEG: Range<f64> = 10.0..80.0;
pub const DATASET_SPEED_RANGE_MPS: Range<f64> = 5.0..50.0;
pub const CSV_HEADER: &str = "theta_deg,v0,X,Y";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DatasetRow {
    pub theta_deg: f64,
    pub v0_mps: f64,
    pub final_x_m: f64,
    pub final_y_m: f64,
}

/// Draws `count` random ground-level launches and records where each lands.
pub fn generate_rows(model: &TrajectoryModel, count: usize, seed: u64) -> SimResult<Vec<DatasetRow>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(count);
    for _ in 0..count {
        let theta_deg = rng.gen_range(DATASET_ANGLE_RANGE_DEG);
        let v0_mps = rng.gen_range(DATASET_SPEED_RANGE_MPS);
        let (final_x_m, final_y_m) =
            model.landing_point(LaunchInputs::new(theta_deg, v0_mps, 0.0))?;
        rows.push(DatasetRow {
            theta_deg,
            v0_mps,
            final_x_m,
            final_y_m,
        });
    }
    Ok(rows)
}

pub fn write_csv<W: Write>(writer: &mut W, rows: &[DatasetRow]) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{}",
            row.theta_deg, row.v0_mps, row.final_x_m, row.final_y_m
        )?;
    }
    writer.flush()
}

pub fn write_csv_file(path: &str, rows: &[DatasetRow]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_csv(&mut writer, rows)
}
