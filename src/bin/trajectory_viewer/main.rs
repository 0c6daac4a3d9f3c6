use std::env;

use macroquad::prelude::Conf;
use projectile_search::core::error::{SimError, SimResult};
use projectile_search::core::{LaunchInputs, TrajectoryModel};
use projectile_search::logging;

mod app;
mod constants;
mod model;
mod render;

const DEFAULT_ANGLE_DEG: f64 = 45.0;
const DEFAULT_SPEED_MPS: f64 = 20.0;
const DEFAULT_HEIGHT_M: f64 = 0.0;

fn parse_value(args: &[String], idx: usize, label: &str, default: f64) -> SimResult<f64> {
    match args.get(idx) {
        Some(raw) => raw.parse::<f64>().map_err(|_| {
            SimError::Usage(format!("Invalid {label}: '{raw}'. Expected a number."))
        }),
        None => Ok(default),
    }
}

fn parse_launch(args: &[String]) -> SimResult<LaunchInputs> {
    if args.len() > 4 {
        return Err(SimError::Usage(
            "Expected at most 3 arguments: [angle_deg] [velocity_mps] [height_m].".to_string(),
        ));
    }
    let inputs = LaunchInputs::new(
        parse_value(args, 1, "angle", DEFAULT_ANGLE_DEG)?,
        parse_value(args, 2, "velocity", DEFAULT_SPEED_MPS)?,
        parse_value(args, 3, "height", DEFAULT_HEIGHT_M)?,
    );
    inputs.validate()?;
    Ok(inputs)
}

fn window_conf() -> Conf {
    app::window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let model = TrajectoryModel::earth();
    let flight = parse_launch(&args).and_then(|inputs| {
        model
            .sample_flight(inputs, constants::ANIMATION_FRAMES - 1)
            .map(|flight| (inputs, flight))
    });

    match flight {
        Ok((inputs, flight)) => {
            logging::info(&format!(
                "Animating {} frames for θ={}°, v0={} m/s, h0={} m",
                flight.len(),
                inputs.angle_deg,
                inputs.speed_mps,
                inputs.height_m
            ));
            app::run(inputs, model, flight).await;
        }
        Err(err) => {
            logging::error(&err.to_string());
            println!("Usage: trajectory_viewer [angle_deg] [velocity_mps] [height_m]");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_launch;
    use crate::app::world_window;
    use projectile_search::core::{LaunchInputs, TrajectoryModel};

    fn args(line: &str) -> Vec<String> {
        std::iter::once("trajectory_viewer")
            .chain(line.split_whitespace())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn defaults_to_reference_shot() {
        assert_eq!(
            parse_launch(&args("")).unwrap(),
            LaunchInputs::new(45.0, 20.0, 0.0)
        );
        assert_eq!(
            parse_launch(&args("30 12.5 2")).unwrap(),
            LaunchInputs::new(30.0, 12.5, 2.0)
        );
    }

    #[test]
    fn rejects_invalid_launch() {
        assert!(parse_launch(&args("120 20")).is_err());
        assert!(parse_launch(&args("45 fast")).is_err());
        assert!(parse_launch(&args("45 20 1 9")).is_err());
    }

    #[test]
    fn window_covers_whole_flight() {
        let model = TrajectoryModel::earth();
        let flight = model
            .sample_flight(LaunchInputs::new(45.0, 20.0, 0.0), 99)
            .unwrap();
        assert_eq!(flight.len(), 100);
        let (max_x, max_y) = world_window(&flight);
        assert!(max_x as f64 >= model.max_range(20.0, 45.0, 0.0));
        assert!(max_y as f64 >= model.apex_height(LaunchInputs::new(45.0, 20.0, 0.0)));
    }
}
