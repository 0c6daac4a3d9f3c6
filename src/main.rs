use std::env;
use std::io::{self, Write};

use projectile_search::core::error::{SimError, SimResult, ensure_in_range};
use projectile_search::core::window::{AxisWindow, DEFAULT_PLOT_SCALE_M};
use projectile_search::core::{
    LaunchInputs, SampleWindow, SearchConfig, SearchMode, SearchResult, Target, TargetSearch,
    TrajectoryModel, Verdict,
};
use projectile_search::logging;
use projectile_search::plot::{render_search, render_trajectory, timestamped_plot_path};

// Form limits for the manual simulation.
const MANUAL_ANGLE_DEG: (f64, f64) = (0.0, 90.0);
const MANUAL_SPEED_MPS: (f64, f64) = (1.0, 100.0);
// Form limits for the fixed parameter of a search.
const FIXED_ANGLE_DEG: (f64, f64) = (1.0, 89.0);
const FIXED_SPEED_MPS: (f64, f64) = (5.0, 100.0);
const HEIGHT_M: (f64, f64) = (0.0, 50.0);
const TARGET_X_M: (f64, f64) = (0.0, 200.0);
const TARGET_Y_M: (f64, f64) = (0.0, 100.0);

#[derive(Clone, Debug, PartialEq)]
enum PlotRequest {
    Timestamped,
    Path(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Options {
    gravity_mps2: Option<f64>,
    dt_s: Option<f64>,
    t_max_s: Option<f64>,
    candidates: Option<usize>,
    threshold_m: Option<f64>,
    scale_m: Option<f64>,
    fit_axes: bool,
    plot: Option<PlotRequest>,
}

impl Options {
    fn model(&self) -> SimResult<TrajectoryModel> {
        match self.gravity_mps2 {
            Some(g) => TrajectoryModel::new(g),
            None => Ok(TrajectoryModel::earth()),
        }
    }

    fn window(&self) -> SampleWindow {
        let defaults = SampleWindow::default();
        SampleWindow {
            t_max_s: self.t_max_s.unwrap_or(defaults.t_max_s),
            dt_s: self.dt_s.unwrap_or(defaults.dt_s),
        }
    }

    fn search_config(&self) -> SearchConfig {
        let defaults = SearchConfig::default();
        SearchConfig {
            candidate_count: self.candidates.unwrap_or(defaults.candidate_count),
            acceptance_miss_m: self.threshold_m.unwrap_or(defaults.acceptance_miss_m),
            window: self.window(),
            ..defaults
        }
    }

    fn axis_window(&self) -> SimResult<AxisWindow> {
        if self.fit_axes {
            return Ok(AxisWindow::FitRatio);
        }
        AxisWindow::square(self.scale_m.unwrap_or(DEFAULT_PLOT_SCALE_M))
    }

    fn plot_path(&self, prefix: &str) -> Option<String> {
        self.plot.as_ref().map(|request| match request {
            PlotRequest::Timestamped => timestamped_plot_path(prefix),
            PlotRequest::Path(path) => path.clone(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Command {
    Help,
    Interactive,
    Simulate(LaunchInputs, Options),
    Search {
        mode: SearchMode,
        fixed_value: f64,
        height_m: f64,
        target: Target,
        options: Options,
    },
}

fn parse_f64(value: &str, label: &str) -> SimResult<f64> {
    value
        .parse::<f64>()
        .map_err(|_| SimError::Usage(format!("Invalid {label}: '{value}'. Expected a number.")))
}

fn read_f64(prompt: &str) -> SimResult<f64> {
    loop {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = io::stdin().read_line(&mut line)?;

        if bytes == 0 {
            return Err(SimError::Usage("Input ended unexpectedly (EOF).".to_string()));
        }

        match line.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => eprintln!("Please enter a valid number (e.g., 45 or 12.5)."),
        }
    }
}

fn option_value<'a>(name: &str, value: Option<&'a String>) -> SimResult<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| SimError::Usage(format!("Missing value for {name}.")))
}

fn parse_options(args: &[String]) -> SimResult<Options> {
    let mut options = Options::default();
    let mut iter = args.iter().peekable();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--gravity" => {
                options.gravity_mps2 = Some(parse_f64(option_value(flag, iter.next())?, "gravity")?);
            }
            "--dt" => options.dt_s = Some(parse_f64(option_value(flag, iter.next())?, "dt")?),
            "--t-max" => {
                options.t_max_s = Some(parse_f64(option_value(flag, iter.next())?, "t-max")?);
            }
            "--candidates" => {
                let raw = option_value(flag, iter.next())?;
                let count = raw.parse::<usize>().map_err(|_| {
                    SimError::Usage(format!("Invalid candidates: '{raw}'. Expected a count."))
                })?;
                options.candidates = Some(count);
            }
            "--threshold" => {
                options.threshold_m =
                    Some(parse_f64(option_value(flag, iter.next())?, "threshold")?);
            }
            "--scale" => match option_value(flag, iter.next())? {
                "fit" => options.fit_axes = true,
                raw => options.scale_m = Some(parse_f64(raw, "scale")?),
            },
            "--plot" => {
                let request = match iter.next_if(|next| !next.starts_with("--")) {
                    Some(path) => PlotRequest::Path(path.clone()),
                    None => PlotRequest::Timestamped,
                };
                options.plot = Some(request);
            }
            other => return Err(SimError::Usage(format!("Unknown option '{other}'."))),
        }
    }
    Ok(options)
}

fn split_positionals(args: &[String]) -> (&[String], &[String]) {
    let split = args
        .iter()
        .position(|a| a.starts_with("--"))
        .unwrap_or(args.len());
    args.split_at(split)
}

fn expect_positionals<'a>(
    positionals: &'a [String],
    expected: usize,
    usage: &str,
) -> SimResult<&'a [String]> {
    if positionals.len() != expected {
        return Err(SimError::Usage(format!(
            "Expected exactly {expected} arguments: {usage}."
        )));
    }
    Ok(positionals)
}

fn parse_command(args: &[String]) -> SimResult<Command> {
    if args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(Command::Help);
    }

    let Some(command) = args.get(1) else {
        return Ok(Command::Interactive);
    };

    match command.as_str() {
        "simulate" => {
            let (positionals, flags) = split_positionals(&args[2..]);
            let values = expect_positionals(
                positionals,
                3,
                "<angle_deg> <velocity_mps> <height_m>",
            )?;
            Ok(Command::Simulate(
                LaunchInputs::new(
                    parse_f64(&values[0], "angle")?,
                    parse_f64(&values[1], "velocity")?,
                    parse_f64(&values[2], "height")?,
                ),
                parse_options(flags)?,
            ))
        }
        "search" => {
            let (positionals, flags) = split_positionals(&args[2..]);
            let Some(kind) = positionals.first() else {
                return Err(SimError::Usage(
                    "Expected a search kind: 'velocity' or 'angle'.".to_string(),
                ));
            };
            let (mode, fixed_label) = match kind.as_str() {
                "velocity" => (SearchMode::FixAngleFindVelocity, "angle"),
                "angle" => (SearchMode::FixVelocityFindAngle, "velocity"),
                other => {
                    return Err(SimError::Usage(format!(
                        "Unknown search kind '{other}'. Expected 'velocity' or 'angle'."
                    )));
                }
            };
            let values = expect_positionals(
                &positionals[1..],
                4,
                "<fixed_value> <height_m> <target_x> <target_y>",
            )?;
            Ok(Command::Search {
                mode,
                fixed_value: parse_f64(&values[0], fixed_label)?,
                height_m: parse_f64(&values[1], "height")?,
                target: Target::new(
                    parse_f64(&values[2], "target x")?,
                    parse_f64(&values[3], "target y")?,
                ),
                options: parse_options(flags)?,
            })
        }
        other => Err(SimError::Usage(format!("Unknown command '{other}'."))),
    }
}

fn validate_manual(inputs: LaunchInputs) -> SimResult<()> {
    ensure_in_range("angle", inputs.angle_deg, MANUAL_ANGLE_DEG.0, MANUAL_ANGLE_DEG.1)?;
    ensure_in_range("velocity", inputs.speed_mps, MANUAL_SPEED_MPS.0, MANUAL_SPEED_MPS.1)?;
    ensure_in_range("height", inputs.height_m, HEIGHT_M.0, HEIGHT_M.1)?;
    Ok(())
}

fn validate_search(mode: SearchMode, fixed_value: f64, height_m: f64, target: Target) -> SimResult<()> {
    match mode {
        SearchMode::FixAngleFindVelocity => {
            ensure_in_range("angle", fixed_value, FIXED_ANGLE_DEG.0, FIXED_ANGLE_DEG.1)?;
        }
        SearchMode::FixVelocityFindAngle => {
            ensure_in_range("velocity", fixed_value, FIXED_SPEED_MPS.0, FIXED_SPEED_MPS.1)?;
        }
    }
    ensure_in_range("height", height_m, HEIGHT_M.0, HEIGHT_M.1)?;
    ensure_in_range("target x", target.x_m, TARGET_X_M.0, TARGET_X_M.1)?;
    ensure_in_range("target y", target.y_m, TARGET_Y_M.0, TARGET_Y_M.1)?;
    Ok(())
}

fn format_miss(miss_m: f64) -> String {
    if miss_m.is_finite() {
        format!("{miss_m:.2}")
    } else {
        "inf".to_string()
    }
}

fn run_simulation(inputs: LaunchInputs, options: &Options) -> SimResult<()> {
    validate_manual(inputs)?;
    let model = options.model()?;
    let window = options.window();
    let axis = options.axis_window()?;

    let trajectory = model.simulate(inputs, window)?;
    let (time, distance) = model.flight_time_and_range(inputs)?;

    println!("\nTime of flight: {:.4} s", time);
    println!("Horizontal distance: {:.4} m", distance);
    println!("Peak height: {:.4} m", model.apex_height(inputs));
    println!(
        "Samples: {} (dt = {} s, t_max = {} s)",
        trajectory.len(),
        window.dt_s,
        window.t_max_s
    );

    if let Some(path) = options.plot_path("trajectory") {
        let label = format!("θ={}°, v0={} m/s", inputs.angle_deg, inputs.speed_mps);
        render_trajectory(&path, &trajectory, &label, axis)?;
        logging::info(&format!("Wrote trajectory plot to {path}"));
    }

    Ok(())
}

fn report_search(result: &SearchResult) {
    for (i, attempt) in result.attempts.iter().enumerate() {
        println!(
            "Attempt {}: {}, miss={}",
            i + 1,
            result.mode.candidate_label(attempt.candidate),
            format_miss(attempt.miss_m)
        );
    }

    match (&result.verdict, result.best_parameters()) {
        (Verdict::Hit, Some(best)) => println!(
            "Best result: {}, miss={:.2} m",
            result.mode.shot_label(best),
            result.miss_distance_m
        ),
        (verdict, _) => {
            if let Verdict::OutOfRange { max_range_m } = verdict {
                logging::warn(&format!(
                    "Target lies beyond the best-case range of {max_range_m:.2} m; search skipped"
                ));
            } else {
                logging::warn(&format!(
                    "Closest attempt missed by {} m",
                    format_miss(result.miss_distance_m)
                ));
            }
            println!("Impossible to reach target with given parameters.");
        }
    }
}

fn run_search(
    mode: SearchMode,
    fixed_value: f64,
    height_m: f64,
    target: Target,
    options: &Options,
) -> SimResult<()> {
    validate_search(mode, fixed_value, height_m, target)?;
    let axis = options.axis_window()?;
    let search = TargetSearch::new(options.model()?, options.search_config())?;

    logging::info(&format!(
        "Searching ({}) with {} candidates toward target ({}, {})",
        mode.label(),
        search.config().candidate_count,
        target.x_m,
        target.y_m
    ));
    let result = search.search(mode, fixed_value, height_m, target)?;
    report_search(&result);

    if let Some(path) = options.plot_path("search") {
        render_search(&path, &result, target, axis)?;
        logging::info(&format!("Wrote search plot to {path}"));
    }

    Ok(())
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program}");
    println!("  {program} simulate <angle_deg> <velocity_mps> <height_m> [options]");
    println!("  {program} search velocity <angle_deg> <height_m> <target_x> <target_y> [options]");
    println!("  {program} search angle <velocity_mps> <height_m> <target_x> <target_y> [options]");
    println!();
    println!("Options:");
    println!("  --gravity <m/s^2>   gravitational acceleration (default 9.81)");
    println!("  --dt <s>            sampling step (default 0.05)");
    println!("  --t-max <s>         sampling horizon (default 10)");
    println!("  --candidates <n>    search grid size (default 15)");
    println!("  --threshold <m>     largest accepted miss (default 1.0)");
    println!("  --scale <m|fit>     plot axis extent, 10-200 (default 50), or fit to data");
    println!("  --plot [path]       render a plot (.svg or .png)");
    println!();
    println!("Examples:");
    println!("  {program} simulate 45 20 1 --plot");
    println!("  {program} search velocity 45 1 30 5");
    println!("  {program} search angle 20 1 30 5 --plot search.png");
}

fn run() -> SimResult<()> {
    let args: Vec<String> = env::args().collect();

    match parse_command(&args)? {
        Command::Help => {
            print_usage(&args[0]);
            Ok(())
        }
        Command::Interactive => {
            let inputs = LaunchInputs::new(
                read_f64("Angle (degrees): ")?,
                read_f64("Velocity (m/s): ")?,
                read_f64("Height (m): ")?,
            );
            run_simulation(inputs, &Options::default())
        }
        Command::Simulate(inputs, options) => run_simulation(inputs, &options),
        Command::Search {
            mode,
            fixed_value,
            height_m,
            target,
            options,
        } => run_search(mode, fixed_value, height_m, target, &options),
    }
}

fn main() {
    if let Err(err) = run() {
        logging::error(&err.to_string());
        print_usage("cargo run --");
        std::process::exit(1);
    }
}
