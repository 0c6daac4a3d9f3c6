//! Static trajectory plots rendered with plotters.
//!
//! The output format follows the file extension: `.svg` writes vector output,
//! anything else goes through the bitmap backend (PNG for `.png`).

use std::path::Path;

use chrono::Local;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::core::error::{SimError, SimResult};
use crate::core::search::{SearchResult, Target};
use crate::core::trajectory::Trajectory;
use crate::core::window::AxisWindow;

pub const PLOT_SIZE_PX: (u32, u32) = (960, 720);

const ATTEMPT_COLOR: RGBColor = RGBColor(128, 128, 128);
const BEST_COLOR: RGBColor = RGBColor(31, 88, 214);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Bitmap,
}

pub fn output_format(path: &str) -> OutputFormat {
    let is_svg = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        OutputFormat::Svg
    } else {
        OutputFormat::Bitmap
    }
}

pub fn timestamped_plot_path(prefix: &str) -> String {
    format!("{prefix}_{}.svg", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Splits a polyline into the runs that stay inside `[0, x_span] x [0, y_span]`.
pub fn visible_runs(points: &[(f64, f64)], x_span: f64, y_span: f64) -> Vec<Vec<(f64, f64)>> {
    let inside = |&(x, y): &(f64, f64)| (0.0..=x_span).contains(&x) && (0.0..=y_span).contains(&y);
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in points {
        if inside(point) {
            current.push(*point);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn raw_extent<'a>(trajectories: impl Iterator<Item = &'a Trajectory>) -> (f64, f64) {
    trajectories
        .flat_map(|t| t.above_ground())
        .fold((0.0_f64, 0.0_f64), |(max_x, max_y), s| (max_x.max(s.x_m), max_y.max(s.y_m)))
}

trait PlotScene {
    fn title(&self) -> String;

    fn spans(&self) -> (f64, f64);

    fn draw_content<DB: DrawingBackend>(
        &self,
        chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        x_span: f64,
        y_span: f64,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>;

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;
        let (x_span, y_span) = self.spans();

        let mut chart = ChartBuilder::on(root)
            .caption(self.title(), ("sans-serif", 22))
            .margin(16)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..x_span, 0f64..y_span)?;
        chart
            .configure_mesh()
            .x_desc("X (m)")
            .y_desc("Y (m)")
            .draw()?;
        chart.draw_series(LineSeries::new(
            [(0.0, 0.0), (x_span, 0.0)],
            BLACK.stroke_width(1),
        ))?;

        self.draw_content(&mut chart, x_span, y_span)?;

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        root.present()
    }
}

fn draw_labeled_path<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    trajectory: &Trajectory,
    label: &str,
    x_span: f64,
    y_span: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let runs = visible_runs(&trajectory.points(), x_span, y_span);
    for (idx, run) in runs.into_iter().enumerate() {
        let series = chart.draw_series(LineSeries::new(run, BEST_COLOR.stroke_width(2)))?;
        if idx == 0 {
            series
                .label(label)
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BEST_COLOR));
        }
    }
    Ok(())
}

struct TrajectoryScene<'a> {
    trajectory: &'a Trajectory,
    label: &'a str,
    window: AxisWindow,
}

impl PlotScene for TrajectoryScene<'_> {
    fn title(&self) -> String {
        "Projectile Motion (Manual Mode)".to_string()
    }

    fn spans(&self) -> (f64, f64) {
        let (raw_x, raw_y) = raw_extent(std::iter::once(self.trajectory));
        self.window.spans(raw_x, raw_y)
    }

    fn draw_content<DB: DrawingBackend>(
        &self,
        chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        x_span: f64,
        y_span: f64,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        draw_labeled_path(chart, self.trajectory, self.label, x_span, y_span)
    }
}

struct SearchScene<'a> {
    result: &'a SearchResult,
    target: Target,
    window: AxisWindow,
}

impl PlotScene for SearchScene<'_> {
    fn title(&self) -> String {
        format!("Projectile Motion (Search - {})", self.result.mode.label())
    }

    fn spans(&self) -> (f64, f64) {
        let (raw_x, raw_y) = raw_extent(self.result.attempts.iter().map(|a| &a.trajectory));
        self.window
            .spans(raw_x.max(self.target.x_m), raw_y.max(self.target.y_m))
    }

    fn draw_content<DB: DrawingBackend>(
        &self,
        chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        x_span: f64,
        y_span: f64,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        for attempt in &self.result.attempts {
            for run in visible_runs(&attempt.trajectory.points(), x_span, y_span) {
                chart.draw_series(DashedLineSeries::new(
                    run,
                    6,
                    4,
                    ATTEMPT_COLOR.mix(0.5).stroke_width(1),
                ))?;
            }
        }

        chart
            .draw_series(std::iter::once(Circle::new(
                (self.target.x_m, self.target.y_m),
                5,
                RED.filled(),
            )))?
            .label("Target")
            .legend(|(x, y)| Circle::new((x, y), 4, RED.filled()));

        if let Some(best) = &self.result.best {
            let label = format!("Best: {}", self.result.mode.shot_label(best.inputs));
            draw_labeled_path(chart, &best.trajectory, &label, x_span, y_span)?;
        }
        Ok(())
    }
}

fn render<S: PlotScene>(path: &str, scene: &S) -> SimResult<()> {
    let drawn = match output_format(path) {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, PLOT_SIZE_PX).into_drawing_area();
            scene.draw(&root).map_err(|e| e.to_string())
        }
        OutputFormat::Bitmap => {
            let root = BitMapBackend::new(path, PLOT_SIZE_PX).into_drawing_area();
            scene.draw(&root).map_err(|e| e.to_string())
        }
    };
    drawn.map_err(SimError::Render)
}

pub fn render_trajectory(
    path: &str,
    trajectory: &Trajectory,
    label: &str,
    window: AxisWindow,
) -> SimResult<()> {
    render(
        path,
        &TrajectoryScene {
            trajectory,
            label,
            window,
        },
    )
}

/// Draws every attempt dashed, the target, and the accepted shot if any.
pub fn render_search(
    path: &str,
    result: &SearchResult,
    target: Target,
    window: AxisWindow,
) -> SimResult<()> {
    render(
        path,
        &SearchScene {
            result,
            target,
            window,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::{OutputFormat, output_format, timestamped_plot_path, visible_runs};

    #[test]
    fn format_follows_extension() {
        assert_eq!(output_format("out/search.svg"), OutputFormat::Svg);
        assert_eq!(output_format("SEARCH.SVG"), OutputFormat::Svg);
        assert_eq!(output_format("search.png"), OutputFormat::Bitmap);
        assert_eq!(output_format("search"), OutputFormat::Bitmap);
    }

    #[test]
    fn timestamped_path_keeps_prefix() {
        let path = timestamped_plot_path("search");
        assert!(path.starts_with("search_"));
        assert!(path.ends_with(".svg"));
    }

    #[test]
    fn runs_split_where_path_leaves_window() {
        let points = [
            (0.0, 1.0),
            (5.0, 8.0),
            (10.0, 12.0),
            (15.0, 9.0),
            (20.0, 2.0),
            (25.0, -3.0),
        ];
        let runs = visible_runs(&points, 30.0, 10.0);
        assert_eq!(
            runs,
            vec![
                vec![(0.0, 1.0), (5.0, 8.0)],
                vec![(15.0, 9.0), (20.0, 2.0)],
            ]
        );
    }

    #[test]
    fn runs_are_empty_when_nothing_is_visible() {
        assert!(visible_runs(&[(50.0, 1.0), (60.0, 2.0)], 40.0, 40.0).is_empty());
    }
}
