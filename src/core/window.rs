use super::error::{SimResult, ensure_in_range};

pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

pub const DEFAULT_PLOT_SCALE_M: f64 = 50.0;
pub const MIN_PLOT_SCALE_M: f64 = 10.0;
pub const MAX_PLOT_SCALE_M: f64 = 200.0;

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;

/// Visible data extent of a plot, always anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisWindow {
    /// Square `[0, scale] x [0, scale]` view.
    Square(f64),
    /// Padded view with a fixed x:y ratio that fits the data.
    FitRatio,
}

impl AxisWindow {
    pub fn square(scale_m: f64) -> SimResult<Self> {
        ensure_in_range("plot scale", scale_m, MIN_PLOT_SCALE_M, MAX_PLOT_SCALE_M)?;
        Ok(Self::Square(scale_m))
    }

    pub fn spans(self, raw_max_x: f64, raw_max_y: f64) -> (f64, f64) {
        match self {
            Self::Square(scale_m) => (scale_m, scale_m),
            Self::FitRatio => fixed_ratio_axis_window_f64(raw_max_x, raw_max_y),
        }
    }
}

pub fn fixed_ratio_axis_window_f64(raw_max_x: f64, raw_max_y: f64) -> (f64, f64) {
    let raw_x_span = raw_max_x.max(1.0);
    let raw_y_span = raw_max_y.max(1.0);
    let x_pad = raw_x_span * X_PADDING_RATIO;
    let y_pad = raw_y_span * Y_PADDING_RATIO;

    let mut x_span = (raw_max_x + x_pad).max(1.0);
    let mut y_span = (raw_max_y + y_pad).max(1.0);

    if x_span / y_span < DISTANCE_TO_HEIGHT_RATIO {
        x_span = y_span * DISTANCE_TO_HEIGHT_RATIO;
    } else {
        y_span = x_span / DISTANCE_TO_HEIGHT_RATIO;
    }

    (x_span, y_span)
}

pub fn fixed_ratio_axis_window_f32(raw_max_x: f32, raw_max_y: f32) -> (f32, f32) {
    let (x_span, y_span) = fixed_ratio_axis_window_f64(raw_max_x as f64, raw_max_y as f64);
    (x_span as f32, y_span as f32)
}

#[cfg(test)]
mod tests {
    use super::{AxisWindow, DISTANCE_TO_HEIGHT_RATIO, fixed_ratio_axis_window_f64};

    #[test]
    fn fit_window_keeps_ratio_and_covers_data() {
        let (x_span, y_span) = fixed_ratio_axis_window_f64(40.8, 10.2);
        assert!(x_span >= 40.8 && y_span >= 10.2);
        assert!((x_span / y_span - DISTANCE_TO_HEIGHT_RATIO).abs() < 1e-12);

        let (x_span, y_span) = fixed_ratio_axis_window_f64(5.0, 80.0);
        assert!(y_span >= 80.0);
        assert!((x_span / y_span - DISTANCE_TO_HEIGHT_RATIO).abs() < 1e-12);
    }

    #[test]
    fn degenerate_data_still_gets_a_window() {
        assert_eq!(fixed_ratio_axis_window_f64(0.0, 0.0), (2.0, 1.0));
    }

    #[test]
    fn square_window_follows_form_limits() {
        assert_eq!(AxisWindow::square(50.0).unwrap().spans(900.0, 3.0), (50.0, 50.0));
        assert!(AxisWindow::square(5.0).is_err());
        assert!(AxisWindow::square(250.0).is_err());
    }
}
