use macroquad::prelude::*;
use projectile_search::core::window::fixed_ratio_axis_window_f32;
use projectile_search::core::{LaunchInputs, Trajectory, TrajectoryModel};

use crate::constants::{
    BOTTOM_MARGIN, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, LEFT_MARGIN, MSAA_SAMPLES,
    RIGHT_MARGIN, STATUS_Y, TITLE_Y, TOP_MARGIN, VELOCITY_ARROW_SCALE,
};
use crate::model::Playback;
use crate::render::{PlotArea, draw_arrow, draw_axis_tick_labels, draw_grid, draw_path, draw_ui_text};

const VX_COLOR: Color = Color::new(0.13, 0.62, 0.27, 1.0);
const VY_COLOR: Color = Color::new(0.86, 0.16, 0.16, 1.0);

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Projectile Trajectory Viewer".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

fn world_points(flight: &Trajectory) -> Vec<Vec2> {
    flight
        .samples()
        .iter()
        .map(|s| vec2(s.x_m as f32, s.y_m.max(0.0) as f32))
        .collect()
}

/// World extent covering the whole flight, padded to the fixed x:y ratio.
pub(crate) fn world_window(flight: &Trajectory) -> (f32, f32) {
    let (raw_max_x, raw_max_y) = flight
        .samples()
        .iter()
        .fold((0.0f32, 0.0f32), |(mx, my), s| {
            (mx.max(s.x_m as f32), my.max(s.y_m as f32))
        });
    fixed_ratio_axis_window_f32(raw_max_x, raw_max_y)
}

fn draw_header(inputs: LaunchInputs, model: &TrajectoryModel, left: f32) {
    draw_ui_text(
        &format!(
            "Projectile Motion: θ={:.1}°, v0={:.1} m/s, h0={:.1} m, g={:.2} m/s^2",
            inputs.angle_deg,
            inputs.speed_mps,
            inputs.height_m,
            model.gravity_mps2()
        ),
        left,
        TITLE_Y,
        28,
        Color::from_rgba(30, 30, 35, 255),
    );
}

fn draw_status(flight: &Trajectory, playback: &Playback, left: f32) {
    let Some(sample) = flight.samples().get(playback.frame()) else {
        return;
    };
    let phase = if playback.is_paused() {
        "Paused"
    } else if playback.is_finished() {
        "Landed"
    } else {
        "Flying"
    };
    draw_ui_text(
        &format!(
            "{phase} | t = {:.2} s | x = {:.2} m | y = {:.2} m | vx = {:.2} m/s | vy = {:.2} m/s | Space: pause  R: restart",
            sample.time_s, sample.x_m, sample.y_m, sample.vx_mps, sample.vy_mps
        ),
        left,
        STATUS_Y,
        20,
        DARKGRAY,
    );
}

pub(crate) async fn run(inputs: LaunchInputs, model: TrajectoryModel, flight: Trajectory) {
    let points = world_points(&flight);
    let (world_max_x, world_max_y) = world_window(&flight);
    let mut playback = Playback::new(points.len());

    loop {
        if is_key_pressed(KeyCode::Space) {
            if playback.is_finished() {
                playback.restart();
            } else {
                playback.toggle_pause();
            }
        }
        if is_key_pressed(KeyCode::R) {
            playback.restart();
        }
        playback.advance(get_frame_time());

        let area = PlotArea {
            left: LEFT_MARGIN,
            right: screen_width() - RIGHT_MARGIN,
            top: TOP_MARGIN,
            bottom: screen_height() - BOTTOM_MARGIN,
            world_max_x,
            world_max_y,
        };

        clear_background(Color::from_rgba(250, 251, 253, 255));
        draw_grid(&area, Color::from_rgba(227, 231, 236, 255));
        draw_axis_tick_labels(&area);
        draw_header(inputs, &model, LEFT_MARGIN);
        draw_status(&flight, &playback, LEFT_MARGIN);

        let frame = playback.frame();
        draw_path(
            &points[..=frame],
            &area,
            3.0,
            Color::from_rgba(54, 123, 245, 255),
        );

        // Arrows are rebuilt from the current sample every frame.
        if let Some(sample) = flight.samples().get(frame) {
            let position = points[frame];
            let origin = area.to_screen(position);
            let vx_tip = area.to_screen(position + vec2(sample.vx_mps as f32 * VELOCITY_ARROW_SCALE, 0.0));
            let vy_tip = area.to_screen(position + vec2(0.0, sample.vy_mps as f32 * VELOCITY_ARROW_SCALE));
            draw_arrow(origin, vx_tip, 2.5, VX_COLOR);
            draw_arrow(origin, vy_tip, 2.5, VY_COLOR);

            draw_circle(origin.x, origin.y, 7.0, RED);
            draw_circle_lines(origin.x, origin.y, 7.0, 2.0, MAROON);
        }

        next_frame().await;
    }
}
