use macroquad::prelude::*;

use crate::constants::{ARROW_HEAD_PX, X_GRID_LINES, Y_GRID_LINES};

/// Screen rectangle of the plot and the world extent mapped onto it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlotArea {
    pub(crate) left: f32,
    pub(crate) right: f32,
    pub(crate) top: f32,
    pub(crate) bottom: f32,
    pub(crate) world_max_x: f32,
    pub(crate) world_max_y: f32,
}

impl PlotArea {
    pub(crate) fn to_screen(&self, world: Vec2) -> Vec2 {
        let plot_w = (self.right - self.left).max(1.0);
        let plot_h = (self.bottom - self.top).max(1.0);
        let x = self.left + (world.x / self.world_max_x.max(1.0)) * plot_w;
        let y = self.bottom - (world.y / self.world_max_y.max(1.0)) * plot_h;
        vec2(x, y)
    }
}

fn format_axis_value(value: f32, axis_max: f32) -> String {
    if axis_max >= 1000.0 {
        format!("{value:.0}")
    } else if axis_max >= 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn draw_ui_text(text: &str, x: f32, y: f32, font_size: u16, color: Color) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn draw_grid(area: &PlotArea, color: Color) {
    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = area.left + t * (area.right - area.left);
        draw_line(x, area.top, x, area.bottom, 1.0, color);
    }
    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = area.bottom - t * (area.bottom - area.top);
        draw_line(area.left, y, area.right, y, 1.0, color);
    }
    draw_line(area.left, area.bottom, area.right, area.bottom, 2.0, DARKGRAY);
    draw_line(area.left, area.top, area.left, area.bottom, 2.0, DARKGRAY);
}

pub(crate) fn draw_axis_tick_labels(area: &PlotArea) {
    let label_color = Color::from_rgba(105, 113, 124, 255);
    let tick_font_size: u16 = 16;

    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = area.left + t * (area.right - area.left);
        let label = format_axis_value(t * area.world_max_x, area.world_max_x);
        let size = measure_text(&label, None, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            x - (size.width * 0.5),
            area.bottom + 22.0,
            tick_font_size,
            label_color,
        );
    }

    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = area.bottom - t * (area.bottom - area.top);
        let label = format_axis_value(t * area.world_max_y, area.world_max_y);
        let size = measure_text(&label, None, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            (area.left - 8.0) - size.width,
            y + (size.height * 0.35),
            tick_font_size,
            label_color,
        );
    }

    draw_ui_text(
        "X Position (m)",
        area.right - 140.0,
        area.bottom + 48.0,
        18,
        label_color,
    );
    draw_ui_text(
        "Y Position (m)",
        area.left + 10.0,
        area.top - 8.0,
        18,
        label_color,
    );
}

pub(crate) fn draw_path(points: &[Vec2], area: &PlotArea, thickness: f32, color: Color) {
    if points.len() < 2 {
        return;
    }
    let mut prev = area.to_screen(points[0]);
    for point in points.iter().skip(1).copied() {
        let cur = area.to_screen(point);
        draw_line(prev.x, prev.y, cur.x, cur.y, thickness, color);
        prev = cur;
    }
}

/// Shaft plus filled head; heads are skipped for arrows shorter than the head itself.
pub(crate) fn draw_arrow(from: Vec2, to: Vec2, thickness: f32, color: Color) {
    let shaft = to - from;
    let length = shaft.length();
    if length < 0.5 {
        return;
    }
    draw_line(from.x, from.y, to.x, to.y, thickness, color);
    if length < ARROW_HEAD_PX {
        return;
    }
    let dir = shaft / length;
    let normal = vec2(-dir.y, dir.x);
    let base = to - (dir * ARROW_HEAD_PX);
    draw_triangle(
        to,
        base + (normal * ARROW_HEAD_PX * 0.5),
        base - (normal * ARROW_HEAD_PX * 0.5),
        color,
    );
}
