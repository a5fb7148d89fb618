// Stateless rendering of the canvas snapshot. All the interesting numbers
// live in `CanvasState`; this just paints them.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line, Rectangle};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::canvas::anim;
use crate::shared::CanvasState;

pub fn render(frame: &mut Frame, area: Rect, state: &CanvasState) {
    if state.loading {
        let loading = Paragraph::new("loading sounds...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, area);
        return;
    }

    let w = area.width as f64;
    let h = area.height as f64;
    // low saturation/lightness keeps the background dark; flashes lift it
    let lightness = (0.06 + state.flash_intensity as f64 * 0.25).min(0.5);
    let bg = hsl_to_rgb(state.background_hue as f64, 0.25, lightness);

    // shake shifts the whole world by offsetting the viewport
    let (sx, sy) = (state.shake_offset.0 as f64, state.shake_offset.1 as f64);

    let canvas = Canvas::default()
        .block(Block::default().style(Style::default().bg(bg)))
        .marker(Marker::Braille)
        .background_color(bg)
        .x_bounds([sx, w + sx])
        .y_bounds([sy, h + sy])
        .paint(|ctx| {
            draw_grid(ctx, state, w, h);
            ctx.layer();
            for animation in &state.animations {
                anim::render_animation(ctx, animation, (w, h));
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_grid(ctx: &mut ratatui::widgets::canvas::Context, state: &CanvasState, w: f64, h: f64) {
    let cell_w = w / state.grid_cols as f64;
    let cell_h = h / state.grid_rows as f64;

    // highlights under everything else
    let highlight = anim::fade((255, 255, 255), (0.1 + state.energy as f64 * 0.4).min(1.0));
    for &(row, col) in state.highlighted_pads.keys() {
        ctx.draw(&Rectangle {
            x: col as f64 * cell_w,
            // grid rows count from the top, the canvas from the bottom
            y: h - (row as f64 + 1.0) * cell_h,
            width: cell_w,
            height: cell_h,
            color: highlight,
        });
    }

    let line_color = anim::fade((255, 255, 255), 0.05 + state.energy as f64 * 0.15);
    for i in 1..state.grid_cols {
        let x = i as f64 * cell_w;
        ctx.draw(&Line {
            x1: x,
            y1: 0.0,
            x2: x,
            y2: h,
            color: line_color,
        });
    }
    for i in 1..state.grid_rows {
        let y = i as f64 * cell_h;
        ctx.draw(&Line {
            x1: 0.0,
            y1: y,
            x2: w,
            y2: y,
            color: line_color,
        });
    }
}

/// HSL to terminal RGB. Hue in degrees, s/l in [0, 1].
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    Color::Rgb(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}
