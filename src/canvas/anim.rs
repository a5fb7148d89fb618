// Animation drawing: a closed tagged-union dispatch over the twelve
// animation kinds. Every routine is a pure function of progress in [0, 1];
// progress 1 means fully faded. Terminals have no alpha channel, so fading
// is approximated by dimming the color toward black.

use std::f64::consts::PI;

use ratatui::style::Color;
use ratatui::widgets::canvas::{Circle, Context, Line, Points, Rectangle};

use crate::pack::model::AnimationType;
use crate::shared::ActiveAnimation;

pub fn render_animation(ctx: &mut Context, anim: &ActiveAnimation, bounds: (f64, f64)) {
    let progress = anim.progress as f64;
    if progress >= 1.0 {
        return;
    }
    let (w, h) = bounds;
    let alpha = (1.0 - progress).clamp(0.0, 1.0);
    let color = fade(anim.color, alpha);
    let origin = resolve_origin(anim, bounds);
    let scale = if anim.full_screen { 2.5 } else { 1.0 };
    let min_dim = w.min(h);

    match anim.kind {
        AnimationType::Ripple => ripple(ctx, origin, progress, color, scale, min_dim, alpha, anim.color),
        AnimationType::Burst => burst(ctx, origin, progress, color, scale, min_dim),
        AnimationType::Spiral => spiral(ctx, origin, progress, scale, min_dim, alpha, anim.color),
        AnimationType::Wave => wave(ctx, origin, progress, scale, min_dim, alpha, anim.color),
        AnimationType::Scatter => scatter(ctx, origin, progress, color, scale, min_dim),
        AnimationType::Pulse => pulse(ctx, origin, progress, scale, min_dim, alpha, anim.color),
        AnimationType::Bloom => bloom(ctx, origin, progress, color, scale, min_dim),
        AnimationType::Shatter => shatter(ctx, origin, progress, color, scale, min_dim, anim.id),
        AnimationType::Orbit => orbit(ctx, origin, progress, color, scale, min_dim),
        AnimationType::Flash => flash(ctx, progress, anim.color, bounds),
        AnimationType::Mirror => mirror(ctx, origin, progress, color, min_dim, bounds),
        AnimationType::Slice => slice(ctx, origin, progress, anim.color, bounds),
    }
}

/// Spawn point in canvas coordinates (y up). The (-1, -1) sentinel from
/// key presses maps to the screen center.
pub fn resolve_origin(anim: &ActiveAnimation, bounds: (f64, f64)) -> (f64, f64) {
    let (w, h) = bounds;
    if anim.is_centered() {
        (w / 2.0, h / 2.0)
    } else {
        // screen coords are y-down, the canvas is y-up
        (anim.origin.0 as f64, h - anim.origin.1 as f64)
    }
}

/// Dim an RGB color toward black; the terminal stand-in for alpha.
pub fn fade(rgb: (u8, u8, u8), alpha: f64) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    Color::Rgb(
        (rgb.0 as f64 * a) as u8,
        (rgb.1 as f64 * a) as u8,
        (rgb.2 as f64 * a) as u8,
    )
}

fn ring(ctx: &mut Context, center: (f64, f64), radius: f64, color: Color) {
    if radius > 0.0 {
        ctx.draw(&Circle {
            x: center.0,
            y: center.1,
            radius,
            color,
        });
    }
}

fn dots(ctx: &mut Context, coords: &[(f64, f64)], color: Color) {
    ctx.draw(&Points { coords, color });
}

fn ripple(
    ctx: &mut Context,
    origin: (f64, f64),
    progress: f64,
    color: Color,
    scale: f64,
    min_dim: f64,
    alpha: f64,
    rgb: (u8, u8, u8),
) {
    let max_radius = min_dim * 0.4 * scale;
    ring(ctx, origin, max_radius * progress, color);
    // delayed inner ripple
    if progress > 0.2 {
        let inner = (progress - 0.2) / 0.8;
        ring(ctx, origin, max_radius * inner * 0.6, fade(rgb, alpha * 0.5));
    }
}

fn burst(
    ctx: &mut Context,
    origin: (f64, f64),
    progress: f64,
    color: Color,
    scale: f64,
    min_dim: f64,
) {
    let count = 12;
    let dist = min_dim * 0.3 * progress * scale;
    let coords: Vec<(f64, f64)> = (0..count)
        .map(|i| {
            let angle = i as f64 * 2.0 * PI / count as f64;
            (origin.0 + dist * angle.cos(), origin.1 + dist * angle.sin())
        })
        .collect();
    dots(ctx, &coords, color);
}

fn spiral(
    ctx: &mut Context,
    origin: (f64, f64),
    progress: f64,
    scale: f64,
    min_dim: f64,
    alpha: f64,
    rgb: (u8, u8, u8),
) {
    let turns = 3.0;
    let max_radius = min_dim * 0.25 * scale;
    let dot_count = 20;
    for i in 0..dot_count {
        let t = i as f64 / dot_count as f64 * progress;
        let angle = t * turns * 2.0 * PI;
        let radius = max_radius * t;
        let p = (origin.0 + radius * angle.cos(), origin.1 + radius * angle.sin());
        dots(ctx, &[p], fade(rgb, alpha * (1.0 - t)));
    }
}

fn wave(
    ctx: &mut Context,
    origin: (f64, f64),
    progress: f64,
    scale: f64,
    min_dim: f64,
    alpha: f64,
    rgb: (u8, u8, u8),
) {
    let rings = 3;
    let max_radius = min_dim * 0.35 * scale;
    for i in 0..rings {
        let delay = i as f64 * 0.15;
        let ring_progress = ((progress - delay) / (1.0 - delay)).clamp(0.0, 1.0);
        if ring_progress > 0.0 {
            ring(
                ctx,
                origin,
                max_radius * ring_progress,
                fade(rgb, alpha * (1.0 - ring_progress)),
            );
        }
    }
}

fn scatter(
    ctx: &mut Context,
    origin: (f64, f64),
    progress: f64,
    color: Color,
    scale: f64,
    min_dim: f64,
) {
    let count = 8;
    let max_dist = min_dim * 0.3 * scale;
    for i in 0..count {
        let angle = (i as f64 * 45.0 + progress * 30.0) * PI / 180.0;
        let dist = max_dist * progress * (0.5 + (i % 3) as f64 * 0.2);
        let x = origin.0 + dist * angle.cos();
        let y = origin.1 + dist * angle.sin();
        let size = (1.0 - progress) * 2.0 * scale;
        ctx.draw(&Rectangle {
            x: x - size / 2.0,
            y: y - size / 2.0,
            width: size,
            height: size,
            color,
        });
    }
}

fn pulse(
    ctx: &mut Context,
    origin: (f64, f64),
    progress: f64,
    scale: f64,
    min_dim: f64,
    alpha: f64,
    rgb: (u8, u8, u8),
) {
    let max_radius = min_dim * 0.15 * scale;
    let grow = if progress < 0.5 { progress * 2.0 } else { 1.0 };
    let a = if progress < 0.5 {
        alpha
    } else {
        alpha * (1.0 - (progress - 0.5) * 2.0)
    };
    // filled-ish disc: concentric rings down to the center
    let radius = max_radius * grow;
    let color = fade(rgb, a.max(0.0));
    let mut r = radius;
    while r > 0.5 {
        ring(ctx, origin, r, color);
        r -= 1.0;
    }
}

fn bloom(
    ctx: &mut Context,
    origin: (f64, f64),
    progress: f64,
    color: Color,
    scale: f64,
    min_dim: f64,
) {
    let petals = 6;
    let max_radius = min_dim * 0.2 * progress * scale;
    let petal_radius = (1.0 - progress) * 1.5 * scale;
    for i in 0..petals {
        let angle = (i as f64 * 60.0 + progress * 45.0) * PI / 180.0;
        let center = (
            origin.0 + max_radius * angle.cos(),
            origin.1 + max_radius * angle.sin(),
        );
        ring(ctx, center, petal_radius, color);
    }
    ring(ctx, origin, (1.0 - progress) * 1.0 * scale, color);
}

fn shatter(
    ctx: &mut Context,
    origin: (f64, f64),
    progress: f64,
    color: Color,
    scale: f64,
    min_dim: f64,
    seed: u64,
) {
    let fragments = 10;
    let max_dist = min_dim * 0.35 * scale;
    // phase from the animation id, so overlapping shatters don't stack
    let phase = (seed % 8) as f64 * 17.0;
    let coords: Vec<(f64, f64)> = (0..fragments)
        .map(|i| {
            // golden-angle scatter with a downward gravity pull
            let angle = (i as f64 * 137.5 + phase) * PI / 180.0;
            let dist = max_dist * progress * (0.3 + (i % 4) as f64 * 0.2);
            (
                origin.0 + dist * angle.cos(),
                origin.1 + dist * angle.sin() - progress * 6.0 * scale,
            )
        })
        .collect();
    dots(ctx, &coords, color);
}

fn orbit(
    ctx: &mut Context,
    origin: (f64, f64),
    progress: f64,
    color: Color,
    scale: f64,
    min_dim: f64,
) {
    let orbiters = 4;
    let orbit_radius = min_dim * 0.15 * (1.0 + progress * 0.5) * scale;
    let coords: Vec<(f64, f64)> = (0..orbiters)
        .map(|i| {
            let angle = (i as f64 * 90.0 + progress * 720.0) * PI / 180.0;
            (
                origin.0 + orbit_radius * angle.cos(),
                origin.1 + orbit_radius * angle.sin(),
            )
        })
        .collect();
    dots(ctx, &coords, color);
    ring(ctx, origin, orbit_radius, color);
}

fn flash(ctx: &mut Context, progress: f64, rgb: (u8, u8, u8), bounds: (f64, f64)) {
    // quick attack, long fade; the view also lifts the background
    let alpha = if progress < 0.1 {
        progress * 10.0
    } else {
        (1.0 - progress) * 1.1
    };
    ctx.draw(&Rectangle {
        x: 0.0,
        y: 0.0,
        width: bounds.0,
        height: bounds.1,
        color: fade(rgb, alpha.clamp(0.0, 0.6)),
    });
}

fn mirror(
    ctx: &mut Context,
    origin: (f64, f64),
    progress: f64,
    color: Color,
    min_dim: f64,
    bounds: (f64, f64),
) {
    // 4-axis symmetry relative to the screen center
    let center = (bounds.0 / 2.0, bounds.1 / 2.0);
    let count = 8;
    let max_dist = min_dim * 0.2 * progress;
    let quadrants = [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)];

    let mut coords = Vec::with_capacity(quadrants.len() * count);
    for (qx, qy) in quadrants {
        for i in 0..count {
            let angle = (i as f64 * 360.0 / count as f64 + progress * 90.0) * PI / 180.0;
            let rx = max_dist * angle.cos();
            let ry = max_dist * angle.sin();
            coords.push((
                (origin.0 - center.0) * qx + center.0 + rx,
                (origin.1 - center.1) * qy + center.1 + ry,
            ));
        }
    }
    dots(ctx, &coords, color);
}

fn slice(ctx: &mut Context, origin: (f64, f64), progress: f64, rgb: (u8, u8, u8), bounds: (f64, f64)) {
    // a band sweeping out from the tap point, across the longer axis
    let (w, h) = bounds;
    let alpha = if progress < 0.2 {
        progress * 5.0
    } else {
        (1.0 - progress) * 0.8
    };
    let color = fade(rgb, alpha.clamp(0.0, 0.4));
    if w > h {
        let thickness = progress * h * 0.5;
        ctx.draw(&Rectangle {
            x: 0.0,
            y: origin.1 - thickness / 2.0,
            width: w,
            height: thickness,
            color,
        });
        ctx.draw(&Line {
            x1: 0.0,
            y1: origin.1,
            x2: w,
            y2: origin.1,
            color,
        });
    } else {
        let thickness = progress * w * 0.5;
        ctx.draw(&Rectangle {
            x: origin.0 - thickness / 2.0,
            y: 0.0,
            width: thickness,
            height: h,
            color,
        });
        ctx.draw(&Line {
            x1: origin.0,
            y1: 0.0,
            x2: origin.0,
            y2: h,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ANIMATION_MS;
    use std::time::Duration;

    fn anim(origin: (f32, f32)) -> ActiveAnimation {
        ActiveAnimation {
            id: 0,
            kind: AnimationType::Ripple,
            origin,
            color: (200, 100, 50),
            full_screen: false,
            progress: 0.0,
            started_at: Duration::ZERO,
            duration_ms: ANIMATION_MS,
        }
    }

    #[test]
    fn sentinel_origin_maps_to_center() {
        let a = anim((-1.0, -1.0));
        assert_eq!(resolve_origin(&a, (80.0, 24.0)), (40.0, 12.0));
    }

    #[test]
    fn screen_origin_flips_the_y_axis() {
        let a = anim((10.0, 4.0));
        assert_eq!(resolve_origin(&a, (80.0, 24.0)), (10.0, 20.0));
    }

    #[test]
    fn fade_dims_toward_black() {
        assert_eq!(fade((200, 100, 50), 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(fade((200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(fade((200, 100, 50), 0.0), Color::Rgb(0, 0, 0));
    }
}
